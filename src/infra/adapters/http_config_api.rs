//! reqwest client for the ETL configuration REST service.
//!
//! Endpoints, relative to the base URL:
//! - `GET|POST /mappings`, `PUT|DELETE /mappings/{id}`, `GET /mappings/{id}/test`
//! - `GET|POST /configs`, `DELETE /configs/{name}`, `GET /configs/{name}/test`

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use etl_console_app::ports::{ApiError, ConfigApi};
use etl_console_domain::{
    ConfigRecord, ConfigRequest, MappingId, MappingRecord, MappingRequest, MappingTestResults,
};

use crate::config::Settings;

/// Error body sent by the service's exception handlers.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

pub struct HttpConfigApi {
    client: Client,
    base_url: String,
    credentials: Option<(String, Option<String>)>,
}

impl HttpConfigApi {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|error| ApiError::Transport(format!("failed to build HTTP client: {error}")))?;
        Ok(Self::with_client(client, settings))
    }

    pub fn with_client(client: Client, settings: &Settings) -> Self {
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            credentials: settings
                .credentials()
                .map(|(user, password)| (user.to_string(), password.map(str::to_string))),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.credentials {
            Some((user, password)) => builder.basic_auth(user, password.as_ref()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|error| ApiError::Transport(error.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "config service responded");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            message: parse_error_message(&body),
        })
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        self.send(builder)
            .await?
            .json::<T>()
            .await
            .map_err(|error| ApiError::Decode(error.to_string()))
    }
}

fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

fn mapping_path(id: MappingId) -> String {
    format!("mappings/{id}")
}

fn config_path(name: &str) -> String {
    format!("configs/{}", urlencoding::encode(name))
}

#[async_trait]
impl ConfigApi for HttpConfigApi {
    async fn list_mappings(&self) -> Result<Vec<MappingRecord>, ApiError> {
        self.send_json(self.request(Method::GET, "mappings")).await
    }

    async fn create_mapping(&self, request: &MappingRequest) -> Result<MappingRecord, ApiError> {
        self.send_json(self.request(Method::POST, "mappings").json(request))
            .await
    }

    async fn update_mapping(
        &self,
        id: MappingId,
        request: &MappingRequest,
    ) -> Result<MappingRecord, ApiError> {
        self.send_json(self.request(Method::PUT, &mapping_path(id)).json(request))
            .await
    }

    async fn delete_mapping(&self, id: MappingId) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &mapping_path(id)))
            .await
            .map(drop)
    }

    async fn test_mapping(&self, id: MappingId) -> Result<MappingTestResults, ApiError> {
        let path = format!("{}/test", mapping_path(id));
        self.send_json(self.request(Method::GET, &path)).await
    }

    async fn get_config(&self) -> Result<ConfigRecord, ApiError> {
        self.send_json(self.request(Method::GET, "configs")).await
    }

    async fn save_config(&self, request: &ConfigRequest) -> Result<ConfigRecord, ApiError> {
        self.send_json(self.request(Method::POST, "configs").json(request))
            .await
    }

    async fn delete_database(&self, name: &str) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &config_path(name)))
            .await
            .map(drop)
    }

    async fn test_database(&self, name: &str) -> Result<bool, ApiError> {
        let path = format!("{}/test", config_path(name));
        self.send_json(self.request(Method::GET, &path)).await
    }
}
