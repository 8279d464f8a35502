use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error_map::{EntityField, ErrorMap};
use super::id::LocalId;
use super::test_results::ConnectionTestOutcome;

/// Connectivity test query used by a new connection.
pub const DEFAULT_TEST_QUERY: &str = "SELECT 0;";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DatabaseField {
    Name,
    Type,
    Url,
    User,
    Password,
    Query,
}

impl DatabaseField {
    pub fn all() -> &'static [DatabaseField] {
        &[
            DatabaseField::Name,
            DatabaseField::Type,
            DatabaseField::Url,
            DatabaseField::User,
            DatabaseField::Password,
            DatabaseField::Query,
        ]
    }
}

impl EntityField for DatabaseField {
    fn key(&self) -> &'static str {
        match self {
            DatabaseField::Name => "name",
            DatabaseField::Type => "type",
            DatabaseField::Url => "url",
            DatabaseField::User => "user",
            DatabaseField::Password => "dbPassword",
            DatabaseField::Query => "query",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            DatabaseField::Name => "Name",
            DatabaseField::Type => "Type",
            DatabaseField::Url => "JDBC URL",
            DatabaseField::User => "User",
            DatabaseField::Password => "Password",
            DatabaseField::Query => "Test Query",
        }
    }
}

impl FromStr for DatabaseField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatabaseField::all()
            .iter()
            .find(|field| field.key().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown database field: {s}"))
    }
}

/// Supported source connection types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DbType {
    MySql,
    MsSql,
    PostgreSql,
}

impl DbType {
    pub fn all_variants() -> &'static [DbType] {
        &[DbType::MySql, DbType::MsSql, DbType::PostgreSql]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DbType::MySql => "MySQL",
            DbType::MsSql => "MSSQL",
            DbType::PostgreSql => "PostgreSQL",
        }
    }

    /// JDBC URL template offered when the type is selected.
    pub fn default_url(&self) -> &'static str {
        match self {
            DbType::MySql => "jdbc:mysql://localhost:3306/",
            DbType::MsSql => "jdbc:sqlserver://localhost:1433;databaseName=",
            DbType::PostgreSql => "jdbc:postgresql://localhost:5432/",
        }
    }

    /// Case-insensitive lookup by label.
    pub fn from_label(label: &str) -> Option<DbType> {
        Self::all_variants()
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(label.trim()))
            .copied()
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Source database record as stored by the remote configuration service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub db_type: String,
    pub url: String,
    pub user: String,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_password: Option<String>,
}

/// Request body entry for a bulk config save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseRequest {
    pub user: String,
    pub name: String,
    #[serde(rename = "type")]
    pub db_type: String,
    pub query: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_password: Option<String>,
}

impl From<DatabaseRequest> for DatabaseRecord {
    fn from(request: DatabaseRequest) -> Self {
        Self {
            name: request.name,
            db_type: request.db_type,
            url: request.url,
            user: request.user,
            query: request.query,
            db_password: request.db_password,
        }
    }
}

/// One source database connection as held by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub local_id: LocalId,
    /// Name under which the server knows this connection; set once confirmed.
    pub persisted_name: Option<String>,
    pub name: String,
    pub db_type: String,
    pub url: String,
    pub user: String,
    /// Never returned by the server; only sent when edited.
    pub db_password: Option<String>,
    pub query: String,
    pub errors: Option<ErrorMap<DatabaseField>>,
    pub test_result: Option<ConnectionTestOutcome>,
    pub is_testable: bool,
    pub is_open: bool,
}

impl Database {
    pub fn draft() -> Self {
        Self {
            local_id: LocalId::new(),
            persisted_name: None,
            name: String::new(),
            db_type: String::new(),
            url: String::new(),
            user: String::new(),
            db_password: None,
            query: DEFAULT_TEST_QUERY.to_string(),
            errors: None,
            test_result: None,
            is_testable: false,
            is_open: true,
        }
    }

    /// A record received from the server is confirmed under its name.
    pub fn from_record(record: DatabaseRecord) -> Self {
        let query = if record.query.is_empty() {
            DEFAULT_TEST_QUERY.to_string()
        } else {
            record.query
        };
        Self {
            local_id: LocalId::new(),
            persisted_name: Some(record.name.clone()),
            name: record.name,
            db_type: record.db_type,
            url: record.url,
            user: record.user,
            db_password: record.db_password,
            query,
            errors: None,
            test_result: None,
            is_testable: true,
            is_open: false,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.persisted_name.is_some()
    }

    pub fn to_request(&self) -> DatabaseRequest {
        DatabaseRequest {
            user: self.user.clone(),
            name: self.name.clone(),
            db_type: self.db_type.clone(),
            query: self.query.clone(),
            url: self.url.clone(),
            db_password: self.db_password.clone(),
        }
    }

    pub fn field_value(&self, field: DatabaseField) -> &str {
        match field {
            DatabaseField::Name => &self.name,
            DatabaseField::Type => &self.db_type,
            DatabaseField::Url => &self.url,
            DatabaseField::User => &self.user,
            DatabaseField::Password => self.db_password.as_deref().unwrap_or(""),
            DatabaseField::Query => &self.query,
        }
    }

    pub fn set_field(&mut self, field: DatabaseField, value: &str) {
        let value = value.to_string();
        match field {
            DatabaseField::Name => self.name = value,
            DatabaseField::Type => self.db_type = value,
            DatabaseField::Url => self.url = value,
            DatabaseField::User => self.user = value,
            DatabaseField::Password => self.db_password = Some(value),
            DatabaseField::Query => self.query = value,
        }
    }

    /// A confirmed connection is addressed by name on the server, so its
    /// name cannot be edited locally.
    pub fn is_field_editable(&self, field: DatabaseField) -> bool {
        !(field == DatabaseField::Name && self.is_confirmed())
    }
}
