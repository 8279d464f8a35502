use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error_map::{EntityField, ErrorMap};
use super::id::{LocalId, MappingId};
use super::test_results::MappingTestResults;

pub const DEFAULT_FETCH_SIZE: u32 = 1000;
pub const DEFAULT_TEST_RESULTS_SIZE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MappingField {
    Name,
    Source,
    Query,
    TransformTemplate,
    LoadTemplate,
    CronExpression,
    FetchSize,
    TestResultsSize,
}

impl MappingField {
    pub fn all() -> &'static [MappingField] {
        &[
            MappingField::Name,
            MappingField::Source,
            MappingField::Query,
            MappingField::TransformTemplate,
            MappingField::LoadTemplate,
            MappingField::CronExpression,
            MappingField::FetchSize,
            MappingField::TestResultsSize,
        ]
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, MappingField::FetchSize | MappingField::TestResultsSize)
    }
}

impl EntityField for MappingField {
    fn key(&self) -> &'static str {
        match self {
            MappingField::Name => "name",
            MappingField::Source => "source",
            MappingField::Query => "query",
            MappingField::TransformTemplate => "transformTemplate",
            MappingField::LoadTemplate => "loadTemplate",
            MappingField::CronExpression => "cronExpression",
            MappingField::FetchSize => "fetchSize",
            MappingField::TestResultsSize => "testResultsSize",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MappingField::Name => "Name",
            MappingField::Source => "Source",
            MappingField::Query => "Query (Extract)",
            MappingField::TransformTemplate => "Transform",
            MappingField::LoadTemplate => "Load",
            MappingField::CronExpression => "CRON",
            MappingField::FetchSize => "Fetch Size",
            MappingField::TestResultsSize => "Test Results Size",
        }
    }
}

impl FromStr for MappingField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MappingField::all()
            .iter()
            .find(|field| field.key().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown mapping field: {s}"))
    }
}

/// Mapping record as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MappingRecord {
    pub id: Option<MappingId>,
    pub name: String,
    pub source: String,
    pub query: String,
    pub transform_template: String,
    pub load_template: String,
    pub cron_expression: String,
    pub fetch_size: u32,
    pub test_results_size: u32,
}

/// Request body for create and update. Carries no identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingRequest {
    pub source: String,
    pub load_template: String,
    pub transform_template: String,
    pub name: String,
    pub cron_expression: String,
    pub query: String,
    pub fetch_size: u32,
    pub test_results_size: u32,
}

impl From<MappingRequest> for MappingRecord {
    fn from(request: MappingRequest) -> Self {
        Self {
            id: None,
            name: request.name,
            source: request.source,
            query: request.query,
            transform_template: request.transform_template,
            load_template: request.load_template,
            cron_expression: request.cron_expression,
            fetch_size: request.fetch_size,
            test_results_size: request.test_results_size,
        }
    }
}

/// One ETL mapping as held by the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    pub local_id: LocalId,
    pub id: Option<MappingId>,
    pub name: String,
    pub source: String,
    pub query: String,
    pub transform_template: String,
    pub load_template: String,
    pub cron_expression: String,
    pub fetch_size: u32,
    pub test_results_size: u32,
    /// Numeric input that did not parse, kept verbatim until corrected.
    pub rejected_input: BTreeMap<MappingField, String>,
    pub errors: Option<ErrorMap<MappingField>>,
    pub test_results: Option<MappingTestResults>,
    pub is_testable: bool,
    /// Transient UI expansion flag.
    pub is_open: bool,
}

impl Mapping {
    /// An empty, unsaved mapping. Drafts start expanded.
    pub fn draft() -> Self {
        Self::from_record(MappingRecord::default(), true)
    }

    pub fn from_record(record: MappingRecord, is_open: bool) -> Self {
        Self {
            local_id: LocalId::new(),
            id: record.id,
            name: record.name,
            source: record.source,
            query: record.query,
            transform_template: record.transform_template,
            load_template: record.load_template,
            cron_expression: record.cron_expression,
            fetch_size: non_zero_or(record.fetch_size, DEFAULT_FETCH_SIZE),
            test_results_size: non_zero_or(record.test_results_size, DEFAULT_TEST_RESULTS_SIZE),
            rejected_input: BTreeMap::new(),
            errors: None,
            test_results: None,
            is_testable: record.id.is_some(),
            is_open,
        }
    }

    pub fn to_request(&self) -> MappingRequest {
        MappingRequest {
            source: self.source.clone(),
            load_template: self.load_template.clone(),
            transform_template: self.transform_template.clone(),
            name: self.name.clone(),
            cron_expression: self.cron_expression.clone(),
            query: self.query.clone(),
            fetch_size: self.fetch_size,
            test_results_size: self.test_results_size,
        }
    }

    /// Current text of a field. Rejected numeric input wins over the last
    /// accepted number.
    pub fn field_value(&self, field: MappingField) -> String {
        if let Some(raw) = self.rejected_input.get(&field) {
            return raw.clone();
        }
        match field {
            MappingField::Name => self.name.clone(),
            MappingField::Source => self.source.clone(),
            MappingField::Query => self.query.clone(),
            MappingField::TransformTemplate => self.transform_template.clone(),
            MappingField::LoadTemplate => self.load_template.clone(),
            MappingField::CronExpression => self.cron_expression.clone(),
            MappingField::FetchSize => self.fetch_size.to_string(),
            MappingField::TestResultsSize => self.test_results_size.to_string(),
        }
    }

    /// Assigns a raw field value. Numeric fields reject non-integer input:
    /// the number keeps its previous value and the text is held in
    /// `rejected_input`.
    pub fn set_field(&mut self, field: MappingField, value: &str) -> Result<(), String> {
        if field.is_numeric() {
            let parsed = match parse_count(value) {
                Ok(parsed) => parsed,
                Err(message) => {
                    self.rejected_input.insert(field, value.to_string());
                    return Err(message);
                }
            };
            self.rejected_input.remove(&field);
            if field == MappingField::FetchSize {
                self.fetch_size = parsed;
            } else {
                self.test_results_size = parsed;
            }
            return Ok(());
        }
        match field {
            MappingField::Name => self.name = value.to_string(),
            MappingField::Source => self.source = value.to_string(),
            MappingField::Query => self.query = value.to_string(),
            MappingField::TransformTemplate => self.transform_template = value.to_string(),
            MappingField::LoadTemplate => self.load_template = value.to_string(),
            MappingField::CronExpression => self.cron_expression = value.to_string(),
            MappingField::FetchSize | MappingField::TestResultsSize => {}
        }
        Ok(())
    }
}

fn non_zero_or(value: u32, default: u32) -> u32 {
    if value == 0 { default } else { value }
}

fn parse_count(value: &str) -> Result<u32, String> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| "Must be a whole number".to_string())
}
