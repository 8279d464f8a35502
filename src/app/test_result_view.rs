//! Tabular view of mapping and database test outcomes.

use serde_json::{Map, Value};

use etl_console_domain::{Database, Mapping, MappingTestResults};

use crate::messages::{
    MAPPING_TEST_DISABLED_HINT, MAPPING_TEST_ENABLED_HINT, MAPPING_TEST_PARSE_FAILURE,
    MAPPING_TEST_RESULTS_EXTRACTED_LABEL, MAPPING_TEST_RESULTS_TRANSFORMED_LABEL,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestEligibility {
    Enabled { hint: &'static str },
    Disabled { hint: &'static str },
}

impl TestEligibility {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled { .. })
    }

    pub fn hint(&self) -> &'static str {
        match self {
            Self::Enabled { hint } | Self::Disabled { hint } => hint,
        }
    }
}

pub fn mapping_test_eligibility(mapping: &Mapping) -> TestEligibility {
    if mapping.is_testable {
        TestEligibility::Enabled {
            hint: MAPPING_TEST_ENABLED_HINT,
        }
    } else {
        TestEligibility::Disabled {
            hint: MAPPING_TEST_DISABLED_HINT,
        }
    }
}

pub fn database_test_eligibility(database: &Database) -> TestEligibility {
    if database.is_testable {
        TestEligibility::Enabled { hint: "" }
    } else {
        TestEligibility::Disabled {
            hint: MAPPING_TEST_DISABLED_HINT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultPanel {
    Table {
        label: &'static str,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Empty {
        label: &'static str,
    },
    ParseFailure {
        label: &'static str,
        message: String,
    },
}

impl ResultPanel {
    /// Columns come from the first row's keys. Every row must be an object
    /// with exactly that key set; anything else renders as a parse failure.
    pub fn build(label: &'static str, data: &Value) -> Self {
        match tabulate(data) {
            Some((columns, _)) if columns.is_empty() => Self::Empty { label },
            Some((columns, rows)) => Self::Table {
                label,
                columns,
                rows,
            },
            None => Self::ParseFailure {
                label,
                message: format!("{label}: {MAPPING_TEST_PARSE_FAILURE}"),
            },
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Table { label, .. }
            | Self::Empty { label }
            | Self::ParseFailure { label, .. } => label,
        }
    }
}

fn tabulate(data: &Value) -> Option<(Vec<String>, Vec<Vec<String>>)> {
    let rows = data.as_array()?;
    let Some(first) = rows.first() else {
        return Some((Vec::new(), Vec::new()));
    };
    let columns: Vec<String> = first.as_object()?.keys().cloned().collect();

    let mut table = Vec::with_capacity(rows.len());
    for row in rows {
        let row = row.as_object()?;
        if !same_shape(&columns, row) {
            return None;
        }
        table.push(
            columns
                .iter()
                .map(|c| row.get(c).map(cell_text).unwrap_or_default())
                .collect(),
        );
    }
    Some((columns, table))
}

fn same_shape(columns: &[String], row: &Map<String, Value>) -> bool {
    row.len() == columns.len() && columns.iter().all(|c| row.contains_key(c))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestResultView {
    pub extracted: ResultPanel,
    pub transformed: ResultPanel,
}

impl TestResultView {
    pub fn from_results(results: &MappingTestResults) -> Self {
        Self {
            extracted: ResultPanel::build(MAPPING_TEST_RESULTS_EXTRACTED_LABEL, &results.extracted),
            transformed: ResultPanel::build(
                MAPPING_TEST_RESULTS_TRANSFORMED_LABEL,
                &results.transformed,
            ),
        }
    }

    /// Present only while the mapping is testable and results are attached.
    pub fn for_mapping(mapping: &Mapping) -> Option<Self> {
        if !mapping.is_testable {
            return None;
        }
        mapping.test_results.as_ref().map(Self::from_results)
    }
}
