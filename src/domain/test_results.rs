use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Dry-run output of a mapping: extract and transform stages.
///
/// Both halves are kept as raw JSON; their shape is checked only when they
/// are turned into tables.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingTestResults {
    pub extracted: Value,
    pub transformed: Value,
}

/// Result of a source database connectivity test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionTestOutcome {
    Success,
    Failure,
}

impl From<bool> for ConnectionTestOutcome {
    fn from(connected: bool) -> Self {
        if connected {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

impl fmt::Display for ConnectionTestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::Failure => write!(f, "FAILURE"),
        }
    }
}
