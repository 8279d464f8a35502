use serde_json::json;

use etl_console_domain::{DatabaseRecord, MappingId, MappingRecord, MappingTestResults};

pub fn mapping(id: i64, name: &str, source: &str) -> MappingRecord {
    MappingRecord {
        id: Some(MappingId::new(id)),
        name: name.to_string(),
        source: source.to_string(),
        query: "SELECT * FROM patient".to_string(),
        cron_expression: "0 0 * * * ?".to_string(),
        fetch_size: 1000,
        test_results_size: 10,
        ..Default::default()
    }
}

pub fn database(name: &str) -> DatabaseRecord {
    DatabaseRecord {
        name: name.to_string(),
        db_type: "MySQL".to_string(),
        url: format!("jdbc:mysql://localhost:3306/{name}"),
        user: "etl".to_string(),
        query: "SELECT 0;".to_string(),
        db_password: None,
    }
}

pub fn tabular_results() -> MappingTestResults {
    MappingTestResults {
        extracted: json!([{ "a": 1 }]),
        transformed: json!([{ "a": 2 }]),
    }
}

pub fn malformed_results() -> MappingTestResults {
    MappingTestResults {
        extracted: json!("not-an-array"),
        transformed: json!([{ "a": 2 }]),
    }
}
