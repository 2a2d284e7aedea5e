//! Test record data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored test record.
///
/// The id is assigned by the store and immutable; records are never
/// updated in place.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestRecord {
    pub id: i64,
    pub test_name: String,
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub speed: f64,
    pub altitude: f64,
    pub passed: bool,
}

/// Request body for creating a test record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTestRecord {
    pub test_name: String,
    /// Defaults to record-creation time when omitted.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub temperature: f64,
    pub speed: f64,
    pub altitude: f64,
    #[serde(default)]
    pub passed: bool,
}

/// Request body for a standalone single-test report.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRequest {
    pub test_name: String,
    pub temperature: f64,
    pub speed: f64,
    pub altitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_defaults() {
        let body: CreateTestRecord = serde_json::from_str(
            r#"{"test_name": "T1", "temperature": 20.5, "speed": 100, "altitude": 500}"#,
        )
        .unwrap();

        assert_eq!(body.test_name, "T1");
        assert!(body.timestamp.is_none());
        assert!(!body.passed);
    }

    #[test]
    fn test_create_request_missing_field_rejected() {
        let result: Result<CreateTestRecord, _> =
            serde_json::from_str(r#"{"test_name": "T1", "temperature": 20.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_serializes_iso8601_timestamp() {
        let record = TestRecord {
            id: 1,
            test_name: "T1".to_string(),
            timestamp: "2026-03-01T12:00:00Z".parse().unwrap(),
            temperature: 20.5,
            speed: 100.0,
            altitude: 500.0,
            passed: true,
        };

        let json = serde_json::to_value(&record).unwrap();
        let ts = json["timestamp"].as_str().unwrap();
        assert!(ts.starts_with("2026-03-01T12:00:00"));
    }
}
