//! Request validation (C5, spec §4.5).
//!
//! Enforces bounds only — it never rejects on the *content* of
//! `log_level`, since unknown levels must be accepted at the API
//! boundary and tolerated downstream (spec §3 invariants).

use logpipe_error::ValidationError;

use crate::record::{BatchLogRequest, LogRecord};

const DEVICE_ID_MIN: usize = 1;
const DEVICE_ID_MAX: usize = 50;
const MESSAGE_MIN: usize = 1;
const MESSAGE_MAX: usize = 5000;
const BATCH_MIN: usize = 1;
const BATCH_MAX: usize = 1000;

/// Stateless validator for incoming requests.
#[derive(Debug, Default, Clone, Copy)]
pub struct Validator;

impl Validator {
    /// Validate a single `LogRecord` against the §4.5 bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Field`] naming the first offending
    /// field.
    pub fn validate_record(record: &LogRecord) -> Result<(), ValidationError> {
        let len = record.device_id.len();
        if !(DEVICE_ID_MIN..=DEVICE_ID_MAX).contains(&len) {
            return Err(ValidationError::Field {
                field: "device_id".to_string(),
                message: format!("must be {DEVICE_ID_MIN}..{DEVICE_ID_MAX} bytes, got {len}"),
            });
        }

        let len = record.message.len();
        if !(MESSAGE_MIN..=MESSAGE_MAX).contains(&len) {
            return Err(ValidationError::Field {
                field: "message".to_string(),
                message: format!("must be {MESSAGE_MIN}..{MESSAGE_MAX} bytes, got {len}"),
            });
        }

        if !record.log_data.is_object() {
            return Err(ValidationError::Field {
                field: "log_data".to_string(),
                message: "must be a JSON object".to_string(),
            });
        }

        Ok(())
    }

    /// Validate a batch request: size bounds, then every record inside.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BatchSize`] if the batch itself is out
    /// of bounds, or the first [`ValidationError::Field`] found inside.
    pub fn validate_batch(batch: &BatchLogRequest) -> Result<(), ValidationError> {
        let len = batch.logs.len();
        if !(BATCH_MIN..=BATCH_MAX).contains(&len) {
            return Err(ValidationError::BatchSize { min: BATCH_MIN, max: BATCH_MAX, actual: len });
        }

        for record in &batch.logs {
            Self::validate_record(record)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_record() -> LogRecord {
        LogRecord {
            device_id: "device_001".to_string(),
            log_level: "ERROR".to_string(),
            message: "Database connection failed".to_string(),
            log_data: json!({"error_code": "DB_CONN_001"}),
            timestamp: None,
        }
    }

    #[test]
    fn accepts_well_formed_record() {
        assert!(Validator::validate_record(&valid_record()).is_ok());
    }

    #[test]
    fn rejects_empty_device_id() {
        let mut record = valid_record();
        record.device_id = String::new();
        let err = Validator::validate_record(&record).unwrap_err();
        assert!(matches!(err, ValidationError::Field { field, .. } if field == "device_id"));
    }

    #[test]
    fn rejects_oversized_message() {
        let mut record = valid_record();
        record.message = "a".repeat(5001);
        let err = Validator::validate_record(&record).unwrap_err();
        assert!(matches!(err, ValidationError::Field { field, .. } if field == "message"));
    }

    #[test]
    fn accepts_unrecognised_log_level() {
        let mut record = valid_record();
        record.log_level = "TRACE".to_string();
        assert!(Validator::validate_record(&record).is_ok());
    }

    #[test]
    fn rejects_non_object_log_data() {
        let mut record = valid_record();
        record.log_data = json!([1, 2, 3]);
        let err = Validator::validate_record(&record).unwrap_err();
        assert!(matches!(err, ValidationError::Field { field, .. } if field == "log_data"));
    }

    #[test]
    fn rejects_empty_batch() {
        let batch = BatchLogRequest { logs: vec![] };
        let err = Validator::validate_batch(&batch).unwrap_err();
        assert!(matches!(err, ValidationError::BatchSize { actual: 0, .. }));
    }

    #[test]
    fn rejects_oversized_batch() {
        let batch = BatchLogRequest { logs: vec![valid_record(); 1001] };
        let err = Validator::validate_batch(&batch).unwrap_err();
        assert!(matches!(err, ValidationError::BatchSize { actual: 1001, .. }));
    }

    #[test]
    fn batch_validation_surfaces_first_bad_record() {
        let mut batch = BatchLogRequest { logs: vec![valid_record(), valid_record()] };
        batch.logs[1].message = String::new();
        let err = Validator::validate_batch(&batch).unwrap_err();
        assert!(matches!(err, ValidationError::Field { field, .. } if field == "message"));
    }
}
