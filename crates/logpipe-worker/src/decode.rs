//! Turn a raw stream entry's fields back into a relational row (spec
//! §4.8 step 2, §7 `DecodeError`).

use chrono::{DateTime, FixedOffset, Utc};
use logpipe_db::InsertRow;
use logpipe_stream::StreamEntryFields;

/// A field was missing or malformed; the entry is skipped but its ID is
/// still acknowledged by the caller (spec §7: never re-delivery-loop on
/// a permanently undecodable entry).
#[derive(Debug, thiserror::Error)]
#[error("malformed stream entry: {0}")]
pub struct DecodeError(pub String);

/// Decode one entry's fields into an [`InsertRow`], preserving the
/// entry's own `timestamp` field if present, else stamping `now` in
/// `fallback_offset`.
///
/// # Errors
///
/// Returns [`DecodeError`] if a required field is missing or `log_data`
/// isn't valid JSON.
pub fn decode_entry(fields: &StreamEntryFields, fallback_offset: FixedOffset) -> Result<InsertRow, DecodeError> {
    let device_id = fields.get("device_id").ok_or_else(|| DecodeError("missing device_id".to_string()))?.clone();
    let log_level = fields.get("log_level").ok_or_else(|| DecodeError("missing log_level".to_string()))?.clone();
    let message = fields.get("message").ok_or_else(|| DecodeError("missing message".to_string()))?.clone();

    let log_data = match fields.get("log_data") {
        Some(raw) => serde_json::from_str(raw).map_err(|e| DecodeError(format!("invalid log_data JSON: {e}")))?,
        None => serde_json::Value::Object(serde_json::Map::new()),
    };

    let created_at = match fields.get("timestamp") {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map_err(|e| DecodeError(format!("invalid timestamp: {e}")))?,
        None => Utc::now().with_timezone(&fallback_offset),
    };

    Ok(InsertRow { device_id, log_level, message, log_data, created_at })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    #[test]
    fn decodes_well_formed_entry() {
        let mut fields = StreamEntryFields::new();
        fields.insert("device_id".to_string(), "device_001".to_string());
        fields.insert("log_level".to_string(), "ERROR".to_string());
        fields.insert("message".to_string(), "boom".to_string());
        fields.insert("log_data".to_string(), "{\"error_code\":\"DB_CONN_001\"}".to_string());
        fields.insert("timestamp".to_string(), "2026-07-28T12:00:00+08:00".to_string());

        let row = decode_entry(&fields, offset()).unwrap();
        assert_eq!(row.device_id, "device_001");
        assert_eq!(row.log_data["error_code"], "DB_CONN_001");
    }

    #[test]
    fn missing_field_is_a_decode_error() {
        let mut fields = StreamEntryFields::new();
        fields.insert("device_id".to_string(), "device_001".to_string());
        assert!(decode_entry(&fields, offset()).is_err());
    }

    #[test]
    fn missing_timestamp_falls_back_to_now() {
        let mut fields = StreamEntryFields::new();
        fields.insert("device_id".to_string(), "device_001".to_string());
        fields.insert("log_level".to_string(), "INFO".to_string());
        fields.insert("message".to_string(), "hi".to_string());
        fields.insert("log_data".to_string(), "{}".to_string());

        assert!(decode_entry(&fields, offset()).is_ok());
    }

    #[test]
    fn malformed_log_data_is_a_decode_error() {
        let mut fields = StreamEntryFields::new();
        fields.insert("device_id".to_string(), "device_001".to_string());
        fields.insert("log_level".to_string(), "INFO".to_string());
        fields.insert("message".to_string(), "hi".to_string());
        fields.insert("log_data".to_string(), "not json".to_string());

        assert!(decode_entry(&fields, offset()).is_err());
    }
}
