//! Reading model/serial pairs out of the JSON body the label-scanning service
//! returns. The service call itself happens elsewhere; this only interprets
//! a body that has already been fetched or saved.

use serde_json::{Map, Value};

use crate::domain::model::Reading;
use crate::domain::ports::ReadingSource;
use crate::utils::error::{LookupError, Result};

const MODEL_KEYS: [&str; 2] = ["modelNumber", "model"];
const SERIAL_KEYS: [&str; 2] = ["serialNumber", "serial"];

/// First key holding a non-empty string wins.
fn first_text(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        obj.get(*key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    })
}

pub fn reading_from_value(value: &Value) -> Result<Reading> {
    let obj = value
        .as_object()
        .ok_or_else(|| LookupError::InvalidReadingError {
            message: "scan response is not a JSON object".to_string(),
        })?;

    Ok(Reading {
        model: first_text(obj, &MODEL_KEYS),
        serial: first_text(obj, &SERIAL_KEYS),
    })
}

pub fn parse_scan_response(body: &str) -> Result<Reading> {
    let value: Value = serde_json::from_str(body)?;
    reading_from_value(&value)
}

/// Like [`parse_scan_response`], but an unreadable body becomes an empty
/// reading so the lookup reports an undeterminable result.
pub fn reading_from_scan_response(body: &str) -> Reading {
    match parse_scan_response(body) {
        Ok(reading) => reading,
        Err(e) => {
            tracing::warn!("Could not read the model or serial from the scan response: {}", e);
            Reading::default()
        }
    }
}

/// Accepts either a single scan response object or an array of them.
pub fn parse_scan_batch(body: &str) -> Result<Vec<Reading>> {
    let value: Value = serde_json::from_str(body)?;
    match &value {
        Value::Array(items) => items.iter().map(reading_from_value).collect(),
        _ => Ok(vec![reading_from_value(&value)?]),
    }
}

/// A saved scan response body.
#[derive(Debug, Clone)]
pub struct ScanResponseSource {
    body: String,
}

impl ScanResponseSource {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl ReadingSource for ScanResponseSource {
    fn readings(&self) -> Result<Vec<Reading>> {
        Ok(vec![reading_from_scan_response(&self.body)])
    }
}

/// Model and serial typed in by the user.
#[derive(Debug, Clone)]
pub struct ManualEntry {
    reading: Reading,
}

impl ManualEntry {
    pub fn new(model: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            reading: Reading::new(model, serial),
        }
    }
}

impl ReadingSource for ManualEntry {
    fn readings(&self) -> Result<Vec<Reading>> {
        Ok(vec![self.reading.clone()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_keys() {
        let reading =
            parse_scan_response(r#"{"modelNumber": "WRF555SDFZ", "serialNumber": "XX1845"}"#)
                .unwrap();
        assert_eq!(reading, Reading::new("WRF555SDFZ", "XX1845"));
    }

    #[test]
    fn test_fallback_keys() {
        let reading = parse_scan_response(
            r#"{"modelNumber": "", "model": "LRFVS3006S", "serial": "312", "confidence": 0.9}"#,
        )
        .unwrap();
        assert_eq!(reading.model(), "LRFVS3006S");
        assert_eq!(reading.serial(), "312");
    }

    #[test]
    fn test_missing_and_non_string_values_are_absent() {
        let reading = parse_scan_response(r#"{"modelNumber": 1234, "serial": null}"#).unwrap();
        assert_eq!(reading, Reading::default());
    }

    #[test]
    fn test_malformed_body() {
        assert!(parse_scan_response("<html>502 Bad Gateway</html>").is_err());
        assert!(parse_scan_response("[1, 2]").is_err());
        assert_eq!(reading_from_scan_response("not json"), Reading::default());
    }

    #[test]
    fn test_scan_batch_accepts_object_or_array() {
        let single = parse_scan_batch(r#"{"model": "KM7575", "serial": "1"}"#).unwrap();
        assert_eq!(single.len(), 1);

        let many = parse_scan_batch(
            r#"[{"model": "KM7575", "serial": "1"}, {"modelNumber": "JB645", "serialNumber": "AZ"}]"#,
        )
        .unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[1].serial(), "AZ");
    }

    #[test]
    fn test_reading_sources() {
        let manual = ManualEntry::new("JB645RKSS", "AZ1").readings().unwrap();
        assert_eq!(manual, vec![Reading::new("JB645RKSS", "AZ1")]);

        let scanned = ScanResponseSource::new("{}").readings().unwrap();
        assert_eq!(scanned, vec![Reading::default()]);
    }
}
