//! Structured payload extraction
//!
//! The provider's `summary` is free text that is supposed to be a JSON object
//! shaped by the extraction schema. Extraction never fails the caller: the
//! outcome is an [`Extraction`] value and malformed payloads are reported as
//! data, not errors.

use crate::specialty::schema::fields;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("summary is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("summary is JSON but not an object (found {0})")]
    NotAnObject(&'static str),
}

/// Fields read from a parsed payload. `None` means the key was absent (or
/// `null`); callers decide the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedFields {
    pub nct_id: Option<String>,
    pub sponsor: Option<String>,
    pub phase: Option<String>,
    pub enrollment_target: Option<f64>,
    pub enrollment_achieved: Option<f64>,
    pub primary_endpoint: Option<String>,
    pub geography: Option<String>,
    pub investigator: Option<String>,
    pub site: Option<String>,
    pub recruitment_status: Option<String>,
    pub recruitment_signal: Option<String>,
    pub biomarkers: Option<String>,
    pub summary: Option<String>,
    pub insight: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The hit carried no summary at all
    Absent,
    Parsed(ExtractedFields),
    Malformed(PayloadError),
}

pub fn extract(summary: Option<&str>) -> Extraction {
    let Some(raw) = summary else {
        return Extraction::Absent;
    };

    match parse_object(raw) {
        Ok(object) => Extraction::Parsed(ExtractedFields::from_object(&object)),
        Err(e) => Extraction::Malformed(e),
    }
}

fn parse_object(raw: &str) -> Result<Map<String, Value>, PayloadError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| PayloadError::InvalidJson(e.to_string()))?;

    match value {
        Value::Object(object) => Ok(object),
        Value::Array(_) => Err(PayloadError::NotAnObject("array")),
        Value::String(_) => Err(PayloadError::NotAnObject("string")),
        Value::Number(_) => Err(PayloadError::NotAnObject("number")),
        Value::Bool(_) => Err(PayloadError::NotAnObject("boolean")),
        Value::Null => Err(PayloadError::NotAnObject("null")),
    }
}

impl ExtractedFields {
    fn from_object(object: &Map<String, Value>) -> Self {
        let text = |key: &str| object.get(key).and_then(coerce_text);
        let number = |key: &str| object.get(key).and_then(coerce_number);

        // `implication` only stands in when `insight` is missing or empty
        let insight = text(fields::INSIGHT)
            .filter(|s| !s.is_empty())
            .or_else(|| text(fields::IMPLICATION));

        Self {
            nct_id: text(fields::NCT_ID),
            sponsor: text(fields::SPONSOR),
            phase: text(fields::PHASE),
            enrollment_target: number(fields::ENROLLMENT_TARGET),
            enrollment_achieved: number(fields::ENROLLMENT_ACHIEVED),
            primary_endpoint: text(fields::PRIMARY_ENDPOINT),
            geography: text(fields::GEOGRAPHY),
            investigator: text(fields::INVESTIGATOR),
            site: text(fields::SITE),
            recruitment_status: text(fields::RECRUITMENT_STATUS),
            recruitment_signal: text(fields::RECRUITMENT_SIGNAL),
            biomarkers: text(fields::BIOMARKERS),
            summary: text(fields::SUMMARY),
            insight,
        }
    }
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        // "1,200" and " 85 " show up in model-written payloads
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
