//! Serverless-style function adapter.
//!
//! Accepts an event whose `body` is either a JSON-encoded string or an
//! already-parsed object, extracts the six feature fields by name, and
//! returns a status-coded response envelope.
//!
//! Unlike the HTTP adapter, there is no schema-level validation before the
//! pipeline runs: every failure in parse, build, or predict is reported as
//! a 500 with an `error` body. That asymmetry reproduces the wire contract
//! this adapter replaces; internally failures are typed so logs can tell
//! the classes apart.

use crate::metrics;
use crate::pipeline::FittedPipeline;
use crate::schema::FeatureRow;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use thiserror::Error;

/// Incoming event envelope. Anything beyond `body` is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct FunctionEvent {
    #[serde(default)]
    pub body: Option<Value>,
}

/// Outgoing response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded response payload
    pub body: String,
}

#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("event has no body")]
    MissingBody,
    #[error("body is not valid JSON: {0}")]
    MalformedBody(String),
    #[error("body must be a JSON object")]
    NotAnObject,
    #[error("missing required field(s): {}", .0.join(", "))]
    MissingFields(Vec<String>),
    #[error("field '{field}' must be {expected}")]
    MistypedField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("model produced a non-finite estimate")]
    NonFinitePrediction,
}

impl FunctionError {
    fn kind(&self) -> &'static str {
        match self {
            Self::MissingBody => "missing_body",
            Self::MalformedBody(_) => "malformed_body",
            Self::NotAnObject => "not_an_object",
            Self::MissingFields(_) => "missing_fields",
            Self::MistypedField { .. } => "mistyped_field",
            Self::NonFinitePrediction => "non_finite_prediction",
        }
    }
}

/// Handle one event. Never fails and never panics: every failure inside
/// parse/build/predict becomes a status-500 response.
pub fn handle(event: &FunctionEvent, pipeline: &FittedPipeline) -> FunctionResponse {
    match run(event, pipeline) {
        Ok(charge) => {
            metrics::record_prediction("function");
            respond(200, full_cors_headers(), json!({ "predicted_charge": charge }))
        }
        Err(err) => {
            metrics::record_error("function", err.kind());
            tracing::warn!(kind = err.kind(), error = %err, "Function invocation failed");
            respond(500, error_headers(), json!({ "error": err.to_string() }))
        }
    }
}

fn run(event: &FunctionEvent, pipeline: &FittedPipeline) -> Result<f64, FunctionError> {
    let body = parse_body(event)?;
    let row = extract_features(&body)?;
    let charge = pipeline.predict_row(&row);
    if !charge.is_finite() {
        return Err(FunctionError::NonFinitePrediction);
    }
    Ok(round_to_cents(charge))
}

/// Accept a JSON-encoded string or an already-parsed object.
fn parse_body(event: &FunctionEvent) -> Result<Value, FunctionError> {
    match &event.body {
        None => Err(FunctionError::MissingBody),
        Some(Value::String(raw)) => {
            let parsed: Value = serde_json::from_str(raw)
                .map_err(|e| FunctionError::MalformedBody(e.to_string()))?;
            if parsed.is_object() {
                Ok(parsed)
            } else {
                Err(FunctionError::NotAnObject)
            }
        }
        Some(value) if value.is_object() => Ok(value.clone()),
        Some(_) => Err(FunctionError::NotAnObject),
    }
}

/// Explicit partial parse of the six feature fields, reporting exactly
/// which names are absent or carry the wrong type.
fn extract_features(body: &Value) -> Result<FeatureRow, FunctionError> {
    const REQUIRED: [&str; 6] = ["age", "sex", "bmi", "children", "smoker", "region"];

    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|&&field| body.get(field).is_none())
        .map(|&field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(FunctionError::MissingFields(missing));
    }

    Ok(FeatureRow {
        age: integer_field(body, "age")?,
        sex: string_field(body, "sex")?,
        bmi: number_field(body, "bmi")?,
        children: integer_field(body, "children")?,
        smoker: string_field(body, "smoker")?,
        region: string_field(body, "region")?,
    })
}

fn integer_field(body: &Value, field: &'static str) -> Result<u32, FunctionError> {
    body[field]
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(FunctionError::MistypedField {
            field,
            expected: "a non-negative integer",
        })
}

fn number_field(body: &Value, field: &'static str) -> Result<f64, FunctionError> {
    body[field].as_f64().ok_or(FunctionError::MistypedField {
        field,
        expected: "a number",
    })
}

fn string_field(body: &Value, field: &'static str) -> Result<String, FunctionError> {
    body[field]
        .as_str()
        .map(str::to_string)
        .ok_or(FunctionError::MistypedField {
            field,
            expected: "a string",
        })
}

fn round_to_cents(charge: f64) -> f64 {
    (charge * 100.0).round() / 100.0
}

fn respond(status_code: u16, headers: BTreeMap<String, String>, payload: Value) -> FunctionResponse {
    FunctionResponse {
        status_code,
        headers,
        body: payload.to_string(),
    }
}

fn full_cors_headers() -> BTreeMap<String, String> {
    let mut headers = error_headers();
    headers.insert(
        "Access-Control-Allow-Methods".to_string(),
        "POST, OPTIONS".to_string(),
    );
    headers.insert(
        "Access-Control-Allow-Headers".to_string(),
        "Content-Type".to_string(),
    );
    headers
}

fn error_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
    headers
}
