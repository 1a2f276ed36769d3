/// Integration tests for the serverless-style function adapter.
mod common;

use common::trained_pipeline;
use insurance_predictor::function::{handle, FunctionEvent, FunctionResponse};
use serde_json::{json, Value};

fn event_with_body(body: Value) -> FunctionEvent {
    serde_json::from_value(json!({ "body": body })).unwrap()
}

fn body_json(response: &FunctionResponse) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

#[test]
fn test_json_string_body_yields_rounded_prediction() {
    let pipeline = trained_pipeline();
    let event = event_with_body(json!(
        r#"{"age":30,"sex":"male","bmi":25.0,"children":2,"smoker":"no","region":"northeast"}"#
    ));

    let response = handle(&event, &pipeline);
    assert_eq!(response.status_code, 200);

    let body = body_json(&response);
    let charge = body["predicted_charge"].as_f64().unwrap();
    assert!(charge > 0.0);
    // Rounded to two decimal places
    assert!(
        ((charge * 100.0).round() - charge * 100.0).abs() < 1e-9,
        "charge {} is not rounded to cents",
        charge
    );
}

#[test]
fn test_pre_parsed_object_body_is_accepted() {
    let pipeline = trained_pipeline();
    let event = event_with_body(json!({
        "age": 30,
        "sex": "male",
        "bmi": 25.0,
        "children": 2,
        "smoker": "no",
        "region": "northeast"
    }));

    let response = handle(&event, &pipeline);
    assert_eq!(response.status_code, 200);
    assert!(body_json(&response)["predicted_charge"].is_number());
}

#[test]
fn test_success_response_carries_cors_headers() {
    let pipeline = trained_pipeline();
    let event = event_with_body(json!({
        "age": 30,
        "sex": "male",
        "bmi": 25.0,
        "children": 2,
        "smoker": "no",
        "region": "northeast"
    }));

    let response = handle(&event, &pipeline);
    assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
    assert_eq!(response.headers["Content-Type"], "application/json");
}

#[test]
fn test_malformed_body_yields_500_with_error_key() {
    let pipeline = trained_pipeline();
    let event = event_with_body(json!("{this is not json"));

    let response = handle(&event, &pipeline);
    assert_eq!(response.status_code, 500);

    let body = body_json(&response);
    assert!(body.get("error").is_some(), "body: {}", response.body);
}

#[test]
fn test_missing_fields_yield_500_naming_the_fields() {
    let pipeline = trained_pipeline();
    let event = event_with_body(json!({ "age": 30, "sex": "male" }));

    let response = handle(&event, &pipeline);
    assert_eq!(response.status_code, 500);

    let body = body_json(&response);
    let message = body["error"].as_str().unwrap();
    for field in ["bmi", "children", "smoker", "region"] {
        assert!(message.contains(field), "'{}' not in '{}'", field, message);
    }
}

#[test]
fn test_event_without_body_yields_500() {
    let pipeline = trained_pipeline();
    let event: FunctionEvent = serde_json::from_value(json!({})).unwrap();

    let response = handle(&event, &pipeline);
    assert_eq!(response.status_code, 500);
    assert!(body_json(&response).get("error").is_some());
}

#[test]
fn test_unknown_region_is_not_an_error() {
    let pipeline = trained_pipeline();
    let event = event_with_body(json!({
        "age": 30,
        "sex": "male",
        "bmi": 25.0,
        "children": 2,
        "smoker": "no",
        "region": "atlantis"
    }));

    let response = handle(&event, &pipeline);
    assert_eq!(response.status_code, 200);
}

#[test]
fn test_response_envelope_uses_status_code_key() {
    let pipeline = trained_pipeline();
    let event: FunctionEvent = serde_json::from_value(json!({})).unwrap();
    let response = handle(&event, &pipeline);

    let serialized = serde_json::to_value(&response).unwrap();
    assert!(serialized.get("statusCode").is_some());
    assert!(serialized.get("headers").is_some());
    assert!(serialized["body"].is_string());
}
