//! Integration tests for the public form endpoints.
//!
//! Only validation failures are exercised here; a passing submission would
//! deliver real email through the configured SMTP relay.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use azur_integration_tests::{client, require_server};

#[tokio::test]
async fn contact_with_missing_message_is_rejected() {
    let base_url = require_server!();

    let response = client()
        .post(format!("{base_url}/contact"))
        .json(&json!({"name": "Marie", "email": "marie@example.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["field"], "message");
}

#[tokio::test]
async fn contact_with_invalid_email_is_rejected() {
    let base_url = require_server!();

    let response = client()
        .post(format!("{base_url}/contact"))
        .json(&json!({"name": "Marie", "email": "not-an-email", "message": "Bonjour"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["field"], "email");
}

#[tokio::test]
async fn quote_requires_service_and_details() {
    let base_url = require_server!();

    let response = client()
        .post(format!("{base_url}/quote"))
        .json(&json!({"name": "Marc", "email": "marc@example.com"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["field"], "service");
}

#[tokio::test]
async fn intervention_requires_phone_and_address() {
    let base_url = require_server!();

    let response = client()
        .post(format!("{base_url}/intervention"))
        .json(&json!({
            "name": "Julie",
            "email": "julie@example.com",
            "description": "Fuite sous l'évier"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["field"], "phone");
}
