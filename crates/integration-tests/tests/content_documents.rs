//! Integration tests for content document reads and writes.
//!
//! Requires a running API (`AZUR_API_URL`); write tests additionally need a
//! provisioned test administrator. Tests skip otherwise.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use azur_core::documents::DocumentKind;
use azur_integration_tests::{authenticated_client, client, require_server};

#[tokio::test]
async fn every_document_kind_is_publicly_readable() {
    let base_url = require_server!();

    for kind in DocumentKind::ALL {
        let response = client()
            .get(format!("{base_url}/content/{kind}"))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "kind {kind}");
        let body: Value = response.json().await.unwrap();
        assert!(body.is_object(), "kind {kind} returned a non-object");
    }
}

#[tokio::test]
async fn unknown_document_kind_is_not_found() {
    let base_url = require_server!();

    let response = client()
        .get(format!("{base_url}/content/blog"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn writes_require_authentication() {
    let base_url = require_server!();

    let response = client()
        .put(format!("{base_url}/content/brands"))
        .json(&json!({"name": "Acme", "logo": "/x.png"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = client()
        .delete(format!("{base_url}/content/brands?id=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn brand_entry_lifecycle() {
    let (base_url, (email, password)) = require_server!(credentials);
    let client = authenticated_client(&base_url, &email, &password).await;

    // Snapshot current ids.
    let before: Value = client
        .get(format!("{base_url}/content/brands"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let existing_ids: Vec<i64> = before["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();

    // Add a new brand; the response carries the post-merge document.
    let response = client
        .put(format!("{base_url}/content/brands"))
        .json(&json!({"name": "Acme", "logo": "/x.png"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let after: Value = response.json().await.unwrap();
    let new_entry = after["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|item| !existing_ids.contains(&item["id"].as_i64().unwrap()))
        .expect("new entry present")
        .clone();
    let new_id = new_entry["id"].as_i64().unwrap();
    assert_eq!(new_entry["name"], "Acme");

    // The write is visible to an immediate public read.
    let read_back: Value = client
        .get(format!("{base_url}/content/brands"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(read_back, after);

    // Update by id.
    let response = client
        .put(format!("{base_url}/content/brands"))
        .json(&json!({"id": new_id, "website": "https://acme.example"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Remove it; a second removal is a 404 and ids are untouched.
    let response = client
        .delete(format!("{base_url}/content/brands?id={new_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["ok"], true);

    let response = client
        .delete(format!("{base_url}/content/brands?id={new_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let final_doc: Value = client
        .get(format!("{base_url}/content/brands"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let final_ids: Vec<i64> = final_doc["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect();
    assert_eq!(final_ids, existing_ids);
}

#[tokio::test]
async fn scalar_update_merges_and_unknown_fields_are_rejected() {
    let (base_url, (email, password)) = require_server!(credentials);
    let client = authenticated_client(&base_url, &email, &password).await;

    let before: Value = client
        .get(format!("{base_url}/content/site-config"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // Merge a single field; everything else must survive.
    let tagline = format!("Dépannage & entretien ({})", before["tagline"]);
    let response = client
        .put(format!("{base_url}/content/site-config"))
        .json(&json!({"tagline": tagline}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let after: Value = response.json().await.unwrap();
    assert_eq!(after["tagline"], tagline.as_str());
    assert_eq!(after["company_name"], before["company_name"]);
    assert_eq!(after["social"], before["social"]);

    // An empty update is a no-op.
    let unchanged: Value = client
        .put(format!("{base_url}/content/site-config"))
        .json(&json!({}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unchanged, after);

    // Unknown fields are rejected, naming the field.
    let response = client
        .put(format!("{base_url}/content/site-config"))
        .json(&json!({"telephone": "x"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["field"], "telephone");
}

#[tokio::test]
async fn delete_without_id_is_a_bad_request() {
    let (base_url, (email, password)) = require_server!(credentials);
    let client = authenticated_client(&base_url, &email, &password).await;

    let response = client
        .delete(format!("{base_url}/content/brands"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_on_scalar_document_is_a_bad_request() {
    let (base_url, (email, password)) = require_server!(credentials);
    let client = authenticated_client(&base_url, &email, &password).await;

    let response = client
        .delete(format!("{base_url}/content/homepage?id=1"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
