//! Content document route handlers.
//!
//! Reads are public (the page renderer calls them directly); writes require
//! an authenticated administrator.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    response::IntoResponse,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};

use azur_core::EntryId;
use azur_core::documents::DocumentKind;

use crate::error::ApiError;
use crate::middleware::RequireAdmin;
use crate::services::ContentService;
use crate::state::AppState;

/// Build the content router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/content/{kind}",
        get(get_document).put(update_document).delete(delete_entry),
    )
}

fn parse_kind(raw: &str) -> Result<DocumentKind, ApiError> {
    DocumentKind::parse(raw)
        .ok_or_else(|| ApiError::NotFound(format!("unknown document type `{raw}`")))
}

/// Read a document (public).
///
/// GET /content/{kind}
async fn get_document(
    State(state): State<AppState>,
    Path(raw_kind): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&raw_kind)?;

    let content = ContentService::new(state.pool());
    let document = content.get(kind).await?;

    Ok(Json(document))
}

/// Apply a partial update and return the post-merge document.
///
/// PUT /content/{kind}
async fn update_document(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_kind): Path<String>,
    Json(payload): Json<JsonValue>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&raw_kind)?;

    let content = ContentService::new(state.pool());
    let document = content.update(kind, payload).await?;

    tracing::info!(admin_id = %admin.id, kind = %kind, "Content document updated");

    Ok(Json(document))
}

/// Query parameters for entry deletion.
#[derive(Debug, Deserialize)]
struct DeleteParams {
    id: Option<i64>,
}

/// Remove a list entry by id.
///
/// DELETE /content/{kind}?id=
async fn delete_entry(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(raw_kind): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<impl IntoResponse, ApiError> {
    let kind = parse_kind(&raw_kind)?;
    let id = params
        .id
        .map(EntryId::new)
        .ok_or_else(|| ApiError::BadRequest("missing `id` query parameter".to_owned()))?;

    let content = ContentService::new(state.pool());
    if !content.remove_entry(kind, id).await? {
        return Err(ApiError::NotFound(format!("entry {id} not found")));
    }

    tracing::info!(admin_id = %admin.id, kind = %kind, entry_id = %id, "Content entry removed");

    Ok(Json(json!({"ok": true})))
}
