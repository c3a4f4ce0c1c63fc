//! Public form submission handlers.
//!
//! Contact, quote and intervention requests are validated, forwarded to the
//! team inbox as plain-text email, and acknowledged. Nothing is persisted.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;
use serde_json::json;

use azur_core::Email;
use azur_core::documents::ValidationError;

use crate::error::ApiError;
use crate::state::AppState;

/// Build the forms router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/contact", post(contact))
        .route("/quote", post(quote))
        .route("/intervention", post(intervention))
}

/// Contact form data.
#[derive(Debug, Deserialize)]
struct ContactForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    message: String,
}

/// Quote request form data.
#[derive(Debug, Deserialize)]
struct QuoteForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    service: String,
    #[serde(default)]
    details: String,
}

/// Intervention request form data.
#[derive(Debug, Deserialize)]
struct InterventionForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    description: String,
}

fn require<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(ValidationError::MissingField(
            field.to_owned(),
        )));
    }
    Ok(trimmed)
}

fn require_email(value: &str) -> Result<Email, ApiError> {
    Email::parse(value).map_err(|_| {
        ApiError::Validation(ValidationError::InvalidType {
            field: "email".to_owned(),
            expected: "a valid email address",
        })
    })
}

/// Submit a contact message.
///
/// POST /contact
async fn contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require(&form.name, "name")?;
    let email = require_email(&form.email)?;
    let message = require(&form.message, "message")?;

    let body = format!(
        "Nouveau message via le formulaire de contact\n\n\
         Nom: {name}\n\
         Email: {email}\n\
         Téléphone: {}\n\n\
         {message}\n",
        form.phone.as_deref().unwrap_or("-").trim(),
    );

    state
        .mailer()
        .send_form_submission("Contact du site", body, email.as_str())
        .await?;

    Ok(Json(json!({"ok": true})))
}

/// Submit a quote request.
///
/// POST /quote
async fn quote(
    State(state): State<AppState>,
    Json(form): Json<QuoteForm>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require(&form.name, "name")?;
    let email = require_email(&form.email)?;
    let service = require(&form.service, "service")?;
    let details = require(&form.details, "details")?;

    let body = format!(
        "Nouvelle demande de devis\n\n\
         Nom: {name}\n\
         Email: {email}\n\
         Téléphone: {}\n\
         Prestation: {service}\n\n\
         {details}\n",
        form.phone.as_deref().unwrap_or("-").trim(),
    );

    state
        .mailer()
        .send_form_submission(&format!("Demande de devis - {service}"), body, email.as_str())
        .await?;

    Ok(Json(json!({"ok": true})))
}

/// Submit an intervention request.
///
/// POST /intervention
async fn intervention(
    State(state): State<AppState>,
    Json(form): Json<InterventionForm>,
) -> Result<impl IntoResponse, ApiError> {
    let name = require(&form.name, "name")?;
    let email = require_email(&form.email)?;
    let phone = require(&form.phone, "phone")?;
    let address = require(&form.address, "address")?;
    let description = require(&form.description, "description")?;

    let body = format!(
        "Nouvelle demande d'intervention\n\n\
         Nom: {name}\n\
         Email: {email}\n\
         Téléphone: {phone}\n\
         Adresse: {address}\n\n\
         {description}\n"
    );

    state
        .mailer()
        .send_form_submission("Demande d'intervention", body, email.as_str())
        .await?;

    Ok(Json(json!({"ok": true})))
}
