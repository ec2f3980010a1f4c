//! HTTP Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Value, json};

use folio_core::{Service, catalog, validate_contact, validate_newsletter};
use folio_payments::{CheckoutError, PaymentError, SessionSummary};
use folio_store::StoreError;

use crate::error::ApiError;
use crate::extract::{JsonBody, MalformedBody};
use crate::state::AppState;

pub const CONTACT_SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
pub const NEWSLETTER_SUBSCRIBED_MESSAGE: &str = "Successfully subscribed to newsletter!";

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub provider: String,
    pub store: String,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterResponse {
    pub success: bool,
    pub message: &'static str,
    pub already_subscribed: bool,
}

impl NewsletterResponse {
    const fn subscribed(already_subscribed: bool) -> Self {
        Self {
            success: true,
            message: NEWSLETTER_SUBSCRIBED_MESSAGE,
            already_subscribed,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        provider: state.checkout.provider_name().to_string(),
        store: state.store.name().to_string(),
    })
}

/// Create a hosted checkout session
pub async fn create_checkout(
    State(state): State<AppState>,
    body: Result<JsonBody, MalformedBody>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let JsonBody(body) = body.map_err(|e| ApiError::InvalidCheckout(e.into_errors()))?;

    match state.checkout.start(&body).await {
        Ok(session) => Ok(Json(CheckoutResponse { url: session.url })),
        Err(CheckoutError::Rejected(details)) => Err(ApiError::InvalidCheckout(details)),
        // Already logged with full context by the checkout service
        Err(CheckoutError::Failed(_)) => Err(ApiError::CheckoutFailed),
    }
}

/// Look up a checkout session for the confirmation page
pub async fn checkout_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSummary>, ApiError> {
    state
        .checkout
        .session(&session_id)
        .await
        .map(Json)
        .map_err(|e| match e {
            PaymentError::SessionNotFound(_) => ApiError::SessionNotFound,
            other => {
                tracing::error!(%session_id, error = %other, "Checkout session lookup failed");
                ApiError::SessionLookupFailed
            }
        })
}

/// Store a contact form message
pub async fn submit_contact(
    State(state): State<AppState>,
    body: Result<JsonBody, MalformedBody>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    let JsonBody(body) = body.map_err(|e| ApiError::InvalidContact(e.into_errors()))?;
    let submission = validate_contact(&body).map_err(ApiError::InvalidContact)?;

    let record = state.store.submit_contact(&submission).await.map_err(|e| {
        tracing::error!(store = state.store.name(), error = %e, "Error saving contact submission");
        ApiError::ContactFailed
    })?;

    tracing::info!(id = ?record.id, kind = ?record.kind, "Contact submission received");

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message: CONTACT_SENT_MESSAGE,
            id: record.id,
        }),
    ))
}

/// Usage descriptor for the contact endpoint
pub async fn contact_info() -> Json<Value> {
    Json(json!({
        "message": "Contact form submission endpoint",
        "methods": ["POST"],
        "body": {
            "name": "Your Name",
            "email": "user@example.com",
            "subject": "Inquiry about services",
            "message": "Your message here...",
            "type": "general (optional)"
        }
    }))
}

/// Subscribe an address to a newsletter list
pub async fn subscribe_newsletter(
    State(state): State<AppState>,
    body: Result<JsonBody, MalformedBody>,
) -> Result<(StatusCode, Json<NewsletterResponse>), ApiError> {
    let JsonBody(body) = body.map_err(|e| ApiError::InvalidNewsletter(e.into_errors()))?;
    let signup = validate_newsletter(&body).map_err(ApiError::InvalidNewsletter)?;

    match state.store.subscribe(&signup).await {
        Ok(_) => {
            tracing::info!(list = %signup.subscription_type, "Newsletter subscription created");
            Ok((StatusCode::CREATED, Json(NewsletterResponse::subscribed(false))))
        }
        Err(StoreError::UniqueViolation(_)) => {
            tracing::debug!(list = %signup.subscription_type, "Already subscribed");
            Ok((StatusCode::OK, Json(NewsletterResponse::subscribed(true))))
        }
        Err(e) => {
            tracing::error!(store = state.store.name(), error = %e, "Error subscribing to newsletter");
            Err(ApiError::NewsletterFailed)
        }
    }
}

/// Usage descriptor for the newsletter endpoint
pub async fn newsletter_info() -> Json<Value> {
    Json(json!({
        "message": "Newsletter subscription endpoint",
        "methods": ["POST"],
        "body": {
            "email": "user@example.com",
            "type": "journalism | ecommerce",
            "source": "website (optional)"
        }
    }))
}

/// Full service catalog
pub async fn list_services() -> Json<&'static [Service]> {
    Json(catalog::services())
}

/// One service by slug, or by id (checkout cancel URLs carry the id)
pub async fn get_service(Path(key): Path<String>) -> Result<Json<&'static Service>, ApiError> {
    catalog::find_by_slug(&key)
        .or_else(|| catalog::find_by_id(&key))
        .map(Json)
        .ok_or(ApiError::ServiceNotFound(key))
}

/// Unknown API route
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
