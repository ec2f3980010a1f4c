//! API error responses
//!
//! Each endpoint family keeps its own JSON error shape; the variants below
//! know which one to render. Internal causes are logged where they happen
//! and never reach the response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use folio_core::ValidationErrors;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid checkout request")]
    InvalidCheckout(ValidationErrors),

    #[error("checkout session could not be created")]
    CheckoutFailed,

    #[error("checkout session not found")]
    SessionNotFound,

    #[error("checkout session lookup failed")]
    SessionLookupFailed,

    #[error("invalid contact form")]
    InvalidContact(ValidationErrors),

    #[error("contact form could not be stored")]
    ContactFailed,

    #[error("invalid newsletter signup")]
    InvalidNewsletter(ValidationErrors),

    #[error("newsletter signup could not be stored")]
    NewsletterFailed,

    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("route not found")]
    NotFound,
}

impl ApiError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidCheckout(_) | Self::InvalidContact(_) | Self::InvalidNewsletter(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::SessionNotFound | Self::ServiceNotFound(_) | Self::NotFound => {
                StatusCode::NOT_FOUND
            }
            Self::CheckoutFailed
            | Self::SessionLookupFailed
            | Self::ContactFailed
            | Self::NewsletterFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::InvalidCheckout(details) => json!({
                "error": "Invalid request data",
                "details": details,
            }),
            Self::CheckoutFailed => json!({ "error": "Failed to create checkout session" }),
            Self::SessionNotFound => json!({ "error": "Checkout session not found" }),
            Self::SessionLookupFailed => json!({ "error": "Failed to retrieve checkout session" }),
            Self::InvalidContact(details) => json!({
                "success": false,
                "error": "Invalid form data",
                "details": details,
            }),
            Self::ContactFailed => json!({
                "success": false,
                "error": "Failed to submit contact form",
            }),
            Self::InvalidNewsletter(details) => json!({
                "success": false,
                "error": "Invalid request data",
                "details": details,
            }),
            Self::NewsletterFailed => json!({
                "success": false,
                "error": "Failed to subscribe to newsletter",
            }),
            Self::ServiceNotFound(_) => json!({ "error": "Service not found" }),
            Self::NotFound => json!({ "error": "Not found" }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}
