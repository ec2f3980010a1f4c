//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Provider API error (rejected request, network failure, bad response)
    #[error("Stripe error: {0}")]
    Stripe(String),

    /// Provider accepted the request but returned no hosted checkout URL
    #[error("No checkout URL returned for session {0}")]
    MissingUrl(String),

    /// Session id unknown to the provider or malformed
    #[error("Checkout session not found: {0}")]
    SessionNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Stripe(_))
    }
}
