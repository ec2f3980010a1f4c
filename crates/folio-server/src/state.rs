//! Application State

use std::sync::Arc;

use folio_payments::CheckoutService;
use folio_store::SubmissionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout pipeline bound to the configured provider
    pub checkout: CheckoutService,

    /// Contact and newsletter persistence
    pub store: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new(checkout: CheckoutService, store: Arc<dyn SubmissionStore>) -> Self {
        Self { checkout, store }
    }
}
