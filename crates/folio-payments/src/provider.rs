//! Checkout Provider Abstraction
//!
//! One implementation per hosted-checkout vendor. The server only ever sees
//! `Arc<dyn CheckoutProvider>`, so tests swap in [`crate::MockCheckoutProvider`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::builder::SessionDescriptor;
use crate::error::Result;

/// Session as created by the provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSession {
    pub id: String,
    /// Hosted checkout page to redirect the customer to
    pub url: String,
}

/// Read-back view of a session, shown on the success page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    /// `open`, `complete` or `expired`
    pub status: Option<String>,
    /// `paid`, `unpaid` or `no_payment_required`
    pub payment_status: String,
    /// Minor units
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    pub customer_email: Option<String>,
    pub service_id: Option<String>,
}

/// Hosted checkout provider (Strategy pattern)
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Open a hosted checkout session
    async fn create_session(&self, descriptor: &SessionDescriptor) -> Result<ProviderSession>;

    /// Look a session up by id
    async fn retrieve_session(&self, session_id: &str) -> Result<SessionSummary>;

    /// Provider name
    fn name(&self) -> &str;
}
