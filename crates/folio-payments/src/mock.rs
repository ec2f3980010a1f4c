//! Mock Checkout Provider
//!
//! For tests and local demos. Records every descriptor it receives and hands
//! back Stripe-shaped URLs without touching the network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::builder::SessionDescriptor;
use crate::error::{PaymentError, Result};
use crate::provider::{CheckoutProvider, ProviderSession, SessionSummary};

/// Base of every URL the mock returns
pub const MOCK_CHECKOUT_BASE: &str = "https://checkout.stripe.com/c/pay/";

/// In-memory checkout provider
#[derive(Debug, Default)]
pub struct MockCheckoutProvider {
    sessions: Mutex<HashMap<String, SessionDescriptor>>,
    recorded: Mutex<Vec<SessionDescriptor>>,
    failing: AtomicBool,
}

impl MockCheckoutProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail like an unreachable provider
    pub fn fail_requests(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Descriptors received so far, oldest first
    pub fn recorded(&self) -> Vec<SessionDescriptor> {
        lock(&self.recorded).clone()
    }

    pub fn last_descriptor(&self) -> Option<SessionDescriptor> {
        lock(&self.recorded).last().cloned()
    }

    fn check_failing(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(PaymentError::Stripe("mock provider unavailable".into()));
        }
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl CheckoutProvider for MockCheckoutProvider {
    async fn create_session(&self, descriptor: &SessionDescriptor) -> Result<ProviderSession> {
        lock(&self.recorded).push(descriptor.clone());
        self.check_failing()?;

        let id = format!("cs_test_{}", uuid::Uuid::new_v4().simple());
        let url = format!("{MOCK_CHECKOUT_BASE}{id}");
        lock(&self.sessions).insert(id.clone(), descriptor.clone());

        Ok(ProviderSession { id, url })
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionSummary> {
        self.check_failing()?;

        let sessions = lock(&self.sessions);
        let descriptor = sessions
            .get(session_id)
            .ok_or_else(|| PaymentError::SessionNotFound(session_id.to_string()))?;

        Ok(SessionSummary {
            id: session_id.to_string(),
            status: Some("open".into()),
            payment_status: "unpaid".into(),
            amount_total: Some(descriptor.amount_total()),
            currency: descriptor.line_items.first().map(|item| item.currency.clone()),
            customer_email: Some(descriptor.customer_email.clone()),
            service_id: descriptor.service_id().map(str::to_string),
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
