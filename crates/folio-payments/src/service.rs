//! Checkout Orchestration
//!
//! Validate → build → call provider, one span per request.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{Span, error, field::Empty, info, warn};

use folio_core::{ValidationErrors, validate_checkout};

use crate::builder::SessionBuilder;
use crate::error::PaymentError;
use crate::provider::{CheckoutProvider, SessionSummary};

/// How far a checkout attempt got
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutPhase {
    Validating,
    Building,
    CallingProvider,
    Succeeded,
    Failed,
}

impl CheckoutPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Building => "building",
            Self::CallingProvider => "calling_provider",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Successful checkout start
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResult {
    pub url: String,
    pub session_id: String,
}

#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Input failed validation; nothing was sent to the provider
    #[error("invalid checkout request: {0}")]
    Rejected(ValidationErrors),

    /// Provider call failed
    #[error(transparent)]
    Failed(#[from] PaymentError),
}

/// Runs the checkout pipeline against one provider
#[derive(Clone)]
pub struct CheckoutService {
    provider: Arc<dyn CheckoutProvider>,
    builder: SessionBuilder,
}

impl CheckoutService {
    pub fn new(provider: Arc<dyn CheckoutProvider>, builder: SessionBuilder) -> Self {
        Self { provider, builder }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Validate a raw body and open a hosted checkout session for it
    #[tracing::instrument(name = "checkout", skip_all, fields(service_id = Empty, phase = Empty))]
    pub async fn start(&self, body: &Value) -> Result<CheckoutSessionResult, CheckoutError> {
        let span = Span::current();
        let enter = |phase: CheckoutPhase| {
            span.record("phase", phase.as_str());
        };

        enter(CheckoutPhase::Validating);
        let request = match validate_checkout(body) {
            Ok(request) => request,
            Err(errors) => {
                enter(CheckoutPhase::Failed);
                warn!(issues = errors.len(), "Checkout request rejected");
                return Err(CheckoutError::Rejected(errors));
            }
        };
        span.record("service_id", request.service_id.as_str());

        enter(CheckoutPhase::Building);
        let descriptor = self.builder.build(&request);

        enter(CheckoutPhase::CallingProvider);
        let session = match self.provider.create_session(&descriptor).await {
            Ok(session) => session,
            Err(e) => {
                enter(CheckoutPhase::Failed);
                error!(
                    provider = self.provider.name(),
                    retryable = e.is_retryable(),
                    error = %e,
                    "Error creating checkout session"
                );
                return Err(e.into());
            }
        };

        enter(CheckoutPhase::Succeeded);
        info!(
            session_id = %session.id,
            amount = descriptor.amount_total(),
            "Checkout session created"
        );

        Ok(CheckoutSessionResult {
            url: session.url,
            session_id: session.id,
        })
    }

    /// Look up a previously created session
    pub async fn session(&self, session_id: &str) -> Result<SessionSummary, PaymentError> {
        self.provider.retrieve_session(session_id).await
    }
}

impl std::fmt::Debug for CheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutService")
            .field("provider", &self.provider.name())
            .field("builder", &self.builder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CheckoutSettings;
    use crate::mock::MockCheckoutProvider;
    use serde_json::json;

    fn service() -> (CheckoutService, Arc<MockCheckoutProvider>) {
        let provider = Arc::new(MockCheckoutProvider::new());
        let settings = CheckoutSettings::new("https://example.com", "usd").unwrap();
        let service = CheckoutService::new(provider.clone(), SessionBuilder::new(settings));
        (service, provider)
    }

    fn body(budget: &Value) -> Value {
        json!({
            "serviceId": "1",
            "customerInfo": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "projectDetails": "Audit my store",
                "budget": budget
            }
        })
    }

    #[tokio::test]
    async fn test_start_success() {
        let (service, provider) = service();
        let result = service.start(&body(&json!(497))).await.unwrap();

        assert!(result.url.starts_with("https://checkout.stripe.com/"));
        assert!(result.url.ends_with(&result.session_id));
        let descriptor = provider.last_descriptor().unwrap();
        assert_eq!(descriptor.line_items[0].unit_amount, 49_700);
    }

    #[tokio::test]
    async fn test_rejected_input_never_reaches_provider() {
        let (service, provider) = service();
        let err = service.start(&body(&json!("lots"))).await.unwrap_err();

        match err {
            CheckoutError::Rejected(errors) => {
                assert!(errors.has_field("customerInfo.budget"));
            }
            CheckoutError::Failed(e) => panic!("unexpected provider error: {e}"),
        }
        assert!(provider.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure() {
        let (service, provider) = service();
        provider.fail_requests(true);

        let err = service.start(&body(&json!(497))).await.unwrap_err();
        assert!(matches!(err, CheckoutError::Failed(PaymentError::Stripe(_))));
        assert_eq!(provider.recorded().len(), 1);
    }

    #[tokio::test]
    async fn test_session_lookup() {
        let (service, _) = service();
        let result = service.start(&body(&json!(297))).await.unwrap();

        let summary = service.session(&result.session_id).await.unwrap();
        assert_eq!(summary.amount_total, Some(29_700));
        assert_eq!(summary.customer_email.as_deref(), Some("jane@example.com"));
    }
}
