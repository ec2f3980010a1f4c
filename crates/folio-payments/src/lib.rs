//! # folio-payments
//!
//! Hosted checkout for folio service purchases.
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌──────────────────────┐
//! │ Service     │────▶│  Stripe Hosted  │────▶│ /checkout/success    │
//! │ page wizard │     │  Checkout Page  │     │ ?session_id=cs_...   │
//! └─────────────┘     └─────────────────┘     └──────────────────────┘
//!        │                    ▲                          │
//!        ▼                    │                          ▼
//!  POST /api/checkout ── CheckoutService ──   GET /api/checkout/session/{id}
//! ```
//!
//! [`CheckoutService::start`] validates the raw body with
//! [`folio_core::validate_checkout`], turns it into a provider-neutral
//! [`SessionDescriptor`] with [`SessionBuilder`], then asks the configured
//! [`CheckoutProvider`] for a hosted session. A cancelled payment sends the
//! customer back to the service page.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use folio_payments::{CheckoutService, CheckoutSettings, SessionBuilder, StripeClient};
//!
//! let settings = CheckoutSettings::new("https://yoursite.com", "usd")?;
//! let stripe = StripeClient::new("sk_test_xxx")?;
//! let service = CheckoutService::new(Arc::new(stripe), SessionBuilder::new(settings));
//!
//! let session = service.start(&body).await?;
//! // Redirect customer to: session.url
//! ```

mod builder;
mod checkout;
mod error;
mod mock;
mod provider;
mod service;

pub use builder::{
    CheckoutSettings, DESCRIPTION_MAX_CHARS, LineItem, METADATA_VALUE_MAX_CHARS,
    SESSION_ID_PLACEHOLDER, SessionBuilder, SessionDescriptor, SessionMode, truncate_with_ellipsis,
};
pub use checkout::StripeClient;
pub use error::{PaymentError, Result};
pub use mock::{MOCK_CHECKOUT_BASE, MockCheckoutProvider};
pub use provider::{CheckoutProvider, ProviderSession, SessionSummary};
pub use service::{CheckoutError, CheckoutPhase, CheckoutService, CheckoutSessionResult};
