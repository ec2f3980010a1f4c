//! # folio-core
//!
//! Domain types shared by the folio server and web frontend.
//!
//! ## Request Boundary
//!
//! ```text
//! ┌──────────────┐    validate_*()    ┌─────────────────────┐
//! │  raw JSON    │ ─────────────────▶ │ typed request       │──▶ builder / store
//! │  (untrusted) │         │          └─────────────────────┘
//! └──────────────┘         └────────▶ ValidationErrors (every field, every rule)
//! ```
//!
//! Nothing past the boundary ever handles an unvalidated payload.
//!
//! The crate has no I/O: the checkout wizard and toast store are plain state
//! machines so the Leptos components stay thin.

pub mod catalog;
pub mod checkout;
pub mod error;
pub mod forms;
pub mod toast;
mod wire;
pub mod wizard;

pub use catalog::{Service, ServiceCategory};
pub use checkout::{Budget, BudgetError, CheckoutRequest, CustomerInfo, validate_checkout};
pub use error::{FieldIssue, Result, ValidationErrors};
pub use forms::{
    ContactSubmission, NewsletterSignup, SubscriptionType, validate_contact, validate_newsletter,
};
pub use toast::{Toast, ToastHandle, ToastId, ToastStore, ToastVariant};
pub use wizard::{CheckoutWizard, FormField, PaymentMethod, WizardAction, WizardError, WizardStep};
