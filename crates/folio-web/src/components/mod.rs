//! UI Components

mod checkout_wizard;
mod newsletter;
mod toaster;

pub use checkout_wizard::CheckoutWizardModal;
pub use newsletter::NewsletterSignup;
pub use toaster::{Toaster, use_toasts};
