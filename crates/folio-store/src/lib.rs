//! # folio-store
//!
//! Where contact messages and newsletter signups end up.
//!
//! [`SupabaseStore`] writes to the hosted Postgres tables
//! `newsletter_subscriptions` and `contact_submissions`; [`MemoryStore`]
//! enforces the same one-subscription-per-list rule in process.

mod error;
mod memory;
mod record;
mod supabase;

pub use error::{Result, StoreError, UNIQUE_VIOLATION_CODE};
pub use memory::MemoryStore;
pub use record::{CONTACT_STATUS_NEW, ContactRecord, SubscriptionRecord};
pub use supabase::{CONTACT_TABLE, NEWSLETTER_TABLE, SupabaseConfig, SupabaseStore};

use async_trait::async_trait;
use folio_core::{ContactSubmission, NewsletterSignup};

/// Submission storage trait
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Record a newsletter signup.
    ///
    /// Fails with [`StoreError::UniqueViolation`] when the address is already
    /// on that list.
    async fn subscribe(&self, signup: &NewsletterSignup) -> Result<SubscriptionRecord>;

    /// Record a contact form message
    async fn submit_contact(&self, submission: &ContactSubmission) -> Result<ContactRecord>;

    /// Store name
    fn name(&self) -> &str;
}
