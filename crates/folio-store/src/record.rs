//! Stored rows
//!
//! Field names follow the database columns (`snake_case`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::{ContactSubmission, NewsletterSignup, SubscriptionType};

/// Contact submissions start life as `new`
pub const CONTACT_STATUS_NEW: &str = "new";

/// Row in `newsletter_subscriptions`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub subscription_type: SubscriptionType,
    pub source: String,
    pub subscribed_at: DateTime<Utc>,
    pub is_active: bool,
}

impl SubscriptionRecord {
    pub fn from_signup(signup: &NewsletterSignup, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            email: signup.email.clone(),
            subscription_type: signup.subscription_type,
            source: signup.source_or_default().to_string(),
            subscribed_at: now,
            is_active: true,
        }
    }
}

/// Row in `contact_submissions`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: String,
}

impl ContactRecord {
    pub fn from_submission(submission: &ContactSubmission, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            name: submission.name.clone(),
            email: submission.email.clone(),
            subject: submission.subject.clone(),
            message: submission.message.clone(),
            kind: submission.kind.clone(),
            submitted_at: now,
            status: CONTACT_STATUS_NEW.to_string(),
        }
    }
}
