//! In-memory submission store (for development and tests)

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use folio_core::{ContactSubmission, NewsletterSignup, SubscriptionType};

use crate::error::{Result, StoreError};
use crate::record::{ContactRecord, SubscriptionRecord};
use crate::SubmissionStore;

/// Same uniqueness rule as the database: one row per (email, list)
type SubscriptionKey = (String, SubscriptionType);

#[derive(Debug, Default)]
pub struct MemoryStore {
    subscriptions: RwLock<HashMap<SubscriptionKey, SubscriptionRecord>>,
    contacts: RwLock<Vec<ContactRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn subscriptions(&self) -> Vec<SubscriptionRecord> {
        self.subscriptions.read().await.values().cloned().collect()
    }

    pub async fn contacts(&self) -> Vec<ContactRecord> {
        self.contacts.read().await.clone()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn subscribe(&self, signup: &NewsletterSignup) -> Result<SubscriptionRecord> {
        let key = (signup.email.to_lowercase(), signup.subscription_type);
        let mut subscriptions = self.subscriptions.write().await;

        if subscriptions.contains_key(&key) {
            return Err(StoreError::UniqueViolation(format!(
                "{} already subscribed to {}",
                key.0, key.1
            )));
        }

        let mut record = SubscriptionRecord::from_signup(signup, Utc::now());
        record.id = Some(uuid::Uuid::new_v4().to_string());
        subscriptions.insert(key, record.clone());
        Ok(record)
    }

    async fn submit_contact(&self, submission: &ContactSubmission) -> Result<ContactRecord> {
        let mut record = ContactRecord::from_submission(submission, Utc::now());
        record.id = Some(uuid::Uuid::new_v4().to_string());
        self.contacts.write().await.push(record.clone());
        Ok(record)
    }

    fn name(&self) -> &str {
        "memory"
    }
}
