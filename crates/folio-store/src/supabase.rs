//! Supabase Store
//!
//! Inserts rows through Supabase's PostgREST endpoint
//! (`{SUPABASE_URL}/rest/v1/{table}`) authenticated with the anon key.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use folio_core::{ContactSubmission, NewsletterSignup};

use crate::error::{Result, StoreError, UNIQUE_VIOLATION_CODE};
use crate::record::{ContactRecord, SubscriptionRecord};
use crate::SubmissionStore;

pub const NEWSLETTER_TABLE: &str = "newsletter_subscriptions";
pub const CONTACT_TABLE: &str = "contact_submissions";

/// Supabase connection configuration
#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    pub url: String,

    /// Public anon key
    pub anon_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SupabaseConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            timeout_secs: 10,
        }
    }
}

/// PostgREST error body
#[derive(Debug, Default, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Supabase-backed submission store
pub struct SupabaseStore {
    client: Client,
    rest_url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        let base = config.url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(StoreError::Config(format!(
                "Supabase URL must start with http:// or https://, got '{base}'"
            )));
        }
        if config.anon_key.trim().is_empty() {
            return Err(StoreError::Config("Supabase anon key is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            rest_url: format!("{base}/rest/v1"),
            anon_key: config.anon_key,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    /// Insert one row and return the id the database assigned
    async fn insert<T: Serialize + Sync>(&self, table: &str, row: &T) -> Result<Option<String>> {
        let response = self
            .client
            .post(self.table_url(table))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_error(status, &body));
        }

        let id = serde_json::from_str::<Vec<Value>>(&body)
            .ok()
            .and_then(|rows| rows.into_iter().next())
            .and_then(|row| row.get("id").and_then(id_to_string));
        debug!(table, id = ?id, "Row inserted");

        Ok(id)
    }
}

impl std::fmt::Debug for SupabaseStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseStore")
            .field("rest_url", &self.rest_url)
            .finish_non_exhaustive()
    }
}

fn classify_error(status: StatusCode, body: &str) -> StoreError {
    let parsed: PostgrestError = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| format!("HTTP {status}"));

    if parsed.code.as_deref() == Some(UNIQUE_VIOLATION_CODE) {
        return StoreError::UniqueViolation(message);
    }

    warn!(%status, code = ?parsed.code, "Supabase request failed");
    StoreError::Backend(message)
}

fn id_to_string(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl SubmissionStore for SupabaseStore {
    async fn subscribe(&self, signup: &NewsletterSignup) -> Result<SubscriptionRecord> {
        let mut record = SubscriptionRecord::from_signup(signup, Utc::now());
        record.id = self.insert(NEWSLETTER_TABLE, &record).await?;
        Ok(record)
    }

    async fn submit_contact(&self, submission: &ContactSubmission) -> Result<ContactRecord> {
        let mut record = ContactRecord::from_submission(submission, Utc::now());
        record.id = self.insert(CONTACT_TABLE, &record).await?;
        Ok(record)
    }

    fn name(&self) -> &str {
        "supabase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_config() {
        assert!(SupabaseStore::new(SupabaseConfig::new("xyz.supabase.co", "key")).is_err());
        assert!(SupabaseStore::new(SupabaseConfig::new("https://xyz.supabase.co", " ")).is_err());
    }

    #[test]
    fn test_table_url() {
        let store =
            SupabaseStore::new(SupabaseConfig::new("https://xyz.supabase.co/", "anon")).unwrap();
        assert_eq!(
            store.table_url(NEWSLETTER_TABLE),
            "https://xyz.supabase.co/rest/v1/newsletter_subscriptions"
        );
    }

    #[test]
    fn test_unique_violation_detected() {
        let body = r#"{"code":"23505","details":"Key (email)=(a@b.co) already exists.","message":"duplicate key value violates unique constraint"}"#;
        let err = classify_error(StatusCode::CONFLICT, body);
        assert!(err.is_unique_violation());
    }

    #[test]
    fn test_other_errors_are_backend() {
        let err = classify_error(StatusCode::UNAUTHORIZED, r#"{"code":"42501","message":"denied"}"#);
        assert!(matches!(err, StoreError::Backend(ref m) if m == "denied"));

        let err = classify_error(StatusCode::BAD_GATEWAY, "<html>");
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn test_id_to_string() {
        assert_eq!(id_to_string(&Value::from(42)), Some("42".into()));
        assert_eq!(id_to_string(&Value::from("abc")), Some("abc".into()));
        assert_eq!(id_to_string(&Value::Null), None);
    }
}
