//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` has been
//! loaded). A missing secret is fatal.

use std::path::PathBuf;

use thiserror::Error;

use folio_payments::CheckoutSettings;

pub const DEFAULT_SITE_URL: &str = "http://localhost:3000";
pub const DEFAULT_CURRENCY: &str = "usd";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Everything the server needs to boot
#[derive(Clone)]
pub struct SiteConfig {
    pub stripe_secret_key: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Public base URL used for checkout redirects
    pub site_url: String,
    pub currency: String,
    pub bind_addr: String,
    pub static_dir: PathBuf,
}

impl SiteConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary lookup (tests pass a map here)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| value(key).ok_or(ConfigError::Missing(key));
        let optional = |key: &str, default: &str| value(key).unwrap_or_else(|| default.into());

        let config = Self {
            stripe_secret_key: required("STRIPE_SECRET_KEY")?,
            supabase_url: required("SUPABASE_URL")?,
            supabase_anon_key: required("SUPABASE_ANON_KEY")?,
            site_url: optional("SITE_URL", DEFAULT_SITE_URL),
            currency: optional("CHECKOUT_CURRENCY", DEFAULT_CURRENCY),
            bind_addr: optional("BIND_ADDR", DEFAULT_BIND_ADDR),
            static_dir: PathBuf::from(optional("STATIC_DIR", DEFAULT_STATIC_DIR)),
        };

        // Surface a bad URL or currency now rather than on the first checkout
        config.checkout_settings()?;
        Ok(config)
    }

    pub fn checkout_settings(&self) -> Result<CheckoutSettings, ConfigError> {
        CheckoutSettings::new(&self.site_url, &self.currency).map_err(|e| ConfigError::Invalid {
            key: "SITE_URL/CHECKOUT_CURRENCY",
            reason: e.to_string(),
        })
    }
}

impl std::fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfig")
            .field("supabase_url", &self.supabase_url)
            .field("site_url", &self.site_url)
            .field("currency", &self.currency)
            .field("bind_addr", &self.bind_addr)
            .field("static_dir", &self.static_dir)
            .finish_non_exhaustive()
    }
}
