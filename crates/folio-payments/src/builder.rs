//! Checkout Session Builder
//!
//! Maps a validated [`CheckoutRequest`] onto a provider-neutral
//! [`SessionDescriptor`]: one line item priced at `budget × 100` minor units,
//! redirect URLs back to the site, and a metadata bag carrying every customer
//! field for later reconciliation.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use folio_core::CheckoutRequest;

use crate::error::{PaymentError, Result};

/// Maximum characters of `projectDetails` shown on the line item
pub const DESCRIPTION_MAX_CHARS: usize = 100;

/// Stripe rejects metadata values longer than 500 characters
pub const METADATA_VALUE_MAX_CHARS: usize = 500;

/// Placeholder Stripe replaces with the real session id on redirect
pub const SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

const ELLIPSIS: &str = "...";

/// Process-level settings the builder needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutSettings {
    site_url: String,
    currency: String,
}

impl CheckoutSettings {
    /// Validate and normalise settings. Meant to run once at startup.
    pub fn new(site_url: &str, currency: &str) -> Result<Self> {
        let site_url = site_url.trim().trim_end_matches('/');
        if !(site_url.starts_with("http://") || site_url.starts_with("https://")) {
            return Err(PaymentError::Config(format!(
                "site URL must start with http:// or https://, got '{site_url}'"
            )));
        }

        let currency = currency.trim().to_ascii_lowercase();
        if currency.len() != 3 || !currency.bytes().all(|b| b.is_ascii_lowercase()) {
            return Err(PaymentError::Config(format!(
                "currency must be a three-letter ISO code, got '{currency}'"
            )));
        }

        Ok(Self {
            site_url: site_url.to_string(),
            currency,
        })
    }

    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// Checkout mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// One-off payment
    Payment,
}

/// One priced unit in the session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub name: String,
    pub description: String,
    /// Price per unit in minor currency units
    pub unit_amount: i64,
    pub currency: String,
    pub quantity: u64,
    /// Product-level metadata
    pub metadata: BTreeMap<String, String>,
}

/// Everything a provider needs to open a hosted checkout
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescriptor {
    pub mode: SessionMode,
    pub payment_method_types: Vec<String>,
    /// Always exactly one item
    pub line_items: Vec<LineItem>,
    pub customer_email: String,
    pub success_url: String,
    pub cancel_url: String,
    pub metadata: BTreeMap<String, String>,
}

impl SessionDescriptor {
    /// Sum of all line items in minor units
    pub fn amount_total(&self) -> i64 {
        self.line_items
            .iter()
            .map(|item| {
                let quantity = i64::try_from(item.quantity).unwrap_or(i64::MAX);
                item.unit_amount.saturating_mul(quantity)
            })
            .fold(0_i64, i64::saturating_add)
    }

    /// Service the session was built for
    pub fn service_id(&self) -> Option<&str> {
        self.metadata.get("serviceId").map(String::as_str)
    }
}

/// Builds session descriptors from validated requests
#[derive(Clone, Debug)]
pub struct SessionBuilder {
    settings: CheckoutSettings,
}

impl SessionBuilder {
    pub const fn new(settings: CheckoutSettings) -> Self {
        Self { settings }
    }

    pub fn build(&self, request: &CheckoutRequest) -> SessionDescriptor {
        let info = &request.customer_info;

        let mut product_metadata = BTreeMap::new();
        product_metadata.insert("serviceId".into(), metadata_value(&request.service_id));
        product_metadata.insert("customerName".into(), metadata_value(&info.name));
        product_metadata.insert("customerEmail".into(), metadata_value(&info.email));

        let line_item = LineItem {
            name: format!("Service: {}", request.service_id),
            description: truncate_with_ellipsis(&info.project_details, DESCRIPTION_MAX_CHARS)
                .into_owned(),
            unit_amount: info.budget.minor_units(),
            currency: self.settings.currency.clone(),
            quantity: 1,
            metadata: product_metadata,
        };

        let optional = |value: &Option<String>| metadata_value(value.as_deref().unwrap_or(""));
        let mut metadata = BTreeMap::new();
        metadata.insert("serviceId".into(), metadata_value(&request.service_id));
        metadata.insert("customerName".into(), metadata_value(&info.name));
        metadata.insert("customerEmail".into(), metadata_value(&info.email));
        metadata.insert("customerPhone".into(), optional(&info.phone));
        metadata.insert("company".into(), optional(&info.company));
        metadata.insert("projectDetails".into(), metadata_value(&info.project_details));
        metadata.insert("timeline".into(), optional(&info.timeline));
        metadata.insert("budget".into(), info.budget.to_string());
        if let Some(price_id) = &request.price_id {
            metadata.insert("priceId".into(), metadata_value(price_id));
        }

        SessionDescriptor {
            mode: SessionMode::Payment,
            payment_method_types: vec!["card".into()],
            line_items: vec![line_item],
            customer_email: info.email.clone(),
            success_url: format!(
                "{}/checkout/success?session_id={SESSION_ID_PLACEHOLDER}",
                self.settings.site_url
            ),
            cancel_url: format!(
                "{}/services/{}",
                self.settings.site_url,
                encode_path_segment(&request.service_id)
            ),
            metadata,
        }
    }
}

/// Keep at most `max_chars` characters, appending `...` when cut.
///
/// Counts Unicode scalar values so multi-byte text is never split mid-char.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}{ELLIPSIS}", &text[..cut])),
    }
}

fn metadata_value(value: &str) -> String {
    let limit = METADATA_VALUE_MAX_CHARS - ELLIPSIS.len();
    truncate_with_ellipsis(value, limit).into_owned()
}

/// Percent-encode everything outside the RFC 3986 unreserved set
fn encode_path_segment(segment: &str) -> Cow<'_, str> {
    let unreserved = |b: u8| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~');
    if segment.bytes().all(unreserved) {
        return Cow::Borrowed(segment);
    }

    let mut out = String::with_capacity(segment.len() * 3);
    for b in segment.bytes() {
        if unreserved(b) {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    Cow::Owned(out)
}
