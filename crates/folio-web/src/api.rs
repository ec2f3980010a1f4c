//! API Client

use serde::Deserialize;
use serde_json::{Value, json};

use folio_core::SubscriptionType;

const FALLBACK_ORIGIN: &str = "http://localhost:3000";

/// Absolute URL of an API path (reqwest in the browser needs one)
fn api_url(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| FALLBACK_ORIGIN.into());
    format!("{origin}/api{path}")
}

/// Pull `error` out of a JSON error body
async fn error_message(response: reqwest::Response, fallback: &str) -> String {
    let data: Value = response.json().await.unwrap_or_default();
    data["error"].as_str().unwrap_or(fallback).to_string()
}

/// Confirmation-page view of a checkout session
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionView {
    pub id: String,
    pub status: Option<String>,
    pub payment_status: String,
    pub amount_total: Option<i64>,
    pub currency: Option<String>,
    pub customer_email: Option<String>,
    pub service_id: Option<String>,
}

impl CheckoutSessionView {
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }

    /// `$497.00` style amount, when known
    pub fn display_amount(&self) -> Option<String> {
        let cents = self.amount_total?;
        let currency = self.currency.as_deref().unwrap_or("usd").to_uppercase();
        let symbol = if currency == "USD" { "$" } else { "" };
        let suffix = if symbol.is_empty() { format!(" {currency}") } else { String::new() };
        Some(format!("{symbol}{}.{:02}{suffix}", cents / 100, cents % 100))
    }
}

/// Create a hosted checkout session; returns the URL to redirect to
pub async fn create_checkout(payload: &Value) -> Result<String, String> {
    let client = reqwest::Client::new();

    let response = client
        .post(api_url("/checkout"))
        .json(payload)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(data["url"].as_str().unwrap_or("").to_string())
    } else {
        Err(error_message(response, "Failed to create checkout session").await)
    }
}

/// Fetch a checkout session by id
pub async fn checkout_session(session_id: &str) -> Result<CheckoutSessionView, String> {
    let client = reqwest::Client::new();

    let response = client
        .get(api_url(&format!("/checkout/session/{session_id}")))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err(error_message(response, "Checkout session not found").await)
    }
}

/// Result of a newsletter signup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subscribed {
    pub message: String,
    pub already_subscribed: bool,
}

pub async fn subscribe_newsletter(
    email: &str,
    list: SubscriptionType,
    source: &str,
) -> Result<Subscribed, String> {
    let client = reqwest::Client::new();
    let body = json!({ "email": email, "type": list, "source": source });

    let response = client
        .post(api_url("/newsletter"))
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(Subscribed {
            message: data["message"].as_str().unwrap_or("Subscribed").to_string(),
            already_subscribed: data["alreadySubscribed"].as_bool().unwrap_or(false),
        })
    } else {
        Err(error_message(response, "Failed to subscribe to newsletter").await)
    }
}

/// Send the contact form; returns the confirmation text
pub async fn send_contact(form: &Value) -> Result<String, String> {
    let client = reqwest::Client::new();

    let response = client
        .post(api_url("/contact"))
        .json(form)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(data["message"].as_str().unwrap_or("Message sent").to_string())
    } else {
        let data: Value = response.json().await.unwrap_or_default();
        // Surface the first field message when the form was rejected
        let detail = data["details"][0]["message"].as_str();
        let error = data["error"].as_str().unwrap_or("Failed to submit contact form");
        Err(detail.map_or_else(|| error.to_string(), |d| format!("{error}: {d}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(amount: Option<i64>, currency: Option<&str>) -> CheckoutSessionView {
        CheckoutSessionView {
            id: "cs_test_1".into(),
            status: Some("complete".into()),
            payment_status: "paid".into(),
            amount_total: amount,
            currency: currency.map(str::to_string),
            customer_email: None,
            service_id: Some("1".into()),
        }
    }

    #[test]
    fn test_display_amount() {
        assert_eq!(view(Some(49_700), Some("usd")).display_amount().as_deref(), Some("$497.00"));
        assert_eq!(view(Some(1_050), Some("eur")).display_amount().as_deref(), Some("10.50 EUR"));
        assert_eq!(view(None, None).display_amount(), None);
        assert!(view(None, None).is_paid());
    }
}
