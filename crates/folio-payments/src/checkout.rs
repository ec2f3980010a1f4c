//! Stripe Checkout Integration
//!
//! Implements [`CheckoutProvider`] against Stripe's hosted checkout.

use std::collections::HashMap;

use async_trait::async_trait;
use stripe::{
    CheckoutSession, CheckoutSessionId, CheckoutSessionMode, Client, CreateCheckoutSession,
    CreateCheckoutSessionLineItems, CreateCheckoutSessionLineItemsPriceData,
    CreateCheckoutSessionLineItemsPriceDataProductData, CreateCheckoutSessionPaymentMethodTypes,
    Currency, StripeError,
};

use crate::builder::{SessionDescriptor, SessionMode};
use crate::error::{PaymentError, Result};
use crate::provider::{CheckoutProvider, ProviderSession, SessionSummary};

/// Stripe client wrapper
///
/// Charges in whatever currency each line item names.
pub struct StripeClient {
    client: Client,
}

impl StripeClient {
    pub fn new(secret_key: &str) -> Result<Self> {
        if secret_key.trim().is_empty() {
            return Err(PaymentError::Config("Stripe secret key is empty".into()));
        }

        Ok(Self {
            client: Client::new(secret_key),
        })
    }

    /// Stripe currency for an ISO code (any case)
    pub fn currency(code: &str) -> Result<Currency> {
        code.trim()
            .to_ascii_lowercase()
            .parse::<Currency>()
            .map_err(|_| PaymentError::Config(format!("unsupported currency '{code}'")))
    }
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient").finish_non_exhaustive()
    }
}

fn to_metadata(map: &std::collections::BTreeMap<String, String>) -> HashMap<String, String> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

fn stripe_error(err: &StripeError) -> PaymentError {
    PaymentError::Stripe(err.to_string())
}

#[async_trait]
impl CheckoutProvider for StripeClient {
    async fn create_session(&self, descriptor: &SessionDescriptor) -> Result<ProviderSession> {
        let mut params = CreateCheckoutSession::new();
        params.customer_email = Some(descriptor.customer_email.as_str());
        params.success_url = Some(descriptor.success_url.as_str());
        params.cancel_url = Some(descriptor.cancel_url.as_str());
        params.mode = Some(match descriptor.mode {
            SessionMode::Payment => CheckoutSessionMode::Payment,
        });
        params.payment_method_types = Some(vec![CreateCheckoutSessionPaymentMethodTypes::Card]);
        params.metadata = Some(to_metadata(&descriptor.metadata));

        params.line_items = Some(
            descriptor
                .line_items
                .iter()
                .map(|item| -> Result<CreateCheckoutSessionLineItems> {
                    Ok(CreateCheckoutSessionLineItems {
                        quantity: Some(item.quantity),
                        price_data: Some(CreateCheckoutSessionLineItemsPriceData {
                            currency: Self::currency(&item.currency)?,
                            unit_amount: Some(item.unit_amount),
                            product_data: Some(
                                CreateCheckoutSessionLineItemsPriceDataProductData {
                                    name: item.name.clone(),
                                    description: Some(item.description.clone()),
                                    metadata: Some(to_metadata(&item.metadata)),
                                    ..Default::default()
                                },
                            ),
                            ..Default::default()
                        }),
                        ..Default::default()
                    })
                })
                .collect::<Result<Vec<_>>>()?,
        );

        let session = CheckoutSession::create(&self.client, params)
            .await
            .map_err(|e| stripe_error(&e))?;

        let id = session.id.to_string();
        let url = session.url.ok_or(PaymentError::MissingUrl(id.clone()))?;

        Ok(ProviderSession { id, url })
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<SessionSummary> {
        let id = session_id
            .parse::<CheckoutSessionId>()
            .map_err(|_| PaymentError::SessionNotFound(session_id.to_string()))?;

        let session = CheckoutSession::retrieve(&self.client, &id, &[])
            .await
            .map_err(|e| match e {
                StripeError::Stripe(ref req) if req.http_status == 404 => {
                    PaymentError::SessionNotFound(session_id.to_string())
                }
                other => stripe_error(&other),
            })?;

        let service_id = session
            .metadata
            .as_ref()
            .and_then(|m| m.get("serviceId"))
            .cloned();

        Ok(SessionSummary {
            id: session.id.to_string(),
            status: session.status.map(|s| s.as_str().to_string()),
            payment_status: session.payment_status.as_str().to_string(),
            amount_total: session.amount_total,
            currency: session.currency.map(|c| c.to_string()),
            customer_email: session.customer_email,
            service_id,
        })
    }

    fn name(&self) -> &str {
        "stripe"
    }
}
