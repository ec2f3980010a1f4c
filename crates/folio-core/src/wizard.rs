//! Checkout Wizard
//!
//! Two-step client flow: collect details, then pick a payment method. The
//! Leptos component owns one of these per open modal and renders from it;
//! all transition rules live here so they can be tested without a browser.
//!
//! ```text
//!   ┌─────────┐  continue_to_payment   ┌─────────┐  begin_submit   ┌───────────┐
//!   │ Details │ ─────────────────────▶ │ Payment │ ──────────────▶ │ in flight │
//!   └─────────┘ ◀───────────────────── └─────────┘ ◀────────────── └───────────┘
//!                        back                     finish_submit(Err)     │
//!                                                                        ▼
//!                                                           Redirect (leaves page)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::catalog::Service;

/// Current wizard step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Details,
    Payment,
}

/// Payment options offered on the second step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Hosted card checkout
    Card,
    /// Browser wallet, not wired up yet
    CryptoWallet,
}

/// Editable form fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Company,
    ProjectDetails,
    Timeline,
}

impl FormField {
    /// Wire name used in the checkout payload
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Company => "company",
            Self::ProjectDetails => "projectDetails",
            Self::Timeline => "timeline",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Company => "Company",
            Self::ProjectDetails => "Project Details",
            Self::Timeline => "Timeline",
        }
    }

    /// Fields that must be filled before moving on
    pub const fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::Email | Self::ProjectDetails)
    }
}

/// Wizard form state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub project_details: String,
    pub timeline: String,
    /// Whole currency units, preset from the service price
    pub budget: i64,
}

impl CheckoutForm {
    pub const fn get(&self, field: FormField) -> &String {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Company => &self.company,
            FormField::ProjectDetails => &self.project_details,
            FormField::Timeline => &self.timeline,
        }
    }

    fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Company => &mut self.company,
            FormField::ProjectDetails => &mut self.project_details,
            FormField::Timeline => &mut self.timeline,
        }
    }
}

/// Refused transitions
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Please fill in all required fields")]
    MissingFields(Vec<FormField>),

    #[error("Not available on the {actual:?} step")]
    WrongStep { actual: WizardStep },

    #[error("A payment request is already in progress")]
    InFlight,

    #[error("Crypto wallet payments are coming soon!")]
    UnsupportedMethod(PaymentMethod),
}

/// What the UI should do once a submission settles
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardAction {
    /// Full-page navigation to the hosted checkout
    Redirect(String),
    /// Inline notification, stay on the payment step
    Notify(String),
}

/// Generic failure text shown to the buyer
pub const CHECKOUT_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Shown when the browser refuses to open the checkout page
pub const REDIRECT_FAILED_MESSAGE: &str = "Could not open the checkout page. Please try again.";

/// Two-step checkout state machine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutWizard {
    service_id: String,
    price_id: Option<String>,
    step: WizardStep,
    form: CheckoutForm,
    in_flight: bool,
}

impl CheckoutWizard {
    pub fn new(service_id: impl Into<String>, budget: i64) -> Self {
        Self {
            service_id: service_id.into(),
            price_id: None,
            step: WizardStep::Details,
            form: CheckoutForm {
                budget,
                ..CheckoutForm::default()
            },
            in_flight: false,
        }
    }

    /// Start a wizard for a catalog service, budget preset to its price
    pub fn for_service(service: &Service) -> Self {
        let mut wizard = Self::new(service.id.clone(), service.price);
        wizard.price_id.clone_from(&service.stripe_price_id);
        wizard
    }

    pub const fn step(&self) -> WizardStep {
        self.step
    }

    pub const fn form(&self) -> &CheckoutForm {
        &self.form
    }

    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn service_id(&self) -> &str {
        &self.service_id
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.form.get_mut(field) = value.into();
    }

    /// Required fields that are still blank
    pub fn missing_fields(&self) -> Vec<FormField> {
        [FormField::Name, FormField::Email, FormField::ProjectDetails]
            .into_iter()
            .filter(|field| self.form.get(*field).trim().is_empty())
            .collect()
    }

    /// `Details → Payment`
    pub fn continue_to_payment(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Details {
            return Err(WizardError::WrongStep { actual: self.step });
        }

        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(WizardError::MissingFields(missing));
        }

        self.step = WizardStep::Payment;
        Ok(())
    }

    /// `Payment → Details`, refused while a request is outstanding
    pub fn back(&mut self) -> Result<(), WizardError> {
        if self.in_flight {
            return Err(WizardError::InFlight);
        }
        self.step = WizardStep::Details;
        Ok(())
    }

    /// Mark a submission as started and return the request body to send.
    pub fn begin_submit(&mut self, method: PaymentMethod) -> Result<Value, WizardError> {
        if self.step != WizardStep::Payment {
            return Err(WizardError::WrongStep { actual: self.step });
        }
        if self.in_flight {
            return Err(WizardError::InFlight);
        }
        if method != PaymentMethod::Card {
            return Err(WizardError::UnsupportedMethod(method));
        }

        self.in_flight = true;
        Ok(self.payload())
    }

    /// Settle an outstanding submission with the endpoint's answer
    pub fn finish_submit(&mut self, outcome: Result<String, String>) -> WizardAction {
        self.in_flight = false;

        match outcome {
            Ok(url) if !url.trim().is_empty() => WizardAction::Redirect(url),
            Ok(_) => WizardAction::Notify(CHECKOUT_FAILED_MESSAGE.into()),
            Err(message) if message.trim().is_empty() => {
                WizardAction::Notify(CHECKOUT_FAILED_MESSAGE.into())
            }
            Err(message) => WizardAction::Notify(message),
        }
    }

    /// The redirect from [`WizardAction::Redirect`] did not happen.
    /// The session stays on the payment step so the user can retry.
    pub fn redirect_failed(&mut self) -> WizardAction {
        self.in_flight = false;
        self.step = WizardStep::Payment;
        WizardAction::Notify(REDIRECT_FAILED_MESSAGE.into())
    }

    /// Checkout endpoint body built from the current form
    pub fn payload(&self) -> Value {
        let mut info = Map::new();
        for field in [
            FormField::Name,
            FormField::Email,
            FormField::Phone,
            FormField::Company,
            FormField::ProjectDetails,
            FormField::Timeline,
        ] {
            let value = self.form.get(field).trim();
            if field.is_required() || !value.is_empty() {
                info.insert(field.wire_name().into(), Value::String(value.to_string()));
            }
        }
        info.insert("budget".into(), json!(self.form.budget));

        let mut body = json!({
            "serviceId": self.service_id,
            "customerInfo": info,
        });
        if let Some(price_id) = &self.price_id {
            body["priceId"] = json!(price_id);
        }
        body
    }
}
