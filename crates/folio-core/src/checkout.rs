//! Checkout Request
//!
//! The validation boundary for `POST /checkout`. Raw JSON goes in, either a
//! fully typed [`CheckoutRequest`] or the complete list of violations comes
//! out. Nothing downstream ever sees an unvalidated payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationError};

use crate::error::{FieldIssue, Result, ValidationErrors};
use crate::wire::WireObject;

/// Minor currency units per whole unit (cents per dollar)
pub const MINOR_UNITS_PER_UNIT: i64 = 100;

/// Largest budget whose minor-unit amount still fits in an `i64`
pub const MAX_BUDGET_UNITS: i64 = i64::MAX / MINOR_UNITS_PER_UNIT;

/// Why a budget value was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("must be a number")]
    NotANumber,

    #[error("must be greater than zero")]
    NotPositive,

    #[error("must be a whole number of currency units")]
    NotWhole,

    #[error("is too large")]
    TooLarge,
}

impl BudgetError {
    /// Rule name reported in validation output
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotANumber => "invalid_type",
            Self::NotPositive => "too_small",
            Self::NotWhole => "not_whole",
            Self::TooLarge => "too_big",
        }
    }
}

/// Positive budget in whole currency units
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "serde_json::Value", into = "i64")]
pub struct Budget(i64);

impl Budget {
    pub const fn new(units: i64) -> std::result::Result<Self, BudgetError> {
        if units <= 0 {
            return Err(BudgetError::NotPositive);
        }
        if units > MAX_BUDGET_UNITS {
            return Err(BudgetError::TooLarge);
        }
        Ok(Self(units))
    }

    /// Parse a JSON value. Integers and integral floats (`497.0`) are accepted;
    /// strings are not, even when they look numeric.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_json(value: &Value) -> std::result::Result<Self, BudgetError> {
        let Value::Number(number) = value else {
            return Err(BudgetError::NotANumber);
        };

        if let Some(units) = number.as_i64() {
            return Self::new(units);
        }
        if number.as_u64().is_some() {
            return Err(BudgetError::TooLarge);
        }

        let float = number.as_f64().ok_or(BudgetError::NotANumber)?;
        if !float.is_finite() {
            return Err(BudgetError::NotANumber);
        }
        if float <= 0.0 {
            return Err(BudgetError::NotPositive);
        }
        if float.fract() != 0.0 {
            return Err(BudgetError::NotWhole);
        }
        if float > MAX_BUDGET_UNITS as f64 {
            return Err(BudgetError::TooLarge);
        }
        Self::new(float as i64)
    }

    /// Whole currency units
    pub const fn units(self) -> i64 {
        self.0
    }

    /// Amount in minor units. The constructor caps `units` at
    /// [`MAX_BUDGET_UNITS`], so the product always fits.
    pub const fn minor_units(self) -> i64 {
        self.0 * MINOR_UNITS_PER_UNIT
    }
}

impl TryFrom<Value> for Budget {
    type Error = BudgetError;

    fn try_from(value: Value) -> std::result::Result<Self, Self::Error> {
        Self::from_json(&value)
    }
}

impl From<Budget> for i64 {
    fn from(budget: Budget) -> Self {
        budget.0
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Customer contact and project fields
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub project_details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    pub budget: Budget,
}

/// A validated checkout request
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Opaque identifier of the purchased offering
    pub service_id: String,

    /// Who is buying and what they need
    pub customer_info: CustomerInfo,

    /// External price-catalog reference, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
}

/// Validate an untyped request body.
///
/// Every violated field is reported, not just the first one found. A field
/// of the wrong JSON type is reported as `invalid_type` on its own path.
pub fn validate_checkout(body: &Value) -> Result<CheckoutRequest> {
    let mut wire = WireObject::root(body)?;
    let mut info_wire = wire.object("customerInfo");

    let mut raw = RawCheckout {
        service_id: wire.text("serviceId"),
        price_id: wire.text("priceId"),
        customer_info: info_wire.as_mut().map(|info| RawCustomerInfo {
            name: info.text("name"),
            email: info.text("email"),
            phone: info.text("phone"),
            company: info.text("company"),
            project_details: info.text("projectDetails"),
            timeline: info.text("timeline"),
            budget: info.value("budget"),
        }),
    };
    raw.normalize();

    let mut errors = ValidationErrors::new();
    if let Err(e) = raw.validate() {
        errors.collect_from("", &e);
    }
    match &raw.customer_info {
        Some(info) => {
            if let Err(e) = info.validate() {
                errors.collect_from("customerInfo", &e);
            }
        }
        None => errors.push(FieldIssue::new("customerInfo", "required", "is required")),
    }
    if let Some(info) = info_wire {
        info.report(&mut errors);
    }
    wire.report(&mut errors);
    errors.into_result(())?;

    raw.into_request()
        .ok_or_else(|| ValidationErrors::malformed("incomplete checkout payload"))
}

#[derive(Debug, Validate)]
struct RawCheckout {
    #[validate(required(message = "is required"), custom(function = "not_blank"))]
    service_id: Option<String>,

    customer_info: Option<RawCustomerInfo>,

    price_id: Option<String>,
}

#[derive(Debug, Validate)]
struct RawCustomerInfo {
    #[validate(required(message = "is required"), custom(function = "not_blank"))]
    name: Option<String>,

    #[validate(
        required(message = "is required"),
        email(message = "not a valid email address")
    )]
    email: Option<String>,

    phone: Option<String>,

    company: Option<String>,

    #[validate(required(message = "is required"), custom(function = "not_blank"))]
    project_details: Option<String>,

    timeline: Option<String>,

    #[validate(required(message = "is required"), custom(function = "valid_budget"))]
    budget: Option<Value>,
}

impl RawCheckout {
    fn normalize(&mut self) {
        trim_in_place(&mut self.service_id);
        self.price_id = non_blank(self.price_id.take());
        if let Some(info) = self.customer_info.as_mut() {
            trim_in_place(&mut info.name);
            trim_in_place(&mut info.email);
            info.email = info.email.take().map(|email| email.to_lowercase());
            trim_in_place(&mut info.project_details);
            info.phone = non_blank(info.phone.take());
            info.company = non_blank(info.company.take());
            info.timeline = non_blank(info.timeline.take());
        }
    }

    fn into_request(self) -> Option<CheckoutRequest> {
        let info = self.customer_info?;
        let budget = Budget::from_json(info.budget.as_ref()?).ok()?;

        Some(CheckoutRequest {
            service_id: self.service_id?,
            customer_info: CustomerInfo {
                name: info.name?,
                email: info.email?,
                phone: info.phone,
                company: info.company,
                project_details: info.project_details?,
                timeline: info.timeline,
                budget,
            },
            price_id: self.price_id,
        })
    }
}

/// Trim a required text field without dropping it
pub(crate) fn trim_in_place(field: &mut Option<String>) {
    if let Some(value) = field.as_mut() {
        let trimmed = value.trim();
        if trimmed.len() != value.len() {
            *value = trimmed.to_string();
        }
    }
}

/// Trim an optional text field, treating blank as absent
pub(crate) fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(rule("too_small", "must not be empty"))
    } else {
        Ok(())
    }
}

fn valid_budget(value: &Value) -> std::result::Result<(), ValidationError> {
    Budget::from_json(value).map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new(e.code());
        error.message = Some(e.to_string().into());
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "serviceId": "1",
            "customerInfo": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "projectDetails": "Need a full audit",
                "budget": 497
            }
        })
    }

    #[test]
    fn test_valid_request() {
        let request = validate_checkout(&valid_body()).unwrap();
        assert_eq!(request.service_id, "1");
        assert_eq!(request.customer_info.name, "Jane Doe");
        assert_eq!(request.customer_info.budget.minor_units(), 49_700);
        assert!(request.customer_info.phone.is_none());
        assert!(request.price_id.is_none());
    }

    #[test]
    fn test_optional_fields_kept_and_blank_dropped() {
        let mut body = valid_body();
        body["customerInfo"]["phone"] = json!("+1 555 0100");
        body["customerInfo"]["company"] = json!("   ");
        body["priceId"] = json!("price_123");

        let request = validate_checkout(&body).unwrap();
        assert_eq!(request.customer_info.phone.as_deref(), Some("+1 555 0100"));
        assert!(request.customer_info.company.is_none());
        assert_eq!(request.price_id.as_deref(), Some("price_123"));
    }

    #[test]
    fn test_missing_email() {
        let mut body = valid_body();
        body["customerInfo"].as_object_mut().unwrap().remove("email");

        let errors = validate_checkout(&body).unwrap_err();
        assert!(errors.has_field("customerInfo.email"));
    }

    #[test]
    fn test_malformed_email() {
        let mut body = valid_body();
        body["customerInfo"]["email"] = json!("not-an-email");

        let errors = validate_checkout(&body).unwrap_err();
        let issue = errors.for_field("customerInfo.email").next().unwrap();
        assert_eq!(issue.code, "email");
        assert_eq!(issue.message, "not a valid email address");
    }

    #[test]
    fn test_reports_every_violation() {
        let body = json!({
            "serviceId": "",
            "customerInfo": {
                "name": "  ",
                "email": "nope",
                "projectDetails": "",
                "budget": -5
            }
        });

        let errors = validate_checkout(&body).unwrap_err();
        for field in [
            "serviceId",
            "customerInfo.name",
            "customerInfo.email",
            "customerInfo.projectDetails",
            "customerInfo.budget",
        ] {
            assert!(errors.has_field(field), "missing issue for {field}");
        }
    }

    #[test]
    fn test_missing_customer_info() {
        let errors = validate_checkout(&json!({ "serviceId": "1" })).unwrap_err();
        assert!(errors.has_field("customerInfo"));
    }

    #[test]
    fn test_budget_rules() {
        for (budget, code) in [
            (json!(0), "too_small"),
            (json!(-10), "too_small"),
            (json!("497"), "invalid_type"),
            (json!(true), "invalid_type"),
            (json!(49.5), "not_whole"),
            (json!(u64::MAX), "too_big"),
        ] {
            let mut body = valid_body();
            body["customerInfo"]["budget"] = budget.clone();

            let errors = validate_checkout(&body).unwrap_err();
            let issue = errors.for_field("customerInfo.budget").next().unwrap();
            assert_eq!(issue.code, code, "budget {budget}");
        }
    }

    #[test]
    fn test_integral_float_budget() {
        let mut body = valid_body();
        body["customerInfo"]["budget"] = json!(297.0);

        let request = validate_checkout(&body).unwrap();
        assert_eq!(request.customer_info.budget.minor_units(), 29_700);
    }

    #[test]
    fn test_budget_limit() {
        assert!(Budget::new(MAX_BUDGET_UNITS).is_ok());
        assert_eq!(Budget::new(MAX_BUDGET_UNITS + 1), Err(BudgetError::TooLarge));
        assert_eq!(
            Budget::new(MAX_BUDGET_UNITS).unwrap().minor_units(),
            MAX_BUDGET_UNITS * 100
        );
    }

    #[test]
    fn test_non_object_body() {
        let errors = validate_checkout(&json!([1, 2, 3])).unwrap_err();
        assert!(errors.has_field("body"));
    }

    #[test]
    fn test_email_is_trimmed_and_lowercased() {
        let mut body = valid_body();
        body["customerInfo"]["email"] = json!("  Jane@Example.COM ");

        let request = validate_checkout(&body).unwrap();
        assert_eq!(request.customer_info.email, "jane@example.com");
    }

    #[test]
    fn test_numeric_service_id_names_the_field() {
        let mut body = valid_body();
        body["serviceId"] = json!(1);

        let errors = validate_checkout(&body).unwrap_err();
        let issues: Vec<_> = errors.for_field("serviceId").collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "invalid_type");
        assert_eq!(issues[0].message, "Expected string, received number");
        assert!(!errors.has_field("body"));
    }

    #[test]
    fn test_type_error_keeps_other_violations() {
        let mut body = valid_body();
        body["customerInfo"]["email"] = json!("not-an-email");
        body["customerInfo"]["phone"] = json!(5_551_234);

        let errors = validate_checkout(&body).unwrap_err();
        assert_eq!(errors.for_field("customerInfo.phone").next().unwrap().code, "invalid_type");
        assert_eq!(errors.for_field("customerInfo.email").next().unwrap().code, "email");
        assert!(!errors.has_field("body"));
    }

    #[test]
    fn test_customer_info_wrong_type() {
        let errors = validate_checkout(&json!({ "serviceId": "1", "customerInfo": "Jane" }))
            .unwrap_err();
        let issues: Vec<_> = errors.for_field("customerInfo").collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "invalid_type");
    }
}
