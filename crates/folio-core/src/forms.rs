//! Contact and Newsletter Forms
//!
//! Same boundary as checkout: raw JSON in, typed submission or full list of
//! violations out.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

use crate::checkout::{non_blank, rule, trim_in_place};
use crate::error::{Result, ValidationErrors};
use crate::wire::WireObject;

/// Newsletter audience
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    Journalism,
    Ecommerce,
}

impl SubscriptionType {
    pub const ALL: [Self; 2] = [Self::Journalism, Self::Ecommerce];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Journalism => "journalism",
            Self::Ecommerce => "ecommerce",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl std::fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated contact form submission
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,

    /// Free-form inquiry category (`general`, `consulting`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// A validated newsletter signup
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewsletterSignup {
    /// Trimmed, lowercased address
    pub email: String,

    #[serde(rename = "type")]
    pub subscription_type: SubscriptionType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl NewsletterSignup {
    /// Where the signup came from, `website` when not given
    pub fn source_or_default(&self) -> &str {
        self.source.as_deref().unwrap_or("website")
    }
}

pub fn validate_contact(body: &Value) -> Result<ContactSubmission> {
    let mut wire = WireObject::root(body)?;
    let mut raw = RawContact {
        name: wire.text("name"),
        email: wire.text("email"),
        subject: wire.text("subject"),
        message: wire.text("message"),
        kind: wire.text("type"),
    };
    trim_in_place(&mut raw.name);
    trim_in_place(&mut raw.email);
    trim_in_place(&mut raw.subject);
    trim_in_place(&mut raw.message);
    raw.kind = non_blank(raw.kind.take());

    let mut errors = ValidationErrors::new();
    if let Err(e) = raw.validate() {
        errors.collect_from("", &e);
    }
    wire.report(&mut errors);
    errors.into_result(())?;

    raw.into_submission()
        .ok_or_else(|| ValidationErrors::malformed("incomplete contact payload"))
}

pub fn validate_newsletter(body: &Value) -> Result<NewsletterSignup> {
    let mut wire = WireObject::root(body)?;
    let mut raw = RawNewsletter {
        email: wire.text("email"),
        kind: wire.text("type"),
        source: wire.text("source"),
    };
    trim_in_place(&mut raw.email);
    trim_in_place(&mut raw.kind);
    raw.source = non_blank(raw.source.take());

    let mut errors = ValidationErrors::new();
    if let Err(e) = raw.validate() {
        errors.collect_from("", &e);
    }
    errors.rename_field("kind", "type");
    wire.report(&mut errors);
    errors.into_result(())?;

    raw.into_signup()
        .ok_or_else(|| ValidationErrors::malformed("incomplete newsletter payload"))
}

#[derive(Debug, Validate)]
struct RawContact {
    #[validate(
        required(message = "Name is required"),
        length(min = 2, message = "Name must be at least 2 characters")
    )]
    name: Option<String>,

    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email address")
    )]
    email: Option<String>,

    #[validate(
        required(message = "Subject is required"),
        length(min = 5, message = "Subject must be at least 5 characters")
    )]
    subject: Option<String>,

    #[validate(
        required(message = "Message is required"),
        length(min = 10, message = "Message must be at least 10 characters")
    )]
    message: Option<String>,

    kind: Option<String>,
}

#[derive(Debug, Validate)]
struct RawNewsletter {
    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email address")
    )]
    email: Option<String>,

    #[validate(
        required(message = "Subscription type is required"),
        custom(function = "known_subscription_type")
    )]
    kind: Option<String>,

    source: Option<String>,
}

impl RawContact {
    fn into_submission(self) -> Option<ContactSubmission> {
        Some(ContactSubmission {
            name: self.name?,
            email: self.email?,
            subject: self.subject?,
            message: self.message?,
            kind: self.kind,
        })
    }
}

impl RawNewsletter {
    fn into_signup(self) -> Option<NewsletterSignup> {
        Some(NewsletterSignup {
            subscription_type: SubscriptionType::parse(self.kind.as_deref()?)?,
            email: self.email?.to_lowercase(),
            source: self.source,
        })
    }
}

fn known_subscription_type(value: &str) -> std::result::Result<(), ValidationError> {
    if SubscriptionType::parse(value).is_some() {
        Ok(())
    } else {
        Err(rule(
            "invalid_enum_value",
            "Invalid option: expected 'journalism' | 'ecommerce'",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn contact_body() -> Value {
        json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "subject": "Audit inquiry",
            "message": "I would like to book an audit next month."
        })
    }

    #[test]
    fn test_valid_contact() {
        let submission = validate_contact(&contact_body()).unwrap();
        assert_eq!(submission.subject, "Audit inquiry");
        assert!(submission.kind.is_none());
    }

    #[test]
    fn test_short_subject() {
        let mut body = contact_body();
        body["subject"] = json!("Hey");

        let errors = validate_contact(&body).unwrap_err();
        let issue = errors.for_field("subject").next().unwrap();
        assert_eq!(issue.code, "length");
        assert_eq!(issue.message, "Subject must be at least 5 characters");
    }

    #[test]
    fn test_contact_reports_all_fields() {
        let errors = validate_contact(&json!({ "name": "J" })).unwrap_err();
        for field in ["name", "email", "subject", "message"] {
            assert!(errors.has_field(field), "missing issue for {field}");
        }
    }

    #[test]
    fn test_contact_length_counts_chars() {
        // 4 chars, 5 bytes
        let mut body = contact_body();
        body["subject"] = json!("Zoë!");
        let errors = validate_contact(&body).unwrap_err();
        assert_eq!(errors.for_field("subject").next().unwrap().code, "length");

        body["subject"] = json!("Zoë!!");
        assert!(validate_contact(&body).is_ok());
    }

    #[test]
    fn test_contact_type_error_keeps_other_violations() {
        let mut body = contact_body();
        body["name"] = json!(42);
        body["email"] = json!("not-an-email");

        let errors = validate_contact(&body).unwrap_err();
        let name: Vec<_> = errors.for_field("name").collect();
        assert_eq!(name.len(), 1);
        assert_eq!(name[0].code, "invalid_type");
        assert!(errors.has_field("email"));
        assert!(!errors.has_field("body"));
    }

    #[test]
    fn test_newsletter_type_wrong_json_type() {
        let errors = validate_newsletter(&json!({ "email": "jane@example.com", "type": 1 }))
            .unwrap_err();
        let issues: Vec<_> = errors.for_field("type").collect();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "Expected string, received number");
    }

    #[test]
    fn test_valid_newsletter() {
        let signup = validate_newsletter(&json!({
            "email": " Jane@Example.com ",
            "type": "journalism"
        }))
        .unwrap();

        assert_eq!(signup.email, "jane@example.com");
        assert_eq!(signup.subscription_type, SubscriptionType::Journalism);
        assert_eq!(signup.source_or_default(), "website");
    }

    #[test]
    fn test_unknown_subscription_type() {
        let errors = validate_newsletter(&json!({
            "email": "jane@example.com",
            "type": "sports"
        }))
        .unwrap_err();

        assert!(errors.has_field("type"));
        assert!(!errors.has_field("kind"));
    }

    #[test]
    fn test_newsletter_bad_email() {
        let errors = validate_newsletter(&json!({
            "email": "not-an-email",
            "type": "ecommerce"
        }))
        .unwrap_err();

        assert_eq!(
            errors.for_field("email").next().unwrap().message,
            "Invalid email address"
        );
    }
}
