//! Error Types
//!
//! Field-level validation failures produced at the request boundary.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for validation
pub type Result<T> = std::result::Result<T, ValidationErrors>;

/// A single violated rule on a single field
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Dotted wire path of the field (e.g. `customerInfo.email`)
    pub field: String,

    /// Machine-readable rule name (`required`, `email`, `length`, ...)
    pub code: String,

    /// Human-readable explanation
    pub message: String,
}

impl FieldIssue {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found in one payload
///
/// Serializes as the bare list of issues.
#[derive(Clone, Debug, Default, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .issues.len())]
pub struct ValidationErrors {
    pub issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single issue for a payload serde could not even shape
    pub fn malformed(reason: impl std::fmt::Display) -> Self {
        Self {
            issues: vec![FieldIssue::new("body", "invalid_type", reason.to_string())],
        }
    }

    pub fn push(&mut self, issue: FieldIssue) {
        self.issues.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Issues reported against one field
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldIssue> + 'a {
        self.issues.iter().filter(move |issue| issue.field == field)
    }

    /// Whether any issue names this field
    pub fn has_field(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    /// Turn into `Err` when any issue was collected
    pub fn into_result<T>(mut self, value: T) -> Result<T> {
        if self.issues.is_empty() {
            Ok(value)
        } else {
            self.issues
                .sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
            Err(self)
        }
    }

    /// Report issues under a different field name
    pub fn rename_field(&mut self, from: &str, to: &str) {
        for issue in &mut self.issues {
            if issue.field == from {
                issue.field = to.to_string();
            }
        }
    }

    /// Flatten `validator` output into dotted field paths.
    ///
    /// Field names are rewritten to camelCase so the paths match the
    /// JSON the caller sent.
    pub fn collect_from(&mut self, prefix: &str, errors: &validator::ValidationErrors) {
        for (field, kind) in errors.errors() {
            let path = join_path(prefix, &camel_case(&field.to_string()));
            match kind {
                validator::ValidationErrorsKind::Field(list) => {
                    for error in list {
                        let message = error.message.as_ref().map_or_else(
                            || default_message(&error.code),
                            std::string::ToString::to_string,
                        );
                        self.push(FieldIssue::new(path.clone(), error.code.to_string(), message));
                    }
                }
                validator::ValidationErrorsKind::Struct(inner) => {
                    self.collect_from(&path, inner);
                }
                validator::ValidationErrorsKind::List(items) => {
                    for (index, inner) in items {
                        self.collect_from(&format!("{path}[{index}]"), inner);
                    }
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{prefix}.{field}")
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn default_message(code: &str) -> String {
    match code {
        "required" => "is required".into(),
        "email" => "not a valid email address".into(),
        "length" => "has an invalid length".into(),
        "range" => "is out of range".into(),
        other => format!("failed the {other} rule"),
    }
}
