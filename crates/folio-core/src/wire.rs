//! Field-by-field reading of untyped JSON objects
//!
//! A wrong JSON type on one field is reported on that field's path and the
//! field is treated as absent, so the remaining rules still run.

use serde_json::{Map, Value};

use crate::error::{FieldIssue, Result, ValidationErrors};

/// One JSON object being read under a dotted path prefix
pub(crate) struct WireObject<'a> {
    object: &'a Map<String, Value>,
    prefix: String,
    mismatches: Vec<FieldIssue>,
}

impl<'a> WireObject<'a> {
    /// The request body itself; anything but an object is malformed
    pub(crate) fn root(body: &'a Value) -> Result<Self> {
        match body {
            Value::Object(object) => Ok(Self::new(object, String::new())),
            other => Err(ValidationErrors::malformed(format!(
                "Expected object, received {}",
                type_name(other)
            ))),
        }
    }

    fn new(object: &'a Map<String, Value>, prefix: String) -> Self {
        Self {
            object,
            prefix,
            mismatches: Vec::new(),
        }
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }

    fn present(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|value| !value.is_null())
    }

    fn mismatch(&mut self, key: &str, expected: &str, found: &Value) {
        let message = format!("Expected {expected}, received {}", type_name(found));
        self.mismatches
            .push(FieldIssue::new(self.path(key), "invalid_type", message));
    }

    /// A string field. `null` and absent both read as `None`.
    pub(crate) fn text(&mut self, key: &str) -> Option<String> {
        match self.present(key)? {
            Value::String(text) => Some(text.clone()),
            other => {
                self.mismatch(key, "string", other);
                None
            }
        }
    }

    /// A field of any type, left for a custom rule to judge
    pub(crate) fn value(&self, key: &str) -> Option<Value> {
        self.present(key).cloned()
    }

    /// A nested object, read under `prefix.key`
    pub(crate) fn object(&mut self, key: &str) -> Option<WireObject<'a>> {
        match self.present(key)? {
            Value::Object(object) => Some(WireObject::new(object, self.path(key))),
            other => {
                self.mismatch(key, "object", other);
                None
            }
        }
    }

    /// Move type errors into `errors`. Issues other rules raised on a
    /// mistyped field (usually `required`) are replaced by the type error.
    pub(crate) fn report(self, errors: &mut ValidationErrors) {
        for mismatch in self.mismatches {
            errors.issues.retain(|issue| issue.field != mismatch.field);
            errors.push(mismatch);
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_reads_strings_and_flags_others() {
        let body = json!({ "name": "Jane", "phone": 5_551_234, "company": null });
        let mut wire = WireObject::root(&body).unwrap();

        assert_eq!(wire.text("name").as_deref(), Some("Jane"));
        assert_eq!(wire.text("phone"), None);
        assert_eq!(wire.text("company"), None);
        assert_eq!(wire.text("missing"), None);

        let mut errors = ValidationErrors::new();
        wire.report(&mut errors);
        assert_eq!(errors.len(), 1);
        let issue = &errors.issues[0];
        assert_eq!(issue.field, "phone");
        assert_eq!(issue.code, "invalid_type");
        assert_eq!(issue.message, "Expected string, received number");
    }

    #[test]
    fn test_nested_paths() {
        let body = json!({ "customerInfo": { "email": ["a"] } });
        let mut root = WireObject::root(&body).unwrap();
        let mut info = root.object("customerInfo").unwrap();
        assert_eq!(info.text("email"), None);

        let mut errors = ValidationErrors::new();
        errors.push(FieldIssue::new("customerInfo.email", "required", "is required"));
        info.report(&mut errors);
        root.report(&mut errors);

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.issues[0].field, "customerInfo.email");
        assert_eq!(errors.issues[0].code, "invalid_type");
    }

    #[test]
    fn test_root_must_be_object() {
        let errors = WireObject::root(&json!("text")).err().unwrap();
        assert!(errors.has_field("body"));
    }
}
