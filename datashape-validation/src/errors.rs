// Validation errors

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Error code and violation kind for a missing required field.
pub const REQUIRED: &str = "required";

/// One violation: a human message, a machine code and context.
///
/// Required-field violations carry `property` (field name) and `error`
/// (violation kind) in their context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub message: String,
    pub code: String,
    pub context: BTreeMap<String, String>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            context: BTreeMap::new(),
        }
    }

    /// Missing required field `property`.
    pub fn required(
        property: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::new(message, code)
            .with_context("property", property)
            .with_context("error", REQUIRED)
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Field the error refers to.
    pub fn property(&self) -> Option<&str> {
        self.context.get("property").map(String::as_str)
    }

    /// Violation kind, e.g. `"required"`.
    pub fn kind(&self) -> Option<&str> {
        self.context.get("error").map(String::as_str)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.property() {
            Some(property) => write!(f, "{}: {}", property, self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Ordered outcome of a validation pass. No errors means success.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Errors whose `property` is `field`.
    pub fn get_field_errors(&self, field: &str) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|e| e.property() == Some(field))
            .collect()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.code.as_str()).collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.errors.iter().map(|e| {
                serde_json::json!({
                    "message": e.message,
                    "code": e.code,
                    "context": e.context,
                })
            }).collect::<Vec<_>>()
        })
    }

    /// `Ok(())` on success, otherwise the result itself as the error.
    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.is_success() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationResult {}

impl From<Vec<ValidationError>> for ValidationResult {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }
}

impl<'a> IntoIterator for &'a ValidationResult {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_error_context() {
        let error = ValidationError::required("email", "Field \"email\" is required", REQUIRED);
        assert_eq!(error.property(), Some("email"));
        assert_eq!(error.kind(), Some("required"));
        assert_eq!(error.to_string(), "email: Field \"email\" is required");
    }

    #[test]
    fn test_result_accessors() {
        let mut result = ValidationResult::new();
        assert!(result.is_success());

        result.add(ValidationError::required("name", "missing", "required"));
        result.add(ValidationError::required("email", "missing", "email_code"));

        assert_eq!(result.len(), 2);
        assert_eq!(result.codes(), vec!["required", "email_code"]);
        assert_eq!(result.get_field_errors("email").len(), 1);
        assert!(result.clone().into_result().is_err());
    }

    #[test]
    fn test_to_json() {
        let result = ValidationResult::from(vec![ValidationError::required("name", "missing", "required")]);
        let json = result.to_json();
        assert_eq!(json["errors"][0]["context"]["property"], "name");
        assert_eq!(json["errors"][0]["code"], "required");
    }
}
