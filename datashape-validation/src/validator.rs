// Required field validation

use crate::localizer::{FIELD_REQUIRED, FIELD_WITH_KEY_REQUIRED};
use crate::{FieldDescriptor, Localizer, REQUIRED, Request, ValidationError, ValidationResult};
use datashape_log::debug;

/// Checks a request's required fields in one pass.
///
/// Every missing field produces one error, in declaration order; the pass
/// never stops early.
pub struct RequiredFieldValidator<'a> {
    localizer: &'a dyn Localizer,
}

impl<'a> RequiredFieldValidator<'a> {
    pub fn new(localizer: &'a dyn Localizer) -> Self {
        Self { localizer }
    }

    pub fn validate<R: Request>(&self, request: &R) -> ValidationResult {
        let schema = R::schema();
        if let Some(source) = schema.source() {
            self.localizer.load_messages(source);
        }

        let mut result = ValidationResult::new();

        for field in schema.required_fields() {
            if !request.is_missing(field.name()) {
                continue;
            }

            let code = request
                .error_code_for(field.name())
                .or_else(|| field.code().map(str::to_string))
                .unwrap_or_else(|| REQUIRED.to_string());

            result.add(ValidationError::required(
                field.name(),
                self.message_for(field),
                code,
            ));
        }

        debug!(target: "datashape::validation", "required fields checked";
            request = std::any::type_name::<R>(), errors = result.len());

        result
    }

    fn message_for(&self, field: &FieldDescriptor) -> String {
        let localized = match field.key() {
            Some(key) => self
                .localizer
                .message(FIELD_WITH_KEY_REQUIRED, &[("key", key)]),
            None => self.localizer.message(FIELD_REQUIRED, &[]),
        };

        localized.unwrap_or_else(|| format!("Field \"{}\" is required", field.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NoMessages, RequestSchema};
    use std::cell::RefCell;

    struct Signup {
        email: Option<String>,
        name: Option<String>,
        tags: Vec<String>,
    }

    impl Request for Signup {
        fn schema() -> RequestSchema {
            RequestSchema::new()
                .with_source("signup")
                .field(FieldDescriptor::required("email").with_key("E-mail"))
                .field(FieldDescriptor::required("name"))
                .field(FieldDescriptor::required("tags").with_code("tags_empty"))
        }

        fn is_missing(&self, field: &str) -> bool {
            use crate::FieldPresence;

            match field {
                "email" => self.email.is_missing(),
                "name" => self.name.is_missing(),
                "tags" => self.tags.is_missing(),
                _ => false,
            }
        }

        fn error_code_for(&self, field: &str) -> Option<String> {
            (field == "name").then(|| "name_code".to_string())
        }
    }

    #[derive(Default)]
    struct Recording {
        sources: RefCell<Vec<String>>,
    }

    impl Localizer for Recording {
        fn load_messages(&self, source: &str) {
            self.sources.borrow_mut().push(source.to_string());
        }

        fn message(&self, key: &str, args: &[(&str, &str)]) -> Option<String> {
            match key {
                FIELD_WITH_KEY_REQUIRED => Some(format!("{} is required", args[0].1)),
                _ => None,
            }
        }
    }

    #[test]
    fn test_collects_every_missing_field_in_order() {
        let request = Signup {
            email: None,
            name: None,
            tags: vec![],
        };

        let result = RequiredFieldValidator::new(&NoMessages).validate(&request);

        assert_eq!(result.len(), 3);
        let properties: Vec<_> = result.errors().iter().filter_map(ValidationError::property).collect();
        assert_eq!(properties, vec!["email", "name", "tags"]);
        assert_eq!(result.codes(), vec!["required", "name_code", "tags_empty"]);
        assert_eq!(result.errors()[1].message, "Field \"name\" is required");
    }

    #[test]
    fn test_present_values_pass() {
        let request = Signup {
            email: Some(String::new()),
            name: Some("Ann".to_string()),
            tags: vec!["a".to_string()],
        };

        assert!(RequiredFieldValidator::new(&NoMessages).validate(&request).is_success());
    }

    #[test]
    fn test_localized_messages_and_source_loading() {
        let localizer = Recording::default();
        let request = Signup {
            email: None,
            name: None,
            tags: vec!["x".to_string()],
        };

        let result = RequiredFieldValidator::new(&localizer).validate(&request);

        assert_eq!(localizer.sources.borrow().as_slice(), ["signup".to_string()]);
        assert_eq!(result.messages(), vec!["E-mail is required", "Field \"name\" is required"]);
    }
}
