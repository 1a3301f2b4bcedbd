use serde::{Deserialize, Serialize};

pub mod validate;

pub use validate::{Field, FieldKind, Validation, ValidationError, is_valid_email, validate_field};

/// Contact form data as it travels from the browser to the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl Submission {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// Runs every field through [`validate_field`]. Missing fields are
    /// reported before format errors, each in [`Field::ALL`] order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let results = Field::ALL.map(|field| validate_field(field, self.get(field)));

        let missing = results.iter().find_map(|result| match result {
            Validation::Invalid(e @ ValidationError::Required(_)) => Some(*e),
            _ => None,
        });
        if let Some(e) = missing {
            return Err(e);
        }

        results.into_iter().try_for_each(Validation::into_result)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> Submission {
        Submission {
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
        }
    }

    #[test]
    fn test_valid_submission() {
        assert_eq!(submission().validate(), Ok(()));
    }

    #[test]
    fn test_first_missing_field_is_reported() {
        let mut s = submission();
        s.subject = "  ".to_string();
        s.message = String::new();
        assert_eq!(s.validate(), Err(ValidationError::Required(Field::Subject)));
    }

    #[test]
    fn test_missing_field_wins_over_bad_email() {
        let mut s = submission();
        s.name = String::new();
        s.email = "nope".to_string();
        assert_eq!(s.validate(), Err(ValidationError::Required(Field::Name)));
    }

    #[test]
    fn test_later_missing_field_wins_over_bad_email() {
        let mut s = submission();
        s.email = "nope".to_string();
        s.message = " ".to_string();
        assert_eq!(s.validate(), Err(ValidationError::Required(Field::Message)));
    }

    #[test]
    fn test_bad_email() {
        let mut s = submission();
        s.email = "not-an-email".to_string();
        assert_eq!(s.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(submission()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Jo",
                "email": "jo@x.com",
                "subject": "Hi",
                "message": "Hello",
            })
        );

        let ok: SuccessResponse =
            serde_json::from_str(r#"{"success":true,"message":"sent"}"#).unwrap();
        assert!(ok.success);
        let err: ErrorResponse = serde_json::from_str(r#"{"error":"Method not allowed"}"#).unwrap();
        assert_eq!(err.error, "Method not allowed");
    }
}
