use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use contact_smtp::TransportError;
use contact_types::{ErrorResponse, ValidationError};
use thiserror::Error;

/// Shown to callers for every transport failure; the real cause only goes to the log.
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again later.";

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RelayError::Invalid(_) => StatusCode::BAD_REQUEST,
            RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The text put in the response body.
    pub fn public_message(&self) -> String {
        match self {
            RelayError::Transport(_) => FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.public_message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_types::Field;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RelayError::MethodNotAllowed.status(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            RelayError::from(ValidationError::Required(Field::Name)).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::from(ValidationError::InvalidEmail).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_public_messages() {
        assert_eq!(
            RelayError::MethodNotAllowed.public_message(),
            "Method not allowed"
        );
        assert_eq!(
            RelayError::from(ValidationError::Required(Field::Email)).public_message(),
            "Missing required field: email"
        );
        assert_eq!(
            RelayError::from(ValidationError::InvalidEmail).public_message(),
            "Invalid email address"
        );
    }
}
