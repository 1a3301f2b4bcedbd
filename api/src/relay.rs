//! The contact relay: one request in, at most one email out.
//!
//! A submission moves `Received → Validated → Sent` and answers 200, or stops
//! at `Rejected` (405/400), or fails in the transport and answers a generic
//! 500. Nothing is retried; the visitor may resubmit.

use axum::http::Method;
use contact_smtp::{Mailer, OutboundEmail, TransportConfig};
use contact_types::{Field, SuccessResponse, Submission, ValidationError};
use email_address::EmailAddress;
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::error::RelayError;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully";

/// Sender and recipient of every relayed message.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub from: EmailAddress,
    pub to: EmailAddress,
}

impl From<&TransportConfig> for Envelope {
    fn from(config: &TransportConfig) -> Self {
        Self {
            from: config.from.clone(),
            to: config.to.clone(),
        }
    }
}

/// Reads a submission out of a JSON body. Anything that is not a JSON object
/// counts as an empty one, and non-string values count as missing.
pub fn parse_submission(body: &[u8]) -> Result<Submission, ValidationError> {
    let object: Map<String, Value> = serde_json::from_slice(body).unwrap_or_default();

    let take = |field: Field| {
        object
            .get(field.key())
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let submission = Submission {
        name: take(Field::Name),
        email: take(Field::Email),
        subject: take(Field::Subject),
        message: take(Field::Message),
    };

    submission.validate()?;
    Ok(submission)
}

pub async fn relay<M: Mailer>(
    mailer: &M,
    envelope: &Envelope,
    method: &Method,
    body: &[u8],
) -> Result<SuccessResponse, RelayError> {
    debug!(%method, bytes = body.len(), "Received submission");

    if *method != Method::POST {
        warn!(%method, "Rejected submission: method not allowed");
        return Err(RelayError::MethodNotAllowed);
    }

    let submission = parse_submission(body).map_err(|e| {
        warn!("Rejected submission: {e}");
        e
    })?;
    debug!("Submission validated");

    let email = OutboundEmail::compose(&submission, envelope.from.clone(), envelope.to.clone());

    if let Err(e) = mailer.send(&email).await {
        error!(error = %e, "Error sending contact email");
        return Err(e.into());
    }

    info!(
        name = %submission.name,
        email = %submission.email,
        subject = %submission.subject,
        timestamp = %chrono::Utc::now().to_rfc3339(),
        "Contact form submission received"
    );

    Ok(SuccessResponse {
        success: true,
        message: SUCCESS_MESSAGE.to_string(),
    })
}
