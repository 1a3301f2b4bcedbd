use std::future::Future;

use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;
use tracing::debug;

use crate::config::TransportConfig;
use crate::email::{OutboundEmail, display_name};

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

pub trait Mailer: Send + Sync {
    /// Delivers one message. Implementations must not hold a connection open
    /// past the returned future.
    fn send(&self, email: &OutboundEmail) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Sends through an SMTP relay. Built without lettre's connection pool, so
/// every [`Mailer::send`] opens its own connection and closes it before
/// returning, on success and on error alike.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)?
        } else {
            let tls = TlsParameters::new(config.host.clone())?;
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .tls(Tls::Opportunistic(tls))
        };

        let mut builder = builder.port(config.port);
        if let Some(creds) = &config.credentials {
            builder = builder.credentials(Credentials::new(creds.user.clone(), creds.pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), TransportError> {
        let message = build_message(email)?;
        self.transport.send(message).await?;
        debug!("SMTP relay accepted message");
        Ok(())
    }
}

/// Renders an [`OutboundEmail`] as a multipart lettre message.
pub fn build_message(email: &OutboundEmail) -> Result<Message, TransportError> {
    let from: Address = email.from.as_str().parse()?;
    let to: Address = email.to.as_str().parse()?;

    let mut builder = Message::builder()
        .from(Mailbox::new(None, from))
        .to(Mailbox::new(None, to))
        .subject(email.subject.clone());

    if let Some(reply_to) = &email.reply_to {
        // Lettre is stricter than the relay; drop the header rather than the message.
        if let Ok(address) = reply_to.address.as_str().parse::<Address>() {
            // Mailbox headers cannot carry line breaks.
            let name = Some(display_name(&reply_to.name)).filter(|n| !n.is_empty());
            builder = builder.reply_to(Mailbox::new(name, address));
        }
    }

    let message = builder.multipart(MultiPart::alternative_plain_html(
        email.text_body.clone(),
        email.html_body.clone(),
    ))?;

    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_types::Submission;
    use email_address::EmailAddress;

    fn outbound() -> OutboundEmail {
        OutboundEmail::compose(
            &Submission {
                name: "Jo".to_string(),
                email: "jo@x.com".to_string(),
                subject: "Hi".to_string(),
                message: "Hello".to_string(),
            },
            EmailAddress::new_unchecked("portfolio@example.com"),
            EmailAddress::new_unchecked("contact@example.com"),
        )
    }

    #[test]
    fn test_build_message_headers() {
        let message = build_message(&outbound()).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(raw.contains("From: portfolio@example.com"));
        assert!(raw.contains("To: contact@example.com"));
        assert!(raw.contains("Subject: New Contact Form Submission: Hi"));
        assert!(raw.contains("Reply-To:"));
        assert!(raw.contains("<jo@x.com>"));
        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
    }

    #[test]
    fn test_build_message_without_reply_to() {
        let mut email = outbound();
        email.reply_to = None;

        let message = build_message(&email).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();

        assert!(!raw.contains("Reply-To"));
    }

    #[test]
    fn test_reply_to_name_with_line_breaks() {
        for name in ["Jo\nBo", "Jo\rBo", "Jo\r\nBo"] {
            let mut email = outbound();
            if let Some(reply_to) = email.reply_to.as_mut() {
                reply_to.name = name.to_string();
            }

            let message = build_message(&email).unwrap();
            let raw = String::from_utf8(message.formatted()).unwrap();

            assert!(raw.contains("Jo Bo"), "{name:?}");
            assert!(raw.contains("<jo@x.com>"), "{name:?}");
        }
    }

    #[test]
    fn test_bad_sender_is_a_transport_error() {
        let mut email = outbound();
        email.from = EmailAddress::new_unchecked("not an address");

        let err = build_message(&email).unwrap_err();
        assert!(matches!(err, TransportError::Address(_)));
    }
}
