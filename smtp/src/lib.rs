//! Outbound mail for contact submissions: message composition, transport
//! settings and the SMTP sender.

pub mod config;
pub mod email;
pub mod transport;

pub use config::{ConfigError, SmtpCredentials, TransportConfig};
pub use email::{OutboundEmail, ReplyTo};
pub use transport::{Mailer, SmtpMailer, TransportError, build_message};
