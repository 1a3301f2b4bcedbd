//! Outbound transport settings, read once from the environment.
//!
//! | Variable        | Default                 |
//! |-----------------|-------------------------|
//! | `SMTP_HOST`     | `smtp.gmail.com`        |
//! | `SMTP_PORT`     | `587`                   |
//! | `SMTP_SECURE`   | `false`                 |
//! | `SMTP_USER`     | none, auth is skipped   |
//! | `SMTP_PASS`     | none                    |
//! | `SMTP_FROM`     | `portfolio@example.com` |
//! | `CONTACT_EMAIL` | `contact@example.com`   |

use std::fmt;
use std::str::FromStr;

use email_address::EmailAddress;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_PORT: u16 = 587;
pub const DEFAULT_FROM: &str = "portfolio@example.com";
pub const DEFAULT_RECIPIENT: &str = "contact@example.com";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid port number, got {value:?}")]
    InvalidPort { key: &'static str, value: String },

    #[error("{key} must be a valid email address, got {value:?}: {reason}")]
    InvalidAddress {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct SmtpCredentials {
    pub user: String,
    pub pass: String,
}

impl fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS from the first byte. When false, STARTTLS is used if the
    /// server offers it.
    pub secure: bool,
    pub credentials: Option<SmtpCredentials>,
    /// Envelope sender.
    pub from: EmailAddress,
    /// Where contact messages are delivered.
    pub to: EmailAddress,
}

impl TransportConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values are
    /// treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = var("SMTP_HOST").unwrap_or_else(|| {
            info!("SMTP_HOST not set, using default: {DEFAULT_HOST}");
            DEFAULT_HOST.to_string()
        });

        let port = match var("SMTP_PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort {
                    key: "SMTP_PORT",
                    value,
                })?,
            None => {
                info!("SMTP_PORT not set, using default: {DEFAULT_PORT}");
                DEFAULT_PORT
            }
        };

        let secure = var("SMTP_SECURE").is_some_and(|v| v.trim() == "true");

        let credentials = match (var("SMTP_USER"), var("SMTP_PASS")) {
            (Some(user), pass) => Some(SmtpCredentials {
                user,
                pass: pass.unwrap_or_default(),
            }),
            (None, Some(_)) => {
                warn!("SMTP_PASS is set without SMTP_USER, connecting without authentication");
                None
            }
            (None, None) => {
                warn!("SMTP_USER not set, connecting without authentication");
                None
            }
        };

        let from = address(&var, "SMTP_FROM", DEFAULT_FROM)?;
        let to = address(&var, "CONTACT_EMAIL", DEFAULT_RECIPIENT)?;

        Ok(Self {
            host,
            port,
            secure,
            credentials,
            from,
            to,
        })
    }
}

fn address<F>(var: &F, key: &'static str, default: &str) -> Result<EmailAddress, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    EmailAddress::from_str(value.trim()).map_err(|e| ConfigError::InvalidAddress {
        key,
        reason: e.to_string(),
        value,
    })
}
