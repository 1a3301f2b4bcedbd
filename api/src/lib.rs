//! HTTP side of the contact relay.
//!
//! `POST /api/contact` takes a JSON [`contact_types::Submission`], checks it
//! with the same rules the browser form uses and hands an
//! [`contact_smtp::OutboundEmail`] to a [`contact_smtp::Mailer`].
//!
//! | Status | Body                                        |
//! |--------|---------------------------------------------|
//! | 200    | `{ "success": true, "message": "..." }`     |
//! | 400    | `{ "error": "Missing required field: x" }` or `{ "error": "Invalid email address" }` |
//! | 405    | `{ "error": "Method not allowed" }`         |
//! | 500    | `{ "error": "Failed to send message. ..." }` |

pub mod config;
pub mod error;
pub mod relay;
pub mod routes;

pub use config::{ServerConfig, ServerConfigError};
pub use error::RelayError;
pub use relay::{Envelope, parse_submission, relay};
pub use routes::{CONTACT_PATH, RelayState, cors_layer, router};
