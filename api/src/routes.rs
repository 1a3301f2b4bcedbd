use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use contact_smtp::Mailer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{Instrument, info_span, warn};
use uuid::Uuid;

use crate::relay::{Envelope, relay};

pub const CONTACT_PATH: &str = "/api/contact";

pub struct RelayState<M> {
    pub mailer: Arc<M>,
    pub envelope: Arc<Envelope>,
}

impl<M> RelayState<M> {
    pub fn new(mailer: M, envelope: Envelope) -> Self {
        Self {
            mailer: Arc::new(mailer),
            envelope: Arc::new(envelope),
        }
    }
}

impl<M> Clone for RelayState<M> {
    fn clone(&self) -> Self {
        Self {
            mailer: self.mailer.clone(),
            envelope: self.envelope.clone(),
        }
    }
}

pub fn router<M: Mailer + 'static>(state: RelayState<M>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/readyz", get(|| async { "OK" }))
        .route("/livez", get(|| async { "OK" }))
        // Every method reaches the handler so that wrong verbs get the JSON 405.
        .route(CONTACT_PATH, any(contact::<M>))
        .layer(cors)
        .with_state(state)
}

async fn contact<M: Mailer + 'static>(
    State(state): State<RelayState<M>>,
    method: Method,
    body: Bytes,
) -> Response {
    let span = info_span!("submission", id = %Uuid::new_v4());

    match relay(state.mailer.as_ref(), &state.envelope, &method, &body)
        .instrument(span)
        .await
    {
        Ok(success) => (StatusCode::OK, Json(success)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Browser access to the relay. With no configured origins, any
/// `http://localhost:<port>` page may call it.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins = if allowed_origins.is_empty() {
        AllowOrigin::predicate(|origin, _request_head| {
            origin
                .to_str()
                .is_ok_and(|origin| origin.starts_with("http://localhost:"))
        })
    } else {
        let values: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|e| warn!("Ignoring invalid origin {origin:?}: {e}"))
                    .ok()
            })
            .collect();
        AllowOrigin::list(values)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60))
}
