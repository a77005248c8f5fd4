//! Server-side client for the Pusher Channels HTTP API.
//!
//! Validates channel names, socket ids and event batches, signs private and
//! presence channel subscriptions, verifies inbound webhooks, and hands
//! trigger and state requests to a pluggable [`Transport`]. Also provides an
//! axum router exposing the auth and webhook endpoints an app backend needs.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod transport;

pub use client::Pusher;
pub use config::{AppCredentials, Config, PusherOptions};
pub use error::{PusherError, PusherResult};
pub use handlers::http::AppState;
pub use services::{AuthService, Signer, TriggerService, Validator, WebhookService};
pub use transport::{Transport, TransportResponse};

use axum::routing::{get, post};
use handlers::http;
use tower_http::trace::TraceLayer;

/// Build the router (auth, webhook, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/pusher/auth", post(http::channel_auth))
        .route("/pusher/webhook", post(http::webhook))
        .route("/health", get(http::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
