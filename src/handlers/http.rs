//! HTTP handlers: channel auth endpoint, webhook receiver and health.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::config::AppCredentials;
use crate::error::PusherError;
use crate::models::channel::ChannelType;
use crate::models::presence::{AuthenticationToken, PresenceChannelData};
use crate::models::webhook::WebhookVerification;
use crate::services::{AuthService, Signer, ValidationRules, Validator, WebhookService};

/// Shared state for the auth and webhook endpoints.
#[derive(Clone)]
pub struct AppState {
    pub app_key: String,
    pub auth_service: AuthService,
    pub webhook_service: WebhookService,
}

impl AppState {
    pub fn new(credentials: &AppCredentials, rules: ValidationRules) -> Self {
        let signer = Signer::from_credentials(credentials);
        Self {
            app_key: credentials.app_key.clone(),
            auth_service: AuthService::new(
                credentials.app_key.clone(),
                signer.clone(),
                Validator::new(rules),
            ),
            webhook_service: WebhookService::new(signer),
        }
    }

    pub fn auth_service(&self) -> &AuthService {
        &self.auth_service
    }
    pub fn webhook_service(&self) -> &WebhookService {
        &self.webhook_service
    }
}

const HEADER_PUSHER_KEY: &str = "x-pusher-key";
const HEADER_PUSHER_SIGNATURE: &str = "x-pusher-signature";

/// Form posted by the browser client when it subscribes to a private or presence channel.
///
/// `user_id` / `user_info` (JSON text) stand in for the application's own
/// session lookup and are only used for presence channels.
#[derive(Debug, Deserialize)]
pub struct ChannelAuthRequest {
    pub socket_id: String,
    pub channel_name: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_info: Option<String>,
}

/// POST /pusher/auth — sign a subscription for the requesting socket.
pub async fn channel_auth(
    State(state): State<AppState>,
    Form(req): Form<ChannelAuthRequest>,
) -> Result<Json<AuthenticationToken>, PusherError> {
    let presence = if ChannelType::from_name(&req.channel_name).requires_channel_data() {
        let user_id = req
            .user_id
            .ok_or(PusherError::MissingRequiredField("user_id"))?;
        let user_info = req
            .user_info
            .as_deref()
            .map(serde_json::from_str::<serde_json::Value>)
            .transpose()?;
        Some(PresenceChannelData::new(user_id, user_info))
    } else {
        None
    };

    let token =
        state
            .auth_service()
            .authenticate(&req.channel_name, &req.socket_id, presence.as_ref())?;
    Ok(Json(token))
}

/// POST /pusher/webhook — verify and accept a webhook delivery.
/// Requires header: x-pusher-signature: <hex hmac of raw body>.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<serde_json::Value>) {
    if let Some(key) = header_str(&headers, HEADER_PUSHER_KEY) {
        if key != state.app_key {
            warn!("webhook for a different app key");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "unknown x-pusher-key" })),
            );
        }
    }

    let signature = header_str(&headers, HEADER_PUSHER_SIGNATURE);
    match state.webhook_service().process(signature, &body) {
        WebhookVerification::Valid(hook) => {
            for event in &hook.events {
                info!(name = %event.name, channel = %event.channel, "webhook event");
            }
            (
                StatusCode::OK,
                Json(json!({ "ok": true, "events": hook.events.len() })),
            )
        }
        WebhookVerification::Invalid { errors } => {
            warn!(reasons = ?errors, "webhook rejected");
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": errors.join("; ") })),
            )
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "pusher-server" })),
    )
}
