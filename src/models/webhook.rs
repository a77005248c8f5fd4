//! Inbound webhook payloads and the verification outcome.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One event in a webhook delivery (`channel_occupied`, `member_added`, `client_event`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    pub name: String,
    pub channel: String,
    /// Client event name, for `client_event`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// A verified webhook body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebHook {
    pub time_ms: i64,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

impl WebHook {
    /// Delivery time reported by the service.
    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.time_ms).single()
    }
}

/// Result of checking an inbound webhook.
///
/// A bad signature is an expected outcome for untrusted input, so it is a
/// variant here rather than an error. The parsed body is only reachable
/// through `Valid`.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookVerification {
    Valid(WebHook),
    Invalid { errors: Vec<String> },
}

impl WebhookVerification {
    pub fn is_valid(&self) -> bool {
        matches!(self, WebhookVerification::Valid(_))
    }

    pub fn webhook(&self) -> Option<&WebHook> {
        match self {
            WebhookVerification::Valid(hook) => Some(hook),
            WebhookVerification::Invalid { .. } => None,
        }
    }

    /// Events of a valid delivery; empty when invalid.
    pub fn events(&self) -> &[WebhookEvent] {
        self.webhook().map(|h| h.events.as_slice()).unwrap_or(&[])
    }

    pub fn errors(&self) -> &[String] {
        match self {
            WebhookVerification::Valid(_) => &[],
            WebhookVerification::Invalid { errors } => errors,
        }
    }
}
