//! Presence channel user data and the auth token returned to subscribers.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// User identity attached to a presence channel subscription.
///
/// Serialized once; that exact JSON string is both signed and returned as
/// `channel_data`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PresenceChannelData {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_info: Option<serde_json::Value>,
}

impl PresenceChannelData {
    pub fn new(user_id: impl Into<String>, user_info: Option<serde_json::Value>) -> Self {
        Self {
            user_id: user_id.into(),
            user_info,
        }
    }
}

/// Auth payload returned to a client subscribing to a private or presence channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationToken {
    /// `<app_key>:<hex hmac>`.
    pub auth: String,
    /// Presence user data JSON, exactly as signed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_data: Option<String>,
}

impl AuthenticationToken {
    /// JSON document sent back to the subscribing client.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
