//! Events and the trigger request bodies handed to the transport.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One event addressed to one channel, as used in batch triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub channel: String,
    pub name: String,
    pub data: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_id: Option<String>,
}

impl Event {
    pub fn new(
        channel: impl Into<String>,
        name: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            channel: channel.into(),
            name: name.into(),
            data,
            socket_id: None,
        }
    }

    /// Exclude the connection identified by `socket_id` from receiving this event.
    pub fn with_socket_id(mut self, socket_id: impl Into<String>) -> Self {
        self.socket_id = Some(socket_id.into());
        self
    }
}

/// Extra parameters for a single trigger call.
#[derive(Debug, Clone, Default)]
pub struct TriggerOptions {
    pub socket_id: Option<String>,
}

/// Body of a trigger on one or more channels. `data` is the already-serialized payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRequest {
    pub name: String,
    pub channels: Vec<String>,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_id: Option<String>,
}

/// One entry of a batch trigger body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEvent {
    pub channel: String,
    pub name: String,
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_id: Option<String>,
}

/// Body of a batch trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchTriggerRequest {
    pub batch: Vec<BatchEvent>,
}

/// Outcome of a successful trigger call.
#[derive(Debug, Clone)]
pub struct TriggerResult {
    pub status: u16,
    /// Channel name to event id, when the API returns them.
    pub event_ids: HashMap<String, String>,
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TriggerResponseBody {
    #[serde(default)]
    pub event_ids: HashMap<String, String>,
}
