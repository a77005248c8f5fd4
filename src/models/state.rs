//! Channel state queries and their results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::ops::Index;

/// A read-only query against the HTTP API. Resolving it to a URL is the transport's job.
#[derive(Debug, Clone, PartialEq)]
pub enum StateQuery {
    /// All occupied channels, optionally filtered by name prefix.
    Channels {
        info: Vec<String>,
        filter_by_prefix: Option<String>,
    },
    /// One channel's state.
    Channel { name: String, info: Vec<String> },
    /// Users currently subscribed to a presence channel.
    PresenceUsers { channel: String },
}

/// Result of a state query, deserialized into the caller's type.
#[derive(Debug, Clone)]
pub struct GetResult<T> {
    pub status: u16,
    pub data: T,
}

/// Attributes of one channel as returned by the channels query.
pub type ChannelAttributes = Map<String, Value>;

/// `{"channels": {"<name>": {<attributes>}}}`, indexable by channel name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelsList {
    #[serde(default)]
    pub channels: HashMap<String, ChannelAttributes>,
}

impl ChannelsList {
    pub fn get(&self, name: &str) -> Option<&ChannelAttributes> {
        self.channels.get(name)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

impl Index<&str> for ChannelsList {
    type Output = ChannelAttributes;

    fn index(&self, name: &str) -> &Self::Output {
        &self.channels[name]
    }
}

/// One member of a presence channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceUser {
    pub id: String,
}

/// `{"users": [{"id": ..}, ..]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PresenceUsers {
    #[serde(default)]
    pub users: Vec<PresenceUser>,
}
