//! Channel types and naming conventions.

use serde::{Deserialize, Serialize};

const PRIVATE_PREFIX: &str = "private-";
const PRESENCE_PREFIX: &str = "presence-";

/// Channel type based on prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Public channel: anyone may subscribe.
    Public,
    /// Private channel: subscription needs a signed auth token.
    Private,
    /// Presence channel: signed auth token carrying user data.
    Presence,
}

impl ChannelType {
    /// Derive channel type from name: `private-*`, `presence-*`, anything else is public.
    pub fn from_name(name: &str) -> Self {
        if name.starts_with(PRESENCE_PREFIX) {
            ChannelType::Presence
        } else if name.starts_with(PRIVATE_PREFIX) {
            ChannelType::Private
        } else {
            ChannelType::Public
        }
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self, ChannelType::Private | ChannelType::Presence)
    }

    /// Presence subscriptions must sign user data alongside the socket and channel.
    pub fn requires_channel_data(&self) -> bool {
        matches!(self, ChannelType::Presence)
    }
}
