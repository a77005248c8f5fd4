//! The outbound HTTP boundary.
//!
//! Request signing for outbound calls, URL construction, connection handling
//! and retries belong to implementations of [`Transport`]; the client only
//! hands over validated request bodies and queries.

use crate::error::PusherResult;
use crate::models::event::{BatchTriggerRequest, TriggerRequest};
use crate::models::state::StateQuery;
use async_trait::async_trait;

/// Raw response from the HTTP API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends validated requests to the HTTP API.
#[async_trait]
pub trait Transport: Send + Sync {
    /// `POST /apps/{app_id}/events`.
    async fn trigger(&self, request: &TriggerRequest) -> PusherResult<TransportResponse>;

    /// `POST /apps/{app_id}/batch_events`.
    async fn trigger_batch(&self, request: &BatchTriggerRequest)
        -> PusherResult<TransportResponse>;

    /// Channel and presence state queries.
    async fn get(&self, query: &StateQuery) -> PusherResult<TransportResponse>;
}
