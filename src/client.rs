//! `Pusher`: the entry point tying credentials, options, services and a transport together.

use crate::config::{AppCredentials, PusherOptions};
use crate::error::{PusherError, PusherResult};
use crate::models::channel::ChannelType;
use crate::models::event::{Event, TriggerOptions, TriggerResponseBody, TriggerResult};
use crate::models::presence::{AuthenticationToken, PresenceChannelData};
use crate::models::state::{GetResult, StateQuery};
use crate::models::webhook::WebhookVerification;
use crate::services::{
    AuthService, Signer, TriggerService, ValidationRules, Validator, WebhookService,
};
use crate::transport::{Transport, TransportResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Server-side client for one app.
///
/// Cheap to clone and safe to share across tasks: it only holds configuration.
#[derive(Clone)]
pub struct Pusher {
    credentials: AppCredentials,
    options: PusherOptions,
    validator: Validator,
    auth: AuthService,
    webhooks: WebhookService,
    triggers: TriggerService,
    transport: Arc<dyn Transport>,
}

impl Pusher {
    /// Uses the service's default limits plus the batch data limit from `options`.
    pub fn new(
        credentials: AppCredentials,
        options: PusherOptions,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let rules = ValidationRules {
            batch_event_data_size_limit: options.batch_event_data_size_limit(),
            ..ValidationRules::default()
        };
        Self::with_rules(credentials, options, rules, transport)
    }

    pub fn with_rules(
        credentials: AppCredentials,
        options: PusherOptions,
        rules: ValidationRules,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let validator = Validator::new(rules);
        let signer = Signer::from_credentials(&credentials);
        Self {
            auth: AuthService::new(
                credentials.app_key.clone(),
                signer.clone(),
                validator.clone(),
            ),
            webhooks: WebhookService::new(signer),
            triggers: TriggerService::new(validator.clone()),
            validator,
            credentials,
            options,
            transport,
        }
    }

    pub fn credentials(&self) -> &AppCredentials {
        &self.credentials
    }

    pub fn options(&self) -> &PusherOptions {
        &self.options
    }

    pub fn auth_service(&self) -> &AuthService {
        &self.auth
    }

    pub fn webhook_service(&self) -> &WebhookService {
        &self.webhooks
    }

    /// Trigger `event_name` with `data` on every channel in `channels`.
    #[instrument(skip(self, data, options), fields(app_id = %self.credentials.app_id))]
    pub async fn trigger<T>(
        &self,
        channels: &[&str],
        event_name: &str,
        data: &T,
        options: TriggerOptions,
    ) -> PusherResult<TriggerResult>
    where
        T: Serialize + ?Sized,
    {
        let request =
            self.triggers
                .build(channels, event_name, data, options.socket_id.as_deref())?;
        let response = self.transport.trigger(&request).await?;
        let result = trigger_result(response)?;
        info!(channels = channels.len(), event = %event_name, status = result.status, "triggered");
        Ok(result)
    }

    /// Trigger up to ten events in one call.
    #[instrument(skip(self, events), fields(app_id = %self.credentials.app_id, events = events.len()))]
    pub async fn trigger_batch(&self, events: &[Event]) -> PusherResult<TriggerResult> {
        let request = self.triggers.build_batch(events)?;
        let response = self.transport.trigger_batch(&request).await?;
        let result = trigger_result(response)?;
        info!(events = events.len(), status = result.status, "batch triggered");
        Ok(result)
    }

    /// Auth token for a private channel subscription.
    pub fn authenticate(&self, channel: &str, socket_id: &str) -> PusherResult<AuthenticationToken> {
        self.auth.authenticate(channel, socket_id, None)
    }

    /// Auth token for a presence channel subscription.
    pub fn authenticate_presence(
        &self,
        channel: &str,
        socket_id: &str,
        data: &PresenceChannelData,
    ) -> PusherResult<AuthenticationToken> {
        self.auth.authenticate(channel, socket_id, Some(data))
    }

    /// Verify an inbound webhook from its signature header and raw body.
    pub fn process_webhook(&self, signature: Option<&str>, raw_body: &[u8]) -> WebhookVerification {
        self.webhooks.process(signature, raw_body)
    }

    #[instrument(skip(self), fields(app_id = %self.credentials.app_id))]
    pub async fn fetch_state_for_channel<T: DeserializeOwned>(
        &self,
        channel: &str,
        info: &[&str],
    ) -> PusherResult<GetResult<T>> {
        self.validator.validate_channel_name(channel)?;
        self.get(StateQuery::Channel {
            name: channel.to_string(),
            info: info.iter().map(|s| s.to_string()).collect(),
        })
        .await
    }

    /// An empty `filter_by_prefix` is the same as no filter.
    #[instrument(skip(self), fields(app_id = %self.credentials.app_id))]
    pub async fn fetch_state_for_channels<T: DeserializeOwned>(
        &self,
        info: &[&str],
        filter_by_prefix: Option<&str>,
    ) -> PusherResult<GetResult<T>> {
        let filter_by_prefix = filter_by_prefix.filter(|p| !p.is_empty());
        if let Some(prefix) = filter_by_prefix {
            self.validator.validate_channel_name(prefix)?;
        }
        self.get(StateQuery::Channels {
            info: info.iter().map(|s| s.to_string()).collect(),
            filter_by_prefix: filter_by_prefix.map(str::to_string),
        })
        .await
    }

    #[instrument(skip(self), fields(app_id = %self.credentials.app_id))]
    pub async fn fetch_users_from_presence_channel<T: DeserializeOwned>(
        &self,
        channel: &str,
    ) -> PusherResult<GetResult<T>> {
        self.validator.validate_channel_name(channel)?;
        if ChannelType::from_name(channel) != ChannelType::Presence {
            return Err(PusherError::Validation(format!(
                "{} is not a presence channel",
                channel
            )));
        }
        self.get(StateQuery::PresenceUsers {
            channel: channel.to_string(),
        })
        .await
    }

    async fn get<T: DeserializeOwned>(&self, query: StateQuery) -> PusherResult<GetResult<T>> {
        let response = self.transport.get(&query).await?;
        let response = ensure_success(response)?;
        let data = serde_json::from_str(&response.body)?;
        Ok(GetResult {
            status: response.status,
            data,
        })
    }
}

fn ensure_success(response: TransportResponse) -> PusherResult<TransportResponse> {
    if response.is_success() {
        return Ok(response);
    }
    warn!(status = response.status, "HTTP API returned an error");
    Err(PusherError::Response {
        status: response.status,
        body: response.body,
    })
}

fn trigger_result(response: TransportResponse) -> PusherResult<TriggerResult> {
    let response = ensure_success(response)?;
    let parsed: TriggerResponseBody = if response.body.trim().is_empty() {
        TriggerResponseBody::default()
    } else {
        serde_json::from_str(&response.body)?
    };
    Ok(TriggerResult {
        status: response.status,
        event_ids: parsed.event_ids,
        body: response.body,
    })
}
