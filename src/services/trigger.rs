//! Validated trigger request bodies.

use crate::error::{PusherError, PusherResult};
use crate::models::event::{BatchEvent, BatchTriggerRequest, Event, TriggerRequest};
use crate::services::validation::Validator;
use serde::Serialize;

/// Turns caller input into request bodies the transport can send as-is.
///
/// Outbound requests are not signed here.
#[derive(Debug, Clone, Default)]
pub struct TriggerService {
    validator: Validator,
}

impl TriggerService {
    pub fn new(validator: Validator) -> Self {
        Self { validator }
    }

    /// One event on one or more channels. `data` is serialized exactly once.
    pub fn build<T>(
        &self,
        channels: &[&str],
        event_name: &str,
        data: &T,
        socket_id: Option<&str>,
    ) -> PusherResult<TriggerRequest>
    where
        T: Serialize + ?Sized,
    {
        if channels.is_empty() {
            return Err(PusherError::MissingRequiredField("channels"));
        }
        self.validator.validate_channel_names(channels.iter().copied())?;
        self.validator.validate_event_name(event_name)?;
        self.validator.validate_socket_id(socket_id)?;

        Ok(TriggerRequest {
            name: event_name.to_string(),
            channels: channels.iter().map(|c| c.to_string()).collect(),
            data: serde_json::to_string(data)?,
            socket_id: socket_id.map(str::to_string),
        })
    }

    /// A batch of events; every event is checked before any is serialized into the body.
    pub fn build_batch(&self, events: &[Event]) -> PusherResult<BatchTriggerRequest> {
        if events.is_empty() {
            return Err(PusherError::MissingRequiredField("events"));
        }
        self.validator.validate_event_batch(events)?;

        let batch = events
            .iter()
            .map(|event| -> PusherResult<BatchEvent> {
                let data = serde_json::to_string(&event.data)?;
                self.validator.validate_batch_event_data(Some(&data))?;
                Ok(BatchEvent {
                    channel: event.channel.clone(),
                    name: event.name.clone(),
                    data,
                    socket_id: event.socket_id.clone(),
                })
            })
            .collect::<PusherResult<Vec<_>>>()?;

        Ok(BatchTriggerRequest { batch })
    }
}
