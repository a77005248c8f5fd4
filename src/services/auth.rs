//! Authentication tokens for private and presence channel subscriptions.

use crate::error::{PusherError, PusherResult};
use crate::models::channel::ChannelType;
use crate::models::presence::{AuthenticationToken, PresenceChannelData};
use crate::services::signer::Signer;
use crate::services::validation::Validator;
use tracing::debug;
use validator::Validate;

/// Builds `<app_key>:HMAC-SHA256(app_secret, socket_id:channel_name[:channel_data])` tokens.
///
/// Every call validates and signs afresh; nothing is cached between subscribers.
#[derive(Clone)]
pub struct AuthService {
    app_key: String,
    signer: Signer,
    validator: Validator,
}

impl AuthService {
    pub fn new(app_key: String, signer: Signer, validator: Validator) -> Self {
        Self {
            app_key,
            signer,
            validator,
        }
    }

    /// Authorize `socket_id` to subscribe to `channel`.
    ///
    /// Presence channels need `presence` data; its JSON is produced once, signed,
    /// and returned verbatim as `channel_data`.
    pub fn authenticate(
        &self,
        channel: &str,
        socket_id: &str,
        presence: Option<&PresenceChannelData>,
    ) -> PusherResult<AuthenticationToken> {
        self.validator.validate_socket_id(Some(socket_id))?;
        self.validator.validate_channel_name(channel)?;

        let channel_data = match presence {
            Some(data) => {
                data.validate()
                    .map_err(|_| PusherError::MissingRequiredField("user_id"))?;
                Some(serde_json::to_string(data)?)
            }
            None if ChannelType::from_name(channel).requires_channel_data() => {
                return Err(PusherError::MissingRequiredField("presence channel data"));
            }
            None => None,
        };

        let signature =
            self.signer
                .sign_channel_auth(socket_id, channel, channel_data.as_deref())?;
        debug!(channel = %channel, socket_id = %socket_id, "channel auth signed");

        Ok(AuthenticationToken {
            auth: format!("{}:{}", self.app_key, signature),
            channel_data,
        })
    }
}
