//! Canonical strings-to-sign and HMAC-SHA256 signatures for channel auth and webhooks.

use crate::config::AppCredentials;
use crate::error::{PusherError, PusherResult};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256Mac = Hmac<Sha256>;

/// Keyed hash primitive used by [`Signer`].
pub trait KeyedHash: Send + Sync {
    /// Lowercase hex digest of `message` under `key`.
    fn hex_digest(&self, key: &[u8], message: &[u8]) -> PusherResult<String>;

    /// Whether `signature_hex` is the digest of `message` under `key`, compared in constant time.
    fn verify_hex(&self, key: &[u8], message: &[u8], signature_hex: &str) -> bool;
}

/// HMAC-SHA256, the only algorithm the service accepts.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256;

impl KeyedHash for HmacSha256 {
    fn hex_digest(&self, key: &[u8], message: &[u8]) -> PusherResult<String> {
        let mut mac = HmacSha256Mac::new_from_slice(key)
            .map_err(|e| PusherError::Internal(anyhow::anyhow!("HMAC init: {}", e)))?;
        mac.update(message);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn verify_hex(&self, key: &[u8], message: &[u8], signature_hex: &str) -> bool {
        // Only the exact lowercase form produced by `hex_digest` is accepted.
        if signature_hex.len() != 64
            || !signature_hex
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
        {
            return false;
        }
        let Ok(claimed) = hex::decode(signature_hex) else {
            return false;
        };
        let Ok(mut mac) = HmacSha256Mac::new_from_slice(key) else {
            return false;
        };
        mac.update(message);
        mac.verify_slice(&claimed).is_ok()
    }
}

/// Signs with the app secret. Holds no per-call state.
#[derive(Clone)]
pub struct Signer {
    secret: Arc<str>,
    hash: Arc<dyn KeyedHash>,
}

impl Signer {
    pub fn new(secret: &str) -> Self {
        Self::with_hash(secret, Arc::new(HmacSha256))
    }

    /// Signer keyed with the app secret of `credentials`.
    pub fn from_credentials(credentials: &AppCredentials) -> Self {
        Self::new(credentials.app_secret())
    }

    pub fn with_hash(secret: &str, hash: Arc<dyn KeyedHash>) -> Self {
        Self {
            secret: Arc::from(secret),
            hash,
        }
    }

    /// `socket_id:channel` for private channels, `socket_id:channel:channel_data` for presence.
    pub fn channel_auth_string(socket_id: &str, channel: &str, channel_data: Option<&str>) -> String {
        match channel_data {
            Some(data) => format!("{}:{}:{}", socket_id, channel, data),
            None => format!("{}:{}", socket_id, channel),
        }
    }

    /// `channel_data` must be the exact JSON returned to the subscriber.
    pub fn sign_channel_auth(
        &self,
        socket_id: &str,
        channel: &str,
        channel_data: Option<&str>,
    ) -> PusherResult<String> {
        let to_sign = Self::channel_auth_string(socket_id, channel, channel_data);
        self.hash.hex_digest(self.secret.as_bytes(), to_sign.as_bytes())
    }

    /// Signature over the raw, unparsed request body.
    pub fn sign_webhook(&self, raw_body: &[u8]) -> PusherResult<String> {
        self.hash.hex_digest(self.secret.as_bytes(), raw_body)
    }

    pub fn verify_webhook(&self, raw_body: &[u8], signature_hex: &str) -> bool {
        self.hash
            .verify_hex(self.secret.as_bytes(), raw_body, signature_hex)
    }
}
