//! Application configuration loaded from environment.

mod options;

pub use options::{PusherOptions, DEFAULT_HOST};

use std::fmt;
use std::net::SocketAddr;

/// The credentials of one app on the hosted service.
///
/// `app_secret` is the HMAC key for channel auth and webhooks; it is never
/// printed, logged or returned.
#[derive(Clone)]
pub struct AppCredentials {
    pub app_id: String,
    pub app_key: String,
    app_secret: String,
}

impl AppCredentials {
    pub fn new(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
        app_secret: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            app_key: app_key.into(),
            app_secret: app_secret.into(),
        }
    }

    pub(crate) fn app_secret(&self) -> &str {
        &self.app_secret
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("app_key", &self.app_key)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration for the auth/webhook endpoint server, loaded from `.env` and environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address (e.g. `0.0.0.0:3000`).
    pub server_addr: SocketAddr,
    /// App id, key and secret issued by the hosted service.
    pub credentials: AppCredentials,
    /// HTTP API host, port, cluster and limits.
    pub options: PusherOptions,
    /// Log level: `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment. Call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let server_addr = std::env::var("SERVER_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let server_addr: SocketAddr = server_addr
            .parse()
            .map_err(|_| ConfigLoadError::InvalidServerAddr)?;

        let app_id = required("PUSHER_APP_ID")?;
        let app_key = required("PUSHER_APP_KEY")?;
        let app_secret = required("PUSHER_APP_SECRET")?;
        let credentials = AppCredentials::new(app_id, app_key, app_secret);

        let mut options = PusherOptions::default();
        if let Ok(cluster) = std::env::var("PUSHER_CLUSTER") {
            options.set_cluster(cluster);
        }
        if let Ok(host) = std::env::var("PUSHER_HOST") {
            options
                .set_host(host)
                .map_err(|e| ConfigLoadError::Invalid("PUSHER_HOST", e.to_string()))?;
        }
        if let Ok(encrypted) = std::env::var("PUSHER_ENCRYPTED") {
            let encrypted = encrypted
                .parse::<bool>()
                .map_err(|e| ConfigLoadError::Invalid("PUSHER_ENCRYPTED", e.to_string()))?;
            options.set_encrypted(encrypted);
        }
        if let Ok(port) = std::env::var("PUSHER_PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|e| ConfigLoadError::Invalid("PUSHER_PORT", e.to_string()))?;
            options.set_port(port);
        }
        if let Ok(limit) = std::env::var("PUSHER_BATCH_EVENT_DATA_SIZE_LIMIT") {
            let limit = limit.parse::<usize>().map_err(|e| {
                ConfigLoadError::Invalid("PUSHER_BATCH_EVENT_DATA_SIZE_LIMIT", e.to_string())
            })?;
            options.set_batch_event_data_size_limit(Some(limit));
        }

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            server_addr,
            credentials,
            options,
            log_level,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigLoadError> {
    match std::env::var(name) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigLoadError::Missing(name)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("Invalid SERVER_ADDR")]
    InvalidServerAddr,

    #[error("Missing required variable {0}")]
    Missing(&'static str),

    #[error("Invalid {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_secret() {
        let creds = AppCredentials::new("1", "key", "super-secret-value");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("key"));
        assert!(!printed.contains("super-secret-value"));
    }
}
