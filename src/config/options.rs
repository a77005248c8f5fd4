//! HTTP API endpoint options: host, cluster, port, scheme and batch limits.

use crate::error::{PusherError, PusherResult};

/// Host used when neither a host nor a cluster has been configured.
pub const DEFAULT_HOST: &str = "api.pusherapp.com";

const HTTP_PORT: u16 = 80;
const HTTPS_PORT: u16 = 443;

/// Options for reaching the HTTP API.
///
/// Setting a host name explicitly wins over a cluster, whichever is set first.
/// Turning on `encrypted` moves the port to 443 unless a port was set.
#[derive(Debug, Clone, Default)]
pub struct PusherOptions {
    host: Option<String>,
    cluster: Option<String>,
    port: Option<u16>,
    encrypted: bool,
    batch_event_data_size_limit: Option<usize>,
}

impl PusherOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective host name, without scheme.
    pub fn host(&self) -> String {
        match (&self.host, &self.cluster) {
            (Some(host), _) => host.clone(),
            (None, Some(cluster)) => format!("api-{}.pusher.com", cluster),
            (None, None) => DEFAULT_HOST.to_string(),
        }
    }

    /// Set an explicit host name. Clears any cluster. A scheme prefix is rejected.
    pub fn set_host(&mut self, host: impl Into<String>) -> PusherResult<()> {
        let host = host.into();
        if host.contains("://") {
            return Err(PusherError::InvalidHost(host));
        }
        self.host = Some(host);
        self.cluster = None;
        Ok(())
    }

    pub fn cluster(&self) -> Option<&str> {
        self.cluster.as_deref()
    }

    /// Select a cluster. Ignored once a host name has been set explicitly.
    pub fn set_cluster(&mut self, cluster: impl Into<String>) {
        if self.host.is_none() {
            self.cluster = Some(cluster.into());
        }
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(if self.encrypted {
            HTTPS_PORT
        } else {
            HTTP_PORT
        })
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = Some(port);
    }

    pub fn encrypted(&self) -> bool {
        self.encrypted
    }

    pub fn set_encrypted(&mut self, encrypted: bool) {
        self.encrypted = encrypted;
    }

    /// Byte ceiling for each event's serialized `data` in a batch trigger.
    pub fn batch_event_data_size_limit(&self) -> Option<usize> {
        self.batch_event_data_size_limit
    }

    pub fn set_batch_event_data_size_limit(&mut self, limit: Option<usize>) {
        self.batch_event_data_size_limit = limit;
    }

    /// Builder-style variant of [`set_encrypted`](Self::set_encrypted).
    pub fn with_encrypted(mut self, encrypted: bool) -> Self {
        self.set_encrypted(encrypted);
        self
    }

    /// Builder-style variant of [`set_cluster`](Self::set_cluster).
    pub fn with_cluster(mut self, cluster: impl Into<String>) -> Self {
        self.set_cluster(cluster);
        self
    }

    /// Builder-style variant of [`set_batch_event_data_size_limit`](Self::set_batch_event_data_size_limit).
    pub fn with_batch_event_data_size_limit(mut self, limit: usize) -> Self {
        self.set_batch_event_data_size_limit(Some(limit));
        self
    }

    /// `scheme://host[:port]/`, omitting the port when it is the scheme's default.
    pub fn base_url(&self) -> String {
        let (scheme, default_port) = if self.encrypted {
            ("https", HTTPS_PORT)
        } else {
            ("http", HTTP_PORT)
        };
        let port = self.port();
        if port == default_port {
            format!("{}://{}/", scheme, self.host())
        } else {
            format!("{}://{}:{}/", scheme, self.host(), port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_defaults_to_80() {
        assert_eq!(PusherOptions::new().port(), 80);
    }

    #[test]
    fn encrypted_moves_port_to_443() {
        let options = PusherOptions::new().with_encrypted(true);
        assert_eq!(options.port(), 443);
    }

    #[test]
    fn encrypted_keeps_explicit_port() {
        let mut options = PusherOptions::new();
        options.set_port(90);
        options.set_encrypted(true);
        assert_eq!(options.port(), 90);
    }

    #[test]
    fn default_base_url() {
        assert_eq!(PusherOptions::new().base_url(), "http://api.pusherapp.com/");
        assert_eq!(
            PusherOptions::new().with_encrypted(true).base_url(),
            "https://api.pusherapp.com/"
        );
        assert_eq!(PusherOptions::new().cluster(), None);
    }

    #[test]
    fn cluster_changes_host() {
        let options = PusherOptions::new().with_cluster("eu");
        assert_eq!(options.base_url(), "http://api-eu.pusher.com/");
    }

    #[test]
    fn custom_port_is_rendered() {
        let mut options = PusherOptions::new();
        options.set_port(100);
        assert_eq!(options.base_url(), "http://api.pusherapp.com:100/");
        options.set_encrypted(true);
        assert_eq!(options.base_url(), "https://api.pusherapp.com:100/");
        options.set_cluster("eu");
        assert_eq!(options.base_url(), "https://api-eu.pusher.com:100/");
    }

    #[test]
    fn host_wins_over_cluster_either_order() {
        let mut options = PusherOptions::new();
        options.set_host("api.my.domain.com").unwrap();
        options.set_cluster("eu");
        assert_eq!(options.base_url(), "http://api.my.domain.com/");
        assert_eq!(options.cluster(), None);

        let mut options = PusherOptions::new();
        options.set_cluster("eu");
        assert_eq!(options.base_url(), "http://api-eu.pusher.com/");
        options.set_host("api.my.domain.com").unwrap();
        assert_eq!(options.base_url(), "http://api.my.domain.com/");
        assert_eq!(options.cluster(), None);
    }

    #[test]
    fn scheme_in_host_is_rejected() {
        for host in [
            "https://api.pusherapp.com",
            "http://api.pusherapp.com",
            "ftp://api.pusherapp.com",
        ] {
            let mut options = PusherOptions::new();
            assert!(matches!(
                options.set_host(host),
                Err(PusherError::InvalidHost(_))
            ));
        }
    }
}
