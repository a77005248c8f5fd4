//! Inbound webhook verification.

use crate::models::webhook::{WebHook, WebhookVerification};
use crate::services::signer::Signer;
use tracing::{debug, info};

/// Checks the signature of webhook deliveries before their body is parsed.
#[derive(Clone)]
pub struct WebhookService {
    signer: Signer,
}

impl WebhookService {
    pub fn new(signer: Signer) -> Self {
        Self { signer }
    }

    /// Verify `signature` against the raw body, then parse it.
    ///
    /// Untrusted input never produces an error: every failure is reported as
    /// [`WebhookVerification::Invalid`] with the reasons.
    pub fn process(&self, signature: Option<&str>, raw_body: &[u8]) -> WebhookVerification {
        let mut errors = Vec::new();
        if raw_body.is_empty() {
            errors.push("The supplied body was empty".to_string());
        }
        let signature = signature.filter(|s| !s.is_empty());
        if signature.is_none() {
            errors.push("The supplied signature was empty".to_string());
        }
        let signature = match signature {
            Some(s) if errors.is_empty() => s,
            _ => {
                debug!("webhook rejected before signature check");
                return WebhookVerification::Invalid { errors };
            }
        };

        if !self.signer.verify_webhook(raw_body, signature) {
            debug!("webhook signature mismatch");
            return WebhookVerification::Invalid {
                errors: vec!["The supplied signature was not valid".to_string()],
            };
        }

        match serde_json::from_slice::<WebHook>(raw_body) {
            Ok(hook) => {
                info!(events = hook.events.len(), time_ms = hook.time_ms, "webhook verified");
                WebhookVerification::Valid(hook)
            }
            Err(e) => {
                debug!(error = %e, "verified webhook body is not a webhook document");
                WebhookVerification::Invalid {
                    errors: vec![format!("The supplied body could not be parsed: {}", e)],
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-app-secret";
    const BODY: &str =
        r#"{"time_ms":1327078148132,"events":[{"name":"channel_occupied","channel":"test_channel"}]}"#;
    const BODY_SIG: &str = "6eb3e6b496ec3a53329f215a47ce86a4e0491113cffe744b3827c7d6e79dc216";

    fn service() -> WebhookService {
        WebhookService::new(Signer::new(SECRET))
    }

    #[test]
    fn valid_signature_exposes_events() {
        let result = service().process(Some(BODY_SIG), BODY.as_bytes());
        assert!(result.is_valid());
        let hook = result.webhook().unwrap();
        assert_eq!(hook.events.len(), 1);
        assert_eq!(hook.events[0].name, "channel_occupied");
        assert_eq!(hook.events[0].channel, "test_channel");
    }

    #[test]
    fn flipped_signature_character_is_invalid() {
        let mut sig = BODY_SIG.to_string();
        sig.replace_range(0..1, "7");
        let result = service().process(Some(&sig), BODY.as_bytes());
        assert!(!result.is_valid());
        assert!(result.webhook().is_none());
        assert!(result.events().is_empty());
    }

    #[test]
    fn missing_signature_and_body_are_reported() {
        let result = service().process(None, b"");
        assert_eq!(result.errors().len(), 2);

        let result = service().process(Some(""), BODY.as_bytes());
        assert_eq!(result.errors(), ["The supplied signature was empty".to_string()]);
    }

    #[test]
    fn uppercase_or_padded_signature_is_invalid() {
        let body = br#"{"time_ms":1,"events":[]}"#;
        let sig = Signer::new(SECRET).sign_webhook(body).unwrap();
        assert!(service().process(Some(&sig), body).is_valid());

        let upper = service().process(Some(&sig.to_uppercase()), body);
        assert!(!upper.is_valid());
        assert_eq!(upper.errors(), ["The supplied signature was not valid".to_string()]);

        let padded = format!("  {}\t", sig);
        let padded = service().process(Some(&padded), body);
        assert!(!padded.is_valid());
        assert_eq!(padded.errors(), ["The supplied signature was not valid".to_string()]);
    }

    #[test]
    fn signature_covers_raw_bytes_not_reserialized_json() {
        let spaced = r#"{ "time_ms":1327078148132, "events":[{"name":"channel_occupied","channel":"test_channel"}]}"#;
        let result = service().process(Some(BODY_SIG), spaced.as_bytes());
        assert!(!result.is_valid());
    }

    #[test]
    fn signed_garbage_is_invalid_not_a_panic() {
        let body = b"not json";
        let sig = Signer::new(SECRET).sign_webhook(body).unwrap();
        let result = service().process(Some(&sig), body);
        assert!(!result.is_valid());
        assert!(result.errors()[0].starts_with("The supplied body could not be parsed"));
    }
}
