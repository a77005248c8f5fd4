//! Core logic: validation, signing, channel auth, webhook verification and trigger bodies.

pub mod auth;
pub mod signer;
pub mod trigger;
pub mod validation;
pub mod webhook;

pub use auth::AuthService;
pub use signer::{HmacSha256, KeyedHash, Signer};
pub use trigger::TriggerService;
pub use validation::{ValidationRules, Validator};
pub use webhook::WebhookService;
