//! Data models for channels, events, presence, webhooks and state queries.

pub mod channel;
pub mod event;
pub mod presence;
pub mod state;
pub mod webhook;

pub use channel::*;
pub use event::*;
pub use presence::*;
pub use state::*;
pub use webhook::*;
