//! Notification delivery for newly observed identifiers.
//!
//! This crate provides:
//! - `Notifier` trait for pluggable delivery channels
//! - `MessageRenderer`, which turns new identifiers into message text via minijinja
//! - `WebhookNotifier`, which POSTs `{"text": ...}` to a chat webhook

pub mod templating;
pub mod traits;
pub mod webhook;

pub use templating::{MessageContext, MessageRenderer, DEFAULT_TEMPLATE};
pub use traits::{Notification, Notifier, NotifyError};
pub use webhook::WebhookNotifier;
