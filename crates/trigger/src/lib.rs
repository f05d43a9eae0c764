//! Poll–diff–notify trigger.
//!
//! Periodically reads an append-only identifier list, works out which
//! identifiers were added since the last successful poll, and posts a
//! message about them to a webhook.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`trigger`] | The scheduling loop and its per-tick outcomes |
//! | [`shutdown`] | OS signal handling for graceful shutdown |
//! | [`error`] | Fatal startup errors |

pub mod error;
pub mod shutdown;
pub mod trigger;

pub use error::TriggerError;
pub use shutdown::shutdown_signal;
pub use trigger::{Phase, TickOutcome, Trigger};
