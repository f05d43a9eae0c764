//! The poll–diff–notify loop.
//!
//! A [`Trigger`] owns the observed state for the lifetime of the process.
//! It only exists once a baseline poll has succeeded, so a tick can never
//! run against an uninitialised state. The running loop reacts to exactly
//! two event sources, a fixed-interval timer and a shutdown future, and
//! processes at most one cycle at a time. A cycle that has started always
//! runs to completion before shutdown is looked at again.

mod core;
mod outcome;


pub use self::core::{Phase, Trigger};
pub use self::outcome::TickOutcome;
