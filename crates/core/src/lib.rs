pub mod config;
pub mod detector;
pub mod duration;
pub mod error;
pub mod identifier;

pub use config::{Config, RawConfig};
pub use detector::{diff, Change, Diff, ObservedState};
pub use duration::parse_duration;
pub use error::*;
pub use identifier::{format_ids, Identifier, IdentifierList};
