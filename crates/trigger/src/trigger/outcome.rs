//! Per-tick result type.

use idwatch_core::IdentifierList;

/// What one tick of the loop did.
///
/// Only [`TickOutcome::FetchFailed`] leaves the observed state untouched;
/// every other variant means the state was advanced to the fetched list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Fetch or decode failed; retried naturally on the next tick.
    FetchFailed { error: String },
    /// Same length as before.
    Unchanged { count: usize },
    /// The list got shorter; the observed count was lowered to `to`.
    Shrunk { from: usize, to: usize },
    /// New identifiers were reported to the webhook.
    Notified { added: IdentifierList },
    /// New identifiers were found but delivery failed. They are not
    /// reported again on later ticks.
    NotifyFailed { added: IdentifierList, error: String },
}

impl TickOutcome {
    /// Identifiers considered new on this tick, whether or not delivery worked.
    pub fn added(&self) -> &[idwatch_core::Identifier] {
        match self {
            TickOutcome::Notified { added } | TickOutcome::NotifyFailed { added, .. } => added,
            _ => &[],
        }
    }
}
