//! Change detection over an append-only identifier list.
//!
//! The source is assumed to only ever grow at the end: identifiers are
//! appended, never removed or reordered. Under that assumption the records
//! added since the last poll are exactly the suffix past the previously
//! observed length. Detection is positional, not a value-set comparison,
//! so duplicate identifier values are reported again if they are appended
//! again.
//!
//! A list that comes back *shorter* than the observed count breaks the
//! assumption (the source was pruned or reset). That case reports nothing
//! new and re-baselines the observed count down to the current length, so
//! the next growth is measured from the shrunken list.

use chrono::{DateTime, Utc};

use crate::identifier::{Identifier, IdentifierList};

/// Result of comparing a fresh snapshot against a previously observed count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diff<'a> {
    /// Count to store as the next `previous_count`.
    pub new_count: usize,
    /// Identifiers appended since `previous_count` (possibly empty).
    pub added: &'a [Identifier],
}

/// Compare `current` against the previously observed length.
///
/// Never panics: a `previous_count` beyond the end of `current` yields an
/// empty `added` slice and `new_count == current.len()`.
pub fn diff(previous_count: usize, current: &[Identifier]) -> Diff<'_> {
    let added = current.get(previous_count..).unwrap_or(&[]);
    Diff {
        new_count: current.len(),
        added,
    }
}

/// What a successful poll changed relative to the observed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Same length as before; nothing to report.
    Unchanged { count: usize },
    /// New identifiers were appended.
    Appended {
        previous: usize,
        added: IdentifierList,
    },
    /// The list got shorter; the observed count was lowered to `to`.
    Shrunk { from: usize, to: usize },
}

impl Change {
    /// Newly appended identifiers, empty unless this is [`Change::Appended`].
    pub fn added(&self) -> &[Identifier] {
        match self {
            Change::Appended { added, .. } => added,
            _ => &[],
        }
    }

    pub fn has_new(&self) -> bool {
        !self.added().is_empty()
    }
}

/// In-memory record of how many identifiers were known as of the last
/// successful poll. Lives for the lifetime of the process; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedState {
    count: usize,
    observed_at: DateTime<Utc>,
}

impl ObservedState {
    /// Establish the baseline from the first successful poll.
    ///
    /// Nothing in the baseline is considered new.
    pub fn baseline(initial: &[Identifier]) -> Self {
        Self::from_count(initial.len())
    }

    /// Start from a known count, e.g. when replaying a scenario.
    pub fn from_count(count: usize) -> Self {
        Self {
            count,
            observed_at: Utc::now(),
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// When the state was last advanced by a successful poll.
    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Fold a successfully fetched and decoded snapshot into the state.
    ///
    /// Must only be called with a complete snapshot; failed polls leave the
    /// state untouched by simply not calling this.
    pub fn apply(&mut self, current: &[Identifier]) -> Change {
        let previous = self.count;
        let Diff { new_count, added } = diff(previous, current);

        self.count = new_count;
        self.observed_at = Utc::now();

        if new_count < previous {
            Change::Shrunk {
                from: previous,
                to: new_count,
            }
        } else if added.is_empty() {
            Change::Unchanged { count: new_count }
        } else {
            Change::Appended {
                previous,
                added: added.to_vec(),
            }
        }
    }
}
