//! Source client trait.

use async_trait::async_trait;
use idwatch_core::IdentifierList;

use crate::error::SourceError;

/// Produces the current, complete identifier list of the watched source.
///
/// Implementations must either return the full snapshot or an error; a
/// partial list would be mistaken for a shrink.
#[async_trait]
pub trait IdSource: Send + Sync {
    /// Fetch and decode the current list.
    async fn fetch(&self) -> Result<IdentifierList, SourceError>;

    /// Endpoint this source reads from, used in logs and notification text.
    fn endpoint(&self) -> &str;
}
