use idwatch_core::ConfigError;
use idwatch_notify::NotifyError;
use idwatch_source::SourceError;
use thiserror::Error;

/// Errors that stop the trigger before it reaches the running loop.
///
/// Everything that goes wrong after the baseline is recoverable and is
/// reported as a [`TickOutcome`](crate::TickOutcome) instead.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unable to set up source client: {0}")]
    Source(#[source] SourceError),

    #[error("unable to set up notifier: {0}")]
    Notifier(#[source] NotifyError),

    #[error("unable to get initial ids: {0}")]
    Baseline(#[source] SourceError),
}
