//! [`Trigger`]: owns the observed state and drives ticks.

use std::future::Future;
use std::time::Duration;

use idwatch_core::{format_ids, Change, Config, ConfigError, IdentifierList, ObservedState};
use idwatch_notify::{MessageRenderer, Notifier, WebhookNotifier};
use idwatch_source::{HttpIdSource, IdSource};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use super::outcome::TickOutcome;
use crate::error::TriggerError;

/// Lifecycle phase of a constructed [`Trigger`].
///
/// Initialisation happens inside [`Trigger::initialize`]; a `Trigger` value
/// only exists once the baseline poll has succeeded. Teardown after a
/// shutdown request has no await points, so `run` goes straight from
/// `Running` to `Terminated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Terminated,
}

/// Periodically polls the source and notifies about appended identifiers.
pub struct Trigger {
    source: Box<dyn IdSource>,
    notifier: Box<dyn Notifier>,
    renderer: MessageRenderer,
    interval: Duration,
    observed: ObservedState,
    phase: Phase,
}

impl Trigger {
    /// Wire the HTTP source and webhook notifier from configuration, then
    /// take the baseline.
    pub async fn from_config(config: &Config) -> Result<Self, TriggerError> {
        let (source, notifier, renderer) = wire(config)?;
        Self::initialize(source, notifier, renderer, config.poll_interval).await
    }

    /// Wire from configuration, then [`serve`](Self::serve) until `shutdown`
    /// resolves.
    pub async fn serve_config<F>(
        config: &Config,
        shutdown: F,
    ) -> Result<Option<Self>, TriggerError>
    where
        F: Future<Output = ()>,
    {
        let (source, notifier, renderer) = wire(config)?;
        Self::serve(source, notifier, renderer, config.poll_interval, shutdown).await
    }

    /// Take the baseline and run until `shutdown` resolves.
    ///
    /// `shutdown` is watched from the start, including while the baseline
    /// poll is in flight. A shutdown that wins the race abandons the
    /// baseline and returns `Ok(None)`. Otherwise the terminated trigger is
    /// returned once the loop has stopped.
    pub async fn serve<F>(
        source: Box<dyn IdSource>,
        notifier: Box<dyn Notifier>,
        renderer: MessageRenderer,
        interval: Duration,
        shutdown: F,
    ) -> Result<Option<Self>, TriggerError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let started = tokio::select! {
            biased;
            _ = &mut shutdown => None,
            started = Self::initialize(source, notifier, renderer, interval) => Some(started),
        };

        let mut trigger = match started {
            Some(started) => started?,
            None => {
                info!("shutdown requested before baseline completed");
                return Ok(None);
            }
        };

        trigger.run(shutdown).await;
        Ok(Some(trigger))
    }

    /// Take the baseline poll and return a running trigger.
    ///
    /// Nothing in the baseline is reported. Failure here is fatal: without
    /// a baseline every existing record would look new.
    pub async fn initialize(
        source: Box<dyn IdSource>,
        notifier: Box<dyn Notifier>,
        renderer: MessageRenderer,
        interval: Duration,
    ) -> Result<Self, TriggerError> {
        info!(url = %source.endpoint(), "getting initial count of ids");

        let ids = source.fetch().await.map_err(TriggerError::Baseline)?;
        let observed = ObservedState::baseline(&ids);
        info!(count = observed.count(), "initial count");

        Ok(Self {
            source,
            notifier,
            renderer,
            interval,
            observed,
            phase: Phase::Running,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn observed(&self) -> &ObservedState {
        &self.observed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run ticks every `interval` until `shutdown` resolves.
    ///
    /// The first tick fires one interval after this call. Ticks missed
    /// while a slow cycle was in flight are skipped rather than replayed.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(interval = ?self.interval, "trigger running");

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("shutdown requested");
                    break;
                }
                _ = ticker.tick() => {
                    self.tick().await;
                }
            }
        }

        drop(ticker);
        self.phase = Phase::Terminated;
        info!(count = self.observed.count(), "trigger stopped");
    }

    /// Run one fetch → diff → notify cycle.
    ///
    /// The observed state only moves when the fetch succeeded and decoded.
    /// A failed delivery does not roll it back.
    pub async fn tick(&mut self) -> TickOutcome {
        debug!("running ticker iteration");

        let ids = match self.source.fetch().await {
            Ok(ids) => ids,
            Err(e) => {
                error!(
                    url = %self.source.endpoint(),
                    error = %e,
                    decode = e.is_decode(),
                    "unable to get ids"
                );
                return TickOutcome::FetchFailed {
                    error: e.to_string(),
                };
            }
        };

        let change = self.observed.apply(&ids);
        info!(count = self.observed.count(), "new count");

        match change {
            Change::Unchanged { count } => TickOutcome::Unchanged { count },
            Change::Shrunk { from, to } => {
                warn!(from, to, "source list shrank, re-baselining");
                TickOutcome::Shrunk { from, to }
            }
            Change::Appended { added, .. } => self.deliver(added).await,
        }
    }

    async fn deliver(&self, added: IdentifierList) -> TickOutcome {
        let notification = match self.renderer.notification(self.source.endpoint(), &added) {
            Ok(n) => n,
            Err(e) => {
                error!(error = %e, "unable to render notification");
                return TickOutcome::NotifyFailed {
                    added,
                    error: e.to_string(),
                };
            }
        };

        info!(
            added = %format_ids(&added),
            channel = self.notifier.channel_name(),
            "sending updated information to hook"
        );

        match self.notifier.send(&notification).await {
            Ok(()) => TickOutcome::Notified { added },
            Err(e) => {
                error!(
                    channel = self.notifier.channel_name(),
                    error = %e,
                    "unable to deliver notification"
                );
                TickOutcome::NotifyFailed {
                    added,
                    error: e.to_string(),
                }
            }
        }
    }
}

type Wiring = (Box<dyn IdSource>, Box<dyn Notifier>, MessageRenderer);

fn wire(config: &Config) -> Result<Wiring, TriggerError> {
    let renderer = MessageRenderer::new(config.message_template.clone())
        .map_err(|e| ConfigError::InvalidTemplate(e.to_string()))?;
    let source = HttpIdSource::new(config.source_url.as_str(), config.request_timeout)
        .map_err(TriggerError::Source)?;
    let notifier = WebhookNotifier::new(config.webhook_url.as_str(), config.request_timeout)
        .map_err(TriggerError::Notifier)?;

    Ok((Box::new(source), Box::new(notifier), renderer))
}
