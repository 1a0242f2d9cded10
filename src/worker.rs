use log::{error, info, warn};
use std::time::Duration;
use tokio::select;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Error;
use crate::notify::{Notification, Notifier, WebhookNotifier};
use crate::probe::{HttpProber, Prober};
use crate::status::{Status, StatusRegistry};
use crate::ticker::{SleepTicker, Ticker};

/// What happened to a target during one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Unchanged,
    Notified,
    NotifyFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub target: String,
    pub previous: Status,
    pub current: Status,
    pub outcome: Outcome,
}

/// Watches a fixed list of targets and alerts on every status change.
///
/// All monitoring state lives here: the ordered target list, the registry of
/// last known statuses, and the injected prober, notifier and ticker.
pub struct Monitor<P, N, T> {
    targets: Vec<String>,
    registry: StatusRegistry,
    interval: Duration,
    prober: P,
    notifier: N,
    ticker: T,
}

impl Monitor<HttpProber, WebhookNotifier, SleepTicker> {
    /// Builds the production monitor from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be initialized.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self::new(
            config.targets.clone(),
            config.check_interval(),
            HttpProber::new()?,
            WebhookNotifier::new(config.webhook_url.clone())?,
            SleepTicker,
        ))
    }
}

impl<P, N, T> Monitor<P, N, T>
where
    P: Prober,
    N: Notifier,
    T: Ticker,
{
    pub fn new(targets: Vec<String>, interval: Duration, prober: P, notifier: N, ticker: T) -> Self {
        let registry = StatusRegistry::new(targets.iter().cloned());
        Self {
            targets,
            registry,
            interval,
            prober,
            notifier,
            ticker,
        }
    }

    pub fn registry(&self) -> &StatusRegistry {
        &self.registry
    }

    /// Runs monitoring cycles until `token` is cancelled.
    ///
    /// # Errors
    ///
    /// Returns the first error that escapes a cycle. Probe and notification
    /// failures are absorbed per target and never end the loop.
    pub async fn run(&mut self, token: CancellationToken) -> Result<(), Error> {
        info!("Starting site monitoring...");
        info!("Check interval: {} seconds", self.interval.as_secs());
        info!("Monitoring sites: {}", self.targets.join(", "));

        loop {
            // Check if we should shutdown before starting new cycle
            if token.is_cancelled() {
                info!("Shutdown requested, stopping monitor");
                break;
            }

            self.run_cycle().await?;

            info!("Waiting {} seconds to check again", self.interval.as_secs());
            select! {
                () = self.ticker.tick(self.interval) => {},
                () = token.cancelled() => {
                    info!("Shutdown requested during sleep");
                    break;
                }
            }
        }

        info!("Site monitoring stopped gracefully");
        Ok(())
    }

    /// Checks every target once, in configured order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTarget`] if the registry lost track of a target.
    pub async fn run_cycle(&mut self) -> Result<Vec<CheckReport>, Error> {
        info!("Checking site status...");

        let targets = self.targets.clone();
        let mut reports = Vec::with_capacity(targets.len());
        for target in &targets {
            reports.push(self.check_target(target).await?);
        }
        Ok(reports)
    }

    /// Probes one target and alerts if its status changed.
    ///
    /// The new status is committed whether or not the alert was delivered, so
    /// a failed notification is not retried on the next cycle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTarget`] if `target` is not registered.
    pub async fn check_target(&mut self, target: &str) -> Result<CheckReport, Error> {
        let current = self.prober.probe(target).await;
        let transition = self.registry.check_transition(target, current)?;

        info!("{target}: {current} (previously {})", transition.previous);

        let outcome = if transition.changed {
            info!("Status changed for {target}, sending notification");
            let outcome = match self.notifier.notify(&Notification::new(target, current)).await {
                Ok(()) => Outcome::Notified,
                Err(e) => {
                    error!("Failed to send notification for {target}: {e}");
                    Outcome::NotifyFailed
                }
            };
            self.registry.commit(target, current)?;

            match current {
                Status::Up => info!("Site {target} is back up"),
                Status::Down => warn!("Site {target} is down"),
            }
            outcome
        } else {
            Outcome::Unchanged
        };

        Ok(CheckReport {
            target: target.to_string(),
            previous: transition.previous,
            current,
            outcome,
        })
    }
}
