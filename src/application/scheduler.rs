//! Drives the collector: once, or on a fixed period until shutdown.

use crate::application::collector::Collector;
use std::future::Future;
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

/// Outcome counts over the lifetime of a scheduler run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleTally {
    pub succeeded: u64,
    pub failed: u64,
    pub metrics_sent: u64,
}

impl CycleTally {
    pub fn cycles(&self) -> u64 {
        self.succeeded + self.failed
    }
}

pub struct CollectionScheduler {
    collector: Collector,
    period: Duration,
}

impl CollectionScheduler {
    /// A zero `period` means a single collection
    pub fn new(collector: Collector, period: Duration) -> Self {
        Self { collector, period }
    }

    pub fn is_periodic(&self) -> bool {
        !self.period.is_zero()
    }

    /// Run cycles until `shutdown` resolves (or once, if not periodic).
    ///
    /// The first cycle starts immediately. A failed cycle is logged and the
    /// loop carries on; ticks that fall inside a slow cycle are skipped so
    /// cycles never overlap. Shutdown is only observed between cycles.
    pub async fn run<F>(&self, shutdown: F) -> CycleTally
    where
        F: Future<Output = ()>,
    {
        let mut tally = CycleTally::default();

        if !self.is_periodic() {
            self.cycle(&mut tally).await;
            return tally;
        }

        info!("Collecting every {:?}", self.period);

        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!(
                        "Shutdown requested after {} cycles ({} failed)",
                        tally.cycles(),
                        tally.failed
                    );
                    break;
                }
                _ = interval.tick() => {
                    self.cycle(&mut tally).await;
                }
            }
        }

        tally
    }

    async fn cycle(&self, tally: &mut CycleTally) {
        info!("collecting {}", self.collector.plan().url);

        match self.collector.run_once().await {
            Ok(sent) => {
                info!("sent {} metrics", sent);
                tally.succeeded += 1;
                tally.metrics_sent += sent as u64;
            }
            Err(e) => {
                error!("Collection failed: {}", e);
                tally.failed += 1;
            }
        }
    }
}
