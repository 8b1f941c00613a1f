use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::core::error::Error;
use crate::model::context::ContextData;
use crate::policy::reconciliation::{ReconcileOutcome, VpaReconciler};
use crate::service::cluster_store::ClusterStore;
use crate::service::fetcher::StateFetcher;

/// Suspension point between two reconciliation cycles.
#[async_trait]
pub trait Clock {
    async fn sleep(&self, duration: Duration);
}

pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// Stops after the first cycle when running once, never otherwise.
pub fn stop_after_first(run_once: bool) -> impl Fn(usize) -> bool {
    move |_completed_cycles| run_once
}

pub struct Driver<S, C, P> {
    fetcher: StateFetcher<S>,
    reconciler: VpaReconciler<S>,
    clock: C,
    interval: Duration,
    dry_run: bool,
    should_stop: P,
}

impl<S, C, P> Driver<S, C, P>
    where
        S: ClusterStore,
        C: Clock,
        P: Fn(usize) -> bool,
{
    pub fn new(ctx: Arc<ContextData<S>>, clock: C, interval: Duration, dry_run: bool, should_stop: P) -> Self {
        Self {
            fetcher: StateFetcher::new(ctx.clone()),
            reconciler: VpaReconciler::new(ctx),
            clock,
            interval,
            dry_run,
            should_stop,
        }
    }

    /// One fetch-diff-create pass. Only fetch failures are returned as errors.
    pub async fn run_cycle(&self) -> Result<ReconcileOutcome, Error> {
        let desired = self.fetcher.fetch_desired().await?;
        let actual = self.fetcher.fetch_actual().await?;
        Ok(self.reconciler.reconcile(&desired, &actual, self.dry_run).await)
    }

    /// Runs cycles until `should_stop` returns true for the number of completed cycles, sleeping `interval`
    /// between them. Returns the number of completed cycles, or the first fatal error.
    pub async fn run(&self) -> Result<usize, Error> {
        let mut completed = 0;
        loop {
            match self.run_cycle().await {
                Ok(outcome) => self.report(completed + 1, &outcome),
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => log::warn!("Cycle {} failed - {err}", completed + 1),
            }
            completed += 1;

            if (self.should_stop)(completed) {
                return Ok(completed);
            }

            self.clock.sleep(self.interval).await;
        }
    }

    fn report(&self, cycle: usize, outcome: &ReconcileOutcome) {
        if outcome.in_sync() {
            log::info!("Cycle {cycle} done: nothing to create");
            return;
        }
        for failure in &outcome.failed {
            log::warn!("VPA {} not created, retrying next cycle - {}", failure.name, failure.error);
        }
        log::info!(
            "Cycle {cycle} done: {} vpa(s) {}, {} failed",
            outcome.created.len(),
            if self.dry_run { "would be created" } else { "created" },
            outcome.failed.len(),
        );
    }
}
