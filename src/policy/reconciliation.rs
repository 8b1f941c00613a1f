use std::collections::HashSet;
use std::sync::Arc;

use crate::core::error::Error;
use crate::model::context::ContextData;
use crate::model::vpa::VerticalPodAutoscaler;
use crate::service::cluster_store::ClusterStore;

/// Names of `desired` that are not in `actual`, in `desired` order.
pub fn difference<'a>(desired: &'a [String], actual: &[String]) -> Vec<&'a str> {
    let existing = actual.iter().map(String::as_str).collect::<HashSet<_>>();
    desired.iter()
        .map(String::as_str)
        .filter(|name| !existing.contains(name))
        .collect()
}

#[derive(Debug)]
pub struct CreateFailure {
    pub name: String,
    pub error: Error,
}

/// Result of a single reconciliation pass. In dry-run mode `created` lists the VPAs that would have been created.
#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub created: Vec<String>,
    pub failed: Vec<CreateFailure>,
}

impl ReconcileOutcome {
    pub fn in_sync(&self) -> bool {
        self.created.is_empty() && self.failed.is_empty()
    }
}

pub struct VpaReconciler<S> {
    ctx: Arc<ContextData<S>>,
}

impl<S: ClusterStore> VpaReconciler<S> {
    pub fn new(ctx: Arc<ContextData<S>>) -> Self {
        Self { ctx }
    }

    /// Creates an observation-only VPA for every desired name missing from `actual`.
    /// Create failures are collected and do not stop the remaining creations.
    pub async fn reconcile(&self, desired: &[String], actual: &[String], dry_run: bool) -> ReconcileOutcome {
        let missing = difference(desired, actual);
        log::debug!("Diff deployments, vpas: {missing:?}");

        let mut outcome = ReconcileOutcome::default();
        if missing.is_empty() {
            log::info!("All VPAs are in sync.");
            return outcome;
        }

        for name in missing {
            let vpa = VerticalPodAutoscaler::observing(name, &self.ctx.namespace, &self.ctx.labels);

            if dry_run {
                log::info!("Dry run was set. Not creating vpa: {name}");
                outcome.created.push(name.to_owned());
                continue;
            }

            log::info!("Creating vpa: {name}");
            log::trace!("{}", serde_json::to_string(&vpa).unwrap_or_default());
            match self.ctx.store.create_policy(&self.ctx.namespace, &vpa).await {
                Ok(()) => outcome.created.push(name.to_owned()),
                Err(source) => {
                    let error = Error::PolicyCreationFailed { name: name.to_owned(), source };
                    log::error!("Error creating vpa: {error}");
                    outcome.failed.push(CreateFailure { name: name.to_owned(), error });
                }
            }
        }
        outcome
    }
}
