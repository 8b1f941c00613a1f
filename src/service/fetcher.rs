use std::sync::Arc;

use crate::core::error::Error;
use crate::model::context::ContextData;
use crate::service::cluster_store::ClusterStore;

/// Reads the desired (Deployments) and actual (labelled VPAs) name sets from the cluster.
/// Any failure is fatal: reconciling against a partial view could create duplicates.
pub struct StateFetcher<S> {
    ctx: Arc<ContextData<S>>,
}

impl<S: ClusterStore> StateFetcher<S> {
    pub fn new(ctx: Arc<ContextData<S>>) -> Self {
        Self { ctx }
    }

    pub async fn fetch_desired(&self) -> Result<Vec<String>, Error> {
        self.ctx.store
            .list_workloads(&self.ctx.namespace)
            .await
            .map_err(|source| Error::WorkloadListFailed {
                namespace: self.ctx.namespace.clone(),
                source,
            })
    }

    pub async fn fetch_actual(&self) -> Result<Vec<String>, Error> {
        self.ctx.store
            .list_policies(&self.ctx.namespace, &self.ctx.labels)
            .await
            .map_err(|source| Error::PolicyListFailed {
                namespace: self.ctx.namespace.clone(),
                source,
            })
    }
}
