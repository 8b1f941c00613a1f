use std::collections::{BTreeMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use kube::core::ErrorResponse;
use kube::ResourceExt;

use crate::model::vpa::VerticalPodAutoscaler;
use crate::service::cluster_store::ClusterStore;

/// Test double holding a single namespace worth of Deployments and VPAs.
/// Calls addressed to any other namespace fail with `NotFound`.
pub struct InMemoryClusterStore {
    namespace: String,
    workloads: Mutex<Vec<String>>,
    vpas: Mutex<Vec<VerticalPodAutoscaler>>,
    create_calls: Mutex<Vec<String>>,
    failing_creates: Mutex<HashSet<String>>,
    fail_listing: Mutex<bool>,
}

pub fn api_error(code: u16, reason: &str) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: String::from("Failure"),
        message: format!("simulated {reason}"),
        reason: String::from(reason),
        code,
    })
}

impl Default for InMemoryClusterStore {
    fn default() -> Self {
        Self::in_namespace("default")
    }
}

impl InMemoryClusterStore {
    pub fn in_namespace(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            workloads: Default::default(),
            vpas: Default::default(),
            create_calls: Default::default(),
            failing_creates: Default::default(),
            fail_listing: Default::default(),
        }
    }

    pub fn with_workloads(names: &[&str]) -> Self {
        Self::default().seed_workloads(names)
    }

    pub fn seed_workloads(self, names: &[&str]) -> Self {
        self.workloads.lock().unwrap().extend(names.iter().map(|n| n.to_string()));
        self
    }

    pub fn add_vpa(&self, name: &str, labels: &BTreeMap<String, String>) {
        self.vpas.lock().unwrap().push(VerticalPodAutoscaler::observing(name, &self.namespace, labels));
    }

    fn check_namespace(&self, namespace: &str) -> Result<(), kube::Error> {
        if namespace != self.namespace {
            return Err(api_error(404, "NotFound"));
        }
        Ok(())
    }

    pub fn fail_create_of(&self, name: &str) {
        self.failing_creates.lock().unwrap().insert(name.to_string());
    }

    pub fn fail_listing(&self) {
        *self.fail_listing.lock().unwrap() = true;
    }

    pub fn create_calls(&self) -> Vec<String> {
        self.create_calls.lock().unwrap().clone()
    }

    pub fn vpa_names(&self) -> Vec<String> {
        self.vpas.lock().unwrap().iter().map(|vpa| vpa.name_any()).collect()
    }

    pub fn vpa(&self, name: &str) -> Option<VerticalPodAutoscaler> {
        self.vpas.lock().unwrap().iter().find(|vpa| vpa.name_any() == name).cloned()
    }
}

#[async_trait]
impl ClusterStore for InMemoryClusterStore {
    async fn list_workloads(&self, namespace: &str) -> Result<Vec<String>, kube::Error> {
        self.check_namespace(namespace)?;
        if *self.fail_listing.lock().unwrap() {
            return Err(api_error(503, "ServiceUnavailable"));
        }
        Ok(self.workloads.lock().unwrap().clone())
    }

    async fn list_policies(&self, namespace: &str, labels: &BTreeMap<String, String>) -> Result<Vec<String>, kube::Error> {
        self.check_namespace(namespace)?;
        if *self.fail_listing.lock().unwrap() {
            return Err(api_error(503, "ServiceUnavailable"));
        }
        Ok(self.vpas.lock().unwrap().iter()
            .filter(|vpa| labels.iter().all(|(k, v)| vpa.labels().get(k) == Some(v)))
            .map(|vpa| vpa.name_any())
            .collect())
    }

    async fn create_policy(&self, namespace: &str, vpa: &VerticalPodAutoscaler) -> Result<(), kube::Error> {
        let name = vpa.name_any();
        self.create_calls.lock().unwrap().push(name.clone());
        self.check_namespace(namespace)?;
        if vpa.namespace().as_deref() != Some(namespace) {
            return Err(api_error(400, "BadRequest"));
        }
        if self.failing_creates.lock().unwrap().contains(&name) {
            return Err(api_error(409, "AlreadyExists"));
        }
        self.vpas.lock().unwrap().push(vpa.clone());
        Ok(())
    }
}
