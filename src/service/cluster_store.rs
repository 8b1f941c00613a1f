use std::collections::BTreeMap;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{ListParams, PostParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Api, Client, Config, ResourceExt};

use crate::core::config::VpaCreatorConfig;
use crate::core::error::Error;
use crate::model::vpa::VerticalPodAutoscaler;

/// The cluster operations the reconciliation loop depends on.
#[async_trait]
pub trait ClusterStore {
    async fn list_workloads(&self, namespace: &str) -> Result<Vec<String>, kube::Error>;

    async fn list_policies(&self, namespace: &str, labels: &BTreeMap<String, String>) -> Result<Vec<String>, kube::Error>;

    async fn create_policy(&self, namespace: &str, vpa: &VerticalPodAutoscaler) -> Result<(), kube::Error>;
}

/// Renders a label map as an equality-based selector, `k1=v1,k2=v2` in key order.
pub fn label_selector(labels: &BTreeMap<String, String>) -> String {
    labels.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn object_names<K: ResourceExt>(kind: &str, objects: impl IntoIterator<Item = K>) -> Vec<String> {
    objects.into_iter()
        .filter_map(|obj| match &obj.meta().name {
            Some(name) => {
                log::debug!("Found {kind}: {name}");
                Some(name.clone())
            }
            None => {
                log::warn!("Skipping {kind} without a name");
                None
            }
        })
        .collect()
}

pub struct KubeClusterStore {
    client: Client,
}

impl KubeClusterStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from an explicit kubeconfig path or context, falling back to the inferred configuration
    /// (`KUBECONFIG`, `~/.kube/config`, in-cluster service account).
    pub async fn connect(cfg: &VpaCreatorConfig) -> Result<Self, Error> {
        let options = KubeConfigOptions {
            context: cfg.context.clone(),
            ..KubeConfigOptions::default()
        };
        let client_config = match &cfg.kubeconfig {
            Some(path) => {
                log::debug!("Using kubeconfig: {}", path.display());
                let kubeconfig = Kubeconfig::read_from(path).map_err(Error::KubeConfig)?;
                Config::from_custom_kubeconfig(kubeconfig, &options)
                    .await
                    .map_err(Error::KubeConfig)?
            }
            None if cfg.context.is_some() => Config::from_kubeconfig(&options)
                .await
                .map_err(Error::KubeConfig)?,
            None => Config::infer()
                .await
                .map_err(Error::InferConfig)?,
        };
        let client = Client::try_from(client_config).map_err(Error::ClientInit)?;
        Ok(Self::new(client))
    }

    fn deployments(&self, namespace: &str) -> Api<Deployment> { Api::namespaced(self.client.clone(), namespace) }
    fn vpas(&self, namespace: &str) -> Api<VerticalPodAutoscaler> { Api::namespaced(self.client.clone(), namespace) }
}

#[async_trait]
impl ClusterStore for KubeClusterStore {
    async fn list_workloads(&self, namespace: &str) -> Result<Vec<String>, kube::Error> {
        let deployments = self.deployments(namespace).list(&ListParams::default()).await?;
        log::debug!("There are {} deployments in namespace {namespace}", deployments.items.len());
        Ok(object_names("Deployment", deployments))
    }

    async fn list_policies(&self, namespace: &str, labels: &BTreeMap<String, String>) -> Result<Vec<String>, kube::Error> {
        let params = ListParams::default().labels(&label_selector(labels));
        let vpas = self.vpas(namespace).list(&params).await?;
        Ok(object_names("VerticalPodAutoscaler", vpas))
    }

    async fn create_policy(&self, namespace: &str, vpa: &VerticalPodAutoscaler) -> Result<(), kube::Error> {
        self.vpas(namespace).create(&PostParams::default(), vpa).await?;
        Ok(())
    }
}
