use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration - {0}")]
    InvalidConfig(String),
    #[error("Failed to load kubeconfig: {0}")]
    KubeConfig(#[source] kube::config::KubeconfigError),
    #[error("Failed to infer kubernetes configuration: {0}")]
    InferConfig(#[source] kube::config::InferConfigError),
    #[error("Failed to build kubernetes client: {0}")]
    ClientInit(#[source] kube::Error),
    #[error("Failed to list Deployments in namespace {namespace}: {source}")]
    WorkloadListFailed {
        namespace: String,
        #[source]
        source: kube::Error,
    },
    #[error("Failed to list VerticalPodAutoscalers in namespace {namespace}: {source}")]
    PolicyListFailed {
        namespace: String,
        #[source]
        source: kube::Error,
    },
    #[error("Failed to create VerticalPodAutoscaler {name}: {source}")]
    PolicyCreationFailed {
        name: String,
        #[source]
        source: kube::Error,
    },
}

impl Error {
    /// Fatal errors must stop the process, anything else is retried on the next cycle.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::PolicyCreationFailed { .. })
    }
}
