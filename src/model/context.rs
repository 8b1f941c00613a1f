use std::collections::BTreeMap;

pub struct ContextData<S> {
    /// Cluster access used to list Deployments and VPAs and to create VPAs.
    pub store: S,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
}

impl<S> ContextData<S> {
    pub fn new(store: S, namespace: impl Into<String>, labels: BTreeMap<String, String>) -> Self {
        Self {
            store,
            namespace: namespace.into(),
            labels,
        }
    }
}
