use std::collections::BTreeMap;

use kube::api::ObjectMeta;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub static TARGET_API_VERSION: &str = "apps/v1";
pub static TARGET_KIND: &str = "Deployment";

/// Spec object for the VerticalPodAutoscaler resource managed by the autoscaler project.
/// Only the fields written by this controller are modelled.
#[derive(CustomResource, Deserialize, Serialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[kube(group = "autoscaling.k8s.io", version = "v1", kind = "VerticalPodAutoscaler", namespaced)]
#[serde(rename_all = "camelCase")]
pub struct VerticalPodAutoscalerSpec {
    pub target_ref: TargetRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_policy: Option<PodUpdatePolicy>,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TargetRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    pub kind: String,
    pub name: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PodUpdatePolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_mode: Option<UpdateMode>,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub enum UpdateMode {
    /// Recommendations are computed but never applied
    Off,
    Initial,
    Recreate,
    Auto,
}

impl VerticalPodAutoscaler {
    /// Builds the observation-only VPA for the Deployment `name`. The VPA shares the Deployment name.
    pub fn observing(name: &str, namespace: &str, labels: &BTreeMap<String, String>) -> Self {
        Self {
            metadata: ObjectMeta {
                name: Some(name.to_owned()),
                namespace: Some(namespace.to_owned()),
                labels: Some(labels.clone()),
                ..ObjectMeta::default()
            },
            spec: VerticalPodAutoscalerSpec {
                target_ref: TargetRef {
                    api_version: Some(String::from(TARGET_API_VERSION)),
                    kind: String::from(TARGET_KIND),
                    name: name.to_owned(),
                },
                update_policy: Some(PodUpdatePolicy {
                    update_mode: Some(UpdateMode::Off),
                }),
            },
        }
    }
}
