use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::args::VpaCreatorArgs;
use crate::core::error::Error;
use crate::model::label::validate_label;

pub fn compose_config<'de, CFG: Deserialize<'de>>(external_path: &str, env_prefix: &str) -> Result<CFG, ConfigError> {
    Config::builder()

        // Add in a local configuration file
        .add_source(File::with_name(external_path).required(false))

        // Add in settings from the environment (with a prefix of VPA_CREATOR)
        .add_source(Environment::with_prefix(env_prefix))

        .build()?
        .try_deserialize()
}

#[derive(Clone, Debug, Deserialize)]
pub struct VpaCreatorConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub kubeconfig: Option<PathBuf>,
    #[serde(default)]
    pub context: Option<String>,
    /// Stamped on every created VerticalPodAutoscaler and used to select the existing ones.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub run_once: bool,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_namespace() -> String {
    String::from("default")
}

fn default_interval_secs() -> u64 {
    30
}

impl Default for VpaCreatorConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            kubeconfig: None,
            context: None,
            labels: BTreeMap::new(),
            run_once: false,
            dry_run: false,
            interval_secs: default_interval_secs(),
        }
    }
}

impl VpaCreatorConfig {
    /// Command line flags take precedence over file and environment settings.
    pub fn merge_args(mut self, args: VpaCreatorArgs) -> Self {
        if let Some(namespace) = args.namespace {
            self.namespace = namespace;
        }
        if args.kubeconfig.is_some() {
            self.kubeconfig = args.kubeconfig;
        }
        if args.context.is_some() {
            self.context = args.context;
        }
        if !args.labels.is_empty() {
            self.labels = args.labels.into_iter().collect();
        }
        if let Some(interval_secs) = args.interval_secs {
            self.interval_secs = interval_secs;
        }
        self.run_once |= args.run_once;
        self.dry_run |= args.dry_run;
        self
    }

    pub fn validate(self) -> Result<Self, Error> {
        if self.namespace.trim().is_empty() {
            return Err(Error::InvalidConfig(String::from("namespace must not be empty")));
        }
        if self.interval_secs == 0 {
            return Err(Error::InvalidConfig(String::from("interval_secs must be greater than zero")));
        }
        for (key, value) in &self.labels {
            validate_label(key, value).map_err(Error::InvalidConfig)?;
        }
        Ok(self)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}
