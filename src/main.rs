use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use crate::args::VpaCreatorArgs;
use crate::core::config::{compose_config, VpaCreatorConfig};
use crate::model::context::ContextData;
use crate::service::cluster_store::KubeClusterStore;
use crate::service::driver::{stop_after_first, Driver, TokioClock};

mod args;
mod core;
mod model;
mod policy;
mod service;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = VpaCreatorArgs::parse();
    let app_config: VpaCreatorConfig = compose_config("vpa-creator", "VPA_CREATOR")
        .context("Error loading configuration")?;
    let app_config = app_config.merge_args(args).validate()?;

    log::info!(
        "Reconciling VPAs in namespace {} (labels: {:?}, run-once: {}, dry-run: {})",
        app_config.namespace, app_config.labels, app_config.run_once, app_config.dry_run,
    );

    let store = KubeClusterStore::connect(&app_config)
        .await
        .context("Error connecting to kubernetes")?;

    let context = Arc::new(ContextData::new(store, app_config.namespace.clone(), app_config.labels.clone()));
    let driver = Driver::new(
        context,
        TokioClock,
        app_config.interval(),
        app_config.dry_run,
        stop_after_first(app_config.run_once),
    );

    let cycles = driver.run().await.context("Reconciliation aborted")?;
    log::info!("Exiting due to run-once=true after {cycles} cycle(s).");
    Ok(())
}
