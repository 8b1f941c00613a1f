use std::path::PathBuf;

use clap::Parser;

use crate::model::label::validate_label;

/// Creates a VerticalPodAutoscaler for every Deployment in a namespace
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct VpaCreatorArgs {
    /// Namespace to reconcile
    #[arg(short, long)]
    pub namespace: Option<String>,
    /// Path to the kubeconfig file, inferred from the environment when omitted
    #[arg(long)]
    pub kubeconfig: Option<PathBuf>,
    /// Kubeconfig context to use
    #[arg(long)]
    pub context: Option<String>,
    /// Label stamped on created VPAs and used to select existing ones (repeatable)
    #[arg(short, long = "label", value_name = "KEY=VALUE", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,
    /// Run a single reconciliation cycle then exit
    #[arg(long)]
    pub run_once: bool,
    /// Log the VPAs that would be created without creating them
    #[arg(long)]
    pub dry_run: bool,
    /// Seconds to sleep between reconciliation cycles
    #[arg(long)]
    pub interval_secs: Option<u64>,
}

fn parse_label(s: &str) -> Result<(String, String), String> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(format!("invalid label '{s}', expected KEY=VALUE"));
    };
    validate_label(key, value)?;
    Ok((key.to_string(), value.to_string()))
}
