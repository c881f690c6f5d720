mod cli;
mod report;

use std::io;

use clap::Parser;
use clusterstats_config::Settings;
use clusterstats_core::{discover_descriptors, inspect_cluster, InspectOptions, KubeClient};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();

    let settings = Settings::load(cli.config.as_deref())?.with_overrides(
        cli.kubeconfig_dir,
        cli.large_size,
        cli.concurrency,
    );
    settings.validate()?;

    let descriptors = discover_descriptors(&settings.kubeconfig_path)?;
    if descriptors.is_empty() {
        tracing::warn!(root = %settings.kubeconfig_path.display(), "no kubeconfig files found");
    }

    let options = InspectOptions { large_size: settings.configmap_large_size, concurrency: settings.concurrency };
    for descriptor in &descriptors {
        // an unusable kubeconfig ends the run
        let client = KubeClient::from_descriptor(descriptor).await?;
        tracing::info!(%descriptor, context = client.context(), "inspecting cluster");

        let report = inspect_cluster(&client, options).await;
        tracing::info!(
            %descriptor,
            namespaces = report.namespaces.len(),
            large_configmaps = report.census.large_objects.len(),
            "cluster inspected"
        );

        print!("{}", report::render(descriptor, &report));
        // failed queries always reach stderr, whatever RUST_LOG says
        if let Some(failures) = report::render_failures(descriptor, &report) {
            eprint!("{failures}");
        }
    }

    Ok(())
}
