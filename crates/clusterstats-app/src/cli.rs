use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "clusterstats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Count role bindings and secrets and find oversized ConfigMaps across clusters")]
pub struct Cli {
    /// Settings file (defaults to ./conf.yaml, then the user config dir)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory of kubeconfig files, one per cluster
    #[arg(short, long, value_name = "DIR")]
    pub kubeconfig_dir: Option<PathBuf>,

    /// Report ConfigMaps larger than this many bytes
    #[arg(short, long, value_name = "BYTES")]
    pub large_size: Option<u64>,

    /// Namespaces queried at the same time per cluster
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Log every query to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
