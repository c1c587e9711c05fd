//! aerospike-cluster-info - browse Aerospike cluster topology from info dumps
//!
//! Reads one info reply per node, merges them into a cluster snapshot and
//! prints it as a tree or as JSON.

use anyhow::Result;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use aerospike_cluster_info::cluster::SnapshotManager;
use aerospike_cluster_info::config::{CliArgs, ExplorerConfig};
use aerospike_cluster_info::dump_loader::load_node_dumps;
use aerospike_cluster_info::report::{reporter, SnapshotReporter};

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Setup logging
    setup_logging(args.verbose, args.quiet);

    // Build configuration
    let config = ExplorerConfig::from_cli(&args)?;

    info!("Loading {} node dump(s)", config.inputs.len());
    let builder = load_node_dumps(&config)?;

    let manager = SnapshotManager::new();
    let snapshot = manager.refresh(builder)?;
    info!("Cluster snapshot: {}", reporter::summary(&snapshot));

    let reporter = SnapshotReporter::new(config.output_format);
    match config.output_path {
        Some(ref path) => {
            info!("Writing snapshot to: {:?}", path);
            reporter.write_file(path, &snapshot)?;
        }
        None => reporter.report(&snapshot)?,
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
