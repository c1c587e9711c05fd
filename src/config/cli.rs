//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use super::explorer_config::DEFAULT_PORT;

/// Browse an Aerospike cluster's namespaces, sets and nodes from info dumps
///
/// Each input file holds one node's info reply: one `<command>\t<value>`
/// line per command (`node`, `namespaces`, `namespace/<ns>`, `sets`, ...).
#[derive(Parser, Debug, Clone)]
#[command(name = "aerospike-cluster-info")]
#[command(version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct CliArgs {
    /// Print help information
    #[arg(long = "help", action = clap::ArgAction::Help)]
    help: (),

    /// Per-node info dumps, one file per node
    #[arg(required = true, value_name = "NODE_DUMP")]
    pub inputs: Vec<PathBuf>,

    // ===== Connection Options =====
    /// Seed host the dumps were taken from (labels the cluster)
    #[arg(short = 'h', long = "host")]
    pub host: Option<String>,

    /// Seed port
    #[arg(short = 'p', long = "port", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    // ===== Input Options =====
    /// Skip node dumps that fail to parse instead of aborting
    #[arg(long = "skip-invalid")]
    pub skip_invalid: bool,

    // ===== Output Options =====
    /// Output file path (stdout when absent)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format for the snapshot
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Indented tree
    #[default]
    Text,
    Json,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && self.verbose {
            return Err("--quiet and --verbose are mutually exclusive".to_string());
        }

        if self.port == 0 {
            return Err("--port must be between 1 and 65535".to_string());
        }

        if let Some(ref host) = self.host {
            if host.trim().is_empty() {
                return Err("--host must not be empty".to_string());
            }
        }

        Ok(())
    }
}
