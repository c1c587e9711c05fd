//! Explorer configuration derived from CLI arguments

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::cli::{CliArgs, OutputFormat};
use crate::utils::{ExplorerError, Result};

/// Default Aerospike service port
pub const DEFAULT_PORT: u16 = 3000;

/// Seed node a cluster is reached through
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedAddress {
    pub host: String,
    pub port: u16,
}

impl SeedAddress {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }
}

impl fmt::Display for SeedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Complete explorer configuration
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    // Cluster
    pub seed: Option<SeedAddress>,

    // Input
    pub inputs: Vec<PathBuf>,
    pub skip_invalid: bool,

    // Output
    pub output_path: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}

impl ExplorerConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        args.validate().map_err(ExplorerError::Config)?;

        let seed = args
            .host
            .as_ref()
            .map(|host| SeedAddress::new(host.trim(), args.port));

        Ok(Self {
            seed,
            inputs: args.inputs.clone(),
            skip_invalid: args.skip_invalid,
            output_path: args.output.clone(),
            output_format: args.output_format,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli() {
        let args =
            CliArgs::try_parse_from(["aerospike-cluster-info", "-h", " db1 ", "a.txt"]).unwrap();
        let config = ExplorerConfig::from_cli(&args).unwrap();

        assert_eq!(config.seed, Some(SeedAddress::new("db1", DEFAULT_PORT)));
        assert_eq!(config.inputs, vec![PathBuf::from("a.txt")]);
        assert_eq!(config.output_format, OutputFormat::Text);
    }

    #[test]
    fn test_no_host_no_seed() {
        let args = CliArgs::try_parse_from(["aerospike-cluster-info", "a.txt"]).unwrap();
        let config = ExplorerConfig::from_cli(&args).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_args_rejected() {
        let args = CliArgs::try_parse_from(["aerospike-cluster-info", "-q", "-v", "a.txt"]).unwrap();
        let err = ExplorerConfig::from_cli(&args).unwrap_err();
        assert!(matches!(err, ExplorerError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: --quiet and --verbose are mutually exclusive"
        );
    }

    #[test]
    fn test_seed_display() {
        assert_eq!(SeedAddress::new("10.0.0.1", 3000).to_string(), "10.0.0.1:3000");
    }
}
