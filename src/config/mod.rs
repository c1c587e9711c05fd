//! Configuration module

pub mod cli;
pub mod explorer_config;

pub use cli::{CliArgs, OutputFormat};
pub use explorer_config::{ExplorerConfig, SeedAddress, DEFAULT_PORT};
