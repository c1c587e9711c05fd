//! Error types for aerospike-cluster-info

use std::io;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Info error: {0}")]
    Info(#[from] InfoError),

    #[error("Cluster error: {0}")]
    Cluster(#[from] ClusterError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised while parsing an info record
///
/// Both variants are local to a single parse call. Fields applied before
/// the fault stay applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfoError {
    #[error("Malformed field '{field}': {reason}")]
    Parse { field: String, reason: &'static str },

    #[error("Name key '{key}' missing after parse")]
    MissingNameKey { key: String },
}

impl InfoError {
    pub(crate) fn parse(field: &str, reason: &'static str) -> Self {
        InfoError::Parse {
            field: field.to_string(),
            reason,
        }
    }
}

/// Cluster-related errors
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Node {node} did not answer info command '{command}'")]
    MissingResponse { node: String, command: String },

    #[error("Node {node}: bad '{command}' record: {source}")]
    BadRecord {
        node: String,
        command: String,
        source: InfoError,
    },

    #[error("Node {0} reported twice in one refresh")]
    DuplicateNode(String),

    #[error("No nodes contributed to the snapshot")]
    NoNodes,
}

pub type Result<T> = std::result::Result<T, ExplorerError>;
