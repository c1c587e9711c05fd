//! Utility modules

pub mod error;
pub mod info_response;

pub use error::{ClusterError, ExplorerError, InfoError, Result};
pub use info_response::{namespace_command, parse_info_response, split_list, LIST_SEPARATOR};
