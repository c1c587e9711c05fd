//! Cluster node representation

use std::collections::HashMap;

use serde::Serialize;

use crate::info::{FieldMap, InfoFormat};
use crate::utils::{split_list, InfoError, LIST_SEPARATOR};

/// Info commands a node snapshot is built from
pub const NODE_COMMAND: &str = "node";
pub const SERVICE_COMMAND: &str = "service";
pub const BUILD_COMMAND: &str = "build";
pub const STATISTICS_COMMAND: &str = "statistics";

/// Cluster node information
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterNode {
    /// Node ID from the `node` reply, or the caller's label when absent
    pub id: String,
    /// First access address from the `service` reply
    pub address: Option<String>,
    /// Server version from the `build` reply
    pub build: Option<String>,
    /// Node-wide `statistics` reply
    pub statistics: FieldMap,
}

impl ClusterNode {
    /// Build a node from its info replies
    ///
    /// `label` identifies the node when it did not answer `node`.
    pub fn from_responses(label: &str, responses: &HashMap<String, String>) -> Result<Self, InfoError> {
        let non_empty = |command: &str| {
            responses
                .get(command)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let id = non_empty(NODE_COMMAND).unwrap_or(label).to_string();
        let address = non_empty(SERVICE_COMMAND)
            .and_then(|v| split_list(v, LIST_SEPARATOR).first().map(|a| a.to_string()));
        let build = non_empty(BUILD_COMMAND).map(String::from);

        let mut statistics = FieldMap::new();
        if let Some(raw) = non_empty(STATISTICS_COMMAND) {
            statistics.apply_overwrite(raw, InfoFormat::SEMICOLON)?;
        }

        Ok(Self {
            id,
            address,
            build,
            statistics,
        })
    }

    /// Display name: ID, with the address when known
    pub fn display_name(&self) -> String {
        match self.address {
            Some(ref address) => format!("{} ({})", self.id, address),
            None => self.id.clone(),
        }
    }
}
