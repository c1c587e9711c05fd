//! Cluster topology snapshot
//!
//! A snapshot is rebuilt wholesale on every refresh: the caller feeds each
//! node's info replies into a [`SnapshotBuilder`], which sums per-node set
//! and namespace counters into cluster-wide records.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use super::dialect::SetDialect;
use super::namespace::Namespace;
use super::node::ClusterNode;
use crate::config::SeedAddress;
use crate::info::{InfoFormat, InfoRecord};
use crate::utils::{
    namespace_command, parse_info_response, split_list, ClusterError, InfoError, LIST_SEPARATOR,
};

pub const NAMESPACES_COMMAND: &str = "namespaces";
pub const SETS_COMMAND: &str = "sets";
pub const UDF_LIST_COMMAND: &str = "udf-list";

/// Name key of a UDF package entry
pub const PACKAGE_NAME_KEY: &str = "filename";

/// Cluster state assembled from one refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterSnapshot {
    /// Seed the refresh started from
    pub seed: Option<SeedAddress>,
    /// Key naming used by the nodes' `sets` replies
    pub dialect: SetDialect,
    /// Nodes, ordered by ID
    pub nodes: Vec<ClusterNode>,
    /// Namespaces, ordered by name
    pub namespaces: Vec<Namespace>,
    /// Registered UDF packages, ordered by file name
    pub packages: Vec<InfoRecord>,
}

impl ClusterSnapshot {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn namespace(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.iter().find(|ns| ns.name == name)
    }

    pub fn node(&self, id: &str) -> Option<&ClusterNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a set by namespace and set name
    pub fn set(&self, namespace: &str, set: &str) -> Option<&InfoRecord> {
        self.namespace(namespace).and_then(|ns| ns.fetch_set(set))
    }

    pub fn package(&self, filename: &str) -> Option<&InfoRecord> {
        self.packages.iter().find(|p| p.name() == Some(filename))
    }

    /// Cluster-wide object count of a set
    pub fn set_object_count(&self, namespace: &str, set: &str) -> Option<i64> {
        self.set(namespace, set)
            .and_then(|s| s.field_map().get_integer(self.dialect.object_count_key()))
    }
}

/// Per-refresh accumulator for node replies
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    seed: Option<SeedAddress>,
    dialect: Option<SetDialect>,
    nodes: Vec<ClusterNode>,
    node_ids: HashSet<String>,
    namespaces: BTreeMap<String, Namespace>,
    packages: BTreeMap<String, InfoRecord>,
}

/// Working copy of the builder's merged state while one node is folded in
struct Staged {
    namespaces: BTreeMap<String, Namespace>,
    packages: BTreeMap<String, InfoRecord>,
}

impl SnapshotBuilder {
    pub fn new(seed: Option<SeedAddress>) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Number of nodes folded in so far
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add one node from a raw multi-command info reply
    pub fn add_node_response(&mut self, label: &str, response: &str) -> Result<(), ClusterError> {
        let responses = parse_info_response(response);
        self.add_node(label, &responses)
    }

    /// Add one node's info replies, keyed by command
    ///
    /// Either the whole node is folded in or, on error, the builder is left
    /// as it was before the call.
    pub fn add_node(
        &mut self,
        label: &str,
        responses: &HashMap<String, String>,
    ) -> Result<(), ClusterError> {
        let node = ClusterNode::from_responses(label, responses)
            .map_err(|source| bad_record(label, "statistics", source))?;

        if self.node_ids.contains(&node.id) {
            return Err(ClusterError::DuplicateNode(node.id));
        }

        let namespaces_reply =
            responses
                .get(NAMESPACES_COMMAND)
                .ok_or_else(|| ClusterError::MissingResponse {
                    node: node.id.clone(),
                    command: NAMESPACES_COMMAND.to_string(),
                })?;
        let sets_reply = responses.get(SETS_COMMAND).map(String::as_str).unwrap_or("");

        let dialect = match self.dialect {
            Some(dialect) => dialect,
            None => SetDialect::detect(sets_reply),
        };

        let mut staged = Staged {
            namespaces: self.namespaces.clone(),
            packages: self.packages.clone(),
        };

        for name in split_list(namespaces_reply, LIST_SEPARATOR) {
            let namespace = staged
                .namespaces
                .entry(name.to_string())
                .or_insert_with(|| Namespace::new(name));

            let command = namespace_command(name);
            match responses.get(&command) {
                Some(raw) => namespace
                    .merge_statistics(raw.trim())
                    .map_err(|source| bad_record(&node.id, &command, source))?,
                None => debug!("Node {} has no '{}' reply", node.id, command),
            }
        }

        let mut set_count = 0;
        for line in split_list(sets_reply, LIST_SEPARATOR) {
            let ns_name = namespace_of(line, dialect)
                .map_err(|source| bad_record(&node.id, SETS_COMMAND, source))?;

            let namespace = staged.namespaces.entry(ns_name.clone()).or_insert_with(|| {
                warn!(
                    "Node {} reports sets for namespace '{}' missing from its namespace list",
                    node.id, ns_name
                );
                Namespace::new(&ns_name)
            });

            namespace
                .merge_set_info(dialect, line)
                .map_err(|source| bad_record(&node.id, SETS_COMMAND, source))?;
            set_count += 1;
        }

        if let Some(reply) = responses.get(UDF_LIST_COMMAND) {
            for line in split_list(reply, LIST_SEPARATOR) {
                fold_package(&mut staged.packages, line)
                    .map_err(|source| bad_record(&node.id, UDF_LIST_COMMAND, source))?;
            }
        }

        debug!(
            "Folded node {} ({} namespaces, {} set lines)",
            node.id,
            staged.namespaces.len(),
            set_count
        );

        if set_count > 0 {
            self.dialect = Some(dialect);
        }
        self.namespaces = staged.namespaces;
        self.packages = staged.packages;
        self.node_ids.insert(node.id.clone());
        self.nodes.push(node);
        Ok(())
    }

    /// Build the final snapshot
    pub fn build(self) -> Result<ClusterSnapshot, ClusterError> {
        if self.nodes.is_empty() {
            return Err(ClusterError::NoNodes);
        }

        let mut nodes = self.nodes;
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let namespaces = self
            .namespaces
            .into_values()
            .map(|mut ns| {
                ns.sort_sets();
                ns
            })
            .collect();

        Ok(ClusterSnapshot {
            seed: self.seed,
            dialect: self.dialect.unwrap_or_default(),
            nodes,
            namespaces,
            packages: self.packages.into_values().collect(),
        })
    }
}

fn bad_record(node: &str, command: &str, source: InfoError) -> ClusterError {
    ClusterError::BadRecord {
        node: node.to_string(),
        command: command.to_string(),
        source,
    }
}

/// Namespace named by one set line
fn namespace_of(line: &str, dialect: SetDialect) -> Result<String, InfoError> {
    let key = dialect.namespace_key();
    for field in InfoFormat::COLON.fields(line) {
        let (k, v) = field?;
        if k == key {
            return Ok(v.to_string());
        }
    }
    Err(InfoError::MissingNameKey {
        key: key.to_string(),
    })
}

/// Packages are identical on every node, so a repeat entry overwrites
fn fold_package(packages: &mut BTreeMap<String, InfoRecord>, line: &str) -> Result<(), InfoError> {
    let package = InfoRecord::from_info(PACKAGE_NAME_KEY, InfoFormat::COMMA, line)?;
    let name = package.name().unwrap_or_default().to_string();

    match packages.get_mut(&name) {
        Some(existing) => existing.parse_overwrite(line),
        None => {
            packages.insert(name, package);
            Ok(())
        }
    }
}
