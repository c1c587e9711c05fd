//! Tree view over a cluster snapshot
//!
//! A view layer walks the snapshot through [`TreeEntity`]: every item has a
//! label and, possibly, children. The layout is
//!
//! ```text
//! Cluster
//! ├── Namespaces
//! │   └── <namespace>
//! │       ├── <set>
//! │       │   └── key = value
//! │       └── key = value          (namespace statistics)
//! ├── Packages
//! │   └── <udf file>
//! └── Nodes
//!     └── <node>
//!         └── key = value          (node statistics)
//! ```

use super::namespace::Namespace;
use super::node::ClusterNode;
use super::topology::ClusterSnapshot;
use crate::info::{FieldMap, FieldValue, InfoRecord, NamedValue};

/// Something the view layer can display
pub trait TreeEntity {
    /// Label shown for this item
    fn name(&self) -> String;

    fn has_children(&self) -> bool;

    /// Child items, in display order
    fn children(&self) -> Vec<TreeItem<'_>>;
}

/// Top-level folders under the cluster root
#[derive(Debug, Clone, Copy)]
pub enum Folder<'a> {
    Namespaces(&'a [Namespace]),
    Packages(&'a [InfoRecord]),
    Nodes(&'a [ClusterNode]),
}

/// One item in the tree
#[derive(Debug, Clone, Copy)]
pub enum TreeItem<'a> {
    Cluster(&'a ClusterSnapshot),
    Folder(Folder<'a>),
    Namespace(&'a Namespace),
    Node(&'a ClusterNode),
    Record(&'a InfoRecord),
    Field(NamedValue<'a>),
    Statistic(&'a str, &'a FieldValue),
}

impl<'a> TreeItem<'a> {
    /// Root of the tree for a snapshot
    pub fn root(snapshot: &'a ClusterSnapshot) -> Self {
        TreeItem::Cluster(snapshot)
    }
}

fn statistics(map: &FieldMap) -> Vec<TreeItem<'_>> {
    let mut items: Vec<(&str, &FieldValue)> = map.iter().collect();
    items.sort_by(|a, b| a.0.cmp(b.0));
    items
        .into_iter()
        .map(|(key, value)| TreeItem::Statistic(key, value))
        .collect()
}

fn record_fields(record: &InfoRecord) -> Vec<TreeItem<'_>> {
    let mut fields: Vec<NamedValue<'_>> = record.fields().collect();
    fields.sort_by(|a, b| a.key.cmp(b.key));
    fields.into_iter().map(TreeItem::Field).collect()
}

impl TreeEntity for TreeItem<'_> {
    fn name(&self) -> String {
        match self {
            TreeItem::Cluster(snapshot) => match snapshot.seed {
                Some(ref seed) => format!("Cluster ({})", seed),
                None => "Cluster".to_string(),
            },
            TreeItem::Folder(Folder::Namespaces(_)) => "Namespaces".to_string(),
            TreeItem::Folder(Folder::Packages(_)) => "Packages".to_string(),
            TreeItem::Folder(Folder::Nodes(_)) => "Nodes".to_string(),
            TreeItem::Namespace(ns) => ns.name.clone(),
            TreeItem::Node(node) => node.display_name(),
            TreeItem::Record(record) => record.name().unwrap_or("<unnamed>").to_string(),
            TreeItem::Field(field) => format!("{} = {}", field.key, field.value),
            TreeItem::Statistic(key, value) => format!("{} = {}", key, value),
        }
    }

    fn has_children(&self) -> bool {
        match self {
            TreeItem::Cluster(_) => true,
            TreeItem::Folder(Folder::Namespaces(items)) => !items.is_empty(),
            TreeItem::Folder(Folder::Packages(items)) => !items.is_empty(),
            TreeItem::Folder(Folder::Nodes(items)) => !items.is_empty(),
            TreeItem::Namespace(ns) => ns.has_children(),
            TreeItem::Node(node) => !node.statistics.is_empty(),
            TreeItem::Record(record) => record.has_fields(),
            TreeItem::Field(_) | TreeItem::Statistic(..) => false,
        }
    }

    fn children(&self) -> Vec<TreeItem<'_>> {
        match *self {
            TreeItem::Cluster(snapshot) => vec![
                TreeItem::Folder(Folder::Namespaces(&snapshot.namespaces)),
                TreeItem::Folder(Folder::Packages(&snapshot.packages)),
                TreeItem::Folder(Folder::Nodes(&snapshot.nodes)),
            ],
            TreeItem::Folder(Folder::Namespaces(items)) => {
                items.iter().map(TreeItem::Namespace).collect()
            }
            TreeItem::Folder(Folder::Packages(items)) => items.iter().map(TreeItem::Record).collect(),
            TreeItem::Folder(Folder::Nodes(items)) => items.iter().map(TreeItem::Node).collect(),
            TreeItem::Namespace(ns) => {
                let mut children: Vec<TreeItem<'_>> = ns.sets.iter().map(TreeItem::Record).collect();
                children.extend(statistics(&ns.statistics));
                children
            }
            TreeItem::Node(node) => statistics(&node.statistics),
            TreeItem::Record(record) => record_fields(record),
            TreeItem::Field(_) | TreeItem::Statistic(..) => Vec::new(),
        }
    }
}
