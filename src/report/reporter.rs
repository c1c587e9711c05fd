//! Snapshot reporter - output formatting and export

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::cluster::{ClusterSnapshot, TreeEntity, TreeItem};
use crate::config::OutputFormat;
use crate::utils::Result;

const INDENT: &str = "  ";

/// Snapshot reporter
pub struct SnapshotReporter {
    format: OutputFormat,
}

impl SnapshotReporter {
    /// Create new reporter with specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render a snapshot in the reporter's format
    pub fn render(&self, snapshot: &ClusterSnapshot) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(render_tree(snapshot)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(snapshot)?),
        }
    }

    /// Report snapshot to stdout
    pub fn report(&self, snapshot: &ClusterSnapshot) -> Result<()> {
        let rendered = self.render(snapshot)?;
        print!("{}", with_trailing_newline(rendered));
        Ok(())
    }

    /// Write snapshot to a file
    pub fn write_file(&self, path: &Path, snapshot: &ClusterSnapshot) -> Result<()> {
        let rendered = self.render(snapshot)?;
        let mut file = File::create(path)?;
        write!(file, "{}", with_trailing_newline(rendered))?;
        Ok(())
    }
}

fn with_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Render the snapshot as an indented tree, two spaces per level
pub fn render_tree(snapshot: &ClusterSnapshot) -> String {
    let mut out = String::new();
    render_item(&TreeItem::root(snapshot), 0, &mut out);
    out
}

fn render_item(item: &dyn TreeEntity, depth: usize, out: &mut String) {
    out.push_str(&INDENT.repeat(depth));
    out.push_str(&item.name());
    out.push('\n');

    if item.has_children() {
        for child in item.children() {
            render_item(&child, depth + 1, out);
        }
    }
}

/// One-line summary used in logs
pub fn summary(snapshot: &ClusterSnapshot) -> String {
    let set_count: usize = snapshot.namespaces.iter().map(|ns| ns.sets.len()).sum();
    format!(
        "{} nodes, {} namespaces, {} sets, {} packages",
        snapshot.node_count(),
        snapshot.namespaces.len(),
        set_count,
        snapshot.packages.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::SnapshotBuilder;

    fn snapshot() -> ClusterSnapshot {
        let mut builder = SnapshotBuilder::new(None);
        builder
            .add_node_response(
                "a",
                "node\tA1\nnamespaces\ttest\nsets\tns_name=test:set_name=demo:n_objects=5;\n",
            )
            .unwrap();
        builder
            .add_node_response(
                "b",
                "node\tB2\nnamespaces\ttest\nsets\tns_name=test:set_name=demo:n_objects=3;\n",
            )
            .unwrap();
        builder.build().unwrap()
    }

    #[test]
    fn test_render_text_tree() {
        let text = SnapshotReporter::new(OutputFormat::Text)
            .render(&snapshot())
            .unwrap();

        let expected = "\
Cluster
  Namespaces
    test
      demo
        n_objects = 8
        ns_name = test
        set_name = demo
  Packages
  Nodes
    A1
    B2
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_json() {
        let json = SnapshotReporter::new(OutputFormat::Json)
            .render(&snapshot())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["dialect"], "legacy");
        assert_eq!(value["namespaces"][0]["name"], "test");
        assert_eq!(value["namespaces"][0]["sets"][0]["fields"]["n_objects"], 8);
        assert_eq!(value["nodes"].as_array().map(|n| n.len()), Some(2));
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.txt");

        SnapshotReporter::new(OutputFormat::Text)
            .write_file(&path, &snapshot())
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("Cluster\n"));
        assert!(written.contains("n_objects = 8"));
    }

    #[test]
    fn test_summary() {
        assert_eq!(
            summary(&snapshot()),
            "2 nodes, 1 namespaces, 1 sets, 0 packages"
        );
    }
}
