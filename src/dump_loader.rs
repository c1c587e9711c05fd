//! Node dump loading
//!
//! Reads one info reply per file and folds each into a snapshot builder.
//! A dump is what `asinfo` prints for a multi-command request: one
//! `<command>\t<value>` line per command.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::cluster::SnapshotBuilder;
use crate::config::ExplorerConfig;
use crate::utils::Result;

/// Label a node by its dump's file name
fn node_label(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load every configured dump into a fresh builder
///
/// With `skip_invalid`, a dump that cannot be read or folded is logged and
/// skipped. Otherwise the first failure aborts the load.
pub fn load_node_dumps(config: &ExplorerConfig) -> Result<SnapshotBuilder> {
    let mut builder = SnapshotBuilder::new(config.seed.clone());

    for path in &config.inputs {
        let label = node_label(path);
        let outcome: Result<()> = fs::read_to_string(path)
            .map_err(Into::into)
            .and_then(|text| builder.add_node_response(&label, &text).map_err(Into::into));

        match outcome {
            Ok(()) => debug!("Loaded node dump {:?}", path),
            Err(e) if config.skip_invalid => warn!("Skipping node dump {:?}: {}", path, e),
            Err(e) => return Err(e),
        }
    }

    Ok(builder)
}
