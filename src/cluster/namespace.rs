//! Namespace representation

use serde::Serialize;

use super::dialect::SetDialect;
use crate::info::{FieldMap, InfoFormat, InfoRecord};
use crate::utils::InfoError;

/// A namespace and the sets reported under it
///
/// Both the namespace statistics and every set are summed across the nodes
/// that contributed to the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Namespace {
    /// Namespace name from the `namespaces` reply
    pub name: String,
    /// Merged `namespace/<name>` statistics
    pub statistics: FieldMap,
    /// Sets in this namespace
    pub sets: Vec<InfoRecord>,
}

impl Namespace {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            statistics: FieldMap::new(),
            sets: Vec::new(),
        }
    }

    /// Fold one node's `namespace/<name>` reply into the statistics
    pub fn merge_statistics(&mut self, raw: &str) -> Result<(), InfoError> {
        self.statistics.apply_merge(raw, InfoFormat::SEMICOLON)
    }

    /// Fold one set line from a node's `sets` reply
    ///
    /// A set already seen on another node is merge-parsed, so its counters
    /// add up. The dialect's namespace and name keys identify the set and are
    /// overwritten rather than summed. A new set is created from the line.
    pub fn merge_set_info(
        &mut self,
        dialect: SetDialect,
        raw: &str,
    ) -> Result<&InfoRecord, InfoError> {
        let incoming = InfoRecord::from_info(dialect.name_key(), InfoFormat::COLON, raw)?;

        let position = self
            .sets
            .iter()
            .position(|set| set.name() == incoming.name());

        match position {
            Some(idx) => {
                let set = &mut self.sets[idx];
                set.parse_merge_except(raw, &[dialect.namespace_key(), dialect.name_key()])?;
                Ok(set)
            }
            None => {
                self.sets.push(incoming);
                Ok(&self.sets[self.sets.len() - 1])
            }
        }
    }

    /// Look up a set by display name
    pub fn fetch_set(&self, name: &str) -> Option<&InfoRecord> {
        self.sets.iter().find(|set| set.name() == Some(name))
    }

    pub fn has_children(&self) -> bool {
        !self.sets.is_empty() || !self.statistics.is_empty()
    }

    /// Order sets by name for display
    pub(crate) fn sort_sets(&mut self) {
        self.sets.sort_by(|a, b| a.name().cmp(&b.name()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::FieldValue;

    #[test]
    fn test_sets_merge_across_nodes() {
        let mut ns = Namespace::new("test");
        ns.merge_set_info(SetDialect::Legacy, "ns_name=test:set_name=demo:n_objects=5:set-delete=false")
            .unwrap();
        ns.merge_set_info(SetDialect::Legacy, "ns_name=test:set_name=users:n_objects=2")
            .unwrap();
        let demo = ns
            .merge_set_info(SetDialect::Legacy, "ns_name=test:set_name=demo:n_objects=3:set-delete=false")
            .unwrap();

        assert_eq!(demo.get("n_objects"), Some(&FieldValue::Integer(8)));
        assert_eq!(ns.sets.len(), 2);
        assert_eq!(
            ns.fetch_set("users").and_then(|s| s.get("n_objects")),
            Some(&FieldValue::Integer(2))
        );
    }

    #[test]
    fn test_namespace_name_is_text_and_not_summed() {
        let mut ns = Namespace::new("test");
        ns.merge_set_info(SetDialect::Legacy, "ns_name=test:set_name=demo:n_objects=1")
            .unwrap();
        ns.merge_set_info(SetDialect::Legacy, "ns_name=test:set_name=demo:n_objects=1")
            .unwrap();

        let demo = ns.fetch_set("demo").unwrap();
        assert_eq!(demo.get("ns_name"), Some(&FieldValue::Text("test".to_string())));
    }

    #[test]
    fn test_numeric_set_name_stays_one_set() {
        let mut ns = Namespace::new("test");
        for _ in 0..3 {
            ns.merge_set_info(SetDialect::Legacy, "ns_name=test:set_name=7:n_objects=1")
                .unwrap();
        }

        assert_eq!(ns.sets.len(), 1);
        let set = ns.fetch_set("7").unwrap();
        assert_eq!(set.get("n_objects"), Some(&FieldValue::Integer(3)));
        assert_eq!(set.get("set_name"), Some(&FieldValue::Integer(7)));
    }

    #[test]
    fn test_modern_identity_keys_not_summed() {
        let mut ns = Namespace::new("42");
        for _ in 0..2 {
            ns.merge_set_info(SetDialect::Modern, "ns=42:set=007:objects=4")
                .unwrap();
        }

        let set = ns.fetch_set("007").unwrap();
        assert_eq!(set.get("ns"), Some(&FieldValue::Integer(42)));
        assert_eq!(set.get("objects"), Some(&FieldValue::Integer(8)));
        assert_eq!(ns.sets.len(), 1);
    }

    #[test]
    fn test_set_line_without_name_is_rejected() {
        let mut ns = Namespace::new("test");
        let err = ns
            .merge_set_info(SetDialect::Legacy, "ns_name=test:n_objects=1")
            .unwrap_err();
        assert!(matches!(err, InfoError::MissingNameKey { .. }));
        assert!(ns.sets.is_empty());
    }

    #[test]
    fn test_merge_statistics() {
        let mut ns = Namespace::new("test");
        ns.merge_statistics("objects=10;memory_used_bytes=2048;stop_writes=false")
            .unwrap();
        ns.merge_statistics("objects=7;memory_used_bytes=1024;stop_writes=false")
            .unwrap();

        assert_eq!(ns.statistics.get_integer("objects"), Some(17));
        assert_eq!(ns.statistics.get_integer("memory_used_bytes"), Some(3072));
        assert!(ns.has_children());
    }

    #[test]
    fn test_sort_sets() {
        let mut ns = Namespace::new("test");
        for name in ["zeta", "alpha", "mid"] {
            ns.merge_set_info(SetDialect::Legacy, &format!("ns_name=test:set_name={}", name))
                .unwrap();
        }
        ns.sort_sets();

        let names: Vec<_> = ns.sets.iter().filter_map(|s| s.name()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }
}
