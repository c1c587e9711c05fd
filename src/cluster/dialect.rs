//! Set reply dialects
//!
//! Older servers report sets as `ns_name=..:set_name=..:n_objects=..`, newer
//! ones as `ns=..:set=..:objects=..`. The dialect decides which keys carry a
//! set's namespace and identity.

use serde::Serialize;

/// Key naming used by a `sets` reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SetDialect {
    /// `ns_name` / `set_name` / `n_objects`
    #[default]
    Legacy,
    /// `ns` / `set` / `objects`
    Modern,
}

impl SetDialect {
    /// Detect the dialect from a raw `sets` reply
    ///
    /// Falls back to [`SetDialect::Legacy`] when the reply names no set.
    pub fn detect(sets_reply: &str) -> Self {
        let fields = || sets_reply.split([';', ':']).map(str::trim);
        if fields().any(|f| f.starts_with("set_name=")) {
            SetDialect::Legacy
        } else if fields().any(|f| f.starts_with("set=")) {
            SetDialect::Modern
        } else {
            SetDialect::Legacy
        }
    }

    /// Key holding the owning namespace
    pub fn namespace_key(&self) -> &'static str {
        match self {
            SetDialect::Legacy => "ns_name",
            SetDialect::Modern => "ns",
        }
    }

    /// Key holding the set's display name
    pub fn name_key(&self) -> &'static str {
        match self {
            SetDialect::Legacy => "set_name",
            SetDialect::Modern => "set",
        }
    }

    /// Key holding the per-node object counter
    pub fn object_count_key(&self) -> &'static str {
        match self {
            SetDialect::Legacy => "n_objects",
            SetDialect::Modern => "objects",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_legacy() {
        let reply = "ns_name=test:set_name=demo:n_objects=1:set-delete=false;";
        assert_eq!(SetDialect::detect(reply), SetDialect::Legacy);
    }

    #[test]
    fn test_detect_modern() {
        let reply = "ns=test:set=demo:objects=1:tombstones=0;ns=bar:set=users:objects=4;";
        assert_eq!(SetDialect::detect(reply), SetDialect::Modern);
    }

    #[test]
    fn test_detect_empty_defaults_to_legacy() {
        assert_eq!(SetDialect::detect(""), SetDialect::Legacy);
    }

    #[test]
    fn test_keys() {
        assert_eq!(SetDialect::Legacy.name_key(), "set_name");
        assert_eq!(SetDialect::Modern.namespace_key(), "ns");
        assert_eq!(SetDialect::Modern.object_count_key(), "objects");
    }
}
