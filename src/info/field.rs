//! Field values and the key/value map behind an info record
//!
//! Info replies carry heterogeneous values in one line: counters next to
//! status strings. A value is stored as an integer only when its text is the
//! integer's canonical form, so every stored value prints back exactly as it
//! arrived until a merge sums it.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::utils::InfoError;

/// Separators used by one family of info replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoFormat {
    /// Separates fields (`:` in set records)
    pub field_separator: char,
    /// Separates a field's key from its value
    pub pair_separator: char,
}

impl InfoFormat {
    /// `key=value:key=value` (sets)
    pub const COLON: InfoFormat = InfoFormat::new(':', '=');
    /// `key=value;key=value` (namespace and node statistics)
    pub const SEMICOLON: InfoFormat = InfoFormat::new(';', '=');
    /// `key=value,key=value` (udf-list entries)
    pub const COMMA: InfoFormat = InfoFormat::new(',', '=');

    pub const fn new(field_separator: char, pair_separator: char) -> Self {
        Self {
            field_separator,
            pair_separator,
        }
    }

    /// Split a raw line into `(key, value)` pairs
    ///
    /// Trailing separators are ignored. The iterator yields an error for the
    /// first malformed field; callers stop there.
    pub fn fields<'a>(
        &self,
        raw: &'a str,
    ) -> impl Iterator<Item = Result<(&'a str, &'a str), InfoError>> + 'a {
        let pair_separator = self.pair_separator;
        let trimmed = raw.trim_end_matches(self.field_separator);

        trimmed
            .split(self.field_separator)
            .filter(move |_| !trimmed.is_empty())
            .map(move |field| split_field(field, pair_separator))
    }
}

impl Default for InfoFormat {
    fn default() -> Self {
        InfoFormat::COLON
    }
}

fn split_field(field: &str, pair_separator: char) -> Result<(&str, &str), InfoError> {
    if field.is_empty() {
        return Err(InfoError::parse(field, "empty field"));
    }
    let (key, value) = field
        .split_once(pair_separator)
        .ok_or_else(|| InfoError::parse(field, "missing key/value separator"))?;
    if key.is_empty() {
        return Err(InfoError::parse(field, "empty key"));
    }
    Ok((key, value))
}

/// A single parsed value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl FieldValue {
    /// Classify a raw value
    ///
    /// Text like `007` or `+5` parses as a number but stays [`FieldValue::Text`]
    /// so it keeps its spelling.
    pub fn classify(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) if n.to_string() == raw => FieldValue::Integer(n),
            _ => FieldValue::Text(raw.to_string()),
        }
    }

    /// Numeric reading of the value, including numeric text
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::Text(s) => s.parse().ok(),
        }
    }

    /// Fold another reading of the same counter into this one
    ///
    /// Numeric values add, saturating at the `i64` bounds. Anything else is
    /// replaced by the incoming value, including an integer meeting text:
    /// the old value is dropped in that case.
    pub fn merge(&mut self, incoming: FieldValue) {
        *self = match (self.as_integer(), incoming.as_integer()) {
            (Some(stored), Some(new)) => FieldValue::Integer(stored.saturating_add(new)),
            _ => incoming,
        };
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

/// Unordered `key -> value` map with overwrite and merge update rules
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldMap {
    values: HashMap<String, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Integer value of a field, if present and numeric
    pub fn get_integer(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(FieldValue::as_integer)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Replace the stored value for every field in `raw`
    pub fn apply_overwrite(&mut self, raw: &str, format: InfoFormat) -> Result<(), InfoError> {
        for field in format.fields(raw) {
            let (key, value) = field?;
            self.values.insert(key.to_string(), FieldValue::classify(value));
        }
        Ok(())
    }

    /// Fold every field in `raw` into the stored values
    ///
    /// New keys are inserted as-is. Existing keys follow [`FieldValue::merge`].
    pub fn apply_merge(&mut self, raw: &str, format: InfoFormat) -> Result<(), InfoError> {
        self.apply_merge_except(raw, format, &[])
    }

    /// Like [`FieldMap::apply_merge`], but `overwrite_keys` are replaced, never summed
    pub fn apply_merge_except(
        &mut self,
        raw: &str,
        format: InfoFormat,
        overwrite_keys: &[&str],
    ) -> Result<(), InfoError> {
        for field in format.fields(raw) {
            let (key, value) = field?;
            let incoming = FieldValue::classify(value);
            match self.values.get_mut(key) {
                Some(stored) if !overwrite_keys.contains(&key) => stored.merge(incoming),
                _ => {
                    self.values.insert(key.to_string(), incoming);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(format: InfoFormat, raw: &str) -> Result<Vec<(&str, &str)>, InfoError> {
        format.fields(raw).collect()
    }

    #[test]
    fn test_split_fields() {
        let fields = collect(InfoFormat::COLON, "ns_name=test:set_name=demo:n_objects=1").unwrap();
        assert_eq!(
            fields,
            vec![("ns_name", "test"), ("set_name", "demo"), ("n_objects", "1")]
        );
    }

    #[test]
    fn test_empty_input_has_no_fields() {
        assert!(collect(InfoFormat::COLON, "").unwrap().is_empty());
        assert!(collect(InfoFormat::SEMICOLON, ";").unwrap().is_empty());
    }

    #[test]
    fn test_trailing_separator_ignored() {
        let fields = collect(InfoFormat::SEMICOLON, "objects=10;tombstones=0;").unwrap();
        assert_eq!(fields, vec![("objects", "10"), ("tombstones", "0")]);
    }

    #[test]
    fn test_field_without_pair_separator() {
        let err = collect(InfoFormat::COLON, "set_name=demo:broken").unwrap_err();
        assert_eq!(
            err,
            InfoError::Parse {
                field: "broken".to_string(),
                reason: "missing key/value separator",
            }
        );
    }

    #[test]
    fn test_empty_middle_field_and_empty_key() {
        assert!(collect(InfoFormat::COLON, "a=1::b=2").is_err());
        assert!(collect(InfoFormat::COLON, "=1").is_err());
    }

    #[test]
    fn test_value_may_be_empty_or_contain_separator() {
        let fields = collect(InfoFormat::COMMA, "filename=a.lua,hash=ab=cd,type=").unwrap();
        assert_eq!(
            fields,
            vec![("filename", "a.lua"), ("hash", "ab=cd"), ("type", "")]
        );
    }

    #[test]
    fn test_classify() {
        assert_eq!(FieldValue::classify("42"), FieldValue::Integer(42));
        assert_eq!(FieldValue::classify("-7"), FieldValue::Integer(-7));
        assert_eq!(
            FieldValue::classify("use-default"),
            FieldValue::Text("use-default".to_string())
        );
        assert_eq!(FieldValue::classify("1.5"), FieldValue::Text("1.5".to_string()));
        assert_eq!(FieldValue::classify(""), FieldValue::Text(String::new()));
    }

    #[test]
    fn test_classify_keeps_non_canonical_numbers() {
        let padded = FieldValue::classify("007");
        assert_eq!(padded, FieldValue::Text("007".to_string()));
        assert_eq!(padded.to_string(), "007");
        assert_eq!(padded.as_integer(), Some(7));

        let signed = FieldValue::classify("+5");
        assert_eq!(signed.to_string(), "+5");
        assert_eq!(signed.as_integer(), Some(5));
    }

    #[test]
    fn test_merge_numeric_text() {
        let mut value = FieldValue::classify("007");
        value.merge(FieldValue::classify("+3"));
        assert_eq!(value, FieldValue::Integer(10));
    }

    #[test]
    fn test_merge_value() {
        let mut value = FieldValue::Integer(5);
        value.merge(FieldValue::Integer(3));
        assert_eq!(value, FieldValue::Integer(8));

        value.merge(FieldValue::Text("n/a".to_string()));
        assert_eq!(value, FieldValue::Text("n/a".to_string()));

        value.merge(FieldValue::Integer(2));
        assert_eq!(value, FieldValue::Integer(2));
    }

    #[test]
    fn test_merge_saturates() {
        let mut value = FieldValue::Integer(i64::MAX - 1);
        value.merge(FieldValue::Integer(10));
        assert_eq!(value, FieldValue::Integer(i64::MAX));

        let mut value = FieldValue::Integer(i64::MIN);
        value.merge(FieldValue::Integer(-1));
        assert_eq!(value, FieldValue::Integer(i64::MIN));
    }

    #[test]
    fn test_field_map_merge_semicolon() {
        let mut map = FieldMap::new();
        map.apply_merge("objects=10;stop-writes=false", InfoFormat::SEMICOLON)
            .unwrap();
        map.apply_merge("objects=15;stop-writes=true", InfoFormat::SEMICOLON)
            .unwrap();

        assert_eq!(map.get_integer("objects"), Some(25));
        assert_eq!(
            map.get("stop-writes"),
            Some(&FieldValue::Text("true".to_string()))
        );
    }

    #[test]
    fn test_merge_except_overwrites_listed_keys() {
        let mut map = FieldMap::new();
        map.apply_merge("set_name=7:n_objects=1", InfoFormat::COLON)
            .unwrap();
        map.apply_merge_except("set_name=7:n_objects=4", InfoFormat::COLON, &["set_name"])
            .unwrap();

        assert_eq!(map.get("set_name"), Some(&FieldValue::Integer(7)));
        assert_eq!(map.get_integer("n_objects"), Some(5));
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldValue::Integer(12).to_string(), "12");
        assert_eq!(FieldValue::Text("false".to_string()).to_string(), "false");
    }
}
