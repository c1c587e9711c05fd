//! Named info records
//!
//! An [`InfoRecord`] is a [`FieldMap`] whose display identity comes from one
//! designated key (`set_name` for set records, `filename` for UDF packages).
//!
//! Records are mutated through `&mut self` only. A refresh owns the records it
//! is building and hands readers a finished snapshot afterwards.

use serde::Serialize;

use super::field::{FieldMap, FieldValue, InfoFormat};
use crate::utils::InfoError;

/// Record parsed from an info reply, identified by a designated key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoRecord {
    #[serde(skip)]
    name_key: String,
    #[serde(skip)]
    format: InfoFormat,
    name: Option<String>,
    fields: FieldMap,
}

impl InfoRecord {
    /// Create an empty record; it has no display name until a parse sets one
    pub fn new(name_key: &str, format: InfoFormat) -> Self {
        Self {
            name_key: name_key.to_string(),
            format,
            name: None,
            fields: FieldMap::new(),
        }
    }

    /// Create a record from its first raw line
    pub fn from_info(name_key: &str, format: InfoFormat, raw: &str) -> Result<Self, InfoError> {
        let mut record = Self::new(name_key, format);
        record.parse_overwrite(raw)?;
        Ok(record)
    }

    /// Apply `raw`, replacing stored values unconditionally
    ///
    /// An empty `raw` leaves the record untouched. On error, fields before
    /// the faulty one stay applied and the display name is unchanged.
    pub fn parse_overwrite(&mut self, raw: &str) -> Result<(), InfoError> {
        if raw.is_empty() {
            return Ok(());
        }
        self.fields.apply_overwrite(raw, self.format)?;
        self.refresh_name()
    }

    /// Apply `raw`, summing integer fields that are already present
    ///
    /// This is how per-node reports of one set add up to a cluster total.
    /// Non-numeric fields fall back to overwrite.
    pub fn parse_merge(&mut self, raw: &str) -> Result<(), InfoError> {
        if raw.is_empty() {
            return Ok(());
        }
        self.fields.apply_merge(raw, self.format)?;
        self.refresh_name()
    }

    /// Merge-parse `raw`, but overwrite `identity_keys` instead of summing them
    ///
    /// Used when folding the same record from several nodes, where keys such
    /// as the name key identify the record and must not accumulate.
    pub fn parse_merge_except(
        &mut self,
        raw: &str,
        identity_keys: &[&str],
    ) -> Result<(), InfoError> {
        if raw.is_empty() {
            return Ok(());
        }
        self.fields.apply_merge_except(raw, self.format, identity_keys)?;
        self.refresh_name()
    }

    fn refresh_name(&mut self) -> Result<(), InfoError> {
        let name = self
            .fields
            .get(&self.name_key)
            .ok_or_else(|| InfoError::MissingNameKey {
                key: self.name_key.clone(),
            })?;
        self.name = Some(name.to_string());
        Ok(())
    }

    /// Display name, taken from the name key on the last successful parse
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn name_key(&self) -> &str {
        &self.name_key
    }

    pub fn has_fields(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn field_map(&self) -> &FieldMap {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Fields in unspecified order, each tied back to this record
    pub fn fields(&self) -> impl Iterator<Item = NamedValue<'_>> {
        self.fields.iter().map(move |(key, value)| NamedValue {
            owner: self,
            key,
            value,
        })
    }
}

/// One field of a record, viewed through its owner
#[derive(Debug, Clone, Copy)]
pub struct NamedValue<'a> {
    owner: &'a InfoRecord,
    pub key: &'a str,
    pub value: &'a FieldValue,
}

impl<'a> NamedValue<'a> {
    pub fn owner(&self) -> &'a InfoRecord {
        self.owner
    }
}

impl PartialEq for NamedValue<'_> {
    /// Same key within the same record
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.owner, other.owner) && self.key == other.key
    }
}
