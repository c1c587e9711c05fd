//! Info record parsing and merging
//!
//! This module provides:
//! - Field splitting for colon, semicolon and comma separated replies
//! - Tagged field values (integer or text)
//! - Overwrite and merge update rules for named records

pub mod field;
pub mod record;

pub use field::{FieldMap, FieldValue, InfoFormat};
pub use record::{InfoRecord, NamedValue};
