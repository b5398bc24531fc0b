use serde::Serialize;
use serde_json::Value;

use crate::catalog::catalog_model::{Catalog, Element, RawRecord, UNKNOWN_GROUP};

/// Accepted spellings per field, highest priority first. Compared against
/// column names after `normalize_column_name`.
pub const ID_ALIASES: &[&str] = &["element id", "id"];
pub const NAME_ALIASES: &[&str] = &["element name", "name"];
pub const GROUP_ALIASES: &[&str] = &["source"];

/// Counts from one normalization pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NormalizeReport {
    pub total_records: usize,
    pub accepted: usize,
    pub missing_id: usize,
    pub duplicate_id: usize,
}

impl NormalizeReport {
    pub fn dropped(&self) -> usize {
        self.missing_id + self.duplicate_id
    }
}

/// Normalize raw records into a grouped catalog, silently dropping records
/// without a usable id.
pub fn normalize(records: &[RawRecord]) -> Catalog {
    normalize_with_report(records).0
}

pub fn normalize_with_report(records: &[RawRecord]) -> (Catalog, NormalizeReport) {
    let mut report = NormalizeReport {
        total_records: records.len(),
        ..NormalizeReport::default()
    };

    let elements: Vec<Element> = records
        .iter()
        .filter_map(|record| {
            let element = normalize_record(record);
            if element.is_none() {
                report.missing_id += 1;
            }
            element
        })
        .collect();

    let (catalog, duplicates) = Catalog::from_elements(elements);
    report.duplicate_id = duplicates;
    report.accepted = catalog.len();

    (catalog, report)
}

/// Resolve one record to an `Element`, or `None` if it has no id.
pub fn normalize_record(record: &RawRecord) -> Option<Element> {
    let id = lookup_field(record, ID_ALIASES)?;

    let name = lookup_field(record, NAME_ALIASES).unwrap_or_default();

    let group = lookup_field(record, GROUP_ALIASES)
        .map(|g| g.to_lowercase())
        .unwrap_or_else(|| UNKNOWN_GROUP.to_string());

    Some(Element { id, name, group })
}

/// First non-empty value among `aliases`, trying each alias in order and,
/// within an alias, columns in record order.
pub fn lookup_field(record: &RawRecord, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| {
        record
            .fields
            .iter()
            .filter(|(key, _)| normalize_column_name(key) == *alias)
            .find_map(|(_, value)| cell_text(value))
    })
}

/// Lower-case, trim, and collapse runs of whitespace, `_` and `-` into a
/// single space: `"Element_ID"` and `" element  id "` both become `"element id"`.
pub fn normalize_column_name(raw: &str) -> String {
    raw.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Text of a cell, trimmed. Empty strings and nulls count as absent.
pub fn cell_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    if text.is_empty() { None } else { Some(text) }
}
