use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_GROUP: &str = "unknown";

// ============================================================================
// Raw input records
// ============================================================================

/// One untyped input row: column name to cell value, in column order.
///
/// Cell values stay as `serde_json::Value` so spreadsheet-style numbers and
/// booleans survive until normalization decides how to read them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub fields: Vec<(String, Value)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Build a record from string pairs (mostly useful in tests).
    pub fn from_pairs<K: Into<String>, V: Into<String>>(pairs: Vec<(K, V)>) -> Self {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }

    pub fn push(&mut self, key: impl Into<String>, value: Value) {
        self.fields.push((key.into(), value));
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<serde_json::Map<String, Value>> for RawRecord {
    fn from(map: serde_json::Map<String, Value>) -> Self {
        Self {
            fields: map.into_iter().collect(),
        }
    }
}

// ============================================================================
// Normalized catalog
// ============================================================================

/// A single catalog entry after normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Element {
    /// Non-empty key, unique within its group
    pub id: String,

    /// Display label, possibly empty
    pub name: String,

    /// Lower-cased group key
    pub group: String,
}

impl Element {
    pub fn new(id: &str, name: &str, group: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            group: group.to_string(),
        }
    }
}

/// All elements of one group, in first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogGroup {
    pub name: String,
    pub elements: Vec<Element>,
}

/// The universe pools are sampled from. Built once, never mutated afterwards.
///
/// Groups keep the order in which they were first seen in the input so that
/// rendering and sampling order are deterministic for a given input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    groups: Vec<CatalogGroup>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a catalog from already-normalized elements, grouping them in
    /// first-seen order. Duplicate ids inside a group are skipped; the number
    /// of skipped elements is returned alongside.
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> (Self, usize) {
        let mut catalog = Catalog::empty();
        let mut duplicates = 0;

        for element in elements {
            let idx = match catalog.groups.iter().position(|g| g.name == element.group) {
                Some(idx) => idx,
                None => {
                    catalog.groups.push(CatalogGroup {
                        name: element.group.clone(),
                        elements: Vec::new(),
                    });
                    catalog.groups.len() - 1
                }
            };
            let group = &mut catalog.groups[idx];

            if group.elements.iter().any(|e| e.id == element.id) {
                duplicates += 1;
                continue;
            }
            group.elements.push(element);
        }

        (catalog, duplicates)
    }

    pub fn group(&self, name: &str) -> Option<&[Element]> {
        self.groups
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.elements.as_slice())
    }

    pub fn groups(&self) -> &[CatalogGroup] {
        &self.groups
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Total number of elements across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.elements.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// SHA-1 over every element in catalog order.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let mut hasher = Sha1::new();
        for group in &self.groups {
            hasher.update(group.name.as_bytes());
            hasher.update([0x1e]);
            for el in &group.elements {
                hasher.update(el.id.as_bytes());
                hasher.update([0x1f]);
                hasher.update(el.name.as_bytes());
                hasher.update([0x1e]);
            }
            hasher.update([0x1d]);
        }
        format!("{:x}", hasher.finalize())
    }
}
