use serde::{Deserialize, Serialize};

use crate::catalog::catalog_model::Element;

// ============================================================================
// Session snapshot: read-only view consumed by the renderers
// ============================================================================

/// Everything a presentation layer needs to draw one frame.
///
/// Built by `Session::snapshot()` after each mutation and rendered by the
/// console and JSON reporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Where the catalog was loaded from
    pub source: String,

    /// SHA-1 of the normalized catalog
    pub catalog_fingerprint: String,

    /// Set when the record source could not be loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,

    /// Configured pool size
    pub pool_size: usize,

    /// One entry per group, in catalog order
    pub groups: Vec<GroupView>,

    /// Selected elements in selection order
    pub selected: Vec<Element>,

    /// Selected ids in selection order
    pub output: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupView {
    pub group: String,

    /// Number of elements of this group in the catalog
    pub catalog_size: usize,

    /// Elements currently offered
    pub offered: Vec<Element>,
}

impl SessionSnapshot {
    pub fn group(&self, name: &str) -> Option<&GroupView> {
        self.groups.iter().find(|g| g.group == name)
    }

    pub fn is_available(&self) -> bool {
        self.load_error.is_none()
    }
}
