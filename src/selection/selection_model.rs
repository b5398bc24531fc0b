use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::catalog_model::{Catalog, Element};

pub const DEFAULT_POOL_SIZE: usize = 10;

// ============================================================================
// VisiblePool: the offered, unselected candidates of one group
// ============================================================================

/// Elements currently offered for one group, keyed by id.
///
/// Kept as an insertion-ordered list: pools are small (bounded by the pool
/// size plus restored items) and a stable order keeps rendering steady.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisiblePool {
    pub group: String,
    elements: Vec<Element>,
}

impl VisiblePool {
    pub fn new(group: &str) -> Self {
        Self {
            group: group.to_string(),
            elements: Vec::new(),
        }
    }

    /// Build a pool, skipping any element whose id is already present.
    pub fn from_elements(group: &str, elements: impl IntoIterator<Item = Element>) -> Self {
        let mut pool = Self::new(group);
        for el in elements {
            pool.insert_if_absent(el);
        }
        pool
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Insert unless an element with the same id is already offered.
    /// Returns whether the element was inserted.
    pub fn insert_if_absent(&mut self, element: Element) -> bool {
        if self.contains(&element.id) {
            return false;
        }
        self.elements.push(element);
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let pos = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(pos))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.id.as_str())
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

// ============================================================================
// SelectionState: everything one session mutates
// ============================================================================

/// The whole state of a picking session: the catalog it samples from, one
/// visible pool per group, the selected list and the derived output vector.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SelectionState {
    pub catalog: Catalog,
    pub pools: Vec<VisiblePool>,
    pub selected: Vec<Element>,
    pub output: Vec<String>,
}

impl SelectionState {
    pub fn new(catalog: Catalog, pools: Vec<VisiblePool>) -> Self {
        Self {
            catalog,
            pools,
            selected: Vec::new(),
            output: Vec::new(),
        }
    }

    pub fn pool(&self, group: &str) -> Option<&VisiblePool> {
        self.pools.iter().find(|p| p.group == group)
    }

    /// Pool for `group`, created empty at the end if it does not exist yet.
    pub fn pool_entry(&mut self, group: &str) -> &mut VisiblePool {
        let pos = match self.pools.iter().position(|p| p.group == group) {
            Some(pos) => pos,
            None => {
                self.pools.push(VisiblePool::new(group));
                self.pools.len() - 1
            }
        };
        &mut self.pools[pos]
    }

    /// Group of the pool currently offering `id`, if any.
    pub fn group_offering(&self, id: &str) -> Option<&str> {
        self.pools
            .iter()
            .find(|p| p.contains(id))
            .map(|p| p.group.as_str())
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|e| e.id == id)
    }

    pub fn selected_in_group(&self, group: &str) -> usize {
        self.selected.iter().filter(|e| e.group == group).count()
    }

    pub fn refresh_output(&mut self) {
        self.output = self.selected.iter().map(|e| e.id.clone()).collect();
    }
}

// ============================================================================
// Operation results
// ============================================================================

/// What a `select`/`deselect` call changed, returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionUpdate {
    /// The element that was selected or deselected
    pub element: Element,

    /// Selected list after the call
    pub selected: Vec<Element>,

    /// The affected group's pool after the call
    pub pool: VisiblePool,

    /// Output vector after the call
    pub output: Vec<String>,

    /// Element drawn into the pool to replace a selection (select only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<Element>,

    /// Whether the deselected element went back into its pool (deselect only)
    pub restored: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    /// `select` with an id the group's pool does not offer
    NotVisible { id: String, group: String },

    /// `deselect` with an id that is not in the selected list
    NotSelected { id: String },
}

impl SelectionError {
    pub fn id(&self) -> &str {
        match self {
            SelectionError::NotVisible { id, .. } | SelectionError::NotSelected { id } => id,
        }
    }
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NotVisible { id, group } => {
                write!(f, "Element '{}' not found in visible pool '{}'", id, group)
            }
            SelectionError::NotSelected { id } => {
                write!(f, "Element '{}' not found in selected list", id)
            }
        }
    }
}

impl std::error::Error for SelectionError {}
