use std::collections::HashSet;

use serde::Serialize;

use crate::selection::selection_model::SelectionState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum InvariantViolation {
    /// An element is offered in its group's pool while also selected
    VisibleAndSelected { id: String, group: String },

    /// The same id appears twice in one pool
    DuplicateInPool { id: String, group: String },

    /// A pool or selected element is not part of its catalog group
    UnknownElement { id: String, group: String },

    /// Output vector differs from the selected list's ids
    OutputOutOfSync { expected: Vec<String>, actual: Vec<String> },

    /// visible + selected + unseen does not add up to the catalog group size
    Conservation { group: String, expected: usize, actual: usize },
}

/// Check every structural invariant of a selection state. An empty result
/// means the state is consistent.
pub fn check_invariants(state: &SelectionState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    let expected: Vec<String> = state.selected.iter().map(|e| e.id.clone()).collect();
    if expected != state.output {
        violations.push(InvariantViolation::OutputOutOfSync {
            expected,
            actual: state.output.clone(),
        });
    }

    for pool in &state.pools {
        let mut seen = HashSet::new();
        for id in pool.ids() {
            if !seen.insert(id) {
                violations.push(InvariantViolation::DuplicateInPool {
                    id: id.to_string(),
                    group: pool.group.clone(),
                });
            }
        }

        for el in state.selected.iter().filter(|e| e.group == pool.group) {
            if pool.contains(&el.id) {
                violations.push(InvariantViolation::VisibleAndSelected {
                    id: el.id.clone(),
                    group: pool.group.clone(),
                });
            }
        }
    }

    let shown = state
        .pools
        .iter()
        .flat_map(|p| p.elements().iter())
        .chain(state.selected.iter());
    for el in shown {
        let known = state
            .catalog
            .group(&el.group)
            .is_some_and(|elements| elements.iter().any(|c| c.id == el.id));
        if !known {
            violations.push(InvariantViolation::UnknownElement {
                id: el.id.clone(),
                group: el.group.clone(),
            });
        }
    }

    for group in state.catalog.groups() {
        let visible: Vec<&str> = state
            .pool(&group.name)
            .map(|p| p.ids().collect())
            .unwrap_or_default();
        let selected: Vec<&str> = state
            .selected
            .iter()
            .filter(|e| e.group == group.name)
            .map(|e| e.id.as_str())
            .collect();

        let used: HashSet<&str> = visible.iter().chain(selected.iter()).copied().collect();
        let unseen = group
            .elements
            .iter()
            .filter(|e| !used.contains(e.id.as_str()))
            .count();

        let actual = visible.len() + selected.len() + unseen;
        if actual != group.elements.len() {
            violations.push(InvariantViolation::Conservation {
                group: group.name.clone(),
                expected: group.elements.len(),
                actual,
            });
        }
    }

    violations
}
