use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::catalog::catalog_model::{Catalog, Element};
use crate::selection::selection_model::{
    SelectionError, SelectionState, SelectionUpdate, VisiblePool,
};

/// Draw up to `pool_size` distinct elements per group with a partial
/// Fisher-Yates shuffle. Groups smaller than `pool_size` are shown whole.
pub fn sample_pools<R: Rng + ?Sized>(
    catalog: &Catalog,
    pool_size: usize,
    rng: &mut R,
) -> Vec<VisiblePool> {
    catalog
        .groups()
        .iter()
        .map(|group| {
            let mut candidates: Vec<&Element> = group.elements.iter().collect();
            let (drawn, _) = candidates.partial_shuffle(rng, pool_size);
            VisiblePool::from_elements(&group.name, drawn.iter().map(|e| (*e).clone()))
        })
        .collect()
}

/// Owns the selection state of one session and the random source used to
/// sample and refill pools.
pub struct SelectionEngine {
    state: SelectionState,
    pool_size: usize,
    rng: StdRng,
}

impl SelectionEngine {
    /// Initialize pools from OS entropy.
    pub fn initialize(catalog: Catalog, pool_size: usize) -> Self {
        Self::with_rng(catalog, pool_size, StdRng::from_entropy())
    }

    /// Initialize with a fixed seed, so draws and refills are reproducible.
    pub fn with_seed(catalog: Catalog, pool_size: usize, seed: u64) -> Self {
        Self::with_rng(catalog, pool_size, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(catalog: Catalog, pool_size: usize, mut rng: StdRng) -> Self {
        let pools = sample_pools(&catalog, pool_size, &mut rng);
        Self {
            state: SelectionState::new(catalog, pools),
            pool_size,
            rng,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn pools(&self) -> &[VisiblePool] {
        &self.state.pools
    }

    pub fn pool(&self, group: &str) -> Option<&VisiblePool> {
        self.state.pool(group)
    }

    pub fn selected(&self) -> &[Element] {
        &self.state.selected
    }

    pub fn output_vector(&self) -> &[String] {
        &self.state.output
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    /// Move `id` from `group`'s pool to the selected list and refill the pool
    /// with a random element of the group that is neither visible nor
    /// selected. An exhausted group simply shrinks.
    pub fn select(&mut self, id: &str, group: &str) -> Result<SelectionUpdate, SelectionError> {
        let not_visible = || SelectionError::NotVisible {
            id: id.to_string(),
            group: group.to_string(),
        };

        let pool_idx = self
            .state
            .pools
            .iter()
            .position(|p| p.group == group)
            .ok_or_else(not_visible)?;

        let element = self.state.pools[pool_idx]
            .remove(id)
            .ok_or_else(not_visible)?;
        self.state.selected.push(element.clone());

        let replacement = {
            let pool = &self.state.pools[pool_idx];
            let used: HashSet<&str> = pool
                .ids()
                .chain(self.state.selected.iter().map(|e| e.id.as_str()))
                .collect();

            let available: Vec<&Element> = self
                .state
                .catalog
                .group(group)
                .unwrap_or_default()
                .iter()
                .filter(|e| !used.contains(e.id.as_str()))
                .collect();

            available.choose(&mut self.rng).map(|e| (*e).clone())
        };

        if let Some(r) = &replacement {
            self.state.pools[pool_idx].insert_if_absent(r.clone());
        }

        self.state.refresh_output();

        Ok(SelectionUpdate {
            element,
            selected: self.state.selected.clone(),
            pool: self.state.pools[pool_idx].clone(),
            output: self.state.output.clone(),
            replacement,
            restored: false,
        })
    }

    /// Remove `id` from the selected list and put it back into its group's
    /// pool unless that pool already offers the same id. The pool size cap is
    /// not re-applied here.
    pub fn deselect(&mut self, id: &str) -> Result<SelectionUpdate, SelectionError> {
        let pos = self
            .state
            .selected
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| SelectionError::NotSelected { id: id.to_string() })?;

        let element = self.state.selected.remove(pos);
        self.state.refresh_output();

        let pool = self.state.pool_entry(&element.group);
        let restored = pool.insert_if_absent(element.clone());
        let pool = pool.clone();

        Ok(SelectionUpdate {
            element,
            selected: self.state.selected.clone(),
            pool,
            output: self.state.output.clone(),
            replacement: None,
            restored,
        })
    }
}
