use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::HashMap;
use types::{BeaconState, ChainSpec, Epoch};

/// Maps an epoch to the ascending, duplicate-free indices of the validators active in it.
///
/// Entries are only ever extended. Callers key by a fresh epoch when the active set changes.
#[derive(Debug, Default)]
pub struct ValidatorIndexCache {
    indices: RwLock<HashMap<Epoch, Vec<usize>>>,
}

impl ValidatorIndexCache {
    /// Returns a cache holding the active indices of the current epoch of `state`.
    pub fn from_state(state: &BeaconState, spec: &ChainSpec) -> Self {
        let cache = Self::default();
        let epoch = state.current_epoch(spec);
        cache.insert(epoch, state.get_active_validator_indices(epoch));
        cache
    }

    pub fn get(&self, epoch: Epoch) -> Option<Vec<usize>> {
        self.indices.read().get(&epoch).cloned()
    }

    /// Merges `indices` into the entry for `epoch`, keeping it sorted and removing duplicates.
    pub fn insert(&self, epoch: Epoch, mut indices: Vec<usize>) {
        indices.sort_unstable();

        let mut map = self.indices.write();
        let entry = map.entry(epoch).or_default();
        *entry = entry.iter().copied().merge(indices).dedup().collect();
    }

    /// Number of epochs held.
    pub fn len(&self) -> usize {
        self.indices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.read().is_empty()
    }
}
