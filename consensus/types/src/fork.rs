use crate::{ChainSpec, Epoch};
use serde::{Deserialize, Serialize};

/// Specifies a fork of the `BeaconChain`, to prevent replay attacks.
///
/// Spec v0.6.1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fork {
    pub previous_version: [u8; 4],
    pub current_version: [u8; 4],
    pub epoch: Epoch,
}

impl Fork {
    /// Initialize the `Fork` from the genesis parameters in the `spec`.
    pub fn genesis(spec: &ChainSpec) -> Self {
        Self {
            previous_version: spec.genesis_fork_version,
            current_version: spec.genesis_fork_version,
            epoch: spec.genesis_epoch,
        }
    }

    /// Return the fork version of the given ``epoch``.
    ///
    /// Spec v0.6.1
    pub fn get_fork_version(&self, epoch: Epoch) -> [u8; 4] {
        if epoch < self.epoch {
            return self.previous_version;
        }
        self.current_version
    }
}
