use crate::{BeaconBlockBody, Hash256, SignatureBytes, Slot};
use serde::{Deserialize, Serialize};

/// A block of the `BeaconChain`.
///
/// Spec v0.6.1
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct BeaconBlock {
    pub slot: Slot,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body: BeaconBlockBody,
    pub signature: SignatureBytes,
}

impl BeaconBlock {
    /// Returns an empty block to be used during genesis.
    pub fn empty(slot: Slot) -> Self {
        Self {
            slot,
            ..BeaconBlock::default()
        }
    }
}
