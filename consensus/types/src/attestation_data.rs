use crate::{Checkpoint, Crosslink, Hash256, Slot};
use serde::{Deserialize, Serialize};

/// The data upon which an attestation is based.
///
/// Spec v0.6.1
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct AttestationData {
    pub slot: Slot,
    pub beacon_block_root: Hash256,

    // FFG Vote
    pub source: Checkpoint,
    pub target: Checkpoint,

    // Crosslink Vote
    pub crosslink: Crosslink,
}
