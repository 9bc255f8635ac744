use crate::{Epoch, Hash256};
use serde::{Deserialize, Serialize};

/// Specifies the block hash for a shard at an epoch.
///
/// Spec v0.6.1
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Crosslink {
    pub shard: u64,
    pub start_epoch: Epoch,
    pub end_epoch: Epoch,
    pub parent_root: Hash256,
    pub data_root: Hash256,
}
