use parking_lot::RwLock;
use std::collections::HashMap;

/// Source of eth1 block timestamps, used to place deposits on the beacon chain.
pub trait Eth1BlockTimes: Send + Sync + 'static {
    /// Returns the timestamp of the eth1 block with `block_number`, if known.
    fn block_timestamp(&self, block_number: u64) -> Option<u64>;
}

/// An in-memory map of eth1 block numbers to timestamps.
#[derive(Debug, Default)]
pub struct Eth1BlockCache {
    timestamps: RwLock<HashMap<u64, u64>>,
}

impl Eth1BlockCache {
    pub fn insert(&self, block_number: u64, timestamp: u64) {
        self.timestamps.write().insert(block_number, timestamp);
    }

    pub fn len(&self) -> usize {
        self.timestamps.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.read().is_empty()
    }
}

impl From<HashMap<u64, u64>> for Eth1BlockCache {
    fn from(timestamps: HashMap<u64, u64>) -> Self {
        Self {
            timestamps: RwLock::new(timestamps),
        }
    }
}

impl Eth1BlockTimes for Eth1BlockCache {
    fn block_timestamp(&self, block_number: u64) -> Option<u64> {
        self.timestamps.read().get(&block_number).copied()
    }
}
