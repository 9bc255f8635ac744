use crate::*;
use serde::{Deserialize, Serialize};

macro_rules! impl_json_store_item {
    ($type: ty, $column: expr) => {
        impl StoreItem for $type {
            fn db_column() -> DBColumn {
                $column
            }

            fn as_store_bytes(&self) -> Result<Vec<u8>, Error> {
                Ok(serde_json::to_vec(self)?)
            }

            fn from_store_bytes(bytes: &[u8]) -> Result<Self, Error> {
                Ok(serde_json::from_slice(bytes)?)
            }
        }
    };
}

/// The slot of the block currently considered the head of the canonical chain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub(crate) struct ChainHead {
    pub slot: Slot,
}

/// A validator's position in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct StoredValidatorIndex(pub u64);

impl_json_store_item!(BeaconState, DBColumn::BeaconState);
impl_json_store_item!(BeaconBlock, DBColumn::BeaconBlock);
impl_json_store_item!(ChainHead, DBColumn::BeaconMeta);
impl_json_store_item!(StoredValidatorIndex, DBColumn::ValidatorIndex);
impl_json_store_item!(DepositRecord, DBColumn::Eth1Deposit);
