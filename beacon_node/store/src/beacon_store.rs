use crate::errors::Result;
use crate::impls::{ChainHead, StoredValidatorIndex};
use crate::{Error, Store};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use types::*;

const HEAD_STATE_KEY: &[u8] = b"head_state";
const CHAIN_HEAD_KEY: &[u8] = b"chain_head";

/// A deposit along with the number of the eth1 block that included it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositRecord {
    pub deposit: Deposit,
    pub eth1_block_number: u64,
}

/// Typed access to the beacon chain data held in a `Store`.
///
/// Clones share the same underlying store.
pub struct BeaconStore<S: Store> {
    store: Arc<S>,
}

impl<S: Store> Clone for BeaconStore<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
        }
    }
}

impl<S: Store> BeaconStore<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Returns the underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the head state.
    pub fn save_state(&self, state: &BeaconState) -> Result<()> {
        self.store.put(HEAD_STATE_KEY, state)
    }

    /// Returns the head state, if one has been saved.
    pub fn head_state(&self) -> Result<Option<BeaconState>> {
        self.store.get(HEAD_STATE_KEY)
    }

    pub fn save_validator_index(&self, pubkey: &PublicKeyBytes, index: usize) -> Result<()> {
        self.store
            .put(pubkey.as_bytes(), &StoredValidatorIndex(index as u64))
    }

    pub fn validator_index(&self, pubkey: &PublicKeyBytes) -> Result<Option<usize>> {
        Ok(self
            .store
            .get::<StoredValidatorIndex>(pubkey.as_bytes())?
            .map(|index| index.0 as usize))
    }

    pub fn delete_validator_index(&self, pubkey: &PublicKeyBytes) -> Result<()> {
        self.store.delete::<StoredValidatorIndex>(pubkey.as_bytes())
    }

    /// Stores `block`, keyed by its slot.
    pub fn save_block(&self, block: &BeaconBlock) -> Result<()> {
        self.store.put(&block.slot.as_u64().to_le_bytes(), block)
    }

    pub fn block_at_slot(&self, slot: Slot) -> Result<Option<BeaconBlock>> {
        self.store.get(&slot.as_u64().to_le_bytes())
    }

    /// Records `block` as the canonical head with `state` as its post-state.
    pub fn update_chain_head(&self, block: &BeaconBlock, state: &BeaconState) -> Result<()> {
        self.save_block(block)?;
        self.save_state(state)?;
        self.store
            .put(CHAIN_HEAD_KEY, &ChainHead { slot: block.slot })
    }

    /// Returns the canonical head block, or `None` before the first call to `update_chain_head`.
    pub fn head_block(&self) -> Result<Option<BeaconBlock>> {
        match self.store.get::<ChainHead>(CHAIN_HEAD_KEY)? {
            Some(head) => self
                .block_at_slot(head.slot)?
                .map(Some)
                .ok_or(Error::MissingHeadBlock(head.slot)),
            None => Ok(None),
        }
    }

    /// Stores `deposit` keyed by its public key, replacing any earlier deposit for that key.
    pub fn insert_deposit(&self, deposit: &Deposit, eth1_block_number: u64) -> Result<()> {
        let record = DepositRecord {
            deposit: deposit.clone(),
            eth1_block_number,
        };
        self.store.put(deposit.data.pubkey.as_bytes(), &record)
    }

    pub fn deposit_by_pubkey(&self, pubkey: &PublicKeyBytes) -> Result<Option<DepositRecord>> {
        self.store.get(pubkey.as_bytes())
    }
}
