use crate::committee::{committee_duties, CommitteeAssignment};
use crate::config::Config;
use crate::errors::Error;
use crate::eth1::Eth1BlockTimes;
use crate::events::ChainEventHandler;
use crate::metrics;
use crate::status::{ValidatorStatus, ValidatorStatusEntry, ValidatorStatusResponse};
use crate::validator_index_cache::ValidatorIndexCache;
use safe_arith::SafeArith;
use slog::{debug, Logger};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use store::{BeaconStore, Store};
use types::*;

/// Answers validator-client queries against the head of the chain.
///
/// Cheap to clone; clones share the store, caches and event channel.
pub struct ValidatorServer<S: Store, T: Eth1BlockTimes> {
    pub(crate) store: BeaconStore<S>,
    pub(crate) eth1: Arc<T>,
    pub(crate) index_cache: Arc<ValidatorIndexCache>,
    pub(crate) events: Arc<ChainEventHandler>,
    pub(crate) spec: Arc<ChainSpec>,
    pub(crate) config: Config,
    pub(crate) log: Logger,
}

impl<S: Store, T: Eth1BlockTimes> Clone for ValidatorServer<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            eth1: self.eth1.clone(),
            index_cache: self.index_cache.clone(),
            events: self.events.clone(),
            spec: self.spec.clone(),
            config: self.config.clone(),
            log: self.log.clone(),
        }
    }
}

impl<S: Store, T: Eth1BlockTimes> ValidatorServer<S, T> {
    pub fn new(
        store: BeaconStore<S>,
        eth1: Arc<T>,
        index_cache: Arc<ValidatorIndexCache>,
        spec: ChainSpec,
        config: Config,
        log: Logger,
    ) -> Self {
        let events = Arc::new(ChainEventHandler::new_with_capacity(
            log.clone(),
            config.event_channel_capacity,
        ));

        Self {
            store,
            eth1,
            index_cache,
            events,
            spec: Arc::new(spec),
            config,
            log,
        }
    }

    /// The channel on which canonical-state changes must be announced.
    pub fn event_handler(&self) -> &ChainEventHandler {
        &self.events
    }

    pub fn spec(&self) -> &ChainSpec {
        &self.spec
    }

    pub(crate) fn head_state(&self) -> Result<BeaconState, Error> {
        self.store.head_state()?.ok_or(Error::NoHeadState)
    }

    /// Returns the registry index of `pubkey`.
    ///
    /// The store is consulted first. On a miss the head state is scanned and a hit is written
    /// back to the store.
    pub fn validator_index(&self, pubkey: &PublicKeyBytes) -> Result<usize, Error> {
        if let Some(index) = self.store.validator_index(pubkey)? {
            return Ok(index);
        }

        let state = self.head_state()?;
        self.validator_index_from_state(&state, pubkey)
    }

    /// As `validator_index`, but falls back to the already-loaded `state` instead of reading
    /// the head state again.
    fn validator_index_at(
        &self,
        state: &BeaconState,
        pubkey: &PublicKeyBytes,
    ) -> Result<usize, Error> {
        match self.store.validator_index(pubkey)? {
            Some(index) => Ok(index),
            None => self.validator_index_from_state(state, pubkey),
        }
    }

    fn validator_index_from_state(
        &self,
        state: &BeaconState,
        pubkey: &PublicKeyBytes,
    ) -> Result<usize, Error> {
        let index = state
            .get_validator_index(pubkey)
            .ok_or(Error::ValidatorNotFound(*pubkey))?;

        self.store.save_validator_index(pubkey, index)?;
        debug!(
            self.log,
            "Saved validator index from head state";
            "pubkey" => %pubkey,
            "index" => index,
        );

        Ok(index)
    }

    /// Computes the committee assignments of `pubkeys` for `epoch_start`.
    ///
    /// Each key is answered independently against a single read of the head state. Results are
    /// grouped: keys that failed to parse or resolve come first, then active keys with their
    /// duties, then keys that are not active at the head with `UNKNOWN_STATUS`.
    pub fn committee_assignment(
        &self,
        pubkeys: &[Vec<u8>],
        epoch_start: Epoch,
    ) -> Result<Vec<Result<CommitteeAssignment, Error>>, Error> {
        let timer = metrics::start_timer(&metrics::COMMITTEE_ASSIGNMENT_TIMES);

        let state = self.head_state()?;
        let cache = self.committee_cache(&state, epoch_start)?;
        let current_epoch = state.current_epoch(&self.spec);

        let mut assignments = Vec::with_capacity(pubkeys.len());
        let mut resolved = Vec::with_capacity(pubkeys.len());
        let mut indices = HashMap::with_capacity(pubkeys.len());
        for bytes in pubkeys {
            let result = parse_public_key(bytes).and_then(|pubkey| {
                let index = self.validator_index_at(&state, &pubkey)?;
                Ok((pubkey, index))
            });
            match result {
                Ok((pubkey, index)) => {
                    resolved.push(pubkey);
                    indices.insert(pubkey, index);
                }
                Err(e) => assignments.push(Err(e)),
            }
        }

        for pubkey in self.filter_active_public_keys(&state, &resolved) {
            let assignment = indices
                .get(&pubkey)
                .copied()
                .ok_or(Error::ValidatorNotFound(pubkey))
                .and_then(|index| {
                    let validator = state.get_validator(index)?;
                    Ok(CommitteeAssignment {
                        public_key: pubkey,
                        status: ValidatorStatus::from_validator(
                            validator,
                            current_epoch,
                            &self.spec,
                        ),
                        duties: committee_duties(&state, &cache, index, &self.spec)?,
                    })
                });
            assignments.push(assignment);
        }

        self.add_non_active_public_keys_assignment_status(&state, &resolved, &mut assignments);

        metrics::stop_timer(timer);
        Ok(assignments)
    }

    /// Returns the subset of `pubkeys` belonging to validators active at the current epoch of
    /// `state`, in request order.
    pub fn filter_active_public_keys(
        &self,
        state: &BeaconState,
        pubkeys: &[PublicKeyBytes],
    ) -> Vec<PublicKeyBytes> {
        let current_epoch = state.current_epoch(&self.spec);
        let active = state
            .validators
            .iter()
            .filter(|v| v.is_active_at(current_epoch))
            .map(|v| v.pubkey)
            .collect::<HashSet<_>>();

        pubkeys
            .iter()
            .filter(|pubkey| active.contains(pubkey))
            .copied()
            .collect()
    }

    /// Appends an `UNKNOWN_STATUS` assignment for every key in `pubkeys` that is missing from
    /// `state` or not active at its current epoch.
    pub fn add_non_active_public_keys_assignment_status(
        &self,
        state: &BeaconState,
        pubkeys: &[PublicKeyBytes],
        assignments: &mut Vec<Result<CommitteeAssignment, Error>>,
    ) {
        let current_epoch = state.current_epoch(&self.spec);
        let registry = pubkey_map(state);

        for pubkey in pubkeys {
            let is_active = registry
                .get(pubkey)
                .and_then(|&i| state.validators.get(i))
                .map_or(false, |v| v.is_active_at(current_epoch));

            if !is_active {
                assignments.push(Ok(CommitteeAssignment::inactive(*pubkey)));
            }
        }
    }

    /// Returns the status of `pubkey` against the head state.
    pub fn validator_status(
        &self,
        pubkey: &PublicKeyBytes,
    ) -> Result<ValidatorStatusResponse, Error> {
        let state = self.head_state()?;
        self.validator_status_at(&state, &pubkey_map(&state), pubkey)
    }

    /// Returns the status of every key in `pubkeys` against the head state, and whether any of
    /// them is active.
    pub fn multiple_validator_status(
        &self,
        pubkeys: &[PublicKeyBytes],
    ) -> Result<(bool, Vec<ValidatorStatusEntry>), Error> {
        let state = self.head_state()?;
        Ok(self.multiple_validator_status_at(&state, pubkeys))
    }

    pub(crate) fn multiple_validator_status_at(
        &self,
        state: &BeaconState,
        pubkeys: &[PublicKeyBytes],
    ) -> (bool, Vec<ValidatorStatusEntry>) {
        let registry = pubkey_map(state);

        let entries = pubkeys
            .iter()
            .map(|pubkey| ValidatorStatusEntry {
                public_key: *pubkey,
                status: self.validator_status_at(state, &registry, pubkey),
            })
            .collect::<Vec<_>>();

        (entries.iter().any(|e| e.is_active()), entries)
    }

    fn validator_status_at(
        &self,
        state: &BeaconState,
        registry: &HashMap<PublicKeyBytes, usize>,
        pubkey: &PublicKeyBytes,
    ) -> Result<ValidatorStatusResponse, Error> {
        let record = match self.store.deposit_by_pubkey(pubkey)? {
            Some(record) => record,
            None => return Ok(ValidatorStatusResponse::unknown(0, &self.spec)),
        };
        let eth1_block_number = record.eth1_block_number;

        let deposit_inclusion_slot = self.deposit_inclusion_slot(state, eth1_block_number)?;
        if deposit_inclusion_slot == Slot::new(0) {
            return Ok(ValidatorStatusResponse::unknown(eth1_block_number, &self.spec));
        }

        let index = match registry.get(pubkey) {
            Some(&index) => index,
            None => {
                return Ok(ValidatorStatusResponse {
                    deposit_inclusion_slot,
                    ..ValidatorStatusResponse::unknown(eth1_block_number, &self.spec)
                })
            }
        };
        let validator = state.get_validator(index)?;
        let current_epoch = state.current_epoch(&self.spec);

        Ok(ValidatorStatusResponse {
            status: ValidatorStatus::from_validator(validator, current_epoch, &self.spec),
            activation_epoch: validator.activation_epoch,
            deposit_inclusion_slot,
            eth1_deposit_block_number: eth1_block_number,
            position_in_activation_queue: activation_queue_position(state, index, current_epoch),
        })
    }

    /// Estimates the beacon slot at which a deposit made in eth1 block `eth1_block_number` is
    /// included.
    ///
    /// The deposit must first be `eth1_follow_distance` blocks deep and then wait out a voting
    /// period. Returns slot zero if the block time is unknown or the estimate lies after the
    /// slot of `state`.
    pub fn deposit_inclusion_slot(
        &self,
        state: &BeaconState,
        eth1_block_number: u64,
    ) -> Result<Slot, Error> {
        let spec = &self.spec;
        let block_time = match self.eth1.block_timestamp(eth1_block_number) {
            Some(time) => time,
            None => return Ok(Slot::new(0)),
        };

        let follow_time = spec
            .eth1_follow_distance
            .safe_mul(spec.seconds_per_eth1_block)?;
        let voting_period_start = Slot::new(spec.slots_per_eth1_voting_period)
            .epoch(spec.slots_per_epoch)
            .start_slot(spec.slots_per_epoch)
            .as_u64()
            .safe_mul(spec.seconds_per_slot)?;
        let inclusion_time = block_time
            .safe_add(follow_time)?
            .safe_add(voting_period_start)?;

        let inclusion_slot = Slot::new(
            inclusion_time
                .saturating_sub(state.genesis_time)
                .safe_div(spec.seconds_per_slot)?,
        );

        if inclusion_slot > state.slot {
            Ok(Slot::new(0))
        } else {
            Ok(inclusion_slot)
        }
    }

    /// Builds the committees for `epoch`, taking the active indices from the index cache when
    /// present and populating it otherwise.
    fn committee_cache(&self, state: &BeaconState, epoch: Epoch) -> Result<CommitteeCache, Error> {
        let active_indices = match self.index_cache.get(epoch) {
            Some(indices) => {
                metrics::inc_counter(&metrics::VALIDATOR_INDEX_CACHE_HITS);
                indices
            }
            None => {
                metrics::inc_counter(&metrics::VALIDATOR_INDEX_CACHE_MISSES);
                let indices = state.get_active_validator_indices(epoch);
                self.index_cache.insert(epoch, indices.clone());
                indices
            }
        };

        Ok(CommitteeCache::initialized_with_active_indices(
            state,
            epoch,
            active_indices,
            &self.spec,
        )?)
    }
}

/// Parses `bytes` as a public key, rejecting any other length.
pub fn parse_public_key(bytes: &[u8]) -> Result<PublicKeyBytes, Error> {
    PublicKeyBytes::deserialize(bytes).map_err(|_| Error::MalformedPublicKey {
        expected: PUBLIC_KEY_BYTES_LEN,
        found: bytes.len(),
    })
}

fn pubkey_map(state: &BeaconState) -> HashMap<PublicKeyBytes, usize> {
    state
        .validators
        .iter()
        .enumerate()
        .map(|(i, v)| (v.pubkey, i))
        .collect()
}

/// Number of registry positions between `index` and the highest active index. Zero for active
/// validators and for those below the highest active index.
fn activation_queue_position(state: &BeaconState, index: usize, epoch: Epoch) -> u64 {
    let is_active = state
        .validators
        .get(index)
        .map_or(false, |v| v.is_active_at(epoch));
    if is_active {
        return 0;
    }

    let last_active_index = state
        .validators
        .iter()
        .rposition(|v| v.is_active_at(epoch))
        .unwrap_or(0);

    index.saturating_sub(last_active_index) as u64
}
