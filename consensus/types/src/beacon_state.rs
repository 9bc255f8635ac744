use crate::*;
use safe_arith::{ArithError, SafeArith};
use serde::{Deserialize, Serialize};

pub use self::committee_cache::{get_active_validator_indices, CommitteeCache};

mod committee_cache;

const MAX_RANDOM_BYTE: u64 = (1 << 8) - 1;

#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    EpochOutOfBounds,
    SlotOutOfBounds,
    UnknownValidator(usize),
    BalancesOutOfBounds(usize),
    UnableToDetermineProducer,
    UnableToShuffle,
    TooManyValidators,
    InsufficientValidators,
    InsufficientRandaoMixes,
    RandaoMixesOutOfBounds(usize),
    ZeroSlotsPerEpoch,
    CommitteeCacheUninitialized(Option<Epoch>),
    RelativeEpochError(RelativeEpochError),
    ArithError(ArithError),
}

/// The state of the `BeaconChain` at some slot.
///
/// Equality is structural over every field; the state holds no caches.
///
/// Spec v0.6.1
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BeaconState {
    // Misc
    pub slot: Slot,
    pub genesis_time: u64,
    pub fork: Fork,

    // Validator registry
    pub validators: Vec<Validator>,
    pub balances: Vec<u64>,

    // Randomness and committees
    pub latest_randao_mixes: Vec<Hash256>,
    pub latest_start_shard: u64,

    // Finality
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub justification_bits: u8,
    pub finalized_checkpoint: Checkpoint,

    // Recent state
    pub current_crosslinks: Vec<Crosslink>,
    pub previous_crosslinks: Vec<Crosslink>,
    pub latest_block_roots: Vec<Hash256>,
    pub latest_slashed_balances: Vec<u64>,

    // Ethereum 1.0 chain data
    pub latest_eth1_data: Eth1Data,
    pub eth1_deposit_index: u64,
}

impl BeaconState {
    /// Create a new BeaconState suitable for genesis.
    ///
    /// Not a complete genesis state, see `initialize_beacon_state_from_deposits`.
    ///
    /// Spec v0.6.1
    pub fn new(genesis_time: u64, latest_eth1_data: Eth1Data, spec: &ChainSpec) -> Self {
        let initial_crosslink = Crosslink::default();
        let shard_count = spec.shard_count as usize;

        BeaconState {
            // Misc
            slot: spec.genesis_slot,
            genesis_time,
            fork: Fork::genesis(spec),

            // Validator registry
            validators: vec![],
            balances: vec![],

            // Randomness and committees
            latest_randao_mixes: vec![Hash256::zero(); spec.latest_randao_mixes_length],
            latest_start_shard: 0,

            // Finality
            previous_justified_checkpoint: Checkpoint::default(),
            current_justified_checkpoint: Checkpoint::default(),
            justification_bits: 0,
            finalized_checkpoint: Checkpoint::default(),

            // Recent state
            current_crosslinks: vec![initial_crosslink.clone(); shard_count],
            previous_crosslinks: vec![initial_crosslink; shard_count],
            latest_block_roots: vec![Hash256::zero(); spec.slots_per_historical_root],
            latest_slashed_balances: vec![0; spec.latest_slashed_exit_length],

            // Eth1
            latest_eth1_data,
            eth1_deposit_index: 0,
        }
    }

    /// The epoch corresponding to `self.slot`.
    ///
    /// Spec v0.6.1
    pub fn current_epoch(&self, spec: &ChainSpec) -> Epoch {
        self.slot.epoch(spec.slots_per_epoch)
    }

    /// The epoch prior to `self.current_epoch()`.
    ///
    /// If the current epoch is the genesis epoch, the genesis_epoch is returned.
    ///
    /// Spec v0.6.1
    pub fn previous_epoch(&self, spec: &ChainSpec) -> Epoch {
        let current_epoch = self.current_epoch(spec);
        if current_epoch > spec.genesis_epoch {
            current_epoch - 1
        } else {
            current_epoch
        }
    }

    /// The epoch following `self.current_epoch()`.
    ///
    /// Spec v0.6.1
    pub fn next_epoch(&self, spec: &ChainSpec) -> Epoch {
        self.current_epoch(spec) + 1
    }

    /// Safe indexer for the `validators` list.
    pub fn get_validator(&self, validator_index: usize) -> Result<&Validator, Error> {
        self.validators
            .get(validator_index)
            .ok_or(Error::UnknownValidator(validator_index))
    }

    /// Safe mutator for the `validators` list.
    pub fn get_validator_mut(&mut self, validator_index: usize) -> Result<&mut Validator, Error> {
        self.validators
            .get_mut(validator_index)
            .ok_or(Error::UnknownValidator(validator_index))
    }

    /// Safe mutator for the `balances` list.
    pub fn get_balance_mut(&mut self, validator_index: usize) -> Result<&mut u64, Error> {
        self.balances
            .get_mut(validator_index)
            .ok_or(Error::BalancesOutOfBounds(validator_index))
    }

    /// Returns the position of the validator with `pubkey` in the registry, if any.
    ///
    /// Performs a linear scan.
    pub fn get_validator_index(&self, pubkey: &PublicKeyBytes) -> Option<usize> {
        self.validators.iter().position(|v| v.pubkey == *pubkey)
    }

    /// Returns the indices of all validators active at `epoch`, in ascending order.
    ///
    /// Spec v0.6.1
    pub fn get_active_validator_indices(&self, epoch: Epoch) -> Vec<usize> {
        get_active_validator_indices(&self.validators, epoch)
    }

    /// Return the number of validators permitted to begin exiting in the current epoch.
    ///
    /// Spec v0.6.1
    pub fn get_churn_limit(&self, spec: &ChainSpec) -> Result<u64, Error> {
        let current_epoch = self.current_epoch(spec);
        let active_count = self
            .validators
            .iter()
            .filter(|v| v.is_active_at(current_epoch))
            .count();

        Ok(spec.churn_limit(active_count)?)
    }

    /// Return the randao mix at a recent ``epoch``.
    ///
    /// Spec v0.6.1
    pub fn get_randao_mix(&self, epoch: Epoch, spec: &ChainSpec) -> Result<&Hash256, Error> {
        let i = self.get_randao_mix_index(epoch, spec)?;
        self.latest_randao_mixes
            .get(i)
            .ok_or(Error::RandaoMixesOutOfBounds(i))
    }

    fn get_randao_mix_index(&self, epoch: Epoch, spec: &ChainSpec) -> Result<usize, Error> {
        let current_epoch = self.current_epoch(spec);
        let len = spec.latest_randao_mixes_length as u64;

        if current_epoch < epoch.safe_add(len)? && epoch <= current_epoch {
            Ok(epoch.as_usize().safe_rem(spec.latest_randao_mixes_length)?)
        } else {
            Err(Error::EpochOutOfBounds)
        }
    }

    /// Generate a seed for the given `epoch`.
    ///
    /// The mix is read `min_seed_lookahead` epochs behind `epoch`, so a seed is known before the
    /// epoch it shuffles begins.
    ///
    /// Spec v0.6.1
    pub fn get_seed(&self, epoch: Epoch, spec: &ChainSpec) -> Result<Hash256, Error> {
        if self.latest_randao_mixes.is_empty() {
            return Err(Error::InsufficientRandaoMixes);
        }

        // Bypass the safe getter for RANDAO so we can gracefully handle the scenario where
        // `epoch < min_seed_lookahead`.
        let mix = {
            let i = epoch
                .safe_add(self.latest_randao_mixes.len() as u64)?
                .safe_sub(spec.min_seed_lookahead.as_u64())?;
            let i_mod = i.as_usize().safe_rem(self.latest_randao_mixes.len())?;
            self.latest_randao_mixes
                .get(i_mod)
                .ok_or(Error::RandaoMixesOutOfBounds(i_mod))?
        };

        let mut preimage = [0; 64];
        preimage[..32].copy_from_slice(mix.as_bytes());
        preimage[32..40].copy_from_slice(&epoch.as_u64().to_le_bytes());

        Ok(Hash256::from_slice(&ethereum_hashing::hash(&preimage)))
    }

    /// Returns a fresh `CommitteeCache` for the previous, current or next epoch.
    pub fn committee_cache(&self, epoch: Epoch, spec: &ChainSpec) -> Result<CommitteeCache, Error> {
        CommitteeCache::initialized(self, epoch, spec)
    }

    /// Returns the beacon proposer index for the `slot`, using the committees in `cache`.
    ///
    /// Samples the first committee of the slot, weighting each candidate by effective balance.
    ///
    /// Spec v0.6.1
    pub fn get_beacon_proposer_index(
        &self,
        slot: Slot,
        cache: &CommitteeCache,
        spec: &ChainSpec,
    ) -> Result<usize, Error> {
        let epoch = slot.epoch(spec.slots_per_epoch);
        if !cache.is_initialized_at(epoch) {
            return Err(Error::CommitteeCacheUninitialized(cache.initialized_epoch()));
        }

        let first_committee = cache
            .first_committee_at_slot(slot)
            .ok_or(Error::SlotOutOfBounds)?;

        if first_committee.is_empty() {
            return Err(Error::InsufficientValidators);
        }

        let mut any_balance = false;
        for &index in first_committee {
            any_balance |= self.get_validator(index)?.effective_balance > 0;
        }
        if !any_balance {
            return Err(Error::InsufficientValidators);
        }

        let seed = self.get_seed(epoch, spec)?;

        let mut i: u64 = 0;
        loop {
            let position = epoch
                .as_u64()
                .safe_add(i)?
                .safe_rem(first_committee.len() as u64)? as usize;
            let candidate_index = *first_committee
                .get(position)
                .ok_or(Error::UnableToDetermineProducer)?;
            let random_byte = Self::shuffling_random_byte(i, seed.as_bytes())?;
            let effective_balance = self.get_validator(candidate_index)?.effective_balance;

            if effective_balance.safe_mul(MAX_RANDOM_BYTE)?
                >= spec
                    .max_effective_balance
                    .safe_mul(u64::from(random_byte))?
            {
                return Ok(candidate_index);
            }

            i.safe_add_assign(1)?;
        }
    }

    /// Get a random byte from the given `seed`.
    ///
    /// Used by the proposer sampling.
    fn shuffling_random_byte(i: u64, seed: &[u8]) -> Result<u8, Error> {
        let mut preimage = seed.to_vec();
        preimage.extend_from_slice(&i.safe_div(32)?.to_le_bytes());
        let index = i.safe_rem(32)? as usize;
        ethereum_hashing::hash(&preimage)
            .get(index)
            .copied()
            .ok_or(Error::UnableToDetermineProducer)
    }
}

impl From<RelativeEpochError> for Error {
    fn from(e: RelativeEpochError) -> Error {
        Error::RelativeEpochError(e)
    }
}

impl From<ArithError> for Error {
    fn from(e: ArithError) -> Error {
        Error::ArithError(e)
    }
}
