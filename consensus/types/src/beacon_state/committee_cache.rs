use super::{BeaconState, Error};
use crate::*;
use core::num::NonZeroUsize;
use std::ops::Range;
use swap_or_not_shuffle::shuffle_list;


/// Computes and stores the shuffling for an epoch. Provides various getters to allow callers to
/// read the committees for the given epoch.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct CommitteeCache {
    initialized_epoch: Option<Epoch>,
    shuffling: Vec<usize>,
    shuffling_positions: Vec<Option<NonZeroUsize>>,
    shuffling_start_shard: u64,
    shard_count: u64,
    committee_count: usize,
    slots_per_epoch: u64,
}

impl CommitteeCache {
    /// Return a new, fully initialized cache, scanning the registry for the active validators.
    ///
    /// Spec v0.6.1
    pub fn initialized(
        state: &BeaconState,
        epoch: Epoch,
        spec: &ChainSpec,
    ) -> Result<CommitteeCache, Error> {
        let active_validator_indices = get_active_validator_indices(&state.validators, epoch);
        Self::initialized_with_active_indices(state, epoch, active_validator_indices, spec)
    }

    /// Return a new, fully initialized cache using a known set of `active_validator_indices`.
    ///
    /// The indices must be exactly those active at `epoch`, in ascending order; callers typically
    /// obtain them from a cache keyed by epoch.
    ///
    /// Spec v0.6.1
    pub fn initialized_with_active_indices(
        state: &BeaconState,
        epoch: Epoch,
        active_validator_indices: Vec<usize>,
        spec: &ChainSpec,
    ) -> Result<CommitteeCache, Error> {
        let relative_epoch = RelativeEpoch::from_epoch(state.current_epoch(spec), epoch)
            .map_err(|_| Error::EpochOutOfBounds)?;

        // May cause divide-by-zero errors.
        if spec.slots_per_epoch == 0 {
            return Err(Error::ZeroSlotsPerEpoch);
        }

        if active_validator_indices.is_empty() {
            return Err(Error::InsufficientValidators);
        }

        if let Some(&index) = active_validator_indices
            .iter()
            .find(|&&i| i >= state.validators.len())
        {
            return Err(Error::UnknownValidator(index));
        }

        let committee_count = spec.get_epoch_committee_count(active_validator_indices.len()) as usize;

        let shuffling_start_shard =
            Self::compute_start_shard(state, relative_epoch, active_validator_indices.len(), spec);

        let seed = state.get_seed(epoch, spec)?;

        let shuffling = shuffle_list(
            active_validator_indices,
            spec.shuffle_round_count,
            seed.as_bytes(),
            false,
        )
        .ok_or(Error::UnableToShuffle)?;

        // The use of `NonZeroUsize` reduces the maximum number of possible validators by one.
        if state.validators.len() == usize::MAX {
            return Err(Error::TooManyValidators);
        }

        let mut shuffling_positions = vec![None; state.validators.len()];
        for (i, &v) in shuffling.iter().enumerate() {
            shuffling_positions[v] = NonZeroUsize::new(i + 1);
        }

        Ok(CommitteeCache {
            initialized_epoch: Some(epoch),
            shuffling,
            shuffling_positions,
            shuffling_start_shard,
            shard_count: spec.shard_count,
            committee_count,
            slots_per_epoch: spec.slots_per_epoch,
        })
    }

    /// Compute the shard which must be attested to first in a given relative epoch.
    ///
    /// The `active_validator_count` must be the number of validators active at `relative_epoch`.
    ///
    /// Spec v0.6.1
    pub fn compute_start_shard(
        state: &BeaconState,
        relative_epoch: RelativeEpoch,
        active_validator_count: usize,
        spec: &ChainSpec,
    ) -> u64 {
        match relative_epoch {
            RelativeEpoch::Current => state.latest_start_shard,
            RelativeEpoch::Previous => {
                let shard_delta = spec.get_shard_delta(active_validator_count);

                (state.latest_start_shard + spec.shard_count - shard_delta) % spec.shard_count
            }
            RelativeEpoch::Next => {
                let current_active_validators =
                    get_active_validator_count(&state.validators, state.current_epoch(spec));
                let shard_delta = spec.get_shard_delta(current_active_validators);

                (state.latest_start_shard + shard_delta) % spec.shard_count
            }
        }
    }

    /// Returns `true` if the cache has been initialized at the supplied `epoch`.
    ///
    /// An non-initialized cache does not provide any useful information.
    pub fn is_initialized_at(&self, epoch: Epoch) -> bool {
        Some(epoch) == self.initialized_epoch
    }

    pub fn initialized_epoch(&self) -> Option<Epoch> {
        self.initialized_epoch
    }

    /// Returns the **shuffled** list of active validator indices for the initialized epoch.
    ///
    /// These indices are not in ascending order.
    ///
    /// Always returns `&[]` for a non-initialized epoch.
    pub fn shuffling(&self) -> &[usize] {
        &self.shuffling
    }

    /// Return `Some(CrosslinkCommittee)` if the given shard has a committee during the given
    /// `epoch`.
    ///
    /// Always returns `None` for a non-initialized epoch.
    pub fn get_crosslink_committee_for_shard(&self, shard: Shard) -> Option<CrosslinkCommittee> {
        if shard >= self.shard_count || self.initialized_epoch.is_none() {
            return None;
        }

        let committee_index =
            (shard + self.shard_count - self.shuffling_start_shard) % self.shard_count;
        let committee = self.compute_committee(committee_index as usize)?;
        let slot = self.crosslink_slot_for_shard(shard)?;

        Some(CrosslinkCommittee {
            shard,
            committee,
            slot,
        })
    }

    /// Returns the `AttestationDuty` for the given `validator_index`.
    ///
    /// Returns `None` if the `validator_index` does not exist, does not have duties or `Self` is
    /// non-initialized.
    pub fn get_attestation_duties(&self, validator_index: usize) -> Option<AttestationDuty> {
        let i = self.shuffled_position(validator_index)?;

        (0..self.committee_count)
            .filter_map(|nth_committee| {
                self.compute_committee_range(nth_committee)
                    .map(|range| (nth_committee, range))
            })
            .find(|(_, range)| range.contains(&i))
            .and_then(|(nth_committee, range)| {
                let shard = (self.shuffling_start_shard + nth_committee as u64) % self.shard_count;
                let slot = self.crosslink_slot_for_shard(shard)?;

                Some(AttestationDuty {
                    slot,
                    shard,
                    committee_position: i - range.start,
                    committee_len: range.end - range.start,
                })
            })
    }

    /// Returns the committee containing `validator_index`, if it is active in this epoch.
    pub fn get_committee_for_validator(&self, validator_index: usize) -> Option<CrosslinkCommittee> {
        let duty = self.get_attestation_duties(validator_index)?;
        self.get_crosslink_committee_for_shard(duty.shard)
    }

    /// Returns the number of active validators in the initialized epoch.
    ///
    /// Always returns `usize::default()` for a non-initialized epoch.
    pub fn active_validator_count(&self) -> usize {
        self.shuffling.len()
    }

    /// Returns the total number of committees in the initialized epoch.
    ///
    /// Always returns `usize::default()` for a non-initialized epoch.
    pub fn epoch_committee_count(&self) -> usize {
        self.committee_count
    }

    /// Returns the shard assigned to the first committee in the initialized epoch.
    ///
    /// Always returns `u64::default()` for a non-initialized epoch.
    pub fn epoch_start_shard(&self) -> u64 {
        self.shuffling_start_shard
    }

    /// Returns all crosslink committees, if any, for the given slot in the initialized epoch.
    ///
    /// Returns `None` if `slot` is not in the initialized epoch, or if `Self` is not initialized.
    pub fn get_crosslink_committees_for_slot(&self, slot: Slot) -> Option<Vec<CrosslinkCommittee>> {
        let position = self
            .initialized_epoch?
            .position(slot, self.slots_per_epoch)?;
        let committees_per_slot = self.committee_count / self.slots_per_epoch as usize;
        let position = position * committees_per_slot;

        if position >= self.committee_count {
            None
        } else {
            let mut committees = Vec::with_capacity(committees_per_slot);

            for index in position..position + committees_per_slot {
                let committee = self.compute_committee(index)?;
                let shard = (self.shuffling_start_shard + index as u64) % self.shard_count;

                committees.push(CrosslinkCommittee {
                    committee,
                    shard,
                    slot,
                });
            }

            Some(committees)
        }
    }

    /// Returns the first committee of the given slot in the initialized epoch.
    ///
    /// Always returns `None` for a non-initialized epoch.
    pub fn first_committee_at_slot(&self, slot: Slot) -> Option<&[usize]> {
        self.get_crosslink_committees_for_slot(slot)?
            .first()
            .map(|cc| cc.committee)
    }

    /// Returns a slice of `self.shuffling` that represents the `index`'th committee in the epoch.
    fn compute_committee(&self, index: usize) -> Option<&[usize]> {
        self.shuffling.get(self.compute_committee_range(index)?)
    }

    /// Returns a range of `self.shuffling` that represents the `index`'th committee in the epoch.
    ///
    /// To avoid a divide-by-zero, returns `None` if `self.committee_count` is zero.
    ///
    /// Will also return `None` if the index is out of bounds.
    fn compute_committee_range(&self, index: usize) -> Option<Range<usize>> {
        if self.committee_count == 0 || index >= self.committee_count {
            return None;
        }

        let num_validators = self.shuffling.len();
        let count = self.committee_count;

        let start = (num_validators * index) / count;
        let end = (num_validators * (index + 1)) / count;

        Some(start..end)
    }

    /// Returns the `slot` that `shard` will be crosslink-ed in during the initialized epoch.
    ///
    /// Always returns `None` for a non-initialized epoch.
    fn crosslink_slot_for_shard(&self, shard: u64) -> Option<Slot> {
        let offset = (shard + self.shard_count - self.shuffling_start_shard) % self.shard_count;
        let committees_per_slot = self.committee_count as u64 / self.slots_per_epoch;
        Some(
            self.initialized_epoch?.start_slot(self.slots_per_epoch)
                + offset.checked_div(committees_per_slot)?,
        )
    }

    /// Returns the index of some validator in `self.shuffling`.
    ///
    /// Always returns `None` for a non-initialized epoch.
    fn shuffled_position(&self, validator_index: usize) -> Option<usize> {
        self.shuffling_positions
            .get(validator_index)?
            .map(|p| p.get() - 1)
    }
}

/// Returns a list of all `validators` indices where the validator is active at the given
/// `epoch`.
///
/// Spec v0.6.1
pub fn get_active_validator_indices(validators: &[Validator], epoch: Epoch) -> Vec<usize> {
    let mut active = Vec::with_capacity(validators.len());

    for (index, validator) in validators.iter().enumerate() {
        if validator.is_active_at(epoch) {
            active.push(index)
        }
    }

    active.shrink_to_fit();

    active
}

/// Returns the count of all `validators` indices where the validator is active at the given
/// `epoch`.
fn get_active_validator_count(validators: &[Validator], epoch: Epoch) -> usize {
    validators.iter().filter(|v| v.is_active_at(epoch)).count()
}
