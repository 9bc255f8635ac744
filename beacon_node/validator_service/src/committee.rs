use crate::status::ValidatorStatus;
use types::*;

/// The committee assignment of one requested public key.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitteeAssignment {
    pub public_key: PublicKeyBytes,
    pub status: ValidatorStatus,
    /// `None` when the validator is not active, or has no committee in the queried epoch.
    pub duties: Option<CommitteeDuties>,
}

impl CommitteeAssignment {
    /// The assignment reported for a key that is not active at the head.
    pub fn inactive(public_key: PublicKeyBytes) -> Self {
        Self {
            public_key,
            status: ValidatorStatus::UnknownStatus,
            duties: None,
        }
    }
}

/// Where and with whom a validator attests during an epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct CommitteeDuties {
    pub validator_index: usize,
    /// Every member of the committee, in shuffled order.
    pub committee: Vec<usize>,
    pub shard: Shard,
    pub slot: Slot,
    /// `true` if the validator also proposes the block at `slot`.
    pub is_proposer: bool,
}

/// Reads the committee of `validator_index` from `cache` and checks whether it proposes at the
/// committee's slot.
pub fn committee_duties(
    state: &BeaconState,
    cache: &CommitteeCache,
    validator_index: usize,
    spec: &ChainSpec,
) -> Result<Option<CommitteeDuties>, BeaconStateError> {
    state.get_validator(validator_index)?;

    let committee = match cache.get_committee_for_validator(validator_index) {
        Some(committee) => committee.into_owned(),
        None => return Ok(None),
    };

    let proposer_index = state.get_beacon_proposer_index(committee.slot, cache, spec)?;

    Ok(Some(CommitteeDuties {
        validator_index,
        committee: committee.committee,
        shard: committee.shard,
        slot: committee.slot,
        is_proposer: proposer_index == validator_index,
    }))
}
