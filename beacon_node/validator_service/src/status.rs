use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use types::{ChainSpec, Epoch, PublicKeyBytes, Slot, Validator};

/// The lifecycle stage of a validator, as reported to validator clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidatorStatus {
    UnknownStatus,
    PendingActive,
    Active,
    InitiatedExit,
    Withdrawable,
    ExitedSlashed,
    Exited,
}

impl ValidatorStatus {
    /// Classifies `validator` at `epoch`.
    ///
    /// The checks run in order and the first match wins, so a slashed validator that has not yet
    /// reached its withdrawable epoch is `ExitedSlashed` rather than `Exited`.
    pub fn from_validator(validator: &Validator, epoch: Epoch, spec: &ChainSpec) -> Self {
        if validator.slashed && epoch < validator.withdrawable_epoch {
            ValidatorStatus::ExitedSlashed
        } else if validator.is_exited_at(epoch) && validator.is_withdrawable_at(epoch) {
            ValidatorStatus::Withdrawable
        } else if validator.is_exited_at(epoch) {
            ValidatorStatus::Exited
        } else if validator.has_initiated_exit(spec) {
            ValidatorStatus::InitiatedExit
        } else if validator.activation_epoch <= epoch {
            ValidatorStatus::Active
        } else {
            ValidatorStatus::PendingActive
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorStatus::UnknownStatus => "UNKNOWN_STATUS",
            ValidatorStatus::PendingActive => "PENDING_ACTIVE",
            ValidatorStatus::Active => "ACTIVE",
            ValidatorStatus::InitiatedExit => "INITIATED_EXIT",
            ValidatorStatus::Withdrawable => "WITHDRAWABLE",
            ValidatorStatus::ExitedSlashed => "EXITED_SLASHED",
            ValidatorStatus::Exited => "EXITED",
        }
    }
}

impl fmt::Display for ValidatorStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ValidatorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNKNOWN_STATUS" => Ok(ValidatorStatus::UnknownStatus),
            "PENDING_ACTIVE" => Ok(ValidatorStatus::PendingActive),
            "ACTIVE" => Ok(ValidatorStatus::Active),
            "INITIATED_EXIT" => Ok(ValidatorStatus::InitiatedExit),
            "WITHDRAWABLE" => Ok(ValidatorStatus::Withdrawable),
            "EXITED_SLASHED" => Ok(ValidatorStatus::ExitedSlashed),
            "EXITED" => Ok(ValidatorStatus::Exited),
            other => Err(format!("{} cannot be parsed as a validator status.", other)),
        }
    }
}

/// The answer to a single validator status query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatorStatusResponse {
    pub status: ValidatorStatus,
    pub activation_epoch: Epoch,
    pub deposit_inclusion_slot: Slot,
    pub eth1_deposit_block_number: u64,
    /// Distance to the most recently activated validator. Zero once active.
    pub position_in_activation_queue: u64,
}

impl ValidatorStatusResponse {
    /// The response for a validator whose deposit cannot be placed on the beacon chain yet.
    pub fn unknown(eth1_deposit_block_number: u64, spec: &ChainSpec) -> Self {
        Self {
            status: ValidatorStatus::UnknownStatus,
            activation_epoch: spec.far_future_epoch,
            deposit_inclusion_slot: Slot::new(0),
            eth1_deposit_block_number,
            position_in_activation_queue: 0,
        }
    }
}

/// One entry of a batched status query.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorStatusEntry {
    pub public_key: PublicKeyBytes,
    pub status: Result<ValidatorStatusResponse, crate::Error>,
}

impl ValidatorStatusEntry {
    pub fn is_active(&self) -> bool {
        matches!(&self.status, Ok(response) if response.status == ValidatorStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> Validator {
        Validator {
            activation_eligibility_epoch: Epoch::new(0),
            activation_epoch: Epoch::new(0),
            ..Validator::default()
        }
    }

    #[test]
    fn pending_when_activation_unset() {
        let spec = ChainSpec::mainnet();
        let v = Validator::default();

        // Slot 5000 is epoch 78.
        let epoch = Slot::new(5000).epoch(spec.slots_per_epoch);
        assert_eq!(
            ValidatorStatus::from_validator(&v, epoch, &spec),
            ValidatorStatus::PendingActive
        );
    }

    #[test]
    fn pending_when_activation_in_future() {
        let spec = ChainSpec::mainnet();
        let v = Validator {
            activation_epoch: Epoch::new(10),
            ..validator()
        };

        assert_eq!(
            ValidatorStatus::from_validator(&v, Epoch::new(9), &spec),
            ValidatorStatus::PendingActive
        );
        assert_eq!(
            ValidatorStatus::from_validator(&v, Epoch::new(10), &spec),
            ValidatorStatus::Active
        );
    }

    #[test]
    fn active() {
        let spec = ChainSpec::mainnet();
        let v = Validator {
            activation_epoch: spec.delayed_activation_exit_epoch(Epoch::new(0)),
            ..validator()
        };

        let epoch = Slot::new(10_000).epoch(spec.slots_per_epoch);
        assert_eq!(
            ValidatorStatus::from_validator(&v, epoch, &spec),
            ValidatorStatus::Active
        );
    }

    #[test]
    fn initiated_exit() {
        let spec = ChainSpec::mainnet();
        let epoch = Epoch::new(156);
        let v = Validator {
            exit_epoch: epoch + 2,
            withdrawable_epoch: epoch + 10,
            ..validator()
        };

        assert_eq!(
            ValidatorStatus::from_validator(&v, epoch, &spec),
            ValidatorStatus::InitiatedExit
        );
    }

    #[test]
    fn configured_far_future_exit_is_not_an_initiated_exit() {
        let mut spec = ChainSpec::mainnet();
        spec.far_future_epoch = Epoch::new(1_000);
        let v = Validator {
            exit_epoch: spec.far_future_epoch,
            withdrawable_epoch: spec.far_future_epoch,
            ..validator()
        };

        assert_eq!(
            ValidatorStatus::from_validator(&v, Epoch::new(156), &spec),
            ValidatorStatus::Active
        );
    }

    #[test]
    fn withdrawable() {
        let spec = ChainSpec::mainnet();
        let epoch = Epoch::new(156);
        let v = Validator {
            exit_epoch: epoch - 20,
            withdrawable_epoch: epoch - 1,
            ..validator()
        };

        assert_eq!(
            ValidatorStatus::from_validator(&v, epoch, &spec),
            ValidatorStatus::Withdrawable
        );
    }

    #[test]
    fn exited_slashed_takes_precedence() {
        let spec = ChainSpec::mainnet();
        let epoch = Epoch::new(156);
        let v = Validator {
            slashed: true,
            exit_epoch: epoch - 1,
            withdrawable_epoch: epoch + 1,
            ..validator()
        };

        assert_eq!(
            ValidatorStatus::from_validator(&v, epoch, &spec),
            ValidatorStatus::ExitedSlashed
        );

        let unslashed = Validator {
            slashed: false,
            ..v.clone()
        };
        assert_eq!(
            ValidatorStatus::from_validator(&unslashed, epoch, &spec),
            ValidatorStatus::Exited
        );
    }

    #[test]
    fn slashed_and_withdrawable() {
        let spec = ChainSpec::mainnet();
        let epoch = Epoch::new(156);
        let v = Validator {
            slashed: true,
            exit_epoch: epoch - 10,
            withdrawable_epoch: epoch,
            ..validator()
        };

        assert_eq!(
            ValidatorStatus::from_validator(&v, epoch, &spec),
            ValidatorStatus::Withdrawable
        );
    }

    #[test]
    fn exited() {
        let spec = ChainSpec::mainnet();
        let epoch = Epoch::new(156);
        let v = Validator {
            exit_epoch: epoch,
            withdrawable_epoch: epoch + 256,
            ..validator()
        };

        assert_eq!(
            ValidatorStatus::from_validator(&v, epoch, &spec),
            ValidatorStatus::Exited
        );
    }

    #[test]
    fn string_forms() {
        for status in [
            ValidatorStatus::UnknownStatus,
            ValidatorStatus::PendingActive,
            ValidatorStatus::Active,
            ValidatorStatus::InitiatedExit,
            ValidatorStatus::Withdrawable,
            ValidatorStatus::ExitedSlashed,
            ValidatorStatus::Exited,
        ] {
            assert_eq!(status.to_string().parse::<ValidatorStatus>(), Ok(status));
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{}\"", status)
            );
        }

        assert!("active".parse::<ValidatorStatus>().is_err());
    }
}
