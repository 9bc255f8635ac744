use crate::{ChainSpec, Epoch, Hash256, PublicKeyBytes};
use serde::{Deserialize, Serialize};

/// Information about a `BeaconChain` validator.
///
/// Spec v0.6.1
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: Hash256,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
    pub slashed: bool,
    pub effective_balance: u64,
}

impl Validator {
    /// Returns `true` if the validator is considered active at some epoch.
    pub fn is_active_at(&self, epoch: Epoch) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }

    /// Returns `true` if the validator is slashable at some epoch.
    pub fn is_slashable_at(&self, epoch: Epoch) -> bool {
        !self.slashed && self.activation_epoch <= epoch && epoch < self.withdrawable_epoch
    }

    /// Returns `true` if the validator is considered exited at some epoch.
    pub fn is_exited_at(&self, epoch: Epoch) -> bool {
        self.exit_epoch <= epoch
    }

    /// Returns `true` if the validator is able to withdraw at some epoch.
    pub fn is_withdrawable_at(&self, epoch: Epoch) -> bool {
        epoch >= self.withdrawable_epoch
    }

    /// Returns `true` if an exit has been scheduled, whether or not it has taken effect.
    pub fn has_initiated_exit(&self, spec: &ChainSpec) -> bool {
        self.exit_epoch != spec.far_future_epoch
    }
}

impl Default for Validator {
    /// Yields a "default" `Validator`. Primarily used for testing.
    fn default() -> Self {
        Self {
            pubkey: PublicKeyBytes::empty(),
            withdrawal_credentials: Hash256::default(),
            activation_eligibility_epoch: Epoch::max_value(),
            activation_epoch: Epoch::max_value(),
            exit_epoch: Epoch::max_value(),
            withdrawable_epoch: Epoch::max_value(),
            slashed: false,
            effective_balance: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default() {
        let v = Validator::default();

        let epoch = Epoch::new(0);

        assert!(!v.is_active_at(epoch));
        assert!(!v.is_exited_at(epoch));
        assert!(!v.is_withdrawable_at(epoch));
        assert!(!v.has_initiated_exit(&ChainSpec::mainnet()));
        assert!(!v.slashed);
    }

    #[test]
    fn initiated_exit_follows_configured_far_future_epoch() {
        let spec = ChainSpec {
            far_future_epoch: Epoch::new(1_000),
            ..ChainSpec::mainnet()
        };
        let v = Validator {
            exit_epoch: spec.far_future_epoch,
            ..Validator::default()
        };

        assert!(!v.has_initiated_exit(&spec));
        assert!(Validator::default().has_initiated_exit(&spec));
    }

    #[test]
    fn is_active_at() {
        let epoch = Epoch::new(10);

        let v = Validator {
            activation_epoch: epoch,
            ..Validator::default()
        };

        assert!(!v.is_active_at(epoch - 1));
        assert!(v.is_active_at(epoch));
        assert!(v.is_active_at(epoch + 1));
    }

    #[test]
    fn is_exited_at() {
        let epoch = Epoch::new(10);

        let v = Validator {
            exit_epoch: epoch,
            ..Validator::default()
        };

        assert!(!v.is_exited_at(epoch - 1));
        assert!(v.is_exited_at(epoch));
        assert!(v.is_exited_at(epoch + 1));
        assert!(v.has_initiated_exit(&ChainSpec::mainnet()));
    }

    #[test]
    fn is_withdrawable_at() {
        let epoch = Epoch::new(10);

        let v = Validator {
            withdrawable_epoch: epoch,
            ..Validator::default()
        };

        assert!(!v.is_withdrawable_at(epoch - 1));
        assert!(v.is_withdrawable_at(epoch));
        assert!(v.is_withdrawable_at(epoch + 1));
    }

    #[test]
    fn is_slashable_at() {
        let v = Validator {
            activation_epoch: Epoch::new(2),
            withdrawable_epoch: Epoch::new(8),
            ..Validator::default()
        };

        assert!(!v.is_slashable_at(Epoch::new(1)));
        assert!(v.is_slashable_at(Epoch::new(2)));
        assert!(!v.is_slashable_at(Epoch::new(8)));

        let slashed = Validator {
            slashed: true,
            ..v
        };
        assert!(!slashed.is_slashable_at(Epoch::new(2)));
    }
}
