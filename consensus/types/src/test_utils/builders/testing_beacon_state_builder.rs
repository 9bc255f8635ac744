use crate::test_utils::generate_deterministic_pubkeys;
use crate::*;

/// Builds a beacon state to be used for testing purposes.
///
/// Every validator is active from the genesis epoch with the maximum effective balance.
///
/// This struct should **never be used for production purposes.**
pub struct TestingBeaconStateBuilder {
    state: BeaconState,
}

impl TestingBeaconStateBuilder {
    /// Creates a state with `validator_count` deterministic validators.
    pub fn new(validator_count: usize, spec: &ChainSpec) -> Self {
        let mut state = BeaconState::new(0, Eth1Data::default(), spec);

        state.validators = generate_deterministic_pubkeys(validator_count)
            .into_iter()
            .map(|pubkey| Validator {
                pubkey,
                withdrawal_credentials: Hash256::zero(),
                activation_eligibility_epoch: spec.genesis_epoch,
                activation_epoch: spec.genesis_epoch,
                exit_epoch: spec.far_future_epoch,
                withdrawable_epoch: spec.far_future_epoch,
                slashed: false,
                effective_balance: spec.max_effective_balance,
            })
            .collect();
        state.balances = vec![spec.max_effective_balance; validator_count];
        state.eth1_deposit_index = validator_count as u64;

        Self { state }
    }

    /// Sets the `BeaconState` to be in a slot.
    pub fn teleport_to_slot(mut self, slot: Slot) -> Self {
        self.state.slot = slot;
        self
    }

    /// Sets the genesis time.
    pub fn genesis_time(mut self, genesis_time: u64) -> Self {
        self.state.genesis_time = genesis_time;
        self
    }

    /// Fills every randao mix with `mix`.
    pub fn randao_mixes(mut self, mix: Hash256) -> Self {
        for existing in self.state.latest_randao_mixes.iter_mut() {
            *existing = mix;
        }
        self
    }

    /// Applies `f` to the validator at `index`.
    ///
    /// Panics if `index` is out of bounds.
    pub fn modify_validator<F: FnOnce(&mut Validator)>(mut self, index: usize, f: F) -> Self {
        f(&mut self.state.validators[index]);
        self
    }

    pub fn build(self) -> BeaconState {
        self.state
    }
}
