use super::common::activate_validator;
use safe_arith::SafeArith;
use std::cmp;
use types::{BeaconStateError as Error, *};

/// Initialize a `BeaconState` from genesis data.
///
/// Each deposit becomes a validator. Validators whose effective balance reaches
/// `max_effective_balance` are activated at the genesis epoch; the rest stay pending.
///
/// Spec v0.6.1
pub fn initialize_beacon_state_from_deposits(
    genesis_time: u64,
    deposits: &[Deposit],
    spec: &ChainSpec,
) -> Result<BeaconState, Error> {
    let eth1_data = Eth1Data {
        deposit_count: deposits.len() as u64,
        ..Eth1Data::default()
    };
    let mut state = BeaconState::new(genesis_time, eth1_data, spec);

    for deposit in deposits {
        process_genesis_deposit(&mut state, &deposit.data, spec)?;
    }
    state.eth1_deposit_index = deposits.len() as u64;

    process_activations(&mut state, spec)?;

    Ok(state)
}

/// Appends the validator described by `data`, or tops up its balance if the pubkey is already
/// registered.
fn process_genesis_deposit(
    state: &mut BeaconState,
    data: &DepositData,
    spec: &ChainSpec,
) -> Result<(), Error> {
    if let Some(index) = state.get_validator_index(&data.pubkey) {
        let balance = state.get_balance_mut(index)?;
        *balance = balance.safe_add(data.amount)?;
        return Ok(());
    }

    state.validators.push(Validator {
        pubkey: data.pubkey,
        withdrawal_credentials: data.withdrawal_credentials,
        activation_eligibility_epoch: spec.far_future_epoch,
        activation_epoch: spec.far_future_epoch,
        exit_epoch: spec.far_future_epoch,
        withdrawable_epoch: spec.far_future_epoch,
        slashed: false,
        effective_balance: 0,
    });
    state.balances.push(data.amount);

    Ok(())
}

/// Recomputes effective balances and activates every validator at the maximum.
fn process_activations(state: &mut BeaconState, spec: &ChainSpec) -> Result<(), Error> {
    for index in 0..state.validators.len() {
        let balance = *state
            .balances
            .get(index)
            .ok_or(Error::BalancesOutOfBounds(index))?;
        let effective_balance = cmp::min(
            balance.safe_sub(balance.safe_rem(spec.effective_balance_increment)?)?,
            spec.max_effective_balance,
        );

        let validator = state.get_validator_mut(index)?;
        validator.effective_balance = effective_balance;

        if effective_balance >= spec.max_effective_balance {
            activate_validator(state, index, true, spec)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::test_utils::{generate_deterministic_pubkeys, TestingDepositBuilder};

    #[test]
    fn genesis_activates_full_deposits_only() {
        let spec = ChainSpec::mainnet();
        let keys = generate_deterministic_pubkeys(3);
        let deposits = vec![
            TestingDepositBuilder::new(keys[0], spec.max_effective_balance).build(),
            TestingDepositBuilder::new(keys[1], 16_500_000_000).build(),
            TestingDepositBuilder::new(keys[2], spec.max_effective_balance + 7).build(),
        ];

        let state = initialize_beacon_state_from_deposits(42, &deposits, &spec).unwrap();

        assert_eq!(state.genesis_time, 42);
        assert_eq!(state.eth1_deposit_index, 3);
        assert_eq!(state.latest_eth1_data.deposit_count, 3);
        assert_eq!(state.balances[2], spec.max_effective_balance + 7);

        assert_eq!(state.validators[0].activation_epoch, spec.genesis_epoch);
        assert_eq!(state.validators[1].activation_epoch, spec.far_future_epoch);
        assert_eq!(state.validators[1].effective_balance, 16_000_000_000);
        assert_eq!(state.validators[2].activation_epoch, spec.genesis_epoch);
        assert_eq!(state.validators[2].effective_balance, spec.max_effective_balance);

        assert_eq!(state.get_active_validator_indices(Epoch::new(0)), vec![0, 2]);
    }

    #[test]
    fn repeated_pubkey_tops_up() {
        let spec = ChainSpec::mainnet();
        let key = generate_deterministic_pubkeys(1).remove(0);
        let half = spec.max_effective_balance / 2;
        let deposits = vec![
            TestingDepositBuilder::new(key, half).build(),
            TestingDepositBuilder::new(key, half).build(),
        ];

        let state = initialize_beacon_state_from_deposits(0, &deposits, &spec).unwrap();

        assert_eq!(state.validators.len(), 1);
        assert_eq!(state.balances, vec![spec.max_effective_balance]);
        assert!(state.validators[0].is_active_at(Epoch::new(0)));
    }
}
