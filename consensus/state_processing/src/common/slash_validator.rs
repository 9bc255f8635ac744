use super::{decrease_balance, ensure_slashed_balance_slot, exit_validator};
use safe_arith::SafeArith;
use std::cmp;
use types::{BeaconStateError as Error, *};

/// Slash the validator with index ``slashed_index``.
///
/// The validator is exited, its withdrawal is pushed back by `latest_slashed_exit_length`
/// epochs and it loses `effective_balance / min_slashing_penalty_quotient` from both its
/// balance and effective balance.
///
/// Spec v0.6.1
pub fn slash_validator(
    state: &mut BeaconState,
    slashed_index: usize,
    spec: &ChainSpec,
) -> Result<(), Error> {
    // Bounds-check both lists up front so a failure leaves the state untouched.
    state.get_validator(slashed_index)?;
    state.get_balance_mut(slashed_index)?;

    let current_epoch = state.current_epoch(spec);
    let slashed_balances_index = current_epoch
        .as_usize()
        .safe_rem(spec.latest_slashed_exit_length)?;

    exit_validator(state, slashed_index, spec)?;

    let validator = state.get_validator_mut(slashed_index)?;
    validator.slashed = true;
    validator.withdrawable_epoch = cmp::max(
        validator.withdrawable_epoch,
        current_epoch.safe_add(spec.latest_slashed_exit_length as u64)?,
    );
    let effective_balance = validator.effective_balance;
    let penalty = effective_balance.safe_div(spec.min_slashing_penalty_quotient)?;
    validator.effective_balance = effective_balance.saturating_sub(penalty);

    ensure_slashed_balance_slot(state, slashed_balances_index);
    if let Some(total) = state.latest_slashed_balances.get_mut(slashed_balances_index) {
        *total = total.saturating_add(effective_balance);
    }

    decrease_balance(state, slashed_index, penalty)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::test_utils::TestingBeaconStateBuilder;

    #[test]
    fn slashing_marks_exits_and_penalises() {
        let spec = ChainSpec::mainnet();
        let mut state = TestingBeaconStateBuilder::new(4, &spec).build();
        let penalty = spec.max_effective_balance / spec.min_slashing_penalty_quotient;

        slash_validator(&mut state, 2, &spec).unwrap();

        let validator = &state.validators[2];
        assert!(validator.slashed);
        assert_eq!(validator.exit_epoch, Epoch::new(5));
        assert_eq!(
            validator.withdrawable_epoch,
            Epoch::new(spec.latest_slashed_exit_length as u64)
        );
        assert_eq!(validator.effective_balance, spec.max_effective_balance - penalty);
        assert_eq!(state.balances[2], spec.max_effective_balance - penalty);
        assert_eq!(state.latest_slashed_balances[0], spec.max_effective_balance);

        assert!(!state.validators[1].slashed);
        assert_eq!(state.balances[1], spec.max_effective_balance);
    }

    #[test]
    fn slashing_an_exiting_validator_keeps_its_exit() {
        let spec = ChainSpec::mainnet();
        let mut state = TestingBeaconStateBuilder::new(1, &spec)
            .modify_validator(0, |v| {
                v.exit_epoch = Epoch::new(10);
                v.withdrawable_epoch = Epoch::new(20_000);
            })
            .build();

        slash_validator(&mut state, 0, &spec).unwrap();

        assert!(state.validators[0].slashed);
        assert_eq!(state.validators[0].exit_epoch, Epoch::new(10));
        assert_eq!(state.validators[0].withdrawable_epoch, Epoch::new(20_000));
    }

    #[test]
    fn missing_balance_is_rejected_without_mutation() {
        let spec = ChainSpec::mainnet();
        let mut state = TestingBeaconStateBuilder::new(2, &spec).build();
        state.balances.pop();
        let before = state.clone();

        assert_eq!(
            slash_validator(&mut state, 1, &spec),
            Err(Error::BalancesOutOfBounds(1))
        );
        assert_eq!(state, before);
    }
}
