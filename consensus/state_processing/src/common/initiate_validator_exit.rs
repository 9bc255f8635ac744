use safe_arith::SafeArith;
use std::cmp::max;
use types::{BeaconStateError as Error, *};

/// Initiate the exit of the validator of the given `index`.
///
/// Does nothing if the validator already has a scheduled exit.
///
/// Spec v0.6.1
pub fn initiate_validator_exit(
    state: &mut BeaconState,
    index: usize,
    spec: &ChainSpec,
) -> Result<(), Error> {
    // Return if the validator already initiated exit
    if state.get_validator(index)?.has_initiated_exit(spec) {
        return Ok(());
    }

    let exit_queue_epoch = compute_exit_queue_epoch(state, spec)?;
    let withdrawable_epoch =
        exit_queue_epoch.safe_add(spec.min_validator_withdrawability_delay.as_u64())?;

    let validator = state.get_validator_mut(index)?;
    validator.exit_epoch = exit_queue_epoch;
    validator.withdrawable_epoch = withdrawable_epoch;

    Ok(())
}

/// Returns the epoch a newly exiting validator is assigned, respecting the churn limit.
///
/// Only exits scheduled at or after the delayed activation-exit epoch of the current epoch
/// occupy the queue.
fn compute_exit_queue_epoch(state: &BeaconState, spec: &ChainSpec) -> Result<Epoch, Error> {
    let delayed_epoch = spec.delayed_activation_exit_epoch(state.current_epoch(spec));

    let mut max_exit_epoch: Option<Epoch> = None;
    let mut churn: u64 = 0;

    for exit_epoch in state
        .validators
        .iter()
        .map(|v| v.exit_epoch)
        .filter(|&e| e != spec.far_future_epoch && e >= delayed_epoch)
    {
        match max_exit_epoch {
            Some(current) if exit_epoch < current => {}
            Some(current) if exit_epoch == current => churn.safe_add_assign(1)?,
            _ => {
                max_exit_epoch = Some(exit_epoch);
                churn = 1;
            }
        }
    }

    match max_exit_epoch {
        None => Ok(delayed_epoch),
        Some(max_exit_epoch) if churn >= state.get_churn_limit(spec)? => {
            Ok(max_exit_epoch.safe_add(1)?)
        }
        Some(max_exit_epoch) => Ok(max(delayed_epoch, max_exit_epoch)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_exits(exit_epochs: &[u64], slot: u64) -> BeaconState {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        state.slot = Slot::new(slot);
        state.validators = exit_epochs
            .iter()
            .map(|&e| Validator {
                activation_epoch: Epoch::new(0),
                exit_epoch: Epoch::new(e),
                ..Validator::default()
            })
            .collect();
        state.balances = vec![0; exit_epochs.len()];
        state
    }

    #[test]
    fn already_exited_is_unchanged() {
        let spec = ChainSpec::mainnet();
        let mut state = state_with_exits(&[199], 0);
        state.validators[0].withdrawable_epoch = Epoch::new(200);
        let before = state.clone();

        initiate_validator_exit(&mut state, 0, &spec).unwrap();
        assert_eq!(state, before);

        initiate_validator_exit(&mut state, 0, &spec).unwrap();
        assert_eq!(state.validators[0].exit_epoch, Epoch::new(199));
    }

    #[test]
    fn picks_the_highest_queued_exit_epoch() {
        let spec = ChainSpec::mainnet();
        let mut state = state_with_exits(&[100, 102, 101, u64::MAX], 0);

        initiate_validator_exit(&mut state, 3, &spec).unwrap();

        assert_eq!(state.validators[3].exit_epoch, Epoch::new(102));
        assert_eq!(
            state.validators[3].withdrawable_epoch,
            Epoch::new(102) + spec.min_validator_withdrawability_delay
        );
    }

    #[test]
    fn churn_overflow_moves_to_next_epoch() {
        let spec = ChainSpec::mainnet();
        let mut state = state_with_exits(&[102, 102, 102, 102, u64::MAX], 0);
        assert_eq!(state.get_churn_limit(&spec), Ok(4));

        initiate_validator_exit(&mut state, 4, &spec).unwrap();

        assert_eq!(state.validators[4].exit_epoch, Epoch::new(103));
    }

    #[test]
    fn empty_queue_uses_delayed_epoch() {
        let spec = ChainSpec::mainnet();
        let mut state = state_with_exits(&[u64::MAX], 64 * 10);

        initiate_validator_exit(&mut state, 0, &spec).unwrap();

        assert_eq!(
            state.validators[0].exit_epoch,
            spec.delayed_activation_exit_epoch(Epoch::new(10))
        );
    }

    #[test]
    fn exits_before_the_delayed_epoch_do_not_queue() {
        let spec = ChainSpec::mainnet();
        // Current epoch 10, so the delayed epoch is 15 and exits at 12 are ignored.
        let mut state = state_with_exits(&[12, 12, 12, 12, u64::MAX], 64 * 10);

        initiate_validator_exit(&mut state, 4, &spec).unwrap();

        assert_eq!(state.validators[4].exit_epoch, Epoch::new(15));
    }

    #[test]
    fn unknown_validator() {
        let spec = ChainSpec::mainnet();
        let mut state = state_with_exits(&[u64::MAX], 0);

        assert_eq!(
            initiate_validator_exit(&mut state, 1, &spec),
            Err(Error::UnknownValidator(1))
        );
    }
}
