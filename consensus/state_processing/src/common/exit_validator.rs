use super::{ensure_slashed_balance_slot, initiate_validator_exit};
use safe_arith::SafeArith;
use types::{BeaconStateError as Error, *};

/// Exit the validator of the given `index`.
///
/// A validator with a scheduled exit is left untouched. Otherwise the exit is queued via
/// `initiate_validator_exit` and the slashed-balances slot for the current epoch is
/// zero-filled if the ring does not yet reach it.
pub fn exit_validator(
    state: &mut BeaconState,
    index: usize,
    spec: &ChainSpec,
) -> Result<(), Error> {
    if state.get_validator(index)?.has_initiated_exit(spec) {
        return Ok(());
    }

    let slot_index = state
        .current_epoch(spec)
        .as_usize()
        .safe_rem(spec.latest_slashed_exit_length)?;

    initiate_validator_exit(state, index, spec)?;
    ensure_slashed_balance_slot(state, slot_index);

    Ok(())
}
