use types::{BeaconStateError as Error, *};

/// Activate the validator of the given ``index``.
///
/// Genesis validators are active from the genesis epoch. Any other validator is scheduled for the
/// delayed activation-exit epoch of the current epoch.
///
/// Spec v0.6.1
pub fn activate_validator(
    state: &mut BeaconState,
    index: usize,
    is_genesis: bool,
    spec: &ChainSpec,
) -> Result<(), Error> {
    let activation_epoch = if is_genesis {
        spec.genesis_epoch
    } else {
        spec.delayed_activation_exit_epoch(state.current_epoch(spec))
    };

    let validator = state.get_validator_mut(index)?;
    validator.activation_eligibility_epoch = activation_epoch;
    validator.activation_epoch = activation_epoch;

    Ok(())
}
