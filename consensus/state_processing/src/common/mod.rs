mod activate_validator;
mod exit_validator;
mod initiate_validator_exit;
mod slash_validator;

pub use activate_validator::activate_validator;
pub use exit_validator::exit_validator;
pub use initiate_validator_exit::initiate_validator_exit;
pub use slash_validator::slash_validator;

use types::{BeaconState, BeaconStateError};

/// Decrease the balance of a validator, saturating upon overflow, as per the spec.
pub fn decrease_balance(
    state: &mut BeaconState,
    index: usize,
    delta: u64,
) -> Result<(), BeaconStateError> {
    let balance = state.get_balance_mut(index)?;
    *balance = balance.saturating_sub(delta);
    Ok(())
}

/// Makes sure the slashed-balances ring has an entry at `index`, zero-filling any gap.
pub(crate) fn ensure_slashed_balance_slot(state: &mut BeaconState, index: usize) {
    if state.latest_slashed_balances.len() <= index {
        state
            .latest_slashed_balances
            .resize(index.saturating_add(1), 0);
    }
}
