use super::errors::{AttesterSlashingInvalid as Invalid, BlockOperationError};
use super::is_valid_indexed_attestation::is_valid_indexed_attestation;
use super::{SignatureVerifier, VerifySignatures};
use std::collections::BTreeSet;
use types::*;

type Result<T> = std::result::Result<T, BlockOperationError<Invalid>>;

fn error(reason: Invalid) -> BlockOperationError<Invalid> {
    BlockOperationError::invalid(reason)
}

/// Indicates if an `AttesterSlashing` is valid to be included in a block in the current epoch of
/// the given state.
///
/// Returns `Ok(())` if the `AttesterSlashing` is valid, otherwise indicates the reason for
/// invalidity.
pub fn verify_attester_slashing<V: SignatureVerifier>(
    state: &BeaconState,
    attester_slashing: &AttesterSlashing,
    verify_signatures: VerifySignatures,
    verifier: &V,
    spec: &ChainSpec,
) -> Result<()> {
    let attestation_1 = &attester_slashing.attestation_1;
    let attestation_2 = &attester_slashing.attestation_2;

    // Spec: is_slashable_attestation_data
    verify!(attester_slashing.is_slashable(), Invalid::NotSlashable);

    verify!(
        !intersecting_indices(attester_slashing).is_empty(),
        Invalid::NoIntersectingIndices
    );

    is_valid_indexed_attestation(state, attestation_1, verify_signatures, verifier, spec)
        .map_err(|e| error(Invalid::IndexedAttestation1Invalid(e)))?;
    is_valid_indexed_attestation(state, attestation_2, verify_signatures, verifier, spec)
        .map_err(|e| error(Invalid::IndexedAttestation2Invalid(e)))?;

    Ok(())
}

/// For a given attester slashing, return the indices able to be slashed in ascending order.
///
/// An index is slashable if its validator is unslashed, activated and not yet withdrawable at
/// the current epoch.
///
/// Returns Ok(indices) if `indices.len() > 0`.
///
/// Spec v0.6.1
pub fn get_slashable_indices(
    state: &BeaconState,
    attester_slashing: &AttesterSlashing,
    spec: &ChainSpec,
) -> Result<Vec<u64>> {
    let current_epoch = state.current_epoch(spec);
    let mut slashable_indices = vec![];

    for index in intersecting_indices(attester_slashing) {
        let validator = state
            .validators
            .get(index as usize)
            .ok_or_else(|| error(Invalid::UnknownValidator(index)))?;

        if validator.is_slashable_at(current_epoch) {
            slashable_indices.push(index);
        }
    }

    verify!(!slashable_indices.is_empty(), Invalid::NoSlashableIndices);

    Ok(slashable_indices)
}

fn intersecting_indices(attester_slashing: &AttesterSlashing) -> BTreeSet<u64> {
    let indices_1 = attester_slashing
        .attestation_1
        .attesting_indices
        .iter()
        .collect::<BTreeSet<_>>();

    attester_slashing
        .attestation_2
        .attesting_indices
        .iter()
        .filter(|i| indices_1.contains(i))
        .copied()
        .collect()
}
