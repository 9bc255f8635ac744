use super::errors::{BlockOperationError, IndexedAttestationInvalid as Invalid};
use super::{SignatureVerifier, VerifySignatures};
use types::*;

type Result<T> = std::result::Result<T, BlockOperationError<Invalid>>;

fn error(reason: Invalid) -> BlockOperationError<Invalid> {
    BlockOperationError::invalid(reason)
}

/// Verify an `IndexedAttestation`.
///
/// The attesting indices must be non-empty, strictly increasing and refer to known validators.
/// The aggregate signature is only checked when `verify_signatures` is `True`.
pub fn is_valid_indexed_attestation<V: SignatureVerifier>(
    state: &BeaconState,
    indexed_attestation: &IndexedAttestation,
    verify_signatures: VerifySignatures,
    verifier: &V,
    spec: &ChainSpec,
) -> Result<()> {
    let indices = &indexed_attestation.attesting_indices;

    // Verify that indices aren't empty
    verify!(!indices.is_empty(), Invalid::IndicesEmpty);

    // Verify max number of indices
    let max_indices = spec.max_indices_per_attestation as usize;
    verify!(
        indices.len() <= max_indices,
        Invalid::MaxIndicesExceed(max_indices, indices.len())
    );

    // Check that indices are sorted and unique
    indices
        .windows(2)
        .enumerate()
        .try_for_each(|(i, pair)| match pair {
            [a, b] if a >= b => Err(error(Invalid::BadValidatorIndicesOrdering(i))),
            _ => Ok(()),
        })?;

    let pubkeys = indices
        .iter()
        .map(|&i| {
            state
                .validators
                .get(i as usize)
                .map(|v| &v.pubkey)
                .ok_or_else(|| error(Invalid::UnknownValidator(i)))
        })
        .collect::<Result<Vec<_>>>()?;

    if verify_signatures.is_true() {
        let domain = spec.get_domain(
            indexed_attestation.data.target.epoch,
            Domain::Attestation,
            &state.fork,
        );
        verify!(
            verifier.verify_attestation(
                &pubkeys,
                &indexed_attestation.data,
                &indexed_attestation.signature,
                domain
            ),
            Invalid::BadSignature
        );
    }

    Ok(())
}
