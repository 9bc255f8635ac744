use crate::common::slash_validator;
use errors::{BlockProcessingError, IntoWithIndex};
use rayon::prelude::*;
use types::*;

pub use is_valid_indexed_attestation::is_valid_indexed_attestation;
pub use verify_attester_slashing::{get_slashable_indices, verify_attester_slashing};

pub mod errors;
mod is_valid_indexed_attestation;
mod tests;
mod verify_attester_slashing;

/// Whether signatures should be checked. Disabled when replaying blocks already known to be
/// valid, or in tests.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum VerifySignatures {
    /// Validate all signatures encountered.
    True,
    /// Do not validate any signature. Use with caution.
    False,
}

impl VerifySignatures {
    pub fn is_true(self) -> bool {
        self == VerifySignatures::True
    }
}

/// Verifies aggregate BLS signatures over attestation data.
///
/// Implementations must be shareable across the rayon thread pool.
pub trait SignatureVerifier: Sync {
    /// Returns `true` if `signature` is a valid aggregate by `pubkeys` over `data` in `domain`.
    fn verify_attestation(
        &self,
        pubkeys: &[&PublicKeyBytes],
        data: &AttestationData,
        signature: &SignatureBytes,
        domain: u64,
    ) -> bool;
}

/// Validates each `AttesterSlashing` in `block` and returns a copy of `state` with every
/// accused validator slashed.
///
/// Either every slashing is applied or none is: on error the caller's state is left as it was
/// and no partially-updated state escapes. A slashing in which no accused validator is slashable
/// (already slashed, not yet active, or already withdrawable) invalidates the whole block.
pub fn process_attester_slashings<V: SignatureVerifier>(
    state: &BeaconState,
    block: &BeaconBlock,
    verify_signatures: VerifySignatures,
    verifier: &V,
    spec: &ChainSpec,
) -> Result<BeaconState, BlockProcessingError> {
    let attester_slashings = &block.body.attester_slashings;

    block_verify!(
        attester_slashings.len() <= spec.max_attester_slashings as usize,
        BlockProcessingError::MaxAttesterSlashingsExceeded {
            found: attester_slashings.len(),
            max: spec.max_attester_slashings as usize,
        }
    );

    // Verify the slashings in parallel, these are read-only against the input state.
    attester_slashings
        .par_iter()
        .enumerate()
        .try_for_each(|(i, attester_slashing)| {
            verify_attester_slashing(state, attester_slashing, verify_signatures, verifier, spec)
                .map_err(|e| e.into_with_index(i))
        })?;

    // Gather the slashable indices and update the state in series.
    let mut state = state.clone();
    for (i, attester_slashing) in attester_slashings.iter().enumerate() {
        let slashable_indices = get_slashable_indices(&state, attester_slashing, spec)
            .map_err(|e| e.into_with_index(i))?;

        for index in slashable_indices {
            slash_validator(&mut state, index as usize, spec)?;
        }
    }

    Ok(state)
}
