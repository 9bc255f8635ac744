#![cfg(test)]

use super::errors::{
    AttesterSlashingInvalid, BlockOperationError, BlockProcessingError, IndexedAttestationInvalid,
};
use super::*;
use types::test_utils::{TestingAttesterSlashingBuilder, TestingBeaconStateBuilder};

pub const VALIDATOR_COUNT: usize = 16;

struct AcceptAll;

impl SignatureVerifier for AcceptAll {
    fn verify_attestation(
        &self,
        _: &[&PublicKeyBytes],
        _: &AttestationData,
        _: &SignatureBytes,
        _: u64,
    ) -> bool {
        true
    }
}

struct RejectAll;

impl SignatureVerifier for RejectAll {
    fn verify_attestation(
        &self,
        _: &[&PublicKeyBytes],
        _: &AttestationData,
        _: &SignatureBytes,
        _: u64,
    ) -> bool {
        false
    }
}

/// Accepts only signatures made by exactly `pubkeys` in `domain`.
struct ExpectSigners {
    pubkeys: Vec<PublicKeyBytes>,
    domain: u64,
}

impl SignatureVerifier for ExpectSigners {
    fn verify_attestation(
        &self,
        pubkeys: &[&PublicKeyBytes],
        _: &AttestationData,
        _: &SignatureBytes,
        domain: u64,
    ) -> bool {
        domain == self.domain && pubkeys.iter().copied().eq(self.pubkeys.iter())
    }
}

fn get_state() -> (BeaconState, ChainSpec) {
    let spec = ChainSpec::mainnet();
    let state = TestingBeaconStateBuilder::new(VALIDATOR_COUNT, &spec).build();
    (state, spec)
}

fn block_with(attester_slashings: Vec<AttesterSlashing>) -> BeaconBlock {
    let mut block = BeaconBlock::empty(Slot::new(0));
    block.body.attester_slashings = attester_slashings;
    block
}

#[test]
fn valid_double_vote_slashes_every_signer() {
    let (state, spec) = get_state();
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote(&[1, 2])]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec)
            .unwrap();

    for index in [1, 2] {
        let validator = &result.validators[index];
        assert!(validator.slashed);
        assert_ne!(validator.exit_epoch, spec.far_future_epoch);
    }
    assert!(!result.validators[0].slashed);
    assert!(!result.validators[3].slashed);

    // The input state is not modified.
    assert!(state.validators.iter().all(|v| !v.slashed));
}

#[test]
fn valid_surround_vote() {
    let (state, spec) = get_state();
    let block = block_with(vec![TestingAttesterSlashingBuilder::surround_vote(&[5])]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::False, &RejectAll, &spec)
            .unwrap();

    assert!(result.validators[5].slashed);
}

#[test]
fn already_slashed_validator_is_rejected() {
    let spec = ChainSpec::mainnet();
    let state = TestingBeaconStateBuilder::new(VALIDATOR_COUNT, &spec)
        .modify_validator(1, |v| v.slashed = true)
        .build();
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote(&[1])]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::AttesterSlashingInvalid {
            index: 0,
            reason: AttesterSlashingInvalid::NoSlashableIndices
        })
    );
}

#[test]
fn withdrawable_validator_is_not_slashable() {
    let spec = ChainSpec::mainnet();
    let state = TestingBeaconStateBuilder::new(VALIDATOR_COUNT, &spec)
        .teleport_to_slot(Epoch::new(100).start_slot(spec.slots_per_epoch))
        .modify_validator(1, |v| {
            v.exit_epoch = Epoch::new(10);
            v.withdrawable_epoch = Epoch::new(20);
        })
        .build();
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote(&[1])]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::AttesterSlashingInvalid {
            index: 0,
            reason: AttesterSlashingInvalid::NoSlashableIndices
        })
    );
    assert!(!state.validators[1].slashed);
    assert_eq!(state.validators[1].withdrawable_epoch, Epoch::new(20));
}

#[test]
fn pending_validator_is_not_slashable() {
    let spec = ChainSpec::mainnet();
    let state = TestingBeaconStateBuilder::new(VALIDATOR_COUNT, &spec)
        .modify_validator(1, |v| v.activation_epoch = spec.far_future_epoch)
        .build();
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote(&[1])]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::AttesterSlashingInvalid {
            index: 0,
            reason: AttesterSlashingInvalid::NoSlashableIndices
        })
    );
}

#[test]
fn unslashable_signers_are_skipped() {
    let spec = ChainSpec::mainnet();
    let state = TestingBeaconStateBuilder::new(VALIDATOR_COUNT, &spec)
        .modify_validator(1, |v| v.activation_epoch = spec.far_future_epoch)
        .build();
    let slashing = TestingAttesterSlashingBuilder::double_vote(&[1, 2]);

    assert_eq!(get_slashable_indices(&state, &slashing, &spec), Ok(vec![2]));

    let result = process_attester_slashings(
        &state,
        &block_with(vec![slashing]),
        VerifySignatures::True,
        &AcceptAll,
        &spec,
    )
    .unwrap();
    assert!(!result.validators[1].slashed);
    assert!(result.validators[2].slashed);
}

#[test]
fn partially_slashed_set_only_penalises_the_rest() {
    let spec = ChainSpec::mainnet();
    let state = TestingBeaconStateBuilder::new(VALIDATOR_COUNT, &spec)
        .modify_validator(1, |v| v.slashed = true)
        .build();
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote(&[1, 2])]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec)
            .unwrap();

    assert_eq!(result.validators[1], state.validators[1]);
    assert_eq!(result.balances[1], state.balances[1]);
    assert!(result.validators[2].slashed);
    assert!(result.balances[2] < state.balances[2]);
}

#[test]
fn identical_attestations_are_not_slashable() {
    let (state, spec) = get_state();
    let mut attester_slashing = TestingAttesterSlashingBuilder::double_vote(&[1]);
    attester_slashing.attestation_2 = attester_slashing.attestation_1.clone();
    let block = block_with(vec![attester_slashing]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::AttesterSlashingInvalid {
            index: 0,
            reason: AttesterSlashingInvalid::NotSlashable
        })
    );
}

#[test]
fn disjoint_signers_are_rejected() {
    let (state, spec) = get_state();
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote_at(
        &[1],
        &[2],
        Epoch::new(0),
    )]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::AttesterSlashingInvalid {
            index: 0,
            reason: AttesterSlashingInvalid::NoIntersectingIndices
        })
    );
}

#[test]
fn bad_signature_is_rejected() {
    let (state, spec) = get_state();
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote(&[1, 2])]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &RejectAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::AttesterSlashingInvalid {
            index: 0,
            reason: AttesterSlashingInvalid::IndexedAttestation1Invalid(
                BlockOperationError::Invalid(IndexedAttestationInvalid::BadSignature)
            )
        })
    );

    // Skipping signature verification lets the same block through.
    assert!(
        process_attester_slashings(&state, &block, VerifySignatures::False, &RejectAll, &spec)
            .is_ok()
    );
}

#[test]
fn verifier_receives_signer_pubkeys_and_attestation_domain() {
    let (state, spec) = get_state();
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote(&[3, 7])]);
    let verifier = ExpectSigners {
        pubkeys: vec![state.validators[3].pubkey, state.validators[7].pubkey],
        domain: spec.get_domain(Epoch::new(0), Domain::Attestation, &state.fork),
    };

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &verifier, &spec)
            .unwrap();

    assert!(result.validators[3].slashed);
    assert!(result.validators[7].slashed);
}

#[test]
fn unsorted_indices_are_rejected() {
    let (state, spec) = get_state();
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote(&[2, 1])]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::AttesterSlashingInvalid {
            index: 0,
            reason: AttesterSlashingInvalid::IndexedAttestation1Invalid(
                BlockOperationError::Invalid(
                    IndexedAttestationInvalid::BadValidatorIndicesOrdering(0)
                )
            )
        })
    );
}

#[test]
fn unknown_validator_is_rejected() {
    let (state, spec) = get_state();
    let unknown = VALIDATOR_COUNT as u64 + 1;
    let block = block_with(vec![TestingAttesterSlashingBuilder::double_vote(&[
        1, unknown,
    ])]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::AttesterSlashingInvalid {
            index: 0,
            reason: AttesterSlashingInvalid::IndexedAttestation1Invalid(
                BlockOperationError::Invalid(IndexedAttestationInvalid::UnknownValidator(
                    unknown
                ))
            )
        })
    );
}

#[test]
fn too_many_attester_slashings() {
    let (state, spec) = get_state();
    let block = block_with(vec![
        TestingAttesterSlashingBuilder::double_vote(&[1]),
        TestingAttesterSlashingBuilder::double_vote(&[2]),
    ]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::MaxAttesterSlashingsExceeded { found: 2, max: 1 })
    );
}

#[test]
fn one_invalid_slashing_aborts_the_block() {
    let mut spec = ChainSpec::mainnet();
    spec.max_attester_slashings = 2;
    let state = TestingBeaconStateBuilder::new(VALIDATOR_COUNT, &spec)
        .modify_validator(4, |v| v.slashed = true)
        .build();
    let block = block_with(vec![
        TestingAttesterSlashingBuilder::double_vote(&[1]),
        TestingAttesterSlashingBuilder::double_vote(&[4]),
    ]);

    let result =
        process_attester_slashings(&state, &block, VerifySignatures::True, &AcceptAll, &spec);

    assert_eq!(
        result,
        Err(BlockProcessingError::AttesterSlashingInvalid {
            index: 1,
            reason: AttesterSlashingInvalid::NoSlashableIndices
        })
    );
    assert!(!state.validators[1].slashed);
}

#[test]
fn empty_block_is_a_no_op() {
    let (state, spec) = get_state();

    let result = process_attester_slashings(
        &state,
        &block_with(vec![]),
        VerifySignatures::True,
        &AcceptAll,
        &spec,
    )
    .unwrap();

    assert_eq!(result, state);
}
