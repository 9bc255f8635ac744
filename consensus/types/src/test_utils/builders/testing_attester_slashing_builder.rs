use crate::*;

/// Builds an `AttesterSlashing`.
///
/// Signatures are left empty; pair with a signature verifier that accepts them.
///
/// This struct should **never be used for production purposes.**
pub struct TestingAttesterSlashingBuilder();

impl TestingAttesterSlashingBuilder {
    /// Builds an `AttesterSlashing` that is a double vote: both attestations target epoch `0` but
    /// vote for different block roots.
    pub fn double_vote(validator_indices: &[u64]) -> AttesterSlashing {
        Self::double_vote_at(validator_indices, validator_indices, Epoch::new(0))
    }

    /// Builds a double vote with distinct signer lists for each attestation.
    pub fn double_vote_at(
        indices_1: &[u64],
        indices_2: &[u64],
        target_epoch: Epoch,
    ) -> AttesterSlashing {
        let hash_1 = Hash256::from_low_u64_le(1);
        let hash_2 = Hash256::from_low_u64_le(2);

        let data_1 = AttestationData {
            slot: Slot::new(0),
            beacon_block_root: hash_1,
            source: Checkpoint {
                epoch: Epoch::new(0),
                root: hash_1,
            },
            target: Checkpoint {
                epoch: target_epoch,
                root: hash_1,
            },
            crosslink: Crosslink::default(),
        };

        let data_2 = AttestationData {
            beacon_block_root: hash_2,
            ..data_1.clone()
        };

        AttesterSlashing {
            attestation_1: Self::indexed(indices_1, data_1),
            attestation_2: Self::indexed(indices_2, data_2),
        }
    }

    /// Builds an `AttesterSlashing` where the first attestation's `(source, target)` interval
    /// strictly surrounds the second's.
    pub fn surround_vote(validator_indices: &[u64]) -> AttesterSlashing {
        let checkpoint = |epoch: u64| Checkpoint {
            epoch: Epoch::new(epoch),
            root: Hash256::from_low_u64_le(epoch),
        };

        let outer = AttestationData {
            source: checkpoint(1),
            target: checkpoint(4),
            ..AttestationData::default()
        };
        let inner = AttestationData {
            source: checkpoint(2),
            target: checkpoint(3),
            ..AttestationData::default()
        };

        AttesterSlashing {
            attestation_1: Self::indexed(validator_indices, outer),
            attestation_2: Self::indexed(validator_indices, inner),
        }
    }

    fn indexed(validator_indices: &[u64], data: AttestationData) -> IndexedAttestation {
        IndexedAttestation {
            attesting_indices: validator_indices.to_vec(),
            data,
            signature: SignatureBytes::empty(),
        }
    }
}
