use crate::IndexedAttestation;
use serde::{Deserialize, Serialize};

/// Two conflicting attestations.
///
/// Spec v0.6.1
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct AttesterSlashing {
    pub attestation_1: IndexedAttestation,
    pub attestation_2: IndexedAttestation,
}

impl AttesterSlashing {
    /// Returns `true` if the two attestations form a double vote or a surround vote.
    pub fn is_slashable(&self) -> bool {
        self.attestation_1.is_double_vote(&self.attestation_2)
            || self.attestation_1.is_surround_vote(&self.attestation_2)
    }
}
