use crate::{AttesterSlashing, Eth1Data, SignatureBytes};
use serde::{Deserialize, Serialize};

/// The body of a `BeaconChain` block, containing operations.
///
/// Only the operations processed by this crate's consumers are carried.
///
/// Spec v0.6.1
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct BeaconBlockBody {
    pub randao_reveal: SignatureBytes,
    pub eth1_data: Eth1Data,
    pub graffiti: [u8; 32],
    pub attester_slashings: Vec<AttesterSlashing>,
}
