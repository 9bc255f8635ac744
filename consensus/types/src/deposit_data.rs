use crate::{Hash256, PublicKeyBytes, SignatureBytes};
use serde::{Deserialize, Serialize};

/// The data supplied by the user to the deposit contract.
///
/// Spec v0.6.1
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct DepositData {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: Hash256,
    pub amount: u64,
    pub signature: SignatureBytes,
}
