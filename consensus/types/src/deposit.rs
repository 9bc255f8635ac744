use crate::{DepositData, Hash256};
use serde::{Deserialize, Serialize};

/// A deposit to potentially become a beacon chain validator.
///
/// Spec v0.6.1
#[derive(Debug, PartialEq, Eq, Clone, Default, Serialize, Deserialize)]
pub struct Deposit {
    pub proof: Vec<Hash256>,
    pub data: DepositData,
}
