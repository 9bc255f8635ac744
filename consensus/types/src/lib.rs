//! Ethereum 2.0 types

#[macro_use]
mod slot_epoch_macros;
pub mod test_utils;

pub mod attestation_data;
pub mod attestation_duty;
pub mod attester_slashing;
pub mod beacon_block;
pub mod beacon_block_body;
pub mod beacon_state;
pub mod chain_spec;
pub mod checkpoint;
pub mod crosslink;
pub mod crosslink_committee;
pub mod deposit;
pub mod deposit_data;
pub mod eth1_data;
pub mod fork;
pub mod indexed_attestation;
pub mod pubkey_bytes;
pub mod relative_epoch;
pub mod signature_bytes;
pub mod slot_epoch;
pub mod validator;

pub use crate::attestation_data::AttestationData;
pub use crate::attestation_duty::AttestationDuty;
pub use crate::attester_slashing::AttesterSlashing;
pub use crate::beacon_block::BeaconBlock;
pub use crate::beacon_block_body::BeaconBlockBody;
pub use crate::beacon_state::{
    get_active_validator_indices, BeaconState, CommitteeCache, Error as BeaconStateError,
};
pub use crate::chain_spec::{ChainSpec, Domain};
pub use crate::checkpoint::Checkpoint;
pub use crate::crosslink::Crosslink;
pub use crate::crosslink_committee::CrosslinkCommittee;
pub use crate::deposit::Deposit;
pub use crate::deposit_data::DepositData;
pub use crate::eth1_data::Eth1Data;
pub use crate::fork::Fork;
pub use crate::indexed_attestation::IndexedAttestation;
pub use crate::pubkey_bytes::{PublicKeyBytes, PUBLIC_KEY_BYTES_LEN};
pub use crate::relative_epoch::{Error as RelativeEpochError, RelativeEpoch};
pub use crate::signature_bytes::{SignatureBytes, SIGNATURE_BYTES_LEN};
pub use crate::slot_epoch::{Epoch, Slot};
pub use crate::validator::Validator;

pub type Hash256 = ethereum_types::H256;
pub type Shard = u64;
pub type CommitteeIndex = u64;

pub use safe_arith::{ArithError, SafeArith};
