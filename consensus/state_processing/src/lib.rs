// Clippy lint set-up
#![cfg_attr(
    not(test),
    deny(
        clippy::arithmetic_side_effects,
        clippy::disallowed_methods,
        clippy::indexing_slicing,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::let_underscore_must_use
    )
)]

#[macro_use]
mod macros;

pub mod common;
pub mod genesis;
pub mod per_block_processing;

pub use genesis::initialize_beacon_state_from_deposits;
pub use per_block_processing::{
    errors::BlockProcessingError, process_attester_slashings, SignatureVerifier, VerifySignatures,
};
