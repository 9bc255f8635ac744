//! Deterministic builders for tests and benchmarks.
//!
//! Nothing in here should be used for production purposes.

mod builders;
mod generate_deterministic_pubkeys;

pub use builders::*;
pub use generate_deterministic_pubkeys::{deterministic_pubkey, generate_deterministic_pubkeys};
