//! The validator-facing query surface of the beacon node.
//!
//! Serves validator index lookups, committee assignments and status queries against the head
//! state held in a `store::BeaconStore`, and streams activation updates to validators waiting to
//! join the active set.
#[macro_use]
extern crate lazy_static;

mod activation;
mod committee;
pub mod config;
mod errors;
mod eth1;
pub mod events;
mod metrics;
mod server;
mod status;
mod validator_index_cache;

pub use activation::{ActivationResponse, ActivationStatus};
pub use committee::{CommitteeAssignment, CommitteeDuties};
pub use config::Config;
pub use errors::Error;
pub use eth1::{Eth1BlockCache, Eth1BlockTimes};
pub use events::{ChainEventHandler, EventKind};
pub use server::ValidatorServer;
pub use status::{ValidatorStatus, ValidatorStatusEntry, ValidatorStatusResponse};
pub use validator_index_cache::ValidatorIndexCache;
