use crate::*;
use safe_arith::{ArithError, SafeArith};
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Each of the BLS signature domains.
///
/// Spec v0.6.1
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Domain {
    BeaconProposer,
    Randao,
    Attestation,
    Deposit,
    VoluntaryExit,
}

/// Holds all the "constants" for a BeaconChain.
///
/// Any field missing from a YAML config takes its mainnet value.
///
/// Spec v0.6.1
#[derive(PartialEq, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainSpec {
    /*
     * Misc
     */
    pub shard_count: u64,
    pub target_committee_size: u64,
    pub max_indices_per_attestation: u64,
    pub min_per_epoch_churn_limit: u64,
    pub churn_limit_quotient: u64,
    pub shuffle_round_count: u8,

    /*
     *  Gwei values
     */
    pub min_deposit_amount: u64,
    pub max_effective_balance: u64,
    pub ejection_balance: u64,
    pub effective_balance_increment: u64,

    /*
     * Initial Values
     */
    pub genesis_slot: Slot,
    pub genesis_epoch: Epoch,
    pub far_future_epoch: Epoch,
    pub genesis_fork_version: [u8; 4],

    /*
     * Time parameters
     */
    pub seconds_per_slot: u64,
    pub slots_per_epoch: u64,
    pub min_seed_lookahead: Epoch,
    pub activation_exit_delay: u64,
    pub slots_per_eth1_voting_period: u64,
    pub slots_per_historical_root: usize,
    pub min_validator_withdrawability_delay: Epoch,

    /*
     * State list lengths
     */
    pub latest_randao_mixes_length: usize,
    pub latest_slashed_exit_length: usize,

    /*
     * Reward and penalty quotients
     */
    pub min_slashing_penalty_quotient: u64,

    /*
     * Max operations per block
     */
    pub max_attester_slashings: u64,

    /*
     * Eth1
     */
    pub eth1_follow_distance: u64,
    pub seconds_per_eth1_block: u64,

    /*
     * Signature domains
     *
     * Fields should be private to prevent accessing a domain that hasn't been modified to suit
     * some `Fork`.
     *
     * Use `ChainSpec::get_domain(..)` to access these values.
     */
    pub(crate) domain_beacon_proposer: u32,
    pub(crate) domain_randao: u32,
    pub(crate) domain_attestation: u32,
    pub(crate) domain_deposit: u32,
    pub(crate) domain_voluntary_exit: u32,
}

impl ChainSpec {
    /// Return the number of committees in one epoch.
    ///
    /// Spec v0.6.1
    pub fn get_epoch_committee_count(&self, active_validator_count: usize) -> u64 {
        std::cmp::max(
            1,
            std::cmp::min(
                self.shard_count / self.slots_per_epoch,
                active_validator_count as u64 / self.slots_per_epoch / self.target_committee_size,
            ),
        ) * self.slots_per_epoch
    }

    /// Return the number of shards to increment `state.latest_start_shard` by in a given epoch.
    ///
    /// Spec v0.6.1
    pub fn get_shard_delta(&self, active_validator_count: usize) -> u64 {
        std::cmp::min(
            self.get_epoch_committee_count(active_validator_count),
            self.shard_count - self.shard_count / self.slots_per_epoch,
        )
    }

    /// Return the epoch at which an activation or exit triggered in `epoch` takes effect.
    ///
    /// Saturates at `far_future_epoch` rather than failing, so the function is total.
    ///
    /// Spec v0.6.1
    pub fn delayed_activation_exit_epoch(&self, epoch: Epoch) -> Epoch {
        epoch + 1 + self.activation_exit_delay
    }

    /// Return the number of validators permitted to begin exiting in one epoch, given the number
    /// of active validators.
    pub fn churn_limit(&self, active_validator_count: usize) -> Result<u64, ArithError> {
        Ok(std::cmp::max(
            self.min_per_epoch_churn_limit,
            (active_validator_count as u64).safe_div(self.churn_limit_quotient)?,
        ))
    }

    /// Get the domain number that represents the fork meta and signature domain.
    ///
    /// Spec v0.6.1
    pub fn get_domain(&self, epoch: Epoch, domain: Domain, fork: &Fork) -> u64 {
        let domain_constant = match domain {
            Domain::BeaconProposer => self.domain_beacon_proposer,
            Domain::Randao => self.domain_randao,
            Domain::Attestation => self.domain_attestation,
            Domain::Deposit => self.domain_deposit,
            Domain::VoluntaryExit => self.domain_voluntary_exit,
        };

        let mut fork_and_domain = [0; 8];
        fork_and_domain[..4].copy_from_slice(&fork.get_fork_version(epoch));
        fork_and_domain[4..].copy_from_slice(&domain_constant.to_le_bytes());

        u64::from_le_bytes(fork_and_domain)
    }

    /// Returns a `ChainSpec` compatible with the Ethereum Foundation specification.
    ///
    /// Spec v0.6.1
    pub fn mainnet() -> Self {
        Self {
            /*
             * Misc
             */
            shard_count: 1_024,
            target_committee_size: 128,
            max_indices_per_attestation: 4096,
            min_per_epoch_churn_limit: 4,
            churn_limit_quotient: 65_536,
            shuffle_round_count: 90,

            /*
             *  Gwei values
             */
            min_deposit_amount: u64::pow(2, 0) * u64::pow(10, 9),
            max_effective_balance: u64::pow(2, 5) * u64::pow(10, 9),
            ejection_balance: u64::pow(2, 4) * u64::pow(10, 9),
            effective_balance_increment: u64::pow(2, 0) * u64::pow(10, 9),

            /*
             * Initial Values
             */
            genesis_slot: Slot::new(0),
            genesis_epoch: Epoch::new(0),
            far_future_epoch: Epoch::max_value(),
            genesis_fork_version: [0; 4],

            /*
             * Time parameters
             */
            seconds_per_slot: 6,
            slots_per_epoch: 64,
            min_seed_lookahead: Epoch::new(1),
            activation_exit_delay: 4,
            slots_per_eth1_voting_period: 1_024,
            slots_per_historical_root: 8_192,
            min_validator_withdrawability_delay: Epoch::new(256),

            /*
             * State list lengths
             */
            latest_randao_mixes_length: 8_192,
            latest_slashed_exit_length: 8_192,

            /*
             * Reward and penalty quotients
             */
            min_slashing_penalty_quotient: 32,

            /*
             * Max operations per block
             */
            max_attester_slashings: 1,

            /*
             * Eth1
             */
            eth1_follow_distance: 1_024,
            seconds_per_eth1_block: 14,

            /*
             * Signature domains
             */
            domain_beacon_proposer: 0,
            domain_randao: 1,
            domain_attestation: 2,
            domain_deposit: 3,
            domain_voluntary_exit: 4,
        }
    }

    /// Ethereum Foundation minimal spec, as defined in the eth2.0-specs repo.
    ///
    /// Spec v0.6.1
    pub fn minimal() -> Self {
        Self {
            shard_count: 8,
            target_committee_size: 4,
            shuffle_round_count: 10,
            slots_per_epoch: 8,
            slots_per_eth1_voting_period: 16,
            slots_per_historical_root: 64,
            latest_randao_mixes_length: 64,
            latest_slashed_exit_length: 64,
            eth1_follow_distance: 16,
            ..ChainSpec::mainnet()
        }
    }

    /// Parses a YAML config. Missing fields take their mainnet values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| format!("Unable to parse chain spec: {:?}", e))
    }

    /// Reads and parses the YAML config at `path`.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let file = File::open(path.as_ref())
            .map_err(|e| format!("Unable to open {:?}: {:?}", path.as_ref(), e))?;
        serde_yaml::from_reader(file).map_err(|e| format!("Unable to parse chain spec: {:?}", e))
    }
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::mainnet()
    }
}
