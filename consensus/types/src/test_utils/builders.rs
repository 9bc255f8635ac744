mod testing_attester_slashing_builder;
mod testing_beacon_state_builder;
mod testing_deposit_builder;

pub use testing_attester_slashing_builder::TestingAttesterSlashingBuilder;
pub use testing_beacon_state_builder::TestingBeaconStateBuilder;
pub use testing_deposit_builder::TestingDepositBuilder;
