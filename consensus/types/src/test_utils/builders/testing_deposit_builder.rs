use crate::*;

/// Builds a `Deposit` for some public key.
///
/// This struct should **never be used for production purposes.**
pub struct TestingDepositBuilder {
    deposit: Deposit,
}

impl TestingDepositBuilder {
    /// Instantiates a new builder depositing `amount` for `pubkey`.
    pub fn new(pubkey: PublicKeyBytes, amount: u64) -> Self {
        let deposit = Deposit {
            proof: vec![],
            data: DepositData {
                pubkey,
                withdrawal_credentials: Hash256::zero(),
                amount,
                signature: SignatureBytes::empty(),
            },
        };

        Self { deposit }
    }

    /// Sets the withdrawal credentials.
    pub fn withdrawal_credentials(mut self, credentials: Hash256) -> Self {
        self.deposit.data.withdrawal_credentials = credentials;
        self
    }

    /// Builds the deposit, consuming the builder.
    pub fn build(self) -> Deposit {
        self.deposit
    }
}
