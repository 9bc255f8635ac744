use crate::*;

/// Returns a public key that is a pure function of `index`.
///
/// The bytes are not a valid BLS point; they only need to be distinct and stable.
pub fn deterministic_pubkey(index: usize) -> PublicKeyBytes {
    let first = ethereum_hashing::hash(&(index as u64).to_le_bytes());
    let second = ethereum_hashing::hash(&first);

    let mut bytes = [0; PUBLIC_KEY_BYTES_LEN];
    bytes[..32].copy_from_slice(&first);
    bytes[32..].copy_from_slice(&second[..PUBLIC_KEY_BYTES_LEN - 32]);

    PublicKeyBytes::from_array(bytes)
}

/// Generates `validator_count` public keys, where the `i`th key is `deterministic_pubkey(i)`.
pub fn generate_deterministic_pubkeys(validator_count: usize) -> Vec<PublicKeyBytes> {
    (0..validator_count).map(deterministic_pubkey).collect()
}
