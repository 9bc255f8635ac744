//! Swap-or-not shuffling, used to assign active validators to committees.
//!
//! `shuffle_list` shuffles a whole list in one pass. The single-index form of the shuffle is
//! kept alongside it as a test oracle; both produce identical permutations for identical
//! `(seed, rounds)` inputs.

#[cfg(test)]
mod compute_shuffled_index;
mod shuffle_list;

#[cfg(test)]
use compute_shuffled_index::compute_shuffled_index;
pub use shuffle_list::shuffle_list;

type Hash256 = ethereum_types::H256;

const SEED_SIZE: usize = 32;
const ROUND_SIZE: usize = 1;
const POSITION_WINDOW_SIZE: usize = 4;
const PIVOT_VIEW_SIZE: usize = SEED_SIZE + ROUND_SIZE;
const TOTAL_SIZE: usize = SEED_SIZE + ROUND_SIZE + POSITION_WINDOW_SIZE;

/// The largest list this crate will shuffle.
pub const MAX_LIST_SIZE: usize = 1 << 24;

/// Scratch buffer laid out as `seed ++ round ++ position_window`.
///
/// Hashing the first 33 bytes yields the round pivot; hashing all 37 bytes yields the source of
/// swap bits for a window of 256 positions.
struct ShuffleBuffer([u8; TOTAL_SIZE]);

impl ShuffleBuffer {
    fn new(seed: &[u8]) -> Option<Self> {
        if seed.len() != SEED_SIZE {
            return None;
        }
        let mut buf = [0; TOTAL_SIZE];
        buf[..SEED_SIZE].copy_from_slice(seed);
        Some(Self(buf))
    }

    fn set_round(&mut self, round: u8) {
        self.0[SEED_SIZE] = round;
    }

    /// Returns the pivot for the current round.
    fn pivot(&self, list_size: usize) -> usize {
        let digest = ethereum_hashing::hash_fixed(&self.0[..PIVOT_VIEW_SIZE]);
        let mut head = [0; 8];
        head.copy_from_slice(&digest[..8]);
        (u64::from_le_bytes(head) % list_size as u64) as usize
    }

    /// Returns the 32 bytes of swap bits covering `position` and its 255 neighbours.
    fn source(&mut self, position: usize) -> Hash256 {
        let window = ((position >> 8) as u32).to_le_bytes();
        self.0[PIVOT_VIEW_SIZE..].copy_from_slice(&window);
        Hash256::from(ethereum_hashing::hash_fixed(&self.0))
    }
}

/// Reads the swap bit for `position` out of a `source` hash.
fn swap_bit(source: &Hash256, position: usize) -> bool {
    let byte = source.as_bytes()[(position & 0xff) >> 3];
    (byte >> (position & 0x07)) & 1 == 1
}
