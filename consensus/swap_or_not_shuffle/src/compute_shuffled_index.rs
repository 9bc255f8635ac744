use crate::{swap_bit, ShuffleBuffer, MAX_LIST_SIZE};

/// Returns the position that `index` moves to when a list of `list_size` is shuffled with `seed`
/// over `shuffle_round_count` rounds.
///
/// Returns `None` when:
///
/// - `list_size == 0`
/// - `index >= list_size`
/// - `list_size > 2**24`
/// - `seed` is not 32 bytes long
pub fn compute_shuffled_index(
    index: usize,
    list_size: usize,
    seed: &[u8],
    shuffle_round_count: u8,
) -> Option<usize> {
    if list_size == 0 || index >= list_size || list_size > MAX_LIST_SIZE {
        return None;
    }

    let mut buf = ShuffleBuffer::new(seed)?;
    let mut index = index;

    for round in 0..shuffle_round_count {
        buf.set_round(round);
        let pivot = buf.pivot(list_size);
        let flip = (pivot + (list_size - index)) % list_size;
        let position = index.max(flip);

        if swap_bit(&buf.source(position), position) {
            index = flip;
        }
    }

    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_input() {
        let seed = [42; 32];
        assert_eq!(compute_shuffled_index(0, 0, &seed, 90), None);
        assert_eq!(compute_shuffled_index(10, 10, &seed, 90), None);
        assert_eq!(compute_shuffled_index(0, MAX_LIST_SIZE + 1, &seed, 90), None);
    }

    #[test]
    fn zero_rounds_is_identity() {
        let seed = [42; 32];
        for i in 0..16 {
            assert_eq!(compute_shuffled_index(i, 16, &seed, 0), Some(i));
        }
    }

    #[test]
    fn output_is_a_permutation() {
        let seed = [3; 32];
        let mut seen: Vec<usize> = (0..100)
            .map(|i| compute_shuffled_index(i, 100, &seed, 10).unwrap())
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..100).collect::<Vec<_>>());
    }
}
