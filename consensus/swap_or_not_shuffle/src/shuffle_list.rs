use crate::{swap_bit, ShuffleBuffer, MAX_LIST_SIZE};

/// Shuffles an entire list in-place.
///
/// Equivalent to running `compute_shuffled_index` over every position, but walks each round's
/// two mirrored halves once instead of hashing per index.
///
/// Shuffles if `forwards == true`, otherwise un-shuffles, so that
/// `shuffle_list(shuffle_list(l, r, s, true), r, s, false) == l`.
///
/// Returns `None` when:
///
/// - `input` is empty
/// - `input.len() > 2**24`
/// - `rounds == 0`
/// - `seed` is not 32 bytes long
pub fn shuffle_list(
    mut input: Vec<usize>,
    rounds: u8,
    seed: &[u8],
    forwards: bool,
) -> Option<Vec<usize>> {
    let list_size = input.len();

    if input.is_empty() || list_size > MAX_LIST_SIZE || rounds == 0 {
        return None;
    }

    let mut buf = ShuffleBuffer::new(seed)?;

    let order: Box<dyn Iterator<Item = u8>> = if forwards {
        Box::new(0..rounds)
    } else {
        Box::new((0..rounds).rev())
    };

    for round in order {
        buf.set_round(round);
        let pivot = buf.pivot(list_size);

        // Positions `0..=pivot` mirror around `pivot / 2`.
        swap_mirrored(&mut input, &mut buf, 0, pivot);

        // Positions `pivot + 1..list_size` mirror around the remaining midpoint.
        swap_mirrored(&mut input, &mut buf, pivot + 1, list_size - 1);
    }

    Some(input)
}

/// Walks `lo..=hi` from both ends towards the middle, swapping each mirrored pair when the swap
/// bit of the upper position is set.
fn swap_mirrored(input: &mut [usize], buf: &mut ShuffleBuffer, lo: usize, hi: usize) {
    if lo >= hi {
        return;
    }

    let mut source = buf.source(hi);

    for (i, j) in (lo..).zip((lo..=hi).rev()) {
        if i >= j {
            break;
        }

        if j & 0xff == 0xff {
            source = buf.source(j);
        }

        if swap_bit(&source, j) {
            input.swap(i, j);
        }
    }
}
