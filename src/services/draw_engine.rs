//! Pure assignment generator: a uniformly shuffled receiver list repaired
//! into a derangement (no participant ever draws themself).

use indexmap::IndexMap;
use rand::Rng;
use thiserror::Error;

/// Errors raised while generating an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    /// A derangement needs at least two participants.
    #[error("at least 2 participants are required to draw (got {found})")]
    InsufficientParticipants {
        /// Number of participant ids provided.
        found: usize,
    },
    /// The repair passes left a participant assigned to themself.
    ///
    /// Unreachable for distinct ids; kept as a hard post-condition so a bad
    /// draw can never be persisted silently.
    #[error("derangement repair left a self-assignment in place")]
    SelfAssignmentRemained,
}

/// Produce a giver → receiver mapping over `givers` that is a bijection with
/// no fixed point.
///
/// Ids are expected to be distinct (they are primary keys). The mapping
/// preserves the giver order of the input slice.
pub fn draw<R: Rng + ?Sized>(rng: &mut R, givers: &[i64]) -> Result<IndexMap<i64, i64>, DrawError> {
    let n = givers.len();
    match n {
        0 | 1 => Err(DrawError::InsufficientParticipants { found: n }),
        // The only derangement of two elements is the mutual swap.
        2 => Ok(IndexMap::from_iter([
            (givers[0], givers[1]),
            (givers[1], givers[0]),
        ])),
        // Exactly two derangements exist for three elements, both 3-cycles.
        3 => {
            let receivers = if rng.random_bool(0.5) {
                [givers[1], givers[2], givers[0]]
            } else {
                [givers[2], givers[0], givers[1]]
            };
            Ok(givers.iter().copied().zip(receivers).collect())
        }
        _ => {
            let mut receivers: Vec<i64> = givers.to_vec();
            shuffle(rng, &mut receivers);
            repair_fixed_points(givers, &mut receivers)?;
            Ok(givers.iter().copied().zip(receivers).collect())
        }
    }
}

/// Backward-pass Fisher–Yates shuffle.
fn shuffle<R: Rng + ?Sized>(rng: &mut R, items: &mut [i64]) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Eliminate every fixed point of the shuffled receiver list.
///
/// First the forward adjacent-swap pass over the shuffled order, then a
/// verification pass: remaining fixed points are swapped with each other in
/// pairs, and a lone survivor swaps with its successor. The successor swap is
/// always safe because a fixed slot is the unique holder of its own id, so no
/// other slot can hold it. A final scan enforces the post-condition.
fn repair_fixed_points(givers: &[i64], receivers: &mut [i64]) -> Result<(), DrawError> {
    let n = givers.len();

    for i in 0..n {
        if givers[i] == receivers[i] {
            receivers.swap(i, (i + 1) % n);
        }
    }

    let fixed: Vec<usize> = (0..n).filter(|&i| givers[i] == receivers[i]).collect();
    let mut pairs = fixed.chunks_exact(2);
    for pair in pairs.by_ref() {
        receivers.swap(pair[0], pair[1]);
    }
    if let &[lone] = pairs.remainder() {
        receivers.swap(lone, (lone + 1) % n);
    }

    if givers
        .iter()
        .zip(receivers.iter())
        .any(|(giver, receiver)| giver == receiver)
    {
        return Err(DrawError::SelfAssignmentRemained);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn assert_derangement(givers: &[i64], mapping: &IndexMap<i64, i64>) {
        assert_eq!(mapping.len(), givers.len(), "one receiver per giver");
        let giver_set: BTreeSet<i64> = givers.iter().copied().collect();
        let receiver_set: BTreeSet<i64> = mapping.values().copied().collect();
        assert_eq!(giver_set, receiver_set, "receivers are a permutation");
        for (giver, receiver) in mapping {
            assert_ne!(giver, receiver, "giver {giver} drew themself");
        }
    }

    #[test]
    fn rejects_small_groups() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            draw(&mut rng, &[]),
            Err(DrawError::InsufficientParticipants { found: 0 })
        );
        assert_eq!(
            draw(&mut rng, &[42]),
            Err(DrawError::InsufficientParticipants { found: 1 })
        );
    }

    #[test]
    fn two_participants_always_swap() {
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mapping = draw(&mut rng, &[7, 9]).unwrap();
            assert_eq!(mapping[&7], 9);
            assert_eq!(mapping[&9], 7);
        }
    }

    #[test]
    fn three_participants_always_form_a_cycle() {
        let givers = [1, 2, 3];
        let mut saw_left = false;
        let mut saw_right = false;
        for seed in 0..128 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mapping = draw(&mut rng, &givers).unwrap();
            assert_derangement(&givers, &mapping);
            // Follow the cycle: it must return to the start in exactly 3 hops.
            let second = mapping[&1];
            let third = mapping[&second];
            assert_ne!(second, third);
            assert_eq!(mapping[&third], 1);
            match second {
                2 => saw_left = true,
                3 => saw_right = true,
                other => panic!("unexpected receiver {other}"),
            }
        }
        assert!(saw_left && saw_right, "both 3-cycles should occur");
    }

    #[test]
    fn every_group_size_yields_a_derangement() {
        for n in 2..=12 {
            let givers: Vec<i64> = (0..n).map(|i| 100 + i).collect();
            for seed in 0..256 {
                let mut rng = StdRng::seed_from_u64(seed);
                let mapping = draw(&mut rng, &givers).unwrap();
                assert_derangement(&givers, &mapping);
            }
        }
    }

    #[test]
    fn mapping_preserves_giver_order() {
        let givers = [31, 11, 52, 40];
        let mut rng = StdRng::seed_from_u64(3);
        let mapping = draw(&mut rng, &givers).unwrap();
        let keys: Vec<i64> = mapping.keys().copied().collect();
        assert_eq!(keys, givers);
    }

    #[test]
    fn repair_handles_adjacent_fixed_points() {
        // Identity permutation: every slot is a fixed point, the worst case
        // for the adjacent-swap pass.
        let givers: Vec<i64> = (0..8).collect();
        let mut receivers = givers.clone();
        repair_fixed_points(&givers, &mut receivers).unwrap();
        for (giver, receiver) in givers.iter().zip(&receivers) {
            assert_ne!(giver, receiver);
        }
        let receiver_set: BTreeSet<i64> = receivers.iter().copied().collect();
        assert_eq!(receiver_set.len(), givers.len());
    }
}
