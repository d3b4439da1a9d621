//! Probability and pool invariants over arbitrary dice

use fairdice::{tie_fraction, win_probability, DicePool, Die, DieId, ProbabilityTable};
use proptest::prelude::*;
use std::collections::HashSet;

/// Pair of dice with the same face count
fn arb_pair() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(-20i64..20, n),
            prop::collection::vec(-20i64..20, n),
        )
    })
}

proptest! {
    #[test]
    fn prop_win_lose_tie_sum_to_one((a, b) in arb_pair()) {
        let a = Die::new(a).unwrap();
        let b = Die::new(b).unwrap();

        let ab = win_probability(&a, &b);
        let ba = win_probability(&b, &a);
        let tie = tie_fraction(&a, &b);

        prop_assert_eq!(ab.total, ba.total);
        prop_assert_eq!(ab.wins + ba.wins + tie.wins, ab.total);
    }

    #[test]
    fn prop_probability_ignores_face_order((a, b) in arb_pair(), rotate in 0usize..12) {
        let original = win_probability(&Die::new(a.clone()).unwrap(), &Die::new(b.clone()).unwrap());

        let mut shuffled = a;
        let len = shuffled.len();
        shuffled.rotate_left(rotate % len);
        shuffled.reverse();
        let permuted = win_probability(&Die::new(shuffled).unwrap(), &Die::new(b).unwrap());

        prop_assert_eq!(original, permuted);
    }

    #[test]
    fn prop_table_diagonal_is_self_comparison(faces in prop::collection::vec(prop::collection::vec(0i64..10, 4), 3..6)) {
        let dice: Vec<Die> = faces.into_iter().map(|f| Die::new(f).unwrap()).collect();
        let table = ProbabilityTable::build(&dice);

        prop_assert_eq!(table.size(), dice.len());
        for i in 0..table.size() {
            prop_assert!(table.is_self_comparison(i, i));
            for j in 0..table.size() {
                prop_assert_eq!(table.get(i, j), Some(win_probability(&dice[i], &dice[j])));
            }
        }
    }

    #[test]
    fn prop_pool_take_removes_exactly_one_id(count in 3usize..8, picks in prop::collection::vec(0usize..8, 0..8)) {
        let die = Die::new(vec![1, 2, 3]).unwrap();
        let mut pool = DicePool::new(vec![die; count]);
        let mut taken = HashSet::new();

        for pick in picks {
            let before = pool.remaining_count();
            match pool.take(pick) {
                Ok(id) => {
                    prop_assert!(taken.insert(id));
                    prop_assert!(!pool.contains(id));
                    prop_assert_eq!(pool.remaining_count(), before - 1);
                }
                Err(_) => {
                    prop_assert!(pick >= before);
                    prop_assert_eq!(pool.remaining_count(), before);
                }
            }
        }

        prop_assert_eq!(taken.len() + pool.remaining_count(), count);
        pool.reset();
        let all_ids: Vec<DieId> = (0..count).map(DieId).collect();
        prop_assert_eq!(pool.remaining(), all_ids.as_slice());
    }
}
