//! Property tests for interaction store invariants.
//!
//! These tests drive the store with arbitrary operation sequences and check
//! it against a simple model.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;

use proptest::prelude::*;

use proxima_core::{ItemId, UserSlot};
use proxima_interaction::{InteractionStore, Registration, WriteOutcome};

#[derive(Debug, Clone)]
enum Op {
    Register(u8),
    Update(u8, usize, f64),
    Get(u8, usize),
}

fn arb_op(num_items: usize) -> impl Strategy<Value = Op> {
    // Item ids run one past the end so out-of-range calls are exercised.
    prop_oneof![
        (0u8..12).prop_map(Op::Register),
        (0u8..12, 0..=num_items, -10.0f64..10.0).prop_map(|(u, i, v)| Op::Update(u, i, v)),
        (0u8..12, 0..=num_items).prop_map(|(u, i)| Op::Get(u, i)),
    ]
}

fn arb_scenario() -> impl Strategy<Value = (usize, usize, Vec<Op>)> {
    (1usize..8, 1usize..6).prop_flat_map(|(capacity, num_items)| {
        (Just(capacity), Just(num_items), prop::collection::vec(arb_op(num_items), 0..80))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The store behaves like a map of users to sequential slots plus a map of
    /// written cells.
    #[test]
    fn prop_store_matches_model((capacity, num_items, ops) in arb_scenario()) {
        let mut store: InteractionStore<u8> = InteractionStore::new(capacity, num_items).unwrap();
        let mut slots: HashMap<u8, usize> = HashMap::new();
        let mut cells: HashMap<(u8, usize), f64> = HashMap::new();

        for op in ops {
            match op {
                Op::Register(user) => {
                    let got = store.register_user(user);
                    let expected = match slots.get(&user) {
                        Some(&slot) => Registration::AlreadyRegistered(UserSlot::new(slot)),
                        None if slots.len() < capacity => {
                            let slot = slots.len();
                            slots.insert(user, slot);
                            Registration::Assigned(UserSlot::new(slot))
                        }
                        None => Registration::CapacityExceeded,
                    };
                    prop_assert_eq!(got, expected);
                }
                Op::Update(user, item, value) => {
                    let got = store.update_interaction(&user, ItemId::new(item), value);
                    if item >= num_items {
                        prop_assert!(got.unwrap_err().is_invalid_input());
                    } else if slots.contains_key(&user) {
                        prop_assert_eq!(got.unwrap(), WriteOutcome::Written);
                        cells.insert((user, item), value);
                    } else {
                        prop_assert_eq!(got.unwrap(), WriteOutcome::UnknownUser);
                    }
                }
                Op::Get(user, item) => {
                    let got = store.get_interaction(&user, ItemId::new(item));
                    if item >= num_items {
                        prop_assert!(got.is_err());
                    } else {
                        let expected = cells.get(&(user, item)).copied().unwrap_or(0.0);
                        prop_assert_eq!(got.unwrap(), expected);
                    }
                }
            }

            prop_assert!(store.user_count() <= capacity);
        }

        for (user, slot) in &slots {
            prop_assert_eq!(store.slot_of(user), Some(UserSlot::new(*slot)));
        }
    }

    /// Once assigned, a slot never changes no matter what follows.
    #[test]
    fn prop_slots_are_stable(users in prop::collection::vec(0u8..20, 1..60)) {
        let mut store: InteractionStore<u8> = InteractionStore::new(10, 1).unwrap();
        let mut first_seen: HashMap<u8, UserSlot> = HashMap::new();

        for user in users {
            if let Some(slot) = store.register_user(user).slot() {
                let recorded = *first_seen.entry(user).or_insert(slot);
                prop_assert_eq!(recorded, slot);
            }
        }
    }
}
