//! Property tests for cart invariants

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic
#![allow(clippy::float_cmp)] // Prices are multiples of 0.25 so sums are exact

mod common;

use common::ScriptedPurchases;
use proptest::prelude::*;
use std::sync::Arc;
use storefront::cart::{
    CartAction, CartEnvironment, CartItem, CartPersistence, CartReducer, CartState,
};
use storefront::{CredentialStore, MemoryStorage};
use storefront_core::reducer::Reducer;
use storefront_testing::test_clock;

#[derive(Clone, Debug)]
enum Op {
    Add(u8, u32),
    Remove(u8),
    Clear,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..8, 0u32..400).prop_map(|(id, quarters)| Op::Add(id, quarters)),
        3 => (0u8..10).prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

fn item(id: u8, quarters: u32) -> CartItem {
    CartItem::new(format!("C{id}"), format!("Course {id}"), f64::from(quarters) / 4.0)
}

fn environment(storage: Arc<MemoryStorage>) -> CartEnvironment {
    CartEnvironment {
        persistence: CartPersistence::new(storage.clone()),
        purchases: Arc::new(ScriptedPurchases::succeeding()),
        credentials: CredentialStore::new(storage),
        clock: Arc::new(test_clock()),
    }
}

fn apply(state: &mut CartState, env: &CartEnvironment, op: &Op) {
    let action = match op {
        Op::Add(id, quarters) => CartAction::AddItem {
            item: item(*id, *quarters),
        },
        Op::Remove(id) => CartAction::RemoveItem {
            course_id: format!("C{id}").into(),
        },
        Op::Clear => CartAction::ClearCart,
    };
    let _ = CartReducer::new().reduce(state, action, env);
}

proptest! {
    #[test]
    fn derived_fields_match_items(ops in prop::collection::vec(op(), 0..40)) {
        let env = environment(Arc::new(MemoryStorage::new()));
        let mut state = CartState::default();

        for op in &ops {
            apply(&mut state, &env, op);

            let total: f64 = state.items.iter().map(|i| i.price).sum();
            prop_assert_eq!(state.total, total);
            prop_assert_eq!(state.item_count, state.items.len());

            let mut ids: Vec<_> = state.items.iter().map(|i| i.course_id.clone()).collect();
            ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            ids.dedup();
            prop_assert_eq!(ids.len(), state.items.len(), "course ids must be unique");
        }
    }

    #[test]
    fn adding_present_course_is_idempotent(
        ops in prop::collection::vec(op(), 0..20),
        id in 0u8..8,
        quarters in 0u32..400,
    ) {
        let env = environment(Arc::new(MemoryStorage::new()));
        let mut state = CartState::default();
        for op in &ops {
            apply(&mut state, &env, op);
        }

        apply(&mut state, &env, &Op::Add(id, quarters));
        let once = state.clone();
        apply(&mut state, &env, &Op::Add(id, quarters));

        prop_assert_eq!(state, once);
    }

    #[test]
    fn removing_absent_course_changes_nothing(ops in prop::collection::vec(op(), 0..20)) {
        let env = environment(Arc::new(MemoryStorage::new()));
        let mut state = CartState::default();
        for op in &ops {
            apply(&mut state, &env, op);
        }

        let before = state.clone();
        let effects = CartReducer::new().reduce(
            &mut state,
            CartAction::RemoveItem { course_id: "absent".into() },
            &env,
        );

        prop_assert!(effects.is_empty());
        prop_assert_eq!(state, before);
    }

    #[test]
    fn saved_items_load_back(ops in prop::collection::vec(op(), 0..30)) {
        let storage = Arc::new(MemoryStorage::new());
        let env = environment(Arc::clone(&storage));
        let mut state = CartState::default();
        for op in &ops {
            apply(&mut state, &env, op);
        }

        env.persistence.save(state.revision, &state.items);

        let reloaded = CartPersistence::new(storage).load().unwrap_or_default();
        prop_assert_eq!(reloaded, state.items);
    }
}
