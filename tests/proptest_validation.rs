//! Property-based tests.
//!
//! 1. Date-of-birth validation agrees with a calendar oracle (chrono).
//! 2. The navigation stack keeps its root under any push/pop sequence.
//!
//! Run with: cargo test --test proptest_validation

use proptest::prelude::*;
use std::sync::Arc;
use zynkod::flows::onboarding::{days_in_month, is_leap_year, is_valid_dob};
use zynkod::ipc::event::EventBroadcaster;
use zynkod::nav::{NavStack, Screen};

// ─── 1. Date-of-birth validation ─────────────────────────────────────────────

proptest! {
    /// `is_valid_dob` accepts exactly the (day, month, year) triples that
    /// form a real calendar date.
    #[test]
    fn dob_validation_agrees_with_chrono(
        day in 0u32..40,
        month in 0u32..15,
        year in 1900u32..2030,
    ) {
        let oracle = chrono::NaiveDate::from_ymd_opt(year as i32, month, day).is_some();
        prop_assert_eq!(
            is_valid_dob(day, month, year),
            oracle,
            "disagreement for {}/{}/{}", day, month, year
        );
    }

    /// Month lengths are always 28..=31 and February tracks leap years.
    #[test]
    fn month_lengths_are_sane(month in 1u32..=12, year in 1900u32..2030) {
        let days = days_in_month(month, year);
        prop_assert!((28..=31).contains(&days));
        if month == 2 {
            prop_assert_eq!(days, if is_leap_year(year) { 29 } else { 28 });
        }
    }
}

// ─── 2. Navigation stack invariants ──────────────────────────────────────────

fn arb_screen() -> impl Strategy<Value = Screen> {
    prop_oneof![
        Just(Screen::Intro),
        Just(Screen::SignIn),
        Just(Screen::SignUp),
        Just(Screen::Onboarding),
        Just(Screen::Dashboard),
    ]
}

#[derive(Debug, Clone)]
enum NavOp {
    Push(Screen),
    Pop,
    Reset(Screen),
}

fn arb_op() -> impl Strategy<Value = NavOp> {
    prop_oneof![
        arb_screen().prop_map(NavOp::Push),
        Just(NavOp::Pop),
        arb_screen().prop_map(NavOp::Reset),
    ]
}

proptest! {
    /// The stack is never empty, `current` is always its top, and
    /// consecutive entries are never the same screen.
    #[test]
    fn nav_stack_stays_well_formed(ops in proptest::collection::vec(arb_op(), 0..50)) {
        let nav = NavStack::new(Arc::new(EventBroadcaster::new()));
        for op in ops {
            match op {
                NavOp::Push(s) => nav.push(s),
                NavOp::Pop => { nav.pop(); }
                NavOp::Reset(s) => nav.reset(s),
            }
            let stack = nav.snapshot();
            prop_assert!(!stack.is_empty());
            prop_assert_eq!(nav.current(), *stack.last().unwrap());
            for pair in stack.windows(2) {
                prop_assert_ne!(pair[0], pair[1]);
            }
        }
    }
}
