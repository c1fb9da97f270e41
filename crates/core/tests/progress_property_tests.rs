//! Property-based tests for the progress engine and the log transition.
//!
//! These tests verify that universal properties hold across all valid inputs,
//! using the `proptest` crate for random test case generation.

use chrono::Utc;
use goalpost_core::goals::{
    apply_transition, compute_progress, Goal, GoalCategory, GoalTransition, GoalType,
};
use goalpost_core::log_entries::LogEntry;
use proptest::prelude::*;
use rust_decimal::Decimal;

const OWNER: &str = "owner";

// =============================================================================
// Generators
// =============================================================================

/// Generates a two-decimal value in the stored range used by real goals.
fn arb_value() -> impl Strategy<Value = Decimal> {
    (-1_000_000_00i64..1_000_000_00i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_positive_value() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_00i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_goal_type() -> impl Strategy<Value = GoalType> {
    prop_oneof![
        Just(GoalType::Counter),
        Just(GoalType::YesNo),
        Just(GoalType::Percentage),
        Just(GoalType::Money),
        Just(GoalType::Number),
    ]
}

fn goal(goal_type: GoalType, initial: Option<Decimal>, target: Option<Decimal>, current: Decimal) -> Goal {
    let now = Utc::now();
    Goal {
        id: "goal".to_string(),
        user_id: OWNER.to_string(),
        category: GoalCategory::Growth,
        goal_type,
        title: "Goal".to_string(),
        description: None,
        target_value: target,
        initial_value: initial,
        current_value: current,
        unit: None,
        increment: None,
        currency: None,
        is_completed: false,
        completed_at: None,
        is_archived: false,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Counter and Money goals without a positive target never make progress.
    #[test]
    fn prop_non_positive_target_means_zero(
        current in arb_value(),
        target in (-1_000_00i64..=0).prop_map(|c| Decimal::new(c, 2)),
        money in any::<bool>(),
    ) {
        let goal_type = if money { GoalType::Money } else { GoalType::Counter };
        prop_assert_eq!(compute_progress(&goal(goal_type, None, Some(target), current)), Decimal::ZERO);
        prop_assert_eq!(compute_progress(&goal(goal_type, None, None, current)), Decimal::ZERO);
    }

    /// Progress is monotonic in the accumulated value and capped at 100.
    #[test]
    fn prop_counter_progress_is_monotonic_and_capped(
        target in arb_positive_value(),
        a in arb_value(),
        b in arb_value(),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let p_low = compute_progress(&goal(GoalType::Counter, None, Some(target), low));
        let p_high = compute_progress(&goal(GoalType::Counter, None, Some(target), high));
        prop_assert!(p_low <= p_high);
        prop_assert!(p_high <= Decimal::ONE_HUNDRED);
        prop_assert!(p_low >= Decimal::ZERO);
    }

    /// Number goals always land within [0, 100], whichever way the span runs.
    #[test]
    fn prop_number_progress_is_bounded(
        initial in arb_value(),
        target in arb_value(),
        current in arb_value(),
    ) {
        let p = compute_progress(&goal(GoalType::Number, Some(initial), Some(target), current));
        prop_assert!(p >= Decimal::ZERO && p <= Decimal::ONE_HUNDRED);
    }

    /// The engine is a pure function of the goal snapshot.
    #[test]
    fn prop_progress_is_idempotent(
        goal_type in arb_goal_type(),
        target in arb_value(),
        current in arb_value(),
    ) {
        let g = goal(goal_type, Some(Decimal::ZERO), Some(target), current);
        prop_assert_eq!(compute_progress(&g), compute_progress(&g));
    }

    /// Logging keeps the completion flag consistent with progress.
    #[test]
    fn prop_logging_never_leaves_a_finished_goal_incomplete(
        goal_type in prop_oneof![
            Just(GoalType::Counter),
            Just(GoalType::Money),
            Just(GoalType::Percentage),
        ],
        target in arb_positive_value(),
        start in arb_value(),
        value in arb_value(),
    ) {
        let start = if goal_type == GoalType::Percentage {
            start.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        } else {
            start
        };
        let g = goal(goal_type, None, Some(target), start);
        let now = Utc::now();
        let entry = LogEntry::new(OWNER, &g.id, value, None, now);
        let outcome = apply_transition(&g, OWNER, GoalTransition::Log(entry), now).unwrap();
        let progress = compute_progress(&outcome.goal);

        if progress >= Decimal::ONE_HUNDRED {
            prop_assert!(outcome.goal.is_completed);
            prop_assert_eq!(outcome.goal.completed_at, Some(now));
        } else {
            prop_assert!(!outcome.goal.is_completed);
        }
        if goal_type == GoalType::Percentage {
            prop_assert!(outcome.goal.current_value >= Decimal::ZERO);
            prop_assert!(outcome.goal.current_value <= Decimal::ONE_HUNDRED);
        } else {
            prop_assert_eq!(outcome.goal.current_value, start + value);
        }
    }
}
