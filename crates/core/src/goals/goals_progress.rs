//! Progress engine: maps a goal snapshot to a completion percentage.
//!
//! Everything here is a pure read over the goal's own fields. Nothing is
//! cached, so any display or aggregation layer may call it freely.

use rust_decimal::Decimal;

use crate::constants::PROGRESS_COMPLETE;
use crate::goals::goals_model::{Goal, GoalType};

/// Computes the progress percentage of a goal.
///
/// Counter, Money and Number results are clamped to `[0, 100]`. Percentage
/// goals report `current_value` as is; the write path keeps it within range.
pub fn compute_progress(goal: &Goal) -> Decimal {
    match goal.goal_type {
        GoalType::Counter | GoalType::Money => {
            target_progress(goal.current_value, goal.target_value)
        }
        GoalType::YesNo => {
            if goal.is_completed {
                PROGRESS_COMPLETE
            } else {
                Decimal::ZERO
            }
        }
        GoalType::Percentage => goal.current_value,
        GoalType::Number => span_progress(
            goal.initial_value.unwrap_or_default(),
            goal.target_value.unwrap_or_default(),
            goal.current_value,
        ),
    }
}

/// True once the goal's progress has reached 100%.
pub fn has_reached_target(goal: &Goal) -> bool {
    compute_progress(goal) >= PROGRESS_COMPLETE
}

/// Share of a positive target that has been accumulated.
fn target_progress(current: Decimal, target: Option<Decimal>) -> Decimal {
    match target {
        Some(target) if target > Decimal::ZERO => {
            (current * Decimal::ONE_HUNDRED / target).clamp(Decimal::ZERO, PROGRESS_COMPLETE)
        }
        _ => Decimal::ZERO,
    }
}

/// Position of `current` on the way from `initial` to `target`.
///
/// The span may run downwards (e.g. a weight-loss target); the sign of the
/// range cancels out before clamping.
fn span_progress(initial: Decimal, target: Decimal, current: Decimal) -> Decimal {
    let range = target - initial;
    if range.is_zero() {
        return if current == target {
            PROGRESS_COMPLETE
        } else {
            Decimal::ZERO
        };
    }

    ((current - initial) * Decimal::ONE_HUNDRED / range).clamp(Decimal::ZERO, PROGRESS_COMPLETE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::goals_model::GoalCategory;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn goal(goal_type: GoalType) -> Goal {
        let now = Utc::now();
        Goal {
            id: "g1".to_string(),
            user_id: "u1".to_string(),
            category: GoalCategory::Life,
            goal_type,
            title: "Goal".to_string(),
            description: None,
            target_value: None,
            initial_value: None,
            current_value: Decimal::ZERO,
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

    fn counter(current: Decimal, target: Option<Decimal>) -> Goal {
        let mut g = goal(GoalType::Counter);
        g.current_value = current;
        g.target_value = target;
        g
    }

    fn number(initial: Decimal, target: Decimal, current: Decimal) -> Goal {
        let mut g = goal(GoalType::Number);
        g.initial_value = Some(initial);
        g.target_value = Some(target);
        g.current_value = current;
        g
    }

    #[test]
    fn test_counter_progress_is_share_of_target() {
        assert_eq!(compute_progress(&counter(dec!(25), Some(dec!(100)))), dec!(25));
        assert_eq!(compute_progress(&counter(dec!(1), Some(dec!(4)))), dec!(25));
    }

    #[test]
    fn test_counter_progress_caps_at_hundred() {
        assert_eq!(compute_progress(&counter(dec!(150), Some(dec!(100)))), dec!(100));
    }

    #[test]
    fn test_counter_without_positive_target_has_no_progress() {
        assert_eq!(compute_progress(&counter(dec!(50), None)), Decimal::ZERO);
        assert_eq!(compute_progress(&counter(dec!(50), Some(dec!(0)))), Decimal::ZERO);
        assert_eq!(compute_progress(&counter(dec!(50), Some(dec!(-10)))), Decimal::ZERO);
    }

    #[test]
    fn test_negative_accumulation_floors_at_zero() {
        assert_eq!(compute_progress(&counter(dec!(-5), Some(dec!(10)))), Decimal::ZERO);
    }

    #[test]
    fn test_money_uses_counter_formula() {
        let mut g = goal(GoalType::Money);
        g.target_value = Some(dec!(2000));
        g.current_value = dec!(500);
        assert_eq!(compute_progress(&g), dec!(25));
    }

    #[test]
    fn test_yes_no_ignores_numeric_fields() {
        let mut g = goal(GoalType::YesNo);
        g.current_value = dec!(999);
        g.target_value = Some(dec!(1));
        assert_eq!(compute_progress(&g), Decimal::ZERO);
        g.is_completed = true;
        g.current_value = Decimal::ZERO;
        assert_eq!(compute_progress(&g), dec!(100));
    }

    #[test]
    fn test_percentage_is_read_through() {
        let mut g = goal(GoalType::Percentage);
        g.current_value = dec!(42.5);
        assert_eq!(compute_progress(&g), dec!(42.5));
    }

    #[test]
    fn test_number_progress_within_span() {
        assert_eq!(compute_progress(&number(dec!(20), dec!(100), dec!(60))), dec!(50));
    }

    #[test]
    fn test_number_progress_descending_span() {
        // 90kg -> 80kg, currently 85kg
        assert_eq!(compute_progress(&number(dec!(90), dec!(80), dec!(85))), dec!(50));
        assert_eq!(compute_progress(&number(dec!(90), dec!(80), dec!(95))), dec!(0));
        assert_eq!(compute_progress(&number(dec!(90), dec!(80), dec!(75))), dec!(100));
    }

    #[test]
    fn test_number_progress_zero_span() {
        assert_eq!(compute_progress(&number(dec!(10), dec!(10), dec!(10))), dec!(100));
        assert_eq!(compute_progress(&number(dec!(10), dec!(10), dec!(11))), dec!(0));
    }

    #[test]
    fn test_has_reached_target() {
        assert!(has_reached_target(&counter(dec!(10), Some(dec!(10)))));
        assert!(!has_reached_target(&counter(dec!(9.99), Some(dec!(10)))));
    }
}
