//! The single mutation path for goals.
//!
//! Every change to a stored goal is expressed as a [`GoalTransition`] and
//! applied with [`apply_transition`], so the completion flag is re-checked no
//! matter how the goal was changed. Storage implementations load the goal,
//! call this function and persist the outcome inside one transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::constants::{MAX_VALUE_ABS, PROGRESS_COMPLETE};
use crate::errors::{Error, Result, ValidationError};
use crate::goals::goals_model::{Goal, GoalType, GoalUpdate};
use crate::goals::goals_progress::has_reached_target;
use crate::log_entries::LogEntry;

/// A requested change to one goal.
#[derive(Debug, Clone)]
pub enum GoalTransition {
    /// Record a log entry and fold its value into the goal.
    Log(LogEntry),
    /// Change descriptive or target fields.
    Edit(GoalUpdate),
    /// Archive (`true`) or restore (`false`) the goal.
    SetArchived(bool),
}

impl GoalTransition {
    pub fn name(&self) -> &'static str {
        match self {
            GoalTransition::Log(_) => "log",
            GoalTransition::Edit(_) => "edit",
            GoalTransition::SetArchived(true) => "archive",
            GoalTransition::SetArchived(false) => "restore",
        }
    }
}

/// The goal after a transition, plus the log entry to append, if any.
#[derive(Debug, Clone)]
pub struct TransitionOutcome {
    pub goal: Goal,
    pub log_entry: Option<LogEntry>,
    pub newly_completed: bool,
}

/// Fails with an authorization error unless `actor` owns `goal`.
pub fn ensure_owner(goal: &Goal, actor: &str) -> Result<()> {
    if goal.is_owned_by(actor) {
        Ok(())
    } else {
        Err(Error::Authorization(format!(
            "goal {} does not belong to the acting user",
            goal.id
        )))
    }
}

/// Applies `transition` to a copy of `goal` on behalf of `actor`.
///
/// The input goal is never modified; callers persist the returned goal.
pub fn apply_transition(
    goal: &Goal,
    actor: &str,
    transition: GoalTransition,
    now: DateTime<Utc>,
) -> Result<TransitionOutcome> {
    ensure_owner(goal, actor)?;

    let mut updated = goal.clone();
    let was_completed = goal.is_completed;

    let log_entry = match transition {
        GoalTransition::Log(entry) => {
            if entry.goal_id != goal.id || entry.user_id != actor {
                return Err(Error::Unexpected(format!(
                    "log entry {} does not target goal {} for the acting user",
                    entry.id, goal.id
                )));
            }
            apply_logged_value(&mut updated, entry.value, now)?;
            reconcile_completion(&mut updated, now);
            Some(entry)
        }
        GoalTransition::Edit(update) => {
            update.apply_to(&mut updated);
            if updated.goal_type == GoalType::Percentage {
                updated.current_value = clamp_percentage(updated.current_value);
            }
            reconcile_completion(&mut updated, now);
            None
        }
        GoalTransition::SetArchived(archived) => {
            updated.is_archived = archived;
            None
        }
    };

    updated.updated_at = now;

    Ok(TransitionOutcome {
        newly_completed: !was_completed && updated.is_completed,
        goal: updated,
        log_entry,
    })
}

/// Type-specific effect of one logged value.
fn apply_logged_value(goal: &mut Goal, value: Decimal, now: DateTime<Utc>) -> Result<()> {
    match goal.goal_type {
        GoalType::Counter | GoalType::Money => {
            let total = goal.current_value + value;
            if total.abs() > MAX_VALUE_ABS {
                return Err(ValidationError::invalid_field(
                    "value",
                    format!("would move the goal total outside of ±{MAX_VALUE_ABS}"),
                )
                .into());
            }
            goal.current_value = total;
        }
        GoalType::YesNo => {
            let done = value > Decimal::ZERO;
            goal.is_completed = done;
            goal.completed_at = if done { Some(now) } else { None };
        }
        GoalType::Percentage => {
            goal.current_value = clamp_percentage(value);
        }
        GoalType::Number => {
            goal.current_value = value;
        }
    }
    Ok(())
}

/// Marks the goal completed once its progress reaches 100%.
///
/// Completion is never cleared here; only a YesNo toggle does that.
fn reconcile_completion(goal: &mut Goal, now: DateTime<Utc>) {
    if !goal.is_completed && has_reached_target(goal) {
        goal.is_completed = true;
        goal.completed_at = Some(now);
    }
}

fn clamp_percentage(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, PROGRESS_COMPLETE)
}
