use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::RECENT_ACTIVITY_LIMIT;
use crate::dashboard::dashboard_model::{
    ActivityGoalRef, CategoryStats, DashboardStats, DashboardSummary, RecentActivity,
};
use crate::errors::Result;
use crate::goals::{compute_progress, Goal, GoalCategory, GoalRepositoryTrait};
use crate::log_entries::LogEntryRepositoryTrait;

/// Trait for dashboard service operations
pub trait DashboardServiceTrait: Send + Sync {
    fn get_summary(&self, user_id: &str, now: DateTime<Utc>) -> Result<DashboardSummary>;
}

pub struct DashboardService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    log_entry_repository: Arc<dyn LogEntryRepositoryTrait>,
}

impl DashboardService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        log_entry_repository: Arc<dyn LogEntryRepositoryTrait>,
    ) -> Self {
        DashboardService {
            goal_repository,
            log_entry_repository,
        }
    }

    fn recent_activity(&self, user_id: &str) -> Result<Vec<RecentActivity>> {
        let entries = self
            .log_entry_repository
            .list_recent_for_user(user_id, RECENT_ACTIVITY_LIMIT)?;
        if entries.is_empty() {
            return Ok(Vec::new());
        }

        // Activity may point at archived goals too.
        let mut goals = self.goal_repository.list_goals(user_id, false)?;
        goals.extend(self.goal_repository.list_goals(user_id, true)?);
        let by_id: HashMap<&str, &Goal> = goals.iter().map(|g| (g.id.as_str(), g)).collect();

        Ok(entries
            .into_iter()
            .map(|entry| {
                let goal = by_id.get(entry.goal_id.as_str()).map(|g| ActivityGoalRef {
                    id: g.id.clone(),
                    title: g.title.clone(),
                    category: g.category,
                });
                RecentActivity {
                    id: entry.id,
                    value: entry.value,
                    note: entry.note,
                    created_at: entry.created_at,
                    goal,
                }
            })
            .collect())
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_summary(&self, user_id: &str, now: DateTime<Utc>) -> Result<DashboardSummary> {
        let goals = self.goal_repository.list_goals(user_id, false)?;

        let stats = DashboardStats {
            year_progress: year_progress(now),
            total_goals: goals.len(),
            completed_goals: goals.iter().filter(|g| g.is_completed).count(),
            avg_progress: rounded_average(goals.iter()),
        };

        let category_stats = GoalCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let in_category: Vec<&Goal> =
                    goals.iter().filter(|g| g.category == category).collect();
                if in_category.is_empty() {
                    return None;
                }
                Some(CategoryStats {
                    value: category,
                    label: category.label().to_string(),
                    color: category.color().to_string(),
                    count: in_category.len(),
                    completed: in_category.iter().filter(|g| g.is_completed).count(),
                    progress: rounded_average(in_category.iter().copied()),
                })
            })
            .collect();

        Ok(DashboardSummary {
            stats,
            category_stats,
            recent_activity: self.recent_activity(user_id)?,
        })
    }
}

fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Mean progress of the given goals, rounded; zero when there are none.
fn rounded_average<'a>(goals: impl Iterator<Item = &'a Goal>) -> Decimal {
    let (sum, count) = goals.fold((Decimal::ZERO, 0u32), |(sum, count), goal| {
        (sum + compute_progress(goal), count + 1)
    });
    if count == 0 {
        return Decimal::ZERO;
    }
    round_half_up(sum / Decimal::from(count))
}

/// Percentage of the calendar year elapsed on `now`'s date.
pub fn year_progress(now: DateTime<Utc>) -> Decimal {
    let day = Decimal::from(now.ordinal());
    let days_in_year = NaiveDate::from_ymd_opt(now.year(), 12, 31)
        .map(|d| d.ordinal())
        .unwrap_or(365);
    round_half_up(day * Decimal::ONE_HUNDRED / Decimal::from(days_in_year))
}
