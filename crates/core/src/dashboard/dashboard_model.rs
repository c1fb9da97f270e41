//! Dashboard read models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::goals::GoalCategory;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Share of the calendar year already elapsed, rounded.
    pub year_progress: Decimal,
    pub total_goals: usize,
    pub completed_goals: usize,
    /// Mean progress over active goals, rounded.
    pub avg_progress: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub value: GoalCategory,
    pub label: String,
    pub color: String,
    pub count: usize,
    pub completed: usize,
    pub progress: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityGoalRef {
    pub id: String,
    pub title: String,
    pub category: GoalCategory,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecentActivity {
    pub id: String,
    pub value: Decimal,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub goal: Option<ActivityGoalRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub category_stats: Vec<CategoryStats>,
    pub recent_activity: Vec<RecentActivity>,
}
