//! Dashboard module - aggregate progress views over a user's goals.

mod dashboard_model;
mod dashboard_service;

pub use dashboard_model::{
    ActivityGoalRef, CategoryStats, DashboardStats, DashboardSummary, RecentActivity,
};
pub use dashboard_service::{year_progress, DashboardService, DashboardServiceTrait};
