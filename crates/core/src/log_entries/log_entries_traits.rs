use crate::errors::Result;
use crate::log_entries::log_entries_model::LogEntry;

/// Read access to the append-only log history.
///
/// Log entries are only ever written together with their goal update, through
/// [`GoalRepositoryTrait::apply_transition`](crate::goals::GoalRepositoryTrait::apply_transition).
pub trait LogEntryRepositoryTrait: Send + Sync {
    /// Most recent entries of one goal, newest first.
    fn list_for_goal(&self, goal_id: &str, limit: i64) -> Result<Vec<LogEntry>>;

    /// Most recent entries of one user across all goals, newest first.
    fn list_recent_for_user(&self, user_id: &str, limit: i64) -> Result<Vec<LogEntry>>;
}
