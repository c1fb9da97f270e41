use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::Result;
use crate::goals::goals_model::{Goal, GoalDetail, GoalUpdate, GoalWithProgress, NewGoal};
use crate::goals::goals_transition::{GoalTransition, TransitionOutcome};
use crate::log_entries::{LogProgressInput, ProgressLogged};

/// Trait for goal repository operations
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    fn get_goal(&self, goal_id: &str) -> Result<Goal>;

    /// Goals of one user, ordered by category and then newest first.
    fn list_goals(&self, user_id: &str, archived: bool) -> Result<Vec<Goal>>;

    fn count_goals(&self, user_id: &str, archived: bool) -> Result<i64>;

    async fn insert_goal(&self, goal: Goal) -> Result<Goal>;

    /// Loads the goal, applies the transition and persists the goal together
    /// with any log entry it produced, atomically.
    async fn apply_transition(
        &self,
        actor: &str,
        goal_id: &str,
        transition: GoalTransition,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome>;

    /// Deletes the goal and its log entries. Fails unless `actor` owns it.
    async fn delete_goal(&self, actor: &str, goal_id: &str) -> Result<usize>;
}

/// Trait for goal service operations
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    fn list_goals(&self, user_id: &str) -> Result<Vec<GoalWithProgress>>;
    fn list_archived_goals(&self, user_id: &str) -> Result<Vec<GoalWithProgress>>;
    fn count_archived_goals(&self, user_id: &str) -> Result<i64>;
    fn get_goal_detail(&self, user_id: &str, goal_id: &str) -> Result<GoalDetail>;
    async fn create_goal(&self, user_id: &str, new_goal: NewGoal) -> Result<GoalWithProgress>;
    async fn update_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        update: GoalUpdate,
    ) -> Result<GoalWithProgress>;
    async fn archive_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithProgress>;
    async fn restore_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithProgress>;
    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()>;
    async fn log_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        input: LogProgressInput,
    ) -> Result<ProgressLogged>;
}
