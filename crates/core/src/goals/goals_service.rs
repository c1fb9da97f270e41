use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};

use crate::constants::GOAL_DETAIL_LOG_LIMIT;
use crate::errors::{Error, Result};
use crate::goals::goals_model::{Goal, GoalDetail, GoalUpdate, GoalWithProgress, NewGoal};
use crate::goals::goals_progress::compute_progress;
use crate::goals::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::goals::goals_transition::{ensure_owner, GoalTransition};
use crate::log_entries::{LogEntry, LogEntryRepositoryTrait, LogProgressInput, ProgressLogged};

pub struct GoalService {
    goal_repository: Arc<dyn GoalRepositoryTrait>,
    log_entry_repository: Arc<dyn LogEntryRepositoryTrait>,
}

impl GoalService {
    pub fn new(
        goal_repository: Arc<dyn GoalRepositoryTrait>,
        log_entry_repository: Arc<dyn LogEntryRepositoryTrait>,
    ) -> Self {
        GoalService {
            goal_repository,
            log_entry_repository,
        }
    }

    fn with_progress(goal: Goal) -> GoalWithProgress {
        GoalWithProgress {
            progress: compute_progress(&goal),
            goal,
        }
    }

    async fn transition(
        &self,
        user_id: &str,
        goal_id: &str,
        transition: GoalTransition,
    ) -> Result<GoalWithProgress> {
        let name = transition.name();
        let outcome = self
            .goal_repository
            .apply_transition(user_id, goal_id, transition, Utc::now())
            .await?;
        debug!("Applied {} to goal {}", name, goal_id);
        if outcome.newly_completed {
            info!("Goal {} completed after {}", goal_id, name);
        }
        Ok(Self::with_progress(outcome.goal))
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    fn list_goals(&self, user_id: &str) -> Result<Vec<GoalWithProgress>> {
        let goals = self.goal_repository.list_goals(user_id, false)?;
        Ok(goals.into_iter().map(Self::with_progress).collect())
    }

    fn list_archived_goals(&self, user_id: &str) -> Result<Vec<GoalWithProgress>> {
        let goals = self.goal_repository.list_goals(user_id, true)?;
        Ok(goals.into_iter().map(Self::with_progress).collect())
    }

    fn count_archived_goals(&self, user_id: &str) -> Result<i64> {
        self.goal_repository.count_goals(user_id, true)
    }

    fn get_goal_detail(&self, user_id: &str, goal_id: &str) -> Result<GoalDetail> {
        let goal = self.goal_repository.get_goal(goal_id)?;
        ensure_owner(&goal, user_id)?;
        let log_entries = self
            .log_entry_repository
            .list_for_goal(goal_id, GOAL_DETAIL_LOG_LIMIT)?;
        Ok(GoalDetail {
            goal: Self::with_progress(goal),
            log_entries,
        })
    }

    async fn create_goal(&self, user_id: &str, mut new_goal: NewGoal) -> Result<GoalWithProgress> {
        new_goal.validate()?;
        let goal = Goal::from_new(user_id, new_goal, Utc::now());
        let created = self.goal_repository.insert_goal(goal).await?;
        info!("Created {} goal {}", created.goal_type, created.id);
        Ok(Self::with_progress(created))
    }

    async fn update_goal(
        &self,
        user_id: &str,
        goal_id: &str,
        mut update: GoalUpdate,
    ) -> Result<GoalWithProgress> {
        update.validate()?;
        self.transition(user_id, goal_id, GoalTransition::Edit(update))
            .await
    }

    async fn archive_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithProgress> {
        self.transition(user_id, goal_id, GoalTransition::SetArchived(true))
            .await
    }

    async fn restore_goal(&self, user_id: &str, goal_id: &str) -> Result<GoalWithProgress> {
        self.transition(user_id, goal_id, GoalTransition::SetArchived(false))
            .await
    }

    async fn delete_goal(&self, user_id: &str, goal_id: &str) -> Result<()> {
        self.goal_repository.delete_goal(user_id, goal_id).await?;
        info!("Deleted goal {}", goal_id);
        Ok(())
    }

    async fn log_progress(
        &self,
        user_id: &str,
        goal_id: &str,
        input: LogProgressInput,
    ) -> Result<ProgressLogged> {
        let input = input.validate()?;
        let now = Utc::now();
        let entry = LogEntry::new(user_id, goal_id, input.value, input.note, now);

        let outcome = self
            .goal_repository
            .apply_transition(user_id, goal_id, GoalTransition::Log(entry), now)
            .await?;
        let log_entry = outcome.log_entry.ok_or_else(|| {
            Error::Unexpected(format!("logging on goal {goal_id} produced no log entry"))
        })?;

        debug!(
            "Logged {} on goal {} (current value now {})",
            log_entry.value, goal_id, outcome.goal.current_value
        );
        if outcome.newly_completed {
            info!("Goal {} completed", goal_id);
        }

        Ok(ProgressLogged {
            progress: compute_progress(&outcome.goal),
            goal: outcome.goal,
            log_entry,
            newly_completed: outcome.newly_completed,
        })
    }
}
