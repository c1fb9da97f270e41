//! In-memory repositories shared by the service tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::{DatabaseError, Error, Result};
use crate::goals::{
    apply_transition, ensure_owner, Goal, GoalRepositoryTrait, GoalTransition, TransitionOutcome,
};
use crate::log_entries::{LogEntry, LogEntryRepositoryTrait};

#[derive(Default)]
pub struct InMemoryStore {
    goals: RwLock<HashMap<String, Goal>>,
    entries: RwLock<Vec<LogEntry>>,
}

impl InMemoryStore {
    pub fn goal(&self, goal_id: &str) -> Goal {
        self.goals.read().unwrap().get(goal_id).cloned().unwrap()
    }

    pub fn entries_for(&self, goal_id: &str) -> Vec<LogEntry> {
        self.entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.goal_id == goal_id)
            .cloned()
            .collect()
    }

    pub fn push_entry(&self, entry: LogEntry) {
        self.entries.write().unwrap().push(entry);
    }

    fn not_found(goal_id: &str) -> Error {
        Error::Database(DatabaseError::NotFound(format!("goal {goal_id}")))
    }
}

fn newest_first(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[async_trait]
impl GoalRepositoryTrait for InMemoryStore {
    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        self.goals
            .read()
            .unwrap()
            .get(goal_id)
            .cloned()
            .ok_or_else(|| Self::not_found(goal_id))
    }

    fn list_goals(&self, user_id: &str, archived: bool) -> Result<Vec<Goal>> {
        let mut goals: Vec<Goal> = self
            .goals
            .read()
            .unwrap()
            .values()
            .filter(|g| g.user_id == user_id && g.is_archived == archived)
            .cloned()
            .collect();
        goals.sort_by(|a, b| {
            a.category
                .as_str()
                .cmp(b.category.as_str())
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(goals)
    }

    fn count_goals(&self, user_id: &str, archived: bool) -> Result<i64> {
        Ok(self.list_goals(user_id, archived)?.len() as i64)
    }

    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        self.goals
            .write()
            .unwrap()
            .insert(goal.id.clone(), goal.clone());
        Ok(goal)
    }

    async fn apply_transition(
        &self,
        actor: &str,
        goal_id: &str,
        transition: GoalTransition,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        let mut goals = self.goals.write().unwrap();
        let current = goals.get(goal_id).ok_or_else(|| Self::not_found(goal_id))?;
        let outcome = apply_transition(current, actor, transition, now)?;
        goals.insert(goal_id.to_string(), outcome.goal.clone());
        if let Some(entry) = &outcome.log_entry {
            self.entries.write().unwrap().push(entry.clone());
        }
        Ok(outcome)
    }

    async fn delete_goal(&self, actor: &str, goal_id: &str) -> Result<usize> {
        let mut goals = self.goals.write().unwrap();
        let current = goals.get(goal_id).ok_or_else(|| Self::not_found(goal_id))?;
        ensure_owner(current, actor)?;
        goals.remove(goal_id);
        self.entries.write().unwrap().retain(|e| e.goal_id != goal_id);
        Ok(1)
    }
}

impl LogEntryRepositoryTrait for InMemoryStore {
    fn list_for_goal(&self, goal_id: &str, limit: i64) -> Result<Vec<LogEntry>> {
        let mut entries = self.entries_for(goal_id);
        newest_first(&mut entries);
        entries.truncate(limit as usize);
        Ok(entries)
    }

    fn list_recent_for_user(&self, user_id: &str, limit: i64) -> Result<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = self
            .entries
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut entries);
        entries.truncate(limit as usize);
        Ok(entries)
    }
}
