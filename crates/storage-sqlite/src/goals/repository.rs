use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use log::debug;

use goalpost_core::goals::{
    apply_transition, ensure_owner, Goal, GoalRepositoryTrait, GoalTransition, TransitionOutcome,
};
use goalpost_core::log_entries::LogEntry;
use goalpost_core::{Error, Result};

use super::model::GoalDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::log_entries::LogEntryDB;
use crate::schema::{goals, log_entries};

pub struct GoalRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        GoalRepository { pool, writer }
    }
}

fn load_goal(conn: &mut SqliteConnection, goal_id: &str) -> Result<Goal> {
    let row = goals::table
        .find(goal_id)
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .into_core()?;
    Goal::try_from(row).map_err(Error::from)
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn get_goal(&self, goal_id: &str) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        load_goal(&mut conn, goal_id)
    }

    fn list_goals(&self, user_id: &str, archived: bool) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = goals::table
            .filter(goals::user_id.eq(user_id))
            .filter(goals::is_archived.eq(archived))
            .order((goals::category.asc(), goals::created_at.desc(), goals::id.asc()))
            .select(GoalDB::as_select())
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        rows.into_iter()
            .map(|row| Goal::try_from(row).map_err(Error::from))
            .collect()
    }

    fn count_goals(&self, user_id: &str, archived: bool) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        goals::table
            .filter(goals::user_id.eq(user_id))
            .filter(goals::is_archived.eq(archived))
            .count()
            .get_result::<i64>(&mut conn)
            .into_core()
    }

    async fn insert_goal(&self, goal: Goal) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let row = diesel::insert_into(goals::table)
                    .values(&GoalDB::from(&goal))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Goal::try_from(row).map_err(Error::from)
            })
            .await
    }

    async fn apply_transition(
        &self,
        actor: &str,
        goal_id: &str,
        transition: GoalTransition,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        let actor = actor.to_string();
        let goal_id = goal_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<TransitionOutcome> {
                let current = load_goal(conn, &goal_id)?;
                let name = transition.name();
                let outcome = apply_transition(&current, &actor, transition, now)?;

                let row = diesel::update(goals::table.find(&goal_id))
                    .set(&GoalDB::from(&outcome.goal))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                let goal = Goal::try_from(row)?;

                let log_entry = match outcome.log_entry {
                    Some(entry) => {
                        let row = diesel::insert_into(log_entries::table)
                            .values(&LogEntryDB::from(&entry))
                            .returning(LogEntryDB::as_returning())
                            .get_result(conn)
                            .into_core()?;
                        Some(LogEntry::try_from(row)?)
                    }
                    None => None,
                };

                debug!("Applied {} transition to goal {}", name, goal.id);
                Ok(TransitionOutcome {
                    goal,
                    log_entry,
                    newly_completed: outcome.newly_completed,
                })
            })
            .await
    }

    async fn delete_goal(&self, actor: &str, goal_id: &str) -> Result<usize> {
        let actor = actor.to_string();
        let goal_id = goal_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let goal = load_goal(conn, &goal_id)?;
                ensure_owner(&goal, &actor)?;

                diesel::delete(log_entries::table.filter(log_entries::goal_id.eq(&goal_id)))
                    .execute(conn)
                    .into_core()?;
                diesel::delete(goals::table.find(&goal_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
