use std::sync::Arc;

use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;

use goalpost_core::log_entries::{LogEntry, LogEntryRepositoryTrait};
use goalpost_core::{Error, Result};

use super::model::LogEntryDB;
use crate::db::get_connection;
use crate::errors::IntoCore;
use crate::schema::log_entries;

/// Read side of the log history. Entries are written by
/// [`GoalRepository`](crate::goals::GoalRepository) together with their goal.
pub struct LogEntryRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl LogEntryRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        LogEntryRepository { pool }
    }
}

fn into_domain(rows: Vec<LogEntryDB>) -> Result<Vec<LogEntry>> {
    rows.into_iter()
        .map(|row| LogEntry::try_from(row).map_err(Error::from))
        .collect()
}

impl LogEntryRepositoryTrait for LogEntryRepository {
    fn list_for_goal(&self, goal_id: &str, limit: i64) -> Result<Vec<LogEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = log_entries::table
            .filter(log_entries::goal_id.eq(goal_id))
            .order((log_entries::created_at.desc(), log_entries::id.desc()))
            .limit(limit)
            .select(LogEntryDB::as_select())
            .load::<LogEntryDB>(&mut conn)
            .into_core()?;
        into_domain(rows)
    }

    fn list_recent_for_user(&self, user_id: &str, limit: i64) -> Result<Vec<LogEntry>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = log_entries::table
            .filter(log_entries::user_id.eq(user_id))
            .order((log_entries::created_at.desc(), log_entries::id.desc()))
            .limit(limit)
            .select(LogEntryDB::as_select())
            .load::<LogEntryDB>(&mut conn)
            .into_core()?;
        into_domain(rows)
    }
}
