//! Database models for log entries.

use diesel::prelude::*;

use goalpost_core::log_entries::LogEntry;

use crate::errors::StorageError;
use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp};

/// Database model for log entries
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::log_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LogEntryDB {
    pub id: String,
    pub user_id: String,
    pub goal_id: String,
    pub value: String,
    pub note: Option<String>,
    pub created_at: String,
}

impl From<&LogEntry> for LogEntryDB {
    fn from(entry: &LogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            user_id: entry.user_id.clone(),
            goal_id: entry.goal_id.clone(),
            value: format_decimal(entry.value),
            note: entry.note.clone(),
            created_at: format_timestamp(entry.created_at),
        }
    }
}

impl TryFrom<LogEntryDB> for LogEntry {
    type Error = StorageError;

    fn try_from(db: LogEntryDB) -> Result<Self, Self::Error> {
        Ok(Self {
            value: parse_decimal("value", &db.value)?,
            created_at: parse_timestamp("created_at", &db.created_at)?,
            id: db.id,
            user_id: db.user_id,
            goal_id: db.goal_id,
            note: db.note,
        })
    }
}
