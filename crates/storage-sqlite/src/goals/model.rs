//! Database models for goals.

use diesel::prelude::*;

use goalpost_core::goals::{Goal, GoalCategory, GoalType};

use crate::errors::StorageError;
use crate::utils::{
    format_decimal, format_optional_decimal, format_timestamp, parse_decimal,
    parse_optional_decimal, parse_optional_timestamp, parse_timestamp,
};

/// Database model for goals
#[derive(
    Queryable, Identifiable, Insertable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct GoalDB {
    pub id: String,
    pub user_id: String,
    pub category: String,
    pub goal_type: String,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Option<String>,
    pub initial_value: Option<String>,
    pub current_value: String,
    pub unit: Option<String>,
    pub increment: Option<String>,
    pub currency: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<String>,
    pub is_archived: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Goal> for GoalDB {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.clone(),
            user_id: goal.user_id.clone(),
            category: goal.category.as_str().to_string(),
            goal_type: goal.goal_type.as_str().to_string(),
            title: goal.title.clone(),
            description: goal.description.clone(),
            target_value: format_optional_decimal(goal.target_value),
            initial_value: format_optional_decimal(goal.initial_value),
            current_value: format_decimal(goal.current_value),
            unit: goal.unit.clone(),
            increment: format_optional_decimal(goal.increment),
            currency: goal.currency.clone(),
            is_completed: goal.is_completed,
            completed_at: goal.completed_at.map(format_timestamp),
            is_archived: goal.is_archived,
            created_at: format_timestamp(goal.created_at),
            updated_at: format_timestamp(goal.updated_at),
        }
    }
}

impl TryFrom<GoalDB> for Goal {
    type Error = StorageError;

    fn try_from(db: GoalDB) -> Result<Self, Self::Error> {
        let category = db
            .category
            .parse::<GoalCategory>()
            .map_err(|e| StorageError::CorruptValue(e.to_string()))?;
        let goal_type = db
            .goal_type
            .parse::<GoalType>()
            .map_err(|e| StorageError::CorruptValue(e.to_string()))?;

        Ok(Self {
            category,
            goal_type,
            target_value: parse_optional_decimal("target_value", db.target_value.as_deref())?,
            initial_value: parse_optional_decimal("initial_value", db.initial_value.as_deref())?,
            current_value: parse_decimal("current_value", &db.current_value)?,
            increment: parse_optional_decimal("increment", db.increment.as_deref())?,
            completed_at: parse_optional_timestamp("completed_at", db.completed_at.as_deref())?,
            created_at: parse_timestamp("created_at", &db.created_at)?,
            updated_at: parse_timestamp("updated_at", &db.updated_at)?,
            id: db.id,
            user_id: db.user_id,
            title: db.title,
            description: db.description,
            unit: db.unit,
            currency: db.currency,
            is_completed: db.is_completed,
            is_archived: db.is_archived,
        })
    }
}
