//! Goals domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{
    CURRENCY_LEN, DECIMAL_PRECISION, MAX_VALUE_ABS, TITLE_MAX_LEN, UNIT_MAX_LEN,
};
use crate::errors::{Result, ValidationError};
use crate::log_entries::LogEntry;

/// Grouping bucket for goals. Display-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    BodyMind,
    MoneyWork,
    Growth,
    Life,
}

impl GoalCategory {
    pub const ALL: [GoalCategory; 4] = [
        GoalCategory::BodyMind,
        GoalCategory::MoneyWork,
        GoalCategory::Growth,
        GoalCategory::Life,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalCategory::BodyMind => "body_mind",
            GoalCategory::MoneyWork => "money_work",
            GoalCategory::Growth => "growth",
            GoalCategory::Life => "life",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalCategory::BodyMind => "Body & Mind",
            GoalCategory::MoneyWork => "Money & Work",
            GoalCategory::Growth => "Growth",
            GoalCategory::Life => "Life",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            GoalCategory::BodyMind => "#10B981",
            GoalCategory::MoneyWork => "#F59E0B",
            GoalCategory::Growth => "#8B5CF6",
            GoalCategory::Life => "#EC4899",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            GoalCategory::BodyMind => "heart",
            GoalCategory::MoneyWork => "currency-dollar",
            GoalCategory::Growth => "academic-cap",
            GoalCategory::Life => "sparkles",
        }
    }
}

impl fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        GoalCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_field("category", format!("unknown category '{s}'")))
    }
}

/// How a goal measures progress.
///
/// `Number` is understood by the progress engine but cannot be chosen when
/// creating or editing a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Counter,
    YesNo,
    Percentage,
    Money,
    Number,
}

impl GoalType {
    /// Types offered to users when creating or editing a goal.
    pub const SELECTABLE: [GoalType; 4] = [
        GoalType::Counter,
        GoalType::YesNo,
        GoalType::Percentage,
        GoalType::Money,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Counter => "counter",
            GoalType::YesNo => "yes_no",
            GoalType::Percentage => "percentage",
            GoalType::Money => "money",
            GoalType::Number => "number",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalType::Counter => "Counter",
            GoalType::YesNo => "Yes/No",
            GoalType::Percentage => "Percentage",
            GoalType::Money => "Money",
            GoalType::Number => "Number",
        }
    }

    pub fn is_selectable(&self) -> bool {
        GoalType::SELECTABLE.contains(self)
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GoalType {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "counter" => Ok(GoalType::Counter),
            "yes_no" => Ok(GoalType::YesNo),
            "percentage" => Ok(GoalType::Percentage),
            "money" => Ok(GoalType::Money),
            "number" => Ok(GoalType::Number),
            other => Err(ValidationError::invalid_field(
                "type",
                format!("unknown goal type '{other}'"),
            )),
        }
    }
}

/// Domain model representing a goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub category: GoalCategory,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Option<Decimal>,
    pub initial_value: Option<Decimal>,
    pub current_value: Decimal,
    pub unit: Option<String>,
    pub increment: Option<Decimal>,
    pub currency: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Goal {
    /// Builds a freshly created goal: no progress, not completed, not archived.
    pub fn from_new(user_id: &str, new_goal: NewGoal, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            category: new_goal.category,
            goal_type: new_goal.goal_type,
            title: new_goal.title.trim().to_string(),
            description: new_goal.description,
            target_value: new_goal.target_value,
            initial_value: new_goal.initial_value,
            current_value: Decimal::ZERO,
            unit: new_goal.unit,
            increment: new_goal.increment,
            currency: new_goal.currency,
            is_completed: false,
            completed_at: None,
            is_archived: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Input model for creating a new goal.
///
/// Ids are always generated server side; an `id` in the payload is ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub category: GoalCategory,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Option<Decimal>,
    pub initial_value: Option<Decimal>,
    pub unit: Option<String>,
    pub increment: Option<Decimal>,
    pub currency: Option<String>,
}

impl NewGoal {
    /// Validates and normalizes the input in place.
    pub fn validate(&mut self) -> Result<()> {
        ensure_selectable_type(self.goal_type)?;
        validate_title(&self.title)?;
        validate_optional_text("unit", self.unit.as_deref(), UNIT_MAX_LEN)?;
        validate_currency(self.currency.as_deref())?;
        self.target_value = normalize_optional_value("target_value", self.target_value)?;
        self.initial_value = normalize_optional_value("initial_value", self.initial_value)?;
        self.increment = normalize_optional_value("increment", self.increment)?;
        Ok(())
    }
}

/// Partial update of a goal's descriptive and target fields.
///
/// Absent fields are left alone. For the nullable fields an explicit `null`
/// clears the stored value.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub category: Option<GoalCategory>,
    #[serde(rename = "type")]
    pub goal_type: Option<GoalType>,
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub target_value: Option<Option<Decimal>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub initial_value: Option<Option<Decimal>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub unit: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub increment: Option<Option<Decimal>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub currency: Option<Option<String>>,
}

impl GoalUpdate {
    /// Validates and normalizes the update in place.
    pub fn validate(&mut self) -> Result<()> {
        if let Some(goal_type) = self.goal_type {
            ensure_selectable_type(goal_type)?;
        }
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(unit) = &self.unit {
            validate_optional_text("unit", unit.as_deref(), UNIT_MAX_LEN)?;
        }
        if let Some(currency) = &self.currency {
            validate_currency(currency.as_deref())?;
        }
        if let Some(target) = self.target_value {
            self.target_value = Some(normalize_optional_value("target_value", target)?);
        }
        if let Some(initial) = self.initial_value {
            self.initial_value = Some(normalize_optional_value("initial_value", initial)?);
        }
        if let Some(increment) = self.increment {
            self.increment = Some(normalize_optional_value("increment", increment)?);
        }
        Ok(())
    }

    /// Copies the provided fields onto `goal`. Progress fields are not touched.
    pub fn apply_to(self, goal: &mut Goal) {
        if let Some(category) = self.category {
            goal.category = category;
        }
        if let Some(goal_type) = self.goal_type {
            goal.goal_type = goal_type;
        }
        if let Some(title) = self.title {
            goal.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            goal.description = description;
        }
        if let Some(target_value) = self.target_value {
            goal.target_value = target_value;
        }
        if let Some(initial_value) = self.initial_value {
            goal.initial_value = initial_value;
        }
        if let Some(unit) = self.unit {
            goal.unit = unit;
        }
        if let Some(increment) = self.increment {
            goal.increment = increment;
        }
        if let Some(currency) = self.currency {
            goal.currency = currency;
        }
    }
}

/// A goal together with its computed progress percentage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalWithProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: Decimal,
}

/// A goal with its most recent log entries, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDetail {
    #[serde(flatten)]
    pub goal: GoalWithProgress,
    pub log_entries: Vec<LogEntry>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTypeInfo {
    pub value: GoalType,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalCategoryInfo {
    pub value: GoalCategory,
    pub label: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
}

impl From<GoalType> for GoalTypeInfo {
    fn from(value: GoalType) -> Self {
        Self {
            value,
            label: value.label(),
        }
    }
}

impl From<GoalCategory> for GoalCategoryInfo {
    fn from(value: GoalCategory) -> Self {
        Self {
            value,
            label: value.label(),
            color: value.color(),
            icon: value.icon(),
        }
    }
}

/// Rejects values that do not fit the stored precision and rounds to it.
pub(crate) fn normalize_value(field: &str, value: Decimal) -> Result<Decimal> {
    if value.abs() > MAX_VALUE_ABS {
        return Err(ValidationError::invalid_field(
            field,
            format!("must be between -{MAX_VALUE_ABS} and {MAX_VALUE_ABS}"),
        )
        .into());
    }
    Ok(value.round_dp(DECIMAL_PRECISION))
}

fn normalize_optional_value(field: &str, value: Option<Decimal>) -> Result<Option<Decimal>> {
    value.map(|v| normalize_value(field, v)).transpose()
}

fn ensure_selectable_type(goal_type: GoalType) -> Result<()> {
    if goal_type.is_selectable() {
        Ok(())
    } else {
        Err(ValidationError::invalid_field(
            "type",
            format!("goal type '{goal_type}' cannot be selected"),
        )
        .into())
    }
}

fn validate_title(title: &str) -> Result<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("title".to_string()).into());
    }
    validate_optional_text("title", Some(trimmed), TITLE_MAX_LEN)
}

pub(crate) fn validate_optional_text(field: &str, text: Option<&str>, max_len: usize) -> Result<()> {
    match text {
        Some(t) if t.chars().count() > max_len => Err(ValidationError::invalid_field(
            field,
            format!("may not be longer than {max_len} characters"),
        )
        .into()),
        _ => Ok(()),
    }
}

fn validate_currency(currency: Option<&str>) -> Result<()> {
    match currency {
        Some(c) if c.chars().count() != CURRENCY_LEN => Err(ValidationError::invalid_field(
            "currency",
            format!("must be exactly {CURRENCY_LEN} characters"),
        )
        .into()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    fn new_goal(goal_type: GoalType) -> NewGoal {
        NewGoal {
            category: GoalCategory::Growth,
            goal_type,
            title: "  Read 12 books ".to_string(),
            description: None,
            target_value: Some(dec!(12)),
            initial_value: None,
            unit: Some("books".to_string()),
            increment: Some(dec!(1)),
            currency: None,
        }
    }

    fn field_of(err: Error) -> Option<String> {
        match err {
            Error::Validation(v) => Some(v.field().to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_from_new_applies_lifecycle_defaults() {
        let now = Utc::now();
        let goal = Goal::from_new("user-1", new_goal(GoalType::Counter), now);
        assert_eq!(goal.user_id, "user-1");
        assert_eq!(goal.title, "Read 12 books");
        assert_eq!(goal.current_value, Decimal::ZERO);
        assert!(!goal.is_completed);
        assert!(goal.completed_at.is_none());
        assert!(!goal.is_archived);
        assert_eq!(goal.created_at, now);
        assert!(!goal.id.is_empty());
    }

    #[test]
    fn test_client_supplied_id_is_ignored() {
        let input: NewGoal = serde_json::from_str(
            r#"{"id": "chosen", "category": "life", "type": "counter", "title": "Walk"}"#,
        )
        .unwrap();
        let first = Goal::from_new("user-1", input.clone(), Utc::now());
        let second = Goal::from_new("user-1", input, Utc::now());
        assert_ne!(first.id, "chosen");
        assert!(Uuid::parse_str(&first.id).is_ok());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_number_type_is_not_selectable() {
        let mut input = new_goal(GoalType::Number);
        let err = input.validate().unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("type"));
    }

    #[test]
    fn test_validation_rejects_bad_fields() {
        let mut blank = new_goal(GoalType::Counter);
        blank.title = "   ".to_string();
        assert_eq!(field_of(blank.validate().unwrap_err()).as_deref(), Some("title"));

        let mut currency = new_goal(GoalType::Money);
        currency.currency = Some("EURO".to_string());
        assert_eq!(
            field_of(currency.validate().unwrap_err()).as_deref(),
            Some("currency")
        );

        let mut unit = new_goal(GoalType::Counter);
        unit.unit = Some("x".repeat(51));
        assert_eq!(field_of(unit.validate().unwrap_err()).as_deref(), Some("unit"));

        let mut huge = new_goal(GoalType::Counter);
        huge.target_value = Some(dec!(10000000000));
        assert_eq!(
            field_of(huge.validate().unwrap_err()).as_deref(),
            Some("target_value")
        );
    }

    #[test]
    fn test_validation_rounds_to_stored_precision() {
        let mut input = new_goal(GoalType::Money);
        input.target_value = Some(dec!(1000.456));
        input.currency = Some("EUR".to_string());
        input.validate().unwrap();
        assert_eq!(input.target_value, Some(dec!(1000.46)));
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let update: GoalUpdate =
            serde_json::from_str(r#"{"description": null, "targetValue": 40}"#).unwrap();
        assert_eq!(update.description, Some(None));
        assert_eq!(update.target_value, Some(Some(dec!(40))));
        assert!(update.unit.is_none());

        let mut goal = Goal::from_new("u", new_goal(GoalType::Counter), Utc::now());
        goal.description = Some("old".to_string());
        update.apply_to(&mut goal);
        assert!(goal.description.is_none());
        assert_eq!(goal.target_value, Some(dec!(40)));
        assert_eq!(goal.unit.as_deref(), Some("books"));
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_string(&GoalType::YesNo).unwrap(), "\"yes_no\"");
        assert_eq!(
            serde_json::to_string(&GoalCategory::BodyMind).unwrap(),
            "\"body_mind\""
        );
        assert_eq!("money_work".parse::<GoalCategory>().unwrap(), GoalCategory::MoneyWork);
        assert!("chores".parse::<GoalCategory>().is_err());
        assert_eq!("number".parse::<GoalType>().unwrap(), GoalType::Number);
    }
}
