//! Log entry domain models.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_VALUE_ABS, NOTE_MAX_LEN};
use crate::errors::{Result, ValidationError};
use crate::goals::{normalize_value, validate_optional_text, Goal};

/// One immutable progress update recorded against a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub id: String,
    pub user_id: String,
    pub goal_id: String,
    pub value: Decimal,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(
        user_id: &str,
        goal_id: &str,
        value: Decimal,
        note: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            goal_id: goal_id.to_string(),
            value,
            note,
            created_at,
        }
    }
}

/// Raw input for logging progress, as received from a request.
///
/// `value` stays textual until validation so that a non-numeric value can be
/// reported against its field instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogProgressInput {
    #[serde(default, deserialize_with = "value_input::deserialize_value_text")]
    pub value: Option<String>,
    pub note: Option<String>,
}

/// Input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedLogInput {
    pub value: Decimal,
    pub note: Option<String>,
}

impl LogProgressInput {
    pub fn new(value: impl Into<String>, note: Option<String>) -> Self {
        Self {
            value: Some(value.into()),
            note,
        }
    }

    pub fn validate(self) -> Result<ValidatedLogInput> {
        let value = parse_decimal_field("value", self.value.as_deref())?;
        let value = normalize_value("value", value)?;
        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        validate_optional_text("note", note.as_deref(), NOTE_MAX_LEN)?;
        Ok(ValidatedLogInput { value, note })
    }
}

/// Parses a required decimal field, accepting plain and scientific notation.
pub fn parse_decimal_field(field: &str, raw: Option<&str>) -> Result<Decimal> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ValidationError::MissingField(field.to_string()))?;

    if let Ok(value) = Decimal::from_str(raw) {
        return Ok(value);
    }

    let not_a_number = || ValidationError::invalid_field(field, "must be a number");
    let (mantissa, exponent) = raw
        .split_once(|c| c == 'e' || c == 'E')
        .ok_or_else(not_a_number)?;
    let mantissa = Decimal::from_str(mantissa).map_err(|_| not_a_number())?;
    let exponent: i64 = exponent.parse().map_err(|_| not_a_number())?;

    scale_by_power_of_ten(mantissa, exponent).ok_or_else(|| {
        ValidationError::invalid_field(
            field,
            format!("must be between -{MAX_VALUE_ABS} and {MAX_VALUE_ABS}"),
        )
        .into()
    })
}

// Exponents beyond Decimal's 28-digit scale underflow to zero; `None` on overflow.
fn scale_by_power_of_ten(mut value: Decimal, exponent: i64) -> Option<Decimal> {
    for _ in 0..exponent.unsigned_abs() {
        if value.is_zero() {
            break;
        }
        value = if exponent < 0 {
            value / Decimal::TEN
        } else {
            value.checked_mul(Decimal::TEN)?
        };
    }
    Some(value)
}

// Accepts a JSON number or string for the logged value and keeps its text.
// Any other JSON type is kept verbatim so validation can reject it by field.
mod value_input {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize_value_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            other => Some(other.to_string()),
        })
    }
}

/// Outcome of a successful log-and-update transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressLogged {
    pub goal: Goal,
    pub progress: Decimal,
    pub log_entry: LogEntry,
    /// True when this entry moved the goal from not completed to completed.
    pub newly_completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    fn field_of(err: Error) -> Option<String> {
        match err {
            Error::Validation(v) => Some(v.field().to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_parse_accepts_numeric_forms() {
        assert_eq!(parse_decimal_field("value", Some("5")).unwrap(), dec!(5));
        assert_eq!(parse_decimal_field("value", Some(" -20 ")).unwrap(), dec!(-20));
        assert_eq!(parse_decimal_field("value", Some("1.25")).unwrap(), dec!(1.25));
        assert_eq!(parse_decimal_field("value", Some("1e3")).unwrap(), dec!(1000));
    }

    #[test]
    fn test_scientific_values_beyond_decimal_scale() {
        let tiny = LogProgressInput::new("1e-30", None).validate().unwrap();
        assert_eq!(tiny.value, Decimal::ZERO);
        assert_eq!(parse_decimal_field("value", Some("-2.5E2")).unwrap(), dec!(-250));
        assert_eq!(parse_decimal_field("value", Some("5e-3")).unwrap(), dec!(0.005));

        let huge = LogProgressInput::new("1e400", None).validate().unwrap_err();
        match huge {
            Error::Validation(ValidationError::InvalidField { field, reason }) => {
                assert_eq!(field, "value");
                assert!(reason.contains("between"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }

        let malformed = parse_decimal_field("value", Some("1e")).unwrap_err();
        assert!(malformed.to_string().contains("must be a number"));
    }

    #[test]
    fn test_missing_and_non_numeric_values_name_the_field() {
        let missing = LogProgressInput::default().validate().unwrap_err();
        assert!(matches!(
            &missing,
            Error::Validation(ValidationError::MissingField(f)) if f == "value"
        ));

        let blank = LogProgressInput::new("  ", None).validate().unwrap_err();
        assert_eq!(field_of(blank).as_deref(), Some("value"));

        let garbage = LogProgressInput::new("five", None).validate().unwrap_err();
        assert!(matches!(
            &garbage,
            Error::Validation(ValidationError::InvalidField { field, .. }) if field == "value"
        ));
    }

    #[test]
    fn test_note_is_trimmed_and_bounded() {
        let ok = LogProgressInput::new("1", Some("  ran 5k  ".to_string()))
            .validate()
            .unwrap();
        assert_eq!(ok.note.as_deref(), Some("ran 5k"));

        let empty = LogProgressInput::new("1", Some("   ".to_string()))
            .validate()
            .unwrap();
        assert!(empty.note.is_none());

        let long = LogProgressInput::new("1", Some("n".repeat(501)))
            .validate()
            .unwrap_err();
        assert_eq!(field_of(long).as_deref(), Some("note"));
    }

    #[test]
    fn test_value_deserializes_from_number_or_string() {
        let from_number: LogProgressInput =
            serde_json::from_str(r#"{"value": 2.5, "note": "x"}"#).unwrap();
        assert_eq!(from_number.validate().unwrap().value, dec!(2.5));

        let from_string: LogProgressInput = serde_json::from_str(r#"{"value": "-3"}"#).unwrap();
        assert_eq!(from_string.validate().unwrap().value, dec!(-3));

        let absent: LogProgressInput = serde_json::from_str("{}").unwrap();
        assert!(absent.value.is_none());

        let boolean: LogProgressInput = serde_json::from_str(r#"{"value": true}"#).unwrap();
        assert_eq!(field_of(boolean.validate().unwrap_err()).as_deref(), Some("value"));
    }

    #[test]
    fn test_value_out_of_range_is_rejected() {
        let err = LogProgressInput::new("99999999999", None)
            .validate()
            .unwrap_err();
        assert_eq!(field_of(err).as_deref(), Some("value"));
    }
}
