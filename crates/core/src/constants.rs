use rust_decimal::Decimal;

/// Fractional digits kept for every stored goal and log value.
pub const DECIMAL_PRECISION: u32 = 2;

/// Progress value at which a goal counts as complete.
pub const PROGRESS_COMPLETE: Decimal = Decimal::ONE_HUNDRED;

/// Largest magnitude accepted for a stored value (fits `DECIMAL(12, 2)`).
pub const MAX_VALUE_ABS: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

pub const TITLE_MAX_LEN: usize = 255;
pub const UNIT_MAX_LEN: usize = 50;
pub const NOTE_MAX_LEN: usize = 500;
pub const CURRENCY_LEN: usize = 3;

/// Number of log entries shown on a goal's detail view.
pub const GOAL_DETAIL_LOG_LIMIT: i64 = 20;

/// Number of log entries shown in the dashboard activity feed.
pub const RECENT_ACTIVITY_LIMIT: i64 = 10;
