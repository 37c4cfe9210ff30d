//! Cron expression validation and next-fire computation.

use std::str::FromStr;

use {chrono::DateTime, chrono_tz::Tz, cron::Schedule};

use crate::error::{Error, Result};

/// All broadcast times are resolved in this zone for the life of the
/// process.
pub const BROADCAST_TZ: Tz = chrono_tz::Europe::Helsinki;

/// Fires at 07:00:00 local time every day, until `settime` changes it.
pub const DEFAULT_EXPR: &str = "0 0 7 * * *";

/// Parse a six-field (seconds-resolution) cron expression.
///
/// The field count is checked before parsing so that five-field classic
/// expressions and seven-field year-bearing ones get a precise rejection.
pub fn validate_expr(expr: &str) -> Result<Schedule> {
    let fields = expr.split_whitespace().count();
    if fields != 6 {
        return Err(Error::invalid_schedule(
            expr,
            format!("expected 6 fields (sec min hour day month weekday), got {fields}"),
        ));
    }
    Schedule::from_str(expr).map_err(|e| Error::invalid_schedule(expr, e))
}

/// Next occurrence of `schedule` strictly after `after`, in the broadcast
/// zone.
#[must_use]
pub fn next_fire(schedule: &Schedule, after: DateTime<Tz>) -> Option<DateTime<Tz>> {
    schedule.after(&after).next()
}
