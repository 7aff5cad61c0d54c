// Business day counting
// Monday-Friday dates in an inclusive span; no holiday calendar

use chrono::{Datelike, NaiveDate};

use crate::error::{ensure_ordered, ScheduleError};
use crate::utils::date::is_weekday;

/// Count Monday-Friday dates in `[start, end]`, both ends included.
pub fn business_days(start: NaiveDate, end: NaiveDate) -> Result<u32, ScheduleError> {
    ensure_ordered(start, end)?;

    let total_days = (end - start).num_days() + 1;
    let full_weeks = total_days / 7;
    let mut count = full_weeks * 5;

    // Walk the leftover days after the whole weeks.
    let remainder = total_days % 7;
    let first_weekday = start.weekday().num_days_from_monday() as i64;
    for offset in 0..remainder {
        if (first_weekday + offset) % 7 < 5 {
            count += 1;
        }
    }

    Ok(count as u32)
}

/// Straightforward day-by-day count, kept for cross-checking the fast path.
pub fn business_days_naive(start: NaiveDate, end: NaiveDate) -> Result<u32, ScheduleError> {
    ensure_ordered(start, end)?;
    Ok(start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_weekday(*day))
        .count() as u32)
}
