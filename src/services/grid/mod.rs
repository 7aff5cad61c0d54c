//! Date grid calculations for the timeline axis.
//!
//! Turns a `[start, end]` calendar span into month buckets, tick marks,
//! grid lines and month headings. Every function is pure; the only failure
//! is an inverted span.

use chrono::{Datelike, Days, Duration, NaiveDate};

use crate::error::{ensure_ordered, ScheduleError};
use crate::models::timeline::MonthAnnotation;
use crate::utils::date::{first_of_month, first_of_next_month, last_of_month, monday_on_or_before};

/// Days of the month that always get a tick when the month has them.
pub const TICK_DAYS: [u32; 4] = [6, 12, 18, 24];

/// One calendar month clamped to the requested span's end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBucket {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Partition `[start, end]` into calendar months.
///
/// The first bucket begins on the first of `start`'s month (which may lie
/// before `start`); the last bucket ends on `end` rather than month end.
pub fn month_range(start: NaiveDate, end: NaiveDate) -> Result<Vec<MonthBucket>, ScheduleError> {
    ensure_ordered(start, end)?;

    let mut buckets = Vec::new();
    let mut current = first_of_month(start);
    while current <= end {
        buckets.push(MonthBucket {
            start: current,
            end: last_of_month(current).min(end),
        });
        current = match first_of_next_month(current) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(buckets)
}

/// Axis ticks on days 6, 12, 18 and 24 of each month plus each bucket's last day.
///
/// Only dates inside `[start, end]` are kept. When a bucket is clamped so
/// that its last day is itself a tick day, that date appears once.
pub fn tick_positions(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, ScheduleError> {
    let mut ticks: Vec<NaiveDate> = Vec::new();

    for bucket in month_range(start, end)? {
        for day in TICK_DAYS {
            if let Some(tick) = bucket.start.with_day(day) {
                if tick <= bucket.end {
                    ticks.push(tick);
                }
            }
        }
        ticks.push(bucket.end);
    }

    ticks.dedup();
    ticks.retain(|tick| *tick >= start && *tick <= end);
    Ok(ticks)
}

/// Weekly grid lines starting from the Monday on or before `start`.
pub fn week_grid_lines(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, ScheduleError> {
    ensure_ordered(start, end)?;

    let mut lines = Vec::new();
    let mut current = monday_on_or_before(start);
    while current <= end {
        lines.push(current);
        current = match current.checked_add_days(Days::new(7)) {
            Some(next) => next,
            None => break,
        };
    }
    Ok(lines)
}

/// One grid line per calendar day of `[start, end]`.
pub fn day_grid_lines(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, ScheduleError> {
    ensure_ordered(start, end)?;

    let mut lines = vec![start];
    let mut current = start;
    while current < end {
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
        lines.push(current);
    }
    Ok(lines)
}

/// First day of every month bucket, where the heavy month separators go.
pub fn month_boundaries(start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, ScheduleError> {
    Ok(month_range(start, end)?
        .into_iter()
        .map(|bucket| bucket.start)
        .collect())
}

/// A `YYYY-MM` heading centered on each month bucket.
///
/// The midpoint is `start + (end - start) / 2` in whole days, rounded down.
pub fn month_annotations(
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<MonthAnnotation>, ScheduleError> {
    Ok(month_range(start, end)?
        .into_iter()
        .map(|bucket| {
            let half = (bucket.end - bucket.start).num_days() / 2;
            MonthAnnotation {
                label: month_label(bucket.start),
                midpoint: bucket.start + Duration::days(half),
            }
        })
        .collect())
}

pub fn month_label(date: NaiveDate) -> String {
    format!("{}-{:02}", date.year(), date.month())
}
