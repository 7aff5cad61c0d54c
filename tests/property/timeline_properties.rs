// Property-based tests for the date grid, clipping and business-day counts
// Random spans across several years, including leap days and month ends

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use proptest::prelude::*;

use site_gantt::models::timeline::Clip;
use site_gantt::services::business_days::{business_days, business_days_naive};
use site_gantt::services::clip::clip;
use site_gantt::services::grid::{
    day_grid_lines, month_annotations, month_boundaries, tick_positions, week_grid_lines,
};

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..3_650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2022, 1, 1).unwrap() + Duration::days(offset)
    })
}

/// An ordered span of up to two years.
fn span_strategy() -> impl Strategy<Value = (NaiveDate, NaiveDate)> {
    (date_strategy(), 0i64..730).prop_map(|(start, len)| (start, start + Duration::days(len)))
}

proptest! {
    /// Property: ticks stay inside the span, strictly increasing
    #[test]
    fn prop_ticks_inside_span_and_sorted((start, end) in span_strategy()) {
        let ticks = tick_positions(start, end).unwrap();
        prop_assert!(!ticks.is_empty());
        for tick in &ticks {
            prop_assert!(*tick >= start && *tick <= end);
        }
        for pair in ticks.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        // The span's last day always closes the final bucket
        prop_assert_eq!(ticks.last().copied(), Some(end));
    }

    /// Property: weekly lines are Mondays, 7 days apart, covering the span
    #[test]
    fn prop_week_lines_are_mondays((start, end) in span_strategy()) {
        let lines = week_grid_lines(start, end).unwrap();
        prop_assert!(lines[0] <= start);
        prop_assert!(start - lines[0] < Duration::days(7));
        for line in &lines {
            prop_assert_eq!(line.weekday(), Weekday::Mon);
            prop_assert!(*line <= end);
        }
        for pair in lines.windows(2) {
            prop_assert_eq!(pair[1] - pair[0], Duration::days(7));
        }
    }

    /// Property: daily lines list every day exactly once
    #[test]
    fn prop_day_lines_cover_span((start, end) in span_strategy()) {
        let lines = day_grid_lines(start, end).unwrap();
        prop_assert_eq!(lines.len() as i64, (end - start).num_days() + 1);
        prop_assert_eq!(lines.first().copied(), Some(start));
        prop_assert_eq!(lines.last().copied(), Some(end));
    }

    /// Property: one boundary and one heading per month touched
    #[test]
    fn prop_one_annotation_per_month((start, end) in span_strategy()) {
        let boundaries = month_boundaries(start, end).unwrap();
        let annotations = month_annotations(start, end).unwrap();
        let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32 + 1;

        prop_assert_eq!(boundaries.len() as i32, months);
        prop_assert_eq!(annotations.len(), boundaries.len());
        for (boundary, annotation) in boundaries.iter().zip(&annotations) {
            prop_assert_eq!(boundary.day(), 1);
            prop_assert!(annotation.midpoint >= *boundary);
            prop_assert_eq!(annotation.midpoint.month(), boundary.month());
        }
    }

    /// Property: a visible clip lies inside both the segment and the window
    #[test]
    fn prop_clip_within_window(
        (seg_start, seg_end) in span_strategy(),
        (view_start, view_end) in span_strategy(),
    ) {
        match clip("p", "seg", seg_start, seg_end, view_start, view_end).unwrap() {
            Clip::Visible(clipped) => {
                prop_assert!(clipped.start <= clipped.end);
                prop_assert!(clipped.start >= view_start && clipped.end <= view_end);
                prop_assert!(clipped.start >= seg_start && clipped.end <= seg_end);
            }
            Clip::Empty => {
                prop_assert!(seg_end < view_start || seg_start > view_end);
            }
        }
    }

    /// Property: an inverted segment is always rejected
    #[test]
    fn prop_inverted_segment_rejected(
        (start, end) in span_strategy().prop_filter("non-empty", |(s, e)| s < e),
        (view_start, view_end) in span_strategy(),
    ) {
        prop_assert!(clip("p", "seg", end, start, view_start, view_end).is_err());
    }

    /// Property: the closed-form count agrees with walking every day
    #[test]
    fn prop_business_days_match_naive((start, end) in span_strategy()) {
        prop_assert_eq!(
            business_days(start, end).unwrap(),
            business_days_naive(start, end).unwrap()
        );
    }

    /// Property: splitting a span never changes the total
    #[test]
    fn prop_business_days_additive(
        (start, end) in span_strategy().prop_filter("at least two days", |(s, e)| s < e),
        split in 0i64..730,
    ) {
        let split = start + Duration::days(split % (end - start).num_days());
        let whole = business_days(start, end).unwrap();
        let left = business_days(start, split).unwrap();
        let right = business_days(split + Duration::days(1), end).unwrap();
        prop_assert_eq!(whole, left + right);
    }
}
