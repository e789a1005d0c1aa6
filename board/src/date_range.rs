// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
//! Classifies item dates into named buckets (today, this week, overdue, ...).
//!
//! Every comparison happens on calendar days in local time, so the time of
//! day of a timestamp never changes which bucket it lands in.
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// The named date windows a board can be filtered by.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
    Month,
    Overdue,
    Custom,
}

/// User supplied bounds for [`DateRange::Custom`]. Both bounds are inclusive.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CustomRange {
    #[serde(default)]
    pub start: Option<NaiveDate>,
    #[serde(default)]
    pub end: Option<NaiveDate>,
}

/// A date range together with the custom bounds it may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRangeFilter {
    pub range: DateRange,
    pub custom: Option<CustomRange>,
}

impl DateRangeFilter {
    pub fn new(range: DateRange, custom: Option<CustomRange>) -> Self {
        Self { range, custom }
    }

    /// Returns whether `date` falls in this range, relative to `today`.
    ///
    /// `completed` is the item's terminal-status flag; it only matters for
    /// [`DateRange::Overdue`]. A missing date matches [`DateRange::All`] and
    /// nothing else.
    pub fn matches(&self, date: Option<NaiveDate>, completed: bool, today: NaiveDate) -> bool {
        if self.range == DateRange::All {
            return true;
        }

        let Some(date) = date else {
            return false;
        };

        match self.range {
            DateRange::All => true,
            DateRange::Today => date == today,
            DateRange::Tomorrow => Some(date) == today.succ_opt(),
            DateRange::ThisWeek => {
                let start = start_of_week(today);
                date >= start && date <= start + Duration::days(6)
            }
            DateRange::NextWeek => {
                let start = start_of_week(today) + Duration::days(7);
                date >= start && date <= start + Duration::days(6)
            }
            DateRange::Month => date.year() == today.year() && date.month() == today.month(),
            DateRange::Overdue => date < today && !completed,
            DateRange::Custom => match self.custom {
                Some(CustomRange {
                    start: Some(start),
                    end: Some(end),
                }) => date >= start && date <= end,
                _ => false,
            },
        }
    }
}

/// Sunday of the week containing `day`.
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    day - Duration::days(i64::from(day.weekday().num_days_from_sunday()))
}

/// Parses a date as the backend sends it.
///
/// Accepts a plain `YYYY-MM-DD` day or an RFC 3339 timestamp. Timestamps are
/// converted to local time and truncated to the day. Anything else yields
/// `None`, which the classifier treats as "no date".
pub fn parse_item_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(day);
    }

    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Local).date_naive())
}

/// The current calendar day in local time.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn filter(range: DateRange) -> DateRangeFilter {
        DateRangeFilter::new(range, None)
    }

    // 2024-06-12 is a Wednesday; its week runs Sun 06-09 .. Sat 06-15.
    const TODAY: (i32, u32, u32) = (2024, 6, 12);

    fn today() -> NaiveDate {
        day(TODAY.0, TODAY.1, TODAY.2)
    }

    #[test]
    fn test_all_matches_everything_including_missing_dates() {
        let all = filter(DateRange::All);
        assert!(all.matches(None, false, today()));
        assert!(all.matches(Some(day(1999, 1, 1)), true, today()));
    }

    #[test]
    fn test_missing_date_matches_no_specific_range() {
        for range in [
            DateRange::Today,
            DateRange::Tomorrow,
            DateRange::ThisWeek,
            DateRange::NextWeek,
            DateRange::Month,
            DateRange::Overdue,
            DateRange::Custom,
        ] {
            assert!(!filter(range).matches(None, false, today()), "{:?}", range);
        }
    }

    #[test]
    fn test_today_and_tomorrow() {
        assert!(filter(DateRange::Today).matches(Some(today()), false, today()));
        assert!(!filter(DateRange::Today).matches(Some(day(2024, 6, 13)), false, today()));
        assert!(filter(DateRange::Tomorrow).matches(Some(day(2024, 6, 13)), false, today()));
        assert!(!filter(DateRange::Tomorrow).matches(Some(today()), false, today()));
    }

    #[test]
    fn test_week_starts_on_sunday() {
        assert_eq!(start_of_week(today()), day(2024, 6, 9));
        assert_eq!(start_of_week(day(2024, 6, 9)), day(2024, 6, 9));
        assert_eq!(start_of_week(day(2024, 6, 15)), day(2024, 6, 9));
    }

    #[test]
    fn test_this_week_and_next_week_windows() {
        let this_week = filter(DateRange::ThisWeek);
        let next_week = filter(DateRange::NextWeek);

        assert!(this_week.matches(Some(day(2024, 6, 9)), false, today()));
        assert!(this_week.matches(Some(day(2024, 6, 15)), false, today()));
        assert!(!this_week.matches(Some(day(2024, 6, 16)), false, today()));
        assert!(!this_week.matches(Some(day(2024, 6, 8)), false, today()));

        assert!(next_week.matches(Some(day(2024, 6, 16)), false, today()));
        assert!(next_week.matches(Some(day(2024, 6, 22)), false, today()));
        assert!(!next_week.matches(Some(day(2024, 6, 23)), false, today()));
        assert!(!next_week.matches(Some(day(2024, 6, 15)), false, today()));
    }

    #[test]
    fn test_buckets_are_disjoint_midweek() {
        let buckets = [
            DateRange::Today,
            DateRange::Tomorrow,
            DateRange::NextWeek,
        ];
        // Today and tomorrow are inside this week, so this week is checked separately.
        for offset in -10..20 {
            let date = today() + Duration::days(offset);
            let hits = buckets
                .iter()
                .filter(|range| filter(**range).matches(Some(date), false, today()))
                .count();
            assert!(hits <= 1, "{} matched {} buckets", date, hits);
        }
    }

    #[test]
    fn test_saturday_tomorrow_belongs_to_next_week() {
        // When today is the last day of the week, tomorrow is already next week.
        let saturday = day(2024, 6, 15);
        let sunday = day(2024, 6, 16);

        assert!(filter(DateRange::Tomorrow).matches(Some(sunday), false, saturday));
        assert!(!filter(DateRange::ThisWeek).matches(Some(sunday), false, saturday));
        assert!(filter(DateRange::NextWeek).matches(Some(sunday), false, saturday));
    }

    #[test]
    fn test_month_matches_same_calendar_month_only() {
        let month = filter(DateRange::Month);
        assert!(month.matches(Some(day(2024, 6, 1)), false, today()));
        assert!(month.matches(Some(day(2024, 6, 30)), false, today()));
        assert!(!month.matches(Some(day(2024, 7, 1)), false, today()));
        assert!(!month.matches(Some(day(2023, 6, 12)), false, today()));
    }

    #[test]
    fn test_overdue_excludes_completed_items() {
        let overdue = filter(DateRange::Overdue);
        let yesterday = day(2024, 6, 11);

        assert!(overdue.matches(Some(yesterday), false, today()));
        assert!(!overdue.matches(Some(yesterday), true, today()));
        assert!(!overdue.matches(Some(today()), false, today()));
    }

    #[test]
    fn test_custom_range_is_inclusive() {
        let custom = DateRangeFilter::new(
            DateRange::Custom,
            Some(CustomRange {
                start: Some(day(2024, 6, 1)),
                end: Some(day(2024, 6, 10)),
            }),
        );

        assert!(custom.matches(Some(day(2024, 6, 1)), false, today()));
        assert!(custom.matches(Some(day(2024, 6, 10)), false, today()));
        assert!(!custom.matches(Some(day(2024, 5, 31)), false, today()));
        assert!(!custom.matches(Some(day(2024, 6, 11)), false, today()));
    }

    #[test]
    fn test_custom_range_needs_both_bounds() {
        let half_open = DateRangeFilter::new(
            DateRange::Custom,
            Some(CustomRange {
                start: Some(day(2024, 6, 1)),
                end: None,
            }),
        );
        assert!(!half_open.matches(Some(day(2024, 6, 5)), false, today()));
        assert!(!filter(DateRange::Custom).matches(Some(today()), false, today()));
    }

    #[test]
    fn test_custom_bounds_are_ignored_for_other_ranges() {
        let today_with_bounds = DateRangeFilter::new(
            DateRange::Today,
            Some(CustomRange {
                start: Some(day(2020, 1, 1)),
                end: Some(day(2020, 1, 2)),
            }),
        );
        assert!(today_with_bounds.matches(Some(today()), false, today()));
    }

    #[test]
    fn test_parse_item_date() {
        assert_eq!(parse_item_date("2024-06-10"), Some(day(2024, 6, 10)));
        assert_eq!(parse_item_date(" 2024-06-10 "), Some(day(2024, 6, 10)));
        assert_eq!(parse_item_date(""), None);
        assert_eq!(parse_item_date("10/06/2024"), None);
        assert_eq!(parse_item_date("2024-13-40"), None);

        // Timestamps are truncated to the local calendar day.
        let local_noon = Local::now()
            .date_naive()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_local_timezone(Local)
            .unwrap();
        assert_eq!(
            parse_item_date(&local_noon.to_rfc3339()),
            Some(local_noon.date_naive())
        );
    }

    #[test]
    fn test_date_range_serde_names() {
        let json = serde_json::to_string(&DateRange::ThisWeek).unwrap();
        assert_eq!(json, "\"thisWeek\"");
        let range: DateRange = serde_json::from_str("\"nextWeek\"").unwrap();
        assert_eq!(range, DateRange::NextWeek);
    }
}
