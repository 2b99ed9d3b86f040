//! Standard date windows for the overview report.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// An inclusive date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day, inclusive.
    pub from: NaiveDate,
    /// Last day, inclusive.
    pub to: NaiveDate,
}

impl DateWindow {
    /// The single-day window containing `today`.
    #[must_use]
    pub const fn today(today: NaiveDate) -> Self {
        Self {
            from: today,
            to: today,
        }
    }

    /// Monday of the current week through `today`.
    #[must_use]
    pub fn this_week(today: NaiveDate) -> Self {
        let days_from_monday = i64::from(today.weekday().num_days_from_monday());
        let monday = today - chrono::Duration::days(days_from_monday);
        Self {
            from: monday,
            to: today,
        }
    }

    /// First of the current month through `today`.
    #[must_use]
    pub fn this_month(today: NaiveDate) -> Self {
        let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
        Self {
            from: first,
            to: today,
        }
    }

    /// January 1st of the current year through `today`.
    #[must_use]
    pub fn this_year(today: NaiveDate) -> Self {
        let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
        Self {
            from: first,
            to: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_today_window() {
        let w = DateWindow::today(date(2026, 8, 30));
        assert_eq!(w.from, w.to);
    }

    #[test]
    fn test_week_starts_monday() {
        // 2026-08-30 is a Sunday
        let w = DateWindow::this_week(date(2026, 8, 30));
        assert_eq!(w.from, date(2026, 8, 24));
        assert_eq!(w.to, date(2026, 8, 30));

        // A Monday is its own week start
        let w = DateWindow::this_week(date(2026, 8, 24));
        assert_eq!(w.from, date(2026, 8, 24));
    }

    #[test]
    fn test_week_can_cross_month_boundary() {
        // 2026-09-02 is a Wednesday; the week began Monday 8/31
        let w = DateWindow::this_week(date(2026, 9, 2));
        assert_eq!(w.from, date(2026, 8, 31));
    }

    #[test]
    fn test_month_window() {
        let w = DateWindow::this_month(date(2026, 2, 17));
        assert_eq!(w.from, date(2026, 2, 1));
        assert_eq!(w.to, date(2026, 2, 17));
    }

    #[test]
    fn test_year_window() {
        let w = DateWindow::this_year(date(2026, 8, 30));
        assert_eq!(w.from, date(2026, 1, 1));
        assert_eq!(w.to, date(2026, 8, 30));
    }
}
