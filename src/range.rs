//! Resolution of symbolic date-range selectors into concrete date bounds.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

/// The symbolic date ranges offered by the transaction and dashboard filters.
///
/// Selectors deserialize from the camelCase tokens used in query strings and
/// stored filter state (`"today"`, `"thisWeek"`, and so on). Tokens that do
/// not match a known selector deserialize as [`RangeSelector::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeSelector {
    /// The current day.
    Today,
    /// Monday through Sunday of the current week.
    ThisWeek,
    /// The current calendar month.
    ThisMonth,
    /// The previous calendar month.
    LastMonth,
    /// January 1 through December 31 of the current year.
    ThisYear,
    /// A caller-supplied pair of dates.
    ///
    /// `Custom` carries no dates of its own, so [`compute_range`] resolves it
    /// (and any unrecognized token) to the bounds of the current month.
    #[serde(other)]
    Custom,
}

impl RangeSelector {
    /// The selector used when the caller does not specify one.
    pub fn default_selector() -> Self {
        Self::ThisMonth
    }

    /// Parse a selector token, mapping anything unrecognized to `Custom`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "today" => Self::Today,
            "thisWeek" => Self::ThisWeek,
            "thisMonth" => Self::ThisMonth,
            "lastMonth" => Self::LastMonth,
            "thisYear" => Self::ThisYear,
            _ => Self::Custom,
        }
    }

    /// The token used for this selector in query strings and stored state.
    pub fn as_token(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::ThisWeek => "thisWeek",
            Self::ThisMonth => "thisMonth",
            Self::LastMonth => "lastMonth",
            Self::ThisYear => "thisYear",
            Self::Custom => "custom",
        }
    }

    /// The label shown for this selector in range filter controls.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::ThisWeek => "This Week",
            Self::ThisMonth => "This Month",
            Self::LastMonth => "Last Month",
            Self::ThisYear => "This Year",
            Self::Custom => "Custom Range",
        }
    }
}

/// An inclusive range of calendar dates.
///
/// Serializes with the `startDate`/`endDate` names that the API's
/// by-date-range queries expect, so a range can be appended to a request's
/// query string as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// The first date in the range.
    #[serde(rename = "startDate")]
    pub start: Date,
    /// The last date in the range.
    #[serde(rename = "endDate")]
    pub end: Date,
}

impl DateRange {
    /// Resolve `selector` against `today`.
    ///
    /// Convenience wrapper around [`compute_range`].
    pub fn for_selector(selector: RangeSelector, today: Date) -> Self {
        compute_range(selector, today)
    }
}

/// Compute the date bounds for `selector`, anchored on `today`.
///
/// The result is inclusive at both ends and `start <= end` always holds.
/// `Custom` resolves to the current month: custom selectors carry their
/// dates out of band, so a bare `Custom` (or an unrecognized token that
/// deserialized to it) silently degrades to the `ThisMonth` bounds.
pub fn compute_range(selector: RangeSelector, today: Date) -> DateRange {
    match selector {
        RangeSelector::Today => DateRange {
            start: today,
            end: today,
        },
        RangeSelector::ThisWeek => week_bounds(today),
        RangeSelector::ThisMonth | RangeSelector::Custom => {
            month_bounds(today.year(), today.month())
        }
        RangeSelector::LastMonth => {
            let (year, month) = previous_month(today.year(), today.month());
            month_bounds(year, month)
        }
        RangeSelector::ThisYear => year_bounds(today.year()),
    }
}

fn week_bounds(anchor_date: Date) -> DateRange {
    let weekday_number = anchor_date.weekday().number_from_monday() as i64;
    let start = anchor_date - Duration::days(weekday_number - 1);
    let end = start + Duration::days(6);

    DateRange { start, end }
}

fn month_bounds(year: i32, month: Month) -> DateRange {
    let start = Date::from_calendar_date(year, month, 1).expect("invalid month start date");
    let end = Date::from_calendar_date(year, month, last_day_of_month(year, month))
        .expect("invalid month end date");

    DateRange { start, end }
}

fn year_bounds(year: i32) -> DateRange {
    DateRange {
        start: Date::from_calendar_date(year, Month::January, 1).expect("invalid year start date"),
        end: Date::from_calendar_date(year, Month::December, 31).expect("invalid year end date"),
    }
}

fn previous_month(year: i32, month: Month) -> (i32, Month) {
    match month {
        Month::January => (year - 1, Month::December),
        month => (year, month.previous()),
    }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
