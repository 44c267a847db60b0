//! Display formatting for amounts, dates, and text.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

use crate::Error;

/// The date format used for display, e.g. "13/11/2024".
pub const DATE_DISPLAY_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day]/[month]/[year]");

/// The date format used by date input fields, e.g. "2024-11-13".
pub const DATE_INPUT_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The number of graphemes kept by default when truncating text for display.
pub const DEFAULT_TRUNCATE_GRAPHEMES: usize = 50;

/// Format an amount of money as a dollar string with thousands separators and
/// exactly two decimal places, e.g. `-1234.5` becomes `"-$1,234.50"`.
pub fn format_currency(amount: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if amount < 0.0 {
        negative_fmt.fmt_string(amount.abs())
    } else if amount > 0.0 {
        positive_fmt.fmt_string(amount)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    };

    // numfmt omits trailing zeros, so "12.30" is rendered as "12.3" and
    // "12.00" as "12". Pad the decimals back to two places.
    match formatted_string.rfind('.') {
        None => formatted_string.push_str(".00"),
        Some(index) if formatted_string.len() - index == 2 => formatted_string.push('0'),
        Some(_) => {}
    }

    formatted_string
}

/// Format a date for display using the default "dd/MM/yyyy" pattern.
///
/// `None` renders as the empty string.
pub fn format_date(date: Option<Date>) -> String {
    format_date_with(date, DATE_DISPLAY_FORMAT)
}

/// Format a date using a caller-supplied format description.
///
/// `None` and formatting failures both render as the empty string rather
/// than surfacing an error to display code.
pub fn format_date_with(date: Option<Date>, format: &[BorrowedFormatItem]) -> String {
    date.and_then(|date| date.format(format).ok())
        .unwrap_or_default()
}

/// Format a date as "yyyy-MM-dd" for filling date input fields.
pub fn format_date_for_input(date: Option<Date>) -> String {
    format_date_with(date, DATE_INPUT_FORMAT)
}

/// Parse a "yyyy-MM-dd" string produced by a date input field.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] if the string is not a valid date in that
/// format.
pub fn parse_input_date(input: &str) -> Result<Date, Error> {
    Date::parse(input, DATE_INPUT_FORMAT).map_err(|_| Error::InvalidDate(input.to_owned()))
}

/// Describe how long ago a date was in words, e.g. "today", "yesterday",
/// "3 days ago", "2 weeks ago".
///
/// The unit is chosen from the whole-day difference between `today` and
/// `date` with truncating division: under a week counts days, under 30 days
/// counts weeks, under a year counts months (of 30 days), and anything
/// longer counts years (of 365 days). Dates on or after `today` render as
/// "today" and `None` renders as the empty string.
pub fn format_relative_date(date: Option<Date>, today: Date) -> String {
    let Some(date) = date else {
        return String::new();
    };

    let days = (today - date).whole_days();

    if days <= 0 {
        "today".to_owned()
    } else if days == 1 {
        "yesterday".to_owned()
    } else if days < 7 {
        format!("{days} days ago")
    } else if days < 30 {
        ago(days / 7, "week")
    } else if days < 365 {
        ago(days / 30, "month")
    } else {
        ago(days / 365, "year")
    }
}

fn ago(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Uppercase the first character of `text` and lowercase the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Shorten `text` to at most `max_graphemes` graphemes, appending "..." when
/// anything was cut off.
pub fn truncate(text: &str, max_graphemes: usize) -> String {
    if text.graphemes(true).count() <= max_graphemes {
        text.to_owned()
    } else {
        let truncated: String = text.graphemes(true).take(max_graphemes).collect();
        truncated + "..."
    }
}
