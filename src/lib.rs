//! Outgo is the client core of a personal finance tracker.
//!
//! The library resolves date-range filters against the local calendar,
//! formats amounts and dates for display, groups transactions for rendering,
//! and exposes typed, stateful access to the tracker's REST API so a UI
//! layer only has to draw what the view models hold.
#![warn(missing_docs)]

mod category;
mod client;
mod config;
mod dashboard;
mod endpoints;
mod format;
mod pagination;
mod range;
mod timezone;
mod transaction;

pub use category::{CategoriesViewModel, Category, CategoryId};
pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, DEFAULT_USER_ID};
pub use dashboard::{CategorySpending, DashboardViewModel, Totals, percentage_of};
pub use format::{
    DATE_DISPLAY_FORMAT, DATE_INPUT_FORMAT, DEFAULT_TRUNCATE_GRAPHEMES, capitalize,
    format_currency, format_date, format_date_for_input, format_date_with, format_relative_date,
    parse_input_date, truncate,
};
pub use pagination::{DEFAULT_PAGE_SIZE, ListQuery, Page, PageInfo, SortDirection, SortField};
pub use range::{DateRange, RangeSelector, compute_range};
pub use timezone::{get_local_offset, local_today};
pub use transaction::{
    DayGroup, NewTransaction, PaymentMethod, Transaction, TransactionId, TransactionType,
    TransactionsViewModel, UpdateTransaction, amount_value_is_valid, day_groups_newest_first,
    group_by_date, is_valid_amount, normalize_amount,
};

/// The errors that API calls and view models surface to the UI.
///
/// The [std::fmt::Display] impl renders the message the UI should show, so
/// callers can print an error without matching on it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The server could not be reached at all, including timeouts.
    #[error("Could not reach the server. Check your connection.")]
    Network(String),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api {
        /// The HTTP status code the server answered with.
        status: u16,
        /// The user-facing message, either the server's own or a fallback
        /// matched to the status class.
        message: String,
        /// Field-level validation messages, if the server sent any.
        details: Vec<String>,
    },

    /// The server answered with a body this client could not decode.
    #[error("The server sent a response this app could not read.")]
    Decode(String),

    /// The client configuration is unusable.
    #[error("Invalid client configuration: {0}")]
    Config(String),

    /// A date string was not in the `yyyy-MM-dd` input format.
    #[error("{0} is not a valid date")]
    InvalidDate(String),
}

impl Error {
    /// The field-level validation messages attached to the error, if any.
    pub fn validation_details(&self) -> &[String] {
        match self {
            Error::Api { details, .. } => details,
            _ => &[],
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            tracing::error!("could not decode response body: {error}");

            Error::Decode(error.to_string())
        } else {
            tracing::error!("request did not complete: {error}");

            Error::Network(error.to_string())
        }
    }
}
