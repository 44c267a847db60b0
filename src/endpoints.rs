//! The expense API endpoint paths, relative to the configured base URL.
//!
//! For endpoints that take a parameter, e.g., '/transactions/{transaction_id}',
//! use [format_endpoint].

/// The route to list transactions a page at a time.
pub const TRANSACTIONS: &str = "/transactions";
/// The route to access a single transaction.
pub const TRANSACTION: &str = "/transactions/{transaction_id}";
/// The route to list transactions within a date range.
pub const TRANSACTIONS_BY_DATE_RANGE: &str = "/transactions/date-range";
/// The route for income, expense, and balance totals over a date range.
pub const TRANSACTION_TOTALS: &str = "/transactions/summary/totals";
/// The route for expense totals grouped by category over a date range.
pub const EXPENSES_BY_CATEGORY: &str = "/transactions/summary/by-category";
/// The route to list all categories.
pub const CATEGORIES: &str = "/categories";
/// The route to access a single category.
pub const CATEGORY: &str = "/categories/{category_id}";
/// The route for checking that the API is reachable.
pub const PING: &str = "/health/ping";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace. For
/// example, in the endpoint path '/categories/{category_id}',
/// '{category_id}' is the parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_string();
    };
    let param_end = endpoint_path[param_start..]
        .find('}')
        .map(|offset| param_start + offset + 1)
        .unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}
