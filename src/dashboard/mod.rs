//! The dashboard summary: totals, spending by category, and recent
//! transactions for a date range.

mod api;
mod models;
mod viewmodel;

pub use models::{CategorySpending, Totals, percentage_of};
pub use viewmodel::DashboardViewModel;
