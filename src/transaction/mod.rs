//! Transactions and the stateful list the UI pages through.

mod amount;
mod api;
mod grouping;
mod models;
mod viewmodel;

pub use amount::{amount_value_is_valid, is_valid_amount, normalize_amount};
pub use grouping::{DayGroup, day_groups_newest_first, group_by_date};
pub use models::{
    NewTransaction, PaymentMethod, Transaction, TransactionId, TransactionType, UpdateTransaction,
};
pub use viewmodel::TransactionsViewModel;
