//! Data models for transactions as the expense API represents them.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::category::CategoryId;

/// The ID of a transaction.
pub type TransactionId = i64;

/// Whether a transaction brings money in or spends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Money coming in, e.g. salary.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The label displayed for this transaction type.
    pub fn label(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

/// How a transaction was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Paid with physical cash.
    Cash,
    /// Paid by debit or credit card.
    Card,
    /// Paid by bank transfer.
    Transfer,
    /// Any other payment method.
    Other,
}

impl PaymentMethod {
    /// The label displayed for this payment method.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Transfer => "Transfer",
            Self::Other => "Other",
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or
/// earned, as returned by the expense API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    ///
    /// The API has sent this both as a plain date and as a datetime; either
    /// way only the calendar date is kept.
    #[serde(with = "transaction_date")]
    pub transaction_date: Date,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
    /// How the transaction was paid.
    pub payment_method: PaymentMethod,
    /// Free-form notes attached to the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// The ID of the category the transaction belongs to.
    pub category_id: CategoryId,
    /// The display name of the category, when the API includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    /// The icon token of the category, when the API includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_icon: Option<String>,
    /// The accent color of the category, when the API includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_color: Option<String>,
    /// False once the transaction has been soft-deleted.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// The payload for creating a transaction.
///
/// The API requires an amount of at least 0.01 with at most two decimal
/// places, a description of at most 255 characters, and a transaction date
/// that is not in the future.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The magnitude of the transaction.
    ///
    /// Submit the absolute value; the stored sign follows the transaction
    /// type.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The ID of the category to file the transaction under.
    pub category_id: CategoryId,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
    /// How the transaction was paid.
    pub payment_method: PaymentMethod,
    /// When the transaction happened.
    #[serde(with = "transaction_date")]
    pub transaction_date: Date,
    /// Free-form notes to attach to the transaction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The payload for updating a transaction.
///
/// Every field is optional; fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransaction {
    /// A replacement amount.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    /// A replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// A replacement category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    /// A replacement transaction type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    /// A replacement payment method.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// A replacement transaction date.
    #[serde(skip_serializing_if = "Option::is_none", with = "transaction_date::option")]
    pub transaction_date: Option<Date>,
    /// Replacement notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Serde helpers for transaction dates.
///
/// The API sends `transactionDate` either as "2024-11-13" or as
/// "2024-11-13T10:30:00"; decoding keeps only the calendar date. Dates are
/// always encoded in the plain form.
mod transaction_date {
    use serde::{Deserialize, Deserializer, Serializer, de};
    use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

    const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted = date.format(DATE_FORMAT).map_err(serde::ser::Error::custom)?;

        serializer.serialize_str(&formatted)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let date_part = match raw.split_once('T') {
            Some((date_part, _)) => date_part,
            None => raw.as_str(),
        };

        Date::parse(date_part, DATE_FORMAT)
            .map_err(|_| de::Error::custom(format!("invalid transaction date {raw:?}")))
    }

    pub mod option {
        use serde::Serializer;
        use time::Date;

        pub fn serialize<S: Serializer>(
            date: &Option<Date>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}
