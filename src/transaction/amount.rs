//! Validation and normalization of user-entered amounts.

use super::models::TransactionType;

/// Whether a raw amount string from a form field is a usable amount.
///
/// The string must parse as a finite number strictly greater than zero.
pub fn is_valid_amount(input: &str) -> bool {
    input
        .trim()
        .parse::<f64>()
        .is_ok_and(amount_value_is_valid)
}

/// Whether an already-parsed amount is usable: finite and strictly greater
/// than zero.
pub fn amount_value_is_valid(amount: f64) -> bool {
    amount.is_finite() && amount > 0.0
}

/// The amount to submit for a transaction: always the absolute value.
///
/// The API derives the stored sign from the transaction type, so an expense
/// entered as `-50` and one entered as `50` submit the same magnitude. The
/// type parameter matches the submission call sites but does not change the
/// result.
pub fn normalize_amount(amount: f64, _transaction_type: TransactionType) -> f64 {
    amount.abs()
}
