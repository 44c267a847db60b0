//! Grouping of fetched transactions into calendar-day buckets.

use std::collections::HashMap;

use time::Date;

use super::models::Transaction;

/// The transactions that occurred on one calendar day.
#[derive(Debug, PartialEq)]
pub struct DayGroup<'a> {
    /// The day the transactions occurred on.
    pub date: Date,
    /// The transactions for that day, in the order they were fetched.
    pub transactions: Vec<&'a Transaction>,
}

/// Group transactions by the calendar day they occurred on.
///
/// Time-of-day is already dropped when transaction dates are decoded, so
/// transactions from the same day always share a bucket, and within each
/// bucket the fetched order is preserved. The map makes no ordering
/// guarantee across days; use [day_groups_newest_first] for the ordered
/// view.
pub fn group_by_date(transactions: &[Transaction]) -> HashMap<Date, Vec<&Transaction>> {
    let mut groups: HashMap<Date, Vec<&Transaction>> = HashMap::new();

    for transaction in transactions {
        groups
            .entry(transaction.transaction_date)
            .or_default()
            .push(transaction);
    }

    groups
}

/// Group transactions by day and order the days newest first.
pub fn day_groups_newest_first(transactions: &[Transaction]) -> Vec<DayGroup<'_>> {
    let mut days: Vec<DayGroup> = group_by_date(transactions)
        .into_iter()
        .map(|(date, transactions)| DayGroup { date, transactions })
        .collect();

    days.sort_by(|a, b| b.date.cmp(&a.date));

    days
}
