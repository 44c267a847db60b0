//! Aggregate models for the dashboard summary cards.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Income and spending totals for one date range.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Totals {
    /// The sum of income in the range.
    pub total_income: f64,
    /// The sum of spending in the range, as a positive magnitude.
    pub total_expenses: f64,
    /// Income minus expenses.
    pub balance: f64,
}

/// How much was spent in one category, as a share of the range's spending.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySpending {
    /// The display name of the category.
    pub category_name: String,
    /// The amount spent in the category, as a positive magnitude.
    pub total_amount: f64,
    /// The category's share of all spending in the range, as a percentage
    /// rounded to one decimal place.
    pub percentage: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpendingEntry {
    category_name: String,
    total_amount: f64,
    #[serde(default)]
    percentage: Option<f64>,
}

/// The two shapes the by-category endpoint has answered with.
///
/// Older backends sent a plain name-to-amount map; newer ones send a list
/// of entries that may already carry percentages. Either way the payload
/// is collapsed to [CategorySpending] rows before it leaves the API layer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CategorySpendingPayload {
    Entries(Vec<SpendingEntry>),
    Amounts(BTreeMap<String, f64>),
}

impl CategorySpendingPayload {
    /// Collapse either wire shape into the canonical breakdown.
    ///
    /// Amounts are made absolute. Percentages the server sent are kept;
    /// missing ones are computed from the sum of absolute amounts.
    pub(crate) fn normalize(self) -> Vec<CategorySpending> {
        match self {
            Self::Entries(entries) => {
                let total: f64 = entries.iter().map(|entry| entry.total_amount.abs()).sum();

                entries
                    .into_iter()
                    .map(|entry| {
                        let total_amount = entry.total_amount.abs();

                        CategorySpending {
                            category_name: entry.category_name,
                            total_amount,
                            percentage: entry
                                .percentage
                                .unwrap_or_else(|| percentage_of(total_amount, total)),
                        }
                    })
                    .collect()
            }
            Self::Amounts(amounts) => {
                let total: f64 = amounts.values().map(|amount| amount.abs()).sum();

                amounts
                    .into_iter()
                    .map(|(category_name, amount)| {
                        let total_amount = amount.abs();

                        CategorySpending {
                            category_name,
                            total_amount,
                            percentage: percentage_of(total_amount, total),
                        }
                    })
                    .collect()
            }
        }
    }
}

/// The share `value` makes up of `total`, as a percentage rounded to one
/// decimal place.
///
/// Returns 0.0 when `total` is zero or not finite, so an empty range
/// charts as empty instead of NaN.
pub fn percentage_of(value: f64, total: f64) -> f64 {
    if total == 0.0 || !total.is_finite() {
        return 0.0;
    }

    let percentage = value / total * 100.0;

    (percentage * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CategorySpending, CategorySpendingPayload, Totals, percentage_of};

    #[test]
    fn percentages_round_to_one_decimal_place() {
        assert_eq!(percentage_of(1.0, 3.0), 33.3);
        assert_eq!(percentage_of(1.0, 7.0), 14.3);
        assert_eq!(percentage_of(50.0, 200.0), 25.0);
    }

    #[test]
    fn zero_or_unusable_totals_chart_as_zero() {
        assert_eq!(percentage_of(10.0, 0.0), 0.0);
        assert_eq!(percentage_of(10.0, f64::NAN), 0.0);
        assert_eq!(percentage_of(10.0, f64::INFINITY), 0.0);
    }

    #[test]
    fn totals_default_to_zero_when_fields_are_missing() {
        let got: Totals = serde_json::from_str(r#"{"totalIncome": 2500.0}"#)
            .expect("should deserialize totals");

        assert_eq!(got.total_income, 2500.0);
        assert_eq!(got.total_expenses, 0.0);
        assert_eq!(got.balance, 0.0);
    }

    #[test]
    fn entry_shaped_payloads_keep_server_percentages() {
        let payload: CategorySpendingPayload = serde_json::from_value(json!([
            {"categoryName": "Groceries", "totalAmount": -120.0, "percentage": 19.9},
            {"categoryName": "Rent", "totalAmount": 480.0},
        ]))
        .expect("should deserialize entries");

        let got = payload.normalize();

        let want = vec![
            CategorySpending {
                category_name: "Groceries".to_owned(),
                total_amount: 120.0,
                percentage: 19.9,
            },
            CategorySpending {
                category_name: "Rent".to_owned(),
                total_amount: 480.0,
                percentage: 80.0,
            },
        ];
        assert_eq!(got, want, "got {got:?}, want {want:?}");
    }

    #[test]
    fn map_shaped_payloads_compute_every_percentage() {
        let payload: CategorySpendingPayload = serde_json::from_value(json!({
            "Groceries": -120.0,
            "Rent": 480.0,
        }))
        .expect("should deserialize amounts");

        let got = payload.normalize();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0].category_name, "Groceries");
        assert_eq!(got[0].total_amount, 120.0);
        assert_eq!(got[0].percentage, 20.0);
        assert_eq!(got[1].percentage, 80.0);
    }

    #[test]
    fn empty_payloads_normalize_to_an_empty_breakdown() {
        let payload: CategorySpendingPayload =
            serde_json::from_value(json!([])).expect("should deserialize an empty list");

        assert!(payload.normalize().is_empty());
    }
}
