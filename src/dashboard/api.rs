//! API calls for the dashboard aggregates.

use crate::{ApiClient, DateRange, Error, endpoints};

use super::{CategorySpending, Totals, models::CategorySpendingPayload};

impl ApiClient {
    /// Get the income and spending totals for `range`.
    ///
    /// # Errors
    ///
    /// Returns an [Error] when the request fails or the response cannot be
    /// decoded.
    pub async fn totals(&self, range: DateRange) -> Result<Totals, Error> {
        self.fetch_json(self.get(endpoints::TRANSACTION_TOTALS).query(&range))
            .await
    }

    /// Get the spending breakdown by category for `range`.
    ///
    /// The rows are normalized regardless of which wire shape the server
    /// answers with: amounts are absolute and every row carries a
    /// percentage.
    ///
    /// # Errors
    ///
    /// Returns an [Error] when the request fails or the response cannot be
    /// decoded.
    pub async fn expenses_by_category(
        &self,
        range: DateRange,
    ) -> Result<Vec<CategorySpending>, Error> {
        let payload: CategorySpendingPayload = self
            .fetch_json(self.get(endpoints::EXPENSES_BY_CATEGORY).query(&range))
            .await?;

        Ok(payload.normalize())
    }
}
