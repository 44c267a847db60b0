//! API calls for reading and writing transactions.

use crate::{ApiClient, DateRange, Error, ListQuery, Page, endpoints};

use super::{NewTransaction, Transaction, TransactionId, UpdateTransaction};

impl ApiClient {
    /// Get one page of the user's transactions.
    ///
    /// # Errors
    ///
    /// Returns an [Error] when the request fails or the response cannot be
    /// decoded.
    pub async fn transactions(&self, query: &ListQuery) -> Result<Page<Transaction>, Error> {
        self.fetch_json(self.get(endpoints::TRANSACTIONS).query(query))
            .await
    }

    /// Get one page of the transactions dated within `range`.
    ///
    /// Both bounds are inclusive and sent as `yyyy-MM-dd`.
    ///
    /// # Errors
    ///
    /// Returns an [Error] when the request fails or the response cannot be
    /// decoded.
    pub async fn transactions_in_range(
        &self,
        range: DateRange,
        query: &ListQuery,
    ) -> Result<Page<Transaction>, Error> {
        self.fetch_json(
            self.get(endpoints::TRANSACTIONS_BY_DATE_RANGE)
                .query(&range)
                .query(query),
        )
        .await
    }

    /// Get the transaction with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] with a 404 status when no such transaction
    /// exists.
    pub async fn transaction(&self, id: TransactionId) -> Result<Transaction, Error> {
        let path = endpoints::format_endpoint(endpoints::TRANSACTION, id);

        self.fetch_json(self.get(&path)).await
    }

    /// Get the first page of the user's transactions, newest first, sized
    /// to `limit`.
    ///
    /// # Errors
    ///
    /// Returns an [Error] when the request fails or the response cannot be
    /// decoded.
    pub async fn recent_transactions(&self, limit: u64) -> Result<Page<Transaction>, Error> {
        self.transactions(&ListQuery::for_page(0, limit)).await
    }

    /// Create `transaction` and return the stored copy.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] with a 400 or 422 status when the server
    /// rejects the payload. Validation messages are available through
    /// [Error::validation_details].
    pub async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, Error> {
        self.fetch_json(self.post(endpoints::TRANSACTIONS).json(transaction))
            .await
    }

    /// Apply `update` to the transaction with `id` and return the stored
    /// copy. Fields left as `None` keep their stored values.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] with a 404 status when no such transaction
    /// exists, or a 400 or 422 status when the server rejects the payload.
    pub async fn update_transaction(
        &self,
        id: TransactionId,
        update: &UpdateTransaction,
    ) -> Result<Transaction, Error> {
        let path = endpoints::format_endpoint(endpoints::TRANSACTION, id);

        self.fetch_json(self.put(&path).json(update)).await
    }

    /// Delete the transaction with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] with a 404 status when no such transaction
    /// exists.
    pub async fn delete_transaction(&self, id: TransactionId) -> Result<(), Error> {
        let path = endpoints::format_endpoint(endpoints::TRANSACTION, id);

        self.execute(self.delete(&path)).await
    }
}
