//! Stateful pager over the transaction list.

use std::sync::{Arc, Mutex};

use time::Date;

use crate::{
    ApiClient, DateRange, Error, ListQuery, PageInfo, RangeSelector, range::compute_range,
};

use super::{NewTransaction, Transaction, TransactionId, UpdateTransaction};

#[derive(Debug)]
struct TransactionsState {
    transactions: Vec<Transaction>,
    page_info: PageInfo,
    range: DateRange,
    selector: RangeSelector,
    loading: bool,
    error: Option<Error>,
    fetch_seq: u64,
}

/// Holds one page of transactions filtered to an inclusive date range.
///
/// The view model never patches rows locally: every mutation goes to the
/// API and the current page is refetched so the list always shows server
/// order. Reads and writes both flag [TransactionsViewModel::is_loading]
/// for as long as they are in flight. Failed reads keep the previously
/// loaded page and record the error. When fetches overlap, the newest one
/// wins; results of superseded fetches are discarded.
///
/// Cloning is cheap and clones share state, so one instance can be polled
/// by the UI while another drives fetches.
#[derive(Debug, Clone)]
pub struct TransactionsViewModel {
    api: ApiClient,
    state: Arc<Mutex<TransactionsState>>,
}

impl TransactionsViewModel {
    /// Create a view model filtered to `range`.
    ///
    /// Nothing is fetched until the first call to
    /// [TransactionsViewModel::refresh].
    pub fn new(api: ApiClient, range: DateRange) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(TransactionsState {
                transactions: Vec::new(),
                page_info: PageInfo::default(),
                range,
                selector: RangeSelector::Custom,
                loading: false,
                error: None,
                fetch_seq: 0,
            })),
        }
    }

    /// Use `size` rows per page instead of the default.
    pub fn with_page_size(self, size: u64) -> Self {
        self.state.lock().unwrap().page_info = PageInfo::with_page_size(size);

        self
    }

    /// Fetch the current page of the current range.
    ///
    /// # Errors
    ///
    /// Returns the same [Error] it records in the state. The previously
    /// loaded page survives a failed refresh.
    pub async fn refresh(&self) -> Result<(), Error> {
        self.load().await
    }

    /// Filter to the inclusive range `start..=end` and fetch its first
    /// page.
    ///
    /// The bounds are forwarded to the backend as given, even when
    /// `start > end`; such a range simply comes back empty.
    ///
    /// # Errors
    ///
    /// Returns the same [Error] it records in the state.
    pub async fn set_date_range(&self, start: Date, end: Date) -> Result<(), Error> {
        {
            let mut state = self.state.lock().unwrap();
            state.range = DateRange { start, end };
            state.selector = RangeSelector::Custom;
            state.page_info.page = 0;
        }

        self.load().await
    }

    /// Filter to `selector` resolved against `today` and fetch the first
    /// page.
    ///
    /// # Errors
    ///
    /// Returns the same [Error] it records in the state.
    pub async fn set_range_selector(
        &self,
        selector: RangeSelector,
        today: Date,
    ) -> Result<(), Error> {
        {
            let mut state = self.state.lock().unwrap();
            state.range = compute_range(selector, today);
            state.selector = selector;
            state.page_info.page = 0;
        }

        self.load().await
    }

    /// Fetch `page` of the current range, keeping the page size.
    ///
    /// Requests for pages outside the loaded page count are ignored
    /// without a network call.
    ///
    /// # Errors
    ///
    /// Returns the same [Error] it records in the state.
    pub async fn change_page(&self, page: u64) -> Result<(), Error> {
        {
            let mut state = self.state.lock().unwrap();
            if !state.page_info.contains_page(page) {
                return Ok(());
            }
            state.page_info.page = page;
        }

        self.load().await
    }

    /// Create `transaction`, then refetch the current page so the new row
    /// appears in server order.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] when the server rejects the payload; the error
    /// is also recorded in the state and the page is not refetched.
    pub async fn create(&self, transaction: &NewTransaction) -> Result<Transaction, Error> {
        self.begin_mutation();

        let created = match self.api.create_transaction(transaction).await {
            Ok(created) => created,
            Err(error) => return Err(self.record(error)),
        };

        // A failed refetch lands in the error slot; the mutation stood.
        let _ = self.load().await;

        Ok(created)
    }

    /// Apply `update` to the transaction with `id`, then refetch the
    /// current page.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] when the server rejects the update; the error
    /// is also recorded in the state and the page is not refetched.
    pub async fn update(
        &self,
        id: TransactionId,
        update: &UpdateTransaction,
    ) -> Result<Transaction, Error> {
        self.begin_mutation();

        let updated = match self.api.update_transaction(id, update).await {
            Ok(updated) => updated,
            Err(error) => return Err(self.record(error)),
        };

        let _ = self.load().await;

        Ok(updated)
    }

    /// Delete the transaction with `id`, then refetch the current page.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] when the server rejects the delete; the error
    /// is also recorded in the state and the page is not refetched.
    pub async fn delete(&self, id: TransactionId) -> Result<(), Error> {
        self.begin_mutation();

        if let Err(error) = self.api.delete_transaction(id).await {
            return Err(self.record(error));
        }

        let _ = self.load().await;

        Ok(())
    }

    /// The rows of the current page, in the order the server returned
    /// them.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().transactions.clone()
    }

    /// The pagination state of the list.
    pub fn pagination(&self) -> PageInfo {
        self.state.lock().unwrap().page_info
    }

    /// The inclusive date range the list is filtered to.
    pub fn date_range(&self) -> DateRange {
        self.state.lock().unwrap().range
    }

    /// The selector behind the current range, [RangeSelector::Custom] for
    /// explicit bounds.
    pub fn range_selector(&self) -> RangeSelector {
        self.state.lock().unwrap().selector
    }

    /// Whether a fetch or mutation is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// The error recorded by the most recent failed call, if any.
    pub fn error(&self) -> Option<Error> {
        self.state.lock().unwrap().error.clone()
    }

    async fn load(&self) -> Result<(), Error> {
        let (sequence, range, query) = {
            let mut state = self.state.lock().unwrap();
            state.fetch_seq += 1;
            state.loading = true;
            state.error = None;

            (
                state.fetch_seq,
                state.range,
                ListQuery::for_page(state.page_info.page, state.page_info.size),
            )
        };

        let result = self.api.transactions_in_range(range, &query).await;

        let mut state = self.state.lock().unwrap();
        if state.fetch_seq != sequence {
            tracing::warn!("discarding transaction fetch {sequence}, a newer fetch owns the state");

            return Ok(());
        }
        state.loading = false;

        match result {
            Ok(page) => {
                // The page coordinate follows the request; the server is
                // trusted for the totals and, when it echoes one, the size.
                state.transactions = page.content;
                state.page_info.page = query.page;
                if page.size > 0 {
                    state.page_info.size = page.size;
                }
                state.page_info.total_elements = page.total_elements;
                state.page_info.total_pages = page.total_pages;

                Ok(())
            }
            Err(error) => {
                state.error = Some(error.clone());

                Err(error)
            }
        }
    }

    /// Flag the state as busy for the whole write-then-refetch round trip.
    ///
    /// The refetch sets the same flags again; [TransactionsViewModel::record]
    /// or the refetch commit clears them.
    fn begin_mutation(&self) {
        let mut state = self.state.lock().unwrap();
        state.loading = true;
        state.error = None;
    }

    fn record(&self, error: Error) -> Error {
        let mut state = self.state.lock().unwrap();
        state.loading = false;
        state.error = Some(error.clone());

        error
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    };

    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        routing::{get, post},
    };
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        ApiClient, ClientConfig, DateRange, Error, RangeSelector,
        transaction::{NewTransaction, PaymentMethod, TransactionType},
    };

    use super::TransactionsViewModel;

    async fn serve(router: Router) -> ApiClient {
        // Set RUST_LOG to see the client's request logs while debugging.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("should bind test listener");
        let address = listener.local_addr().expect("should read listener address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("test server should run");
        });

        ApiClient::new(&ClientConfig::new(
            format!("http://{address}/api/v1"),
            "1",
        ))
        .expect("should build test client")
    }

    fn november() -> DateRange {
        DateRange {
            start: date!(2024 - 11 - 01),
            end: date!(2024 - 11 - 30),
        }
    }

    fn transaction_row(id: i64, description: &str) -> Value {
        json!({
            "id": id,
            "amount": 42.5,
            "description": description,
            "transactionDate": "2024-11-13",
            "transactionType": "EXPENSE",
            "paymentMethod": "CARD",
            "categoryId": 3,
        })
    }

    fn page_of(rows: Vec<Value>) -> Value {
        let count = rows.len();

        json!({
            "content": rows,
            "page": 0,
            "size": 20,
            "totalElements": count,
            "totalPages": if count == 0 { 0 } else { 1 },
        })
    }

    fn new_transaction() -> NewTransaction {
        NewTransaction {
            amount: 42.5,
            description: "Weekly shop".to_owned(),
            category_id: 3,
            transaction_type: TransactionType::Expense,
            payment_method: PaymentMethod::Card,
            transaction_date: date!(2024 - 11 - 13),
            notes: None,
        }
    }

    #[tokio::test]
    async fn refresh_loads_the_current_page() {
        let router = Router::new().route(
            "/api/v1/transactions/date-range",
            get(|| async { Json(page_of(vec![transaction_row(1, "Weekly shop")])) }),
        );
        let view_model = TransactionsViewModel::new(serve(router).await, november());

        view_model.refresh().await.expect("refresh should succeed");

        let rows = view_model.transactions();
        assert_eq!(rows.len(), 1, "got {rows:?}, want one row");
        assert_eq!(rows[0].description, "Weekly shop");
        assert_eq!(view_model.pagination().total_elements, 1);
        assert!(!view_model.is_loading());
        assert_eq!(view_model.error(), None);
    }

    #[tokio::test]
    async fn create_refetches_the_page_from_the_server() {
        let rows = Arc::new(Mutex::new(vec![transaction_row(1, "Rent")]));
        let list_rows = rows.clone();
        let create_rows = rows.clone();
        let router = Router::new()
            .route(
                "/api/v1/transactions/date-range",
                get(move || {
                    let rows = list_rows.lock().unwrap().clone();

                    async move { Json(page_of(rows)) }
                }),
            )
            .route(
                "/api/v1/transactions",
                post(move |Json(_body): Json<Value>| {
                    let row = transaction_row(2, "Weekly shop");
                    create_rows.lock().unwrap().push(row.clone());

                    async move { (StatusCode::CREATED, Json(row)) }
                }),
            );
        let view_model = TransactionsViewModel::new(serve(router).await, november());

        view_model.refresh().await.expect("refresh should succeed");
        let created = view_model
            .create(&new_transaction())
            .await
            .expect("create should succeed");

        assert_eq!(created.id, 2);
        assert_eq!(
            view_model.transactions().len(),
            2,
            "the refetched page should show the new row"
        );
    }

    #[tokio::test]
    async fn the_first_create_fills_in_an_empty_page() {
        let rows = Arc::new(Mutex::new(Vec::new()));
        let list_rows = rows.clone();
        let create_rows = rows.clone();
        let router = Router::new()
            .route(
                "/api/v1/transactions/date-range",
                get(move || {
                    let rows = list_rows.lock().unwrap().clone();

                    async move { Json(page_of(rows)) }
                }),
            )
            .route(
                "/api/v1/transactions",
                post(move |Json(_body): Json<Value>| {
                    let row = transaction_row(1, "Weekly shop");
                    create_rows.lock().unwrap().push(row.clone());

                    async move { (StatusCode::CREATED, Json(row)) }
                }),
            );
        let view_model = TransactionsViewModel::new(serve(router).await, november());

        view_model.refresh().await.expect("refresh should succeed");

        let listed = view_model.transactions();
        assert!(listed.is_empty(), "got {listed:?}, want no rows");
        let before = view_model.pagination();
        assert_eq!(before.total_elements, 0, "got {}, want 0", before.total_elements);
        assert!(
            !before.contains_page(0),
            "an empty list should report no pages"
        );

        view_model
            .create(&new_transaction())
            .await
            .expect("create should succeed");

        let after = view_model.pagination();
        assert_eq!(after.total_elements, 1, "got {}, want 1", after.total_elements);
        assert_eq!(view_model.transactions().len(), 1);
    }

    #[tokio::test]
    async fn out_of_range_pages_are_ignored_without_a_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let handler_hits = hits.clone();
        let router = Router::new().route(
            "/api/v1/transactions/date-range",
            get(move || {
                handler_hits.fetch_add(1, Ordering::SeqCst);

                async { Json(page_of(vec![transaction_row(1, "Rent")])) }
            }),
        );
        let view_model = TransactionsViewModel::new(serve(router).await, november());

        view_model.refresh().await.expect("refresh should succeed");
        view_model
            .change_page(5)
            .await
            .expect("out-of-range page change should be a no-op");

        assert_eq!(
            hits.load(Ordering::SeqCst),
            1,
            "only the initial refresh should reach the server"
        );
        assert_eq!(view_model.pagination().page, 0);
    }

    #[tokio::test]
    async fn failed_refreshes_keep_the_stale_page() {
        let hits = Arc::new(AtomicUsize::new(0));
        let handler_hits = hits.clone();
        let router = Router::new().route(
            "/api/v1/transactions/date-range",
            get(move || {
                let hit = handler_hits.fetch_add(1, Ordering::SeqCst);

                async move {
                    if hit == 0 {
                        (StatusCode::OK, Json(page_of(vec![transaction_row(1, "Rent")])))
                    } else {
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            Json(json!({"message": "boom"})),
                        )
                    }
                }
            }),
        );
        let view_model = TransactionsViewModel::new(serve(router).await, november());

        view_model.refresh().await.expect("first refresh should succeed");
        let result = view_model.refresh().await;

        assert!(
            matches!(result, Err(Error::Api { status: 500, .. })),
            "got {result:?}, want a 500 error"
        );
        assert_eq!(
            view_model.transactions().len(),
            1,
            "the stale page should survive the failed refresh"
        );
        assert!(view_model.error().is_some());
    }

    #[tokio::test]
    async fn rejected_creates_carry_validation_details_and_skip_the_refetch() {
        let hits = Arc::new(AtomicUsize::new(0));
        let handler_hits = hits.clone();
        let router = Router::new()
            .route(
                "/api/v1/transactions/date-range",
                get(move || {
                    handler_hits.fetch_add(1, Ordering::SeqCst);

                    async { Json(page_of(Vec::new())) }
                }),
            )
            .route(
                "/api/v1/transactions",
                post(|| async {
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        Json(json!({
                            "message": "Validation failed",
                            "details": ["amount: must be greater than zero"],
                        })),
                    )
                }),
            );
        let view_model = TransactionsViewModel::new(serve(router).await, november());

        view_model.refresh().await.expect("refresh should succeed");
        let result = view_model.create(&new_transaction()).await;

        let error = result.expect_err("create should be rejected");
        assert_eq!(
            error.validation_details(),
            ["amount: must be greater than zero"],
            "got {error:?}"
        );
        assert_eq!(view_model.error(), Some(error));
        assert!(
            !view_model.is_loading(),
            "loading should clear when the create is rejected"
        );
        assert_eq!(
            hits.load(Ordering::SeqCst),
            1,
            "a rejected create should not refetch the page"
        );
    }

    #[tokio::test]
    async fn mutations_flag_loading_and_clear_the_error_while_in_flight() {
        let hits = Arc::new(AtomicUsize::new(0));
        let handler_hits = hits.clone();
        let router = Router::new()
            .route(
                "/api/v1/transactions/date-range",
                get(move || {
                    let hit = handler_hits.fetch_add(1, Ordering::SeqCst);

                    async move {
                        if hit == 0 {
                            (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                Json(json!({"message": "boom"})),
                            )
                        } else {
                            (
                                StatusCode::OK,
                                Json(page_of(vec![transaction_row(1, "Weekly shop")])),
                            )
                        }
                    }
                }),
            )
            .route(
                "/api/v1/transactions",
                post(|| async {
                    tokio::time::sleep(Duration::from_millis(400)).await;

                    (StatusCode::CREATED, Json(transaction_row(1, "Weekly shop")))
                }),
            );
        let view_model = TransactionsViewModel::new(serve(router).await, november());

        view_model
            .refresh()
            .await
            .expect_err("the seeded refresh should fail");
        assert!(
            view_model.error().is_some(),
            "the failed refresh should leave an error behind"
        );

        let pending = {
            let view_model = view_model.clone();
            tokio::spawn(async move { view_model.create(&new_transaction()).await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(
            view_model.is_loading(),
            "the in-flight create should flag loading"
        );
        assert_eq!(
            view_model.error(),
            None,
            "starting a create should clear the stale error"
        );

        pending
            .await
            .expect("create task should not panic")
            .expect("create should succeed");
        assert!(
            !view_model.is_loading(),
            "loading should clear once the create settles"
        );
    }

    #[tokio::test]
    async fn selector_changes_request_the_resolved_bounds() {
        let seen = Arc::new(Mutex::new(None));
        let recorded = seen.clone();
        let router = Router::new().route(
            "/api/v1/transactions/date-range",
            get(move |Query(params): Query<HashMap<String, String>>| {
                *recorded.lock().unwrap() = Some(params);

                async { Json(page_of(Vec::new())) }
            }),
        );
        let view_model = TransactionsViewModel::new(serve(router).await, november());

        view_model
            .set_range_selector(RangeSelector::ThisMonth, date!(2024 - 11 - 13))
            .await
            .expect("selector change should succeed");

        let params = seen.lock().unwrap().clone().expect("handler should run");
        assert_eq!(
            params.get("startDate").map(String::as_str),
            Some("2024-11-01")
        );
        assert_eq!(params.get("endDate").map(String::as_str), Some("2024-11-30"));
        assert_eq!(params.get("page").map(String::as_str), Some("0"));
        assert_eq!(view_model.range_selector(), RangeSelector::ThisMonth);
    }

    #[tokio::test]
    async fn the_newest_fetch_wins_when_responses_arrive_out_of_order() {
        let router = Router::new().route(
            "/api/v1/transactions/date-range",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                if params.get("startDate").map(String::as_str) == Some("2024-01-01") {
                    tokio::time::sleep(Duration::from_millis(250)).await;

                    Json(page_of(vec![transaction_row(1, "January")]))
                } else {
                    Json(page_of(vec![transaction_row(2, "February")]))
                }
            }),
        );
        let view_model = TransactionsViewModel::new(serve(router).await, november());

        let slow = view_model.set_date_range(date!(2024 - 01 - 01), date!(2024 - 01 - 31));
        let fast = view_model.set_date_range(date!(2024 - 02 - 01), date!(2024 - 02 - 29));
        let (slow_result, fast_result) = tokio::join!(slow, fast);

        slow_result.expect("the superseded fetch should settle quietly");
        fast_result.expect("the newest fetch should succeed");
        let rows = view_model.transactions();
        assert_eq!(rows.len(), 1, "got {rows:?}, want the newest page only");
        assert_eq!(
            rows[0].description, "February",
            "the slow January response should be discarded"
        );
        assert!(!view_model.is_loading(), "the winning fetch already settled");
    }
}
