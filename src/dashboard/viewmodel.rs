//! Stateful loader for the dashboard summary.

use std::sync::{Arc, Mutex};

use time::Date;

use crate::{
    ApiClient, DateRange, Error, RangeSelector, range::compute_range, transaction::Transaction,
};

use super::{CategorySpending, Totals};

/// How many recent transactions the dashboard shows by default.
const DEFAULT_RECENT_LIMIT: u64 = 5;

#[derive(Debug)]
struct DashboardState {
    totals: Totals,
    expenses_by_category: Vec<CategorySpending>,
    recent_transactions: Vec<Transaction>,
    range: DateRange,
    selector: RangeSelector,
    recent_limit: u64,
    loading: bool,
    error: Option<Error>,
    fetch_seq: u64,
}

/// Holds the three dashboard sections for one date range: totals, the
/// spending breakdown by category, and the most recent transactions.
///
/// A refresh fetches all three concurrently and commits them together
/// after every fetch has succeeded. When any of them fails, the error is
/// recorded and all previously shown data stays put; the dashboard never
/// shows a half-updated range.
#[derive(Debug, Clone)]
pub struct DashboardViewModel {
    api: ApiClient,
    state: Arc<Mutex<DashboardState>>,
}

impl DashboardViewModel {
    /// Create a view model for `range`.
    ///
    /// Nothing is fetched until the first call to
    /// [DashboardViewModel::refresh].
    pub fn new(api: ApiClient, range: DateRange) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(DashboardState {
                totals: Totals::default(),
                expenses_by_category: Vec::new(),
                recent_transactions: Vec::new(),
                range,
                selector: RangeSelector::Custom,
                recent_limit: DEFAULT_RECENT_LIMIT,
                loading: false,
                error: None,
                fetch_seq: 0,
            })),
        }
    }

    /// Show `limit` recent transactions instead of the default five.
    pub fn with_recent_limit(self, limit: u64) -> Self {
        self.state.lock().unwrap().recent_limit = limit;

        self
    }

    /// Fetch all three sections for the current range.
    ///
    /// # Errors
    ///
    /// Returns the first [Error] of the three fetches, which is also
    /// recorded in the state. Previously shown data survives the failure.
    pub async fn refresh(&self) -> Result<(), Error> {
        self.load().await
    }

    /// Summarize the inclusive range `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns the same [Error] it records in the state.
    pub async fn set_date_range(&self, start: Date, end: Date) -> Result<(), Error> {
        {
            let mut state = self.state.lock().unwrap();
            state.range = DateRange { start, end };
            state.selector = RangeSelector::Custom;
        }

        self.load().await
    }

    /// Summarize `selector` resolved against `today`.
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
        }

        self.load().await
    }

    /// The income and spending totals of the current range.
    pub fn totals(&self) -> Totals {
        self.state.lock().unwrap().totals
    }

    /// The spending breakdown by category, amounts absolute, every row
    /// carrying a percentage.
    pub fn expenses_by_category(&self) -> Vec<CategorySpending> {
        self.state.lock().unwrap().expenses_by_category.clone()
    }

    /// The most recent transactions, newest first.
    pub fn recent_transactions(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().recent_transactions.clone()
    }

    /// The inclusive date range being summarized.
    pub fn date_range(&self) -> DateRange {
        self.state.lock().unwrap().range
    }

    /// The selector behind the current range, [RangeSelector::Custom] for
    /// explicit bounds.
    pub fn range_selector(&self) -> RangeSelector {
        self.state.lock().unwrap().selector
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// The error recorded by the most recent failed refresh, if any.
    pub fn error(&self) -> Option<Error> {
        self.state.lock().unwrap().error.clone()
    }

    async fn load(&self) -> Result<(), Error> {
        let (sequence, range, limit) = {
            let mut state = self.state.lock().unwrap();
            state.fetch_seq += 1;
            state.loading = true;
            state.error = None;

            (state.fetch_seq, state.range, state.recent_limit)
        };

        let result = tokio::try_join!(
            self.api.totals(range),
            self.api.expenses_by_category(range),
            self.api.recent_transactions(limit),
        );

        let mut state = self.state.lock().unwrap();
        if state.fetch_seq != sequence {
            tracing::warn!("discarding dashboard fetch {sequence}, a newer fetch owns the state");

            return Ok(());
        }
        state.loading = false;

        match result {
            Ok((totals, expenses_by_category, recent)) => {
                state.totals = totals;
                state.expenses_by_category = expenses_by_category;
                state.recent_transactions = recent.content;

                Ok(())
            }
            Err(error) => {
                state.error = Some(error.clone());

                Err(error)
            }
        }
    }
}
