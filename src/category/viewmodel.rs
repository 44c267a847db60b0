//! Stateful loader for the category list.

use std::sync::{Arc, Mutex};

use crate::{ApiClient, Error};

use super::{Category, CategoryId};

#[derive(Debug, Default)]
struct CategoriesState {
    categories: Vec<Category>,
    loading: bool,
    error: Option<Error>,
    fetch_seq: u64,
}

/// Holds the category list for pickers and filters.
///
/// The view model starts empty and loads on [CategoriesViewModel::refresh].
/// A failed refresh records the error and keeps whatever list was already
/// loaded, so the UI can keep rendering the stale options.
#[derive(Debug, Clone)]
pub struct CategoriesViewModel {
    api: ApiClient,
    state: Arc<Mutex<CategoriesState>>,
}

impl CategoriesViewModel {
    /// Create an empty view model backed by `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(CategoriesState::default())),
        }
    }

    /// Load the category list from the API.
    ///
    /// # Errors
    ///
    /// Returns the same [Error] it records in the state, so callers can
    /// branch on the failure without polling [CategoriesViewModel::error].
    pub async fn refresh(&self) -> Result<(), Error> {
        let sequence = {
            let mut state = self.state.lock().unwrap();
            state.fetch_seq += 1;
            state.loading = true;
            state.error = None;
            state.fetch_seq
        };

        let result = self.api.categories().await;

        let mut state = self.state.lock().unwrap();
        if state.fetch_seq != sequence {
            tracing::warn!("discarding category fetch {sequence}, a newer fetch owns the state");

            return Ok(());
        }
        state.loading = false;

        match result {
            Ok(categories) => {
                state.categories = categories;

                Ok(())
            }
            Err(error) => {
                state.error = Some(error.clone());

                Err(error)
            }
        }
    }

    /// The most recently loaded categories.
    pub fn categories(&self) -> Vec<Category> {
        self.state.lock().unwrap().categories.clone()
    }

    /// Look up a loaded category by `id`.
    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.state
            .lock()
            .unwrap()
            .categories
            .iter()
            .find(|category| category.id == id)
            .cloned()
    }

    /// Whether a refresh is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.lock().unwrap().loading
    }

    /// The error recorded by the most recent failed refresh, if any.
    pub fn error(&self) -> Option<Error> {
        self.state.lock().unwrap().error.clone()
    }
}
