//! API calls for reading categories.

use crate::{ApiClient, Error, endpoints};

use super::{Category, CategoryId};

impl ApiClient {
    /// Get every category available to the user.
    ///
    /// # Errors
    ///
    /// Returns an [Error] when the request fails or the response cannot be
    /// decoded.
    pub async fn categories(&self) -> Result<Vec<Category>, Error> {
        self.fetch_json(self.get(endpoints::CATEGORIES)).await
    }

    /// Get the category with `id`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Api] with a 404 status when no such category exists.
    pub async fn category(&self, id: CategoryId) -> Result<Category, Error> {
        let path = endpoints::format_endpoint(endpoints::CATEGORY, id);

        self.fetch_json(self.get(&path)).await
    }
}
