//! Configuration for connecting to the expense API.

use std::{env, time::Duration};

/// The base URL used when `OUTGO_API_BASE_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1";

/// The user id sent when `OUTGO_USER_ID` is not set.
pub const DEFAULT_USER_ID: &str = "1";

/// How long to wait for a response before giving up on a request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The settings needed to talk to the expense API.
///
/// The config is built explicitly, either from literal values or from the
/// environment, and passed to the API client at construction. Nothing in the
/// crate reads connection settings from ambient global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Where the API is served, including the version prefix,
    /// e.g. `http://localhost:8080/api/v1`.
    pub base_url: String,
    /// The user whose data every request reads and writes, sent as the
    /// `X-User-Id` header.
    pub user_id: String,
    /// How long to wait for a response before failing with a network error.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the default ten second timeout.
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_id: user_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build a config from the `OUTGO_API_BASE_URL` and `OUTGO_USER_ID`
    /// environment variables, falling back to the local development defaults
    /// for any that are unset.
    pub fn from_env() -> Self {
        let base_url = env::var("OUTGO_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        let user_id = env::var("OUTGO_USER_ID").unwrap_or_else(|_| DEFAULT_USER_ID.to_owned());

        Self::new(base_url, user_id)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_USER_ID)
    }
}
