//! The HTTP client shared by every expense API call.

use reqwest::{
    RequestBuilder, Response, StatusCode,
    header::{HeaderMap, HeaderValue},
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{ClientConfig, Error, endpoints};

/// The user agent sent with every request.
const USER_AGENT: &str = concat!("outgo/", env!("CARGO_PKG_VERSION"));

/// The header naming the user whose data is being read and written.
const USER_ID_HEADER: &str = "X-User-Id";

/// A handle to the expense API.
///
/// The client owns a connection pool and the fixed request headers, so it is
/// built once from a [ClientConfig] and cloned wherever it is needed. Clones
/// are cheap and share the pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [Error::Config] when the base URL is empty or the user id
    /// cannot be sent as a header value.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        if config.base_url.trim().is_empty() {
            return Err(Error::Config("base URL must not be empty".to_owned()));
        }

        let user_id = HeaderValue::from_str(&config.user_id).map_err(|_| {
            Error::Config(format!(
                "user id {:?} cannot be sent as a header value",
                config.user_id
            ))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, user_id);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|error| Error::Config(error.to_string()))?;

        tracing::info!("expense API client ready for {}", config.base_url);

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Check that the API is reachable and answering.
    ///
    /// # Errors
    ///
    /// Returns the same [Error] variants as any other call; a healthy API
    /// returns `Ok(())`.
    pub async fn ping(&self) -> Result<(), Error> {
        self.execute(self.get(endpoints::PING)).await
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        tracing::debug!("GET {path}");
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        tracing::debug!("POST {path}");
        self.http.post(self.url(path))
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        tracing::debug!("PUT {path}");
        self.http.put(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        tracing::debug!("DELETE {path}");
        self.http.delete(self.url(path))
    }

    /// Send `request` and decode the JSON body of a successful response.
    pub(crate) async fn fetch_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, Error> {
        let response = check_status(request.send().await?).await?;

        response.json().await.map_err(Error::from)
    }

    /// Send `request` and discard the body of a successful response.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<(), Error> {
        check_status(request.send().await?).await?;

        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// The JSON error envelope the API attaches to failed requests.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, alias = "validationErrors")]
    details: Vec<String>,
}

/// Turn a non-success response into the matching [Error::Api].
///
/// The server's own message is relayed whenever the error body carries a
/// non-empty one, along with any field-level validation details. Responses
/// without a usable message get a per-status fallback.
async fn check_status(response: Response) -> Result<Response, Error> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.json::<ErrorBody>().await.ok();
    let details = body
        .as_ref()
        .map(|body| body.details.clone())
        .unwrap_or_default();
    let message = body
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status_fallback(status).to_owned());

    match status.as_u16() {
        404 => tracing::error!("resource not found: {message}"),
        400 | 422 => tracing::error!("request rejected: {message} {details:?}"),
        500..=599 => tracing::error!("server error {status}: {message}"),
        _ => tracing::error!("request failed with {status}: {message}"),
    }

    Err(Error::Api {
        status: status.as_u16(),
        message,
        details,
    })
}

fn status_fallback(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "Invalid request.",
        401 => "You are not authorized to do that.",
        404 => "The requested resource was not found.",
        422 => "The submitted data failed validation.",
        500..=599 => "The server hit an internal error. Try again later.",
        _ => "The request failed.",
    }
}
