//! JSON-over-HTTP request helper.
//!
//! [`HttpClient::send`] performs exactly one HTTP exchange:
//! - query parameters with no value are omitted from the URL entirely
//! - `accept: application/json` is always sent, caller headers win
//! - a JSON body sets `content-type: application/json`
//! - a timer and an optional caller token can both abort the request
//! - non-2xx responses become [`HttpError::Status`] with the raw body
//! - an empty 2xx body is returned as JSON `null`
//!
//! Retrying and caching are layered on top by [`crate::client::ApiClient`].

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const APPLICATION_JSON: &str = "application/json";

// ============================================================================
// Request
// ============================================================================

/// A single JSON request description.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method, GET unless set otherwise.
    pub method: Method,
    /// Absolute URL without the query parameters below.
    pub url: String,
    /// Query parameters; pairs with `None` values are skipped.
    pub query: Vec<(String, Option<String>)>,
    /// Extra headers, applied over the defaults.
    pub headers: Vec<(String, String)>,
    /// Optional JSON body.
    pub body: Option<Value>,
    /// Time allowed for the whole exchange, body included.
    pub timeout: Duration,
    /// Caller-supplied cancellation.
    pub cancel: Option<CancellationToken>,
}

impl Request {
    /// Creates a request with the given method.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT,
            cancel: None,
        }
    }

    /// Creates a GET request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a POST request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Adds a query parameter. `None` values are not serialized.
    #[must_use]
    pub fn query<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.query.push((key.into(), value.map(|v| v.to_string())));
        self
    }

    /// Adds a header, replacing any default of the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attaches a caller cancellation token.
    #[must_use]
    pub fn cancel_on(mut self, token: Option<CancellationToken>) -> Self {
        self.cancel = token;
        self
    }

    /// Returns the final URL with query parameters applied.
    pub fn full_url(&self) -> Result<Url, HttpError> {
        build_url(&self.url, &self.query)
    }
}

/// A successful (2xx) JSON response.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    /// Response status code.
    pub status: u16,
    /// Parsed body, `Value::Null` when the body was empty.
    pub body: Value,
}

// ============================================================================
// URL and header helpers
// ============================================================================

/// Merges query parameters onto a URL, skipping absent values.
pub fn build_url(base: &str, query: &[(String, Option<String>)]) -> Result<Url, HttpError> {
    let mut url = Url::parse(base).map_err(|e| HttpError::InvalidUrl(format!("{base}: {e}")))?;

    // query_pairs_mut() always materializes a `?`, so only touch it when
    // there is something to append.
    if query.iter().any(|(_, v)| v.is_some()) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            if let Some(value) = value {
                pairs.append_pair(key, value);
            }
        }
    }

    Ok(url)
}

fn build_headers(extra: &[(String, String)], has_body: bool) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    if has_body {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| HttpError::InvalidHeader(format!("{name}: {e}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

// ============================================================================
// HTTP Client
// ============================================================================

/// Thin wrapper around a shared [`reqwest::Client`].
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    /// Creates a new HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(inner: Client) -> Self {
        Self { inner }
    }

    /// Performs one request and returns the parsed JSON body.
    pub async fn request_json(&self, request: Request) -> Result<Value, HttpError> {
        Ok(self.send(request).await?.body)
    }

    /// Performs one request and returns the status and parsed JSON body.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn send(&self, request: Request) -> Result<JsonResponse, HttpError> {
        let url = request.full_url()?;
        let headers = build_headers(&request.headers, request.body.is_some())?;

        // A child token observes the caller's cancellation without letting
        // our timeout cancel the caller's token.
        let token = request
            .cancel
            .as_ref()
            .map_or_else(CancellationToken::new, CancellationToken::child_token);
        if token.is_cancelled() {
            debug!("Caller token already cancelled");
            return Err(HttpError::Cancelled);
        }

        let mut builder = self.inner.request(request.method.clone(), url).headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        debug!("Sending request");
        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };

        let (status, text) = tokio::select! {
            biased;
            () = token.cancelled() => {
                debug!("Request cancelled");
                return Err(HttpError::Cancelled);
            }
            () = tokio::time::sleep(request.timeout) => {
                token.cancel();
                debug!(timeout_ms = request.timeout.as_millis(), "Request timed out");
                return Err(HttpError::Timeout(request.timeout));
            }
            result = exchange => result?,
        };

        debug!(status = %status, len = text.len(), "Response received");

        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };

        Ok(JsonResponse {
            status: status.as_u16(),
            body,
        })
    }

    /// Returns the inner reqwest client.
    pub fn inner(&self) -> &Client {
        &self.inner
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_query_values_are_omitted() {
        let request = Request::get("https://example.com/api")
            .query("foo", None::<&str>)
            .query("bar", Some("baz"));

        let url = request.full_url().unwrap();
        let rendered = url.as_str();
        assert!(rendered.contains("bar=baz"));
        assert!(!rendered.contains("foo="));
    }

    #[test]
    fn test_no_trailing_question_mark_without_query() {
        let url = build_url("https://example.com/players/zezima", &[("period".into(), None)]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/players/zezima");
    }

    #[test]
    fn test_query_values_are_encoded() {
        let url = Request::get("https://example.com/player_info.php")
            .query("player", Some("Iron Man"))
            .full_url()
            .unwrap();
        assert_eq!(url.query(), Some("player=Iron+Man"));
    }

    #[test]
    fn test_invalid_url() {
        let err = Request::get("not a url").full_url().unwrap_err();
        assert!(matches!(err, HttpError::InvalidUrl(_)));
    }

    #[test]
    fn test_caller_header_wins() {
        let headers = build_headers(&[("Accept".into(), "text/plain".into())], false).unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), "text/plain");
        assert_eq!(headers.get_all(ACCEPT).iter().count(), 1);
    }

    #[test]
    fn test_body_sets_content_type() {
        let headers = build_headers(&[], true).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), APPLICATION_JSON);
        assert_eq!(headers.get(ACCEPT).unwrap(), APPLICATION_JSON);

        let headers = build_headers(&[], false).unwrap();
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_invalid_header_rejected() {
        let err = build_headers(&[("bad header".into(), "x".into())], false).unwrap_err();
        assert!(matches!(err, HttpError::InvalidHeader(_)));
    }
}
