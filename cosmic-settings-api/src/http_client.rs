//! HTTP transport for the management API
//!
//! Every operation is a `GET <endpoint>?command=<op>&response=json&...` call. The server wraps
//! failures in the same envelope as successes, carrying `errorcode` and `errortext`.
//!
//! # design principles
//! - **Single attempt** - errors are returned to the caller as-is, nothing is retried
//! - **Unified processing flow** - sending requests, logging, and reading responses
//! - **No secrets in logs** - the session key is redacted from every logged URL

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::operation::Operation;
use crate::params::{RequestParams, encode_component};
use crate::traits::RemoteInvoker;
use crate::utils::log_sanitizer::{redact_query, truncate_for_log};

/// Default connect timeout (seconds)
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP status codes the server uses for a missing or expired session.
const UNAUTHORIZED_STATUSES: [u16; 2] = [401, 432];

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns status code and response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor
    /// * `operation` - operation name (for logging and errors)
    /// * `url` - request URL, logged with secrets redacted
    pub async fn execute_request(
        request_builder: RequestBuilder,
        operation: &str,
        url: &str,
    ) -> Result<(u16, String)> {
        log::debug!("[{operation}] GET {}", redact_query(url));

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    operation: operation.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ApiError::NetworkError {
                    operation: operation.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{operation}] Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| ApiError::NetworkError {
            operation: operation.to_string(),
            detail: format!("Failed to read response body: {e}"),
        })?;

        log::debug!(
            "[{operation}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse JSON response
    pub fn parse_json<T>(response_text: &str, operation: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{operation}] JSON parse failed: {e}");
            log::error!(
                "[{operation}] Raw response: {}",
                truncate_for_log(response_text)
            );
            ApiError::ParseError {
                operation: operation.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Server-reported failure found inside a response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServerError {
    code: Option<u32>,
    text: String,
}

/// Find `errortext`/`errorcode` in whichever envelope the server chose.
fn extract_server_error(value: &Value) -> Option<ServerError> {
    let object = value.as_object()?;
    object.values().find_map(|envelope| {
        let text = envelope.get("errortext")?.as_str()?;
        let code = envelope
            .get("errorcode")
            .and_then(Value::as_u64)
            .and_then(|c| u32::try_from(c).ok());
        Some(ServerError {
            code,
            text: text.to_string(),
        })
    })
}

/// Map a non-success status into an [`ApiError`].
fn status_error(operation: &str, status: u16, body: &str) -> ApiError {
    let server_error = serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(extract_server_error);

    if UNAUTHORIZED_STATUSES.contains(&status) {
        return ApiError::Unauthorized {
            operation: operation.to_string(),
            raw_message: server_error.map(|e| e.text),
        };
    }

    match server_error {
        Some(ServerError { code, text }) => ApiError::Api {
            operation: operation.to_string(),
            status,
            error_code: code,
            raw_message: text,
        },
        None => ApiError::Api {
            operation: operation.to_string(),
            status,
            error_code: None,
            raw_message: truncate_for_log(body),
        },
    }
}

/// Management API invoker over HTTP.
///
/// # Construction
///
/// ```rust,no_run
/// use cosmic_settings_api::HttpInvoker;
///
/// let invoker = HttpInvoker::builder("https://cloud.example.com/client/api")
///     .session_key("abc123")
///     .build()?;
/// # Ok::<(), cosmic_settings_api::ApiError>(())
/// ```
pub struct HttpInvoker {
    client: Client,
    endpoint: Url,
    session_key: Option<String>,
}

impl std::fmt::Debug for HttpInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpInvoker")
            .field("endpoint", &self.endpoint.as_str())
            .field("session_key", &self.session_key.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

/// Builder for [`HttpInvoker`].
pub struct HttpInvokerBuilder {
    endpoint: String,
    session_key: Option<String>,
    connect_timeout: Duration,
    request_timeout: Duration,
}

impl HttpInvokerBuilder {
    fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            session_key: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Session key appended to every request as `sessionkey`.
    #[must_use]
    pub fn session_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.session_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// Set the connect timeout (default: 10s).
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the total request timeout (default: 30s).
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Build the [`HttpInvoker`] instance.
    ///
    /// Fails with [`ApiError::InvalidParameter`] when the endpoint is not an absolute
    /// `http`/`https` URL, or with [`ApiError::NetworkError`] when the HTTP client cannot
    /// be created.
    pub fn build(self) -> Result<HttpInvoker> {
        let endpoint = Url::parse(self.endpoint.trim()).map_err(|e| invalid_endpoint(&e))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(invalid_endpoint(&format!(
                "unsupported scheme '{}'",
                endpoint.scheme()
            )));
        }

        let client = Client::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
            .map_err(|e| ApiError::NetworkError {
                operation: "client".to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(HttpInvoker {
            client,
            endpoint,
            session_key: self.session_key,
        })
    }
}

fn invalid_endpoint(detail: &dyn std::fmt::Display) -> ApiError {
    ApiError::InvalidParameter {
        operation: "client".to_string(),
        param: "endpoint".to_string(),
        detail: detail.to_string(),
    }
}

impl HttpInvoker {
    /// Start building an invoker for `endpoint`, e.g. `https://host/client/api`.
    pub fn builder(endpoint: impl Into<String>) -> HttpInvokerBuilder {
        HttpInvokerBuilder::new(endpoint.into())
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for one call.
    pub(crate) fn request_url(&self, operation: Operation, params: &RequestParams) -> String {
        // Keep any query the endpoint already carries.
        let separator = match self.endpoint.query() {
            Some(query) if !query.is_empty() => '&',
            _ => '?',
        };
        let mut url = format!(
            "{}{separator}command={}&response=json",
            self.endpoint.as_str().trim_end_matches('?'),
            encode_component(operation.name())
        );
        if !params.is_empty() {
            url.push('&');
            url.push_str(&params.to_query_string());
        }
        if let Some(key) = &self.session_key {
            url.push_str("&sessionkey=");
            url.push_str(&encode_component(key));
        }
        url
    }
}

#[async_trait]
impl RemoteInvoker for HttpInvoker {
    async fn invoke(&self, operation: Operation, params: &RequestParams) -> Result<Value> {
        let name = operation.name();
        let url = self.request_url(operation, params);

        let (status, response_text) =
            HttpUtils::execute_request(self.client.get(&url), name, &url).await?;

        check_response(name, status, &response_text)
    }
}

/// Turn a status and body into the response document or the error they describe.
fn check_response(name: &str, status: u16, response_text: &str) -> Result<Value> {
    if status >= 400 {
        let err = status_error(name, status, response_text);
        if err.is_expected() {
            log::warn!("{err}");
        } else {
            log::error!("{err}");
        }
        return Err(err);
    }

    let value: Value = HttpUtils::parse_json(response_text, name)?;

    // Some deployments answer 200 with an error envelope.
    if let Some(ServerError { code, text }) = extract_server_error(&value) {
        log::error!("[{name}] API error: {code:?} - {text}");
        return Err(ApiError::Api {
            operation: name.to_string(),
            status,
            error_code: code,
            raw_message: text,
        });
    }

    Ok(value)
}
