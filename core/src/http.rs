//! HTTP transport types and the pluggable executor behind the client.
//!
//! # Design
//! Requests and responses are described as plain data. The client builds an
//! `HttpRequest`, hands it to a `Transport`, and parses the returned
//! `HttpResponse` without ever touching the network itself. Only
//! `Transport::execute` performs I/O, so an embedding application can swap in
//! its own pooled client (TLS, proxies, timeouts) and tests can swap in a
//! recording fake.
//!
//! All fields use owned types (`String`, `Vec`) so a response can be handed
//! back to the caller, or carried inside an error, without lifetime concerns.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use tracing::debug;

/// HTTP method for a request. The API is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and already carries the encoded query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data, with the body fully read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Case-insensitive lookup of the first header named `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The declared `Content-Length`, or the length of the body that was read
    /// when the header is missing or unparseable (chunked responses).
    pub fn content_length(&self) -> u64 {
        self.header("content-length")
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(self.body.len() as u64)
    }
}

/// Failure reported by a `Transport` (DNS, connect, TLS, timeout, I/O).
///
/// The underlying error is kept as-is; `Display` and `source` forward to it.
/// When the failure happened while reading the body, the status and headers
/// that did arrive are kept as a response with an empty body.
pub struct TransportError {
    source: Box<dyn StdError + Send + Sync>,
    response: Option<HttpResponse>,
}

impl TransportError {
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            source: err.into(),
            response: None,
        }
    }

    /// Attach the partial response received before the failure.
    pub fn with_response(mut self, response: HttpResponse) -> Self {
        self.response = Some(response);
        self
    }

    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.source
    }

    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }
}

impl fmt::Debug for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.source, f)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.source, f)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source.source()
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        Self::new(err)
    }
}

/// Executes a single HTTP exchange.
///
/// Implementations must read the body to completion and release the
/// connection before returning. Non-2xx statuses are data, not errors.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Default `Transport` backed by a `ureq::Agent`.
///
/// Cloning is cheap; clones share the agent's connection pool.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Wrap a caller-configured agent. The agent should be built with
    /// `http_status_as_error(false)` so error statuses reach the parser.
    pub fn new(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    /// Build an agent with an optional global timeout.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::with_timeout(Some(crate::config::DEFAULT_TIMEOUT))
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(request.url.as_str()),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call()?;

        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = match response.body_mut().read_to_string() {
            Ok(body) => body,
            Err(err) => {
                return Err(TransportError::new(err).with_response(HttpResponse {
                    status,
                    headers,
                    body: String::new(),
                }));
            }
        };

        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
