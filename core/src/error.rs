//! Error types for the tukui API client.
//!
//! # Design
//! `EmptyResponse` gets a dedicated variant because the upstream answers
//! unknown ids with a zero-length body instead of a 404, so callers need to
//! tell "not found" apart from a broken payload without inspecting the body.
//! Variants raised after a response arrived carry that response, which is how
//! callers reach the raw exchange on the error path.

use thiserror::Error;

use crate::http::{HttpResponse, TransportError};

/// Errors returned by the `AddonClient` operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The base URL could not be parsed; no request was sent.
    #[error("invalid base url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The transport failed. If the status line and headers had already
    /// arrived, they are available through `ApiError::response`.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a zero-length body.
    #[error("empty response")]
    EmptyResponse { response: HttpResponse },

    /// The body is not valid JSON or does not match the expected shape.
    #[error("{source}")]
    Deserialization {
        #[source]
        source: serde_json::Error,
        response: HttpResponse,
    },
}

impl ApiError {
    /// The raw response, if the request got far enough to receive one. For a
    /// body that failed to read, this is the status and headers with an
    /// empty body.
    pub fn response(&self) -> Option<&HttpResponse> {
        match self {
            ApiError::EmptyResponse { response } | ApiError::Deserialization { response, .. } => {
                Some(response)
            }
            ApiError::Transport(err) => err.response(),
            ApiError::InvalidUrl { .. } => None,
        }
    }

    pub fn is_empty_response(&self) -> bool {
        matches!(self, ApiError::EmptyResponse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: vec![("content-length".to_string(), "0".to_string())],
            body: String::new(),
        }
    }

    #[test]
    fn empty_response_message_is_fixed() {
        let err = ApiError::EmptyResponse { response: empty() };
        assert_eq!(err.to_string(), "empty response");
        assert!(err.is_empty_response());
        assert_eq!(err.response().map(|r| r.status), Some(200));
    }

    #[test]
    fn deserialization_error_shows_serde_message() {
        let source = serde_json::from_str::<String>("3").unwrap_err();
        let expected = source.to_string();
        let err = ApiError::Deserialization {
            source,
            response: empty(),
        };
        assert_eq!(err.to_string(), expected);
        assert!(!err.is_empty_response());
        assert!(err.response().is_some());
    }

    #[test]
    fn invalid_url_has_no_response() {
        let source = url::Url::parse("not a url").unwrap_err();
        let err = ApiError::InvalidUrl {
            url: "not a url".to_string(),
            source,
        };
        assert!(err.response().is_none());
        assert!(err.to_string().starts_with("invalid base url \"not a url\""));
    }
}
