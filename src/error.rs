//! Error types for the Polkascore SDK.
//!
//! The whole SDK surfaces failures through a single [`Error`] enum. Each
//! variant corresponds to a cause rather than a call site: API rejections
//! keep their HTTP status code and raw response body, network failures carry
//! no status at all, and widget lifecycle misuse is its own kind so it can
//! never be confused with a remote failure.

use http::StatusCode;

/// The error type for every fallible operation in this crate.
///
/// API errors preserve the raw response body so callers can log or inspect
/// exactly what the server said. Use the [`status`](Error::status),
/// [`is_auth_error`](Error::is_auth_error),
/// [`is_not_found`](Error::is_not_found) and
/// [`is_rate_limited`](Error::is_rate_limited) helpers to branch on cause
/// without matching variants by hand.
///
/// # Examples
///
/// ```no_run
/// use polkascore::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::new("pk_live_123")?;
///
/// match client.get_scores("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY", None).await {
///     Ok(scores) => println!("total: {}", scores.total_score),
///     Err(e) if e.is_not_found() => println!("address has no score yet"),
///     Err(e) if e.is_rate_limited() => println!("slow down"),
///     Err(e) => eprintln!("request failed: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The server answered with a non-2xx status code.
    ///
    /// Covers authentication failures (401/403), unknown addresses or keys
    /// (404), rate limiting (429) and server-side errors alike; the SDK does
    /// not retry any of them.
    #[error("API error {status}: {body}")]
    Api {
        /// The HTTP status code of the response.
        status: StatusCode,
        /// The raw response body, possibly empty.
        body: String,
    },

    /// A network-level failure: connection refused, DNS lookup failed,
    /// caller-configured timeout fired, and so on.
    ///
    /// No HTTP status code is available for these.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered 2xx but the body could not be decoded into the
    /// expected record.
    #[error("Failed to decode response (status {status}): {message}")]
    Decode {
        /// The HTTP status code of the response.
        status: StatusCode,
        /// The serde error message.
        message: String,
        /// The raw response body that failed to decode.
        body: String,
    },

    /// Invalid configuration: empty API key, malformed header, and so on.
    ///
    /// Always raised before any network activity happens.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An invalid URL was supplied as the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The supplied [`CancellationToken`](tokio_util::sync::CancellationToken)
    /// fired before the response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// A widget lifecycle method was called in a state that does not allow
    /// it, such as `update` before `mount` or anything after `destroy`.
    #[error("Widget lifecycle error: {0}")]
    Lifecycle(String),
}

impl Error {
    /// Returns the HTTP status code if this error carries one.
    ///
    /// `Some` for [`Error::Api`] and [`Error::Decode`], `None` otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use http::StatusCode;
    /// use polkascore::Error;
    ///
    /// let err = Error::Api {
    ///     status: StatusCode::NOT_FOUND,
    ///     body: "{\"error\":\"unknown address\"}".to_string(),
    /// };
    /// assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    /// assert_eq!(Error::Cancelled.status(), None);
    /// ```
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body if this error carries one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Api { body, .. } => Some(body),
            Error::Decode { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns `true` for authentication failures (401 or 403).
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }

    /// Returns `true` when the requested address, badge key or category key
    /// was not found (404).
    ///
    /// Note that an *unearned* badge is not a 404: the single-badge endpoint
    /// answers 200 with `earned: false` for a known key the address has not
    /// reached yet.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns `true` when the API rejected the call for rate limiting (429).
    ///
    /// The SDK never throttles or waits on its own; backoff is the caller's
    /// decision.
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }

    /// Builds a [`Error::Decode`] from a serde failure plus the response it
    /// choked on.
    pub(crate) fn decode(
        status: StatusCode,
        body: impl Into<String>,
        err: serde_json::Error,
    ) -> Self {
        Error::Decode {
            status,
            message: err.to_string(),
            body: body.into(),
        }
    }
}

/// A specialized `Result` type for Polkascore SDK calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: StatusCode) -> Error {
        Error::Api {
            status,
            body: "body".to_string(),
        }
    }

    #[test]
    fn test_status_and_body_accessors() {
        let err = api_error(StatusCode::IM_A_TEAPOT);
        assert_eq!(err.status(), Some(StatusCode::IM_A_TEAPOT));
        assert_eq!(err.body(), Some("body"));

        assert_eq!(Error::Cancelled.status(), None);
        assert_eq!(Error::Config("nope".to_string()).body(), None);
    }

    #[test]
    fn test_cause_taxonomy() {
        assert!(api_error(StatusCode::UNAUTHORIZED).is_auth_error());
        assert!(api_error(StatusCode::FORBIDDEN).is_auth_error());
        assert!(!api_error(StatusCode::NOT_FOUND).is_auth_error());

        assert!(api_error(StatusCode::NOT_FOUND).is_not_found());
        assert!(!api_error(StatusCode::INTERNAL_SERVER_ERROR).is_not_found());

        assert!(api_error(StatusCode::TOO_MANY_REQUESTS).is_rate_limited());
        assert!(!Error::Cancelled.is_rate_limited());
    }

    #[test]
    fn test_decode_constructor_keeps_raw_body() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err = Error::decode(StatusCode::OK, "not json", serde_err);

        assert_eq!(err.status(), Some(StatusCode::OK));
        assert_eq!(err.body(), Some("not json"));
    }
}
