//! HTTP transport: authenticated GETs against the Polkascore API.
//!
//! A thin layer over `reqwest` that owns the base URL and default headers,
//! maps non-2xx responses to [`Error::Api`], and races every request
//! against an optional [`CancellationToken`]. All endpoints are GETs; the
//! transport has no verb surface beyond that.

use std::time::{Duration, Instant};

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::{Error, Result};

pub(crate) struct Transport {
    http: reqwest::Client,
    base_url: Url,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl Transport {
    pub(crate) fn new(
        base_url: Url,
        headers: HeaderMap,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url,
            headers,
            timeout,
        })
    }

    /// Issues a GET and decodes the JSON body into `T`.
    pub(crate) async fn get_json<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        cancel: Option<&CancellationToken>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let (status, body) = self.get_raw(path, query, cancel).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                path = %path,
                error = %e,
                response = %body,
                "failed to decode response"
            );
            Error::decode(status, body, e)
        })
    }

    /// Issues a GET and returns the status plus raw body of a 2xx response.
    async fn get_raw(
        &self,
        path: &str,
        query: &[(&str, &str)],
        cancel: Option<&CancellationToken>,
    ) -> Result<(StatusCode, String)> {
        let mut url = self.base_url.clone();
        url.set_path(path);
        for (key, value) in query {
            url.query_pairs_mut().append_pair(key, value);
        }

        tracing::debug!(url = %url, "issuing GET request");

        let mut request = self.http.get(url);
        for (name, value) in &self.headers {
            request = request.header(name, value);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let started = Instant::now();
        let exchange = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                // Report the status even when the error body is unreadable.
                let body = response.text().await.unwrap_or_default();
                return Ok::<_, Error>((status, body));
            }
            let body = response.text().await?;
            Ok((status, body))
        };

        let (status, body) = match cancel {
            Some(token) => tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!(path = %path, "request cancelled");
                    return Err(Error::Cancelled);
                }
                result = exchange => result?,
            },
            None => exchange.await?,
        };

        tracing::info!(
            path = %path,
            status = status.as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "received HTTP response"
        );

        if !status.is_success() {
            if status.is_client_error() {
                tracing::error!(status = status.as_u16(), response = %body, "client error");
            } else {
                tracing::warn!(status = status.as_u16(), response = %body, "server error");
            }
            return Err(Error::Api { status, body });
        }

        Ok((status, body))
    }
}
