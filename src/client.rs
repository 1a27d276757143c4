//! Polkascore API client.
//!
//! [`Client`] is the main entry point of the SDK. Configure one with
//! [`ClientBuilder`], then call one method per resource. Direct methods hit
//! the network on every call; the `get_widget_*` variants are backed by the
//! shared [`ResponseCache`] because widgets may re-fetch on every
//! configuration change.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::{header, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::cache::{CacheKey, ResponseCache, WidgetResource};
use crate::transport::Transport;
use crate::types::{
    BadgeDefinition, BadgeStatus, CategoryDefinition, CategoryScore, UserBadges, UserProfile,
    UserScores, WidgetBadges, WidgetCategory,
};
use crate::{Error, Result};

/// Base URL of the public Polkascore API, used unless overridden.
pub const DEFAULT_BASE_URL: &str = "https://api.polkascore.io";

const API_PREFIX: &str = "/api/v2";

/// How long widget responses stay fresh unless the builder overrides it.
const DEFAULT_WIDGET_CACHE_TTL: Duration = Duration::from_secs(60);

/// A client for the Polkascore reputation API.
///
/// The client is cheap to clone and designed to be reused: it holds a
/// connection pool, the merged default headers, and a handle to the widget
/// response cache. Construction fails fast when the API key is missing or
/// empty, before any network activity.
///
/// # Examples
///
/// ```no_run
/// use polkascore::Client;
///
/// # async fn example() -> Result<(), polkascore::Error> {
/// let client = Client::builder()
///     .api_key("pk_live_123")
///     .build()?;
///
/// let scores = client
///     .get_scores("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY", None)
///     .await?;
/// println!("total score: {}", scores.total_score);
///
/// for (key, category) in &scores.categories {
///     println!("  {key}: {} ({})", category.score, category.title);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Transport,
    cache: ResponseCache,
    widget_cache_ttl: Duration,
}

// Manual impl keeps the bearer header out of debug output.
impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("widget_cache_ttl", &self.inner.widget_cache_ttl)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a client with default settings and the given API key.
    ///
    /// Equivalent to `Client::builder().api_key(key).build()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `api_key` is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Fetches the profile for an address.
    ///
    /// Uncached: every call issues exactly one request.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), polkascore::Error> {
    /// # let client = polkascore::Client::new("pk_live_123")?;
    /// let profile = client.get_profile("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY", None).await?;
    /// println!("{}", profile.display_name);
    /// if let Some(handle) = profile.socials.get("twitter") {
    ///     println!("twitter: {handle}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_profile(
        &self,
        address: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<UserProfile> {
        self.inner
            .transport
            .get_json(&format!("{API_PREFIX}/profiles/{address}"), &[], cancel)
            .await
    }

    /// Fetches the full score breakdown for an address. Uncached.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tokio_util::sync::CancellationToken;
    ///
    /// # async fn example() -> Result<(), polkascore::Error> {
    /// # let client = polkascore::Client::new("pk_live_123")?;
    /// // Cancellable fetch: the token can be triggered from another task.
    /// let cancel = CancellationToken::new();
    /// let scores = client
    ///     .get_scores("5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY", Some(&cancel))
    ///     .await?;
    /// println!("rank: {:?}", scores.rank);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_scores(
        &self,
        address: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<UserScores> {
        self.inner
            .transport
            .get_json(&format!("{API_PREFIX}/scores/{address}"), &[], cancel)
            .await
    }

    /// Fetches the score an address earned in a single category. Uncached.
    pub async fn get_category_score(
        &self,
        address: &str,
        category: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<CategoryScore> {
        self.inner
            .transport
            .get_json(
                &format!("{API_PREFIX}/scores/{address}/{category}"),
                &[],
                cancel,
            )
            .await
    }

    /// Fetches every badge an address has earned. Uncached.
    pub async fn get_badges(
        &self,
        address: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<UserBadges> {
        self.inner
            .transport
            .get_json(&format!("{API_PREFIX}/badges/{address}"), &[], cancel)
            .await
    }

    /// Fetches the earned state of a single badge for an address. Uncached.
    ///
    /// An unearned badge answers 200 with `earned: false`; only an unknown
    /// badge key is a 404.
    pub async fn get_badge(
        &self,
        address: &str,
        badge: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<BadgeStatus> {
        self.inner
            .transport
            .get_json(&format!("{API_PREFIX}/badges/{address}/{badge}"), &[], cancel)
            .await
    }

    /// Fetches the badge definition metadata, keyed by badge key. Uncached.
    pub async fn get_badge_definitions(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<BTreeMap<String, BadgeDefinition>> {
        self.inner
            .transport
            .get_json(&format!("{API_PREFIX}/metadata/badges"), &[], cancel)
            .await
    }

    /// Fetches the category definition metadata, keyed by category key.
    /// Uncached.
    pub async fn get_category_definitions(
        &self,
        cancel: Option<&CancellationToken>,
    ) -> Result<BTreeMap<String, CategoryDefinition>> {
        self.inner
            .transport
            .get_json(&format!("{API_PREFIX}/metadata/categories"), &[], cancel)
            .await
    }

    /// Fetches the reputation widget payload for an address, cache-backed.
    ///
    /// A fresh cache entry short-circuits the network call entirely;
    /// `force_refresh` bypasses the cache and overwrites the stored entry
    /// with the fresh result.
    pub async fn get_widget_reputation(
        &self,
        address: &str,
        force_refresh: bool,
        cancel: Option<&CancellationToken>,
    ) -> Result<UserScores> {
        self.widget_call(WidgetResource::Reputation, address, None, force_refresh, cancel)
            .await
    }

    /// Fetches the profile widget payload for an address, cache-backed.
    pub async fn get_widget_profile(
        &self,
        address: &str,
        force_refresh: bool,
        cancel: Option<&CancellationToken>,
    ) -> Result<UserProfile> {
        self.widget_call(WidgetResource::Profile, address, None, force_refresh, cancel)
            .await
    }

    /// Fetches the badges widget payload for an address, cache-backed.
    ///
    /// The payload bundles earned badges with the badge definitions so the
    /// widget can render locked states in one round-trip.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), polkascore::Error> {
    /// # let client = polkascore::Client::new("pk_live_123")?;
    /// let addr = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    ///
    /// // First call fetches, second is served from the cache.
    /// let first = client.get_widget_badges(addr, false, None).await?;
    /// let second = client.get_widget_badges(addr, false, None).await?;
    /// assert_eq!(first, second);
    ///
    /// // A forced refresh always fetches and replaces the entry.
    /// let fresh = client.get_widget_badges(addr, true, None).await?;
    /// println!("{} badges earned", fresh.badges.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_widget_badges(
        &self,
        address: &str,
        force_refresh: bool,
        cancel: Option<&CancellationToken>,
    ) -> Result<WidgetBadges> {
        self.widget_call(WidgetResource::Badges, address, None, force_refresh, cancel)
            .await
    }

    /// Fetches the category widget payload for an address, cache-backed.
    ///
    /// The category key is part of the cache key, so widgets for two
    /// categories of one address never collide.
    pub async fn get_widget_category(
        &self,
        address: &str,
        category: &str,
        force_refresh: bool,
        cancel: Option<&CancellationToken>,
    ) -> Result<WidgetCategory> {
        self.widget_call(
            WidgetResource::Category,
            address,
            Some(category),
            force_refresh,
            cancel,
        )
        .await
    }

    /// Removes every entry from the widget cache this client uses.
    ///
    /// By default that is the process-wide shared cache, so this affects
    /// every client and widget sharing it.
    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    /// Removes every cached widget entry for `address`, leaving entries for
    /// other addresses untouched.
    pub fn clear_cache_for_address(&self, address: &str) {
        self.inner.cache.clear_for_address(address);
    }

    async fn widget_call<T>(
        &self,
        resource: WidgetResource,
        address: &str,
        sub_key: Option<&str>,
        force_refresh: bool,
        cancel: Option<&CancellationToken>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let key = CacheKey::new(resource, address, sub_key);

        if !force_refresh {
            if let Some(payload) = self.inner.cache.get(&key) {
                return decode_cached(&payload);
            }
        }

        let path = format!("{API_PREFIX}/widget/{}/{address}", resource.as_str());
        let query: Vec<(&str, &str)> = match sub_key {
            Some(category) => vec![("category", category)],
            None => Vec::new(),
        };

        let payload: Value = self.inner.transport.get_json(&path, &query, cancel).await?;
        self.inner
            .cache
            .insert(key, payload.clone(), self.inner.widget_cache_ttl);

        decode_cached(&payload)
    }
}

/// Decodes a widget payload out of its stored JSON form.
///
/// Both the live and the cached path go through this, which is what makes a
/// cache hit structurally identical to the fetch that stored it.
fn decode_cached<T>(payload: &Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(payload).map_err(|e| Error::decode(http::StatusCode::OK, payload.to_string(), e))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use polkascore::Client;
///
/// # fn example() -> Result<(), polkascore::Error> {
/// let client = Client::builder()
///     .api_key("pk_live_123")
///     .base_url("https://api.staging.polkascore.io")?
///     .header("X-App-Name", "governance-dashboard")?
///     .timeout(Duration::from_secs(10))
///     .widget_cache_ttl(Duration::from_secs(30))
///     .build()?;
/// # let _ = client;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: Option<Url>,
    headers: HeaderMap,
    timeout: Option<Duration>,
    widget_cache_ttl: Duration,
    cache: Option<ResponseCache>,
}

// The API key and extra headers stay out of debug output.
impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("widget_cache_ttl", &self.widget_cache_ttl)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            headers: HeaderMap::new(),
            timeout: None,
            widget_cache_ttl: DEFAULT_WIDGET_CACHE_TTL,
            cache: None,
        }
    }

    /// Sets the API key. Required; `build()` fails when it is missing or
    /// empty.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Overrides the base URL (defaults to [`DEFAULT_BASE_URL`]).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Adds a header sent with every request, merged over the default
    /// `Authorization` header built from the API key. Setting
    /// `Authorization` here replaces the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Config(format!("invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Config(format!("invalid header value: {e}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Sets a per-request timeout. Unset by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how long widget responses stay fresh in the cache
    /// (default 60 seconds).
    pub fn widget_cache_ttl(mut self, ttl: Duration) -> Self {
        self.widget_cache_ttl = ttl;
        self
    }

    /// Uses a dedicated [`ResponseCache`] instead of the process-wide
    /// shared one. Mainly useful for tests and multi-tenant hosts.
    pub fn cache(mut self, cache: ResponseCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the configured [`Client`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the API key is missing or empty, or
    /// when the key cannot be carried in an `Authorization` header.
    pub fn build(self) -> Result<Client> {
        let api_key = match self.api_key {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                return Err(Error::Config(
                    "an API key is required and must be non-empty".to_string(),
                ))
            }
        };

        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut auth = HeaderValue::try_from(format!("Bearer {api_key}")).map_err(|_| {
            Error::Config("API key contains characters not allowed in a header".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);
        headers.extend(self.headers);

        let transport = Transport::new(base_url, headers, self.timeout)?;
        let cache = self
            .cache
            .unwrap_or_else(|| ResponseCache::shared().clone());

        Ok(Client {
            inner: Arc::new(ClientInner {
                transport,
                cache,
                widget_cache_ttl: self.widget_cache_ttl,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
