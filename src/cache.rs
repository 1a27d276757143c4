//! In-memory TTL cache for widget endpoint responses.
//!
//! Widgets re-render often (every config change re-runs the fetch cycle),
//! so the widget-optimized client methods route through this cache while
//! the direct resource methods never do. Entries are keyed by resource +
//! address + optional discriminator and are immutable once stored: a hit
//! returns the payload exactly as it was at store time.
//!
//! [`ResponseCache`] is a cheap clonable handle over shared storage. One
//! process-wide instance lives behind [`ResponseCache::shared`]; every
//! client uses it unless explicitly given its own, which is how multiple
//! independent widgets for the same address end up sharing one cache.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;

/// The widget resource a cache entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetResource {
    /// Total score plus per-category breakdown.
    Reputation,
    /// Profile card data.
    Profile,
    /// Earned badges plus definitions.
    Badges,
    /// A single category score plus its definition.
    Category,
}

impl WidgetResource {
    /// Path segment and log label for this resource.
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetResource::Reputation => "reputation",
            WidgetResource::Profile => "profile",
            WidgetResource::Badges => "badges",
            WidgetResource::Category => "category",
        }
    }
}

/// Cache key: resource + address + optional sub-key.
///
/// The sub-key keeps same-address entries for different sub-resources apart
/// (two category widgets for one address never collide).
///
/// # Examples
///
/// ```
/// use polkascore::{CacheKey, WidgetResource};
///
/// let a = CacheKey::new(WidgetResource::Category, "5F3s", Some("governance"));
/// let b = CacheKey::new(WidgetResource::Category, "5F3s", Some("identity"));
/// assert_ne!(a, b);
/// assert_eq!(a.address(), "5F3s");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    resource: WidgetResource,
    address: String,
    sub_key: Option<String>,
}

impl CacheKey {
    /// Builds a key for `resource` scoped to `address`, with an optional
    /// discriminator such as a category key.
    pub fn new(
        resource: WidgetResource,
        address: impl Into<String>,
        sub_key: Option<&str>,
    ) -> Self {
        Self {
            resource,
            address: address.into(),
            sub_key: sub_key.map(str::to_owned),
        }
    }

    /// The address this key is scoped to.
    pub fn address(&self) -> &str {
        &self.address
    }
}

struct CacheEntry {
    payload: Value,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.inserted_at) > self.ttl
    }
}

/// Keyed TTL store for widget responses.
///
/// Cloning the handle shares the underlying storage. Entries past their TTL
/// are treated as absent on read and pruned opportunistically; nothing runs
/// in the background.
#[derive(Clone, Default)]
pub struct ResponseCache {
    entries: Arc<Mutex<HashMap<CacheKey, CacheEntry>>>,
}

impl ResponseCache {
    /// Creates an empty cache with its own storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache shared by all clients by default.
    pub fn shared() -> &'static ResponseCache {
        static SHARED: LazyLock<ResponseCache> = LazyLock::new(ResponseCache::new);
        &SHARED
    }

    /// Returns the payload stored under `key` if it is still fresh.
    ///
    /// An entry older than its TTL is treated as absent and removed.
    pub fn get(&self, key: &CacheKey) -> Option<Value> {
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired(Instant::now()) => {
                tracing::debug!(
                    resource = key.resource.as_str(),
                    address = %key.address,
                    "cache entry expired"
                );
                entries.remove(key);
                None
            }
            Some(entry) => {
                tracing::debug!(
                    resource = key.resource.as_str(),
                    address = %key.address,
                    "cache hit"
                );
                Some(entry.payload.clone())
            }
            None => {
                tracing::debug!(
                    resource = key.resource.as_str(),
                    address = %key.address,
                    "cache miss"
                );
                None
            }
        }
    }

    /// Stores `payload` under `key`, replacing any previous entry wholesale.
    pub fn insert(&self, key: CacheKey, payload: Value, ttl: Duration) {
        tracing::debug!(
            resource = key.resource.as_str(),
            address = %key.address,
            ttl_ms = ttl.as_millis() as u64,
            "cache insert"
        );
        self.lock().insert(
            key,
            CacheEntry {
                payload,
                inserted_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Removes every entry whose key embeds `address`, leaving entries for
    /// other addresses untouched.
    pub fn clear_for_address(&self, address: &str) {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| key.address != address);
        tracing::debug!(
            address = %address,
            removed = before - entries.len(),
            "cache cleared for address"
        );
    }

    /// Number of unexpired entries.
    pub fn len(&self) -> usize {
        let mut entries = self.lock();
        let now = Instant::now();
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.len()
    }

    /// Returns `true` when no unexpired entry is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, CacheEntry>> {
        // A panic while holding the lock leaves entries intact (writes are
        // wholesale), so recover instead of poisoning every later call.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(60);

    fn key(resource: WidgetResource, address: &str) -> CacheKey {
        CacheKey::new(resource, address, None)
    }

    #[test]
    fn test_stores_and_returns_payload() {
        let cache = ResponseCache::new();
        let k = key(WidgetResource::Badges, "addr-1");

        cache.insert(k.clone(), json!({"count": 3}), TTL);

        assert_eq!(cache.get(&k), Some(json!({"count": 3})));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_treated_as_absent() {
        let cache = ResponseCache::new();
        let k = key(WidgetResource::Reputation, "addr-1");

        cache.insert(k.clone(), json!({"totalScore": 450}), Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(30));

        assert_eq!(cache.get(&k), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_replaces_entry_wholesale() {
        let cache = ResponseCache::new();
        let k = key(WidgetResource::Profile, "addr-1");

        cache.insert(k.clone(), json!({"displayName": "old"}), TTL);
        cache.insert(k.clone(), json!({"displayName": "new"}), TTL);

        assert_eq!(cache.get(&k), Some(json!({"displayName": "new"})));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_sub_key_separates_entries_for_one_address() {
        let cache = ResponseCache::new();
        let governance = CacheKey::new(WidgetResource::Category, "addr-1", Some("governance"));
        let identity = CacheKey::new(WidgetResource::Category, "addr-1", Some("identity"));

        cache.insert(governance.clone(), json!({"score": 10}), TTL);
        cache.insert(identity.clone(), json!({"score": 20}), TTL);

        assert_eq!(cache.get(&governance), Some(json!({"score": 10})));
        assert_eq!(cache.get(&identity), Some(json!({"score": 20})));
    }

    #[test]
    fn test_clear_for_address_is_a_clean_partition() {
        let cache = ResponseCache::new();
        cache.insert(key(WidgetResource::Reputation, "addr-a"), json!(1), TTL);
        cache.insert(key(WidgetResource::Badges, "addr-a"), json!(2), TTL);
        cache.insert(
            CacheKey::new(WidgetResource::Category, "addr-a", Some("governance")),
            json!(3),
            TTL,
        );
        cache.insert(key(WidgetResource::Reputation, "addr-b"), json!(4), TTL);

        cache.clear_for_address("addr-a");

        assert_eq!(cache.get(&key(WidgetResource::Reputation, "addr-a")), None);
        assert_eq!(cache.get(&key(WidgetResource::Badges, "addr-a")), None);
        assert_eq!(
            cache.get(&CacheKey::new(WidgetResource::Category, "addr-a", Some("governance"))),
            None
        );
        assert_eq!(cache.get(&key(WidgetResource::Reputation, "addr-b")), Some(json!(4)));
    }

    #[test]
    fn test_clear_removes_everything() {
        let cache = ResponseCache::new();
        cache.insert(key(WidgetResource::Reputation, "addr-a"), json!(1), TTL);
        cache.insert(key(WidgetResource::Reputation, "addr-b"), json!(2), TTL);

        cache.clear();

        assert!(cache.is_empty());
    }

    #[test]
    fn test_clones_share_storage() {
        let cache = ResponseCache::new();
        let clone = cache.clone();
        let k = key(WidgetResource::Badges, "addr-1");

        cache.insert(k.clone(), json!({"count": 1}), TTL);

        assert_eq!(clone.get(&k), Some(json!({"count": 1})));
    }
}
