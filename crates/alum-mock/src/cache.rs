//! Per-collection TTL cache with an injectable clock.
//!
//! The loader talks to [`CollectionCache`], so tests build isolated caches
//! (and drive time with [`ManualClock`]) instead of sharing global state.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde_json::Value;

/// Millisecond wall clock.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    #[must_use]
    pub const fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, now_ms: u64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Cache of whole collections keyed by collection name.
pub trait CollectionCache: Send + Sync {
    /// Cached items, if present and not expired.
    fn get(&self, key: &str) -> Option<Vec<Value>>;
    fn set(&self, key: &str, items: Vec<Value>);
    fn invalidate(&self, key: &str);
    fn clear(&self);
    /// Keys of live (non-expired) entries, sorted.
    fn keys(&self) -> Vec<String>;
}

#[derive(Debug)]
struct CacheEntry {
    items: Vec<Value>,
    expires_at_ms: u64,
}

/// Flat time-based expiry: an entry lives until `stored_at + ttl`.
/// No size bound, no other eviction.
pub struct TtlCache<C: Clock = SystemClock> {
    ttl_ms: u64,
    clock: C,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl TtlCache<SystemClock> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> TtlCache<C> {
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            ttl_ms: u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX),
            clock,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<C: Clock> CollectionCache for TtlCache<C> {
    fn get(&self, key: &str) -> Option<Vec<Value>> {
        let now = self.clock.now_ms();
        let mut entries = self.lock();
        match entries.get(key) {
            Some(entry) if now < entry.expires_at_ms => Some(entry.items.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, items: Vec<Value>) {
        let expires_at_ms = self.clock.now_ms().saturating_add(self.ttl_ms);
        self.lock().insert(
            key.to_string(),
            CacheEntry {
                items,
                expires_at_ms,
            },
        );
    }

    fn invalidate(&self, key: &str) {
        self.lock().remove(key);
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn keys(&self) -> Vec<String> {
        let now = self.clock.now_ms();
        let mut keys: Vec<String> = self
            .lock()
            .iter()
            .filter(|(_, entry)| now < entry.expires_at_ms)
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }
}

impl<C: Clock> Clock for std::sync::Arc<C> {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
