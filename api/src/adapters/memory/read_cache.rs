//! In-memory read cache
//!
//! Entries live in one map keyed by region and key. An optional TTL bounds how
//! long an entry may be served; writes evict whole regions regardless. Region
//! generations sit under the same lock as the entries, so a conditional put can
//! never interleave with an eviction.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{CacheRegion, CacheStats, CachedValue, ReadCache};

/// Cache entry with expiration tracking
#[derive(Debug, Clone)]
struct CacheEntry {
    value: CachedValue,
    inserted_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Option<Duration>) -> bool {
        ttl.is_some_and(|ttl| self.inserted_at.elapsed() > ttl)
    }
}

type EntryKey = (CacheRegion, String);

#[derive(Debug, Default)]
struct Store {
    entries: HashMap<EntryKey, CacheEntry>,
    generations: HashMap<CacheRegion, u64>,
}

impl Store {
    fn generation(&self, region: CacheRegion) -> u64 {
        self.generations.get(&region).copied().unwrap_or(0)
    }
}

/// `ReadCache` backed by a `HashMap` behind a tokio `RwLock`
pub struct InMemoryReadCache {
    store: RwLock<Store>,
    ttl: Option<Duration>,
    max_entries: usize,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl InMemoryReadCache {
    pub fn new(ttl: Option<Duration>, max_entries: usize) -> Self {
        Self {
            store: RwLock::new(Store::default()),
            ttl,
            max_entries: max_entries.max(1),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    fn make_room(&self, entries: &mut HashMap<EntryKey, CacheEntry>) {
        let ttl = self.ttl;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(ttl));
        let mut dropped = before - entries.len();

        while entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.inserted_at)
                .map(|(k, _)| k.clone());

            match oldest {
                Some(key) => {
                    entries.remove(&key);
                    dropped += 1;
                }
                None => break,
            }
        }

        self.evictions.fetch_add(dropped as u64, Ordering::Relaxed);
    }

    fn insert(&self, store: &mut Store, region: CacheRegion, key: &str, value: CachedValue) {
        let entry_key = (region, key.to_string());

        if !store.entries.contains_key(&entry_key) && store.entries.len() >= self.max_entries {
            self.make_room(&mut store.entries);
        }

        store.entries.insert(
            entry_key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }
}

#[async_trait]
impl ReadCache for InMemoryReadCache {
    async fn get(&self, region: CacheRegion, key: &str) -> Option<CachedValue> {
        let store = self.store.read().await;

        match store.entries.get(&(region, key.to_string())) {
            Some(entry) if !entry.is_expired(self.ttl) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::trace!("Cache hit {}:{}", region, key);
                Some(entry.value.clone())
            }
            _ => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    async fn put(&self, region: CacheRegion, key: &str, value: CachedValue) {
        let mut store = self.store.write().await;
        self.insert(&mut store, region, key, value);
    }

    async fn generation(&self, region: CacheRegion) -> u64 {
        self.store.read().await.generation(region)
    }

    async fn put_if_generation(
        &self,
        region: CacheRegion,
        key: &str,
        value: CachedValue,
        generation: u64,
    ) -> bool {
        let mut store = self.store.write().await;

        if store.generation(region) != generation {
            tracing::debug!("Discarded stale load for {}:{}", region, key);
            return false;
        }

        self.insert(&mut store, region, key, value);
        true
    }

    async fn evict_region(&self, region: CacheRegion) -> usize {
        let mut store = self.store.write().await;
        *store.generations.entry(region).or_insert(0) += 1;

        let before = store.entries.len();
        store.entries.retain(|(r, _), _| *r != region);
        let dropped = before - store.entries.len();

        if dropped > 0 {
            self.evictions.fetch_add(dropped as u64, Ordering::Relaxed);
            tracing::debug!("Evicted {} entries from cache region {}", dropped, region);
        }

        dropped
    }

    async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;

        CacheStats {
            entries: store.entries.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
