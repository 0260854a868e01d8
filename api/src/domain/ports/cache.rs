//! Read cache port
//!
//! Cached entries are grouped into regions. Writes never update entries in place;
//! they evict whole regions. A load that started before an eviction must not be
//! stored after it, so each region carries a generation counter.

use async_trait::async_trait;

use crate::domain::entities::{Company, EmployeeSummary};

/// Named group of cache entries invalidated as a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheRegion {
    /// Company listings
    Companies,
    /// Company details, keyed by company name
    Company,
    /// Employee listings
    Employees,
}

impl std::fmt::Display for CacheRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheRegion::Companies => write!(f, "companies"),
            CacheRegion::Company => write!(f, "company"),
            CacheRegion::Employees => write!(f, "employees"),
        }
    }
}

/// Values the services are allowed to cache
#[derive(Debug, Clone)]
pub enum CachedValue {
    Companies(Vec<Company>),
    Company(Company),
    Employees(Vec<EmployeeSummary>),
}

/// Cache counters, for diagnostics and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Process-wide read cache shared by the services
#[async_trait]
pub trait ReadCache: Send + Sync {
    /// Look up a live entry
    async fn get(&self, region: CacheRegion, key: &str) -> Option<CachedValue>;

    /// Store or replace an entry
    async fn put(&self, region: CacheRegion, key: &str, value: CachedValue);

    /// Current generation of a region. Every eviction of the region advances it.
    async fn generation(&self, region: CacheRegion) -> u64;

    /// Store an entry only if the region is still at `generation`.
    ///
    /// Returns false, storing nothing, when the region was evicted after the
    /// caller read the generation.
    async fn put_if_generation(
        &self,
        region: CacheRegion,
        key: &str,
        value: CachedValue,
        generation: u64,
    ) -> bool;

    /// Drop every entry in a region and advance its generation. Returns how many
    /// entries were dropped.
    async fn evict_region(&self, region: CacheRegion) -> usize;

    /// Current counters
    async fn stats(&self) -> CacheStats;
}
