//! Read-through caching helpers shared by the services
//!
//! Each mutation names the regions it invalidates; reads go through
//! `get_or_populate`, which only stores successful loads.

use std::future::Future;

use crate::domain::entities::{Company, EmployeeSummary};
use crate::domain::ports::{CacheRegion, CachedValue, ReadCache};
use crate::error::DomainError;

/// Key used for whole-table listings
pub const ALL_KEY: &str = "all";

/// Regions dropped after a company is created
pub const COMPANY_WRITE: &[CacheRegion] = &[CacheRegion::Companies];

/// Regions dropped after a company (and its staff) is removed
pub const COMPANY_REMOVE: &[CacheRegion] = &[
    CacheRegion::Companies,
    CacheRegion::Company,
    CacheRegion::Employees,
];

/// Regions dropped after an employee is added, fired or transferred
pub const EMPLOYEE_WRITE: &[CacheRegion] = &[CacheRegion::Employees];

/// Values that can round-trip through the read cache
pub trait Cacheable: Sized {
    fn into_cached(self) -> CachedValue;
    fn from_cached(value: CachedValue) -> Option<Self>;
}

impl Cacheable for Vec<Company> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Companies(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Companies(list) => Some(list),
            _ => None,
        }
    }
}

impl Cacheable for Company {
    fn into_cached(self) -> CachedValue {
        CachedValue::Company(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Company(company) => Some(company),
            _ => None,
        }
    }
}

impl Cacheable for Vec<EmployeeSummary> {
    fn into_cached(self) -> CachedValue {
        CachedValue::Employees(self)
    }

    fn from_cached(value: CachedValue) -> Option<Self> {
        match value {
            CachedValue::Employees(list) => Some(list),
            _ => None,
        }
    }
}

/// Serve `region:key` from the cache, or run `load` and cache its result.
///
/// Errors from `load` are returned as-is and never cached. A result loaded while
/// the region was evicted is returned to the caller but not stored.
pub async fn get_or_populate<C, T, F, Fut>(
    cache: &C,
    region: CacheRegion,
    key: &str,
    load: F,
) -> Result<T, DomainError>
where
    C: ReadCache + ?Sized,
    T: Cacheable + Clone,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, DomainError>>,
{
    let generation = cache.generation(region).await;
    if let Some(value) = cache.get(region, key).await.and_then(T::from_cached) {
        return Ok(value);
    }

    let value = load().await?;
    cache
        .put_if_generation(region, key, value.clone().into_cached(), generation)
        .await;

    Ok(value)
}

/// Drop every listed region
pub async fn evict_regions<C>(cache: &C, regions: &[CacheRegion])
where
    C: ReadCache + ?Sized,
{
    for region in regions {
        cache.evict_region(*region).await;
    }

    let stats = cache.stats().await;
    tracing::debug!(
        entries = stats.entries,
        hits = stats.hits,
        misses = stats.misses,
        evictions = stats.evictions,
        "Read cache after write"
    );
}
