//! In-process adapters

pub mod read_cache;

pub use read_cache::InMemoryReadCache;
