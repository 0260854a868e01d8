use std::env;
use std::time::Duration;

use anyhow::Context;

/// Token bucket settings for the public authentication routes
#[derive(Clone, Copy, Debug)]
pub struct RateLimit {
    pub per_second: u64,
    pub burst_size: u32,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Password given to the seeded admin/moderator/user accounts
    pub default_password: String,
    pub session_ttl: chrono::Duration,
    /// Read cache entry lifetime; `None` keeps entries until a write evicts them
    pub cache_ttl: Option<Duration>,
    pub cache_max_entries: usize,
    /// `None` disables rate limiting (tests build routers without a peer address)
    pub rate_limit: Option<RateLimit>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let cache_ttl_secs: u64 = parse_var("CACHE_TTL_SECS", 0)?;
        let rate_limit = RateLimit {
            per_second: parse_var("RATE_LIMIT_PER_SECOND", 2)?,
            burst_size: parse_var("RATE_LIMIT_BURST", 5)?,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: parse_var("PORT", 8080)?,
            default_password: env::var("DEFAULT_PASSWORD")
                .unwrap_or_else(|_| "topsecret".to_string()),
            session_ttl: chrono::Duration::hours(parse_var("SESSION_TTL_HOURS", 24 * 7)?),
            cache_ttl: (cache_ttl_secs > 0).then(|| Duration::from_secs(cache_ttl_secs)),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES", 1024)?,
            rate_limit: Some(rate_limit),
        })
    }
}

/// Read an optional numeric variable, falling back to `default` when unset
fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        Err(_) => Ok(default),
    }
}
