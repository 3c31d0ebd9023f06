//! Bounded Cache - memoization demo
//!
//! Classifies the integers given on the command line by prime factorisation,
//! memoizing each result in a `BoundedExpiringCache`, and prints a JSON report
//! with the results and cache statistics.
//!
//! # Environment Variables
//! - `CACHE_CAPACITY` - Maximum cached classifications (default: 1000)
//! - `CACHE_TTL_MS` - Lifetime of a cached classification (default: none)
//! - `RUST_LOG` - Log filter (default: `bounded_cache=info`)

use std::env;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bounded_cache::{BoundedExpiringCache, CacheConfig, CacheStats};

/// Result of classifying one input.
#[derive(Debug, Clone, Serialize)]
struct Classification {
    input: u64,
    kind: &'static str,
    factors: Vec<u64>,
}

/// JSON document printed on exit.
#[derive(Debug, Serialize)]
struct Report {
    generated_at: String,
    capacity: usize,
    ttl_ms: Option<u64>,
    results: Vec<Classification>,
    stats: CacheStats,
    hit_rate: f64,
}

fn main() -> Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bounded_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = CacheConfig::from_env().context("failed to load cache configuration")?;
    info!(
        "Configuration loaded: capacity={}, ttl_ms={:?}",
        config.capacity, config.ttl_ms
    );

    let inputs = env::args()
        .skip(1)
        .map(|arg| {
            arg.parse::<u64>()
                .with_context(|| format!("not a non-negative integer: {arg}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut cache = BoundedExpiringCache::from_config(&config)?;

    let results: Vec<Classification> = inputs
        .into_iter()
        .map(|input| {
            cache.get_or_insert_with(input, || {
                debug!(input, "classifying");
                classify(input)
            })
        })
        .collect();

    let stats = cache.stats();
    info!(
        "Done: hits={}, misses={}, evictions={}",
        stats.hits, stats.misses, stats.evictions
    );

    let report = Report {
        generated_at: chrono::Utc::now().to_rfc3339(),
        capacity: cache.capacity(),
        ttl_ms: config.ttl_ms,
        results,
        hit_rate: stats.hit_rate(),
        stats,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Factorises `input` by trial division.
fn classify(input: u64) -> Classification {
    let factors = prime_factors(input);
    let kind = match (input, factors.len()) {
        (0 | 1, _) => "unit",
        (_, 1) => "prime",
        _ => "composite",
    };

    Classification {
        input,
        kind,
        factors,
    }
}

fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();
    if n < 2 {
        return factors;
    }

    let mut divisor = 2;
    while divisor <= n / divisor {
        while n % divisor == 0 {
            factors.push(divisor);
            n /= divisor;
        }
        divisor += if divisor == 2 { 1 } else { 2 };
    }
    if n > 1 {
        factors.push(n);
    }
    factors
}
