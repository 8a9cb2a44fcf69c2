pub mod cache;
pub mod report;
pub mod server;
pub mod years;

use anyhow::{Context, Result};
use cf_wrapped_libs::{
    cache::{FileStore, SystemClock, UserDataCache},
    codeforces::{CodeforcesClient, DEFAULT_API_URL},
    AggregationSettings, TimeNormalizer, UserDataLoader, YearZone,
};
use clap::ValueEnum;
use std::{env, fmt, path::PathBuf, sync::Arc};

#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub fn aggregation_settings() -> Result<AggregationSettings> {
    let bucket = match env::var("BUCKET_UTC_OFFSET") {
        Ok(value) => value.parse::<TimeNormalizer>().with_context(|| {
            let message = format!("BUCKET_UTC_OFFSET `{}` is not a valid UTC offset", value);
            tracing::error!(message);
            message
        })?,
        Err(_) => TimeNormalizer::default(),
    };
    let zone = match env::var("YEAR_TIMEZONE") {
        Ok(value) => value.parse::<YearZone>().with_context(|| {
            let message = format!("YEAR_TIMEZONE `{}` must be `local` or a UTC offset", value);
            tracing::error!(message);
            message
        })?,
        Err(_) => YearZone::Local,
    };

    tracing::debug!("bucket days at {}, delimit years at {}", bucket, zone);
    Ok(AggregationSettings { bucket, zone })
}

pub fn cache_directory() -> PathBuf {
    env::var("CACHE_DIRECTORY")
        .map(PathBuf::from)
        .unwrap_or_else(|_| FileStore::default_directory())
}

pub fn build_cache() -> Result<UserDataCache> {
    let ttl_seconds: i64 = match env::var("CACHE_TTL_SECONDS") {
        Ok(value) => value.parse().with_context(|| {
            let message = format!("CACHE_TTL_SECONDS `{}` is not an integer", value);
            tracing::error!(message);
            message
        })?,
        Err(_) => 600,
    };

    let directory = cache_directory();
    tracing::debug!("cache entries live in {}", directory.display());

    Ok(UserDataCache::new(
        Box::new(FileStore::new(directory)),
        Arc::new(SystemClock),
        ttl_seconds * 1000,
    ))
}

pub fn build_loader() -> Result<UserDataLoader> {
    let api_url = env::var("CODEFORCES_API_URL").unwrap_or_else(|_| {
        tracing::debug!("CODEFORCES_API_URL is not set. Default value `{}` will be used.", DEFAULT_API_URL);
        String::from(DEFAULT_API_URL)
    });
    let client = CodeforcesClient::new(&api_url).with_context(|| {
        let message = format!("couldn't create Codeforces client for `{}`", api_url);
        tracing::error!(message);
        message
    })?;

    Ok(UserDataLoader::new(Box::new(client), build_cache()?))
}
