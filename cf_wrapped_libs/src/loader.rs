use crate::{
    cache::UserDataCache,
    codeforces::{client::UserDataSource, CodeforcesError, UserData},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("user {0} not found")]
    UserNotFound(String, #[source] CodeforcesError),
}

/// Serves user data from the cache, falling back to the upstream source.
pub struct UserDataLoader {
    source: Box<dyn UserDataSource>,
    cache: UserDataCache,
}

impl UserDataLoader {
    pub fn new(source: Box<dyn UserDataSource>, cache: UserDataCache) -> Self {
        Self { source, cache }
    }

    pub fn cache(&self) -> &UserDataCache {
        &self.cache
    }

    /// Loads the three feeds of `handle`.
    ///
    /// Any upstream failure is reported as the user not being found; the cause stays
    /// reachable through `source()`. Successful fetches are cached.
    pub async fn load(&self, handle: &str, force_refresh: bool) -> Result<UserData, LoaderError> {
        if !force_refresh {
            if let Some(data) = self.cache.get(handle) {
                tracing::info!("serve {} from cache", handle);
                return Ok(data);
            }
        }

        let data = self.source.fetch_all(handle).await.map_err(|e| {
            tracing::error!("failed to fetch data of {}: {:?}", handle, e);
            LoaderError::UserNotFound(handle.to_string(), e)
        })?;

        tracing::info!(
            "fetched {} submissions and {} rating changes of {}",
            data.submissions.len(),
            data.rating_history.len(),
            handle
        );
        self.cache.set(handle, &data);

        Ok(data)
    }
}
