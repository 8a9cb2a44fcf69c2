use crate::codeforces::model::*;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::time::Duration;

type Result<T> = std::result::Result<T, CodeforcesError>;

pub const DEFAULT_API_URL: &str = "https://codeforces.com/api";

#[derive(Debug, Error)]
pub enum CodeforcesError {
    #[error("failed to request to Codeforces API")]
    RequestError(#[from] reqwest::Error),
    #[error("failed to decode Codeforces API response")]
    DeserializeError(#[from] serde_json::Error),
    #[error("invalid Codeforces API url given")]
    InvalidUrlError(#[from] url::ParseError),
    #[error("Codeforces API returned an error: {0}")]
    ApiError(String),
    #[error("user {0} not found")]
    UserNotFound(String),
}

impl<T> ApiResponse<T> {
    pub fn into_result(self) -> Result<T> {
        match (self.status.as_str(), self.result) {
            ("OK", Some(result)) => Ok(result),
            _ => Err(CodeforcesError::ApiError(
                self.comment
                    .unwrap_or_else(|| format!("status {}", self.status)),
            )),
        }
    }
}

/// Source of the three raw feeds of a user.
#[async_trait]
pub trait UserDataSource: Send + Sync {
    async fn user_info(&self, handle: &str) -> Result<User>;
    async fn submissions(&self, handle: &str) -> Result<Vec<Submission>>;
    async fn rating_history(&self, handle: &str) -> Result<Vec<RatingChange>>;

    /// Fetches the three feeds concurrently. Any failure fails the whole fetch.
    async fn fetch_all(&self, handle: &str) -> Result<UserData> {
        let (user_info, submissions, rating_history) = futures::try_join!(
            self.user_info(handle),
            self.submissions(handle),
            self.rating_history(handle)
        )?;

        Ok(UserData {
            user_info,
            submissions,
            rating_history,
        })
    }
}

pub struct CodeforcesClient {
    base_url: Url,
    client: Client,
}

impl CodeforcesClient {
    pub fn new(api_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(api_url)?;
        // keep the last path segment when joining method names
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { base_url, client })
    }

    pub fn method_url(&self, method: &str) -> Result<Url> {
        Ok(self.base_url.join(method)?)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = self.method_url(method)?;
        tracing::info!("Request {} with {:?}", url, params);

        // failures come back as 400 with a FAILED envelope, so the body is read regardless of status
        let res = self.client.get(url).query(params).send().await?;
        let text = res.text().await?;
        let body: ApiResponse<T> = serde_json::from_str(&text)?;

        body.into_result().map_err(|e| {
            tracing::warn!("{} failed: {}", method, e);
            e
        })
    }
}

#[async_trait]
impl UserDataSource for CodeforcesClient {
    async fn user_info(&self, handle: &str) -> Result<User> {
        let users: Vec<User> = self.call("user.info", &[("handles", handle)]).await?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| CodeforcesError::UserNotFound(handle.to_string()))
    }

    async fn submissions(&self, handle: &str) -> Result<Vec<Submission>> {
        self.call("user.status", &[("handle", handle)]).await
    }

    async fn rating_history(&self, handle: &str) -> Result<Vec<RatingChange>> {
        self.call("user.rating", &[("handle", handle)]).await
    }
}
