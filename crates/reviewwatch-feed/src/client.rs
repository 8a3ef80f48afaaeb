//! HTTP client for the per-storefront customer-reviews feed.
//!
//! Wraps `reqwest` with typed error handling and retry on transient
//! failures. The feed is public; no authentication is involved.

use std::time::Duration;

use reqwest::{Client, Url};

use reviewwatch_core::{AppId, ReviewRecord};

use crate::error::FeedError;
use crate::retry::retry_with_backoff;
use crate::storefront::Storefront;
use crate::types::ReviewFeedDocument;

const DEFAULT_BASE_URL: &str = "https://itunes.apple.com/";

/// Client for the "most recent customer reviews" feed of one app.
///
/// Use [`FeedClient::new`] for production or [`FeedClient::with_base_url`] to
/// point at a mock server in tests.
pub struct FeedClient {
    client: Client,
    base_url: Url,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay for exponential backoff: `backoff_base_ms * 2^attempt`.
    backoff_base_ms: u64,
}

impl FeedClient {
    /// Creates a client pointed at the production feed host.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, FeedError> {
        Self::with_base_url(
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`FeedError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, FeedError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // Url::join appends the storefront path rather than replacing the
        // last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| FeedError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches and parses one storefront's most-recent-reviews feed.
    ///
    /// Records come back in feed order (upstream recency order). An app with
    /// no reviews in this storefront yields an empty vector. Transient
    /// failures (timeout, connect error, 5xx) are retried with back-off.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Http`] on network failure after all retries.
    /// - [`FeedError::UnexpectedStatus`] on a non-2xx status (5xx retried,
    ///   4xx not).
    /// - [`FeedError::Deserialize`] if the body does not match the feed
    ///   schema (not retried).
    /// - [`FeedError::InvalidEntry`] if an entry's id or rating is out of
    ///   domain (not retried).
    pub async fn fetch_recent_reviews(
        &self,
        app_id: &AppId,
        storefront: Storefront,
    ) -> Result<Vec<ReviewRecord>, FeedError> {
        let url = self.feed_url(app_id, storefront)?;

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FeedError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                let document: ReviewFeedDocument =
                    serde_json::from_str(&body).map_err(|e| FeedError::Deserialize {
                        context: format!("reviews feed for app {app_id} ({storefront})"),
                        source: e,
                    })?;

                document
                    .feed
                    .entry
                    .into_iter()
                    .map(crate::types::FeedEntry::into_record)
                    .collect()
            }
        })
        .await
    }

    /// Builds the per-storefront feed URL for an app.
    fn feed_url(&self, app_id: &AppId, storefront: Storefront) -> Result<Url, FeedError> {
        let path = format!(
            "{}/rss/customerreviews/id={}/sortBy=mostRecent/json",
            storefront.url_segment(),
            app_id.as_str()
        );
        self.base_url
            .join(&path)
            .map_err(|e| FeedError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}
