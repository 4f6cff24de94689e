//! YouTube Data API v3 wire types and the HTTP client that calls it.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::{debug, instrument, trace};

use crate::config::Config;
use crate::error::{Error, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error reasons Google reports when a key has run out of quota.
const QUOTA_REASONS: &[&str] = &[
    "quotaExceeded",
    "dailyLimitExceeded",
    "rateLimitExceeded",
    "userRateLimitExceeded",
];

/// Response of `search.list`.
///
/// See: <https://developers.google.com/youtube/v3/docs/search/list>
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchResult>,
    /// Token for the next page, absent on the last one.
    pub next_page_token: Option<String>,
}

impl SearchListResponse {
    /// Video ids on this page, in the order the API returned them.
    pub fn video_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| item.id.video_id.clone())
            .collect()
    }

    /// The continuation token, if it points anywhere.
    pub fn next_page(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|token| !token.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchResult {
    pub id: SearchResultId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultId {
    pub video_id: Option<String>,
}

/// Response of `videos.list`.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Default, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<Video>,
}

/// A `video` resource with the `snippet` and `statistics` parts.
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub id: String,
    pub snippet: VideoSnippet,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    /// ISO 8601 timestamp.
    pub published_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    /// Decimal string, e.g. `"123456"`.
    pub view_count: Option<String>,
}

/// Google's JSON error envelope.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    reason: String,
}

/// The two calls needed to walk a channel's uploads.
#[allow(async_fn_in_trait)]
pub trait VideoApi {
    /// One page of the channel's videos, newest first.
    async fn search(&self, channel_id: &str, page_token: Option<&str>) -> Result<SearchListResponse>;

    /// Snippet and statistics for a batch of video ids.
    async fn video_details(&self, ids: &[String]) -> Result<Vec<Video>>;
}

/// API-key authenticated client for the YouTube Data API.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self::with_http_client(config, client))
    }

    pub fn with_http_client(config: &Config, client: Client) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.api_base_url.clone(),
        }
    }

    async fn get<T>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint))
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await);
        }

        let body = response.text().await?;
        trace!(endpoint, %body, "raw response");
        serde_json::from_str(&body)
            .map_err(|e| Error::MalformedResponse(format!("{} response: {}", endpoint, e)))
    }
}

impl VideoApi for YouTubeClient {
    #[instrument(skip(self), err)]
    async fn search(&self, channel_id: &str, page_token: Option<&str>) -> Result<SearchListResponse> {
        let mut query = vec![
            ("channelId", channel_id),
            ("part", "snippet"),
            ("order", "date"),
            ("type", "video"),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let page: SearchListResponse = self.get("search", &query).await?;
        debug!(
            items = page.items.len(),
            next_page = page.next_page(),
            "search page received"
        );
        Ok(page)
    }

    #[instrument(skip(self), fields(count = ids.len()), err)]
    async fn video_details(&self, ids: &[String]) -> Result<Vec<Video>> {
        let joined = ids.join(",");
        let list: VideoListResponse = self
            .get("videos", &[("id", joined.as_str()), ("part", "snippet,statistics")])
            .await?;
        Ok(list.items)
    }
}

async fn error_from_response(response: Response) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    classify_error(status, &body)
}

/// Turn a non-success status and body into the matching error.
pub fn classify_error(status: u16, body: &str) -> Error {
    let (message, quota) = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) => {
            let quota = error
                .errors
                .iter()
                .any(|detail| QUOTA_REASONS.contains(&detail.reason.as_str()));
            (error.message, quota)
        }
        Err(_) => (body.trim().to_string(), false),
    };

    // 429 is a rate limit whatever the body looks like
    if quota || status == 429 {
        Error::QuotaExceeded(message)
    } else {
        Error::Api { status, message }
    }
}
