//! Walks every search page of a channel and keeps the videos above the view threshold.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::{Video, VideoApi};
use crate::config::Config;
use crate::error::{Error, Result};

/// A video that passed the view threshold, as written to the results file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub title: String,
    /// View count exactly as the API reported it
    pub views: String,
    /// ISO 8601 publish timestamp
    pub upload_date: String,
    pub url: String,
}

impl VideoSummary {
    /// `views` is the count as the API reported it, already checked by the caller
    pub fn from_video(video: Video, views: String) -> Self {
        Self {
            url: video_url(&video.id),
            title: video.snippet.title,
            views,
            upload_date: video.snippet.published_at,
        }
    }
}

/// Watch page URL for a video id
pub fn video_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Parse the view count of a video, returning it alongside the raw string.
///
/// `Ok(None)` when the API left the count out (statistics hidden), an error when
/// it is present but not a number.
pub fn view_count(video: &Video) -> Result<Option<(u64, &str)>> {
    let Some(raw) = video.statistics.as_ref().and_then(|s| s.view_count.as_deref()) else {
        return Ok(None);
    };

    raw.trim().parse::<u64>().map(|views| Some((views, raw))).map_err(|_| {
        Error::MalformedResponse(format!(
            "video {} has non-numeric view count {:?}",
            video.id, raw
        ))
    })
}

/// Strictly more views than the threshold
pub fn is_popular(views: u64, min_views: u64) -> bool {
    views > min_views
}

pub struct Collector<A> {
    api: A,
    channel_id: String,
    min_views: u64,
}

impl<A: VideoApi> Collector<A> {
    pub fn new(api: A, config: &Config) -> Self {
        Self {
            api,
            channel_id: config.channel_id.clone(),
            min_views: config.min_views,
        }
    }

    /// Collect popular videos starting from the channel's first page
    pub async fn collect(&self) -> Result<Vec<VideoSummary>> {
        self.collect_from(None).await
    }

    /// Collect popular videos from `page_token` onwards.
    ///
    /// Pages are visited one after another; results keep page order and the
    /// API's order within each page. A page without any video ends the walk.
    pub async fn collect_from(&self, page_token: Option<&str>) -> Result<Vec<VideoSummary>> {
        let mut videos = Vec::new();
        let mut page_token = page_token.filter(|t| !t.is_empty()).map(String::from);
        let mut page_number = 0usize;

        loop {
            page_number += 1;
            let page = self.api.search(&self.channel_id, page_token.as_deref()).await?;

            let ids = page.video_ids();
            debug!(page = page_number, ids = %ids.join(","), "retrieved video ids");
            if ids.is_empty() {
                break;
            }

            let details = self.api.video_details(&ids).await?;
            let popular = self.filter_popular(details)?;
            info!(
                page = page_number,
                found = ids.len(),
                kept = popular.len(),
                "page processed"
            );
            videos.extend(popular);

            match page.next_page() {
                Some(token) => page_token = Some(token.to_string()),
                None => break,
            }
        }

        info!(pages = page_number, total = videos.len(), "collection finished");
        Ok(videos)
    }

    fn filter_popular(&self, details: Vec<Video>) -> Result<Vec<VideoSummary>> {
        let mut kept = Vec::new();

        for video in details {
            let Some((views, raw)) = view_count(&video)? else {
                warn!(video = %video.id, "no view count reported, skipping");
                continue;
            };

            if is_popular(views, self.min_views) {
                let raw = raw.to_string();
                kept.push(VideoSummary::from_video(video, raw));
            }
        }

        Ok(kept)
    }
}
