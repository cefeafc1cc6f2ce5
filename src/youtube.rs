//! YouTube metadata lookup
//!
//! Resolves a video id (or any common YouTube URL form) into the metadata
//! the thumbnail styles draw: title, channel, duration, view count, and the
//! best cover URL. Lookup goes through the public Innertube `player`
//! endpoint with a typed response model.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use crate::errors::{AppError, AppResult};
use crate::validation::validate_video_id;

const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player?prettyPrint=false";
const INNERTUBE_CLIENT_NAME: &str = "WEB";
const INNERTUBE_CLIENT_VERSION: &str = "2.20240726.00.00";

// Placeholders for missing metadata fields; drawn verbatim on thumbnails
pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_CHANNEL: &str = "Unknown Channel";
pub const UNKNOWN_DURATION: &str = "Unknown";
pub const UNKNOWN_VIEWS: &str = "Unknown Views";

lazy_static! {
    static ref VIDEO_URL_PATTERN: Regex = Regex::new(
        r"(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?v=|shorts/)|youtu\.be/)([\w-]{11})"
    )
    .expect("Invalid YouTube URL regex pattern");
}

/// Metadata rendered onto a "now playing" thumbnail
#[derive(Debug, Clone, PartialEq)]
pub struct VideoMeta {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    /// Human form, `m:ss` or `h:mm:ss`
    pub duration: String,
    /// Human short form, e.g. `1.2M`
    pub views: String,
    pub cover_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    video_details: Option<VideoDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    title: Option<String>,
    author: Option<String>,
    length_seconds: Option<String>,
    view_count: Option<String>,
    thumbnail: Option<ThumbnailList>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailList {
    thumbnails: Vec<ThumbnailInfo>,
}

#[derive(Debug, Deserialize)]
struct ThumbnailInfo {
    url: String,
    width: u32,
    #[allow(dead_code)]
    height: u32,
}

/// Extract a video id from a bare id or any common YouTube URL form
pub fn parse_video_id(input: &str) -> Option<String> {
    let trimmed = input.trim();

    if let Ok(id) = validate_video_id(trimmed) {
        return Some(id.to_string());
    }

    VIDEO_URL_PATTERN
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Fallback cover art location when the metadata carries no thumbnail list
pub fn default_cover_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}

/// Thin client over the Innertube `player` endpoint
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    http: reqwest::Client,
}

impl YouTubeClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Fetch metadata for a video id
    pub async fn video_meta(&self, video_id: &str) -> AppResult<VideoMeta> {
        let id =
            validate_video_id(video_id).map_err(|e| AppError::Validation(format!("{}: {}", e, video_id)))?;

        let body = serde_json::json!({
            "context": {
                "client": {
                    "clientName": INNERTUBE_CLIENT_NAME,
                    "clientVersion": INNERTUBE_CLIENT_VERSION,
                }
            },
            "videoId": id,
        });

        let response = self.http.post(PLAYER_ENDPOINT).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Metadata(format!(
                "player endpoint returned {} for {}",
                response.status(),
                id
            )));
        }

        let player: PlayerResponse = response.json().await?;
        let details = player
            .video_details
            .ok_or_else(|| AppError::Metadata(format!("no videoDetails for {}", id)))?;

        let cover_url = details
            .thumbnail
            .as_ref()
            .and_then(|list| list.thumbnails.iter().max_by_key(|thumb| thumb.width))
            // Query parameters on thumbnail URLs break some CDNs, strip them
            .map(|thumb| thumb.url.split('?').next().unwrap_or(&thumb.url).to_string())
            .unwrap_or_else(|| default_cover_url(id));

        let meta = VideoMeta {
            video_id: id.to_string(),
            title: details
                .title
                .filter(|title| !title.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
            channel: details
                .author
                .filter(|author| !author.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_CHANNEL.to_string()),
            duration: details
                .length_seconds
                .as_deref()
                .and_then(|raw| raw.parse::<u64>().ok())
                .map(format_duration)
                .unwrap_or_else(|| UNKNOWN_DURATION.to_string()),
            views: details
                .view_count
                .as_deref()
                .and_then(|raw| raw.parse::<u64>().ok())
                .map(format_short_count)
                .unwrap_or_else(|| UNKNOWN_VIEWS.to_string()),
            cover_url,
        };

        debug!(video_id = %meta.video_id, title = %meta.title, "Video metadata resolved");
        Ok(meta)
    }
}

/// Format a length in seconds as `m:ss` or `h:mm:ss`
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Format a count in short human form: `987`, `12K`, `1.2M`, `3.4B`
pub fn format_short_count(count: u64) -> String {
    const STEPS: [(u64, &str); 3] = [
        (1_000_000_000, "B"),
        (1_000_000, "M"),
        (1_000, "K"),
    ];

    for (step, suffix) in STEPS {
        if count >= step {
            let scaled = count as f64 / step as f64;
            return if scaled < 10.0 {
                let rounded = (scaled * 10.0).floor() / 10.0;
                if (rounded - rounded.floor()).abs() < f64::EPSILON {
                    format!("{}{}", rounded as u64, suffix)
                } else {
                    format!("{:.1}{}", rounded, suffix)
                }
            } else {
                format!("{}{}", scaled.floor() as u64, suffix)
            };
        }
    }

    count.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_id() {
        assert_eq!(
            parse_video_id("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_parse_url_forms() {
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42",
            "youtube.com/shorts/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
        ] {
            assert_eq!(
                parse_video_id(url),
                Some("dQw4w9WgXcQ".to_string()),
                "failed for {}",
                url
            );
        }
    }

    #[test]
    fn test_parse_rejects_junk() {
        assert_eq!(parse_video_id(""), None);
        assert_eq!(parse_video_id("https://example.com/watch?v=abc"), None);
        assert_eq!(parse_video_id("hello world"), None);
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(59), "0:59");
        assert_eq!(format_duration(61), "1:01");
        assert_eq!(format_duration(225), "3:45");
        assert_eq!(format_duration(3600), "1:00:00");
        assert_eq!(format_duration(3725), "1:02:05");
    }

    #[test]
    fn test_short_count_formatting() {
        assert_eq!(format_short_count(0), "0");
        assert_eq!(format_short_count(987), "987");
        assert_eq!(format_short_count(1_000), "1K");
        assert_eq!(format_short_count(1_234), "1.2K");
        assert_eq!(format_short_count(12_345), "12K");
        assert_eq!(format_short_count(1_200_000), "1.2M");
        assert_eq!(format_short_count(87_000_000), "87M");
        assert_eq!(format_short_count(2_500_000_000), "2.5B");
    }

    #[test]
    fn test_default_cover_url() {
        assert_eq!(
            default_cover_url("dQw4w9WgXcQ"),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }

    #[test]
    fn test_player_response_parsing() {
        let raw = r#"{
            "videoDetails": {
                "videoId": "dQw4w9WgXcQ",
                "title": "Test Song",
                "author": "Test Channel",
                "lengthSeconds": "225",
                "viewCount": "1234567",
                "thumbnail": {
                    "thumbnails": [
                        {"url": "https://i.ytimg.com/small.jpg?sqp=x", "width": 120, "height": 90},
                        {"url": "https://i.ytimg.com/large.jpg?sqp=y", "width": 1280, "height": 720}
                    ]
                }
            }
        }"#;

        let parsed: PlayerResponse = serde_json::from_str(raw).unwrap();
        let details = parsed.video_details.unwrap();
        assert_eq!(details.title.as_deref(), Some("Test Song"));
        assert_eq!(details.length_seconds.as_deref(), Some("225"));
        assert_eq!(details.thumbnail.unwrap().thumbnails.len(), 2);
    }
}
