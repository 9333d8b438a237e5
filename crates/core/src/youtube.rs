use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::error::{Result, SmashcutError};

pub const VIDEOS_URL: &str = "https://www.googleapis.com/youtube/v3/videos";
pub const ACCESS_TOKEN_ENV: &str = "YOUTUBE_ACCESS_TOKEN";

static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/)([a-zA-Z0-9_-]{11})",
    )
    .expect("video url pattern is valid")
});

static BARE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9_-]{11})$").expect("video id pattern is valid"));

static ISO_DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub duration: String,
    pub channel_title: String,
    pub published_at: String,
}

/// Pull the 11-character video id out of a YouTube link or a bare id.
pub fn extract_video_id(url: &str) -> Option<String> {
    let url = url.trim();
    VIDEO_URL_RE
        .captures(url)
        .or_else(|| BARE_ID_RE.captures(url))
        .map(|caps| caps[1].to_string())
}

/// `PT1H2M3S` -> `1:02:03`, `PT2M30S` -> `2:30`.
pub fn format_iso_duration(iso: &str) -> String {
    if iso.is_empty() {
        return "Unknown".to_string();
    }
    let Some(caps) = ISO_DURATION_RE.captures(iso) else {
        return iso.to_string();
    };
    if caps.get(1).is_none() && caps.get(2).is_none() && caps.get(3).is_none() {
        return iso.to_string();
    }

    let field = |i: usize| {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0)
    };
    let (hours, minutes, seconds) = (field(1), field(2), field(3));

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Build a [`VideoInfo`] from a `videos.list` response body.
pub fn video_from_response(video_id: &str, body: &Value) -> Result<VideoInfo> {
    let item = body["items"]
        .as_array()
        .and_then(|items| items.first())
        .ok_or_else(|| SmashcutError::VideoNotFound {
            video_id: video_id.to_string(),
        })?;

    let snippet = &item["snippet"];
    let text = |v: &Value| v.as_str().unwrap_or_default().to_string();

    let thumbnails = &snippet["thumbnails"];
    let thumbnail_url = ["maxres", "high", "medium", "default"]
        .iter()
        .find_map(|size| thumbnails[*size]["url"].as_str())
        .unwrap_or_default()
        .to_string();

    Ok(VideoInfo {
        id: item["id"].as_str().unwrap_or(video_id).to_string(),
        title: text(&snippet["title"]),
        description: text(&snippet["description"]),
        thumbnail_url,
        duration: format_iso_duration(item["contentDetails"]["duration"].as_str().unwrap_or_default()),
        channel_title: text(&snippet["channelTitle"]),
        published_at: text(&snippet["publishedAt"]),
    })
}

/// Fetch title, duration and thumbnail for a video via the YouTube Data API.
pub async fn fetch_video(access_token: Option<&str>, url: &str) -> Result<VideoInfo> {
    let video_id = extract_video_id(url).ok_or_else(|| SmashcutError::InvalidVideoUrl {
        url: url.to_string(),
    })?;
    let access_token = access_token
        .filter(|t| !t.is_empty())
        .ok_or(SmashcutError::MissingAccessToken)?;

    info!(video_id = %video_id, "fetching video metadata");
    let response = reqwest::Client::new()
        .get(VIDEOS_URL)
        .query(&[("part", "snippet,contentDetails"), ("id", video_id.as_str())])
        .header("Authorization", format!("Bearer {}", access_token))
        .send()
        .await?;

    let status = response.status();
    match status {
        reqwest::StatusCode::UNAUTHORIZED => return Err(SmashcutError::AuthExpired),
        reqwest::StatusCode::FORBIDDEN => return Err(SmashcutError::AccessDenied),
        s if !s.is_success() => {
            return Err(SmashcutError::ApiFailed {
                status: s.as_u16(),
                message: format!(
                    "Failed to fetch video: {}",
                    s.canonical_reason().unwrap_or("unknown")
                ),
            });
        }
        _ => {}
    }

    let body = response.json::<Value>().await?;
    video_from_response(&video_id, &body)
}
