// src/fetch.rs
//! Comment fetching: video-ID extraction plus the YouTube Data API v3 client.
//! The API key is an explicit constructor argument, never a process global.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::types::RawComment;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
/// The API serves at most 100 threads per page.
const PAGE_SIZE: usize = 100;

static RE_BARE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-z_-]{11}$").expect("bare id regex"));
static ID_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:v=)([0-9A-Za-z_-]{11})",
        r"youtu\.be/([0-9A-Za-z_-]{11})",
        r"/shorts/([0-9A-Za-z_-]{11})",
        r"/live/([0-9A-Za-z_-]{11})",
        r"/embed/([0-9A-Za-z_-]{11})",
        r"/v/([0-9A-Za-z_-]{11})",
        r"/videos/([0-9A-Za-z_-]{11})",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("video id pattern"))
    .collect()
});
static RE_ANY_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9A-Za-z_-]{11})").expect("any id regex"));

/// Extract a YouTube video ID from a full URL, or return the ID when the
/// input already is one. Supports watch?v=, youtu.be/, /shorts/, /live/,
/// /embed/, /v/ and /videos/ shapes, with a last-resort 11-char scan.
pub fn extract_video_id(url_or_id: &str) -> Option<String> {
    let candidate = url_or_id.trim();
    if candidate.is_empty() {
        return None;
    }

    if RE_BARE_ID.is_match(candidate) {
        return Some(candidate.to_string());
    }

    for pattern in ID_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(candidate) {
            return Some(caps[1].to_string());
        }
    }

    RE_ANY_ID
        .captures(candidate)
        .map(|caps| caps[1].to_string())
}

/// Source of raw comments for a video. The HTTP client implements this;
/// tests substitute their own.
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_comments(&self, video_id: &str, limit: usize) -> Result<Vec<RawComment>>;
    fn name(&self) -> &'static str;
}

/// YouTube Data API v3 client over `commentThreads.list`.
pub struct YouTubeClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Self {
        Self::with_base_url(api_key, DEFAULT_API_BASE, timeout)
    }

    /// Base URL is injectable so tests can point the client at a local stub.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("yt-sentiment-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ThreadListResponse {
    #[serde(default)]
    items: Vec<Thread>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Thread {
    id: Option<String>,
    snippet: Option<ThreadSnippet>,
}

#[derive(Debug, Deserialize)]
struct ThreadSnippet {
    #[serde(rename = "topLevelComment")]
    top_level_comment: Option<TopLevelComment>,
}

#[derive(Debug, Deserialize)]
struct TopLevelComment {
    snippet: Option<CommentSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentSnippet {
    author_display_name: Option<String>,
    published_at: Option<String>,
    #[serde(default)]
    like_count: u64,
    text_original: Option<String>,
    text_display: Option<String>,
}

fn parse_rfc3339_to_utc(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn raw_comment_from(thread: Thread) -> Option<RawComment> {
    let snippet = thread.snippet?.top_level_comment?.snippet?;
    // textOriginal is plain text when textFormat=plainText.
    let text = snippet
        .text_original
        .or(snippet.text_display)
        .unwrap_or_default();
    Some(RawComment {
        comment_id: thread.id,
        author: snippet.author_display_name.unwrap_or_default(),
        published_at: snippet.published_at.as_deref().and_then(parse_rfc3339_to_utc),
        like_count: snippet.like_count,
        text,
    })
}

#[async_trait]
impl CommentSource for YouTubeClient {
    async fn fetch_comments(&self, video_id: &str, limit: usize) -> Result<Vec<RawComment>> {
        let url = format!("{}/commentThreads", self.base_url);
        let mut comments: Vec<RawComment> = Vec::with_capacity(limit.min(PAGE_SIZE));
        let mut page_token: Option<String> = None;

        loop {
            let mut query: Vec<(&str, String)> = vec![
                ("part", "snippet".to_string()),
                ("videoId", video_id.to_string()),
                ("maxResults", PAGE_SIZE.to_string()),
                ("order", "time".to_string()),
                ("textFormat", "plainText".to_string()),
                ("key", self.api_key.clone()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let resp = self
                .http
                .get(&url)
                .query(&query)
                .send()
                .await
                .context("youtube commentThreads request")?;
            if !resp.status().is_success() {
                bail!("youtube api returned {}", resp.status());
            }
            let body: ThreadListResponse = resp
                .json()
                .await
                .context("youtube commentThreads response body")?;

            for thread in body.items {
                if let Some(comment) = raw_comment_from(thread) {
                    comments.push(comment);
                    if comments.len() >= limit {
                        return Ok(comments);
                    }
                }
            }

            page_token = body.next_page_token;
            if page_token.is_none() {
                return Ok(comments);
            }
        }
    }

    fn name(&self) -> &'static str {
        "youtube"
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::json;

    use super::*;

    fn thread_json(id: &str, text: &str) -> serde_json::Value {
        json!({
            "id": id,
            "snippet": { "topLevelComment": { "snippet": {
                "authorDisplayName": "viewer",
                "publishedAt": "2024-03-01T12:00:00Z",
                "likeCount": 0,
                "textOriginal": text,
            }}}
        })
    }

    /// Serve a stub commentThreads endpoint on an ephemeral port and return
    /// its base URL.
    async fn serve_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn paging_follows_next_page_token_to_the_end() {
        let app = Router::new().route(
            "/commentThreads",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let body = match q.get("pageToken").map(String::as_str) {
                    None => json!({
                        "items": [thread_json("c1", "first"), thread_json("c2", "second")],
                        "nextPageToken": "p2",
                    }),
                    Some("p2") => json!({
                        "items": [thread_json("c3", "third")],
                    }),
                    Some(other) => panic!("unexpected page token {other}"),
                };
                Json(body)
            }),
        );
        let base = serve_stub(app).await;

        let client = YouTubeClient::with_base_url("test-key", base, Duration::from_secs(5));
        let comments = client
            .fetch_comments("dQw4w9WgXcQ", 10)
            .await
            .expect("fetch across pages");

        assert_eq!(comments.len(), 3, "both pages must be drained");
        assert_eq!(comments[0].text, "first");
        assert_eq!(comments[2].text, "third");
    }

    #[tokio::test]
    async fn paging_stops_once_limit_is_reached() {
        let pages_served = Arc::new(AtomicUsize::new(0));
        let counter = pages_served.clone();
        let app = Router::new().route(
            "/commentThreads",
            get(move || {
                let counter = counter.clone();
                async move {
                    // Always advertises another page; the client must not
                    // keep following once it has `limit` comments.
                    let page = counter.fetch_add(1, Ordering::SeqCst);
                    Json(json!({
                        "items": [
                            thread_json(&format!("a{page}"), "looks great"),
                            thread_json(&format!("b{page}"), "still great"),
                        ],
                        "nextPageToken": format!("p{}", page + 1),
                    }))
                }
            }),
        );
        let base = serve_stub(app).await;

        let client = YouTubeClient::with_base_url("test-key", base, Duration::from_secs(5));
        let comments = client
            .fetch_comments("dQw4w9WgXcQ", 3)
            .await
            .expect("fetch with limit");

        assert_eq!(comments.len(), 3);
        assert_eq!(
            pages_served.load(Ordering::SeqCst),
            2,
            "limit must stop paging mid-stream"
        );
    }

    #[test]
    fn accepts_bare_ids_and_common_url_shapes() {
        let id = "dQw4w9WgXcQ";
        let inputs = [
            "dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/live/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "  https://youtu.be/dQw4w9WgXcQ  ",
        ];
        for input in inputs {
            assert_eq!(extract_video_id(input).as_deref(), Some(id), "input: {input}");
        }
    }

    #[test]
    fn rejects_inputs_without_an_id() {
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("   "), None);
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id("https://example.com/"), None);
    }

    #[test]
    fn parses_comment_threads_json() {
        let json = r#"{
            "items": [{
                "id": "thread1",
                "snippet": {
                    "topLevelComment": {
                        "snippet": {
                            "authorDisplayName": "viewer",
                            "publishedAt": "2024-03-01T12:00:00Z",
                            "likeCount": 3,
                            "textOriginal": "great video"
                        }
                    }
                }
            }],
            "nextPageToken": "tok"
        }"#;
        let body: ThreadListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.next_page_token.as_deref(), Some("tok"));
        let comment = raw_comment_from(body.items.into_iter().next().unwrap()).unwrap();
        assert_eq!(comment.comment_id.as_deref(), Some("thread1"));
        assert_eq!(comment.author, "viewer");
        assert_eq!(comment.like_count, 3);
        assert_eq!(comment.text, "great video");
        assert!(comment.published_at.is_some());
    }
}
