// src/translate.rs
//! Translation client: provider trait + the public gtx endpoint provider.
//!
//! Translation is strictly best-effort. Every failure mode maps to a
//! `TranslateError` variant so the pipeline can record *why* it kept the
//! original text, and tests can assert on fallback occurrence instead of
//! relying on caught panics or log output.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

/// Target language for scoring; both lexicons are English.
pub const TARGET_LANG: &str = "en";

/// Public endpoint used by the default provider; unauthenticated, so it
/// needs no credentials but may throttle under load.
pub const DEFAULT_GTX_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Why a translation attempt produced no usable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateError {
    /// Request never completed (connect/timeout/transport).
    Network,
    /// Endpoint answered with a non-success status (quota, throttling, ...).
    BadStatus,
    /// Response body did not contain a usable translation.
    Parse,
    /// No translation endpoint is configured.
    Disabled,
}

impl fmt::Display for TranslateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TranslateError::Network => "network error",
            TranslateError::BadStatus => "bad response status",
            TranslateError::Parse => "unparseable response",
            TranslateError::Disabled => "translation disabled",
        };
        f.write_str(s)
    }
}

impl std::error::Error for TranslateError {}

/// What the language pipeline did with one comment.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationOutcome {
    /// Text was translated to the target language.
    Translated(String),
    /// Already in the target language (or detection failed); nothing to do.
    Skipped,
    /// Translation was attempted and failed; the caller keeps the original text.
    FellBack(TranslateError),
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, TranslateError>;
    /// Provider name for diagnostics.
    fn name(&self) -> &'static str;
}

/// HTTP provider for the unauthenticated `client=gtx` translation endpoint.
pub struct GtxTranslator {
    http: reqwest::Client,
    endpoint: String,
}

impl GtxTranslator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("yt-sentiment-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .expect("reqwest client");
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Translator for GtxTranslator {
    async fn translate(&self, text: &str) -> Result<String, TranslateError> {
        let resp = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", TARGET_LANG),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = ?e, "translate request failed");
                TranslateError::Network
            })?;

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "translate endpoint returned error status");
            return Err(TranslateError::BadStatus);
        }

        let body: Value = resp.json().await.map_err(|_| TranslateError::Parse)?;
        parse_gtx_body(&body).ok_or(TranslateError::Parse)
    }

    fn name(&self) -> &'static str {
        "gtx"
    }
}

/// The gtx body is a nested array; element 0 lists segments whose first
/// field is the translated chunk.
fn parse_gtx_body(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut out = String::new();
    for seg in segments {
        if let Some(chunk) = seg.get(0).and_then(Value::as_str) {
            out.push_str(chunk);
        }
    }
    let out = out.trim().to_string();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Always errors; used when no endpoint is configured.
pub struct DisabledTranslator;

#[async_trait]
impl Translator for DisabledTranslator {
    async fn translate(&self, _text: &str) -> Result<String, TranslateError> {
        Err(TranslateError::Disabled)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_multi_segment_gtx_body() {
        let body = json!([
            [
                ["This is great. ", "Esto es genial. ", null],
                ["Thanks!", "¡Gracias!", null]
            ],
            null,
            "es"
        ]);
        assert_eq!(
            parse_gtx_body(&body).as_deref(),
            Some("This is great. Thanks!")
        );
    }

    #[test]
    fn rejects_malformed_bodies() {
        assert_eq!(parse_gtx_body(&json!({"error": 403})), None);
        assert_eq!(parse_gtx_body(&json!([])), None);
        assert_eq!(parse_gtx_body(&json!([[]])), None);
    }

    #[tokio::test]
    async fn disabled_translator_reports_disabled() {
        let t = DisabledTranslator;
        assert_eq!(t.translate("hola").await, Err(TranslateError::Disabled));
    }
}
