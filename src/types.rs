// src/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-enforced bounds on how many comments a single request may analyze.
pub const MIN_COMMENT_LIMIT: usize = 25;
pub const MAX_COMMENT_LIMIT: usize = 500;

/// Sentiment class assigned to a single comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Neutral => "Neutral",
            Label::Negative => "Negative",
        }
    }
}

/// Scoring algorithm selected per request. A closed set: selection happens
/// by configuration, never by runtime type inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Vader,
    TextBlob,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Vader => "vader",
            Algorithm::TextBlob => "textblob",
        }
    }
}

/// One top-level comment as returned by the fetcher, before analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComment {
    pub comment_id: Option<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub like_count: u64,
    pub text: String,
}

/// Fully analyzed comment. Immutable once produced by the pipeline.
///
/// `translated_text` always holds the text scoring ran on: the translation
/// when one happened, otherwise the normalized original. The two flags say
/// which case applies, so callers (and tests) can observe fallback without
/// digging through logs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub raw_text: String,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub like_count: u64,
    /// ISO 639-3 code of the detected language, or "und" when unknown.
    pub detected_language: String,
    pub translated_text: String,
    pub translated: bool,
    pub translation_fallback: bool,
    pub normalized_text: String,
    /// Aggressively cleaned text for word clouds; empty comments contribute nothing.
    pub wordcloud_text: String,
    pub sentiment_score: f64,
    pub sentiment_label: Label,
    pub algorithm: Algorithm,
}

/// Validated analysis request. `comment_limit` is clamped once at entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub video_url: String,
    pub comment_limit: usize,
    pub algorithm: Algorithm,
}

impl AnalysisRequest {
    pub fn new(video_url: impl Into<String>, comment_limit: usize, algorithm: Algorithm) -> Self {
        Self {
            video_url: video_url.into(),
            comment_limit: comment_limit.clamp(MIN_COMMENT_LIMIT, MAX_COMMENT_LIMIT),
            algorithm,
        }
    }
}

/// Aggregate label counts for one analyzed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    pub total: usize,
}

impl SentimentCounts {
    pub fn record(&mut self, label: Label) {
        match label {
            Label::Positive => self.positive += 1,
            Label::Neutral => self.neutral += 1,
            Label::Negative => self.negative += 1,
        }
        self.total += 1;
    }

    pub fn tally(records: &[CommentRecord]) -> Self {
        let mut counts = Self::default();
        for r in records {
            counts.record(r.sentiment_label);
        }
        counts
    }
}

/// Ordered records (newest first when timestamps permit) plus aggregates.
/// Invariant: `counts.total` equals `records.len()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub records: Vec<CommentRecord>,
    pub counts: SentimentCounts,
}
