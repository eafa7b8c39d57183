// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod classify;
pub mod config;
pub mod export;
pub mod fetch;
pub mod language;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod sentiment;
pub mod translate;
pub mod types;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::types::{
    Algorithm, AnalysisRequest, AnalysisResult, CommentRecord, Label, RawComment, SentimentCounts,
};
