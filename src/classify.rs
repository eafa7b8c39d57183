// src/classify.rs
//! Score-to-label mapping with the fixed neutral band.

use crate::types::Label;

/// Scores at or above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Scores at or below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Map a compound/polarity score in [-1, 1] to a label.
///
/// The band is identical for both scoring algorithms even though their score
/// distributions differ; kept as-is on purpose.
pub fn label_for_score(score: f64) -> Label {
    if score >= POSITIVE_THRESHOLD {
        Label::Positive
    } else if score <= NEGATIVE_THRESHOLD {
        Label::Negative
    } else {
        Label::Neutral
    }
}
