// src/pipeline.rs
//! Per-request batch analysis: Normalize -> Detect -> Translate-with-fallback
//! -> Score -> Classify, one pass per comment, no shared mutable state.
//!
//! Nothing here is fatal. Detection failure means "assume target language";
//! translation failure means "score the original text"; an empty comment
//! scores neutral. Processing always continues for the remaining comments.

use ::metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use tracing::warn;

use crate::classify;
use crate::language;
use crate::normalize;
use crate::sentiment;
use crate::translate::{TranslationOutcome, Translator};
use crate::types::{Algorithm, AnalysisResult, CommentRecord, RawComment, SentimentCounts};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("comments_analyzed_total", "Comments run through the pipeline.");
        describe_counter!(
            "comments_empty_total",
            "Comments empty after normalization, scored neutral."
        );
        describe_counter!(
            "translation_applied_total",
            "Comments whose text was translated before scoring."
        );
        describe_counter!(
            "translation_fallback_total",
            "Translation attempts that fell back to the original text."
        );
        describe_histogram!("analyze_batch_ms", "Wall time of one analysis batch.");
    });
}

/// Run the language pipeline for one normalized comment: detect, then
/// translate when the text is not in the target language.
async fn translate_if_needed(
    normalized: &str,
    detected: Option<whatlang::Lang>,
    translator: &dyn Translator,
) -> TranslationOutcome {
    if language::is_target_language(detected) {
        return TranslationOutcome::Skipped;
    }
    match translator.translate(normalized).await {
        Ok(text) => TranslationOutcome::Translated(text),
        Err(e) => {
            warn!(
                error = %e,
                provider = translator.name(),
                "translation fell back to original text"
            );
            TranslationOutcome::FellBack(e)
        }
    }
}

/// Analyze a single comment. Total: every input produces a record.
pub async fn analyze_one(
    comment: RawComment,
    algorithm: Algorithm,
    translator: &dyn Translator,
) -> CommentRecord {
    let normalized = normalize::prepare_for_sentiment(&comment.text);

    // Empty after normalization: neutral by definition, no external calls,
    // no word-cloud contribution.
    if normalized.is_empty() {
        counter!("comments_empty_total").increment(1);
        return CommentRecord {
            raw_text: comment.text,
            author: comment.author,
            published_at: comment.published_at,
            like_count: comment.like_count,
            detected_language: language::UNKNOWN_LANG.to_string(),
            translated_text: String::new(),
            translated: false,
            translation_fallback: false,
            normalized_text: normalized,
            wordcloud_text: String::new(),
            sentiment_score: 0.0,
            sentiment_label: classify::label_for_score(0.0),
            algorithm,
        };
    }

    let detected = language::detect_language(&normalized);
    let outcome = translate_if_needed(&normalized, detected, translator).await;

    let (analysis_text, translated, translation_fallback) = match &outcome {
        // Re-normalize: translations reintroduce case and stray whitespace.
        TranslationOutcome::Translated(t) => (normalize::prepare_for_sentiment(t), true, false),
        TranslationOutcome::Skipped => (normalized.clone(), false, false),
        TranslationOutcome::FellBack(_) => (normalized.clone(), false, true),
    };
    if translated {
        counter!("translation_applied_total").increment(1);
    }
    if translation_fallback {
        counter!("translation_fallback_total").increment(1);
    }

    let score = sentiment::score(&analysis_text, algorithm);
    let label = classify::label_for_score(score);
    let wordcloud_text = normalize::clean_for_wordcloud(&analysis_text);

    CommentRecord {
        raw_text: comment.text,
        author: comment.author,
        published_at: comment.published_at,
        like_count: comment.like_count,
        detected_language: language::language_code(detected),
        translated_text: analysis_text,
        translated,
        translation_fallback,
        normalized_text: normalized,
        wordcloud_text,
        sentiment_score: score,
        sentiment_label: label,
        algorithm,
    }
}

/// Analyze a batch of comments sequentially and aggregate label counts.
/// Records come back newest first when timestamps permit.
pub async fn analyze_comments(
    comments: Vec<RawComment>,
    algorithm: Algorithm,
    translator: &dyn Translator,
) -> AnalysisResult {
    ensure_metrics_described();
    let t0 = std::time::Instant::now();

    let mut records = Vec::with_capacity(comments.len());
    for comment in comments {
        records.push(analyze_one(comment, algorithm, translator).await);
    }

    // Newest first; records without a timestamp sink to the end.
    records.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let counts = SentimentCounts::tally(&records);

    counter!("comments_analyzed_total").increment(records.len() as u64);
    histogram!("analyze_batch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    AnalysisResult { records, counts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::DisabledTranslator;
    use crate::types::Label;

    fn comment(text: &str) -> RawComment {
        RawComment {
            comment_id: None,
            author: "tester".to_string(),
            published_at: None,
            like_count: 0,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_comment_is_neutral_with_no_wordcloud_text() {
        let rec = analyze_one(comment("   \n\t "), Algorithm::Vader, &DisabledTranslator).await;
        assert_eq!(rec.sentiment_score, 0.0);
        assert_eq!(rec.sentiment_label, Label::Neutral);
        assert!(rec.wordcloud_text.is_empty());
        assert_eq!(rec.detected_language, "und");
        assert!(!rec.translated && !rec.translation_fallback);
    }

    #[tokio::test]
    async fn english_comment_skips_translation() {
        let rec = analyze_one(
            comment("This is honestly a great and wonderful video, I enjoyed every minute"),
            Algorithm::Vader,
            &DisabledTranslator,
        )
        .await;
        assert_eq!(rec.detected_language, "eng");
        assert!(!rec.translated);
        assert!(!rec.translation_fallback, "english text must not attempt translation");
        assert_eq!(rec.translated_text, rec.normalized_text);
        assert_eq!(rec.sentiment_label, Label::Positive);
    }

    #[tokio::test]
    async fn all_emoji_comment_resolves_positive() {
        let rec = analyze_one(
            comment("\u{1F602}\u{1F602}\u{1F525}"),
            Algorithm::Vader,
            &DisabledTranslator,
        )
        .await;
        assert_eq!(rec.normalized_text, "funny funny great");
        assert_eq!(rec.sentiment_label, Label::Positive);
    }

    #[tokio::test]
    async fn counts_match_input_size() {
        let batch = vec![
            comment("I love this, wonderful work!"),
            comment("I hate this, total waste of time"),
            comment("the video is twelve minutes long"),
            comment(""),
        ];
        let n = batch.len();
        let result = analyze_comments(batch, Algorithm::TextBlob, &DisabledTranslator).await;
        let c = result.counts;
        assert_eq!(c.total, n);
        assert_eq!(c.positive + c.neutral + c.negative, n);
        assert_eq!(result.records.len(), n);
        assert_eq!(c.positive, 1);
        assert_eq!(c.negative, 1);
        assert_eq!(c.neutral, 2);
    }
}
