// src/sentiment/mod.rs
//! The two scoring algorithms. Both are pure `&str -> f64` functions over
//! embedded lexicons and always return a value in [-1, 1].

pub mod blob;
pub mod vader;

use crate::types::Algorithm;

/// Score text with the selected algorithm.
pub fn score(text: &str, algorithm: Algorithm) -> f64 {
    match algorithm {
        Algorithm::Vader => vader::compound_score(text),
        Algorithm::TextBlob => blob::polarity_score(text),
    }
}

/// Shared tokenization: alphanumeric tokens, lower-case.
pub(crate) fn tokenize(s: &str) -> Vec<String> {
    s.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_ascii_lowercase())
        .collect()
}

/// Simple negator set. Contractions arrive already split by the tokenizer
/// ("isn't" -> "isn" + "t"), so the orphan "t" token marks a contraction
/// negation and the auxiliary stems that are not real words are listed too.
pub(crate) fn is_negator(tok: &str) -> bool {
    matches!(
        tok,
        "not" | "no" | "never" | "neither" | "nor" | "cannot" | "without" | "t" | "isn" | "wasn"
            | "aren" | "doesn" | "didn" | "couldn" | "shouldn" | "wouldn" | "ain"
    )
}
