// src/sentiment/blob.rs
//! Statistical-lexical scorer in the TextBlob style: the score is the mean
//! of pre-trained per-word polarities in [-1, 1], with multiplicative
//! intensifiers and the -0.5 negation multiplier.

use std::collections::HashMap;

use once_cell::sync::Lazy;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../../blob_lexicon.json");
    serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid blob lexicon")
});

/// Negation halves and flips polarity rather than mirroring it.
const NEGATION_MULTIPLIER: f64 = -0.5;
/// Negators are considered this many tokens back.
const LOOKBACK: usize = 2;

fn intensity(tok: &str) -> Option<f64> {
    match tok {
        "absolutely" | "extremely" | "incredibly" | "really" | "so" | "super" | "totally"
        | "very" => Some(1.3),
        "barely" | "hardly" | "kinda" | "slightly" | "somewhat" => Some(0.5),
        _ => None,
    }
}

/// Mean polarity of the lexicon hits in `text`, in [-1, 1]. Texts with no
/// hits score exactly 0.0.
pub fn polarity_score(text: &str) -> f64 {
    let tokens = super::tokenize(text);

    let mut sum = 0.0;
    let mut hits = 0usize;
    for i in 0..tokens.len() {
        let Some(&polarity) = LEXICON.get(tokens[i].as_str()) else {
            continue;
        };
        let mut v = polarity;

        if i >= 1 {
            if let Some(m) = intensity(tokens[i - 1].as_str()) {
                v = (v * m).clamp(-1.0, 1.0);
            }
        }

        let negated = (1..=LOOKBACK).any(|k| i >= k && super::is_negator(tokens[i - k].as_str()));
        if negated {
            v *= NEGATION_MULTIPLIER;
        }

        sum += v;
        hits += 1;
    }

    if hits == 0 {
        0.0
    } else {
        (sum / hits as f64).clamp(-1.0, 1.0)
    }
}
