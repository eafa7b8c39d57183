// src/sentiment/vader.rs
//! Lexicon scorer in the VADER style: word valences on a [-4, 4] scale,
//! negation damping, intensity boosters, exclamation emphasis, and the
//! `s / sqrt(s^2 + 15)` compound normalization into [-1, 1].

use std::collections::HashMap;

use once_cell::sync::Lazy;

static LEXICON: Lazy<HashMap<String, f64>> = Lazy::new(|| {
    let raw = include_str!("../../vader_lexicon.json");
    serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid vader lexicon")
});

/// Sign damping applied when a negator appears within the look-back window.
const NEGATION_SCALAR: f64 = -0.74;
/// Valence added (sign-aligned) per intensity booster.
const BOOST_INCR: f64 = 0.293;
const BOOST_DECR: f64 = -0.293;
/// Emphasis per exclamation mark, capped.
const EXCLAMATION_BOOST: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;
/// How far back boosters and negators can reach, in tokens.
const LOOKBACK: usize = 3;

fn booster(tok: &str) -> Option<f64> {
    match tok {
        "absolutely" | "amazingly" | "completely" | "extremely" | "incredibly" | "really"
        | "so" | "totally" | "utterly" | "very" => Some(BOOST_INCR),
        "barely" | "hardly" | "kinda" | "marginally" | "slightly" | "somewhat" => {
            Some(BOOST_DECR)
        }
        _ => None,
    }
}

/// Booster influence decays with distance from the sentiment word.
fn booster_decay(distance: usize) -> f64 {
    match distance {
        1 => 1.0,
        2 => 0.95,
        _ => 0.9,
    }
}

/// Compound sentiment score of `text`, in [-1, 1]. Pure function; text with
/// no lexicon hits scores exactly 0.0.
pub fn compound_score(text: &str) -> f64 {
    let tokens = super::tokenize(text);

    let mut total = 0.0;
    for i in 0..tokens.len() {
        let Some(&valence) = LEXICON.get(tokens[i].as_str()) else {
            continue;
        };
        let mut v = valence;

        for k in 1..=LOOKBACK {
            if i < k {
                break;
            }
            let prev = tokens[i - k].as_str();
            // Sentiment-bearing words carry their own valence; they don't boost.
            if LEXICON.contains_key(prev) {
                continue;
            }
            if let Some(b) = booster(prev) {
                let boost = b * booster_decay(k);
                v += if v >= 0.0 { boost } else { -boost };
            }
        }

        let negated = (1..=LOOKBACK).any(|k| i >= k && super::is_negator(tokens[i - k].as_str()));
        if negated {
            v *= NEGATION_SCALAR;
        }

        total += v;
    }

    if total == 0.0 {
        return 0.0;
    }

    // Punctuation emphasis, sign-aligned with the running total.
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let emphasis = exclamations as f64 * EXCLAMATION_BOOST;
    total += if total > 0.0 { emphasis } else { -emphasis };

    (total / (total * total + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::label_for_score;
    use crate::types::Label;

    #[test]
    fn plain_praise_is_positive() {
        let s = compound_score("this video is absolutely amazing!!!");
        assert!(s >= 0.05, "expected positive range, got {s}");
        assert_eq!(label_for_score(s), Label::Positive);
    }

    #[test]
    fn plain_complaint_is_negative() {
        let s = compound_score("i hate this, total waste of time");
        assert!(s <= -0.05, "expected negative range, got {s}");
        assert_eq!(label_for_score(s), Label::Negative);
    }

    #[test]
    fn no_lexicon_hits_score_zero() {
        assert_eq!(compound_score("the chair is next to the table"), 0.0);
        assert_eq!(compound_score(""), 0.0);
    }

    #[test]
    fn negation_flips_and_damps() {
        let plain = compound_score("this is good");
        let negated = compound_score("this is not good");
        assert!(plain > 0.0);
        assert!(negated < 0.0, "negated praise must go negative, got {negated}");
        assert!(negated.abs() < plain.abs(), "negation also damps magnitude");
    }

    #[test]
    fn contraction_negation_is_seen() {
        let s = compound_score("this isn't good at all");
        assert!(s < 0.0, "expected contraction negation, got {s}");
    }

    #[test]
    fn booster_amplifies() {
        let plain = compound_score("this is good");
        let boosted = compound_score("this is very good");
        assert!(boosted > plain);
    }

    #[test]
    fn exclamations_amplify_but_cap() {
        let calm = compound_score("great video");
        let loud = compound_score("great video!!!");
        let louder = compound_score("great video!!!!!!!!!!");
        assert!(loud > calm);
        let max_total = compound_score("great video!!!!");
        assert!((louder - max_total).abs() < 1e-9, "emphasis caps at four marks");
    }

    #[test]
    fn score_is_bounded() {
        let s = compound_score(
            "best best best greatest masterpiece perfect wonderful amazing love love!!!!",
        );
        assert!(s <= 1.0 && s >= 0.9, "stacked praise saturates near 1.0, got {s}");
    }
}
