// src/normalize.rs
//! Comment text normalization: URL/handle stripping, emoji-to-hint
//! substitution, entity decoding, whitespace collapse.
//!
//! Both entry points are total functions; they never fail and are idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("url regex"));
static RE_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[@#]\w+").expect("handle regex"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));
static RE_NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s]").expect("non-alnum regex"));

/// Map a recognized emoji to a short sentiment-bearing hint word so the
/// lexicon scorers can see it. Unrecognized characters pass through.
fn emoji_hint(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{1F600}' | '\u{1F603}' | '\u{1F604}' | '\u{1F601}' | '\u{1F60A}' | '\u{1F642}' => {
            "happy"
        }
        '\u{1F602}' | '\u{1F923}' | '\u{1F606}' => "funny",
        '\u{1F60D}' | '\u{2764}' => "love",
        '\u{1F44D}' | '\u{1F525}' | '\u{2B50}' => "great",
        '\u{1F62D}' | '\u{1F622}' => "sad",
        '\u{1F621}' | '\u{1F620}' | '\u{1F92C}' => "angry",
        '\u{1F44E}' | '\u{1F494}' => "bad",
        '\u{1F92E}' => "disgusting",
        '\u{1F610}' | '\u{1F611}' | '\u{1F636}' => "meh",
        _ => return None,
    })
}

/// Decode HTML entities to a fixpoint. Scraped text is often escaped more
/// than once ("&amp;amp;"), and a single-layer decode would break the
/// idempotence of the normalizers. Each decode that changes anything
/// strictly shortens the string, so this terminates.
fn decode_entities_fully(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let decoded = html_escape::decode_html_entities(&current).into_owned();
        if decoded == current {
            return decoded;
        }
        current = decoded;
    }
}

fn replace_emojis(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match emoji_hint(c) {
            Some(hint) => {
                // Pad so hints never glue onto neighboring words.
                out.push(' ');
                out.push_str(hint);
                out.push(' ');
            }
            None => out.push(c),
        }
    }
    out
}

/// Preprocessing for sentiment scoring: keep punctuation (the lexicon scorer
/// uses exclamation emphasis), drop URLs and @handles/#hashtags, surface
/// emoji as hint words, collapse whitespace.
pub fn prepare_for_sentiment(text: &str) -> String {
    let mut s = decode_entities_fully(text).to_lowercase();
    s = RE_URL.replace_all(&s, " ").into_owned();
    s = RE_HANDLE.replace_all(&s, " ").into_owned();
    s = replace_emojis(&s);
    s = s.replace(['\r', '\n', '\t'], " ");
    s = RE_WS.replace_all(&s, " ").into_owned();
    s.trim().to_string()
}

/// Aggressive cleanup for word clouds: ASCII alphanumerics and spaces only.
pub fn clean_for_wordcloud(text: &str) -> String {
    let mut s = decode_entities_fully(text).to_lowercase();
    s = RE_URL.replace_all(&s, " ").into_owned();
    s = RE_HANDLE.replace_all(&s, " ").into_owned();
    s = RE_NON_ALNUM.replace_all(&s, " ").into_owned();
    s = RE_WS.replace_all(&s, " ").into_owned();
    s.trim().to_string()
}
