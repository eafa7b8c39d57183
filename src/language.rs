// src/language.rs
//! Language detection for the pipeline. Detection failure is never fatal:
//! unknown text is treated as the target language and translation is skipped.

use whatlang::{detect, Lang};

/// Code recorded when the detector has no confident answer.
pub const UNKNOWN_LANG: &str = "und";

/// Detect the language of a comment. Returns `None` for empty input and for
/// detections the trigram model itself does not consider reliable.
pub fn detect_language(text: &str) -> Option<Lang> {
    if text.trim().is_empty() {
        return None;
    }
    detect(text).filter(|info| info.is_reliable()).map(|info| info.lang())
}

/// ISO 639-3 code for a detection result, `"und"` when unknown.
pub fn language_code(lang: Option<Lang>) -> String {
    lang.map(|l| l.code().to_string())
        .unwrap_or_else(|| UNKNOWN_LANG.to_string())
}

/// True when the text needs no translation: already English, or unknown
/// (unknown is assumed to be the target language by design).
pub fn is_target_language(lang: Option<Lang>) -> bool {
    matches!(lang, Some(Lang::Eng) | None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english_prose() {
        let lang = detect_language(
            "this is a perfectly ordinary english sentence about a video I watched yesterday",
        );
        assert_eq!(lang, Some(Lang::Eng));
        assert!(is_target_language(lang));
        assert_eq!(language_code(lang), "eng");
    }

    #[test]
    fn detects_non_english_prose() {
        let lang = detect_language(
            "este es un comentario bastante largo escrito completamente en español sobre el video",
        );
        assert_eq!(lang, Some(Lang::Spa));
        assert!(!is_target_language(lang));
    }

    #[test]
    fn empty_text_is_unknown_and_treated_as_target() {
        let lang = detect_language("   ");
        assert_eq!(lang, None);
        assert!(is_target_language(lang));
        assert_eq!(language_code(lang), UNKNOWN_LANG);
    }
}
