use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::types::TruncationSettings;

/// Sentence terminator followed by whitespace, or an ideographic full stop on its own.
pub static SENTENCE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?\u{00A1}\u{203C}\u{2026}\u{00BF}\u{203D}\u{061F}]\s|\u{3002}")
        .expect("sentence boundary pattern")
});

/// Any single whitespace character.
pub static WORD_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s").expect("word boundary pattern"));

/// Pattern the truncator scans for once the minimum length is reached.
///
/// `None` means a hard cut: stop as soon as there is enough text.
pub fn active_pattern(settings: &TruncationSettings) -> Option<&'static Regex> {
    if settings.sentence_safe {
        Some(&*SENTENCE_END)
    } else if settings.word_safe {
        Some(&*WORD_END)
    } else {
        None
    }
}

/// Byte offset of the char at `char_index`, or the end of `text` past the last char.
pub fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map_or(text.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_pattern_needs_trailing_whitespace() {
        assert!(SENTENCE_END.find("end.").is_none());
        assert_eq!(SENTENCE_END.find("end. next").map(|m| m.start()), Some(3));
        assert_eq!(SENTENCE_END.find("what?!\tok").map(|m| m.start()), Some(5));
    }

    #[test]
    fn sentence_pattern_covers_non_latin_terminators() {
        for text in ["¡ x", "‼ x", "… x", "¿ x", "‽ x", "؟ x"] {
            let found = SENTENCE_END.find(text).expect(text);
            assert_eq!(found.start(), 0, "{text}");
        }
        let found = SENTENCE_END.find("文章。次").unwrap();
        assert_eq!(found.as_str(), "。");
    }

    #[test]
    fn pattern_selection_prefers_sentence() {
        let both = TruncationSettings::DEFAULT;
        assert_eq!(active_pattern(&both).unwrap().as_str(), SENTENCE_END.as_str());
        let word = TruncationSettings::builder().sentence_safe(false).build();
        assert_eq!(active_pattern(&word).unwrap().as_str(), WORD_END.as_str());
        let hard = TruncationSettings::builder()
            .sentence_safe(false)
            .word_safe(false)
            .build();
        assert!(active_pattern(&hard).is_none());
    }

    #[test]
    fn byte_offset_counts_chars() {
        assert_eq!(byte_offset("héllo", 2), 3);
        assert_eq!(byte_offset("héllo", 5), 6);
        assert_eq!(byte_offset("héllo", 9), 6);
        assert_eq!(byte_offset("", 0), 0);
    }
}
