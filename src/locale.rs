//! Reply-locale detection.
//!
//! Every inbound message is answered either in Thai or in English.  The
//! choice is made once per message by [`Locale::detect`] and then threaded
//! through every reply lookup, so the keyword path and the classifier path
//! can never disagree about the language.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Unicode range
// ---------------------------------------------------------------------------

/// First codepoint of the Thai Unicode block.
const THAI_START: char = '\u{0E00}';

/// Last codepoint of the Thai Unicode block.
const THAI_END: char = '\u{0E7F}';

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

/// Language a reply is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// The message contains Thai script; reply in Thai.
    Thai,
    /// Anything else; reply in English.
    Other,
}

impl Locale {
    /// Classify `text` as Thai when it contains at least one character from
    /// the Thai block (U+0E00–U+0E7F), otherwise `Other`.
    ///
    /// Total and allocation-free; the empty string is `Other`.
    ///
    /// ```
    /// use line_reply_bot::locale::Locale;
    ///
    /// assert_eq!(Locale::detect("ร้านอยู่ที่ไหน"), Locale::Thai);
    /// assert_eq!(Locale::detect("where is the shop?"), Locale::Other);
    /// assert_eq!(Locale::detect(""), Locale::Other);
    /// ```
    pub fn detect(text: &str) -> Self {
        if text.chars().any(is_thai) {
            Locale::Thai
        } else {
            Locale::Other
        }
    }
}

#[inline]
fn is_thai(c: char) -> bool {
    (THAI_START..=THAI_END).contains(&c)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_is_other() {
        assert_eq!(Locale::detect(""), Locale::Other);
    }

    #[test]
    fn whitespace_only_is_other() {
        assert_eq!(Locale::detect("   \n\t"), Locale::Other);
    }

    #[test]
    fn ascii_sentence_is_other() {
        assert_eq!(Locale::detect("how much does it cost?"), Locale::Other);
    }

    #[test]
    fn latin_with_accents_is_other() {
        assert_eq!(Locale::detect("combien ça coûte ?"), Locale::Other);
    }

    #[test]
    fn single_thai_consonant_is_thai() {
        assert_eq!(Locale::detect("ก"), Locale::Thai);
    }

    #[test]
    fn thai_sentence_is_thai() {
        assert_eq!(Locale::detect("ร้านอยู่ที่ไหน"), Locale::Thai);
    }

    #[test]
    fn mixed_text_with_one_thai_char_is_thai() {
        assert_eq!(Locale::detect("price for สแตนเลส sheet"), Locale::Thai);
    }

    #[test]
    fn thai_digits_count_as_thai() {
        // ๑๒๓ are U+0E51..U+0E53
        assert_eq!(Locale::detect("๑๒๓"), Locale::Thai);
    }

    #[test]
    fn block_boundaries() {
        assert_eq!(Locale::detect("\u{0E00}"), Locale::Thai);
        assert_eq!(Locale::detect("\u{0E7F}"), Locale::Thai);
        assert_eq!(Locale::detect("\u{0DFF}"), Locale::Other);
        assert_eq!(Locale::detect("\u{0E80}"), Locale::Other);
    }

    #[test]
    fn other_scripts_are_other() {
        assert_eq!(Locale::detect("你好"), Locale::Other);
        assert_eq!(Locale::detect("مرحبا"), Locale::Other);
    }
}
