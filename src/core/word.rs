//! Vocabulary word representation
//!
//! A Word stores a 5-letter lowercase word plus a bit mask of the letters it contains.
//! The mask makes the black-letter check on the candidate filter a single AND.

use rustc_hash::FxHashMap;
use std::fmt;

/// Number of letters in every word
pub const WORD_LENGTH: usize = 5;

/// A 5-letter word over `a..=z`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: String,
    chars: [u8; WORD_LENGTH],
    letter_mask: u32,
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    InvalidLength(usize),
    NonAscii,
    InvalidCharacters,
}

impl fmt::Display for WordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLength(len) => {
                write!(f, "Word must be exactly {WORD_LENGTH} letters, got {len}")
            }
            Self::NonAscii => write!(f, "Word must contain only ASCII letters"),
            Self::InvalidCharacters => write!(f, "Word contains invalid characters"),
        }
    }
}

impl std::error::Error for WordError {}

/// Bit for a lowercase ASCII letter in a letter mask
#[inline]
#[must_use]
pub const fn letter_bit(letter: u8) -> u32 {
    1 << (letter - b'a')
}

impl Word {
    /// Create a new Word from a string, normalising to lowercase
    ///
    /// # Errors
    /// Returns `WordError` if the text is not exactly five ASCII letters.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::Word;
    ///
    /// let word = Word::new("Crane").unwrap();
    /// assert_eq!(word.text(), "crane");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, WordError> {
        let text: String = text.into().to_lowercase();

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        let chars: [u8; WORD_LENGTH] = text
            .as_bytes()
            .try_into()
            .map_err(|_| WordError::InvalidLength(text.len()))?;

        if !chars.iter().all(u8::is_ascii_lowercase) {
            return Err(WordError::InvalidCharacters);
        }

        let letter_mask = chars.iter().fold(0, |mask, &ch| mask | letter_bit(ch));

        Ok(Self {
            text,
            chars,
            letter_mask,
        })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the word as a byte array
    #[inline]
    #[must_use]
    pub const fn chars(&self) -> &[u8; WORD_LENGTH] {
        &self.chars
    }

    /// Bit set of the letters in this word (bit 0 = `a`)
    #[inline]
    #[must_use]
    pub const fn letter_mask(&self) -> u32 {
        self.letter_mask
    }

    /// Check if the word contains a specific letter
    #[inline]
    #[must_use]
    pub const fn has_letter(&self, letter: u8) -> bool {
        letter.is_ascii_lowercase() && self.letter_mask & letter_bit(letter) != 0
    }

    /// Count of each letter, used for duplicate-aware feedback
    #[inline]
    pub(crate) fn char_counts(&self) -> FxHashMap<u8, u8> {
        let mut counts = FxHashMap::default();
        for &ch in &self.chars {
            *counts.entry(ch).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_creation_uppercase_normalized() {
        let word = Word::new("CrAnE").unwrap();
        assert_eq!(word.text(), "crane");
        assert_eq!(word.chars(), b"crane");
    }

    #[test]
    fn word_creation_invalid_length() {
        assert!(matches!(
            Word::new("too long"),
            Err(WordError::InvalidLength(8))
        ));
        assert!(matches!(Word::new(""), Err(WordError::InvalidLength(0))));
    }

    #[test]
    fn word_creation_invalid_characters() {
        assert_eq!(Word::new("cran3"), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cran "), Err(WordError::InvalidCharacters));
        assert_eq!(Word::new("cranë"), Err(WordError::NonAscii));
    }

    #[test]
    fn letter_mask_tracks_unique_letters() {
        let word = Word::new("speed").unwrap();
        let expected =
            letter_bit(b's') | letter_bit(b'p') | letter_bit(b'e') | letter_bit(b'd');
        assert_eq!(word.letter_mask(), expected);
        assert!(word.has_letter(b'e'));
        assert!(!word.has_letter(b'z'));
        assert!(!word.has_letter(b'-'));
    }

    #[test]
    fn char_counts_with_duplicates() {
        let counts = Word::new("speed").unwrap().char_counts();
        assert_eq!(counts.get(&b'e'), Some(&2));
        assert_eq!(counts.get(&b's'), Some(&1));
        assert_eq!(counts.len(), 4);
    }
}
