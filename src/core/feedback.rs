//! Feedback codes and their base-3 encoding
//!
//! A feedback code packs the per-letter result of a guess into one byte:
//! - 0 = absent (letter not in the answer)
//! - 1 = present (letter in the answer, elsewhere)
//! - 2 = correct (letter in this position)
//!
//! Digits are positional in base 3 with the first letter as the most significant
//! digit, so codes lie in `0..=242` and `242` means every letter is correct.

use super::word::{WORD_LENGTH, Word, letter_bit};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of distinct feedback codes (3^5)
pub const NUM_CODES: usize = 243;

/// Result for a single letter of a guess
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterFeedback {
    Absent = 0,
    Present = 1,
    Correct = 2,
}

impl LetterFeedback {
    const fn from_digit(digit: u8) -> Self {
        match digit {
            2 => Self::Correct,
            1 => Self::Present,
            _ => Self::Absent,
        }
    }

    /// Hint character: `G` correct, `Y` present, `-` absent
    #[must_use]
    pub const fn hint_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => '-',
        }
    }
}

/// Encoded feedback for one (guess, answer) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Feedback(u8);

impl Feedback {
    /// Every letter correct
    pub const ALL_CORRECT: Self = Self(242);

    /// Create a feedback code from a raw value
    ///
    /// Returns `None` if the value is not a valid code.
    #[inline]
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if (value as usize) < NUM_CODES {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Raw code value (0-242)
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Index into per-code arrays
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_all_correct(self) -> bool {
        self.0 == Self::ALL_CORRECT.0
    }

    /// Encode per-letter results, first letter most significant
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{Feedback, LetterFeedback::{Absent, Correct, Present}};
    ///
    /// let code = Feedback::from_letters([Correct, Absent, Absent, Absent, Present]);
    /// assert_eq!(code.value(), 2 * 81 + 1);
    /// ```
    #[must_use]
    pub fn from_letters(letters: [LetterFeedback; WORD_LENGTH]) -> Self {
        Self(
            letters
                .iter()
                .fold(0u8, |code, &letter| code * 3 + letter as u8),
        )
    }

    /// Decode into per-letter results, first letter first
    #[must_use]
    pub fn letters(self) -> [LetterFeedback; WORD_LENGTH] {
        let mut letters = [LetterFeedback::Absent; WORD_LENGTH];
        let mut val = self.0;
        for slot in letters.iter_mut().rev() {
            *slot = LetterFeedback::from_digit(val % 3);
            val /= 3;
        }
        letters
    }

    /// Compute the feedback when `guess` is played against `answer`
    ///
    /// Greens are assigned first; yellows then consume the remaining letter counts
    /// of the answer from left to right.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::core::{Feedback, Word};
    ///
    /// let guess = Word::new("crane").unwrap();
    /// let answer = Word::new("slate").unwrap();
    ///
    /// // C(absent) R(absent) A(correct) N(absent) E(correct)
    /// assert_eq!(Feedback::calculate(&guess, &answer).to_string(), "--G-G");
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, answer: &Word) -> Self {
        let mut result = [LetterFeedback::Absent; WORD_LENGTH];
        let mut answer_available = answer.char_counts();

        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            let letter = guess.chars()[i];
            if letter == answer.chars()[i] {
                result[i] = LetterFeedback::Correct;
                if let Some(count) = answer_available.get_mut(&letter) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if result[i] == LetterFeedback::Absent {
                let letter = guess.chars()[i];
                if let Some(count) = answer_available.get_mut(&letter)
                    && *count > 0
                {
                    result[i] = LetterFeedback::Present;
                    *count -= 1;
                }
            }
        }

        Self::from_letters(result)
    }

    /// Letters of `guess` this feedback proves absent from the answer
    ///
    /// A letter is proven absent only if none of its occurrences in the guess scored
    /// present or correct.
    #[must_use]
    pub fn absent_letter_mask(self, guess: &Word) -> u32 {
        let mut absent = 0u32;
        let mut seen = 0u32;
        for (&letter, result) in guess.chars().iter().zip(self.letters()) {
            let bit = letter_bit(letter);
            if result == LetterFeedback::Absent {
                absent |= bit;
            } else {
                seen |= bit;
            }
        }
        absent & !seen
    }

    /// Render as emoji squares
    #[must_use]
    pub fn to_emoji(self) -> String {
        self.letters()
            .iter()
            .map(|letter| match letter {
                LetterFeedback::Correct => '🟩',
                LetterFeedback::Present => '🟨',
                LetterFeedback::Absent => '⬜',
            })
            .collect()
    }

    /// Parse a hint string such as `"GY-GY"` or `"🟩🟨⬜🟩🟨"`
    ///
    /// Accepts `G`/`g`/🟩, `Y`/`y`/🟨 and `-`/`_`/⬜.
    #[must_use]
    pub fn parse_hint(s: &str) -> Option<Self> {
        let mut letters = [LetterFeedback::Absent; WORD_LENGTH];
        let mut count = 0;
        for ch in s.chars() {
            let slot = letters.get_mut(count)?;
            *slot = match ch {
                'G' | 'g' | '🟩' => LetterFeedback::Correct,
                'Y' | 'y' | '🟨' => LetterFeedback::Present,
                '-' | '_' | '⬜' => LetterFeedback::Absent,
                _ => return None,
            };
            count += 1;
        }
        (count == WORD_LENGTH).then(|| Self::from_letters(letters))
    }

    /// Iterate over every valid code in ascending order
    pub fn all() -> impl Iterator<Item = Self> {
        (0..NUM_CODES as u8).map(Self)
    }
}

/// Five-character hint string (`G`, `Y`, `-`)
impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.letters() {
            write!(f, "{}", letter.hint_char())?;
        }
        Ok(())
    }
}

/// Serialized as the bare integer code
impl Serialize for Feedback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.0)
    }
}

impl<'de> Deserialize<'de> for Feedback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!("feedback code {value} is out of range"))
        })
    }
}

impl std::str::FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hint(s).ok_or_else(|| format!("Invalid hint string: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterFeedback::{Absent, Correct, Present};

    fn word(s: &str) -> Word {
        Word::new(s).unwrap()
    }

    #[test]
    fn all_correct_constant() {
        assert_eq!(Feedback::ALL_CORRECT.value(), 242);
        assert_eq!(Feedback::ALL_CORRECT.letters(), [Correct; WORD_LENGTH]);
        assert_eq!(Feedback::ALL_CORRECT.to_string(), "GGGGG");
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert!(Feedback::new(242).is_some());
        assert!(Feedback::new(243).is_none());
        assert!(Feedback::new(255).is_none());
    }

    #[test]
    fn decode_encode_round_trip() {
        for code in Feedback::all() {
            assert_eq!(Feedback::from_letters(code.letters()), code);
        }
        assert_eq!(Feedback::all().count(), NUM_CODES);
    }

    #[test]
    fn first_letter_is_most_significant() {
        let code = Feedback::from_letters([Present, Absent, Absent, Absent, Absent]);
        assert_eq!(code.value(), 81);
        let code = Feedback::from_letters([Absent, Absent, Absent, Absent, Correct]);
        assert_eq!(code.value(), 2);
    }

    #[test]
    fn same_word_is_all_correct() {
        for w in ["crane", "slate", "aaaaa", "speed"] {
            assert!(Feedback::calculate(&word(w), &word(w)).is_all_correct());
        }
    }

    #[test]
    fn reversed_word_keeps_middle_letter() {
        let code = Feedback::calculate(&word("abcde"), &word("edcba"));
        assert_eq!(code.letters(), [Present, Present, Correct, Present, Present]);
        assert_eq!(code.value(), 130);
    }

    #[test]
    fn duplicate_letters_green_takes_priority() {
        // ROBOT vs FLOOR: second O is green, first O yellow
        let code = Feedback::calculate(&word("robot"), &word("floor"));
        assert_eq!(code.to_string(), "YY-G-");
    }

    #[test]
    fn duplicate_letters_only_count_once() {
        // SPEED vs ABIDE: only one E is present in the answer
        let code = Feedback::calculate(&word("speed"), &word("abide"));
        assert_eq!(code.to_string(), "--Y-Y");
    }

    #[test]
    fn absent_mask_ignores_letters_seen_elsewhere() {
        let guess = word("speed");
        let code = Feedback::calculate(&guess, &word("abide"));
        let mask = code.absent_letter_mask(&guess);
        assert_eq!(mask, letter_bit(b's') | letter_bit(b'p'));
    }

    #[test]
    fn parse_hint_variants() {
        let p1 = Feedback::parse_hint("GY-GY").unwrap();
        let p2 = Feedback::parse_hint("🟩🟨⬜🟩🟨").unwrap();
        let p3 = Feedback::parse_hint("gy_gy").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1, p3);
        assert_eq!(p1.to_emoji(), "🟩🟨⬜🟩🟨");
        assert_eq!("GY-GY".parse::<Feedback>(), Ok(p1));
    }

    #[test]
    fn parse_hint_invalid() {
        assert!(Feedback::parse_hint("GYGGYG").is_none());
        assert!(Feedback::parse_hint("GYG").is_none());
        assert!(Feedback::parse_hint("GXGGY").is_none());
        assert!(Feedback::parse_hint("").is_none());
    }
}
