//! Admissible next guesses
//!
//! Walks an ordering and drops guesses that cannot add information: guesses already
//! made on the path, and (optionally) guesses using a letter the path has proven
//! absent from the answer.

use crate::core::Feedback;
use crate::wordlists::Vocabulary;

/// Letters proven absent by the feedback seen along a path
///
/// `codes[i]` is the feedback for `guesses[i]`; extra guesses without feedback yet
/// are ignored.
#[must_use]
pub fn black_letters(vocab: &Vocabulary, guesses: &[usize], codes: &[Feedback]) -> u32 {
    guesses
        .iter()
        .zip(codes)
        .filter_map(|(&guess, &code)| vocab.guess(guess).map(|word| code.absent_letter_mask(word)))
        .fold(0, |mask, absent| mask | absent)
}

/// Lazy filter over a guess ordering
pub struct CandidateFilter<'a, I> {
    source: I,
    vocab: &'a Vocabulary,
    used: Vec<usize>,
    black: u32,
}

impl<'a, I> CandidateFilter<'a, I>
where
    I: Iterator<Item = usize>,
{
    /// Skip path guesses and guesses containing black letters
    pub fn new(source: I, vocab: &'a Vocabulary, guesses: &[usize], codes: &[Feedback]) -> Self {
        Self {
            source,
            vocab,
            used: guesses.to_vec(),
            black: black_letters(vocab, guesses, codes),
        }
    }

    /// Skip path guesses only
    pub fn unused_only(source: I, vocab: &'a Vocabulary, guesses: &[usize]) -> Self {
        Self {
            source,
            vocab,
            used: guesses.to_vec(),
            black: 0,
        }
    }

    /// Letter mask this filter rejects
    #[must_use]
    pub const fn black_mask(&self) -> u32 {
        self.black
    }

    fn admits(&self, guess: usize) -> bool {
        if self.used.contains(&guess) {
            return false;
        }
        self.black == 0
            || self
                .vocab
                .guess(guess)
                .is_some_and(|word| word.letter_mask() & self.black == 0)
    }
}

impl<I> Iterator for CandidateFilter<'_, I>
where
    I: Iterator<Item = usize>,
{
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            let guess = self.source.next()?;
            if self.admits(guess) {
                return Some(guess);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Word, letter_bit};
    use crate::wordlists::loader::words_from_slice;

    fn vocab() -> Vocabulary {
        Vocabulary::symmetric(words_from_slice(&[
            "crane", "slate", "irate", "fuzzy", "moist", "speed", "abide",
        ]))
        .unwrap()
    }

    fn code(guess: &str, answer: &str) -> Feedback {
        Feedback::calculate(&Word::new(guess).unwrap(), &Word::new(answer).unwrap())
    }

    #[test]
    fn black_letters_from_path() {
        let vocab = vocab();
        // crane against moist: every letter absent
        let mask = black_letters(&vocab, &[0], &[code("crane", "moist")]);
        let expected = [b'c', b'r', b'a', b'n', b'e']
            .iter()
            .fold(0, |m, &l| m | letter_bit(l));
        assert_eq!(mask, expected);
    }

    #[test]
    fn black_letters_ignore_pending_guess() {
        let vocab = vocab();
        assert_eq!(black_letters(&vocab, &[0, 1], &[]), 0);
    }

    #[test]
    fn filter_drops_used_and_black_letter_guesses() {
        let vocab = vocab();
        let codes = [code("crane", "moist")];
        let order = [0, 1, 2, 3, 4, 5, 6];

        let admitted: Vec<usize> =
            CandidateFilter::new(order.iter().copied(), &vocab, &[0], &codes).collect();

        // everything but fuzzy and moist contains one of c, r, a, n, e
        assert_eq!(admitted, [3, 4]);
    }

    #[test]
    fn duplicate_letters_are_not_blackened() {
        let vocab = vocab();
        // speed against abide: one E present, the other absent
        let codes = [code("speed", "abide")];
        let order = [0, 1, 2, 3, 4, 5, 6];

        let admitted: Vec<usize> =
            CandidateFilter::new(order.iter().copied(), &vocab, &[5], &codes).collect();

        // s and p are black; e is not
        assert_eq!(admitted, [0, 2, 3, 6]);
    }

    #[test]
    fn unused_only_keeps_black_letter_guesses() {
        let vocab = vocab();
        let admitted: Vec<usize> =
            CandidateFilter::unused_only(vec![4, 0, 2, 1].into_iter(), &vocab, &[0, 1]).collect();
        assert_eq!(admitted, [4, 2]);
    }

    #[test]
    fn never_yields_path_guesses() {
        let vocab = vocab();
        let order: Vec<usize> = (0..vocab.num_guesses()).collect();
        let answers = ["moist", "abide", "fuzzy", "slate", "irate"];

        for len in 1..=5 {
            let guesses: Vec<usize> = (0..len).collect();
            let codes: Vec<Feedback> = guesses
                .iter()
                .zip(answers)
                .map(|(&g, answer)| code(vocab.guesses()[g].text(), answer))
                .collect();
            let admitted = CandidateFilter::new(order.iter().copied(), &vocab, &guesses, &codes);
            for guess in admitted {
                assert!(!guesses.contains(&guess));
            }
        }
    }
}
