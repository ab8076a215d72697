//! Guess and feedback history from the root to a search node

use crate::core::Feedback;
use crate::wordlists::Vocabulary;

/// Parallel guess and feedback sequences
///
/// At a node of depth `d` there are `d` guesses and `d - 1` codes. While a branch
/// is being explored the code for that branch is pushed first, giving `d` codes,
/// then each candidate guess is pushed and popped in turn.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPath {
    guesses: Vec<usize>,
    codes: Vec<Feedback>,
}

impl SearchPath {
    /// Path holding only the root guess
    #[must_use]
    pub fn root(guess: usize) -> Self {
        Self {
            guesses: vec![guess],
            codes: Vec::new(),
        }
    }

    #[must_use]
    pub fn from_parts(guesses: Vec<usize>, codes: Vec<Feedback>) -> Self {
        Self { guesses, codes }
    }

    /// Number of guesses made so far
    #[must_use]
    pub fn depth(&self) -> usize {
        self.guesses.len()
    }

    #[must_use]
    pub fn guesses(&self) -> &[usize] {
        &self.guesses
    }

    #[must_use]
    pub fn codes(&self) -> &[Feedback] {
        &self.codes
    }

    /// Guess made at the current node
    ///
    /// # Panics
    /// Panics on an empty path.
    #[must_use]
    pub fn last_guess(&self) -> usize {
        *self.guesses.last().expect("search path always holds a root guess")
    }

    #[must_use]
    pub fn contains_guess(&self, guess: usize) -> bool {
        self.guesses.contains(&guess)
    }

    pub(crate) fn push_code(&mut self, code: Feedback) {
        debug_assert_eq!(self.codes.len() + 1, self.guesses.len());
        self.codes.push(code);
    }

    pub(crate) fn pop_code(&mut self) {
        debug_assert_eq!(self.codes.len(), self.guesses.len());
        self.codes.pop();
    }

    pub(crate) fn push_guess(&mut self, guess: usize) {
        debug_assert_eq!(self.codes.len(), self.guesses.len());
        self.guesses.push(guess);
    }

    pub(crate) fn pop_guess(&mut self) {
        debug_assert_eq!(self.codes.len() + 1, self.guesses.len());
        self.guesses.pop();
    }

    /// Human-readable chain such as `crane -> --G-G -> slate`
    #[must_use]
    pub fn describe(&self, vocab: &Vocabulary) -> String {
        let mut parts = Vec::with_capacity(self.guesses.len() + self.codes.len());
        for (i, &guess) in self.guesses.iter().enumerate() {
            parts.push(
                vocab
                    .guess(guess)
                    .map_or_else(|| format!("#{guess}"), ToString::to_string),
            );
            if let Some(code) = self.codes.get(i) {
                parts.push(code.to_string());
            }
        }
        parts.join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;

    #[test]
    fn push_and_pop_keep_lengths_paired() {
        let mut path = SearchPath::root(2);
        assert_eq!(path.depth(), 1);
        assert!(path.codes().is_empty());

        path.push_code(Feedback::new(5).unwrap());
        path.push_guess(7);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.last_guess(), 7);
        assert!(path.contains_guess(2));

        path.pop_guess();
        path.pop_code();
        assert_eq!(path, SearchPath::root(2));
    }

    #[test]
    fn describe_uses_words_and_hints() {
        let vocab = Vocabulary::symmetric(words_from_slice(&["crane", "slate"])).unwrap();
        let path = SearchPath::from_parts(
            vec![0, 1],
            vec![Feedback::parse_hint("--G-G").unwrap()],
        );
        assert_eq!(path.describe(&vocab), "crane -> --G-G -> slate");

        let pending = SearchPath::from_parts(vec![0, 9], vec![Feedback::ALL_CORRECT]);
        assert_eq!(pending.describe(&vocab), "crane -> GGGGG -> #9");
    }
}
