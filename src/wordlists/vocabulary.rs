//! Guess and answer vocabularies
//!
//! The guess vocabulary indexes the rows of the feedback table and the answer
//! vocabulary its columns. They may be the same list (symmetric mode) or differ
//! (asymmetric mode), but every answer must also be guessable.

use crate::core::Word;
use rustc_hash::{FxHashMap, FxHasher};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Error type for inconsistent vocabularies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyError {
    Empty,
    DuplicateGuess(String),
    DuplicateAnswer(String),
    AnswerNotGuessable(String),
}

impl fmt::Display for VocabularyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Vocabulary must contain at least one answer"),
            Self::DuplicateGuess(word) => write!(f, "Guess '{word}' appears more than once"),
            Self::DuplicateAnswer(word) => write!(f, "Answer '{word}' appears more than once"),
            Self::AnswerNotGuessable(word) => {
                write!(f, "Answer '{word}' is missing from the guess list")
            }
        }
    }
}

impl std::error::Error for VocabularyError {}

/// Ordered guess and answer word lists with cross indices
#[derive(Debug, Clone)]
pub struct Vocabulary {
    guesses: Vec<Word>,
    answers: Vec<Word>,
    guess_index: FxHashMap<String, usize>,
    guess_to_answer: Vec<Option<usize>>,
    answer_to_guess: Vec<usize>,
}

impl Vocabulary {
    /// One list used for both guesses and answers
    ///
    /// # Errors
    /// Returns `VocabularyError` if the list is empty or has duplicates.
    pub fn symmetric(words: Vec<Word>) -> Result<Self, VocabularyError> {
        Self::asymmetric(words.clone(), words)
    }

    /// Separate guess and answer lists
    ///
    /// # Errors
    /// Returns `VocabularyError` if there are no answers, a list has duplicates,
    /// or an answer is not in the guess list.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::wordlists::{Vocabulary, loader::words_from_slice};
    ///
    /// let vocab = Vocabulary::asymmetric(
    ///     words_from_slice(&["salet", "crane", "slate"]),
    ///     words_from_slice(&["crane", "slate"]),
    /// )
    /// .unwrap();
    /// assert_eq!(vocab.answer_of_guess(0), None);
    /// assert_eq!(vocab.answer_of_guess(2), Some(1));
    /// assert_eq!(vocab.guess_of_answer(0), 1);
    /// ```
    pub fn asymmetric(guesses: Vec<Word>, answers: Vec<Word>) -> Result<Self, VocabularyError> {
        if answers.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut guess_index = FxHashMap::default();
        for (index, word) in guesses.iter().enumerate() {
            if guess_index.insert(word.text().to_string(), index).is_some() {
                return Err(VocabularyError::DuplicateGuess(word.text().to_string()));
            }
        }

        let mut guess_to_answer = vec![None; guesses.len()];
        let mut answer_to_guess = Vec::with_capacity(answers.len());
        for (answer_idx, word) in answers.iter().enumerate() {
            let guess_idx = *guess_index
                .get(word.text())
                .ok_or_else(|| VocabularyError::AnswerNotGuessable(word.text().to_string()))?;
            if guess_to_answer[guess_idx].replace(answer_idx).is_some() {
                return Err(VocabularyError::DuplicateAnswer(word.text().to_string()));
            }
            answer_to_guess.push(guess_idx);
        }

        Ok(Self {
            guesses,
            answers,
            guess_index,
            guess_to_answer,
            answer_to_guess,
        })
    }

    #[must_use]
    pub fn guesses(&self) -> &[Word] {
        &self.guesses
    }

    #[must_use]
    pub fn answers(&self) -> &[Word] {
        &self.answers
    }

    #[must_use]
    pub fn num_guesses(&self) -> usize {
        self.guesses.len()
    }

    #[must_use]
    pub fn num_answers(&self) -> usize {
        self.answers.len()
    }

    /// Guess word at `index`, if it exists
    #[must_use]
    pub fn guess(&self, index: usize) -> Option<&Word> {
        self.guesses.get(index)
    }

    /// Guess index of a word's text
    #[must_use]
    pub fn guess_index(&self, text: &str) -> Option<usize> {
        self.guess_index.get(&text.to_lowercase()).copied()
    }

    /// Answer index of the same word as guess `guess`, if it is an answer
    #[inline]
    #[must_use]
    pub fn answer_of_guess(&self, guess: usize) -> Option<usize> {
        self.guess_to_answer.get(guess).copied().flatten()
    }

    /// Guess index of the same word as answer `answer`
    ///
    /// # Panics
    /// Panics if `answer` is out of range.
    #[inline]
    #[must_use]
    pub fn guess_of_answer(&self, answer: usize) -> usize {
        self.answer_to_guess[answer]
    }

    /// Hash of both word lists in order
    ///
    /// Saved tables and order caches carry it so that files built for other
    /// lists of the same size are rejected.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = FxHasher::default();
        for list in [&self.guesses, &self.answers] {
            (list.len() as u64).hash(&mut hasher);
            for word in list {
                word.text().hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    /// Whether guesses and answers are the same list in the same order
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.guesses == self.answers
    }
}
