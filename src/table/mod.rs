//! Dense feedback table
//!
//! Row `g`, column `a` holds the feedback for guess `g` against answer `a`. The
//! table is computed once, persisted, and only read during tree construction.

mod storage;

use crate::core::{Feedback, FeedbackOracle, NUM_CODES};
use crate::wordlists::Vocabulary;
use rayon::prelude::*;
use std::fmt;
use std::io;

/// Error type for table construction, loading and validation
#[derive(Debug)]
pub enum TableError {
    Io(io::Error),
    BadMagic,
    UnsupportedVersion(u16),
    Truncated { expected: usize, actual: usize },
    InvalidCode { guess: usize, answer: usize, value: u8 },
    ShapeMismatch {
        table: (usize, usize),
        vocabulary: (usize, usize),
    },
    IdentityViolation { guess: usize, answer: usize },
    VocabularyMismatch { table: u64, vocabulary: u64 },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "Table I/O failed: {e}"),
            Self::BadMagic => write!(f, "Not a feedback table file"),
            Self::UnsupportedVersion(v) => write!(f, "Unsupported table version {v}"),
            Self::Truncated { expected, actual } => {
                write!(f, "Table truncated: expected {expected} codes, got {actual}")
            }
            Self::InvalidCode {
                guess,
                answer,
                value,
            } => write!(f, "Invalid code {value} at guess {guess}, answer {answer}"),
            Self::ShapeMismatch { table, vocabulary } => write!(
                f,
                "Table is {}x{} but vocabulary is {}x{}",
                table.0, table.1, vocabulary.0, vocabulary.1
            ),
            Self::IdentityViolation { guess, answer } => write!(
                f,
                "Guess {guess} and answer {answer} disagree on all-correct feedback"
            ),
            Self::VocabularyMismatch { table, vocabulary } => write!(
                f,
                "Table was computed for word lists {table:016x}, not {vocabulary:016x}"
            ),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TableError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Feedback for every (guess, answer) pair, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackTable {
    num_guesses: usize,
    num_answers: usize,
    /// [`Vocabulary::fingerprint`] of the lists it was computed for, 0 if unknown
    vocabulary: u64,
    codes: Vec<Feedback>,
}

impl FeedbackTable {
    /// Score every guess against every answer, one row per rayon task
    pub fn compute<O>(vocab: &Vocabulary, oracle: &O) -> Self
    where
        O: FeedbackOracle + Sync,
    {
        let num_guesses = vocab.num_guesses();
        let num_answers = vocab.num_answers();
        let mut codes = vec![Feedback::ALL_CORRECT; num_guesses * num_answers];

        codes
            .par_chunks_mut(num_answers)
            .zip(vocab.guesses().par_iter())
            .for_each(|(row, guess)| {
                for (slot, answer) in row.iter_mut().zip(vocab.answers()) {
                    *slot = oracle.feedback(guess, answer);
                }
            });

        Self {
            num_guesses,
            num_answers,
            vocabulary: vocab.fingerprint(),
            codes,
        }
    }

    /// Build from raw row-major bytes
    ///
    /// # Errors
    /// Returns `TableError` if the length is wrong or a byte is not a valid code.
    pub fn from_raw(
        num_guesses: usize,
        num_answers: usize,
        raw: &[u8],
    ) -> Result<Self, TableError> {
        let expected = num_guesses.checked_mul(num_answers).unwrap_or(usize::MAX);
        if raw.len() != expected {
            return Err(TableError::Truncated {
                expected,
                actual: raw.len(),
            });
        }

        let codes = raw
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                Feedback::new(value).ok_or(TableError::InvalidCode {
                    guess: i / num_answers.max(1),
                    answer: i % num_answers.max(1),
                    value,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            num_guesses,
            num_answers,
            vocabulary: 0,
            codes,
        })
    }

    /// Tag the table with the fingerprint of the lists it belongs to
    #[must_use]
    pub fn with_vocabulary(mut self, fingerprint: u64) -> Self {
        self.vocabulary = fingerprint;
        self
    }

    #[must_use]
    pub const fn num_guesses(&self) -> usize {
        self.num_guesses
    }

    #[must_use]
    pub const fn num_answers(&self) -> usize {
        self.num_answers
    }

    /// Fingerprint of the word lists the table was computed for
    #[must_use]
    pub const fn vocabulary(&self) -> u64 {
        self.vocabulary
    }

    /// Feedback for guess `guess` against answer `answer`
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, guess: usize, answer: usize) -> Feedback {
        self.row(guess)[answer]
    }

    /// All codes for one guess, indexed by answer
    #[inline]
    #[must_use]
    pub fn row(&self, guess: usize) -> &[Feedback] {
        let start = guess * self.num_answers;
        &self.codes[start..start + self.num_answers]
    }

    /// Cluster sizes of a guess over the whole answer vocabulary
    #[must_use]
    pub fn code_counts(&self, guess: usize) -> [usize; NUM_CODES] {
        let mut counts = [0; NUM_CODES];
        for code in self.row(guess) {
            counts[code.index()] += 1;
        }
        counts
    }

    /// Codes a guess can produce, largest raw cluster first (ties by code)
    #[must_use]
    pub fn codes_by_cluster_size(&self, guess: usize) -> Vec<Feedback> {
        let counts = self.code_counts(guess);
        let mut codes: Vec<Feedback> = Feedback::all()
            .filter(|code| counts[code.index()] > 0)
            .collect();
        codes.sort_by_key(|code| std::cmp::Reverse(counts[code.index()]));
        codes
    }

    /// Split `answers` by the feedback `guess` gets against each of them
    ///
    /// Returns the non-empty clusters in ascending code order. Each cluster keeps the
    /// relative order of `answers`.
    #[must_use]
    pub fn partition(&self, guess: usize, answers: &[usize]) -> Vec<(Feedback, Vec<usize>)> {
        let row = self.row(guess);
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); NUM_CODES];
        for &answer in answers {
            buckets[row[answer].index()].push(answer);
        }
        Feedback::all()
            .zip(buckets)
            .filter(|(_, bucket)| !bucket.is_empty())
            .collect()
    }

    /// Check the table dimensions against a vocabulary
    ///
    /// # Errors
    /// Returns `TableError::ShapeMismatch` if they differ.
    pub fn check_shape(&self, vocab: &Vocabulary) -> Result<(), TableError> {
        let table = (self.num_guesses, self.num_answers);
        let vocabulary = (vocab.num_guesses(), vocab.num_answers());
        if table == vocabulary {
            Ok(())
        } else {
            Err(TableError::ShapeMismatch { table, vocabulary })
        }
    }

    /// Check that all-correct appears exactly where guess and answer are the same word
    ///
    /// # Errors
    /// Returns the first violating cell, or a shape mismatch.
    pub fn check_identity(&self, vocab: &Vocabulary) -> Result<(), TableError> {
        self.check_shape(vocab)?;
        let violation = (0..self.num_guesses).into_par_iter().find_map_first(|guess| {
            let same = vocab.answer_of_guess(guess);
            self.row(guess)
                .iter()
                .enumerate()
                .find(|&(answer, code)| code.is_all_correct() != (same == Some(answer)))
                .map(|(answer, _)| TableError::IdentityViolation { guess, answer })
        });
        violation.map_or(Ok(()), Err)
    }

    /// Check that a loaded table belongs to exactly these word lists
    ///
    /// Same-sized lists in a different order pass the identity check, so the
    /// stored fingerprint is compared as well.
    ///
    /// # Errors
    /// Returns `TableError::VocabularyMismatch`, or any identity check failure.
    pub fn check_vocabulary(&self, vocab: &Vocabulary) -> Result<(), TableError> {
        self.check_identity(vocab)?;
        let vocabulary = vocab.fingerprint();
        if self.vocabulary == vocabulary {
            Ok(())
        } else {
            Err(TableError::VocabularyMismatch {
                table: self.vocabulary,
                vocabulary,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WordleRules;
    use crate::wordlists::loader::words_from_slice;

    fn vocab(words: &[&str]) -> Vocabulary {
        Vocabulary::symmetric(words_from_slice(words)).unwrap()
    }

    #[test]
    fn compute_satisfies_identity() {
        let vocab = vocab(&["crane", "slate", "irate", "crate", "grate", "speed"]);
        let table = FeedbackTable::compute(&vocab, &WordleRules);

        assert_eq!(table.num_guesses(), 6);
        assert_eq!(table.num_answers(), 6);
        assert!(table.check_identity(&vocab).is_ok());
    }

    #[test]
    fn compute_asymmetric_identity() {
        let vocab = Vocabulary::asymmetric(
            words_from_slice(&["salet", "crane", "slate"]),
            words_from_slice(&["slate", "crane"]),
        )
        .unwrap();
        let table = FeedbackTable::compute(&vocab, &WordleRules);

        assert!(table.row(0).iter().all(|code| !code.is_all_correct()));
        assert!(table.get(1, 1).is_all_correct());
        assert!(table.get(2, 0).is_all_correct());
        assert!(table.check_identity(&vocab).is_ok());
    }

    #[test]
    fn reordered_lists_fail_vocabulary_check() {
        let original = vocab(&["crane", "slate", "irate"]);
        let reordered = vocab(&["slate", "crane", "irate"]);
        let table = FeedbackTable::compute(&original, &WordleRules);
        assert!(table.check_vocabulary(&original).is_ok());

        // same size and all-correct diagonal, but different words per index
        assert!(table.check_identity(&reordered).is_ok());
        assert!(matches!(
            table.check_vocabulary(&reordered),
            Err(TableError::VocabularyMismatch { .. })
        ));

        let untagged = FeedbackTable::from_raw(3, 3, &[242, 0, 0, 0, 242, 0, 0, 0, 242]).unwrap();
        assert!(untagged.check_vocabulary(&original).is_err());
        let tagged = untagged.with_vocabulary(original.fingerprint());
        assert!(tagged.check_vocabulary(&original).is_ok());
    }

    #[test]
    fn two_word_scenario_codes() {
        let vocab = vocab(&["abcde", "edcba"]);
        let table = FeedbackTable::compute(&vocab, &WordleRules);

        assert_eq!(table.get(0, 0), Feedback::ALL_CORRECT);
        assert_eq!(table.get(0, 1).to_string(), "YYGYY");
    }

    #[test]
    fn identity_violation_detected() {
        let vocab = vocab(&["crane", "slate"]);
        let table = FeedbackTable::from_raw(2, 2, &[242, 0, 242, 242]).unwrap();

        assert!(matches!(
            table.check_identity(&vocab),
            Err(TableError::IdentityViolation {
                guess: 1,
                answer: 0
            })
        ));
    }

    #[test]
    fn from_raw_validates() {
        assert!(matches!(
            FeedbackTable::from_raw(2, 2, &[0, 0, 0]),
            Err(TableError::Truncated {
                expected: 4,
                actual: 3
            })
        ));
        assert!(matches!(
            FeedbackTable::from_raw(1, 2, &[0, 243]),
            Err(TableError::InvalidCode {
                guess: 0,
                answer: 1,
                value: 243
            })
        ));
    }

    #[test]
    fn partition_is_disjoint_cover() {
        let vocab = vocab(&[
            "crane", "slate", "irate", "crate", "grate", "speed", "abide", "floor",
        ]);
        let table = FeedbackTable::compute(&vocab, &WordleRules);
        let subset = vec![0, 2, 3, 5, 7];

        for guess in 0..vocab.num_guesses() {
            let clusters = table.partition(guess, &subset);
            let mut union: Vec<usize> = clusters
                .iter()
                .flat_map(|(_, members)| members.iter().copied())
                .collect();
            assert_eq!(union.len(), subset.len());
            union.sort_unstable();
            assert_eq!(union, subset);
            for (code, members) in &clusters {
                assert!(members.iter().all(|&a| table.get(guess, a) == *code));
            }
        }
    }

    #[test]
    fn codes_ordered_by_cluster_size() {
        let vocab = vocab(&["crane", "crate", "grate", "irate", "slate"]);
        let table = FeedbackTable::compute(&vocab, &WordleRules);

        let codes = table.codes_by_cluster_size(1);
        let counts = table.code_counts(1);
        assert!(
            codes
                .windows(2)
                .all(|pair| counts[pair[0].index()] >= counts[pair[1].index()])
        );
        assert_eq!(
            codes.iter().map(|c| counts[c.index()]).sum::<usize>(),
            vocab.num_answers()
        );
    }
}
