//! Human-readable trees
//!
//! Same nested shape as [`DecisionTree`] but with words for guesses and hint
//! strings (`G` correct, `Y` present, `-` absent) for feedback:
//!
//! ```text
//! {"abcde": {"YYGYY": {"edcba": {}}}}
//! ```

use crate::core::Feedback;
use crate::tree::DecisionTree;
use crate::wordlists::Vocabulary;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Error type for converting between tree formats
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeFormatError {
    UnknownGuess(usize),
    UnknownWord(String),
    InvalidHint(String),
}

impl fmt::Display for TreeFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGuess(index) => write!(f, "Guess index {index} is not in the vocabulary"),
            Self::UnknownWord(word) => write!(f, "Word '{word}' is not in the guess list"),
            Self::InvalidHint(hint) => write!(f, "Invalid hint string: {hint}"),
        }
    }
}

impl std::error::Error for TreeFormatError {}

/// Decision tree labelled with words and hint strings
///
/// Actions keep ascending feedback-code order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadableTree {
    pub guess: String,
    pub actions: Vec<(String, ReadableTree)>,
}

impl ReadableTree {
    /// Label a tree with the words of `vocab`
    ///
    /// # Errors
    /// Returns `TreeFormatError::UnknownGuess` if a guess index is out of range.
    ///
    /// # Examples
    /// ```
    /// use wordle_tree::output::ReadableTree;
    /// use wordle_tree::tree::DecisionTree;
    /// use wordle_tree::wordlists::{Vocabulary, loader::words_from_slice};
    ///
    /// let vocab = Vocabulary::symmetric(words_from_slice(&["abcde", "edcba"])).unwrap();
    /// let tree: DecisionTree = serde_json::from_str(r#"{"0":{"130":{"1":{}}}}"#).unwrap();
    ///
    /// let readable = ReadableTree::from_tree(&tree, &vocab).unwrap();
    /// assert_eq!(
    ///     serde_json::to_string(&readable).unwrap(),
    ///     r#"{"abcde":{"YYGYY":{"edcba":{}}}}"#
    /// );
    /// ```
    pub fn from_tree(tree: &DecisionTree, vocab: &Vocabulary) -> Result<Self, TreeFormatError> {
        let guess = vocab
            .guess(tree.guess())
            .ok_or(TreeFormatError::UnknownGuess(tree.guess()))?
            .to_string();
        let actions = tree
            .actions()
            .iter()
            .map(|(code, child)| Ok((code.to_string(), Self::from_tree(child, vocab)?)))
            .collect::<Result<Vec<_>, TreeFormatError>>()?;
        Ok(Self { guess, actions })
    }

    /// Map words and hints back to indices and codes
    ///
    /// # Errors
    /// Returns `TreeFormatError` for words missing from `vocab` or malformed hints.
    pub fn to_tree(&self, vocab: &Vocabulary) -> Result<DecisionTree, TreeFormatError> {
        let guess = vocab
            .guess_index(&self.guess)
            .ok_or_else(|| TreeFormatError::UnknownWord(self.guess.clone()))?;
        let mut actions = BTreeMap::new();
        for (hint, child) in &self.actions {
            let code = Feedback::parse_hint(hint)
                .ok_or_else(|| TreeFormatError::InvalidHint(hint.clone()))?;
            actions.insert(code, child.to_tree(vocab)?);
        }
        Ok(DecisionTree::new(guess, actions))
    }
}

struct Actions<'a>(&'a [(String, ReadableTree)]);

impl Serialize for Actions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (hint, child) in self.0 {
            map.serialize_entry(hint, child)?;
        }
        map.end()
    }
}

impl Serialize for ReadableTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.guess, &Actions(&self.actions))?;
        map.end()
    }
}

struct ActionsVisitor;

impl<'de> Visitor<'de> for ActionsVisitor {
    type Value = Vec<(String, ReadableTree)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map from hint string to readable tree")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut actions = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry()? {
            actions.push(entry);
        }
        Ok(actions)
    }
}

struct ActionList(Vec<(String, ReadableTree)>);

impl<'de> Deserialize<'de> for ActionList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ActionsVisitor).map(Self)
    }
}

struct ReadableTreeVisitor;

impl<'de> Visitor<'de> for ReadableTreeVisitor {
    type Value = ReadableTree;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a single-entry map from word to action map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let (guess, ActionList(actions)) = map
            .next_entry::<String, ActionList>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(ReadableTree { guess, actions })
    }
}

impl<'de> Deserialize<'de> for ReadableTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ReadableTreeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::loader::words_from_slice;

    fn vocab() -> Vocabulary {
        Vocabulary::symmetric(words_from_slice(&["abcde", "edcba", "eabcd"])).unwrap()
    }

    fn tree() -> DecisionTree {
        serde_json::from_str(r#"{"0":{"121":{"2":{}},"130":{"1":{}}}}"#).unwrap()
    }

    #[test]
    fn labels_words_and_hints_in_code_order() {
        let readable = ReadableTree::from_tree(&tree(), &vocab()).unwrap();
        assert_eq!(
            serde_json::to_string(&readable).unwrap(),
            r#"{"abcde":{"YYYYY":{"eabcd":{}},"YYGYY":{"edcba":{}}}}"#
        );
    }

    #[test]
    fn readable_json_maps_back_to_indices() {
        let json = r#"{"abcde":{"YYYYY":{"eabcd":{}},"YYGYY":{"edcba":{}}}}"#;
        let readable: ReadableTree = serde_json::from_str(json).unwrap();
        assert_eq!(readable.to_tree(&vocab()).unwrap(), tree());
    }

    #[test]
    fn conversion_errors() {
        let tree: DecisionTree = serde_json::from_str(r#"{"0":{"130":{"7":{}}}}"#).unwrap();
        assert_eq!(
            ReadableTree::from_tree(&tree, &vocab()).unwrap_err(),
            TreeFormatError::UnknownGuess(7)
        );

        let unknown: ReadableTree = serde_json::from_str(r#"{"zzzzz":{}}"#).unwrap();
        assert_eq!(
            unknown.to_tree(&vocab()).unwrap_err(),
            TreeFormatError::UnknownWord("zzzzz".to_string())
        );

        let bad_hint: ReadableTree =
            serde_json::from_str(r#"{"abcde":{"GGX":{"edcba":{}}}}"#).unwrap();
        assert_eq!(
            bad_hint.to_tree(&vocab()).unwrap_err(),
            TreeFormatError::InvalidHint("GGX".to_string())
        );
    }
}
