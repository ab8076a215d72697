//! Decision tree nodes and their JSON shape
//!
//! A node is written as a single-entry object mapping the guess index to its action
//! map; action keys are feedback codes, values are child nodes:
//!
//! ```text
//! {"0": {"130": {"1": {}}}}
//! ```

use crate::core::Feedback;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// One guess and the guess to make next for each feedback it can receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTree {
    guess: usize,
    actions: BTreeMap<Feedback, DecisionTree>,
}

impl DecisionTree {
    /// A node with no follow-up actions
    #[must_use]
    pub const fn leaf(guess: usize) -> Self {
        Self {
            guess,
            actions: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn new(guess: usize, actions: BTreeMap<Feedback, Self>) -> Self {
        Self { guess, actions }
    }

    /// Guess index made at this node
    #[must_use]
    pub const fn guess(&self) -> usize {
        self.guess
    }

    #[must_use]
    pub const fn actions(&self) -> &BTreeMap<Feedback, Self> {
        &self.actions
    }

    /// Child reached after observing `code`
    #[must_use]
    pub fn child(&self, code: Feedback) -> Option<&Self> {
        self.actions.get(&code)
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.actions.is_empty()
    }

    pub(crate) fn insert(&mut self, code: Feedback, child: Self) {
        self.actions.insert(code, child);
    }

    /// Total number of nodes, this one included
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        1 + self.actions.values().map(Self::num_nodes).sum::<usize>()
    }

    /// Number of guesses on the longest root-to-leaf path
    #[must_use]
    pub fn height(&self) -> usize {
        1 + self.actions.values().map(Self::height).max().unwrap_or(0)
    }

    /// Largest guess index anywhere in the tree
    #[must_use]
    pub fn max_guess(&self) -> usize {
        self.actions
            .values()
            .map(Self::max_guess)
            .fold(self.guess, usize::max)
    }
}

impl Serialize for DecisionTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.guess, &self.actions)?;
        map.end()
    }
}

struct DecisionTreeVisitor;

impl<'de> Visitor<'de> for DecisionTreeVisitor {
    type Value = DecisionTree;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a single-entry map from guess index to action map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let (guess, actions) = map
            .next_entry::<usize, BTreeMap<Feedback, DecisionTree>>()?
            .ok_or_else(|| de::Error::invalid_length(0, &self))?;
        if map.next_key::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(2, &self));
        }
        Ok(DecisionTree { guess, actions })
    }
}

impl<'de> Deserialize<'de> for DecisionTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DecisionTreeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(value: u8) -> Feedback {
        Feedback::new(value).unwrap()
    }

    fn sample() -> DecisionTree {
        let mut inner = DecisionTree::leaf(3);
        inner.insert(code(0), DecisionTree::leaf(4));
        let mut root = DecisionTree::leaf(0);
        root.insert(code(130), DecisionTree::leaf(1));
        root.insert(code(7), inner);
        root
    }

    #[test]
    fn serializes_as_nested_single_entry_maps() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"0":{"7":{"3":{"0":{"4":{}}}},"130":{"1":{}}}}"#);
    }

    #[test]
    fn json_round_trip() {
        let tree = sample();
        let json = serde_json::to_string_pretty(&tree).unwrap();
        let parsed: DecisionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, tree);
    }

    #[test]
    fn rejects_multi_entry_nodes() {
        let result = serde_json::from_str::<DecisionTree>(r#"{"0":{},"1":{}}"#);
        assert!(result.is_err());
        assert!(serde_json::from_str::<DecisionTree>("{}").is_err());
    }

    #[test]
    fn rejects_invalid_codes() {
        assert!(serde_json::from_str::<DecisionTree>(r#"{"0":{"243":{"1":{}}}}"#).is_err());
    }

    #[test]
    fn shape_metrics() {
        let tree = sample();
        assert_eq!(tree.num_nodes(), 4);
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.max_guess(), 4);
        assert!(tree.child(code(130)).unwrap().is_leaf());
        assert!(tree.child(code(1)).is_none());
    }
}
