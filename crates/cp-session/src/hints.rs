//! Player-side color marks on tiles.
//!
//! Marks are private notes: they never affect scoring and are keyed by the
//! normalized word so they survive shuffles.

use cp_core::{normalize_item, CategoryColor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Most marks a single word can carry.
pub const MAX_MARKS: usize = 2;

/// Key accepted in place of a color to clear a word.
pub const CLEAR_KEY: &str = "none";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintAction {
    /// Remove every mark on the word.
    Clear,
    /// Remove the color if present, otherwise add it.
    Toggle(CategoryColor),
}

impl FromStr for HintAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(CLEAR_KEY) {
            Ok(Self::Clear)
        } else {
            s.parse().map(Self::Toggle)
        }
    }
}

/// Word → marks, in the order they were placed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HintBoard(BTreeMap<String, Vec<CategoryColor>>);

impl HintBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action` to `word`. When the word already has [`MAX_MARKS`]
    /// marks, a new color replaces the last one.
    pub fn apply(&mut self, word: &str, action: HintAction) {
        let key = normalize_item(word);
        match action {
            HintAction::Clear => {
                self.0.remove(&key);
            }
            HintAction::Toggle(color) => {
                let marks = self.0.entry(key.clone()).or_default();
                if let Some(pos) = marks.iter().position(|c| *c == color) {
                    marks.remove(pos);
                } else if marks.len() < MAX_MARKS {
                    marks.push(color);
                } else {
                    marks[MAX_MARKS - 1] = color;
                }
                if marks.is_empty() {
                    self.0.remove(&key);
                }
            }
        }
    }

    pub fn marks(&self, word: &str) -> &[CategoryColor] {
        self.0.get(&normalize_item(word)).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of marked words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
