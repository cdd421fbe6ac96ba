//! Category colors and the position → color table.
//!
//! A puzzle never stores colors: a category's color and difficulty rank come
//! from its position, looked up through a [`Palette`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category color, ordered easiest to hardest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Yellow,
    Green,
    Blue,
    Purple,
    Red,
    Orange,
}

impl CategoryColor {
    pub const ALL: [CategoryColor; 6] = [
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::Red,
        Self::Orange,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Red => "red",
            Self::Orange => "orange",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Purple => "Purple",
            Self::Red => "Red",
            Self::Orange => "Orange",
        }
    }

    /// Tile background color.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Yellow => "#f9df6d",
            Self::Green => "#a0c35a",
            Self::Blue => "#b0c4ef",
            Self::Purple => "#ba81c5",
            Self::Red => "#f28b82",
            Self::Orange => "#f6b76b",
        }
    }

    /// Square used in shared results.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Yellow => "🟨",
            Self::Green => "🟩",
            Self::Blue => "🟦",
            Self::Purple => "🟪",
            Self::Red => "🟥",
            Self::Orange => "🟧",
        }
    }

    /// Difficulty badge shown by the creator.
    pub fn difficulty(&self) -> &'static str {
        match self {
            Self::Yellow => "Easiest",
            Self::Green => "Easy",
            Self::Blue => "Medium",
            Self::Purple => "Hard",
            Self::Red => "Harder",
            Self::Orange => "Hardest",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for CategoryColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CategoryColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s.trim()).ok_or_else(|| format!("unknown category color: {s}"))
    }
}

/// Ordered position → color table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette(Vec<CategoryColor>);

impl Palette {
    pub fn new(colors: Vec<CategoryColor>) -> Self {
        Self(colors)
    }

    /// Color for the category at `index`, if the palette reaches that far.
    pub fn color_for(&self, index: usize) -> Option<CategoryColor> {
        self.0.get(index).copied()
    }

    pub fn colors(&self) -> &[CategoryColor] {
        &self.0
    }

    /// Upper bound on how many categories a puzzle may carry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(CategoryColor::ALL.to_vec())
    }
}
