use crate::palette::Palette;
use crate::validate::normalize_item;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Mistake budget used when a puzzle does not say.
pub const DEFAULT_MAX_MISTAKES: u32 = 4;

/// Wire value for an unlimited budget, in both the compact record and JSON.
pub const UNLIMITED_MISTAKES: i64 = -1;

/// How many wrong guesses a player may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawBudget", into = "i64")]
pub enum MistakeBudget {
    Limited(u32),
    Unlimited,
}

impl MistakeBudget {
    /// Parse the integer form. `-1` is unlimited; other negatives are rejected.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            UNLIMITED_MISTAKES => Some(Self::Unlimited),
            v if v >= 0 => u32::try_from(v).ok().map(Self::Limited),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match self {
            Self::Limited(n) => i64::from(*n),
            Self::Unlimited => UNLIMITED_MISTAKES,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }

    pub fn limit(&self) -> Option<u32> {
        match self {
            Self::Limited(n) => Some(*n),
            Self::Unlimited => None,
        }
    }
}

impl Default for MistakeBudget {
    fn default() -> Self {
        Self::Limited(DEFAULT_MAX_MISTAKES)
    }
}

impl fmt::Display for MistakeBudget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(n) => write!(f, "{n}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

impl From<MistakeBudget> for i64 {
    fn from(budget: MistakeBudget) -> Self {
        budget.as_i64()
    }
}

/// Budget as it appears in JSON: a number, or the string `"unlimited"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBudget {
    Count(i64),
    Text(String),
}

impl TryFrom<RawBudget> for MistakeBudget {
    type Error = String;

    fn try_from(raw: RawBudget) -> Result<Self, Self::Error> {
        match raw {
            RawBudget::Count(n) => {
                MistakeBudget::from_i64(n).ok_or_else(|| format!("invalid mistake budget: {n}"))
            }
            RawBudget::Text(text) => {
                let text = text.trim();
                if text.eq_ignore_ascii_case("unlimited") {
                    return Ok(MistakeBudget::Unlimited);
                }
                text.parse::<i64>()
                    .ok()
                    .and_then(MistakeBudget::from_i64)
                    .ok_or_else(|| format!("invalid mistake budget: {text:?}"))
            }
        }
    }
}

/// A named group of words sharing a hidden theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(alias = "words")]
    pub items: Vec<String>,
}

impl Category {
    pub fn new<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// The full game definition.
///
/// Category order is meaningful: position 0 is the easiest (yellow) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    #[serde(
        default,
        alias = "title",
        deserialize_with = "blank_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(default, alias = "mistakes")]
    pub max_mistakes: MistakeBudget,
    pub categories: Vec<Category>,
}

fn blank_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

impl Puzzle {
    pub fn new(name: Option<String>, max_mistakes: MistakeBudget, categories: Vec<Category>) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            max_mistakes,
            categories,
        }
    }

    /// The puzzle's own name, or `fallback` when it has none.
    pub fn display_name<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(fallback)
    }

    /// Word count of the first category; every category shares it in a playable puzzle.
    pub fn words_per_category(&self) -> usize {
        self.categories.first().map_or(0, |c| c.items.len())
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Whether a game can be built from this puzzle at all.
    ///
    /// Weaker than [`crate::validate`]: decoded links only need a consistent
    /// grid whose categories all have a color.
    pub fn is_playable(&self, palette: &Palette) -> bool {
        let width = self.words_per_category();
        !self.categories.is_empty()
            && self.categories.len() <= palette.len()
            && width > 0
            && self.categories.iter().all(|c| c.items.len() == width)
    }

    /// Index of the category holding `item`, compared after normalization.
    pub fn category_of(&self, item: &str) -> Option<usize> {
        let needle = normalize_item(item);
        self.categories
            .iter()
            .position(|c| c.items.iter().any(|i| normalize_item(i) == needle))
    }

    /// Trimmed names and trimmed, upper-cased items, as the creator submits them.
    pub fn normalized(&self) -> Puzzle {
        Puzzle::new(
            self.name.as_ref().map(|n| n.trim().to_string()),
            self.max_mistakes,
            self.categories
                .iter()
                .map(|c| Category {
                    name: c.name.trim().to_string(),
                    items: c.items.iter().map(|i| normalize_item(i)).collect(),
                })
                .collect(),
        )
    }
}
