use thiserror::Error;

/// A single problem found while validating a puzzle draft.
///
/// Category and item positions are zero-based; messages print them one-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    #[error("Puzzle needs between {min} and {max} categories ({found} given).")]
    CategoryCount { found: usize, min: usize, max: usize },
    #[error("Categories need between {min} and {max} words ({found} given).")]
    WordsPerCategory { found: usize, min: usize, max: usize },
    #[error("Category {} needs {expected} words ({found} filled).", .category + 1)]
    UnevenCategory { category: usize, found: usize, expected: usize },
    #[error("Category {} needs a name.", .category + 1)]
    MissingCategoryName { category: usize },
    #[error("Category {} is missing word {}.", .category + 1, .item + 1)]
    MissingItem { category: usize, item: usize },
    #[error("Duplicate item: \"{item}\".")]
    DuplicateItem { item: String },
    #[error("{field} may not contain {ch:?}.")]
    ForbiddenCharacter { field: String, ch: char },
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid puzzle: {}", join_issues(.issues))]
    Validation { issues: Vec<ValidationIssue> },
    #[error("Puzzle not found: {id}")]
    PuzzleNotFound { id: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub type Result<T> = std::result::Result<T, CoreError>;
