//! Creation-time validation.
//!
//! Decoding a link is deliberately permissive; these checks run when a puzzle
//! is authored, before it is encoded into a link or stored.

use crate::error::{CoreError, Result, ValidationIssue};
use crate::puzzle::Puzzle;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Characters the compact link record uses as delimiters and cannot escape.
pub const RESERVED_CHARS: [char; 3] = ['|', ',', '\n'];

/// Grid size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub min_categories: usize,
    pub max_categories: usize,
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            min_categories: 2,
            max_categories: 6,
            min_words: 2,
            max_words: 6,
        }
    }
}

/// Trim and upper-case an item, the form items are compared and stored in.
pub fn normalize_item(item: &str) -> String {
    item.trim().to_uppercase()
}

/// Check a puzzle draft, collecting every issue rather than stopping at the first.
pub fn validate(puzzle: &Puzzle, limits: &Limits) -> Result<()> {
    let issues = collect_issues(puzzle, limits);
    if issues.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = issues.len(), "puzzle draft rejected");
        Err(CoreError::Validation { issues })
    }
}

pub fn collect_issues(puzzle: &Puzzle, limits: &Limits) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    let count = puzzle.categories.len();
    if count < limits.min_categories || count > limits.max_categories {
        issues.push(ValidationIssue::CategoryCount {
            found: count,
            min: limits.min_categories,
            max: limits.max_categories,
        });
    }

    let width = puzzle.words_per_category();
    if count > 0 && (width < limits.min_words || width > limits.max_words) {
        issues.push(ValidationIssue::WordsPerCategory {
            found: width,
            min: limits.min_words,
            max: limits.max_words,
        });
    }

    if let Some(name) = &puzzle.name {
        check_reserved("Puzzle name", name, &mut issues);
    }

    let mut seen = HashSet::new();
    for (ci, category) in puzzle.categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            issues.push(ValidationIssue::MissingCategoryName { category: ci });
        } else {
            check_reserved(&format!("Category {} name", ci + 1), &category.name, &mut issues);
        }

        if category.items.len() != width {
            issues.push(ValidationIssue::UnevenCategory {
                category: ci,
                found: category.items.len(),
                expected: width,
            });
        }

        for (ii, item) in category.items.iter().enumerate() {
            let normalized = normalize_item(item);
            if normalized.is_empty() {
                issues.push(ValidationIssue::MissingItem { category: ci, item: ii });
                continue;
            }
            check_reserved(&format!("Category {} word {}", ci + 1, ii + 1), item, &mut issues);
            if !seen.insert(normalized.clone()) {
                issues.push(ValidationIssue::DuplicateItem { item: normalized });
            }
        }
    }

    issues
}

fn check_reserved(field: &str, value: &str, issues: &mut Vec<ValidationIssue>) {
    if let Some(ch) = value.chars().find(|c| RESERVED_CHARS.contains(c)) {
        issues.push(ValidationIssue::ForbiddenCharacter {
            field: field.to_string(),
            ch,
        });
    }
}
