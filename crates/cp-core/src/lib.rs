//! Connections Plus core: puzzle model, palette, validation, and library.

pub mod config;
pub mod error;
pub mod library;
pub mod palette;
pub mod puzzle;
pub mod validate;

pub use config::AppConfig;
pub use error::{CoreError, Result, ValidationIssue};
pub use library::{fallback_puzzle, library, LibraryEntry};
pub use palette::{CategoryColor, Palette};
pub use puzzle::{Category, MistakeBudget, Puzzle};
pub use validate::{normalize_item, validate, Limits};

#[cfg(test)]
mod tests;
