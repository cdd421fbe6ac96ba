//! Compact schema: `name|mistakes|cat0,item,...|cat1,item,...`.
//!
//! No escaping: a `|` or `,` inside a name or item shifts every later field.
//! Authoring rejects those characters (see `cp_core::validate`); decoding
//! reproduces whatever the record says.

use crate::error::{CodecError, Result};
use cp_core::{Category, MistakeBudget, Palette, Puzzle};

pub const FIELD_SEP: char = '|';
pub const ITEM_SEP: char = ',';

/// Render a puzzle as a compact record. Values are written verbatim.
pub fn encode(puzzle: &Puzzle) -> String {
    let mut fields = Vec::with_capacity(puzzle.categories.len() + 2);
    fields.push(puzzle.name.clone().unwrap_or_default());
    fields.push(puzzle.max_mistakes.as_i64().to_string());
    for category in &puzzle.categories {
        let mut parts = Vec::with_capacity(category.items.len() + 1);
        parts.push(category.name.as_str());
        parts.extend(category.items.iter().map(String::as_str));
        fields.push(parts.join(&ITEM_SEP.to_string()));
    }
    fields.join(&FIELD_SEP.to_string())
}

/// Parse a compact record.
///
/// Reads at most `palette.len()` category fields; missing ones are not an
/// error, so callers must check completeness themselves.
pub fn decode(record: &str, palette: &Palette) -> Result<Puzzle> {
    let mut fields = record.split(FIELD_SEP);
    let name = fields.next().unwrap_or_default();

    let mistakes = fields
        .next()
        .ok_or_else(|| CodecError::MalformedRecord("missing mistake count".into()))?;
    let max_mistakes = mistakes
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(MistakeBudget::from_i64)
        .ok_or_else(|| CodecError::MalformedRecord(format!("bad mistake count {mistakes:?}")))?;

    let categories = fields
        .take(palette.len())
        .map(|field| {
            let mut tokens = field.split(ITEM_SEP);
            let name = tokens.next().unwrap_or_default();
            Category::new(name, tokens)
        })
        .collect();

    Ok(Puzzle::new(Some(name.to_string()), max_mistakes, categories))
}
