//! First-generation links: base64 of the puzzle's JSON, no compression.
//!
//! Two writers existed: one encoded the JSON directly, the other ran it
//! through `encodeURIComponent` first. Both are read; neither is written.

use crate::error::{CodecError, Result};
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use cp_core::Puzzle;
use percent_encoding::percent_decode_str;
use serde_json::Value;

const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Undo the URL-safe substitution and base64, returning the JSON text.
pub fn decode_text(value: &str) -> Result<String> {
    let standard: String = value
        .trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let bytes = LENIENT
        .decode(standard.as_bytes())
        .map_err(|e| CodecError::MalformedLegacy(e.to_string()))?;
    let text = String::from_utf8(bytes).map_err(|e| CodecError::MalformedLegacy(e.to_string()))?;
    if !text.starts_with('%') {
        return Ok(text);
    }
    percent_decode_str(&text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| CodecError::MalformedLegacy(e.to_string()))
}

/// The JSON object behind `value`, if it is a legacy puzzle (has `categories`).
pub fn sniff(value: &str) -> Option<Value> {
    let text = decode_text(value).ok()?;
    let json: Value = serde_json::from_str(&text).ok()?;
    json.get("categories").is_some().then_some(json)
}

pub fn from_json(json: Value) -> Result<Puzzle> {
    Ok(serde_json::from_value(json)?)
}
