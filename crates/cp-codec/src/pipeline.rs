//! Format dispatch: orchestrates the layers in both directions.

use crate::error::Result;
use crate::{compact, legacy, lzw};
use cp_core::{Palette, Puzzle};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

/// Link payload generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PuzzleFormat {
    /// Base64 of the puzzle JSON. Read-only.
    Legacy,
    /// Compact record, LZW-compressed into the URL alphabet.
    Compact,
}

/// A decoded puzzle and the format it arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPuzzle {
    pub puzzle: Puzzle,
    pub format: PuzzleFormat,
}

/// Where a loaded puzzle came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PuzzleSource {
    Link { format: PuzzleFormat },
    /// Loaded from the puzzle store by id.
    Stored { id: Uuid },
    /// No link parameter was given.
    Default,
    /// The link could not be used; `reason` says why.
    Fallback { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedPuzzle {
    pub puzzle: Puzzle,
    pub source: PuzzleSource,
}

/// Which generation produced `value`.
pub fn detect(value: &str) -> PuzzleFormat {
    if legacy::sniff(value).is_some() {
        PuzzleFormat::Legacy
    } else {
        PuzzleFormat::Compact
    }
}

/// Puzzle ↔ link payload codec.
#[derive(Debug, Clone, Default)]
pub struct PuzzleCodec {
    pub palette: Palette,
}

impl PuzzleCodec {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Encode with the current generation: compact record, then compress.
    pub fn encode(&self, puzzle: &Puzzle) -> String {
        let record = compact::encode(puzzle);
        let payload = lzw::compress(&record);
        debug!(record_len = record.len(), payload_len = payload.len(), "puzzle encoded");
        payload
    }

    /// Decode a payload of either generation.
    pub fn decode(&self, value: &str) -> Result<DecodedPuzzle> {
        if let Some(json) = legacy::sniff(value) {
            debug!("legacy payload detected");
            return Ok(DecodedPuzzle {
                puzzle: legacy::from_json(json)?,
                format: PuzzleFormat::Legacy,
            });
        }
        let record = lzw::decompress(value)?;
        Ok(DecodedPuzzle {
            puzzle: compact::decode(&record, &self.palette)?,
            format: PuzzleFormat::Compact,
        })
    }

    /// Decode `value`, substituting `fallback` for anything unusable.
    ///
    /// Never returns a partially decoded puzzle: decode errors and decoded
    /// puzzles that cannot be played both yield the fallback.
    pub fn resolve(&self, value: Option<&str>, fallback: &Puzzle) -> LoadedPuzzle {
        let Some(value) = value else {
            return LoadedPuzzle { puzzle: fallback.clone(), source: PuzzleSource::Default };
        };
        let reason = match self.decode(value) {
            Ok(decoded) if decoded.puzzle.is_playable(&self.palette) => {
                return LoadedPuzzle {
                    puzzle: decoded.puzzle,
                    source: PuzzleSource::Link { format: decoded.format },
                };
            }
            Ok(decoded) => format!(
                "puzzle is incomplete ({} categories, {} items)",
                decoded.puzzle.categories.len(),
                decoded.puzzle.item_count()
            ),
            Err(err) => err.to_string(),
        };
        warn!(%reason, "failed to load puzzle from link, using fallback");
        LoadedPuzzle { puzzle: fallback.clone(), source: PuzzleSource::Fallback { reason } }
    }
}
