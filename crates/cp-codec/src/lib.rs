//! Puzzle link codec.
//!
//! Two layers, applied in order when encoding and reversed when decoding:
//! 1. Compact schema: puzzle ↔ `name|mistakes|cat,item,...` record
//! 2. Symbol compressor: LZW over a 64-symbol URL-safe alphabet
//!
//! Links from the older generation (base64 JSON) are still decoded; see
//! [`legacy`] and the format dispatch in [`pipeline`].

pub mod alphabet;
pub mod compact;
pub mod error;
pub mod legacy;
pub mod link;
pub mod lzw;
pub mod pipeline;

pub use error::{CodecError, Result};
pub use link::{decode_puzzle_from_link, encode_puzzle_to_link, payload_link, stored_puzzle_link, LinkTarget};
pub use pipeline::{DecodedPuzzle, LoadedPuzzle, PuzzleCodec, PuzzleFormat, PuzzleSource};
