//! The 64-symbol URL-safe alphabet shared by every link encoder.
//!
//! Indices must stay byte-for-byte identical across implementations, or links
//! made by one cannot be read by another.

use std::sync::LazyLock;

pub const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Bits carried by one output symbol.
pub const BITS_PER_SYMBOL: u32 = 6;

static REVERSE: LazyLock<[Option<u8>; 128]> = LazyLock::new(|| {
    let mut table = [None; 128];
    for (i, &b) in ALPHABET.iter().enumerate() {
        table[b as usize] = Some(i as u8);
    }
    table
});

/// Symbol for a 6-bit value. Only the low six bits are used.
pub fn symbol(value: u8) -> char {
    ALPHABET[(value & 0x3f) as usize] as char
}

/// 6-bit value of a symbol, or `None` if it is not in the alphabet.
pub fn index_of(ch: char) -> Option<u8> {
    if ch.is_ascii() {
        REVERSE[ch as usize]
    } else {
        None
    }
}

pub fn contains(ch: char) -> bool {
    index_of(ch).is_some()
}
