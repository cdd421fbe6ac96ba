//! Symbol compressor: LZW dictionary coding packed into 6-bit URL symbols.
//!
//! Text is processed as UTF-16 code units, the unit a browser peer sees, so
//! the output matches other implementations byte for byte.
//!
//! Codes `0..3` are reserved:
//! * `0`: the next 8 bits are a new single-unit entry
//! * `1`: the next 16 bits are a new single-unit entry
//! * `2`: end of stream
//!
//! Codes are written LSB-first and packed MSB-first into symbols. The code
//! width starts at 2 bits and grows by one each time the enlarge-in counter
//! runs out; the counter is then reset to `2^width`.

use crate::alphabet::{self, BITS_PER_SYMBOL};
use crate::error::{CodecError, Result};
use std::collections::{HashMap, HashSet};

const LITERAL_8: u32 = 0;
const LITERAL_16: u32 = 1;
const END_OF_STREAM: u32 = 2;
const RESERVED_CODES: usize = 3;

/// Compress `input` into a string over the 64-symbol alphabet.
///
/// Empty input compresses to an empty string.
pub fn compress(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let mut encoder = Encoder::new();
    for unit in input.encode_utf16() {
        encoder.push(unit);
    }
    encoder.finish()
}

/// Inverse of [`compress`]. An empty input decompresses to an empty string.
pub fn decompress(input: &str) -> Result<String> {
    if input.is_empty() {
        return Ok(String::new());
    }
    let symbols = input
        .chars()
        .enumerate()
        .map(|(index, ch)| alphabet::index_of(ch).ok_or(CodecError::InvalidSymbol { ch, index }))
        .collect::<Result<Vec<u8>>>()?;
    let units = Decoder::new(SymbolReader::new(&symbols)).run()?;
    String::from_utf16(&units).map_err(|_| CodecError::InvalidUtf16)
}

/// Code-width schedule shared by both directions.
#[derive(Debug, Clone, Copy)]
struct Width {
    bits: u32,
    enlarge_in: u32,
}

impl Width {
    fn tick(&mut self) {
        self.enlarge_in -= 1;
        if self.enlarge_in == 0 {
            self.enlarge_in = 1 << self.bits;
            self.bits += 1;
        }
    }
}

// ========== Encoding ==========

/// Accumulates bits MSB-first and emits a symbol per six.
struct SymbolWriter {
    out: String,
    value: u8,
    position: u32,
}

impl SymbolWriter {
    fn new() -> Self {
        Self { out: String::new(), value: 0, position: 0 }
    }

    fn push_bit(&mut self, bit: u32) {
        self.value = (self.value << 1) | (bit & 1) as u8;
        if self.position == BITS_PER_SYMBOL - 1 {
            self.position = 0;
            self.out.push(alphabet::symbol(self.value));
            self.value = 0;
        } else {
            self.position += 1;
        }
    }

    /// Write the low `width` bits of `value`, least significant first.
    fn write(&mut self, mut value: u32, width: u32) {
        for _ in 0..width {
            self.push_bit(value & 1);
            value >>= 1;
        }
    }

    /// Zero-pad the pending group and emit it. An empty group still emits
    /// one all-zero symbol, as the reference encoder does.
    fn finish(mut self) -> String {
        loop {
            self.value <<= 1;
            if self.position == BITS_PER_SYMBOL - 1 {
                self.out.push(alphabet::symbol(self.value));
                break;
            }
            self.position += 1;
        }
        self.out
    }
}

struct Encoder {
    dictionary: HashMap<Vec<u16>, u32>,
    /// Single units that have a code but have not been written as a literal yet.
    pending_literals: HashSet<u16>,
    prefix: Vec<u16>,
    next_code: u32,
    width: Width,
    writer: SymbolWriter,
}

impl Encoder {
    fn new() -> Self {
        Self {
            dictionary: HashMap::new(),
            pending_literals: HashSet::new(),
            prefix: Vec::new(),
            next_code: RESERVED_CODES as u32,
            width: Width { bits: 2, enlarge_in: 2 },
            writer: SymbolWriter::new(),
        }
    }

    fn push(&mut self, unit: u16) {
        let single = vec![unit];
        if !self.dictionary.contains_key(&single) {
            self.dictionary.insert(single, self.next_code);
            self.next_code += 1;
            self.pending_literals.insert(unit);
        }

        let mut extended = self.prefix.clone();
        extended.push(unit);
        if self.dictionary.contains_key(&extended) {
            self.prefix = extended;
            return;
        }

        self.emit_prefix();
        self.dictionary.insert(extended, self.next_code);
        self.next_code += 1;
        self.prefix = vec![unit];
    }

    /// Write the current prefix as a literal (first sighting) or a dictionary reference.
    fn emit_prefix(&mut self) {
        let first = self.prefix[0];
        if self.prefix.len() == 1 && self.pending_literals.remove(&first) {
            if first < 256 {
                self.writer.write(LITERAL_8, self.width.bits);
                self.writer.write(u32::from(first), 8);
            } else {
                self.writer.write(LITERAL_16, self.width.bits);
                self.writer.write(u32::from(first), 16);
            }
            // The literal's own dictionary slot.
            self.width.tick();
        } else {
            let code = self.dictionary[&self.prefix];
            self.writer.write(code, self.width.bits);
        }
        self.width.tick();
    }

    fn finish(mut self) -> String {
        if !self.prefix.is_empty() {
            self.emit_prefix();
        }
        self.writer.write(END_OF_STREAM, self.width.bits);
        self.writer.finish()
    }
}

// ========== Decoding ==========

/// Reads bits MSB-first from 6-bit symbols. Past the end it yields zeros and
/// reports exhaustion.
struct SymbolReader<'a> {
    symbols: &'a [u8],
    value: u8,
    mask: u8,
    next_index: usize,
}

impl<'a> SymbolReader<'a> {
    const FIRST_MASK: u8 = 1 << (BITS_PER_SYMBOL - 1);

    fn new(symbols: &'a [u8]) -> Self {
        Self {
            symbols,
            value: symbols.first().copied().unwrap_or(0),
            mask: Self::FIRST_MASK,
            next_index: 1,
        }
    }

    /// Read `width` bits, least significant first.
    fn read(&mut self, width: u32) -> u32 {
        let mut bits = 0;
        for i in 0..width {
            let bit = self.value & self.mask;
            self.mask >>= 1;
            if self.mask == 0 {
                self.mask = Self::FIRST_MASK;
                self.value = self.symbols.get(self.next_index).copied().unwrap_or(0);
                self.next_index += 1;
            }
            if bit != 0 {
                bits |= 1 << i;
            }
        }
        bits
    }

    /// True once every real symbol has been consumed.
    fn exhausted(&self) -> bool {
        self.next_index > self.symbols.len()
    }
}

struct Decoder<'a> {
    reader: SymbolReader<'a>,
    /// Slots below `RESERVED_CODES` stay empty.
    dictionary: Vec<Vec<u16>>,
    width: Width,
}

impl<'a> Decoder<'a> {
    fn new(reader: SymbolReader<'a>) -> Self {
        Self {
            reader,
            dictionary: vec![Vec::new(); RESERVED_CODES],
            // The first literal has already moved the schedule past its opening steps.
            width: Width { bits: 3, enlarge_in: 4 },
        }
    }

    fn read_literal(&mut self, control: u32) -> u16 {
        let bits = if control == LITERAL_8 { 8 } else { 16 };
        self.reader.read(bits) as u16
    }

    fn run(mut self) -> Result<Vec<u16>> {
        let first = match self.reader.read(2) {
            control @ (LITERAL_8 | LITERAL_16) => self.read_literal(control),
            END_OF_STREAM => return Ok(Vec::new()),
            code => {
                return Err(CodecError::UnknownCode { code: code as usize, size: self.dictionary.len() })
            }
        };
        self.dictionary.push(vec![first]);
        let mut previous = vec![first];
        let mut output = previous.clone();

        loop {
            if self.reader.exhausted() {
                return Err(CodecError::Truncated);
            }

            let mut code = self.reader.read(self.width.bits) as usize;
            match code as u32 {
                control @ (LITERAL_8 | LITERAL_16) => {
                    let unit = self.read_literal(control);
                    self.dictionary.push(vec![unit]);
                    code = self.dictionary.len() - 1;
                    self.width.tick();
                }
                END_OF_STREAM => return Ok(output),
                _ => {}
            }

            let entry = if code >= RESERVED_CODES && code < self.dictionary.len() {
                self.dictionary[code].clone()
            } else if code == self.dictionary.len() {
                // Self-reference: the code names the entry being defined right now.
                let mut entry = previous.clone();
                entry.push(previous[0]);
                entry
            } else {
                return Err(CodecError::UnknownCode { code, size: self.dictionary.len() });
            };
            output.extend_from_slice(&entry);

            let mut added = previous;
            added.push(entry[0]);
            self.dictionary.push(added);
            self.width.tick();

            previous = entry;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_packs_msb_first() {
        let mut w = SymbolWriter::new();
        // 0b000001 → 'B'
        w.write(0, 5);
        w.write(1, 1);
        assert_eq!(w.out, "B");
    }

    #[test]
    fn test_writer_flush_empty_group() {
        let w = SymbolWriter::new();
        assert_eq!(w.finish(), "A");
    }

    #[test]
    fn test_reader_lsb_first_codes() {
        // 'Q' = 0b010000: first two bits read are 0 then 1 → value 2.
        let symbols = [alphabet::index_of('Q').unwrap()];
        let mut r = SymbolReader::new(&symbols);
        assert_eq!(r.read(2), 2);
        assert!(!r.exhausted());
        r.read(4);
        assert!(r.exhausted());
    }

    #[test]
    fn test_width_schedule() {
        let mut w = Width { bits: 2, enlarge_in: 2 };
        w.tick();
        assert_eq!((w.bits, w.enlarge_in), (2, 1));
        w.tick();
        assert_eq!((w.bits, w.enlarge_in), (3, 4));
    }
}
