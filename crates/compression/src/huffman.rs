//! Canonical Huffman codes, as described in [RFC 1951 §3.2.2](https://www.rfc-editor.org/rfc/rfc1951#section-3.2.2)
//!
//! For the purposes of this module, "Symbol" shall refer to an unencoded
//! codepoint and "Code" shall refer to an encoded codepoint.

use std::fmt;

use error_derive::Error;

use crate::bit_reader::{self, BitReader};

/// Codes in a DEFLATE stream are never longer than this
pub const MAX_CODE_LENGTH: u8 = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[msg = "code length exceeds 15 bits"]
    CodeTooLong,

    #[msg = "code lengths do not describe a prefix code"]
    OversubscribedCodeLengths,
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    bits: u16,
    length: u8,
}

impl Code {
    #[must_use]
    pub const fn new(bits: u16, length: u8) -> Self {
        Self { bits, length }
    }

    #[must_use]
    pub const fn bits(&self) -> u16 {
        self.bits
    }

    #[must_use]
    pub const fn len(&self) -> u8 {
        self.length
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0>width$b}", self.bits, width = self.length as usize)
    }
}

/// Assign a code to every symbol, given only the length of each code.
///
/// Symbols with a code length of zero do not take part in the alphabet,
/// their code is empty. Incomplete codes are allowed, lengths that describe
/// more codes than fit into their bit width are not.
pub fn canonical_codes(lengths: &[u8]) -> Result<Vec<Code>, Error> {
    let mut length_count = [0_u32; MAX_CODE_LENGTH as usize + 1];
    for &length in lengths {
        if MAX_CODE_LENGTH < length {
            return Err(Error::CodeTooLong);
        }
        length_count[length as usize] += 1;
    }
    length_count[0] = 0;

    let mut next_code = [0_u32; MAX_CODE_LENGTH as usize + 1];
    let mut code = 0_u32;
    for bits in 1..=MAX_CODE_LENGTH as usize {
        code = (code + length_count[bits - 1]) << 1;
        next_code[bits] = code;

        if (1 << bits) < code + length_count[bits] {
            log::warn!(
                "{} codes of length {bits} do not fit after the first {code}",
                length_count[bits]
            );
            return Err(Error::OversubscribedCodeLengths);
        }
    }

    let codes = lengths
        .iter()
        .map(|&length| {
            if length == 0 {
                return Code::default();
            }

            // Less than 2^15, checked above
            let code = Code::new(next_code[length as usize] as u16, length);
            next_code[length as usize] += 1;
            code
        })
        .collect();
    Ok(codes)
}

/// Decodes symbols bit by bit.
///
/// The nodes are stored like a binary heap: the code `c` with length `l`
/// lives at index `2^l - 1 + c`.
#[derive(Debug)]
pub struct HuffmanTree {
    /// A value of `Some(_)` means that the node is a leaf node and there is a symbol
    /// associated with the Code.
    nodes: Vec<Option<u16>>,
    max_length: u8,
}

impl HuffmanTree {
    /// Build a tree for the alphabet `0..lengths.len()`
    pub fn new_infer_codes_without_symbols(lengths: &[u8]) -> Result<Self, Error> {
        let codes = canonical_codes(lengths)?;
        let max_length = lengths.iter().copied().max().unwrap_or_default();

        let mut tree = Self {
            nodes: vec![None; (1 << (max_length as usize + 1)) - 1],
            max_length,
        };

        for (symbol, code) in codes.into_iter().enumerate() {
            if !code.is_empty() {
                tree.insert(code, symbol as u16);
            }
        }

        Ok(tree)
    }

    fn insert(&mut self, at: Code, symbol: u16) {
        let insert_index = (1 << at.len()) - 1 + at.bits() as usize;
        self.nodes[insert_index] = Some(symbol);
    }

    /// Lookup the symbol for a specific code
    #[must_use]
    pub fn lookup_symbol(&self, at: Code) -> Option<u16> {
        let index = (1 << at.len()) - 1 + at.bits() as usize;
        self.nodes.get(index).copied().flatten()
    }

    /// Read bits until they form a known code.
    ///
    /// Returns `Ok(None)` if no code of the maximum length matched.
    pub fn lookup_incrementally(
        &self,
        reader: &mut BitReader<'_>,
    ) -> Result<Option<u16>, bit_reader::Error> {
        let mut bits = 0_u16;

        for length in 1..=self.max_length {
            bits = bits << 1 | u16::from(reader.read_single_bit()?);

            if let Some(symbol) = self.lookup_symbol(Code::new(bits, length)) {
                return Ok(Some(symbol));
            }
        }

        Ok(None)
    }
}
