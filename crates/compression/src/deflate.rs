//! [DEFLATE](https://www.rfc-editor.org/rfc/rfc1951) compression and decompression

use std::{cmp::Ordering, str::FromStr};

use error_derive::Error;

use crate::{
    bit_reader::{self, BitReader},
    bit_writer::BitWriter,
    huffman::{self, Code, HuffmanTree},
};

#[derive(Clone, Copy, Debug, Error)]
pub enum Error {
    #[msg = "reserved block type"]
    ReservedCompressionScheme,

    #[msg = "unknown huffman code"]
    SymbolNotFound,

    #[msg = "repeat code without a preceding code length"]
    RLELeadingRepeatValue,

    #[msg = "code length repetition exceeds the alphabet"]
    RLEExceedsExpectedLength,

    #[msg = "stored block length does not match its complement"]
    InvalidUncompressedBlockLength,

    #[msg = "invalid length code"]
    InvalidLengthCode,

    #[msg = "invalid distance code"]
    InvalidDistanceCode,

    #[msg = "back reference points before the start of the output"]
    DistanceTooFarBack,

    #[msg = "failed to read compressed bits"]
    BitReader(bit_reader::Error),

    #[msg = "invalid huffman code lengths"]
    Huffman(huffman::Error),
}

/// How hard the compressor tries to find repeated byte sequences
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompressionLevel {
    /// Emit the data verbatim, in stored blocks
    Store,
    Fast,
    #[default]
    Best,
}

impl CompressionLevel {
    /// How many earlier occurences of a sequence are checked for a match
    #[must_use]
    const fn max_chain_length(&self) -> usize {
        match self {
            Self::Store => 0,
            Self::Fast => 16,
            Self::Best => 256,
        }
    }
}

impl FromStr for CompressionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "store" => Ok(Self::Store),
            "fast" => Ok(Self::Fast),
            "best" => Ok(Self::Best),
            other => Err(format!(
                "unknown compression level {other:?}, expected one of store, fast, best"
            )),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum CompressionScheme {
    Uncompressed,
    FixedHuffmanCodes,
    DynamicHuffmanCodes,
    Reserved,
}

const END_OF_BLOCK: u16 = 256;

const MIN_MATCH_LENGTH: usize = 3;
const MAX_MATCH_LENGTH: usize = 258;
const WINDOW_SIZE: usize = 1 << 15;
const MAX_STORED_BLOCK_LEN: usize = u16::MAX as usize;

const HASH_BITS: u32 = 15;
const NO_POSITION: usize = usize::MAX;

/// Smallest run length for each of the length codes `257..=285`
const LENGTH_BASE: [u16; 29] = [
    3, 4, 5, 6, 7, 8, 9, 10, 11, 13, 15, 17, 19, 23, 27, 31, 35, 43, 51, 59, 67, 83, 99, 115, 131,
    163, 195, 227, 258,
];

const LENGTH_EXTRA_BITS: [u8; 29] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5, 0,
];

/// Smallest distance for each of the distance codes `0..=29`
const DISTANCE_BASE: [u16; 30] = [
    1, 2, 3, 4, 5, 7, 9, 13, 17, 25, 33, 49, 65, 97, 129, 193, 257, 385, 513, 769, 1025, 1537,
    2049, 3073, 4097, 6145, 8193, 12289, 16385, 24577,
];

const DISTANCE_EXTRA_BITS: [u8; 30] = [
    0, 0, 0, 0, 1, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 13,
    13,
];

const FIXED_DISTANCE_CODE_LENGTH: u8 = 5;

/// Code lengths of the fixed literal/length alphabet (RFC 1951 §3.2.6)
fn fixed_literal_lengths() -> [u8; 288] {
    let mut lengths = [0; 288];
    lengths[..144].fill(8);
    lengths[144..256].fill(9);
    lengths[256..280].fill(7);
    lengths[280..].fill(8);
    lengths
}

/// The code of `symbol` in the fixed literal/length alphabet (RFC 1951 §3.2.6)
fn fixed_literal_code(symbol: u16) -> Code {
    match symbol {
        0..=143 => Code::new(0b0011_0000 + symbol, 8),
        144..=255 => Code::new(0b1_1001_0000 + symbol - 144, 9),
        256..=279 => Code::new(symbol - 256, 7),
        _ => Code::new(0b1100_0000 + symbol - 280, 8),
    }
}

/// Element of the LZ77 tokenization of the input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Literal(u8),
    BackReference { length: u16, distance: u16 },
}

pub fn compress(data: &[u8], level: CompressionLevel) -> Vec<u8> {
    let mut writer = BitWriter::with_capacity(data.len() / 4 + 16);

    match level {
        CompressionLevel::Store => write_stored_blocks(&mut writer, data),
        CompressionLevel::Fast | CompressionLevel::Best => {
            let tokens = tokenize(data, level.max_chain_length());
            write_fixed_block(&mut writer, &tokens);
        },
    }

    let compressed = writer.finish();
    log::debug!(
        "Deflated {} bytes into {} bytes ({level:?})",
        data.len(),
        compressed.len()
    );
    compressed
}

fn write_stored_blocks(writer: &mut BitWriter, data: &[u8]) {
    if data.is_empty() {
        write_stored_block(writer, &[], true);
        return;
    }

    let mut blocks = data.chunks(MAX_STORED_BLOCK_LEN).peekable();
    while let Some(block) = blocks.next() {
        let is_final = blocks.peek().is_none();
        write_stored_block(writer, block, is_final);
    }
}

fn write_stored_block(writer: &mut BitWriter, block: &[u8], is_final: bool) {
    debug_assert!(block.len() <= MAX_STORED_BLOCK_LEN);

    let len = block.len() as u16;
    writer.write_bits(is_final as u32, 1);
    writer.write_bits(CompressionScheme::Uncompressed as u32, 2);
    writer.write_bytes(&len.to_le_bytes());
    writer.write_bytes(&(!len).to_le_bytes());
    writer.write_bytes(block);
}

fn write_fixed_block(writer: &mut BitWriter, tokens: &[Token]) {
    writer.write_bits(1, 1);
    writer.write_bits(CompressionScheme::FixedHuffmanCodes as u32, 2);

    for token in tokens {
        match *token {
            Token::Literal(byte) => {
                let code = fixed_literal_code(u16::from(byte));
                writer.write_huffman_code(code.bits(), code.len());
            },
            Token::BackReference { length, distance } => {
                let length_index = LENGTH_BASE.partition_point(|&base| base <= length) - 1;
                let code = fixed_literal_code(257 + length_index as u16);
                writer.write_huffman_code(code.bits(), code.len());
                writer.write_bits(
                    (length - LENGTH_BASE[length_index]) as u32,
                    LENGTH_EXTRA_BITS[length_index],
                );

                let distance_index = DISTANCE_BASE.partition_point(|&base| base <= distance) - 1;
                writer.write_huffman_code(distance_index as u16, FIXED_DISTANCE_CODE_LENGTH);
                writer.write_bits(
                    (distance - DISTANCE_BASE[distance_index]) as u32,
                    DISTANCE_EXTRA_BITS[distance_index],
                );
            },
        }
    }

    let end_of_block = fixed_literal_code(END_OF_BLOCK);
    writer.write_huffman_code(end_of_block.bits(), end_of_block.len());
}

/// Remembers where each three-byte sequence occured within the sliding window
struct MatchFinder {
    /// Most recent position for every hash value
    head: Vec<usize>,

    /// Previous position with the same hash, indexed by position modulo the window size
    previous: Vec<usize>,
}

impl MatchFinder {
    fn new() -> Self {
        Self {
            head: vec![NO_POSITION; 1 << HASH_BITS],
            previous: vec![NO_POSITION; WINDOW_SIZE],
        }
    }

    fn hash_at(data: &[u8], position: usize) -> usize {
        let value = (data[position] as u32) << 16
            | (data[position + 1] as u32) << 8
            | data[position + 2] as u32;
        (value.wrapping_mul(0x9E3779B1) >> (32 - HASH_BITS)) as usize
    }

    fn insert(&mut self, data: &[u8], position: usize) {
        if position + MIN_MATCH_LENGTH > data.len() {
            return;
        }

        let hash = Self::hash_at(data, position);
        self.previous[position % WINDOW_SIZE] = self.head[hash];
        self.head[hash] = position;
    }

    /// Returns `(length, distance)` of the longest match found for the data at `position`
    fn longest_match(
        &self,
        data: &[u8],
        position: usize,
        max_chain_length: usize,
    ) -> Option<(usize, usize)> {
        let max_length = (data.len() - position).min(MAX_MATCH_LENGTH);
        if max_length < MIN_MATCH_LENGTH {
            return None;
        }

        let needle = &data[position..position + max_length];
        let mut candidate = self.head[Self::hash_at(data, position)];
        let mut best: Option<(usize, usize)> = None;

        for _ in 0..max_chain_length {
            if candidate == NO_POSITION || position - candidate > WINDOW_SIZE {
                break;
            }

            let length = data[candidate..]
                .iter()
                .zip(needle)
                .take_while(|(a, b)| a == b)
                .count();

            if length >= MIN_MATCH_LENGTH && best.map_or(true, |(best_length, _)| best_length < length)
            {
                best = Some((length, position - candidate));

                if length == max_length {
                    break;
                }
            }

            // Slots are reused once the window moves on, which shows up as a newer position
            let next = self.previous[candidate % WINDOW_SIZE];
            if next == NO_POSITION || candidate <= next {
                break;
            }
            candidate = next;
        }

        best
    }
}

fn tokenize(data: &[u8], max_chain_length: usize) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(data.len() / 2);
    let mut match_finder = MatchFinder::new();

    let mut position = 0;
    while position < data.len() {
        match match_finder.longest_match(data, position, max_chain_length) {
            Some((length, distance)) => {
                tokens.push(Token::BackReference {
                    length: length as u16,
                    distance: distance as u16,
                });

                for covered in position..position + length {
                    match_finder.insert(data, covered);
                }
                position += length;
            },
            None => {
                tokens.push(Token::Literal(data[position]));
                match_finder.insert(data, position);
                position += 1;
            },
        }
    }

    tokens
}

/// Returns a tuple of `(decompressed_bytes, num_consumed_compressed_bytes)` on success
pub fn decompress(source: &[u8]) -> Result<(Vec<u8>, usize), Error> {
    let mut reader = BitReader::new(source);
    let mut output_stream = vec![];

    let default_lit_tree = HuffmanTree::new_infer_codes_without_symbols(&fixed_literal_lengths())?;
    let default_dist_tree =
        HuffmanTree::new_infer_codes_without_symbols(&[FIXED_DISTANCE_CODE_LENGTH; 32])?;

    loop {
        let is_final = reader.read_single_bit()?;
        let btype = CompressionScheme::from(reader.read_bits::<u8>(2)?);
        match btype {
            CompressionScheme::Uncompressed => {
                reader.align_to_byte_boundary();
                let len = reader.read_bits::<u16>(16)?;
                let nlen = reader.read_bits::<u16>(16)?;

                if len ^ 0xFFFF != nlen {
                    return Err(Error::InvalidUncompressedBlockLength);
                }

                output_stream.reserve(len as usize);

                for _ in 0..len {
                    output_stream.push(reader.read_bits::<u8>(8)?);
                }
            },
            CompressionScheme::DynamicHuffmanCodes => {
                // Read the huffman codes from the start of the block
                let hlit = reader.read_bits::<usize>(5)? + 257;
                let hdist = reader.read_bits::<usize>(5)? + 1;
                let hclen = reader.read_bits::<usize>(4)? + 4;

                let (literal_tree, distance_tree) =
                    read_literal_and_distance_tree(hlit, hdist, hclen, &mut reader)?;
                decompress_block(
                    &literal_tree,
                    &distance_tree,
                    &mut reader,
                    &mut output_stream,
                )?;
            },
            CompressionScheme::FixedHuffmanCodes => {
                decompress_block(
                    &default_lit_tree,
                    &default_dist_tree,
                    &mut reader,
                    &mut output_stream,
                )?;
            },
            CompressionScheme::Reserved => {
                log::warn!("Reserved DEFLATE block type");
                return Err(Error::ReservedCompressionScheme);
            },
        }

        if is_final {
            break;
        }
    }
    Ok((output_stream, reader.num_consumed_bytes()))
}

fn decompress_block(
    literal_tree: &HuffmanTree,
    distance_tree: &HuffmanTree,
    reader: &mut BitReader<'_>,
    output_stream: &mut Vec<u8>,
) -> Result<(), Error> {
    loop {
        let symbol = literal_tree
            .lookup_incrementally(reader)?
            .ok_or(Error::SymbolNotFound)?;

        match symbol.cmp(&END_OF_BLOCK) {
            Ordering::Less => output_stream.push(symbol as u8),
            Ordering::Equal => break,
            Ordering::Greater => {
                let run_length = decode_run_length(symbol, reader)?;
                let distance_code = distance_tree
                    .lookup_incrementally(reader)?
                    .ok_or(Error::SymbolNotFound)?;
                let distance = decode_distance(distance_code, reader)?;

                if output_stream.len() < distance {
                    log::warn!(
                        "Back reference of distance {distance} with only {} bytes of output",
                        output_stream.len()
                    );
                    return Err(Error::DistanceTooFarBack);
                }

                // The referenced range may overlap with the bytes being produced
                let copy_base = output_stream.len() - distance;
                for index in copy_base..copy_base + run_length {
                    output_stream.push(output_stream[index]);
                }
            },
        }
    }
    Ok(())
}

const CODE_LENGTH_ALPHABET: [usize; 19] = [
    16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15,
];

fn read_literal_and_distance_tree(
    hlit: usize,
    hdist: usize,
    hclen: usize,
    reader: &mut BitReader<'_>,
) -> Result<(HuffmanTree, HuffmanTree), Error> {
    let mut code_lengths = [0; 19];

    for index in &CODE_LENGTH_ALPHABET[..hclen] {
        code_lengths[*index] = reader.read_bits::<u8>(3)?;
    }

    let code_tree = HuffmanTree::new_infer_codes_without_symbols(&code_lengths)?;

    let total_number_of_codes = hlit + hdist;
    let mut codes: Vec<u8> = Vec::with_capacity(total_number_of_codes);
    while codes.len() < total_number_of_codes {
        let symbol = code_tree
            .lookup_incrementally(reader)?
            .ok_or(Error::SymbolNotFound)?;

        let (value, repeat_for) = match symbol {
            0..=15 => (symbol as u8, 1),
            16 => {
                let to_repeat = *codes.last().ok_or(Error::RLELeadingRepeatValue)?;
                (to_repeat, reader.read_bits::<usize>(2)? + 3)
            },
            17 => (0, reader.read_bits::<usize>(3)? + 3),
            18 => (0, reader.read_bits::<usize>(7)? + 11),
            _ => return Err(Error::SymbolNotFound),
        };

        if total_number_of_codes < codes.len() + repeat_for {
            return Err(Error::RLEExceedsExpectedLength);
        }

        codes.resize(codes.len() + repeat_for, value);
    }

    let literal_codes = &codes[..hlit];
    let distance_codes = &codes[hlit..];

    let literal_tree = HuffmanTree::new_infer_codes_without_symbols(literal_codes)?;
    let dist_tree = HuffmanTree::new_infer_codes_without_symbols(distance_codes)?;
    Ok((literal_tree, dist_tree))
}

fn decode_distance(code: u16, reader: &mut BitReader<'_>) -> Result<usize, Error> {
    let index = code as usize;
    if DISTANCE_BASE.len() <= index {
        return Err(Error::InvalidDistanceCode);
    }

    let extra_bits = reader.read_bits::<usize>(DISTANCE_EXTRA_BITS[index])?;
    Ok(DISTANCE_BASE[index] as usize + extra_bits)
}

fn decode_run_length(code: u16, reader: &mut BitReader<'_>) -> Result<usize, Error> {
    let index = (code - 257) as usize;
    if LENGTH_BASE.len() <= index {
        return Err(Error::InvalidLengthCode);
    }

    let extra_bits = reader.read_bits::<usize>(LENGTH_EXTRA_BITS[index])?;
    Ok(LENGTH_BASE[index] as usize + extra_bits)
}

impl From<u8> for CompressionScheme {
    fn from(value: u8) -> Self {
        match value & 0b11 {
            0 => Self::Uncompressed,
            1 => Self::FixedHuffmanCodes,
            2 => Self::DynamicHuffmanCodes,
            _ => Self::Reserved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text() -> Vec<u8> {
        b"Lorem ipsum dolor sit amet, consetetur sadipscing elitr, sed diam nonumy eirmod tempor \
          invidunt ut labore et dolore magna aliquyam erat, sed diam voluptua. Lorem ipsum dolor \
          sit amet, consetetur sadipscing elitr, sed diam nonumy eirmod tempor invidunt ut labore"
            .to_vec()
    }

    #[test]
    fn test_basic() -> Result<(), Error> {
        let bytes = [0x4b, 0x4c, 0x4a, 0x06, 0x00];
        let (decompressed, num_consumed_bytes) = decompress(&bytes)?;

        assert_eq!(&decompressed, b"abc");
        assert_eq!(num_consumed_bytes, bytes.len());
        Ok(())
    }

    #[test]
    fn test_dynamic_block() -> Result<(), Error> {
        // Skewed symbol frequencies make zlib pick a dynamic huffman block
        let bytes = [
            0x1d, 0x89, 0x81, 0x09, 0x00, 0x00, 0x08, 0x83, 0x6e, 0xd5, 0xf5, 0xff, 0x0d, 0xad,
            0x40, 0x26, 0x43, 0x14, 0x46, 0x2a, 0x99, 0xd0, 0x2d, 0xe6, 0xf4, 0x2f, 0x17, 0x71,
            0x01,
        ];
        let (decompressed, num_consumed_bytes) = decompress(&bytes)?;

        assert_eq!(&decompressed, b"abbaadbabbabadcaabaababcbaabcaabacdbabab");
        assert_eq!(num_consumed_bytes, bytes.len());
        Ok(())
    }

    #[test]
    fn test_store_roundtrip() -> Result<(), Error> {
        let data = sample_text();
        let compressed = compress(&data, CompressionLevel::Store);
        let (decompressed, consumed) = decompress(&compressed)?;

        assert_eq!(decompressed, data);
        assert_eq!(consumed, compressed.len());
        Ok(())
    }

    #[test]
    fn test_store_splits_large_input() -> Result<(), Error> {
        let data: Vec<u8> = (0..150_000_u32).map(|i| (i % 251) as u8).collect();
        let compressed = compress(&data, CompressionLevel::Store);

        // Three blocks, five bytes of framing each
        assert_eq!(compressed.len(), data.len() + 3 * 5);
        assert_eq!(decompress(&compressed)?.0, data);
        Ok(())
    }

    #[test]
    fn test_empty_input() -> Result<(), Error> {
        for level in [
            CompressionLevel::Store,
            CompressionLevel::Fast,
            CompressionLevel::Best,
        ] {
            let compressed = compress(&[], level);
            assert!(decompress(&compressed)?.0.is_empty());
        }
        Ok(())
    }

    #[test]
    fn test_fixed_huffman_roundtrip() -> Result<(), Error> {
        let data = sample_text();
        for level in [CompressionLevel::Fast, CompressionLevel::Best] {
            let compressed = compress(&data, level);
            assert!(compressed.len() < data.len());
            assert_eq!(decompress(&compressed)?.0, data);
        }
        Ok(())
    }

    #[test]
    fn test_long_runs() -> Result<(), Error> {
        // Transparent rows compress into maximum length back references
        let mut data = vec![0_u8; 100_000];
        data.extend((0..=255).cycle().take(70_000));
        data.extend(vec![0xAB; 1000]);

        let compressed = compress(&data, CompressionLevel::Best);
        assert!(compressed.len() < data.len() / 10);
        assert_eq!(decompress(&compressed)?.0, data);
        Ok(())
    }

    /// Start of a dynamic block with `hlit = 257`, `hdist = 1` and the given
    /// code lengths for the code length alphabet (in transmission order)
    fn dynamic_block_header(code_length_lengths: &[u32]) -> BitWriter {
        let mut writer = BitWriter::new();
        writer.write_bits(1, 1);
        writer.write_bits(CompressionScheme::DynamicHuffmanCodes as u32, 2);
        writer.write_bits(0, 5);
        writer.write_bits(0, 5);
        writer.write_bits(code_length_lengths.len() as u32 - 4, 4);
        for &length in code_length_lengths {
            writer.write_bits(length, 3);
        }
        writer
    }

    #[test]
    fn test_oversubscribed_code_length_code() {
        // Four one bit codes for 16, 17, 18 and 0
        let bytes = dynamic_block_header(&[1, 1, 1, 1]).finish();

        assert!(matches!(
            decompress(&bytes),
            Err(Error::Huffman(huffman::Error::OversubscribedCodeLengths))
        ));
    }

    #[test]
    fn test_oversubscribed_literal_lengths() {
        // Symbols 18 and 1 get the one bit codes 1 and 0
        let mut code_length_lengths = [0; 18];
        code_length_lengths[2] = 1;
        code_length_lengths[17] = 1;
        let mut writer = dynamic_block_header(&code_length_lengths);

        // Every literal and distance code claims to be one bit long
        for _ in 0..257 + 1 {
            writer.write_huffman_code(0, 1);
        }

        assert!(matches!(
            decompress(&writer.finish()),
            Err(Error::Huffman(huffman::Error::OversubscribedCodeLengths))
        ));
    }

    #[test]
    fn test_corrupted_streams_fail_gracefully() {
        let mut streams = vec![
            compress(&sample_text(), CompressionLevel::Best),
            compress(&sample_text(), CompressionLevel::Store),
        ];
        streams.push(vec![
            0x1d, 0x89, 0x81, 0x09, 0x00, 0x00, 0x08, 0x83, 0x6e, 0xd5, 0xf5, 0xff, 0x0d, 0xad,
            0x40, 0x26, 0x43, 0x14, 0x46, 0x2a, 0x99, 0xd0, 0x2d, 0xe6, 0xf4, 0x2f, 0x17, 0x71,
            0x01,
        ]);

        // Flipping any single bit may produce garbage or an error, but never a panic
        for stream in streams {
            for index in 0..stream.len() {
                for bit in 0..8 {
                    let mut corrupted = stream.clone();
                    corrupted[index] ^= 1 << bit;
                    let _ = decompress(&corrupted);
                }
            }
        }
    }

    #[test]
    fn test_fixed_literal_codes() -> Result<(), huffman::Error> {
        let codes = huffman::canonical_codes(&fixed_literal_lengths())?;

        for (symbol, code) in codes.into_iter().enumerate() {
            assert_eq!(fixed_literal_code(symbol as u16), code);
        }
        Ok(())
    }

    #[test]
    fn test_tokenize_finds_repetition() {
        let tokens = tokenize(b"abcabcabc", CompressionLevel::Best.max_chain_length());

        assert_eq!(
            tokens,
            vec![
                Token::Literal(b'a'),
                Token::Literal(b'b'),
                Token::Literal(b'c'),
                Token::BackReference {
                    length: 6,
                    distance: 3
                },
            ]
        );
    }

    #[test]
    fn test_parse_compression_level() {
        assert_eq!(
            "BEST".parse::<CompressionLevel>(),
            Ok(CompressionLevel::Best)
        );
        assert_eq!(
            "store".parse::<CompressionLevel>(),
            Ok(CompressionLevel::Store)
        );
        assert!("ultra".parse::<CompressionLevel>().is_err());
    }
}
