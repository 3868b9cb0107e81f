//! [zlib](https://www.rfc-editor.org/rfc/rfc1950) implementation
//!
//! ZLIB is basically just a thin wrapper around DEFLATE.

use error_derive::Error;

use crate::deflate::{self, CompressionLevel};

#[derive(Clone, Copy, Debug, Error)]
pub enum Error {
    #[msg = "unexpected end of zlib stream"]
    UnexpectedEOF,

    /// Usage of the reserved compression method `15`.
    #[msg = "reserved compression method"]
    ReservedCompressionMethod,

    /// `CINFO` must be smaller or equal to 7
    #[msg = "window size too large"]
    CINFOTooLarge,

    /// ZLIB Header Checksum must be a multiple of 31
    #[msg = "invalid header checksum"]
    InvalidHeaderChecksum,

    #[msg = "preset dictionaries are not supported"]
    PresetDictionary,

    /// An error occured during the `DEFLATE` decompression
    #[msg = "deflate decompression failed"]
    Deflate(deflate::Error),

    #[msg = "unknown compression method"]
    UnknownCompressionMethod,

    /// The checksum of the decompressed data was incorrect
    #[msg = "incorrect data checksum"]
    IncorrectDataChecksum,
}

const FLAG_DICT_BIT: u8 = 1 << 5;

const COMPRESSION_METHOD_DEFLATE: u8 = 8;

/// Base-2 logarithm of the LZ77 window size minus eight
const COMPRESSION_INFO_32K_WINDOW: u8 = 7;

/// Minimum length for a zlib archive
///
/// Consists of:
/// * Compression method (1 byte)
/// * Compression flags (1 byte)
/// * Adler32 checksum (4 bytes)
///
/// Note that the minimum length of a DEFLATE archive is not included since zlib may use algorithms other than DEFLATE.
const MINIMUM_ZLIB_LEN: usize = 6;

pub fn compress(bytes: &[u8], level: CompressionLevel) -> Vec<u8> {
    let compression_method_and_flags = COMPRESSION_INFO_32K_WINDOW << 4 | COMPRESSION_METHOD_DEFLATE;

    // Informational only, decoders don't need it
    let flag_level: u8 = match level {
        CompressionLevel::Store => 0,
        CompressionLevel::Fast => 1,
        CompressionLevel::Best => 3,
    };

    // FCHECK makes the 16-bit header a multiple of 31
    let mut flags = flag_level << 6;
    let header = (compression_method_and_flags as u16) << 8 | flags as u16;
    flags += (31 - header % 31) as u8 % 31;

    let body = deflate::compress(bytes, level);

    let mut result = Vec::with_capacity(body.len() + MINIMUM_ZLIB_LEN);
    result.push(compression_method_and_flags);
    result.push(flags);
    result.extend_from_slice(&body);
    result.extend_from_slice(&hash::adler32(bytes).to_be_bytes());
    result
}

pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, Error> {
    if bytes.len() < MINIMUM_ZLIB_LEN {
        return Err(Error::UnexpectedEOF);
    }

    // parse Compression method and flags (CMF)
    let compression_method_and_flags = bytes[0];
    let compression_method = compression_method_and_flags & 0b1111;
    let compression_info = compression_method_and_flags >> 4;

    // Parse compression flags (FLG)
    let flags = bytes[1];
    let flag_dict = flags & FLAG_DICT_BIT != 0;

    let header_checksum = u16::from_be_bytes([bytes[0], bytes[1]]);
    if header_checksum % 31 != 0 {
        log::warn!("Invalid zlib header checksum: {header_checksum} (must be a multiple of 31)");
        return Err(Error::InvalidHeaderChecksum);
    }

    match compression_method {
        COMPRESSION_METHOD_DEFLATE => {
            if COMPRESSION_INFO_32K_WINDOW < compression_info {
                return Err(Error::CINFOTooLarge);
            }

            if flag_dict {
                log::warn!("zlib stream requires a preset dictionary");
                return Err(Error::PresetDictionary);
            }

            let (decompressed, num_consumed_bytes) = deflate::decompress(&bytes[2..])?;

            // Verify the checksum provided after the compressed data
            let checksum_bytes: [u8; 4] = bytes
                .get(2 + num_consumed_bytes..)
                .and_then(|remaining| remaining.get(..4))
                .and_then(|checksum| checksum.try_into().ok())
                .ok_or(Error::UnexpectedEOF)?;
            let expected_checksum = u32::from_be_bytes(checksum_bytes);

            let computed_checksum = hash::adler32(&decompressed);

            if expected_checksum != computed_checksum {
                log::warn!("Incorrect zlib checksum: expected {expected_checksum:0>8x}, found {computed_checksum:0>8x}");
                return Err(Error::IncorrectDataChecksum);
            }

            Ok(decompressed)
        },
        15 => {
            log::warn!("Reserved zlib compression method");
            Err(Error::ReservedCompressionMethod)
        },
        _ => {
            log::warn!("Unknown zlib compression method: {compression_method}");
            Err(Error::UnknownCompressionMethod)
        },
    }
}
