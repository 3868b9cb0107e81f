//! Implements a [PNG](https://www.w3.org/TR/png) encoder and decoder
//!
//! The encoder always produces non-interlaced 8-bit RGBA images with a single
//! `IDAT` chunk and unfiltered scanlines. The decoder accepts any non-interlaced
//! 8-bit grayscale or truecolor image (with or without alpha) and expands it to RGBA.

pub mod chunks;
mod filter;

use std::{
    fs,
    io::{self, Cursor, Read},
    path::Path,
};

use compression::{zlib, CompressionLevel};
use error_derive::Error;
use hash::Crc32Hasher;

use crate::{Texture, BYTES_PER_PIXEL};

use self::chunks::{ImageHeader, ImageType, InterlaceMethod};

pub(crate) const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Chunk payloads may not be longer than `2^31 - 1` bytes
const MAX_CHUNK_LENGTH: usize = i32::MAX as usize;

#[derive(Debug, Error)]
pub enum Error {
    #[msg = "not a png file"]
    NotAPng,

    #[msg = "expected IHDR chunk"]
    ExpectedIHDR,

    #[msg = "missing IDAT chunk"]
    MissingIDAT,

    #[msg = "unknown critical chunk"]
    UnknownCriticalChunk,

    #[msg = "chunk checksum mismatch"]
    MismatchedChecksum,

    #[msg = "invalid IHDR chunk"]
    InvalidIHDRChunk(chunks::ImageHeaderError),

    #[msg = "IDAT chunks are not consecutive"]
    NonConsecutiveIDATChunk,

    /// Expected the length of the decompressed zlib stream to be a multiple of the scanline width plus the filter byte
    #[msg = "decompressed image data has the wrong size"]
    MismatchedDecompressedZlibSize,

    #[msg = "unknown filter type"]
    UnknownFilterType,

    /// Indexed color, 16-bit samples, sub-byte samples and interlacing are not supported
    #[msg = "unsupported image format"]
    NotImplemented,

    #[msg = "cannot encode an image without pixels"]
    EmptyImage,

    #[msg = "image dimensions do not fit into a png header"]
    ImageTooLarge,

    #[msg = "chunk payload is too large"]
    ChunkTooLarge,

    #[msg = "invalid texture"]
    Texture(crate::Error),

    #[msg = "zlib error"]
    ZLib(zlib::Error),

    #[msg = "io error"]
    IO(io::Error),
}

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub enum Chunk {
    /// Image Header
    IHDR(ImageHeader),
    /// Image Data
    IDAT(chunks::ImageData),
    /// Image End
    IEND,
    /// Any chunk that does not affect the pixel data, identified by its type
    Ancillary([u8; 4]),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ParserStage {
    BeforeIDAT,
    DuringIDAT,
    AfterIDAT,
}

/// Serialize a texture as an 8-bit RGBA png file
pub fn encode(texture: &Texture, level: CompressionLevel) -> Result<Vec<u8>, Error> {
    if texture.width() == 0 || texture.height() == 0 {
        log::error!(
            "Cannot encode {}x{} texture",
            texture.width(),
            texture.height()
        );
        return Err(Error::EmptyImage);
    }

    let scanline_width = texture.width() * BYTES_PER_PIXEL;
    if texture.data().len() != scanline_width * texture.height() {
        return Err(Error::Texture(crate::Error::MismatchedBufferSize));
    }

    let (Ok(width), Ok(height)) = (
        i32::try_from(texture.width()),
        i32::try_from(texture.height()),
    ) else {
        return Err(Error::ImageTooLarge);
    };
    let image_header = ImageHeader::rgba(width as u32, height as u32);

    // Every scanline is prefixed with its filter type, we never filter
    let mut raw_scanlines = Vec::with_capacity((scanline_width + 1) * texture.height());
    for scanline in texture.data().chunks_exact(scanline_width) {
        raw_scanlines.push(filter::Filter::None as u8);
        raw_scanlines.extend_from_slice(scanline);
    }

    let compressed = zlib::compress(&raw_scanlines, level);
    log::debug!(
        "Compressed {} bytes of scanlines to {} bytes ({level:?})",
        raw_scanlines.len(),
        compressed.len()
    );

    let mut png = Vec::with_capacity(compressed.len() + 64);
    png.extend_from_slice(&PNG_HEADER);
    write_chunk(&mut png, b"IHDR", &image_header.to_bytes())?;
    write_chunk(&mut png, b"IDAT", &compressed)?;
    write_chunk(&mut png, b"IEND", &[])?;

    Ok(png)
}

/// Encode `texture` and write it to `path`, creating missing parent directories
pub fn write_to_file<P: AsRef<Path>>(
    path: P,
    texture: &Texture,
    level: CompressionLevel,
) -> Result<(), Error> {
    let path = path.as_ref();
    let png = encode(texture, level)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, png)?;

    Ok(())
}

pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Texture, Error> {
    let mut file_contents = vec![];
    fs::File::open(&path)?.read_to_end(&mut file_contents)?;
    decode(&file_contents)
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) -> Result<(), Error> {
    if MAX_CHUNK_LENGTH < data.len() {
        log::error!(
            "{} chunk with {} bytes exceeds the maximum chunk length",
            String::from_utf8_lossy(chunk_type),
            data.len()
        );
        return Err(Error::ChunkTooLarge);
    }

    let mut hasher = Crc32Hasher::default();
    hasher.write(chunk_type);
    hasher.write(data);

    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);
    png.extend_from_slice(&hasher.finish().to_be_bytes());

    Ok(())
}

pub fn decode(bytes: &[u8]) -> Result<Texture, Error> {
    let mut reader = Cursor::new(bytes);

    let mut signature = [0; 8];
    reader.read_exact(&mut signature)?;

    if signature != PNG_HEADER {
        return Err(Error::NotAPng);
    }

    let ihdr_chunk = read_chunk(&mut reader)?;
    let image_header = if let Chunk::IHDR(image_header) = ihdr_chunk {
        image_header
    } else {
        log::warn!("Expected IHDR chunk, found {ihdr_chunk:?}");
        return Err(Error::ExpectedIHDR);
    };

    if image_header.bit_depth != 8
        || image_header.image_type == ImageType::IndexedColor
        || image_header.interlace_method != InterlaceMethod::None
    {
        log::error!("Decoding is not implemented for {image_header:?}");
        return Err(Error::NotImplemented);
    }

    let image_width = image_header.width as usize;
    let image_height = image_header.height as usize;

    let mut parser_stage = ParserStage::BeforeIDAT;
    let mut idat = vec![];

    // Read all the PNG chunks in the file
    loop {
        let chunk = read_chunk(&mut reader)?;

        if parser_stage == ParserStage::DuringIDAT && !matches!(chunk, Chunk::IDAT(_)) {
            parser_stage = ParserStage::AfterIDAT;
        }

        match chunk {
            Chunk::IEND => break,
            Chunk::IDAT(data) => {
                match parser_stage {
                    ParserStage::BeforeIDAT => parser_stage = ParserStage::DuringIDAT,
                    ParserStage::AfterIDAT => return Err(Error::NonConsecutiveIDATChunk),
                    ParserStage::DuringIDAT => {},
                }
                idat.extend_from_slice(data.bytes());
            },
            Chunk::IHDR(_) => {
                log::warn!("Duplicate IHDR chunk");
                return Err(Error::ExpectedIHDR);
            },
            Chunk::Ancillary(_) => {},
        }
    }

    if parser_stage == ParserStage::BeforeIDAT {
        return Err(Error::MissingIDAT);
    }

    let decompressed_body = zlib::decompress(&idat)?;

    let scanline_width = image_header.scanline_width();

    // NOTE: need to add 1 here because each scanline also contains a byte specifying a filter type
    if decompressed_body.len() != image_height * (scanline_width + 1) {
        log::error!(
            "Decompressed data size {} does not match {image_height} scanlines of size {}",
            decompressed_body.len(),
            scanline_width + 1
        );
        return Err(Error::MismatchedDecompressedZlibSize);
    }

    let mut image_data = vec![0; image_height * scanline_width];
    filter::unfilter_scanlines(
        &decompressed_body,
        &mut image_data,
        scanline_width,
        image_header.image_type.channels(),
    )?;

    let rgba = expand_to_rgba(&image_data, image_header.image_type);
    let texture = Texture::from_data(rgba, image_width, image_height)?;

    Ok(texture)
}

fn read_chunk<R: Read>(reader: &mut R) -> Result<Chunk, Error> {
    let mut length_bytes = [0; 4];
    reader.read_exact(&mut length_bytes)?;
    let length = u32::from_be_bytes(length_bytes) as usize;

    if MAX_CHUNK_LENGTH < length {
        return Err(Error::ChunkTooLarge);
    }

    let mut chunk_name_bytes = [0; 4];
    reader.read_exact(&mut chunk_name_bytes)?;

    let mut data = vec![];
    reader.by_ref().take(length as u64).read_to_end(&mut data)?;
    if data.len() != length {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
    }

    let mut crc_bytes = [0; 4];
    reader.read_exact(&mut crc_bytes)?;
    let expected_crc = u32::from_be_bytes(crc_bytes);

    let mut hasher = Crc32Hasher::default();
    hasher.write(&chunk_name_bytes);
    hasher.write(&data);
    let computed_crc = hasher.finish();

    if expected_crc != computed_crc {
        log::error!(
            "Incorrect chunk checksum: expected {expected_crc:0>8x}, found {computed_crc:0>8x}"
        );
        return Err(Error::MismatchedChecksum);
    }

    let chunk = match &chunk_name_bytes {
        b"IHDR" => Chunk::IHDR(ImageHeader::new(&data)?),
        b"IDAT" => Chunk::IDAT(chunks::ImageData::new(data)),
        b"IEND" => {
            if length != 0 {
                log::warn!("IEND is not empty, found {length} bytes")
            }

            Chunk::IEND
        },
        // The palette is only required for indexed color images, which are rejected earlier
        b"PLTE" => Chunk::Ancillary(chunk_name_bytes),
        other_chunk_type => {
            // Bit 5 of the first byte marks a chunk as ancillary (lowercase letter)
            if other_chunk_type[0] & 0x20 == 0 {
                log::error!(
                    "Unknown critical chunk type: {}",
                    String::from_utf8_lossy(other_chunk_type)
                );
                return Err(Error::UnknownCriticalChunk);
            }

            log::debug!(
                "Ignoring ancillary chunk type: {}",
                String::from_utf8_lossy(other_chunk_type)
            );
            Chunk::Ancillary(chunk_name_bytes)
        },
    };

    Ok(chunk)
}

fn expand_to_rgba(image_data: &[u8], image_type: ImageType) -> Vec<u8> {
    let pixel_width = image_type.channels();
    let mut rgba = Vec::with_capacity(image_data.len() / pixel_width * BYTES_PER_PIXEL);

    for pixel in image_data.chunks_exact(pixel_width) {
        let expanded = match *pixel {
            [gray] => [gray, gray, gray, u8::MAX],
            [gray, alpha] => [gray, gray, gray, alpha],
            [red, green, blue] => [red, green, blue, u8::MAX],
            [red, green, blue, alpha] => [red, green, blue, alpha],
            _ => unreachable!("png pixels have between one and four channels"),
        };
        rgba.extend_from_slice(&expanded);
    }

    rgba
}

#[cfg(test)]
mod tests {
    use math::Color;

    use super::*;

    fn checkerboard() -> Texture {
        let mut texture = Texture::new(5, 3);
        for y in 0..3 {
            for x in 0..5 {
                if (x + y) % 2 == 0 {
                    texture.set_pixel(x, y, Color::rgba(x as u8 * 50, y as u8 * 80, 7, 200));
                }
            }
        }
        texture
    }

    #[test]
    fn test_encoded_layout() -> Result<(), Error> {
        let png = encode(&checkerboard(), CompressionLevel::Best)?;

        assert_eq!(png[..8], PNG_HEADER);

        // IHDR
        assert_eq!(png[8..12], 13_u32.to_be_bytes());
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(png[16..29], [0, 0, 0, 5, 0, 0, 0, 3, 8, 6, 0, 0, 0]);
        assert_eq!(
            png[29..33],
            hash::crc32(&png[12..29]).to_be_bytes()
        );

        // IDAT
        let idat_length = u32::from_be_bytes([png[33], png[34], png[35], png[36]]) as usize;
        assert_eq!(&png[37..41], b"IDAT");

        // IEND is always the same twelve bytes
        let iend = &png[41 + idat_length + 4..];
        assert_eq!(
            iend,
            [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
        Ok(())
    }

    #[test]
    fn test_scanlines_are_unfiltered() -> Result<(), Error> {
        let texture = checkerboard();
        let png = encode(&texture, CompressionLevel::Store)?;

        let idat_length = u32::from_be_bytes([png[33], png[34], png[35], png[36]]) as usize;
        let scanlines = zlib::decompress(&png[41..41 + idat_length])?;

        assert_eq!(scanlines.len(), 3 * (5 * 4 + 1));
        for (scanline, row) in scanlines.chunks_exact(21).zip(texture.data().chunks_exact(20)) {
            assert_eq!(scanline[0], 0);
            assert_eq!(&scanline[1..], row);
        }
        Ok(())
    }

    #[test]
    fn test_roundtrip() -> Result<(), Error> {
        let texture = checkerboard();

        for level in [
            CompressionLevel::Store,
            CompressionLevel::Fast,
            CompressionLevel::Best,
        ] {
            assert_eq!(decode(&encode(&texture, level)?)?, texture);
        }
        Ok(())
    }

    #[test]
    fn test_empty_image() {
        assert!(matches!(
            encode(&Texture::new(0, 4), CompressionLevel::Best),
            Err(Error::EmptyImage)
        ));
        assert!(matches!(
            encode(&Texture::new(4, 0), CompressionLevel::Best),
            Err(Error::EmptyImage)
        ));
    }

    #[test]
    fn test_chunk_framing() -> Result<(), Error> {
        let mut png = vec![];
        write_chunk(&mut png, b"tEXt", b"hello")?;

        assert_eq!(png.len(), 4 + 4 + 5 + 4);
        assert_eq!(png[..4], [0, 0, 0, 5]);
        assert_eq!(png[13..], hash::crc32(b"tEXthello").to_be_bytes());
        Ok(())
    }

    #[test]
    fn test_corrupted_crc() -> Result<(), Error> {
        let mut png = encode(&checkerboard(), CompressionLevel::Fast)?;
        png[20] ^= 1;

        assert!(matches!(decode(&png), Err(Error::MismatchedChecksum)));
        Ok(())
    }

    #[test]
    fn test_not_a_png() {
        assert!(matches!(
            decode(b"GIF89a\x00\x00\x00\x00"),
            Err(Error::NotAPng)
        ));
        assert!(matches!(decode(&PNG_HEADER[..4]), Err(Error::IO(_))));
    }

    #[test]
    fn test_truncated_file() -> Result<(), Error> {
        let png = encode(&checkerboard(), CompressionLevel::Best)?;

        assert!(decode(&png[..png.len() - 12]).is_err());
        assert!(decode(&png[..40]).is_err());
        Ok(())
    }

    #[test]
    fn test_expand_to_rgba() {
        assert_eq!(
            expand_to_rgba(&[1, 2], ImageType::GrayScale),
            [1, 1, 1, 255, 2, 2, 2, 255]
        );
        assert_eq!(
            expand_to_rgba(&[1, 2], ImageType::GrayScaleWithAlpha),
            [1, 1, 1, 2]
        );
        assert_eq!(
            expand_to_rgba(&[1, 2, 3], ImageType::TrueColor),
            [1, 2, 3, 255]
        );
    }
}
