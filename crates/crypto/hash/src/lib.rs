//! Checksums used by the PNG container and the zlib stream format

mod adler32;
mod crc32;

pub use adler32::{adler32, Adler32Hasher};
pub use crc32::{crc32, Crc32Hasher};
