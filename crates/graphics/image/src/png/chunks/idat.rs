//! [IDAT](https://www.w3.org/TR/png/#11IDAT) chunk

use std::fmt;

/// Wrapper type around the compressed image data so we can easily generate a debug impl for [Chunk](crate::png::Chunk)
#[derive(Clone)]
pub struct ImageData(Vec<u8>);

impl ImageData {
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ImageData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} compressed bytes", self.0.len())
    }
}
