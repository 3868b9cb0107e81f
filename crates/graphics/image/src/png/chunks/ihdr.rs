//! [IHDR](https://www.w3.org/TR/png/#11IHDR) chunk

use error_derive::Error;

/// Size of the IHDR payload in bytes
pub const IHDR_LENGTH: usize = 13;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ImageHeaderError {
    // NOTE: A value is considered to be "unknown" if the PNG standard reserves it for future use.
    // Otherwise, it is "invalid".
    #[msg = "invalid image type"]
    InvalidImageType,

    #[msg = "unknown compression method"]
    UnknownCompressionMethod,

    #[msg = "unknown filter method"]
    UnknownFilterMethod,

    #[msg = "unknown interlace method"]
    UnknownInterlaceMethod,

    // NOTE: not all image-type/bit depth combinations are allowed
    #[msg = "bit depth is not allowed for this image type"]
    DisallowedBitDepth,

    #[msg = "image width and height must be nonzero"]
    ZeroDimension,

    #[msg = "IHDR chunk must be exactly 13 bytes long"]
    IncorrectNumberOfBytes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub image_type: ImageType,
    pub interlace_method: InterlaceMethod,
}

impl ImageHeader {
    /// The header of a non-interlaced, 8-bit RGBA image
    #[must_use]
    pub const fn rgba(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bit_depth: 8,
            image_type: ImageType::TrueColorWithAlpha,
            interlace_method: InterlaceMethod::None,
        }
    }

    pub fn new(data: &[u8]) -> Result<Self, ImageHeaderError> {
        let Ok(data) = <&[u8; IHDR_LENGTH]>::try_from(data) else {
            log::warn!("IHDR length must be exactly 13 bytes, found {}", data.len());
            return Err(ImageHeaderError::IncorrectNumberOfBytes);
        };

        let width = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        let height = u32::from_be_bytes([data[4], data[5], data[6], data[7]]);
        let bit_depth = data[8];
        let image_type: ImageType = data[9].try_into()?;
        let compression_method = data[10];
        let filter_method = data[11];
        let interlace_method = data[12].try_into()?;

        if width == 0 || height == 0 {
            log::warn!("Image dimensions must be nonzero, found {width}x{height}");
            return Err(ImageHeaderError::ZeroDimension);
        }

        if !image_type.is_allowed_bit_depth(bit_depth) {
            log::warn!("Bit depth {bit_depth} is not allowed for image type {image_type:?}");
            return Err(ImageHeaderError::DisallowedBitDepth);
        }

        if compression_method != 0 {
            log::warn!("Unknown compression method: {compression_method}");
            return Err(ImageHeaderError::UnknownCompressionMethod);
        }

        if filter_method != 0 {
            log::warn!("Unknown filter method: {filter_method}");
            return Err(ImageHeaderError::UnknownFilterMethod);
        }

        Ok(Self {
            width,
            height,
            bit_depth,
            image_type,
            interlace_method,
        })
    }

    #[must_use]
    pub fn to_bytes(&self) -> [u8; IHDR_LENGTH] {
        let mut bytes = [0; IHDR_LENGTH];
        bytes[0..4].copy_from_slice(&self.width.to_be_bytes());
        bytes[4..8].copy_from_slice(&self.height.to_be_bytes());
        bytes[8] = self.bit_depth;
        bytes[9] = self.image_type.into();

        // Compression method and filter method are always zero
        bytes[12] = self.interlace_method.into();
        bytes
    }

    /// The number of bytes in one unfiltered scanline
    #[must_use]
    pub fn scanline_width(&self) -> usize {
        (self.width as usize * self.image_type.channels() * self.bit_depth as usize).div_ceil(8)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageType {
    /// Each pixel is a greyscale sample
    GrayScale,
    /// Each pixel is an R,G,B triple
    TrueColor,
    /// Each pixel is a palette index; a PLTE chunk shall appear.
    IndexedColor,
    /// Each pixel is a greyscale sample followed by an alpha sample.
    GrayScaleWithAlpha,
    /// Each pixel is an R,G,B triple followed by an alpha sample.
    TrueColorWithAlpha,
}

impl ImageType {
    #[must_use]
    pub fn is_allowed_bit_depth(&self, bit_depth: u8) -> bool {
        matches!(
            (self, bit_depth),
            (Self::GrayScale, 1 | 2 | 4 | 8 | 16)
                | (Self::TrueColor, 8 | 16)
                | (Self::IndexedColor, 1 | 2 | 4 | 8)
                | (Self::GrayScaleWithAlpha, 8 | 16)
                | (Self::TrueColorWithAlpha, 8 | 16)
        )
    }

    /// Return the number of samples per pixel
    #[must_use]
    pub fn channels(&self) -> usize {
        match self {
            Self::GrayScale | Self::IndexedColor => 1,
            Self::GrayScaleWithAlpha => 2,
            Self::TrueColor => 3,
            Self::TrueColorWithAlpha => 4,
        }
    }
}

impl TryFrom<u8> for ImageType {
    type Error = ImageHeaderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::GrayScale),
            2 => Ok(Self::TrueColor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GrayScaleWithAlpha),
            6 => Ok(Self::TrueColorWithAlpha),
            _ => {
                log::warn!("Unknown image type: {value}");
                Err(ImageHeaderError::InvalidImageType)
            },
        }
    }
}

impl From<ImageType> for u8 {
    fn from(value: ImageType) -> Self {
        match value {
            ImageType::GrayScale => 0,
            ImageType::TrueColor => 2,
            ImageType::IndexedColor => 3,
            ImageType::GrayScaleWithAlpha => 4,
            ImageType::TrueColorWithAlpha => 6,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterlaceMethod {
    None,
    Adam7,
}

impl TryFrom<u8> for InterlaceMethod {
    type Error = ImageHeaderError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Adam7),
            _ => {
                log::warn!("Unknown interlace method: {value}");
                Err(ImageHeaderError::UnknownInterlaceMethod)
            },
        }
    }
}

impl From<InterlaceMethod> for u8 {
    fn from(value: InterlaceMethod) -> Self {
        match value {
            InterlaceMethod::None => 0,
            InterlaceMethod::Adam7 => 1,
        }
    }
}
