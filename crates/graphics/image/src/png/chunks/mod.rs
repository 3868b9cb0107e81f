pub mod idat;
pub mod ihdr;

pub use idat::ImageData;
pub use ihdr::{ImageHeader, ImageHeaderError, ImageType, InterlaceMethod};
