pub mod png;
mod texture;

pub use texture::{Error, Texture, BYTES_PER_PIXEL};
