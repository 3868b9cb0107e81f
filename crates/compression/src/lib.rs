//! Implements the DEFLATE compression scheme and its zlib container

pub mod bit_reader;
pub mod bit_writer;
pub mod deflate;
pub mod huffman;
pub mod zlib;

pub use deflate::CompressionLevel;
