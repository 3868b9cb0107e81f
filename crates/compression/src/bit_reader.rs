//! Reads individual bits from a byte slice, least significant bit first

use std::ops::{BitOrAssign, Shl};

use error_derive::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[msg = "unexpected end of input"]
    UnexpectedEOF,

    #[msg = "read does not fit into the requested type"]
    TooLargeRead,
}

#[derive(Debug)]
pub struct BitReader<'a> {
    bytes: &'a [u8],
    byte_ptr: usize,
    bit_ptr: u8,
}

impl<'a> BitReader<'a> {
    #[must_use]
    pub const fn new(source: &'a [u8]) -> Self {
        Self {
            bytes: source,
            byte_ptr: 0,
            bit_ptr: 0,
        }
    }

    /// Skip the remaining bits of a partially read byte
    pub fn align_to_byte_boundary(&mut self) {
        if self.bit_ptr != 0 {
            self.bit_ptr = 0;
            self.byte_ptr += 1;
        }
    }

    /// The number of bytes that were (partially) read so far
    #[must_use]
    pub fn num_consumed_bytes(&self) -> usize {
        if self.bit_ptr == 0 {
            self.byte_ptr
        } else {
            self.byte_ptr + 1
        }
    }

    pub fn read_single_bit(&mut self) -> Result<bool, Error> {
        let byte = self
            .bytes
            .get(self.byte_ptr)
            .copied()
            .ok_or(Error::UnexpectedEOF)?;
        let bit = (byte >> self.bit_ptr) & 1 == 1;

        self.bit_ptr += 1;
        if self.bit_ptr == 8 {
            self.bit_ptr = 0;
            self.byte_ptr += 1;
        }

        Ok(bit)
    }

    /// Read `bits_to_read` bits, the first bit read ends up in the least significant position
    pub fn read_bits<T>(&mut self, bits_to_read: u8) -> Result<T, Error>
    where
        T: From<u8> + BitOrAssign<T> + Shl<u8, Output = T>,
    {
        if std::mem::size_of::<T>() * 8 < bits_to_read as usize {
            return Err(Error::TooLargeRead);
        }

        let mut result = T::from(0);
        for i in 0..bits_to_read {
            let bit = u8::from(self.read_single_bit()?);
            result |= T::from(bit) << i;
        }

        Ok(result)
    }
}
