//! Packs bits into bytes, least significant bit first, as DEFLATE expects

#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,

    /// Bits that do not yet form a complete byte
    pending: u64,
    num_pending_bits: u8,
}

impl BitWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Append the lowest `count` bits of `value`, starting with the least significant one
    ///
    /// # Panics
    /// Panics in debug builds if `count` exceeds 32
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count <= 32);

        if count == 0 {
            return;
        }

        let mask = if count == 32 {
            u32::MAX
        } else {
            (1 << count) - 1
        };
        self.pending |= ((value & mask) as u64) << self.num_pending_bits;
        self.num_pending_bits += count;

        while self.num_pending_bits >= 8 {
            self.bytes.push(self.pending as u8);
            self.pending >>= 8;
            self.num_pending_bits -= 8;
        }
    }

    /// Append a huffman code of the given length.
    ///
    /// Huffman codes are packed starting with their most significant bit,
    /// unlike every other value in a DEFLATE stream.
    pub fn write_huffman_code(&mut self, code: u16, length: u8) {
        if length == 0 {
            return;
        }

        let reversed = code.reverse_bits() >> (16 - length as u32);
        self.write_bits(reversed as u32, length);
    }

    /// Pad the current byte with zeros
    pub fn align_to_byte_boundary(&mut self) {
        if self.num_pending_bits != 0 {
            self.bytes.push(self.pending as u8);
            self.pending = 0;
            self.num_pending_bits = 0;
        }
    }

    /// Append whole bytes, aligning to a byte boundary first
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.align_to_byte_boundary();
        self.bytes.extend_from_slice(bytes);
    }

    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        self.align_to_byte_boundary();
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bit_reader::BitReader;

    #[test]
    fn test_bits_are_packed_lsb_first() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b0101, 4);
        writer.write_bits(0b00111001, 8);
        writer.write_bits(0b0011, 4);

        assert_eq!(writer.finish(), vec![0b10010101, 0b00110011]);
    }

    #[test]
    fn test_huffman_codes_are_packed_msb_first() {
        let mut writer = BitWriter::new();
        writer.write_huffman_code(0b110, 3);

        assert_eq!(writer.finish(), vec![0b011]);
    }

    #[test]
    fn test_write_bytes_aligns() {
        let mut writer = BitWriter::new();
        writer.write_bits(1, 1);
        writer.write_bytes(&[0xAB, 0xCD]);

        assert_eq!(writer.finish(), vec![0x01, 0xAB, 0xCD]);
    }

    #[test]
    fn test_read_back() {
        let mut writer = BitWriter::new();
        writer.write_bits(0x1FFFF, 17);
        writer.write_bits(0b10, 2);
        writer.write_bits(0xDEADBEEF, 32);
        let bytes = writer.finish();

        let mut reader = BitReader::new(&bytes);
        assert_eq!(reader.read_bits::<u32>(17), Ok(0x1FFFF));
        assert_eq!(reader.read_bits::<u32>(2), Ok(0b10));
        assert_eq!(reader.read_bits::<u32>(32), Ok(0xDEADBEEF));
    }
}
