//! CRC-32 as used by PNG (ISO 3309 / ITU-T V.42, reflected polynomial `0xEDB88320`)

const POLYNOMIAL: u32 = 0xEDB88320;

const CRC32_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 == 1 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

#[must_use]
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = Crc32Hasher::default();
    hasher.write(bytes);
    hasher.finish()
}

/// Incremental CRC-32 computation.
///
/// Feeding the input in several calls to [write](Crc32Hasher::write) yields the same
/// checksum as feeding it all at once, which is how PNG chunks checksum
/// their type and payload without concatenating them.
#[derive(Clone, Copy, Debug)]
pub struct Crc32Hasher(u32);

impl Default for Crc32Hasher {
    fn default() -> Self {
        Self(u32::MAX)
    }
}

impl Crc32Hasher {
    pub fn write(&mut self, bytes: &[u8]) {
        for byte in bytes {
            let lookup_index = (self.0 & 0xFF) as u8 ^ byte;
            self.0 = (self.0 >> 8) ^ CRC32_TABLE[lookup_index as usize];
        }
    }

    #[must_use]
    pub fn finish(self) -> u32 {
        !self.0
    }
}
