//! Adler-32, the trailing checksum of a zlib stream (RFC 1950)

const BASE: u32 = 65521;

/// Largest number of bytes that can be summed before `b` may overflow a `u32`
const MAX_BYTES_BEFORE_REDUCTION: usize = 5552;

#[must_use]
pub fn adler32(bytes: &[u8]) -> u32 {
    let mut hasher = Adler32Hasher::default();
    hasher.write(bytes);
    hasher.finish()
}

#[derive(Clone, Copy, Debug)]
pub struct Adler32Hasher {
    a: u32,
    b: u32,
}

impl Default for Adler32Hasher {
    fn default() -> Self {
        Self { a: 1, b: 0 }
    }
}

impl Adler32Hasher {
    pub fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(MAX_BYTES_BEFORE_REDUCTION) {
            for b in chunk {
                self.a += *b as u32;
                self.b += self.a;
            }

            self.a %= BASE;
            self.b %= BASE;
        }
    }

    #[must_use]
    pub fn finish(&self) -> u32 {
        self.b << 16 | self.a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adler32() {
        let text = b"Lorem ipsum dolor sit amet, consetetur sadipscing elitr, sed diam nonumx eirmod tempor invidunt ut labore et dolore magna aliquyam erat, sed diam voluptua. At vero eos et accusam et justo duo dolores et ea rebum. Stet clita kasd gubergren, no sea takimata sanctus est Lorem ipsum dolor sit amet. Lorem ipsum dolor sit amet, consetetur sadipscing elitr, sed diam nonumy eirmod tempor invidunt ut labore et dolore magna aliquyam erat, sed diam voluptua. At vero eos et accusam et justo duo dolores et ea rebum. Stet clita kasd gubergren, no sea takimata sanctus est Lorem ipsum dolor sit amet.";
        let mut hasher = Adler32Hasher::default();
        hasher.write(&text[..]);
        assert_eq!(hasher.finish(), 0x6d7fd7c8);
    }

    #[test]
    fn test_wikipedia_example() {
        assert_eq!(adler32(b"Wikipedia"), 0x11E60398);
    }

    #[test]
    fn test_long_input_is_reduced() {
        // Large enough to overflow the sums without periodic reduction
        let data = vec![0xFF; 100_000];
        let mut hasher = Adler32Hasher::default();
        hasher.write(&data[..40_000]);
        hasher.write(&data[40_000..]);
        assert_eq!(hasher.finish(), adler32(&data));
    }
}
