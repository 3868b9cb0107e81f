use error_derive::Error;
use math::Color;

/// Every pixel is stored as red, green, blue and alpha, in that order
pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// The pixel data does not match the declared dimensions
    #[msg = "buffer size does not match texture dimensions"]
    MismatchedBufferSize,
}

/// The target surface that content should be drawn to
///
/// Pixels are stored row by row with straight (not premultiplied) alpha.
/// A new texture is transparent black.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Texture {
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * BYTES_PER_PIXEL],
        }
    }

    pub fn from_data(data: Vec<u8>, width: usize, height: usize) -> Result<Self, Error> {
        if data.len() != width * height * BYTES_PER_PIXEL {
            log::error!(
                "Expected {} bytes for a {width}x{height} texture, found {}",
                width * height * BYTES_PER_PIXEL,
                data.len()
            );
            return Err(Error::MismatchedBufferSize);
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Return `true` if the coordinates are inside the bounds of the texture
    #[must_use]
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width() && y < self.height()
    }

    /// Calculate the index of the first channel of a pixel
    #[must_use]
    fn index_of_pixel(&self, x: usize, y: usize) -> usize {
        debug_assert!(self.contains(x, y));

        (y * self.width + x) * BYTES_PER_PIXEL
    }

    /// Get the pixel value at the given coordinates
    ///
    /// # Panics
    /// This function panics if the coordinates are outside of the texture
    #[must_use]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        let index = self.index_of_pixel(x, y);
        let mut channels = [0; BYTES_PER_PIXEL];
        channels.copy_from_slice(&self.data[index..index + BYTES_PER_PIXEL]);
        Color::from_channels(channels)
    }

    /// Set the pixel at the given coordinates to the specified value.
    ///
    /// # Panics
    /// This function panics if the coordinates are outside of the texture
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let index = self.index_of_pixel(x, y);
        self.data[index..index + BYTES_PER_PIXEL].copy_from_slice(&color.channels());
    }

    /// Composite `color` over the pixel at the given coordinates.
    ///
    /// Coordinates outside the texture are silently ignored, as are
    /// fully transparent colors.
    pub fn blend_pixel(&mut self, x: isize, y: isize, color: Color) {
        if color.alpha() == 0 || x < 0 || y < 0 {
            return;
        }

        let (x, y) = (x as usize, y as usize);
        if !self.contains(x, y) {
            return;
        }

        let blended = self.get_pixel(x, y).blend(color);
        self.set_pixel(x, y, blended);
    }

    pub fn clear(&mut self, clear_color: Color) {
        for pixel in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&clear_color.channels());
        }
    }

    /// Reduce the texture by `scale` in both directions using a box filter.
    ///
    /// Every output channel (alpha included) is the truncated average of the
    /// `scale * scale` source pixels it covers. Source rows and columns that
    /// do not fill a whole block are dropped. A `scale` of one or less returns
    /// a copy.
    #[must_use]
    pub fn downsample(&self, scale: usize) -> Self {
        if scale <= 1 {
            return self.clone();
        }

        let width = self.width / scale;
        let height = self.height / scale;
        let samples_per_block = (scale * scale) as u32;
        let mut data = Vec::with_capacity(width * height * BYTES_PER_PIXEL);

        for block_y in 0..height {
            for block_x in 0..width {
                let mut sums = [0_u32; BYTES_PER_PIXEL];

                for y in block_y * scale..(block_y + 1) * scale {
                    let row_start = self.index_of_pixel(block_x * scale, y);
                    let row = &self.data[row_start..row_start + scale * BYTES_PER_PIXEL];

                    for pixel in row.chunks_exact(BYTES_PER_PIXEL) {
                        for (sum, &channel) in sums.iter_mut().zip(pixel) {
                            *sum += channel as u32;
                        }
                    }
                }

                data.extend(sums.map(|sum| (sum / samples_per_block) as u8));
            }
        }

        log::debug!(
            "Downsampled {}x{} texture to {width}x{height}",
            self.width,
            self.height
        );

        Self {
            width,
            height,
            data,
        }
    }

    /// Count the pixels whose color satisfies `predicate`
    #[must_use]
    pub fn count_pixels<F: Fn(Color) -> bool>(&self, predicate: F) -> usize {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|pixel| predicate(Color::from_channels([pixel[0], pixel[1], pixel[2], pixel[3]])))
            .count()
    }
}
