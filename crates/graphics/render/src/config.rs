/// Side length of the square design space that artwork coordinates refer to
pub const DESIGN_SIZE: usize = 512;

/// Controls the resolution at which compositions are rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Side length of the final image in pixels
    pub output_size: usize,

    /// Each output pixel is the average of `supersample * supersample` rendered pixels
    pub supersample: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_size: DESIGN_SIZE,
            supersample: 2,
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub const fn new(output_size: usize, supersample: usize) -> Self {
        Self {
            output_size,
            supersample,
        }
    }

    /// Side length of the supersampled canvas
    #[must_use]
    pub fn canvas_size(&self) -> usize {
        self.output_size * self.supersample.max(1)
    }

    /// Factor that maps design space coordinates onto the supersampled canvas
    #[must_use]
    pub fn design_scale(&self) -> f64 {
        self.canvas_size() as f64 / DESIGN_SIZE as f64
    }
}
