/// An 8-bit RGBA color with straight (not premultiplied) alpha
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color([u8; 4]);

/// Convert a float to a color channel, rounding half to even
#[inline]
#[must_use]
fn to_channel(value: f64) -> u8 {
    value.round_ties_even().clamp(0., 255.) as u8
}

impl Color {
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self([red, green, blue, u8::MAX])
    }

    #[inline]
    #[must_use]
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self([red, green, blue, alpha])
    }

    #[inline]
    #[must_use]
    pub const fn from_channels(channels: [u8; 4]) -> Self {
        Self(channels)
    }

    #[inline]
    #[must_use]
    pub const fn channels(&self) -> [u8; 4] {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    #[must_use]
    pub const fn alpha(&self) -> u8 {
        self.0[3]
    }

    #[inline]
    #[must_use]
    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self([self.0[0], self.0[1], self.0[2], alpha])
    }

    /// Multiply the alpha channel by `falloff` squared, rounding only once
    #[must_use]
    pub fn with_alpha_falloff(self, falloff: f64) -> Self {
        self.with_alpha(to_channel(self.alpha() as f64 * falloff * falloff))
    }

    /// Linearly interpolate every channel (including alpha) from `self` towards `other`.
    ///
    /// `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0., 1.);
        let mut channels = [0; 4];
        for ((mixed, from), to) in channels.iter_mut().zip(self.0).zip(other.0) {
            *mixed = to_channel(from as f64 + (to as f64 - from as f64) * t);
        }
        Self(channels)
    }

    /// Move the color towards white, keeping its alpha
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        self.mix(Self::WHITE.with_alpha(self.alpha()), amount)
    }

    /// Move the color towards black, keeping its alpha
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        self.mix(Self::BLACK.with_alpha(self.alpha()), amount)
    }

    /// Composite `foreground` over `self` ("source-over").
    ///
    /// A fully transparent foreground leaves `self` untouched, a fully opaque one replaces it.
    #[must_use]
    pub fn blend(self, foreground: Self) -> Self {
        if foreground.alpha() == 0 {
            return self;
        }

        let source_alpha = foreground.alpha() as f64 / 255.;
        let destination_alpha = self.alpha() as f64 / 255.;
        let out_alpha = source_alpha + destination_alpha * (1. - source_alpha);

        // The rounded result depends on this exact operation order
        let blend_channel = |source: u8, destination: u8| {
            to_channel(
                (source as f64 * source_alpha
                    + destination as f64 * destination_alpha * (1. - source_alpha))
                    / out_alpha,
            )
        };

        Self([
            blend_channel(foreground.red(), self.red()),
            blend_channel(foreground.green(), self.green()),
            blend_channel(foreground.blue(), self.blue()),
            to_channel(out_alpha * 255.),
        ])
    }
}

impl From<[u8; 4]> for Color {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::rgb(red, green, blue)
    }
}
