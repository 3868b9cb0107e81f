use math::Color;

/// Colors derived from a single accent color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color,
    pub outer_top: Color,
    pub outer_bottom: Color,
    pub inner_top: Color,
    pub inner_bottom: Color,
    pub glow: Color,
}

impl Theme {
    #[must_use]
    pub fn from_accent(accent: Color) -> Self {
        Self {
            accent,
            outer_top: Color::rgb(30, 38, 62).mix(accent, 0.16),
            outer_bottom: Color::rgb(8, 12, 24).mix(accent, 0.08),
            inner_top: accent.lighten(0.22),
            inner_bottom: accent.darken(0.40),
            glow: accent.lighten(0.45),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_accent() {
        let theme = Theme::from_accent(Color::rgb(74, 222, 128));

        assert_eq!(theme.accent, Color::rgb(74, 222, 128));
        assert_eq!(theme.outer_top, Color::rgb(37, 67, 73));
        assert_eq!(theme.outer_bottom, Color::rgb(13, 29, 32));
        assert_eq!(theme.inner_top, Color::rgb(114, 229, 156));
        assert_eq!(theme.inner_bottom, Color::rgb(44, 133, 77));
        assert_eq!(theme.glow, Color::rgb(155, 237, 185));
    }
}
