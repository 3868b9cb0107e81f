//! The set of icons that can be rendered

use std::{error, fmt, str::FromStr};

use math::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    Ten,
    J,
    Q,
    K,
    A,
    Star,
    Scatter,
    Wild,
}

impl Glyph {
    /// Every glyph, in the order they are rendered by default
    pub const ALL: [Self; 8] = [
        Self::Ten,
        Self::J,
        Self::Q,
        Self::K,
        Self::A,
        Self::Star,
        Self::Scatter,
        Self::Wild,
    ];

    /// The identifier used on the command line and in file names
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ten => "10",
            Self::J => "j",
            Self::Q => "q",
            Self::K => "k",
            Self::A => "a",
            Self::Star => "star",
            Self::Scatter => "scatter",
            Self::Wild => "wild",
        }
    }

    /// The color the badge behind the glyph is tinted with
    #[must_use]
    pub const fn accent(&self) -> Color {
        match self {
            Self::Ten => Color::rgb(74, 222, 128),
            Self::J => Color::rgb(96, 165, 250),
            Self::Q => Color::rgb(167, 139, 250),
            Self::K => Color::rgb(244, 114, 182),
            Self::A => Color::rgb(251, 191, 36),
            Self::Star => Color::rgb(245, 158, 11),
            Self::Scatter => Color::rgb(34, 211, 238),
            Self::Wild => Color::rgb(232, 121, 249),
        }
    }

    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.png", self.name())
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A glyph name that is not part of the catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownGlyph {
    pub name: String,
}

impl fmt::Display for UnknownGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown glyph {:?}", self.name)
    }
}

impl error::Error for UnknownGlyph {}

impl FromStr for Glyph {
    type Err = UnknownGlyph;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|glyph| glyph.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownGlyph {
                name: s.to_string(),
            })
    }
}

/// Resolve glyph names, an empty list selects the whole catalog
pub fn resolve(names: &[String]) -> Result<Vec<Glyph>, UnknownGlyph> {
    if names.is_empty() {
        return Ok(Glyph::ALL.to_vec());
    }

    names.iter().map(|name| name.parse()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() -> Result<(), UnknownGlyph> {
        assert_eq!("10".parse::<Glyph>()?, Glyph::Ten);
        assert_eq!("J".parse::<Glyph>()?, Glyph::J);
        assert_eq!("STAR".parse::<Glyph>()?, Glyph::Star);
        assert_eq!("Scatter".parse::<Glyph>()?, Glyph::Scatter);
        assert_eq!("wild".parse::<Glyph>()?, Glyph::Wild);

        for glyph in Glyph::ALL {
            assert_eq!(glyph.name().parse::<Glyph>()?, glyph);
        }
        Ok(())
    }

    #[test]
    fn test_unknown_glyph() {
        assert_eq!(
            "joker".parse::<Glyph>(),
            Err(UnknownGlyph {
                name: "joker".to_string()
            })
        );
        assert!("".parse::<Glyph>().is_err());
        assert!("ten".parse::<Glyph>().is_err());
    }

    #[test]
    fn test_file_names() {
        let file_names: Vec<String> = Glyph::ALL.iter().map(Glyph::file_name).collect();
        assert_eq!(
            file_names,
            [
                "10.png",
                "j.png",
                "q.png",
                "k.png",
                "a.png",
                "star.png",
                "scatter.png",
                "wild.png"
            ]
        );
    }

    #[test]
    fn test_resolve() -> Result<(), UnknownGlyph> {
        assert_eq!(resolve(&[])?, Glyph::ALL);
        assert_eq!(
            resolve(&["k".to_string(), "A".to_string()])?,
            [Glyph::K, Glyph::A]
        );
        assert!(resolve(&["k".to_string(), "x".to_string()]).is_err());
        Ok(())
    }
}
