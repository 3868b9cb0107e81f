//! Responsible for turning command line arguments into [Settings]

mod cli;

use std::{ffi::OsString, path::PathBuf};

use clap::Parser;
use compression::CompressionLevel;

/// Upper bound for the side length of the supersampled canvas, in pixels
pub const MAX_CANVAS_SIZE: usize = 16384;

/// Holds all the configurable information for one run
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Directory the images are written to
    pub output_dir: PathBuf,

    /// Side length of the generated images
    pub output_size: usize,

    pub supersample: usize,

    pub compression: CompressionLevel,

    /// Names of the glyphs to render, empty means all of them
    pub glyphs: Vec<String>,
}

impl Settings {
    /// Parse the arguments of the current process
    ///
    /// Exits the process with a usage message if the arguments are invalid.
    #[must_use]
    pub fn from_args() -> Self {
        cli::Arguments::parse()
            .into_settings()
            .unwrap_or_else(|error| error.exit())
    }

    /// Parse an explicit list of arguments, the first one being the program name
    pub fn try_from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        cli::Arguments::try_parse_from(args)?.into_settings()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("symbols"),
            output_size: 512,
            supersample: 2,
            compression: CompressionLevel::default(),
            glyphs: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() -> Result<(), clap::Error> {
        assert_eq!(Settings::try_from_iter(["emblem"])?, Settings::default());
        Ok(())
    }

    #[test]
    fn test_all_arguments() -> Result<(), clap::Error> {
        let settings = Settings::try_from_iter([
            "emblem",
            "--output-dir",
            "out/icons",
            "--size",
            "128",
            "--supersample",
            "4",
            "--compression",
            "fast",
            "star",
            "wild",
        ])?;

        assert_eq!(settings.output_dir, PathBuf::from("out/icons"));
        assert_eq!(settings.output_size, 128);
        assert_eq!(settings.supersample, 4);
        assert_eq!(settings.compression, CompressionLevel::Fast);
        assert_eq!(settings.glyphs, ["star", "wild"]);
        Ok(())
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(Settings::try_from_iter(["emblem", "--size", "0"]).is_err());
        assert!(Settings::try_from_iter(["emblem", "--supersample", "-1"]).is_err());
        assert!(Settings::try_from_iter(["emblem", "--compression", "maximum"]).is_err());
    }

    #[test]
    fn test_canvas_size_is_bounded() -> Result<(), clap::Error> {
        let largest = Settings::try_from_iter(["emblem", "--size", "8192", "--supersample", "2"])?;
        assert_eq!(largest.output_size * largest.supersample, MAX_CANVAS_SIZE);

        let too_large = Settings::try_from_iter(["emblem", "--size", "8193", "--supersample", "2"]);
        assert_eq!(
            too_large.map_err(|error| error.kind()),
            Err(clap::error::ErrorKind::ValueValidation)
        );

        assert!(Settings::try_from_iter(["emblem", "--size", "100000"]).is_err());
        assert!(Settings::try_from_iter(["emblem", "--supersample", "20000"]).is_err());
        assert!(Settings::try_from_iter([
            "emblem",
            "--size",
            "18446744073709551615",
            "--supersample",
            "18446744073709551615",
        ])
        .is_err());
        Ok(())
    }
}
