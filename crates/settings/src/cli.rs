use std::path::PathBuf;

use clap::{error::ErrorKind, CommandFactory};
use compression::CompressionLevel;

use crate::{Settings, MAX_CANVAS_SIZE};

#[derive(clap::Parser, Debug)]
#[command(name = "emblem", version, about = "Renders badge icons to png files", long_about = None)]
pub struct Arguments {
    /// Directory the png files are written to
    #[arg(long, default_value = "symbols", value_hint = clap::ValueHint::DirPath)]
    output_dir: PathBuf,

    /// Side length of the generated images in pixels
    #[arg(long, default_value = "512", value_parser = parse_canvas_length)]
    size: usize,

    /// Render at this many times the output resolution before downsampling
    #[arg(long, default_value = "2", value_parser = parse_canvas_length)]
    supersample: usize,

    /// How hard to compress the image data (store, fast or best)
    #[arg(long, default_value = "best", value_parser = parse_compression_level)]
    compression: CompressionLevel,

    /// Only render these glyphs (default: all of them)
    glyphs: Vec<String>,
}

impl Arguments {
    pub(crate) fn into_settings(self) -> Result<Settings, clap::Error> {
        match self.size.checked_mul(self.supersample) {
            Some(canvas_size) if canvas_size <= MAX_CANVAS_SIZE => {},
            _ => {
                let message = format!(
                    "size {} with {}x supersampling is larger than {MAX_CANVAS_SIZE} pixels",
                    self.size, self.supersample
                );
                return Err(Self::command().error(ErrorKind::ValueValidation, message));
            },
        }

        Ok(Settings {
            output_dir: self.output_dir,
            output_size: self.size,
            supersample: self.supersample,
            compression: self.compression,
            glyphs: self.glyphs,
        })
    }
}

fn parse_canvas_length(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("value must be greater than zero".to_string()),
        Ok(value) if MAX_CANVAS_SIZE < value => {
            Err(format!("value must be at most {MAX_CANVAS_SIZE}"))
        },
        Ok(value) => Ok(value),
        Err(e) => Err(format!("{e}")),
    }
}

fn parse_compression_level(s: &str) -> Result<CompressionLevel, String> {
    s.parse()
}
