mod artwork;
mod catalog;

use std::{error::Error as _, process::ExitCode};

use error_derive::Error;
use image::{png, Texture};
use render::{render_icon, RenderConfig, Theme};
use settings::Settings;

use catalog::{Glyph, UnknownGlyph};

#[derive(Debug, Error)]
enum Error {
    #[msg = "unknown glyph"]
    UnknownGlyph(UnknownGlyph),

    #[msg = "failed to write png file"]
    Png(png::Error),
}

pub fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_args();

    if let Err(error) = run(&settings) {
        log::error!("{error}");

        let mut source = error.source();
        while let Some(cause) = source {
            log::error!("caused by: {cause}");
            source = cause.source();
        }

        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Render every requested glyph and write it into the output directory
fn run(settings: &Settings) -> Result<(), Error> {
    // Resolve all names first, a typo should not leave half of the files written
    let glyphs = catalog::resolve(&settings.glyphs)?;
    let config = RenderConfig::new(settings.output_size, settings.supersample);

    log::debug!(
        "Rendering {} glyphs at {}px ({}x supersampling)",
        glyphs.len(),
        config.output_size,
        config.supersample
    );

    for glyph in glyphs {
        let texture = render_glyph(&config, glyph);
        let path = settings.output_dir.join(glyph.file_name());

        png::write_to_file(&path, &texture, settings.compression)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}

fn render_glyph(config: &RenderConfig, glyph: Glyph) -> Texture {
    let theme = Theme::from_accent(glyph.accent());
    render_icon(config, &artwork::composition_for(glyph, &theme))
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use compression::CompressionLevel;

    use super::*;
    use std::error::Error as _;

    fn scratch_directory(name: &str) -> PathBuf {
        let directory =
            std::env::temp_dir().join(format!("emblem-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&directory);
        directory
    }

    fn settings_for(output_dir: PathBuf, glyphs: &[&str]) -> Settings {
        Settings {
            output_dir,
            output_size: 32,
            supersample: 2,
            compression: CompressionLevel::Fast,
            glyphs: glyphs.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_writes_all_glyphs() -> Result<(), Box<dyn std::error::Error>> {
        let output_dir = scratch_directory("all");
        let settings = settings_for(output_dir.join("nested"), &[]);

        run(&settings)?;

        for glyph in Glyph::ALL {
            let path = settings.output_dir.join(glyph.file_name());
            let texture = png::load_from_file(&path)?;

            assert_eq!(texture, render_glyph(&RenderConfig::new(32, 2), glyph));
        }

        fs::remove_dir_all(output_dir)?;
        Ok(())
    }

    #[test]
    fn test_writes_selected_glyphs() -> Result<(), Box<dyn std::error::Error>> {
        let output_dir = scratch_directory("selected");
        let settings = settings_for(output_dir.clone(), &["STAR", "10"]);

        run(&settings)?;

        let mut written: Vec<_> = fs::read_dir(&output_dir)?
            .map(|entry| entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
            .collect::<Result<_, _>>()?;
        written.sort();
        assert_eq!(written, ["10.png", "star.png"]);

        fs::remove_dir_all(output_dir)?;
        Ok(())
    }

    #[test]
    fn test_unknown_glyph_writes_nothing() {
        let output_dir = scratch_directory("unknown");
        let settings = settings_for(output_dir.clone(), &["a", "joker"]);

        let result = run(&settings);

        assert!(matches!(result, Err(Error::UnknownGlyph(_))));
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_error_chain() {
        let error = Error::from(UnknownGlyph {
            name: "joker".to_string(),
        });

        assert_eq!(error.to_string(), "unknown glyph");
        assert_eq!(
            error.source().map(ToString::to_string).as_deref(),
            Some("unknown glyph \"joker\"")
        );
    }
}
