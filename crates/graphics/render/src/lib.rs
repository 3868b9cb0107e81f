//! Software rasterization of simple shapes onto a [Texture]
//!
//! A [Composition] is an ordered list of [Layers](Layer), each one a [Shape]
//! with a color [Source]. Compositions are authored in a fixed design space
//! and replayed at any resolution by [render_icon].

mod composition;
mod config;
mod layer;
mod polygon;
pub mod rasterizer;
mod theme;

pub use composition::Composition;
pub use config::{RenderConfig, DESIGN_SIZE};
pub use layer::{Layer, Shape, Source};
pub use polygon::Polygon;
pub use theme::Theme;

use image::Texture;

/// Render `composition` at the resolution described by `config`.
///
/// The composition is drawn onto a supersampled canvas which is then reduced
/// to `config.output_size` pixels along each side.
#[must_use]
pub fn render_icon(config: &RenderConfig, composition: &Composition) -> Texture {
    let canvas_size = config.canvas_size();
    let mut canvas = Texture::new(canvas_size, canvas_size);

    composition.render_to(&mut canvas, config.design_scale());

    canvas.downsample(config.supersample)
}

#[cfg(test)]
mod tests {
    use math::{Color, Rectangle, Vec2D};

    use super::*;

    fn square() -> Composition {
        let mut composition = Composition::new();
        composition.add_layer(
            Rectangle::from_position_and_size(Vec2D::new(128., 128.), 256., 256.),
            Color::rgb(251, 191, 36),
        );
        composition
    }

    #[test]
    fn test_output_size() {
        for config in [
            RenderConfig::new(64, 1),
            RenderConfig::new(64, 2),
            RenderConfig::new(100, 3),
        ] {
            let texture = render_icon(&config, &square());
            assert_eq!(texture.width(), config.output_size);
            assert_eq!(texture.height(), config.output_size);
        }
    }

    #[test]
    fn test_supersampled_square() {
        let texture = render_icon(&RenderConfig::new(64, 2), &square());

        // The square covers the central half of the image
        assert_eq!(
            texture.count_pixels(|pixel| pixel == Color::rgb(251, 191, 36)),
            32 * 32
        );
        assert_eq!(
            texture.count_pixels(|pixel| pixel == Color::TRANSPARENT),
            64 * 64 - 32 * 32
        );
    }

    #[test]
    fn test_empty_composition() {
        let texture = render_icon(&RenderConfig::new(16, 2), &Composition::new());
        assert_eq!(texture, Texture::new(16, 16));
    }
}
