//! [Layer] management

use image::Texture;

use crate::{Layer, Shape, Source};

/// An ordered list of [Layers](Layer) that make up one image.
///
/// Layers are drawn in the order they were added, later layers are
/// blended over earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Composition {
    layers: Vec<Layer>,
}

impl Composition {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer on top of all existing layers
    pub fn add_layer<S: Into<Shape>, C: Into<Source>>(&mut self, shape: S, source: C) -> &mut Self {
        self.layers.push(Layer::new(shape.into(), source.into()));
        self
    }

    /// Append all layers of `other` on top of the existing layers
    pub fn extend(&mut self, other: Composition) -> &mut Self {
        self.layers.extend(other.layers);
        self
    }

    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    #[inline]
    pub fn clear(&mut self) {
        self.layers.clear();
    }

    /// Draw all layers, in order, with their coordinates multiplied by `scale`
    pub fn render_to(&self, texture: &mut Texture, scale: f64) {
        log::debug!(
            "Rendering {} layers onto {}x{} texture (scale {scale})",
            self.layers.len(),
            texture.width(),
            texture.height()
        );

        for layer in &self.layers {
            layer.render_to(texture, scale);
        }
    }
}

#[cfg(test)]
mod tests {
    use math::{Color, Rectangle, Vec2D};

    use super::*;

    #[test]
    fn test_layers_are_drawn_in_order() {
        let area = Rectangle::from_position_and_size(Vec2D::new(0., 0.), 2., 2.);

        let mut composition = Composition::new();
        composition
            .add_layer(area, Color::rgb(255, 0, 0))
            .add_layer(area, Color::rgba(0, 0, 255, 255));

        let mut texture = Texture::new(2, 2);
        composition.render_to(&mut texture, 1.);
        assert_eq!(texture.get_pixel(1, 1), Color::rgb(0, 0, 255));

        let mut reversed = Composition::new();
        for layer in composition.layers().iter().rev() {
            reversed.add_layer(layer.shape.clone(), layer.source);
        }

        let mut texture = Texture::new(2, 2);
        reversed.render_to(&mut texture, 1.);
        assert_eq!(texture.get_pixel(1, 1), Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_extend_appends() {
        let area = Rectangle::from_position_and_size(Vec2D::new(0., 0.), 1., 1.);

        let mut base = Composition::new();
        base.add_layer(area, Color::BLACK);

        let mut glyph = Composition::new();
        glyph.add_layer(area, Color::WHITE);

        base.extend(glyph);
        assert_eq!(base.layers().len(), 2);
        assert_eq!(base.layers()[1].source, Source::Solid(Color::WHITE));

        base.clear();
        assert!(base.layers().is_empty());
    }
}
