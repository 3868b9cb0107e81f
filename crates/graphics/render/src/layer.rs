use image::Texture;
use math::{Color, Rectangle, Vec2D};

use crate::{rasterizer, Polygon};

/// Where the color of a shape comes from
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Source {
    /// One single color
    Solid(Color),

    /// Linear interpolation from `top` to `bottom` over the height of the shape
    VerticalGradient { top: Color, bottom: Color },
}

impl Default for Source {
    fn default() -> Self {
        Self::Solid(Color::default())
    }
}

impl From<Color> for Source {
    fn from(value: Color) -> Self {
        Self::Solid(value)
    }
}

impl Source {
    /// The color of row `y` of a shape that starts at `top` and is `height` pixels tall
    #[must_use]
    pub fn color_for_row(&self, y: f64, top: f64, height: f64) -> Color {
        match *self {
            Self::Solid(color) => color,
            Self::VerticalGradient {
                top: top_color,
                bottom: bottom_color,
            } => {
                let t = (y - top) / (height - 1.).max(1.);
                top_color.mix(bottom_color, t)
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Axis aligned rectangle, partially covered pixels are filled too
    Rectangle(Rectangle),

    /// Rectangle with rounded corners, `height` also spans any gradient
    RoundedRectangle {
        position: Vec2D,
        width: f64,
        height: f64,
        radius: f64,
    },

    Circle { center: Vec2D, radius: f64 },

    /// Like [Shape::Circle], but fading out towards the edge
    Glow { center: Vec2D, radius: f64 },

    Polygon(Polygon),
}

impl Shape {
    /// Scale all coordinates and sizes relative to the origin
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        match self {
            Self::Rectangle(area) => Self::Rectangle(area.scale(factor)),
            Self::RoundedRectangle {
                position,
                width,
                height,
                radius,
            } => Self::RoundedRectangle {
                position: *position * factor,
                width: width * factor,
                height: height * factor,
                radius: radius * factor,
            },
            Self::Circle { center, radius } => Self::Circle {
                center: *center * factor,
                radius: radius * factor,
            },
            Self::Glow { center, radius } => Self::Glow {
                center: *center * factor,
                radius: radius * factor,
            },
            Self::Polygon(polygon) => Self::Polygon(polygon.scale(factor)),
        }
    }
}

impl From<Polygon> for Shape {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<Rectangle> for Shape {
    fn from(value: Rectangle) -> Self {
        Self::Rectangle(value)
    }
}

/// A single shape with a color source
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub shape: Shape,
    pub source: Source,
}

impl Layer {
    #[must_use]
    pub fn new(shape: Shape, source: Source) -> Self {
        Self { shape, source }
    }

    /// Draw the layer, with all coordinates multiplied by `scale`
    pub(crate) fn render_to(&self, texture: &mut Texture, scale: f64) {
        let source = &self.source;

        match self.shape.scale(scale) {
            Shape::Rectangle(area) => rasterizer::fill_rectangle(texture, area, source),
            Shape::RoundedRectangle {
                position,
                width,
                height,
                radius,
            } => rasterizer::fill_rounded_rectangle(
                texture, position, width, height, radius, source,
            ),
            Shape::Circle { center, radius } => {
                rasterizer::fill_circle(texture, center, radius, source)
            },
            Shape::Glow { center, radius } => {
                rasterizer::radial_glow(texture, center, radius, source)
            },
            Shape::Polygon(polygon) => rasterizer::fill_polygon(texture, &polygon, source),
        }
    }
}
