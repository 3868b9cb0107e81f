//! Common utilities used in graphics-related libraries

mod angle;
mod color;
mod rect;
mod vec2d;

pub use angle::Angle;
pub use color::Color;
pub use rect::Rectangle;
pub use vec2d::Vec2D;
