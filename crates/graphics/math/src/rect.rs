use super::Vec2D;

use std::ops;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rectangle<T = f64> {
    top_left: Vec2D<T>,
    bottom_right: Vec2D<T>,
}

impl<T> Rectangle<T> {
    pub const fn from_corners(top_left: Vec2D<T>, bottom_right: Vec2D<T>) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }
}

impl<T> Rectangle<T>
where
    T: Copy,
{
    pub const fn top_left(&self) -> Vec2D<T> {
        self.top_left
    }

    pub const fn bottom_right(&self) -> Vec2D<T> {
        self.bottom_right
    }
}

impl<T> Rectangle<T>
where
    T: ops::Add<Output = T> + ops::Sub<Output = T> + Copy,
{
    #[must_use]
    pub fn offset_by(&self, offset: Vec2D<T>) -> Self {
        Self {
            top_left: self.top_left + offset,
            bottom_right: self.bottom_right + offset,
        }
    }

    pub fn from_position_and_size(top_left: Vec2D<T>, width: T, height: T) -> Self {
        let bottom_right = Vec2D {
            x: top_left.x + width,
            y: top_left.y + height,
        };

        Self {
            top_left,
            bottom_right,
        }
    }

    pub fn width(&self) -> T {
        self.bottom_right.x - self.top_left.x
    }

    pub fn height(&self) -> T {
        self.bottom_right.y - self.top_left.y
    }
}

impl Rectangle<f64> {
    /// Scale both corners relative to the origin
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            top_left: self.top_left * factor,
            bottom_right: self.bottom_right * factor,
        }
    }

    /// Swap corners so that `top_left` is not below or to the right of `bottom_right`
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            top_left: Vec2D::new(
                self.top_left.x.min(self.bottom_right.x),
                self.top_left.y.min(self.bottom_right.y),
            ),
            bottom_right: Vec2D::new(
                self.top_left.x.max(self.bottom_right.x),
                self.top_left.y.max(self.bottom_right.y),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_and_size() {
        let rect = Rectangle::from_position_and_size(Vec2D::new(10., 20.), 30., 40.);

        assert_eq!(rect.bottom_right(), Vec2D::new(40., 60.));
        assert_eq!(rect.width(), 30.);
        assert_eq!(rect.height(), 40.);
    }

    #[test]
    fn test_scale() {
        let rect = Rectangle::from_corners(Vec2D::new(0., 0.), Vec2D::new(10., 10.));

        assert_eq!(
            rect.scale(2.),
            Rectangle::from_corners(Vec2D::new(0., 0.), Vec2D::new(20., 20.))
        );
    }

    #[test]
    fn test_offset_by() {
        let rect = Rectangle::from_corners(Vec2D::new(1., 2.), Vec2D::new(4., 8.));

        assert_eq!(
            rect.offset_by(Vec2D::new(7., 7.)),
            Rectangle::from_corners(Vec2D::new(8., 9.), Vec2D::new(11., 15.))
        );
    }

    #[test]
    fn test_normalized() {
        let rect = Rectangle::from_corners(Vec2D::new(5., 1.), Vec2D::new(1., 5.));

        assert_eq!(
            rect.normalized(),
            Rectangle::from_corners(Vec2D::new(1., 1.), Vec2D::new(5., 5.))
        );
    }
}
