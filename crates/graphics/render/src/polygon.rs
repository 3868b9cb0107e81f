use math::{Angle, Vec2D};

/// A closed polygon, the last point connects back to the first one
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    points: Vec<Vec2D>,
}

impl Polygon {
    #[must_use]
    pub fn new(points: Vec<Vec2D>) -> Self {
        Self { points }
    }

    /// An `n`-pointed star whose first point faces straight up.
    ///
    /// Points alternate between `outer_radius` and `inner_radius`.
    #[must_use]
    pub fn star(center: Vec2D, outer_radius: f64, inner_radius: f64, n: usize) -> Self {
        let step = Angle::from_radians(std::f64::consts::PI / n as f64);

        let points = (0..2 * n)
            .map(|i| {
                let radius = if i % 2 == 0 {
                    outer_radius
                } else {
                    inner_radius
                };
                let angle = Angle::UP + step * i as f64;
                Vec2D::new(
                    center.x + angle.cos() * radius,
                    center.y + angle.sin() * radius,
                )
            })
            .collect();

        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[Vec2D] {
        &self.points
    }

    /// Iterate over all edges, including the one closing the loop
    pub fn edges(&self) -> impl Iterator<Item = (Vec2D, Vec2D)> + '_ {
        self.points
            .iter()
            .copied()
            .zip(self.points.iter().copied().cycle().skip(1))
    }

    #[must_use]
    pub fn translate(&self, offset: Vec2D) -> Self {
        Self {
            points: self.points.iter().map(|&point| point + offset).collect(),
        }
    }

    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            points: self.points.iter().map(|&point| point * factor).collect(),
        }
    }

    /// The smallest and largest y coordinate of any point
    #[must_use]
    pub fn vertical_extent(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |extent, point| {
            extent
                .map(|(min, max): (f64, f64)| (min.min(point.y), max.max(point.y)))
                .or(Some((point.y, point.y)))
        })
    }
}

impl<P: Into<Vec2D>> FromIterator<P> for Polygon {
    fn from_iter<T: IntoIterator<Item = P>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
