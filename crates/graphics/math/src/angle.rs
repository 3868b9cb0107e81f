/// Zero cost wrapper type for an `f64`.
///
/// This type exists since coordinates are also `f64`'s.
/// It should enforce type safety to prevent coordinates from accidentally being
/// used as angles.
#[derive(Clone, Copy, Debug, Default)]
pub struct Angle(f64);

impl Angle {
    /// Angles with a difference below this value (in radians) are considered equal
    const MAX_ERROR: f64 = 0.001;

    /// Pointing straight up, in a coordinate system where y grows downwards
    pub const UP: Self = Self(-std::f64::consts::FRAC_PI_2);

    #[inline]
    #[must_use]
    pub const fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    #[inline]
    #[must_use]
    pub const fn radians(&self) -> f64 {
        self.0
    }

    #[inline]
    #[must_use]
    pub fn diff(&self, other: &Self) -> Self {
        let mut difference_in_radians = (self.0 - other.0).rem_euclid(std::f64::consts::TAU);

        if std::f64::consts::PI < difference_in_radians {
            difference_in_radians = std::f64::consts::TAU - difference_in_radians;
        }

        Self(difference_in_radians)
    }

    #[inline]
    #[must_use]
    pub fn sin(&self) -> f64 {
        self.0.sin()
    }

    #[inline]
    #[must_use]
    pub fn cos(&self) -> f64 {
        self.0.cos()
    }
}

impl std::ops::Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Mul<f64> for Angle {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl PartialEq for Angle {
    fn eq(&self, other: &Self) -> bool {
        self.diff(other).0 < Self::MAX_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn test_wraparound() {
        assert_eq!(Angle::from_radians(0.), Angle::from_radians(TAU));
        assert_eq!(Angle::UP, Angle::from_radians(1.5 * PI));
        assert_ne!(Angle::from_radians(0.), Angle::from_radians(PI));
    }

    #[test]
    fn test_arithmetic() {
        let step = Angle::from_radians(PI / 5.);
        assert_eq!(Angle::UP + step * 5., Angle::from_radians(PI / 2.));
    }
}
