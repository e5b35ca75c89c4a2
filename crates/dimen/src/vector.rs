//! Two-dimensional vectors of lengths.

use crate::{IncompatibleUnitsError, Length};

/// A pair of lengths, used for positions and directed segments in pictures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: Length,
    pub y: Length,
}

impl Vector {
    pub fn new(x: Length, y: Length) -> Vector {
        Vector { x, y }
    }

    /// Returns the Euclidean length of the vector.
    pub fn norm(&self) -> Result<Length, IncompatibleUnitsError> {
        self.x.norm(&self.y)
    }

    /// Moves the start point of the segment from the origin to this vector
    ///     along the segment's own direction.
    ///
    /// A positive `l` lengthens the segment and a negative `l` shortens it.
    /// The returned vector is the offset from the old start point to the new one.
    pub fn shift_start(&self, l: Length) -> Result<Vector, IncompatibleUnitsError> {
        let (dx, dy) = self.direction(&l, "shift")?;
        Ok(Vector {
            x: dx * -1.0,
            y: dy * -1.0,
        })
    }

    /// Moves the end point of the segment from the origin to this vector
    ///     along the segment's own direction.
    ///
    /// A positive `l` lengthens the segment and a negative `l` shortens it.
    /// The returned vector is the new end point.
    pub fn shift_end(&self, l: Length) -> Result<Vector, IncompatibleUnitsError> {
        let (dx, dy) = self.direction(&l, "shift")?;
        Ok(Vector {
            x: (self.x + dx)?,
            y: (self.y + dy)?,
        })
    }

    /// Splits `l` into components along this vector's slope.
    ///
    /// With slope m = y/x, the components are l/sqrt(1 + m^2) and l/sqrt(1 + 1/m^2),
    ///     signed by the direction of the vector.
    fn direction(
        &self,
        l: &Length,
        operation: &'static str,
    ) -> Result<(Length, Length), IncompatibleUnitsError> {
        for other in [&self.y, l] {
            if self.x.unit() != other.unit() {
                return Err(IncompatibleUnitsError {
                    operation,
                    lhs: self.x.unit(),
                    rhs: other.unit(),
                });
            }
        }
        let x = self.x.raw() as f64;
        let y = self.y.raw() as f64;
        let sign_x = if x < 0.0 { -1.0 } else { 1.0 };
        let sign_y = if y < 0.0 { -1.0 } else { 1.0 };
        let zero = Length::zero(l.unit());
        Ok(if x != 0.0 && y != 0.0 {
            let msq = (1.0 + y * y / (x * x)).sqrt();
            let imsq = (1.0 + x * x / (y * y)).sqrt();
            ((*l / msq) * sign_x, (*l / imsq) * sign_y)
        } else if y == 0.0 {
            (*l * sign_x, zero)
        } else {
            (zero, *l * sign_y)
        })
    }
}

impl std::ops::Add<Vector> for Vector {
    type Output = Result<Vector, IncompatibleUnitsError>;
    fn add(self, rhs: Vector) -> Self::Output {
        Ok(Vector {
            x: (self.x + rhs.x)?,
            y: (self.y + rhs.y)?,
        })
    }
}

impl std::ops::Sub<Vector> for Vector {
    type Output = Result<Vector, IncompatibleUnitsError>;
    fn sub(self, rhs: Vector) -> Self::Output {
        Ok(Vector {
            x: (self.x - rhs.x)?,
            y: (self.y - rhs.y)?,
        })
    }
}

impl std::ops::Mul<f64> for Vector {
    type Output = Vector;
    fn mul(self, rhs: f64) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(value: f64) -> Length {
        Length::new(value, crate::LengthUnit::Absolute(crate::ScaledUnit::Point))
    }

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(pt(x), pt(y))
    }

    #[test]
    fn arithmetic() {
        assert_eq!(v(1.0, 2.0) + v(3.0, -4.0), Ok(v(4.0, -2.0)));
        assert_eq!(v(1.0, 2.0) - v(3.0, -4.0), Ok(v(-2.0, 6.0)));
        assert_eq!(v(1.0, 2.0) * 2.0, v(2.0, 4.0));
    }

    #[test]
    fn norm() {
        assert_eq!(v(3.0, 4.0).norm(), Ok(pt(5.0)));
    }

    #[test]
    fn shift_end_horizontal() {
        assert_eq!(v(10.0, 0.0).shift_end(pt(-2.0)), Ok(v(8.0, 0.0)));
        assert_eq!(v(-10.0, 0.0).shift_end(pt(-2.0)), Ok(v(-8.0, 0.0)));
    }

    #[test]
    fn shift_end_vertical() {
        assert_eq!(v(0.0, 10.0).shift_end(pt(-2.0)), Ok(v(0.0, 8.0)));
        assert_eq!(v(0.0, -10.0).shift_end(pt(3.0)), Ok(v(0.0, -13.0)));
    }

    #[test]
    fn shift_end_diagonal() {
        // a 3-4-5 triangle scaled by 2 and shortened by 5
        assert_eq!(v(6.0, 8.0).shift_end(pt(-5.0)), Ok(v(3.0, 4.0)));
    }

    #[test]
    fn shift_start() {
        assert_eq!(v(10.0, 0.0).shift_start(pt(2.0)), Ok(v(-2.0, 0.0)));
        assert_eq!(v(6.0, -8.0).shift_start(pt(5.0)), Ok(v(-3.0, 4.0)));
    }

    #[test]
    fn mixed_units_fail() {
        let em = Length::new(1.0, crate::LengthUnit::Relative(crate::RelativeUnit::Em));
        assert!(Vector::new(pt(1.0), em).shift_end(pt(1.0)).is_err());
        assert!(v(1.0, 1.0).shift_start(em).is_err());
        assert!((v(1.0, 1.0) + Vector::new(em, em)).is_err());
    }
}
