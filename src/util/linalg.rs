#[allow(unused_imports)]
use crate::core::prelude::*;

use num_traits::Zero;
use serde::Serialize;
use std::iter::Sum;
use std::{
    fmt,
    fmt::Formatter,
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// A 2D vector representation using 32-bit floating point coordinates.
///
/// [`Vec2`] is used both for points (polygon vertices, Minkowski-difference points, grid-local
/// contour endpoints) and for directions (GJK search directions, edges). Search directions are
/// never normalised.
///
/// The coordinate system is the usual mathematical one: `y` increases upwards, and a positive
/// [`cross`](Vec2::cross) means the second vector is counter-clockwise from the first.
///
/// # Examples
///
/// ```
/// use gjk2d::util::linalg::Vec2;
///
/// let v1 = Vec2 { x: 3.0, y: 4.0 };
/// let v2 = Vec2 { x: 1.0, y: 2.0 };
/// let sum = v1 + v2;
/// assert_eq!(sum, Vec2 { x: 4.0, y: 6.0 });
/// ```
///
/// # Equality
/// Two vectors are considered equal if their components differ by less than
/// [`EPSILON`](crate::core::config::EPSILON). Non-finite vectors fall back to exact comparison.
#[derive(Default, Debug, Copy, Clone, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Points and vectors share a representation.
pub type Point2 = Vec2;

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        if self.is_finite() || other.is_finite() {
            (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
        } else {
            self.x == other.x && self.y == other.y
        }
    }
}

impl Vec2 {
    /// Returns a vector with both components set to 0.0.
    #[must_use]
    pub fn zero() -> Vec2 {
        Vec2 { x: 0.0, y: 0.0 }
    }
    /// Returns a vector with both components set to 1.0.
    #[must_use]
    pub fn one() -> Vec2 {
        Vec2 { x: 1.0, y: 1.0 }
    }

    /// Returns the squared length of the vector.
    ///
    /// Use this instead of [`len`](Vec2::len) when comparing lengths to avoid the square root.
    #[must_use]
    pub fn len_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Returns the length of the vector.
    #[must_use]
    pub fn len(&self) -> f32 {
        self.len_squared().sqrt()
    }

    /// Computes the dot product of two vectors.
    ///
    /// # Examples
    ///
    /// ```
    /// use gjk2d::core::prelude::*;
    /// let v1 = Vec2 { x: 2.0, y: 3.0 };
    /// let v2 = Vec2 { x: 4.0, y: 5.0 };
    /// assert_eq!(v1.dot(v2), 23.0); // 2*4 + 3*5
    /// ```
    #[must_use]
    pub fn dot(&self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product of two vectors.
    ///
    /// In 2D, the cross product is a scalar representing the signed area of the
    /// parallelogram formed by the two vectors. It is positive if the second vector
    /// is counter-clockwise from the first vector, and negative otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use gjk2d::core::prelude::*;
    /// let v1 = Vec2 { x: 2.0, y: 0.0 };
    /// let v2 = Vec2 { x: 0.0, y: 3.0 };
    /// assert_eq!(v1.cross(v2), 6.0);
    /// assert_eq!(v1.cross(-v2), -6.0);
    /// ```
    #[must_use]
    pub fn cross(&self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Returns this vector rotated by +90 degrees (counter-clockwise).
    ///
    /// # Examples
    ///
    /// ```
    /// use gjk2d::core::prelude::*;
    /// let vec = Vec2 { x: 3.0, y: 2.0 };
    /// assert_eq!(vec.perp_left(), Vec2 { x: -2.0, y: 3.0 });
    /// assert!(vec.cross(vec.perp_left()) > 0.0);
    /// ```
    #[must_use]
    pub fn perp_left(&self) -> Vec2 {
        Vec2 {
            x: -self.y,
            y: self.x,
        }
    }
    /// Returns this vector rotated by -90 degrees (clockwise).
    ///
    /// # Examples
    ///
    /// ```
    /// use gjk2d::core::prelude::*;
    /// let vec = Vec2 { x: 3.0, y: 2.0 };
    /// assert_eq!(vec.perp_right(), Vec2 { x: 2.0, y: -3.0 });
    /// assert_eq!(vec.dot(vec.perp_right()), 0.0);
    /// ```
    #[must_use]
    pub fn perp_right(&self) -> Vec2 {
        Vec2 {
            x: self.y,
            y: -self.x,
        }
    }

    /// Checks if the vector is approximately equal to another vector.
    ///
    /// Two vectors are considered approximately equal if the length of their difference
    /// is less than [`EPSILON`](crate::core::config::EPSILON).
    pub fn almost_eq(&self, rhs: Vec2) -> bool {
        (*self - rhs).len() < EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Twice the signed area of the triangle `p1, p2, p3`.
///
/// Positive for a counter-clockwise (left) turn, negative for a clockwise (right) turn and zero
/// when the three points are collinear.
///
/// # Examples
///
/// ```
/// use gjk2d::core::prelude::*;
/// let a = Vec2 { x: 0.0, y: 0.0 };
/// let b = Vec2 { x: 1.0, y: 0.0 };
/// assert!(ccw(a, b, Vec2 { x: 1.0, y: 1.0 }) > 0.0);
/// assert!(ccw(a, b, Vec2 { x: 1.0, y: -1.0 }) < 0.0);
/// assert_eq!(ccw(a, b, Vec2 { x: 2.0, y: 0.0 }), 0.0);
/// ```
#[must_use]
pub fn ccw(p1: Vec2, p2: Vec2, p3: Vec2) -> f32 {
    (p2 - p1).cross(p3 - p1)
}

impl Zero for Vec2 {
    fn zero() -> Self {
        Vec2::zero()
    }

    fn is_zero(&self) -> bool {
        self.almost_eq(Self::zero())
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let precision = f.precision();

        write!(f, "vec(")?;
        if let Some(p) = precision {
            write!(f, "{0:.1$}", self.x, p)?;
            write!(f, ", {0:.1$}", self.y, p)?;
        } else {
            write!(f, "{}, {}", self.x, self.y)?;
        }
        write!(f, ")")
    }
}

impl Add<Vec2> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}
impl AddAssign<Vec2> for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub<Vec2> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}
impl SubAssign<Vec2> for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Sum<Vec2> for Vec2 {
    fn sum<I: Iterator<Item = Vec2>>(iter: I) -> Self {
        iter.fold(Vec2::zero(), Vec2::add)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        rhs * self
    }
}
impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Self::Output {
        Vec2 {
            x: self * rhs.x,
            y: self * rhs.y,
        }
    }
}
impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Self::Output {
        Vec2 {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}
impl DivAssign<f32> for Vec2 {
    fn div_assign(&mut self, rhs: f32) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}
impl Neg for &Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Vec2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec2_scalar_multiplication() {
        let a = Vec2 { x: 1.0, y: 1.0 };
        assert_eq!(a * 2.0, Vec2 { x: 2.0, y: 2.0 });
        assert_eq!(2.0 * a, Vec2 { x: 2.0, y: 2.0 });
        assert_eq!(a / 2.0, Vec2 { x: 0.5, y: 0.5 });
    }

    #[test]
    fn vec2_subtraction() {
        let a = Vec2 { x: 5.0, y: 6.0 };
        let b = Vec2 { x: 3.0, y: 4.0 };
        assert_eq!(a - b, Vec2 { x: 2.0, y: 2.0 });
    }

    #[test]
    fn vec2_addition() {
        let a = Vec2 { x: 1.0, y: 2.0 };
        let b = Vec2 { x: 3.0, y: 4.0 };
        assert_eq!(a + b, Vec2 { x: 4.0, y: 6.0 });

        let mut c = a;
        c += b;
        c -= Vec2::one();
        assert_eq!(c, Vec2 { x: 3.0, y: 5.0 });
    }

    #[test]
    fn vec2_sum() {
        let total: Vec2 = [Vec2::one(), Vec2 { x: 2.0, y: 2.0 }, Vec2 { x: -1.0, y: 0.0 }]
            .into_iter()
            .sum();
        assert_eq!(total, Vec2 { x: 2.0, y: 3.0 });
    }

    #[test]
    fn vec2_perpendiculars() {
        let edge = Vec2 { x: 0.0, y: -2.0 };
        assert_eq!(edge.perp_left(), Vec2 { x: 2.0, y: 0.0 });
        assert_eq!(edge.perp_right(), Vec2 { x: -2.0, y: 0.0 });
        assert_eq!(edge.perp_left(), -edge.perp_right());
        assert!(edge.cross(edge.perp_left()) > 0.0);
        assert!(edge.cross(edge.perp_right()) < 0.0);
    }

    #[test]
    fn vec2_equality_is_approximate() {
        let a = Vec2 { x: 1.0, y: 1.0 };
        assert_eq!(a, Vec2 { x: 1.0 + EPSILON / 2.0, y: 1.0 });
        assert_ne!(a, Vec2 { x: 1.0 + EPSILON * 2.0, y: 1.0 });
        assert!(Vec2::zero().is_zero());
    }

    #[test]
    fn vec2_non_finite_equality() {
        let inf = Vec2 {
            x: f32::INFINITY,
            y: f32::INFINITY,
        };
        assert_eq!(inf, inf);
        assert_ne!(inf, -inf);
        assert!(!inf.is_finite());
    }

    #[test]
    fn ccw_orientation() {
        let a = Vec2::zero();
        let b = Vec2 { x: 2.0, y: 0.0 };
        assert_eq!(ccw(a, b, Vec2 { x: 0.0, y: 2.0 }), 4.0);
        assert_eq!(ccw(a, Vec2 { x: 0.0, y: 2.0 }, b), -4.0);
        assert_eq!(ccw(a, b, Vec2 { x: 4.0, y: 0.0 }), 0.0);
    }

    #[test]
    fn display_with_precision() {
        let v = Vec2 { x: 1.0, y: 2.5 };
        assert_eq!(format!("{v}"), "vec(1, 2.5)");
        assert_eq!(format!("{v:.2}"), "vec(1.00, 2.50)");
    }
}
