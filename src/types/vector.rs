//! Point type for survey geometry

use nalgebra::{Vector2, Vector3};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An immutable 3D point.
///
/// Equality and hashing use the exact bit pattern of each component, with no
/// epsilon: `0.0` and `-0.0` are different points, and a NaN component equals
/// itself. This keeps `Eq` and `Hash` consistent so points can be used as
/// map keys.
#[derive(Debug, Clone, Copy)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    /// Create a new point
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Point3D { x, y, z }
    }

    /// The origin
    pub const ORIGIN: Point3D = Point3D::new(0.0, 0.0, 0.0);

    /// Component-wise offset from `self` to `other`.
    pub fn delta_to(&self, other: &Point3D) -> Vector3<f64> {
        other.to_vector() - self.to_vector()
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point3D) -> f64 {
        self.delta_to(other).norm()
    }

    /// Distance to another point projected onto the XY plane
    pub fn horizontal_distance(&self, other: &Point3D) -> f64 {
        let d = self.delta_to(other);
        Vector2::new(d.x, d.y).norm()
    }

    /// Position vector of this point
    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    fn bits(&self) -> [u64; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl Default for Point3D {
    fn default() -> Self {
        Point3D::ORIGIN
    }
}

impl PartialEq for Point3D {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Point3D {}

impl Hash for Point3D {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl From<[f64; 3]> for Point3D {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Point3D::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Point3D {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Point3D::new(x, y, z)
    }
}

impl From<Vector3<f64>> for Point3D {
    fn from(v: Vector3<f64>) -> Self {
        Point3D::new(v.x, v.y, v.z)
    }
}

impl fmt::Display for Point3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_point_creation() {
        let p = Point3D::new(1.0, 2.0, 3.0);
        assert_eq!(p.x, 1.0);
        assert_eq!(p.y, 2.0);
        assert_eq!(p.z, 3.0);
        assert_eq!(Point3D::default(), Point3D::ORIGIN);
    }

    #[test]
    fn test_point_distance() {
        let a = Point3D::ORIGIN;
        let b = Point3D::new(3.0, 4.0, 12.0);
        assert_eq!(a.distance(&b), 13.0);
        assert_eq!(a.horizontal_distance(&b), 5.0);
    }

    #[test]
    fn test_exact_equality() {
        let a = Point3D::new(1.0, 2.0, 3.0);
        let b = Point3D::from([1.0, 2.0, 3.0]);
        let c = Point3D::new(1.0, 2.0, 3.0 + 1e-12);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(Point3D::new(0.0, 0.0, 0.0), Point3D::new(-0.0, 0.0, 0.0));
    }

    #[test]
    fn test_nan_is_reflexive() {
        let p = Point3D::new(f64::NAN, 0.0, 0.0);
        assert_eq!(p, p);
    }

    #[test]
    fn test_hash_matches_equality() {
        let mut set = HashSet::new();
        set.insert(Point3D::new(1.0, 1.0, 1.0));
        set.insert(Point3D::new(1.0, 1.0, 1.0));
        set.insert(Point3D::new(1.0, 1.0, 2.0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point3D::new(1.5, -2.0, 0.25).to_string(), "(1.5, -2, 0.25)");
    }
}
