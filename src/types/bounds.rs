//! Axis-aligned bounding box

use super::Point3D;
use std::fmt;

/// 3D bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox3D {
    /// Minimum corner
    pub min: Point3D,
    /// Maximum corner
    pub max: Point3D,
}

impl BoundingBox3D {
    /// Create a bounding box from a single point
    pub fn from_point(point: Point3D) -> Self {
        BoundingBox3D {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing all points; `None` for no points
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point3D>,
    {
        let mut points = points.into_iter();
        let mut bounds = Self::from_point(*points.next()?);
        for point in points {
            bounds.expand_to_include(*point);
        }
        Some(bounds)
    }

    /// Extent along X
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Extent along Z
    pub fn depth(&self) -> f64 {
        self.max.z - self.min.z
    }

    /// Check whether a point lies inside or on the box
    pub fn contains(&self, point: Point3D) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// Grow the box to include a point
    pub fn expand_to_include(&mut self, point: Point3D) {
        self.min = Point3D::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Point3D::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }
}

impl fmt::Display for BoundingBox3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.min, self.max)
    }
}
