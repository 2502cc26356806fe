//! Identified survey points and the measurements between them
//!
//! Every query takes two point ids and returns `None` when either id is
//! unknown, so a missing point is never confused with a real zero.
//!
//! Angles are in degrees:
//!
//! - **slope** is the angle between the segment and the horizontal plane,
//!   positive when the second point is higher, `±90` when one point is
//!   directly above the other.
//! - **bearing** is measured clockwise from north (+Y) in `[0, 360)`:
//!   0 = north, 90 = east (+X), 180 = south, 270 = west. It is undefined for
//!   two points sharing the same X and Y.
//!
//! The cloud has no internal locking. Mutation must be serialised by the
//! caller; a cloud that is no longer mutated can be queried from many threads.

use crate::types::{BoundingBox3D, Point3D};
use indexmap::IndexMap;

/// Point identifier
pub type PointId = u64;

/// A set of 3D points keyed by unique id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    points: IndexMap<PointId, Point3D>,
}

impl PointCloud {
    /// Create an empty cloud
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty cloud with room for `capacity` points
    pub fn with_capacity(capacity: usize) -> Self {
        PointCloud {
            points: IndexMap::with_capacity(capacity),
        }
    }

    /// Add a point under a new id.
    ///
    /// Returns `false` and leaves the cloud unchanged when the id is taken.
    #[must_use = "a duplicate id is reported through the return value"]
    pub fn add_point(&mut self, id: PointId, point: Point3D) -> bool {
        if self.points.contains_key(&id) {
            return false;
        }
        self.points.insert(id, point);
        true
    }

    /// Get a point by id
    pub fn get_point(&self, id: PointId) -> Option<Point3D> {
        self.points.get(&id).copied()
    }

    /// Remove a point, returning it if it was present.
    pub fn remove_point(&mut self, id: PointId) -> Option<Point3D> {
        self.points.shift_remove(&id)
    }

    /// Check if an id is present
    pub fn contains(&self, id: PointId) -> bool {
        self.points.contains_key(&id)
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over `(id, point)` in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (PointId, Point3D)> + '_ {
        self.points.iter().map(|(id, point)| (*id, *point))
    }

    /// Ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.points.keys().copied()
    }

    fn pair(&self, id1: PointId, id2: PointId) -> Option<(&Point3D, &Point3D)> {
        Some((self.points.get(&id1)?, self.points.get(&id2)?))
    }

    /// Straight-line distance between two points
    pub fn distance(&self, id1: PointId, id2: PointId) -> Option<f64> {
        let (p1, p2) = self.pair(id1, id2)?;
        Some(p1.distance(p2))
    }

    /// Slope from the first point to the second, in degrees.
    pub fn slope(&self, id1: PointId, id2: PointId) -> Option<f64> {
        let (p1, p2) = self.pair(id1, id2)?;
        let dz = p2.z - p1.z;
        let horizontal = p1.horizontal_distance(p2);

        if horizontal == 0.0 {
            let vertical = if dz > 0.0 {
                90.0
            } else if dz < 0.0 {
                -90.0
            } else {
                0.0
            };
            return Some(vertical);
        }

        Some(dz.atan2(horizontal).to_degrees())
    }

    /// Bearing from the first point to the second, in degrees.
    pub fn bearing(&self, id1: PointId, id2: PointId) -> Option<f64> {
        let (p1, p2) = self.pair(id1, id2)?;
        let dx = p2.x - p1.x;
        let dy = p2.y - p1.y;

        if dx == 0.0 && dy == 0.0 {
            return None;
        }

        let bearing = dx.atan2(dy).to_degrees();
        Some((bearing + 360.0) % 360.0)
    }

    /// Point with the smallest z; the first inserted wins ties
    pub fn lowest(&self) -> Option<(PointId, Point3D)> {
        self.iter()
            .reduce(|best, candidate| if candidate.1.z < best.1.z { candidate } else { best })
    }

    /// Point with the largest z; the first inserted wins ties
    pub fn highest(&self) -> Option<(PointId, Point3D)> {
        self.iter()
            .reduce(|best, candidate| if candidate.1.z > best.1.z { candidate } else { best })
    }

    /// Axis-aligned bounds of all points
    pub fn bounds(&self) -> Option<BoundingBox3D> {
        BoundingBox3D::from_points(self.points.values())
    }
}

impl Extend<(PointId, Point3D)> for PointCloud {
    /// Adds each point whose id is not taken yet; duplicates are skipped.
    fn extend<T: IntoIterator<Item = (PointId, Point3D)>>(&mut self, iter: T) {
        for (id, point) in iter {
            let _ = self.add_point(id, point);
        }
    }
}

impl FromIterator<(PointId, Point3D)> for PointCloud {
    fn from_iter<T: IntoIterator<Item = (PointId, Point3D)>>(iter: T) -> Self {
        let mut cloud = PointCloud::new();
        cloud.extend(iter);
        cloud
    }
}
