//! Value types shared by the reader and the point cloud

pub mod bounds;
pub mod color;
pub mod vector;

pub use bounds::BoundingBox3D;
pub use color::LayerColor;
pub use vector::Point3D;
