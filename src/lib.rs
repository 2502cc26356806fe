//! # dxf-survey
//!
//! Read the layer structure of ASCII DXF drawings and measure between the
//! survey points they carry.
//!
//! ## Features
//!
//! - Single forward pass over the DXF group-code/value stream
//! - LAYER table styles (colour, visibility, line type) merged with the
//!   entities drawn on each layer
//! - Entities kept as open type tags with their raw group codes
//! - Recoverable input problems reported as notifications, never as errors
//! - Point cloud with distance, slope and bearing queries
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dxf_survey::{DxfReader, PointExtractor};
//!
//! // Read a DXF file
//! let layers = DxfReader::from_file("project.dxf")?.read()?;
//!
//! for layer in layers.sorted_by_name() {
//!     println!("{}", layer);
//! }
//!
//! // Spot heights written as TEXT labels
//! let extraction = PointExtractor::text_elevations("z value TN").extract(&layers)?;
//! let cloud = extraction.cloud;
//! if let (Some((low, _)), Some((high, _))) = (cloud.lowest(), cloud.highest()) {
//!     println!("distance: {:?}", cloud.distance(low, high));
//!     println!("slope:    {:?}", cloud.slope(low, high));
//!     println!("bearing:  {:?}", cloud.bearing(low, high));
//! }
//! # Ok::<(), dxf_survey::DxfError>(())
//! ```

#![warn(rustdoc::missing_crate_level_docs)]

pub mod entities;
pub mod error;
pub mod extract;
pub mod io;
pub mod notification;
pub mod point_cloud;
pub mod tables;
pub mod types;

// Re-export commonly used types
pub use error::{DxfError, Result};
pub use types::{BoundingBox3D, LayerColor, Point3D};

pub use entities::Entity;
pub use tables::{Layer, LayerDefinition, LayerNamePolicy, LayerRegistry};

pub use point_cloud::{PointCloud, PointId};
pub use extract::{ElevationSource, Extraction, PointExtractor, SkipReason, SkippedEntity};

// Re-export I/O types
pub use io::dxf::{DxfReader, DxfReaderConfiguration};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
