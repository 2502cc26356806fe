//! Building a [`PointCloud`] from the entities of one layer
//!
//! Survey drawings usually carry spot heights in one of two ways: as `POINT`
//! entities with a full 3D position, or as `TEXT` labels placed at the spot
//! whose text is the elevation. [`PointExtractor`] handles both.

use crate::entities::Entity;
use crate::error::{DxfError, Result};
use crate::io::dxf::DxfCode;
use crate::point_cloud::{PointCloud, PointId};
use crate::tables::{Layer, LayerRegistry};
use crate::types::Point3D;
use thiserror::Error;

/// Where the z value of a point comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevationSource {
    /// `TEXT` entities: x/y from the insertion point (10/20, missing = 0),
    /// z parsed from the text content (1).
    TextContent,
    /// `POINT` entities: x/y/z from 10/20/30; x and y are required, a
    /// missing z is 0.
    Coordinate,
}

impl ElevationSource {
    /// Entity type this source reads
    pub fn entity_type(&self) -> &'static str {
        match self {
            ElevationSource::TextContent => "TEXT",
            ElevationSource::Coordinate => "POINT",
        }
    }
}

/// Why an entity did not become a point.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// A required group code is absent
    #[error("group code {code} missing")]
    MissingField { code: i32 },

    /// A value is not a number
    #[error("group code {code} value {value:?} is not a number")]
    InvalidNumber { code: i32, value: String },

    /// Every id from the starting id up to `u64::MAX` is already used
    #[error("no point ids left")]
    IdsExhausted,

    /// The id picked for the point is already in the cloud
    #[error("point id {id} already taken")]
    DuplicateId { id: PointId },
}

/// An entity of the requested type that was not turned into a point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntity {
    /// Position of the entity in the layer's entity list
    pub index: usize,
    /// What was wrong with it
    pub reason: SkipReason,
}

/// Result of an extraction.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// The points that were decoded
    pub cloud: PointCloud,
    /// Entities of the requested type that were looked at
    pub examined: usize,
    /// Entities of the requested type that were rejected
    pub skipped: Vec<SkippedEntity>,
}

/// Decodes points from one layer's entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointExtractor {
    layer: String,
    source: ElevationSource,
    first_id: PointId,
}

impl PointExtractor {
    /// Create an extractor for `layer` reading entities per `source`.
    pub fn new(layer: impl Into<String>, source: ElevationSource) -> Self {
        PointExtractor {
            layer: layer.into(),
            source,
            first_id: 1,
        }
    }

    /// Read elevations from `TEXT` labels on `layer`
    pub fn text_elevations(layer: impl Into<String>) -> Self {
        Self::new(layer, ElevationSource::TextContent)
    }

    /// Read `POINT` entities on `layer`
    pub fn point_entities(layer: impl Into<String>) -> Self {
        Self::new(layer, ElevationSource::Coordinate)
    }

    /// Id given to the first accepted point (default 1); later points
    /// count up from it.
    pub fn starting_id(mut self, id: PointId) -> Self {
        self.first_id = id;
        self
    }

    /// The layer this extractor reads
    pub fn layer(&self) -> &str {
        &self.layer
    }

    /// Look up the layer in `registry` and extract its points.
    pub fn extract(&self, registry: &LayerRegistry) -> Result<Extraction> {
        let layer = registry
            .get(&self.layer)
            .ok_or_else(|| DxfError::LayerNotFound(self.layer.clone()))?;
        Ok(self.extract_layer(layer))
    }

    /// Extract points from a layer.
    pub fn extract_layer(&self, layer: &Layer) -> Extraction {
        let entity_type = self.source.entity_type();
        let mut extraction = Extraction::default();
        let mut next_id = Some(self.first_id);

        for (index, entity) in layer.entities().iter().enumerate() {
            if !entity.is_type(entity_type) {
                continue;
            }
            extraction.examined += 1;

            let cloud = &mut extraction.cloud;
            let accepted = self.decode(entity).and_then(|point| {
                let id = next_id.ok_or(SkipReason::IdsExhausted)?;
                if !cloud.add_point(id, point) {
                    return Err(SkipReason::DuplicateId { id });
                }
                next_id = id.checked_add(1);
                Ok(())
            });

            if let Err(reason) = accepted {
                tracing::warn!(layer = %self.layer, index, %reason, "skipping {} entity", entity_type);
                extraction.skipped.push(SkippedEntity { index, reason });
            }
        }

        tracing::debug!(
            layer = %self.layer,
            examined = extraction.examined,
            points = extraction.cloud.len(),
            "extracted points"
        );
        extraction
    }

    /// Decode one entity into a point according to the elevation source.
    pub fn decode(&self, entity: &Entity) -> std::result::Result<Point3D, SkipReason> {
        match self.source {
            ElevationSource::TextContent => {
                let x = number_or(entity, DxfCode::XCoordinate, 0.0)?;
                let y = number_or(entity, DxfCode::YCoordinate, 0.0)?;
                let z = required_number(entity, DxfCode::Text)?;
                Ok(Point3D::new(x, y, z))
            }
            ElevationSource::Coordinate => {
                let x = required_number(entity, DxfCode::XCoordinate)?;
                let y = required_number(entity, DxfCode::YCoordinate)?;
                let z = number_or(entity, DxfCode::ZCoordinate, 0.0)?;
                Ok(Point3D::new(x, y, z))
            }
        }
    }
}

fn parse_number(code: DxfCode, value: &str) -> std::result::Result<f64, SkipReason> {
    value.trim().parse().map_err(|_| SkipReason::InvalidNumber {
        code: code.as_i32(),
        value: value.to_string(),
    })
}

fn required_number(entity: &Entity, code: DxfCode) -> std::result::Result<f64, SkipReason> {
    let value = entity
        .get_code(code)
        .ok_or(SkipReason::MissingField { code: code.as_i32() })?;
    parse_number(code, value)
}

fn number_or(entity: &Entity, code: DxfCode, default: f64) -> std::result::Result<f64, SkipReason> {
    match entity.get_code(code) {
        Some(value) => parse_number(code, value),
        None => Ok(default),
    }
}
