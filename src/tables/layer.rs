//! Layer table entry

use crate::entities::Entity;
use crate::types::LayerColor;
use std::fmt;

/// Line type given to layers that do not name one.
pub const DEFAULT_LINE_TYPE: &str = "CONTINUOUS";

/// Style fields read from one `LAYER` record of the LAYER table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerDefinition {
    /// Layer name (group 2)
    pub name: String,
    /// Decoded colour (group 62)
    pub color: LayerColor,
    /// Line type name (group 6)
    pub line_type: String,
}

impl LayerDefinition {
    /// A definition with default style
    pub fn new(name: impl Into<String>) -> Self {
        LayerDefinition {
            name: name.into(),
            color: LayerColor::DEFAULT,
            line_type: DEFAULT_LINE_TYPE.to_string(),
        }
    }

    /// Replace the colour
    pub fn with_color(mut self, color: LayerColor) -> Self {
        self.color = color;
        self
    }

    /// Replace the line type; an empty name keeps the default
    pub fn with_line_type(mut self, line_type: impl Into<String>) -> Self {
        self.line_type = line_type.into();
        self
    }
}

/// A layer: its style plus the entities drawn on it, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    name: String,
    color: LayerColor,
    line_type: String,
    entities: Vec<Entity>,
}

impl Layer {
    /// Create a layer with the default style (colour 7, CONTINUOUS, visible).
    pub fn new(name: impl Into<String>) -> Self {
        Layer {
            name: name.into(),
            color: LayerColor::DEFAULT,
            line_type: DEFAULT_LINE_TYPE.to_string(),
            entities: Vec::new(),
        }
    }

    /// Create a layer from a table definition, with no entities.
    pub fn from_definition(definition: LayerDefinition) -> Self {
        let mut layer = Layer::new(definition.name.clone());
        layer.apply_style(definition);
        layer
    }

    /// Overwrite the style fields, keeping the attached entities.
    pub(crate) fn apply_style(&mut self, definition: LayerDefinition) {
        self.color = definition.color;
        self.line_type = if definition.line_type.is_empty() {
            DEFAULT_LINE_TYPE.to_string()
        } else {
            definition.line_type
        };
    }

    pub(crate) fn push_entity(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Layer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Colour index, always non-negative
    pub fn color_number(&self) -> u16 {
        self.color.index()
    }

    /// Decoded colour and visibility
    pub fn color(&self) -> LayerColor {
        self.color
    }

    /// Line type name
    pub fn line_type(&self) -> &str {
        &self.line_type
    }

    /// Check if the layer is on
    pub fn is_visible(&self) -> bool {
        self.color.is_visible()
    }

    /// Entities in the order they were read
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Entities with the given type name
    pub fn entities_of_type<'a>(&'a self, entity_type: &'a str) -> impl Iterator<Item = &'a Entity> {
        self.entities.iter().filter(move |e| e.is_type(entity_type))
    }

    /// Number of entities on this layer
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Layer: {}", self.name)?;
        writeln!(f, "Color: {}", self.color_number())?;
        writeln!(f, "Line Type: {}", self.line_type)?;
        writeln!(f, "Visible: {}", self.is_visible())?;
        writeln!(f, "Entity Count: {}", self.entities.len())
    }
}
