//! Layer registry built by the reader

use crate::entities::Entity;
use crate::notification::{Notification, NotificationCollection, NotificationType};
use indexmap::IndexMap;
use std::borrow::Cow;

pub mod layer;

pub use layer::{Layer, LayerDefinition, DEFAULT_LINE_TYPE};

/// Name of the layer entities land on when they carry no layer tag.
pub const DEFAULT_LAYER: &str = "0";

/// How layer names are cleaned before they become registry keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerNamePolicy {
    /// Use names exactly as read (after line trimming).
    #[default]
    Verbatim,
    /// Drop control characters and characters AutoCAD forbids in symbol
    /// names, then truncate to `max_len` characters.
    Sanitized {
        /// Maximum name length in characters
        max_len: usize,
    },
}

impl LayerNamePolicy {
    /// Longest symbol name AutoCAD accepts.
    pub const DXF_MAX_NAME_LEN: usize = 255;

    const FORBIDDEN: &'static [char] = &['<', '>', '/', '\\', '"', ':', ';', '?', '*', '|', '=', ','];

    /// Sanitizing policy with the AutoCAD length limit.
    pub fn sanitized() -> Self {
        LayerNamePolicy::Sanitized {
            max_len: Self::DXF_MAX_NAME_LEN,
        }
    }

    /// Apply the policy to a name.
    pub fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match *self {
            LayerNamePolicy::Verbatim => Cow::Borrowed(name),
            LayerNamePolicy::Sanitized { max_len } => {
                let cleaned: String = name
                    .chars()
                    .filter(|c| !c.is_control() && !Self::FORBIDDEN.contains(c))
                    .collect();
                let cleaned: String = cleaned.trim().chars().take(max_len).collect();
                if cleaned == name {
                    Cow::Borrowed(name)
                } else {
                    Cow::Owned(cleaned)
                }
            }
        }
    }
}

/// Layers of one document, keyed by name.
///
/// Iteration follows the order in which each layer was first referenced,
/// either by a LAYER table record or by an entity. The registry is filled by
/// [`DxfReader::read`](crate::io::dxf::DxfReader::read) and handed to the
/// caller read-only.
#[derive(Debug, Clone, Default)]
pub struct LayerRegistry {
    layers: IndexMap<String, Layer>,
    policy: LayerNamePolicy,
    notifications: NotificationCollection,
}

impl LayerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry using the given name policy
    pub fn with_policy(policy: LayerNamePolicy) -> Self {
        LayerRegistry {
            policy,
            ..Self::default()
        }
    }

    /// Commit a LAYER table record.
    ///
    /// A layer already created by an entity reference takes the new style and
    /// keeps its entities. Returns `false` when the (cleaned) name is empty and
    /// nothing was committed.
    pub(crate) fn define(&mut self, mut definition: LayerDefinition, line: usize) -> bool {
        let name = self.policy.apply(&definition.name).into_owned();
        if name.is_empty() {
            self.notifications.push(
                Notification::new(NotificationType::Warning, "LAYER record without a usable name ignored")
                    .at_line(line),
            );
            return false;
        }
        definition.name = name.clone();
        match self.layers.get_mut(&name) {
            Some(layer) => layer.apply_style(definition),
            None => {
                self.layers.insert(name, Layer::from_definition(definition));
            }
        }
        true
    }

    /// Append an entity to a layer, creating the layer with default style if needed.
    pub(crate) fn attach(&mut self, layer_name: &str, entity: Entity, line: usize) {
        let mut name = self.policy.apply(layer_name).into_owned();
        if name.is_empty() {
            self.notifications.push(
                Notification::new(
                    NotificationType::Warning,
                    format!(
                        "{} entity has no usable layer name {:?}; attached to layer {}",
                        entity.entity_type(),
                        layer_name,
                        DEFAULT_LAYER
                    ),
                )
                .at_line(line),
            );
            name = DEFAULT_LAYER.to_string();
        }
        self.layers
            .entry(name)
            .or_insert_with_key(|name| Layer::new(name.clone()))
            .push_entity(entity);
    }

    pub(crate) fn notifications_mut(&mut self) -> &mut NotificationCollection {
        &mut self.notifications
    }

    /// Get a layer by name (case-sensitive)
    pub fn get(&self, name: &str) -> Option<&Layer> {
        self.layers.get(name)
    }

    /// Check if a layer exists
    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Iterate over layers in first-reference order
    pub fn iter(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// Layer names in first-reference order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    /// Layers sorted by name, ignoring case
    pub fn sorted_by_name(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers.values().collect();
        layers.sort_by_cached_key(|layer| layer.name().to_lowercase());
        layers
    }

    /// Total number of entities over all layers
    pub fn entity_count(&self) -> usize {
        self.layers.values().map(Layer::entity_count).sum()
    }

    /// The name policy the registry was built with
    pub fn policy(&self) -> LayerNamePolicy {
        self.policy
    }

    /// Recoverable problems met while reading
    pub fn notifications(&self) -> &NotificationCollection {
        &self.notifications
    }

    /// Take the layers out of the registry
    pub fn into_layers(self) -> IndexMap<String, Layer> {
        self.layers
    }
}

impl<'a> IntoIterator for &'a LayerRegistry {
    type Item = (&'a String, &'a Layer);
    type IntoIter = indexmap::map::Iter<'a, String, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LayerColor;

    fn point() -> Entity {
        Entity::with_fields("POINT", [(10, "1.0")]).unwrap()
    }

    #[test]
    fn test_attach_creates_default_layer() {
        let mut registry = LayerRegistry::new();
        registry.attach("FOO", point(), 1);

        let layer = registry.get("FOO").unwrap();
        assert_eq!(layer.color_number(), 7);
        assert_eq!(layer.line_type(), "CONTINUOUS");
        assert!(layer.is_visible());
        assert_eq!(layer.entity_count(), 1);
    }

    #[test]
    fn test_define_merges_onto_existing_layer() {
        let mut registry = LayerRegistry::new();
        registry.attach("FOO", point(), 1);
        let def = LayerDefinition::new("FOO")
            .with_color(LayerColor::from_raw(-5))
            .with_line_type("DASHED");
        assert!(registry.define(def, 10));

        let layer = registry.get("FOO").unwrap();
        assert_eq!(layer.color_number(), 5);
        assert!(!layer.is_visible());
        assert_eq!(layer.line_type(), "DASHED");
        assert_eq!(layer.entity_count(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_define_empty_name_ignored() {
        let mut registry = LayerRegistry::new();
        assert!(!registry.define(LayerDefinition::new(""), 4));
        assert!(registry.is_empty());
        assert!(registry.notifications().has_type(NotificationType::Warning));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = LayerRegistry::new();
        registry.attach("Walls", point(), 1);
        registry.attach("WALLS", point(), 2);
        assert_eq!(registry.len(), 2);
        assert!(registry.get("walls").is_none());
    }

    #[test]
    fn test_first_reference_order_and_sorting() {
        let mut registry = LayerRegistry::new();
        registry.attach("b", point(), 1);
        registry.define(LayerDefinition::new("C"), 2);
        registry.attach("a", point(), 3);

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["b", "C", "a"]);

        let sorted: Vec<_> = registry.sorted_by_name().iter().map(|l| l.name()).collect();
        assert_eq!(sorted, vec!["a", "b", "C"]);
        assert_eq!(registry.entity_count(), 2);
    }

    #[test]
    fn test_sanitized_policy() {
        let policy = LayerNamePolicy::sanitized();
        assert_eq!(policy.apply("TOPO|z value"), "TOPOz value");
        assert_eq!(policy.apply("plain"), "plain");
        assert!(matches!(policy.apply("plain"), Cow::Borrowed(_)));

        let short = LayerNamePolicy::Sanitized { max_len: 3 };
        assert_eq!(short.apply("ABCDEF"), "ABC");

        assert_eq!(LayerNamePolicy::Verbatim.apply("a*b"), "a*b");
    }

    #[test]
    fn test_sanitized_registry_falls_back_to_layer_zero() {
        let mut registry = LayerRegistry::with_policy(LayerNamePolicy::sanitized());
        registry.attach("***", point(), 7);
        assert!(registry.contains(DEFAULT_LAYER));
        assert_eq!(registry.notifications().len(), 1);
        assert_eq!(registry.notifications().iter().next().unwrap().line, Some(7));
    }
}
