//! DXF section readers

use super::stream_reader::DxfStreamReader;
use super::DxfReaderConfiguration;
use crate::entities::Entity;
use crate::io::dxf::DxfCode;
use crate::notification::{Notification, NotificationType};
use crate::tables::{LayerDefinition, LayerRegistry, DEFAULT_LAYER};
use crate::types::LayerColor;
use ahash::AHashMap;
use std::mem;

/// Section reader for the TABLES and ENTITIES sections.
///
/// Each `read_*` method starts right after the section header and returns
/// once it has consumed the closing `ENDSEC` (or the input ran out).
pub struct SectionReader<'a> {
    reader: &'a mut dyn DxfStreamReader,
    registry: &'a mut LayerRegistry,
    config: &'a DxfReaderConfiguration,
}

/// Entity being accumulated in the ENTITIES section.
struct PendingEntity {
    layer_name: String,
    entity_type: String,
    fields: AHashMap<i32, String>,
    line: usize,
}

impl<'a> SectionReader<'a> {
    /// Create a new section reader
    pub fn new(
        reader: &'a mut dyn DxfStreamReader,
        registry: &'a mut LayerRegistry,
        config: &'a DxfReaderConfiguration,
    ) -> Self {
        Self {
            reader,
            registry,
            config,
        }
    }

    fn notify(&mut self, kind: NotificationType, message: impl Into<String>, line: usize) {
        self.registry
            .notifications_mut()
            .push(Notification::new(kind, message).at_line(line));
    }

    fn notify_unterminated(&mut self, what: &str, closing: &str) {
        let line = self.reader.line_number();
        self.notify(
            NotificationType::Error,
            format!("{} ended without {}", what, closing),
            line,
        );
    }

    /// Skip a section the reader does not interpret, up to and including ENDSEC.
    pub fn skip_section(&mut self, name: &str, line: usize) {
        self.notify(
            NotificationType::Skipped,
            format!("section {:?} skipped", name),
            line,
        );
        while let Some(pair) = self.reader.read_pair() {
            if pair.is_marker("ENDSEC") {
                return;
            }
        }
        self.notify_unterminated(&format!("section {:?}", name), "ENDSEC");
    }

    // ===== TABLES =====

    /// Read the TABLES section
    pub fn read_tables(&mut self) {
        while let Some(pair) = self.reader.read_pair() {
            if pair.is_marker("ENDSEC") {
                return;
            }

            if pair.is_marker("TABLE") {
                let table_name = self
                    .reader
                    .read_if_code(DxfCode::Name)
                    .map(|name| name.value)
                    .unwrap_or_default();
                tracing::debug!(table = %table_name, line = pair.line, "reading table");

                match table_name.as_str() {
                    "LAYER" => self.read_layer_table(),
                    _ => {
                        self.notify(
                            NotificationType::Skipped,
                            format!("table {:?} skipped", table_name),
                            pair.line,
                        );
                        self.skip_to_endtab();
                    }
                }
            }
        }
        self.notify_unterminated("TABLES section", "ENDSEC");
    }

    /// Skip to ENDTAB
    fn skip_to_endtab(&mut self) {
        while let Some(pair) = self.reader.read_pair() {
            if pair.is_marker("ENDTAB") {
                return;
            }
            if pair.is_marker("ENDSEC") {
                self.notify(NotificationType::Error, "table closed by ENDSEC without ENDTAB", pair.line);
                self.reader.push_back(pair);
                return;
            }
        }
        self.notify_unterminated("table", "ENDTAB");
    }

    /// Read LAYER table
    fn read_layer_table(&mut self) {
        while let Some(pair) = self.reader.read_pair() {
            if pair.is_marker("ENDTAB") {
                return;
            }
            if pair.is_marker("ENDSEC") {
                self.notify(
                    NotificationType::Error,
                    "LAYER table closed by ENDSEC without ENDTAB",
                    pair.line,
                );
                self.reader.push_back(pair);
                return;
            }

            if pair.is_marker("LAYER") {
                let definition = self.read_layer_entry();
                self.registry.define(definition, pair.line);
            }
        }
        self.notify_unterminated("LAYER table", "ENDTAB");
    }

    /// Read a single LAYER entry, stopping before the next group-0 marker.
    fn read_layer_entry(&mut self) -> LayerDefinition {
        let mut definition = LayerDefinition::new(String::new());

        while let Some(pair) = self.reader.read_pair() {
            if pair.is_start() {
                // Next record or ENDTAB - push back and break
                self.reader.push_back(pair);
                break;
            }

            match pair.code.and_then(DxfCode::from_i32) {
                Some(DxfCode::Name) => definition.name = pair.value,
                Some(DxfCode::ColorNumber) => {
                    definition.color = self.read_layer_color(pair.as_i32(), &pair.value, pair.line);
                }
                Some(DxfCode::LinetypeName) => definition.line_type = pair.value,
                _ => {}
            }
        }

        definition
    }

    fn read_layer_color(&mut self, raw: Option<i32>, value: &str, line: usize) -> LayerColor {
        match raw {
            Some(raw) => {
                if !LayerColor::is_in_range(raw) {
                    self.notify(
                        NotificationType::Warning,
                        format!(
                            "layer colour {} out of range; using {}",
                            raw,
                            LayerColor::DEFAULT_INDEX
                        ),
                        line,
                    );
                }
                LayerColor::from_raw(raw)
            }
            None => {
                self.notify(
                    NotificationType::Warning,
                    format!(
                        "layer colour {:?} is not an integer; using {}",
                        value,
                        LayerColor::DEFAULT_INDEX
                    ),
                    line,
                );
                LayerColor::DEFAULT
            }
        }
    }

    // ===== ENTITIES =====

    /// Read the ENTITIES section
    pub fn read_entities(&mut self) {
        let mut pending = PendingEntity {
            layer_name: DEFAULT_LAYER.to_string(),
            entity_type: String::new(),
            fields: AHashMap::new(),
            line: 0,
        };

        while let Some(pair) = self.reader.read_pair() {
            let Some(code) = pair.code else {
                self.notify(
                    NotificationType::Warning,
                    "group code line is not an integer; pair skipped",
                    pair.line,
                );
                continue;
            };

            match DxfCode::from_i32(code) {
                Some(DxfCode::Start) => {
                    self.flush_entity(&mut pending);
                    if pair.value == "ENDSEC" {
                        return;
                    }
                    pending.entity_type = pair.value;
                    pending.line = pair.line;
                }
                Some(DxfCode::LayerName) => pending.layer_name = pair.value,
                _ => {
                    pending.fields.insert(code, pair.value);
                }
            }
        }

        self.notify_unterminated("ENTITIES section", "ENDSEC");
        if pending.entity_type.is_empty() {
            return;
        }
        if self.config.flush_unterminated_entities {
            self.flush_entity(&mut pending);
        } else {
            let message = format!("unterminated {} entity dropped", pending.entity_type);
            self.notify(NotificationType::Warning, message, pending.line);
        }
    }

    /// Commit the pending entity (if any) and clear its fields.
    fn flush_entity(&mut self, pending: &mut PendingEntity) {
        let fields = mem::take(&mut pending.fields);
        let entity_type = mem::take(&mut pending.entity_type);

        if entity_type.is_empty() {
            if !fields.is_empty() {
                let message = format!("{} group code(s) outside any entity ignored", fields.len());
                self.notify(NotificationType::Warning, message, pending.line);
            }
            return;
        }

        let entity = Entity::from_parts(entity_type, fields);
        self.registry.attach(&pending.layer_name, entity, pending.line);
    }
}

#[cfg(test)]
mod tests {
    use super::super::text_reader::DxfTextReader;
    use super::*;

    fn read_with<F>(text: &str, config: DxfReaderConfiguration, f: F) -> LayerRegistry
    where
        F: FnOnce(&mut SectionReader<'_>),
    {
        let mut reader = DxfTextReader::new(text.lines());
        let mut registry = LayerRegistry::with_policy(config.layer_names);
        let mut section = SectionReader::new(&mut reader, &mut registry, &config);
        f(&mut section);
        registry
    }

    fn read_tables(text: &str) -> LayerRegistry {
        read_with(text, DxfReaderConfiguration::default(), |s| s.read_tables())
    }

    fn read_entities(text: &str) -> LayerRegistry {
        read_with(text, DxfReaderConfiguration::default(), |s| s.read_entities())
    }

    #[test]
    fn test_layer_entry_fields() {
        let registry = read_tables(
            "0\nTABLE\n2\nLAYER\n0\nLAYER\n2\nTOPO\n70\n0\n62\n-3\n6\nDASHED\n0\nENDTAB\n0\nENDSEC\n",
        );
        let layer = registry.get("TOPO").unwrap();
        assert_eq!(layer.color_number(), 3);
        assert!(!layer.is_visible());
        assert_eq!(layer.line_type(), "DASHED");
        assert!(registry.notifications().is_empty());
    }

    #[test]
    fn test_consecutive_layer_entries() {
        let registry = read_tables(
            "0\nTABLE\n2\nLAYER\n0\nLAYER\n2\nA\n62\n1\n0\nLAYER\n2\nB\n62\n2\n0\nENDTAB\n0\nENDSEC\n",
        );
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("A").unwrap().color_number(), 1);
        assert_eq!(registry.get("B").unwrap().color_number(), 2);
    }

    #[test]
    fn test_bad_color_falls_back() {
        let registry =
            read_tables("0\nTABLE\n2\nLAYER\n0\nLAYER\n2\nA\n62\nred\n0\nENDTAB\n0\nENDSEC\n");
        let layer = registry.get("A").unwrap();
        assert_eq!(layer.color_number(), 7);
        assert!(layer.is_visible());
        assert!(registry.notifications().has_type(NotificationType::Warning));
    }

    #[test]
    fn test_out_of_range_color() {
        let registry =
            read_tables("0\nTABLE\n2\nLAYER\n0\nLAYER\n2\nA\n62\n-999\n0\nENDTAB\n0\nENDSEC\n");
        let layer = registry.get("A").unwrap();
        assert_eq!(layer.color_number(), 7);
        assert!(!layer.is_visible());
    }

    #[test]
    fn test_other_tables_skipped() {
        let registry = read_tables(
            "0\nTABLE\n2\nLTYPE\n0\nLTYPE\n2\nLAYER\n0\nENDTAB\n0\nTABLE\n2\nLAYER\n0\nLAYER\n2\nX\n0\nENDTAB\n0\nENDSEC\n",
        );
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["X"]);
        assert!(registry.notifications().has_type(NotificationType::Skipped));
    }

    #[test]
    fn test_missing_endtab_stops_at_endsec() {
        let text = "0\nTABLE\n2\nLAYER\n0\nLAYER\n2\nA\n0\nENDSEC\n0\nSECTION\n";
        let mut reader = DxfTextReader::new(text.lines());
        let mut registry = LayerRegistry::new();
        let config = DxfReaderConfiguration::default();
        SectionReader::new(&mut reader, &mut registry, &config).read_tables();

        assert!(registry.contains("A"));
        assert!(registry.notifications().has_type(NotificationType::Error));
        assert!(reader.read_pair().unwrap().is_marker("SECTION"));
    }

    #[test]
    fn test_entities_grouped_by_layer() {
        let registry = read_entities(
            "0\nPOINT\n8\nA\n10\n1\n0\nTEXT\n8\nB\n1\nhi\n0\nPOINT\n8\nA\n10\n2\n0\nENDSEC\n",
        );
        let a = registry.get("A").unwrap();
        assert_eq!(a.entity_count(), 2);
        assert_eq!(a.entities()[0].get(10), Some("1"));
        assert_eq!(a.entities()[1].get(10), Some("2"));
        assert_eq!(registry.get("B").unwrap().entities()[0].get(1), Some("hi"));
    }

    #[test]
    fn test_entity_without_layer_tag_uses_current_layer() {
        let registry = read_entities("0\nPOINT\n10\n1\n0\nPOINT\n8\nA\n0\nPOINT\n0\nENDSEC\n");
        assert_eq!(registry.get(DEFAULT_LAYER).unwrap().entity_count(), 1);
        // The layer name carries over to the following entity
        assert_eq!(registry.get("A").unwrap().entity_count(), 2);
    }

    #[test]
    fn test_layer_tag_is_not_a_field() {
        let registry = read_entities("0\nPOINT\n8\nA\n10\n1\n0\nENDSEC\n");
        let entity = &registry.get("A").unwrap().entities()[0];
        assert!(!entity.contains(8));
        assert_eq!(entity.field_count(), 1);
    }

    #[test]
    fn test_other_named_codes_are_fields() {
        let registry = read_entities("0\nINSERT\n8\nA\n2\nBLOCK1\n62\n5\n0\nENDSEC\n");
        let entity = &registry.get("A").unwrap().entities()[0];
        assert_eq!(entity.get(2), Some("BLOCK1"));
        assert_eq!(entity.get(62), Some("5"));
        assert_eq!(entity.field_count(), 2);
    }

    #[test]
    fn test_non_integer_code_skipped() {
        let registry = read_entities("0\nPOINT\nxx\n5\n10\n1\n0\nENDSEC\n");
        let entity = &registry.get(DEFAULT_LAYER).unwrap().entities()[0];
        assert_eq!(entity.field_count(), 1);
        assert_eq!(registry.notifications().len(), 1);
    }

    #[test]
    fn test_unterminated_entities_not_flushed_by_default() {
        let registry = read_entities("0\nPOINT\n8\nA\n10\n1\n");
        assert!(registry.is_empty());
        assert!(registry.notifications().has_type(NotificationType::Error));
    }

    #[test]
    fn test_unterminated_entities_flushed_when_configured() {
        let config = DxfReaderConfiguration::default().flush_unterminated_entities(true);
        let registry = read_with("0\nPOINT\n8\nA\n10\n1\n", config, |s| s.read_entities());
        assert_eq!(registry.get("A").unwrap().entity_count(), 1);
    }

    #[test]
    fn test_skip_section() {
        let text = "9\n$ACADVER\n1\nAC1015\n0\nLAYER\n0\nENDSEC\n0\nEOF\n";
        let mut reader = DxfTextReader::new(text.lines());
        let mut registry = LayerRegistry::new();
        let config = DxfReaderConfiguration::default();
        SectionReader::new(&mut reader, &mut registry, &config).skip_section("HEADER", 1);

        assert!(registry.is_empty());
        assert!(reader.read_pair().unwrap().is_marker("EOF"));
    }
}
