//! Entity records read from the ENTITIES section
//!
//! The reader does not interpret entity types. Every record keeps the type
//! name exactly as it appeared after group code 0 (`"TEXT"`, `"POINT"`,
//! `"ACAD_PROXY_ENTITY"`, ...) together with the group codes that followed it,
//! and callers decide what a given type means to them.

use crate::error::{DxfError, Result};
use crate::io::dxf::DxfCode;
use ahash::AHashMap;
use std::fmt;

/// A single drawn object: a type tag plus its group-code fields.
///
/// Fields hold the raw value strings. A code that appeared more than once
/// keeps the last value read. The layer tag (code 8) is not stored here; it
/// decides which [`Layer`](crate::tables::Layer) the entity belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    entity_type: String,
    fields: AHashMap<i32, String>,
}

impl Entity {
    /// Build an entity from a type name and its fields.
    ///
    /// Returns [`DxfError::InvalidEntityType`] for an empty type name.
    pub fn new(entity_type: impl Into<String>, fields: AHashMap<i32, String>) -> Result<Self> {
        let entity_type = entity_type.into();
        if entity_type.is_empty() {
            return Err(DxfError::InvalidEntityType(entity_type));
        }
        Ok(Self::from_parts(entity_type, fields))
    }

    /// Build an entity from `(code, value)` pairs; later pairs win.
    pub fn with_fields<I, S>(entity_type: impl Into<String>, fields: I) -> Result<Self>
    where
        I: IntoIterator<Item = (i32, S)>,
        S: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(|(code, value)| (code, value.into()))
            .collect();
        Self::new(entity_type, fields)
    }

    /// The reader only calls this with a non-empty type.
    pub(crate) fn from_parts(entity_type: String, fields: AHashMap<i32, String>) -> Self {
        debug_assert!(!entity_type.is_empty());
        Self {
            entity_type,
            fields,
        }
    }

    /// The type name, e.g. `"TEXT"`
    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    /// Case-sensitive type check
    pub fn is_type(&self, entity_type: &str) -> bool {
        self.entity_type == entity_type
    }

    /// Raw value of a group code
    pub fn get(&self, code: i32) -> Option<&str> {
        self.fields.get(&code).map(String::as_str)
    }

    /// Raw value of a named group code
    pub fn get_code(&self, code: DxfCode) -> Option<&str> {
        self.get(code.as_i32())
    }

    /// Value of a group code parsed as an integer
    pub fn get_i32(&self, code: i32) -> Option<i32> {
        self.get(code).and_then(|v| v.trim().parse().ok())
    }

    /// Value of a group code parsed as a floating-point number
    pub fn get_f64(&self, code: i32) -> Option<f64> {
        self.get(code).and_then(|v| v.trim().parse().ok())
    }

    /// Whether the entity carries a value for `code`
    pub fn contains(&self, code: i32) -> bool {
        self.fields.contains_key(&code)
    }

    /// All fields, in no particular order
    pub fn fields(&self) -> &AHashMap<i32, String> {
        &self.fields
    }

    /// Number of stored fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<_> = self.fields.iter().collect();
        codes.sort_by_key(|(code, _)| **code);
        write!(f, "{} {{", self.entity_type)?;
        for (i, (code, value)) in codes.into_iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}={:?}", code, value)?;
        }
        write!(f, " }}")
    }
}
