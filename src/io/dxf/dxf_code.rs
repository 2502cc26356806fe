//! DXF group codes
//!
//! Group codes define the role of the value line that follows. Only the codes
//! the layer reader and the point extractor interpret are named here; every
//! other code is carried through as a plain integer in
//! [`Entity`](crate::entities::Entity) fields.

/// DXF group codes consumed by this crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum DxfCode {
    /// Record type marker (`SECTION`, `ENDSEC`, `TABLE`, entity type, ...)
    Start = 0,

    /// Primary text value of an entity
    Text = 1,

    /// Section, table or symbol name
    Name = 2,

    /// Line type name
    LinetypeName = 6,

    /// Layer name of an entity
    LayerName = 8,

    /// Primary point X
    XCoordinate = 10,

    /// Primary point Y
    YCoordinate = 20,

    /// Primary point Z
    ZCoordinate = 30,

    /// Colour number (negative = layer off)
    ColorNumber = 62,
}

impl DxfCode {
    /// Map an integer group code to a named code, if it is one of ours.
    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(DxfCode::Start),
            1 => Some(DxfCode::Text),
            2 => Some(DxfCode::Name),
            6 => Some(DxfCode::LinetypeName),
            8 => Some(DxfCode::LayerName),
            10 => Some(DxfCode::XCoordinate),
            20 => Some(DxfCode::YCoordinate),
            30 => Some(DxfCode::ZCoordinate),
            62 => Some(DxfCode::ColorNumber),
            _ => None,
        }
    }

    /// The integer value of the code
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<DxfCode> for i32 {
    fn from(code: DxfCode) -> i32 {
        code.as_i32()
    }
}
