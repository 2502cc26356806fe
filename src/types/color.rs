//! Layer colour decoding
//!
//! A layer table record stores its colour as an AutoCAD Color Index (ACI) in
//! group 62. The sign carries visibility: a negative index means the layer is
//! switched off, and the colour itself is the magnitude.

use std::fmt;

/// Colour and visibility of a layer, decoded from a raw group-62 value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerColor {
    index: u16,
    visible: bool,
}

impl LayerColor {
    /// Colour used when a layer has no usable colour (ACI 7, white/black).
    pub const DEFAULT_INDEX: u16 = 7;

    /// Largest index accepted as-is (256 = BYLAYER).
    pub const MAX_INDEX: u16 = 256;

    /// Default style: colour 7, visible.
    pub const DEFAULT: LayerColor = LayerColor {
        index: Self::DEFAULT_INDEX,
        visible: true,
    };

    /// Decode a signed colour number.
    ///
    /// Visibility follows the sign. A magnitude above [`Self::MAX_INDEX`]
    /// falls back to [`Self::DEFAULT_INDEX`].
    pub fn from_raw(raw: i32) -> Self {
        let magnitude = raw.unsigned_abs();
        let index = if magnitude <= u32::from(Self::MAX_INDEX) {
            magnitude as u16
        } else {
            Self::DEFAULT_INDEX
        };
        LayerColor {
            index,
            visible: raw >= 0,
        }
    }

    /// Whether a raw colour number is inside the accepted range.
    pub fn is_in_range(raw: i32) -> bool {
        raw.unsigned_abs() <= u32::from(Self::MAX_INDEX)
    }

    /// The colour index (always non-negative)
    pub fn index(&self) -> u16 {
        self.index
    }

    /// Whether the layer is on
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Default for LayerColor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for LayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.visible {
            write!(f, "{}", self.index)
        } else {
            write!(f, "{} (off)", self.index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_color_is_hidden() {
        let c = LayerColor::from_raw(-7);
        assert_eq!(c.index(), 7);
        assert!(!c.is_visible());
    }

    #[test]
    fn test_positive_color() {
        let c = LayerColor::from_raw(1);
        assert_eq!(c.index(), 1);
        assert!(c.is_visible());

        let c = LayerColor::from_raw(0);
        assert_eq!(c.index(), 0);
        assert!(c.is_visible());
    }

    #[test]
    fn test_out_of_range_falls_back() {
        let c = LayerColor::from_raw(300);
        assert_eq!(c.index(), LayerColor::DEFAULT_INDEX);
        assert!(c.is_visible());

        let c = LayerColor::from_raw(-1000);
        assert_eq!(c.index(), LayerColor::DEFAULT_INDEX);
        assert!(!c.is_visible());

        let c = LayerColor::from_raw(i32::MIN);
        assert_eq!(c.index(), LayerColor::DEFAULT_INDEX);
        assert!(!LayerColor::is_in_range(i32::MIN));
        assert!(LayerColor::is_in_range(-256));
    }
}
