//! Text layout module
//!
//! The horizontal and vertical stepping passes both emit
//! [`GlyphPlacement`]s through a caller-supplied sink and return the final
//! [`TextExtent`]. The draw pass collects placements for the compositor; the
//! measurement pass hands in a no-op sink. Because both run the same
//! stepping code, their geometry cannot drift apart.

pub(crate) mod horizontal;
pub(crate) mod vertical;

use crate::classify::CharCategory;

/// One glyph's position and dispatch data, produced transiently per call.
#[derive(Debug, Clone, Copy)]
pub struct GlyphPlacement {
    pub codepoint: u16,
    /// Top-left corner of the glyph cell
    pub x: f32,
    pub y: f32,
    /// Width the glyph occupies along a horizontal line
    pub width: f32,
    /// Height the glyph occupies along a vertical column
    pub height: f32,
    pub category: CharCategory,
    /// Whether the glyph reads sideways in vertical mode
    pub rotated: bool,
}

/// Bounding size covered by a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

impl TextExtent {
    pub const ZERO: TextExtent = TextExtent {
        width: 0.0,
        height: 0.0,
    };
}
