//! Glyph composition
//!
//! Turns [`GlyphPlacement`]s into backend draw calls. Vertical mode
//! dispatches per category and font kind: vertical-presentation-form
//! substitutes for brackets and punctuation, literal stroke segments for
//! dashes and long-vowel marks, and the offscreen rotation path for glyphs
//! that read sideways.

use crate::backend::{GlyphPaint, RenderBackend, ScopedBuffer};
use crate::classify::{self, CharCategory};
use crate::layout::GlyphPlacement;
use crate::style::FontKind;

/// Margin added around a glyph in its rotation buffer, in pixels.
const ROTATION_MARGIN: f32 = 4.0;

/// Opening brackets nudged toward the column edge.
///
/// Quarter-advance offsets are policy carried over from print convention,
/// not derived from font metrics; the vertical path applies them, the
/// horizontal path never does.
const NUDGE_OPENING: &[u16] = &[0x3008, 0x300A, 0x300C, 0x300E, 0xFF08, 0xFF3B, 0xFF5B];

/// Closing brackets nudged the opposite way.
const NUDGE_CLOSING: &[u16] = &[0x3009, 0x300B, 0x300D, 0x300F, 0xFF09, 0xFF3D, 0xFF5D];

/// Terminal punctuation nudged like opening brackets.
const NUDGE_PUNCTUATION: &[u16] = &[0x3001, 0x3002, 0xFF0C, 0xFF0E, 0xFF01, 0xFF1F];

pub(crate) struct GlyphCompositor<'a, B: RenderBackend> {
    backend: &'a mut B,
    paint: GlyphPaint,
    font_kind: FontKind,
}

impl<'a, B: RenderBackend> GlyphCompositor<'a, B> {
    pub fn new(backend: &'a mut B, paint: GlyphPaint, font_kind: FontKind) -> Self {
        Self {
            backend,
            paint,
            font_kind,
        }
    }

    /// Draw one horizontally laid out glyph.
    ///
    /// Horizontal mode has no substitution forms; special categories draw
    /// the codepoint as-is.
    pub fn draw_horizontal(&mut self, placement: &GlyphPlacement) {
        self.backend
            .draw_glyph(placement.codepoint, placement.x, placement.y, &self.paint);
    }

    /// Draw one vertically laid out glyph.
    pub fn draw_vertical(&mut self, placement: &GlyphPlacement) {
        match self.font_kind {
            FontKind::Custom => match placement.category {
                CharCategory::HorizontalBar => self.draw_bar(placement),
                CharCategory::Bracket | CharCategory::Punctuation => {
                    self.draw_substitute(placement)
                }
                CharCategory::OtherSpecial => self.draw_rotated(placement),
                CharCategory::Normal => {
                    if placement.rotated {
                        self.draw_rotated(placement);
                    } else {
                        self.draw_upright(placement);
                    }
                }
            },
            // Builtin fonts carry no vertical presentation forms; everything
            // special goes through the rotation path instead.
            FontKind::Builtin => {
                if matches!(
                    placement.category,
                    CharCategory::Bracket | CharCategory::HorizontalBar
                ) || placement.rotated
                {
                    self.draw_rotated(placement);
                } else {
                    self.draw_upright(placement);
                }
            }
        }
    }

    fn draw_upright(&mut self, placement: &GlyphPlacement) {
        self.backend
            .draw_glyph(placement.codepoint, placement.x, placement.y, &self.paint);
    }

    /// Draw via the Unicode vertical presentation form, upright, with the
    /// quarter-advance nudge.
    fn draw_substitute(&mut self, placement: &GlyphPlacement) {
        let cp = classify::vertical_form(placement.codepoint).unwrap_or(placement.codepoint);
        let (x, y) = nudge(placement.codepoint, placement.x, placement.y, placement.width);
        self.backend.draw_glyph(cp, x, y, &self.paint);
    }

    /// Dashes and long-vowel marks become a literal vertical stroke through
    /// the column center, spanning the glyph's height.
    fn draw_bar(&mut self, placement: &GlyphPlacement) {
        let stroke = (placement.height / 8.0).max(1.0);
        let x = placement.x + (placement.width - stroke) / 2.0;
        self.backend
            .fill_rect(x, placement.y, stroke, placement.height, self.paint.color);
    }

    /// Composite a glyph rotated 90° through a scoped offscreen buffer.
    ///
    /// Allocation failure skips the glyph entirely; drawing it unrotated
    /// would read wrong in the middle of a column.
    fn draw_rotated(&mut self, placement: &GlyphPlacement) {
        let side = (placement.width.max(placement.height) + ROTATION_MARGIN).ceil();
        if side <= 0.0 {
            return;
        }

        let Some(mut buffer) = ScopedBuffer::acquire(&mut *self.backend, side as u32, side as u32)
        else {
            tracing::warn!(
                "offscreen buffer allocation failed, skipping rotated glyph U+{:04X}",
                placement.codepoint
            );
            return;
        };

        buffer.fill(self.paint.background);
        buffer.draw_glyph(
            placement.codepoint,
            (side - placement.width) / 2.0,
            (side - placement.height) / 2.0,
            &self.paint,
        );
        buffer.composite_rotated(
            placement.x + placement.height / 2.0,
            placement.y + placement.height / 2.0,
            90.0,
        );
        // buffer released on drop
    }
}

/// Quarter-advance repositioning for fullwidth punctuation in a column.
fn nudge(cp: u16, x: f32, y: f32, advance: f32) -> (f32, f32) {
    let quarter = advance / 4.0;
    if NUDGE_OPENING.contains(&cp) || NUDGE_PUNCTUATION.contains(&cp) {
        (x + quarter, y)
    } else if NUDGE_CLOSING.contains(&cp) {
        (x - quarter, y)
    } else {
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nudge_direction() {
        let (x, _) = nudge(0x300C, 10.0, 0.0, 8.0); // 「 opening
        assert_eq!(x, 12.0);
        let (x, _) = nudge(0x300D, 10.0, 0.0, 8.0); // 」 closing
        assert_eq!(x, 8.0);
        let (x, _) = nudge(0x3002, 10.0, 0.0, 8.0); // 。
        assert_eq!(x, 12.0);
        let (x, _) = nudge(0x6F22, 10.0, 0.0, 8.0); // 漢 untouched
        assert_eq!(x, 10.0);
    }
}
