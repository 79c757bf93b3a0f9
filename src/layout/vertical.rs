//! Vertical layout stepping
//!
//! Columns run right-to-left; within a column, glyphs flow top-to-bottom.
//! Column pitch adapts to the widest glyph placed in the column, so a
//! rotated Latin run wider than the nominal advance does not collide with
//! its neighbor column.

use super::{GlyphPlacement, TextExtent};
use crate::backend::RenderBackend;
use crate::classify;
use crate::metrics::MetricsResolver;
use crate::style::TextStyle;

const NEWLINE: u16 = b'\n' as u16;

/// Step top-to-bottom, right-to-left over the codepoints.
pub(crate) fn step<B, I, F>(
    cps: I,
    style: &TextStyle,
    metrics: &MetricsResolver<'_, B>,
    mut emit: F,
) -> TextExtent
where
    B: RenderBackend,
    I: Iterator<Item = u16>,
    F: FnMut(GlyphPlacement),
{
    let (origin_x, origin_y) = style.origin;
    let nominal_width = metrics.advance_width();
    let column_width = nominal_width + style.line_spacing;

    let mut pen_x = origin_x + style.area.0 - column_width;
    let mut pen_y = origin_y;
    let mut max_height = 0.0f32;
    let mut total_width = 0.0f32;
    let mut column_widest = 0.0f32;

    for cp in cps {
        if cp == NEWLINE {
            let pitch = nominal_width.max(column_widest) + style.line_spacing;
            total_width += pitch;
            pen_x -= pitch;
            pen_y = origin_y;
            column_widest = 0.0;
            continue;
        }

        let char_height = metrics.char_height(cp);

        // Wrap before placing; an oversized glyph still goes at column top.
        if style.wrap && pen_y > origin_y && pen_y + char_height > origin_y + style.area.1 {
            let pitch = nominal_width.max(column_widest) + style.line_spacing;
            total_width += pitch;
            pen_x -= pitch;
            pen_y = origin_y;
            column_widest = 0.0;
        }

        let char_width = metrics.char_width(cp);

        emit(GlyphPlacement {
            codepoint: cp,
            x: pen_x,
            y: pen_y,
            width: char_width,
            height: char_height,
            category: classify::category(cp),
            rotated: classify::should_rotate_in_vertical(cp),
        });

        max_height = max_height.max(pen_y - origin_y + char_height);
        column_widest = column_widest.max(char_width);
        pen_y += char_height + style.char_spacing;
    }

    // Close out the final column.
    total_width += nominal_width.max(column_widest) + style.line_spacing;

    TextExtent {
        width: total_width,
        height: max_height,
    }
}
