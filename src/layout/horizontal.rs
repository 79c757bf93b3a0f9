//! Horizontal layout stepping

use super::{GlyphPlacement, TextExtent};
use crate::backend::RenderBackend;
use crate::classify;
use crate::metrics::MetricsResolver;
use crate::style::TextStyle;

const NEWLINE: u16 = b'\n' as u16;

/// Step left-to-right over the codepoints, emitting one placement per glyph.
///
/// Line width is measured to the glyph's far edge, so trailing character
/// spacing never counts toward the extent.
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
    let cell_height = metrics.advance_height();
    let line_height = cell_height + style.line_spacing;

    let mut pen_x = origin_x;
    let mut pen_y = origin_y;
    let mut max_width = 0.0f32;
    let mut line_count = 1usize;

    for cp in cps {
        if cp == NEWLINE {
            pen_x = origin_x;
            pen_y += line_height;
            line_count += 1;
            continue;
        }

        let char_width = metrics.char_width(cp);

        // Wrap before placing. A glyph wider than the whole area still goes
        // at line start rather than looping.
        if style.wrap && pen_x > origin_x && pen_x + char_width > origin_x + style.area.0 {
            pen_x = origin_x;
            pen_y += line_height;
            line_count += 1;
        }

        emit(GlyphPlacement {
            codepoint: cp,
            x: pen_x,
            y: pen_y,
            width: char_width,
            height: cell_height,
            category: classify::category(cp),
            rotated: false,
        });

        max_width = max_width.max(pen_x - origin_x + char_width);
        pen_x += char_width + style.char_spacing;
    }

    TextExtent {
        width: max_width,
        height: line_count as f32 * line_height,
    }
}
