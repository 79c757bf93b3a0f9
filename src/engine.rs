//! Text rendering engine
//!
//! [`TextRenderer`] ties the codec, layout, and compositor together over a
//! [`RenderBackend`]. Every call is synchronous and self-contained: pen
//! state lives in call-scope locals, so nothing leaks between calls.

use crate::backend::{FontId, GlyphPaint, RenderBackend};
use crate::codec;
use crate::compositor::GlyphCompositor;
use crate::layout::{self, GlyphPlacement, TextExtent};
use crate::metrics::MetricsResolver;
use crate::style::{TextAlign, TextDirection, TextStyle};
use crate::{Result, TextError};

/// Layout and drawing entry point.
pub struct TextRenderer<B: RenderBackend> {
    backend: B,
}

impl<B: RenderBackend> TextRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn bound_font(&self, style: &TextStyle) -> Result<FontId> {
        let font = style.font.ok_or(TextError::NoFontBound)?;
        if !self.backend.has_font(font) {
            return Err(TextError::UnknownFont(font));
        }
        Ok(font)
    }

    /// Measure the bounding box `draw_text` would cover, without drawing.
    pub fn measure_text(&self, text: &str, style: &TextStyle) -> Result<TextExtent> {
        let font = self.bound_font(style)?;
        if text.is_empty() {
            return Ok(TextExtent::ZERO);
        }
        let metrics = MetricsResolver::new(&self.backend, font, style.font_scale);
        let extent = match style.direction {
            TextDirection::Horizontal => {
                layout::horizontal::step(codec::codepoints(text), style, &metrics, |_| {})
            }
            TextDirection::Vertical => {
                layout::vertical::step(codec::codepoints(text), style, &metrics, |_| {})
            }
        };
        Ok(extent)
    }

    /// Lay out and draw `text` at the style origin.
    pub fn draw_text(&mut self, text: &str, style: &TextStyle) -> Result<TextExtent> {
        let font = self.bound_font(style)?;
        if text.is_empty() {
            return Ok(TextExtent::ZERO);
        }

        // Stepping pass: same code path as measurement, placements collected
        // for the draw phase.
        let mut placements: Vec<GlyphPlacement> = Vec::new();
        let metrics = MetricsResolver::new(&self.backend, font, style.font_scale);
        let extent = match style.direction {
            TextDirection::Horizontal => {
                layout::horizontal::step(codec::codepoints(text), style, &metrics, |p| {
                    placements.push(p)
                })
            }
            TextDirection::Vertical => {
                layout::vertical::step(codec::codepoints(text), style, &metrics, |p| {
                    placements.push(p)
                })
            }
        };

        let paint = GlyphPaint {
            font,
            color: style.color,
            background: (!style.transparent_background).then_some(style.background),
            scale: style.font_scale,
        };
        let mut compositor = GlyphCompositor::new(&mut self.backend, paint, style.font_kind);
        match style.direction {
            TextDirection::Horizontal => {
                for placement in &placements {
                    compositor.draw_horizontal(placement);
                }
            }
            TextDirection::Vertical => {
                for placement in &placements {
                    compositor.draw_vertical(placement);
                }
            }
        }

        Ok(extent)
    }

    /// Draw with Start/Center/End alignment along the writing direction.
    ///
    /// Center and End shift the origin by the measured extent, so the wrap
    /// boundary shifts with the text block exactly as it does when the
    /// caller positions the origin by hand.
    pub fn draw_text_aligned(&mut self, text: &str, style: &TextStyle) -> Result<TextExtent> {
        let factor = match style.align {
            TextAlign::Start => return self.draw_text(text, style),
            TextAlign::Center => 0.5,
            TextAlign::End => 1.0,
        };

        let extent = self.measure_text(text, style)?;
        let mut shifted = style.clone();
        match style.direction {
            TextDirection::Horizontal => {
                shifted.origin.0 += (style.area.0 - extent.width) * factor;
            }
            TextDirection::Vertical => {
                shifted.origin.1 += (style.area.1 - extent.height) * factor;
            }
        }
        self.draw_text(text, &shifted)
    }
}
