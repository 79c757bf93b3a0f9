//! Per-character metric lookup
//!
//! [`MetricsResolver`] asks the backend for font-default metrics and
//! per-codepoint overrides, scales them by the style's font scale, and
//! returns them by value. No metric state survives a layout call.

use crate::backend::{FontId, RenderBackend};

/// Glyph box and advance metrics.
///
/// In font-native units as reported by the backend; the resolver
/// pre-multiplies by the style scale before handing them to layout.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlyphMetrics {
    pub width: f32,
    pub height: f32,
    pub x_advance: f32,
    pub y_advance: f32,
    pub x_offset: f32,
    pub y_offset: f32,
}

impl GlyphMetrics {
    /// Scale every field uniformly.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
            x_advance: self.x_advance * factor,
            y_advance: self.y_advance * factor,
            x_offset: self.x_offset * factor,
            y_offset: self.y_offset * factor,
        }
    }
}

/// Metrics used when the backend reports nothing for a font.
const FALLBACK_WIDTH: f32 = 8.0;
const FALLBACK_HEIGHT: f32 = 16.0;

/// Per-call metric lookup for one font at one scale.
pub struct MetricsResolver<'a, B: RenderBackend> {
    backend: &'a B,
    font: FontId,
    scale: f32,
}

impl<'a, B: RenderBackend> MetricsResolver<'a, B> {
    pub fn new(backend: &'a B, font: FontId, scale: f32) -> Self {
        Self { backend, font, scale }
    }

    fn fallback_metrics(&self) -> GlyphMetrics {
        GlyphMetrics {
            width: FALLBACK_WIDTH,
            height: FALLBACK_HEIGHT,
            x_advance: FALLBACK_WIDTH,
            y_advance: FALLBACK_HEIGHT,
            ..Default::default()
        }
    }

    fn default_metrics(&self) -> GlyphMetrics {
        self.backend
            .default_metrics(self.font)
            .unwrap_or_else(|| self.fallback_metrics())
    }

    /// Metrics for a codepoint, scaled.
    ///
    /// Falls back to the font defaults when the backend has no per-glyph
    /// entry.
    pub fn for_codepoint(&self, cp: u16) -> GlyphMetrics {
        let metrics = match self.backend.codepoint_metrics(self.font, cp) {
            Some(m) => m,
            None => {
                tracing::debug!("no metrics for U+{cp:04X}, using font defaults");
                self.default_metrics()
            }
        };
        metrics.scaled(self.scale)
    }

    /// Nominal column pitch: the advance of the ASCII space, scaled.
    pub fn advance_width(&self) -> f32 {
        let space = self
            .backend
            .codepoint_metrics(self.font, 0x20)
            .unwrap_or_else(|| self.default_metrics());
        if space.width > 0.0 {
            space.width * self.scale
        } else {
            self.advance_height()
        }
    }

    /// Nominal row pitch: the font's default height, scaled.
    pub fn advance_height(&self) -> f32 {
        let height = self.default_metrics().height;
        if height > 0.0 {
            height * self.scale
        } else {
            FALLBACK_HEIGHT * self.scale
        }
    }

    /// Width a glyph occupies along a horizontal line.
    ///
    /// Prefers the x-advance, then the box width, then the backend's
    /// fallback measurement.
    pub fn char_width(&self, cp: u16) -> f32 {
        if cp == b'\n' as u16 {
            return 0.0;
        }
        let metrics = self.for_codepoint(cp);
        if metrics.x_advance > 0.0 {
            return metrics.x_advance;
        }
        if metrics.width > 0.0 {
            return metrics.width;
        }
        let measured = self.backend.measure_glyph(self.font, cp, self.scale);
        if measured > 0.0 {
            measured
        } else {
            self.advance_width()
        }
    }

    /// Height a glyph occupies along a vertical column.
    pub fn char_height(&self, cp: u16) -> f32 {
        if cp == b'\n' as u16 {
            return 0.0;
        }
        let metrics = self.for_codepoint(cp);
        if metrics.y_advance > 0.0 {
            return metrics.y_advance;
        }
        if metrics.height > 0.0 {
            return metrics.height;
        }
        self.advance_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::GlyphPaint;
    use crate::style::Color;

    /// Backend with no fonts and no metrics at all.
    struct EmptyBackend;

    impl RenderBackend for EmptyBackend {
        type Buffer = ();

        fn has_font(&self, _font: FontId) -> bool {
            true
        }
        fn default_metrics(&self, _font: FontId) -> Option<GlyphMetrics> {
            None
        }
        fn codepoint_metrics(&self, _font: FontId, _cp: u16) -> Option<GlyphMetrics> {
            None
        }
        fn measure_glyph(&self, _font: FontId, _cp: u16, _scale: f32) -> f32 {
            0.0
        }
        fn draw_glyph(&mut self, _cp: u16, _x: f32, _y: f32, _paint: &GlyphPaint) {}
        fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32, _color: Color) {}
        fn create_buffer(&mut self, _w: u32, _h: u32) -> Option<()> {
            None
        }
        fn fill_buffer(&mut self, _buffer: &mut (), _color: Option<Color>) {}
        fn draw_glyph_in_buffer(
            &mut self,
            _buffer: &mut (),
            _cp: u16,
            _x: f32,
            _y: f32,
            _paint: &GlyphPaint,
        ) {
        }
        fn composite_rotated(&mut self, _buffer: &(), _cx: f32, _cy: f32, _degrees: f32) {}
        fn release_buffer(&mut self, _buffer: ()) {}
    }

    #[test]
    fn test_documented_defaults_without_metrics() {
        let backend = EmptyBackend;
        let resolver = MetricsResolver::new(&backend, FontId(0), 2.0);
        let m = resolver.for_codepoint(b'x' as u16);
        assert_eq!(m.width, 16.0); // 8 * scale
        assert_eq!(m.height, 32.0); // 16 * scale
        assert_eq!(resolver.advance_height(), 32.0);
    }

    #[test]
    fn test_newline_has_no_extent() {
        let backend = EmptyBackend;
        let resolver = MetricsResolver::new(&backend, FontId(0), 1.0);
        assert_eq!(resolver.char_width(b'\n' as u16), 0.0);
        assert_eq!(resolver.char_height(b'\n' as u16), 0.0);
    }
}
