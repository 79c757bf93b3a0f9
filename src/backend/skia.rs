//! Reference backend: ttf-parser metrics + tiny-skia rasterization
//!
//! Fonts are registered as raw TTF/OTF blobs and parsed on demand; metrics
//! are expressed in pixels at the font's registered nominal size, so a style
//! scale of 1.0 renders at that size.

use ttf_parser::{Face, OutlineBuilder};

use super::{FontId, GlyphPaint, RenderBackend};
use crate::metrics::GlyphMetrics;
use crate::style::Color;
use crate::{Result, TextError};

struct LoadedFont {
    data: Vec<u8>,
    face_index: u32,
    /// Pixel size the reported metrics are expressed at
    px_size: f32,
}

/// CPU backend rendering into a [`tiny_skia::Pixmap`].
pub struct SkiaBackend {
    fonts: Vec<LoadedFont>,
    target: tiny_skia::Pixmap,
}

impl SkiaBackend {
    /// Create a backend with a target surface of the given size.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            fonts: Vec::new(),
            target: tiny_skia::Pixmap::new(width, height)?,
        })
    }

    /// Register a font from raw TTF/OTF data at a nominal pixel size.
    pub fn load_font(&mut self, data: Vec<u8>, px_size: f32) -> Result<FontId> {
        if let Err(e) = Face::parse(&data, 0) {
            return Err(TextError::FontParsing(e.to_string()));
        }
        self.fonts.push(LoadedFont {
            data,
            face_index: 0,
            px_size,
        });
        Ok(FontId(self.fonts.len() - 1))
    }

    /// The target surface.
    pub fn pixmap(&self) -> &tiny_skia::Pixmap {
        &self.target
    }

    /// Take the target surface out of the backend.
    pub fn into_pixmap(self) -> tiny_skia::Pixmap {
        self.target
    }

    fn font(&self, font: FontId) -> Option<&LoadedFont> {
        self.fonts.get(font.0)
    }
}

impl RenderBackend for SkiaBackend {
    type Buffer = tiny_skia::Pixmap;

    fn has_font(&self, font: FontId) -> bool {
        font.0 < self.fonts.len()
    }

    fn default_metrics(&self, font: FontId) -> Option<GlyphMetrics> {
        let loaded = self.font(font)?;
        let face = Face::parse(&loaded.data, loaded.face_index).ok()?;
        let units = loaded.px_size / face.units_per_em() as f32;
        let height = (face.ascender() as f32 - face.descender() as f32) * units;
        let width = face
            .glyph_index(' ')
            .and_then(|gid| face.glyph_hor_advance(gid))
            .map(|adv| adv as f32 * units)
            .unwrap_or(height / 2.0);
        Some(GlyphMetrics {
            width,
            height,
            x_advance: width,
            y_advance: height,
            x_offset: 0.0,
            y_offset: 0.0,
        })
    }

    fn codepoint_metrics(&self, font: FontId, cp: u16) -> Option<GlyphMetrics> {
        let loaded = self.font(font)?;
        let face = Face::parse(&loaded.data, loaded.face_index).ok()?;
        let ch = char::from_u32(cp as u32)?;
        let gid = face.glyph_index(ch)?;
        let units = loaded.px_size / face.units_per_em() as f32;
        let height = (face.ascender() as f32 - face.descender() as f32) * units;
        let x_advance = face
            .glyph_hor_advance(gid)
            .map(|adv| adv as f32 * units)
            .unwrap_or(0.0);
        let y_advance = face
            .glyph_ver_advance(gid)
            .map(|adv| adv as f32 * units)
            .unwrap_or(height);
        let bbox = face.glyph_bounding_box(gid);
        Some(GlyphMetrics {
            width: bbox
                .map(|b| (b.x_max - b.x_min) as f32 * units)
                .unwrap_or(x_advance),
            height,
            x_advance,
            y_advance,
            x_offset: bbox.map(|b| b.x_min as f32 * units).unwrap_or(0.0),
            y_offset: 0.0,
        })
    }

    fn measure_glyph(&self, font: FontId, cp: u16, scale: f32) -> f32 {
        self.codepoint_metrics(font, cp)
            .map(|m| m.x_advance * scale)
            .unwrap_or(0.0)
    }

    fn draw_glyph(&mut self, cp: u16, x: f32, y: f32, paint: &GlyphPaint) {
        let Some(loaded) = self.fonts.get(paint.font.0) else {
            return;
        };
        rasterize_glyph(loaded, &mut self.target, cp, x, y, paint);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        let Some(rect) = tiny_skia::Rect::from_xywh(x, y, width, height) else {
            return;
        };
        let mut skia_paint = tiny_skia::Paint::default();
        skia_paint.set_color(to_skia_color(color));
        self.target.fill_rect(
            rect,
            &skia_paint,
            tiny_skia::Transform::identity(),
            None,
        );
    }

    fn create_buffer(&mut self, width: u32, height: u32) -> Option<tiny_skia::Pixmap> {
        tiny_skia::Pixmap::new(width, height)
    }

    fn fill_buffer(&mut self, buffer: &mut tiny_skia::Pixmap, color: Option<Color>) {
        let color = color.unwrap_or(Color::TRANSPARENT);
        buffer.fill(to_skia_color(color));
    }

    fn draw_glyph_in_buffer(
        &mut self,
        buffer: &mut tiny_skia::Pixmap,
        cp: u16,
        x: f32,
        y: f32,
        paint: &GlyphPaint,
    ) {
        let Some(loaded) = self.fonts.get(paint.font.0) else {
            return;
        };
        rasterize_glyph(loaded, buffer, cp, x, y, paint);
    }

    fn composite_rotated(
        &mut self,
        buffer: &tiny_skia::Pixmap,
        center_x: f32,
        center_y: f32,
        degrees: f32,
    ) {
        let half_w = buffer.width() as f32 / 2.0;
        let half_h = buffer.height() as f32 / 2.0;
        // Place the buffer so its center lands on the pivot, then rotate
        // about that pivot.
        let transform = tiny_skia::Transform::from_translate(center_x - half_w, center_y - half_h)
            .post_concat(tiny_skia::Transform::from_rotate_at(
                degrees, center_x, center_y,
            ));
        self.target.draw_pixmap(
            0,
            0,
            buffer.as_ref(),
            &tiny_skia::PixmapPaint::default(),
            transform,
            None,
        );
    }

    fn release_buffer(&mut self, buffer: tiny_skia::Pixmap) {
        drop(buffer);
    }
}

fn to_skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Outline a glyph and fill it into a pixmap with its cell's top-left
/// corner at `(x, y)`.
fn rasterize_glyph(
    font: &LoadedFont,
    pixmap: &mut tiny_skia::Pixmap,
    cp: u16,
    x: f32,
    y: f32,
    paint: &GlyphPaint,
) {
    let Ok(face) = Face::parse(&font.data, font.face_index) else {
        return;
    };
    let Some(ch) = char::from_u32(cp as u32) else {
        return;
    };
    let Some(gid) = face.glyph_index(ch) else {
        tracing::debug!("font has no glyph for U+{cp:04X}");
        return;
    };

    let units = font.px_size / face.units_per_em() as f32 * paint.scale;
    let ascender = face.ascender() as f32;

    if let Some(bg) = paint.background {
        if let Some(adv) = face.glyph_hor_advance(gid) {
            let w = adv as f32 * units;
            let h = (ascender - face.descender() as f32) * units;
            if let Some(rect) = tiny_skia::Rect::from_xywh(x, y, w, h) {
                let mut bg_paint = tiny_skia::Paint::default();
                bg_paint.set_color(to_skia_color(bg));
                pixmap.fill_rect(rect, &bg_paint, tiny_skia::Transform::identity(), None);
            }
        }
    }

    let mut sink = OutlineSink {
        builder: tiny_skia::PathBuilder::new(),
        scale: units,
        ascender,
    };
    if face.outline_glyph(gid, &mut sink).is_none() {
        return; // whitespace or empty outline
    }
    let Some(path) = sink.builder.finish() else {
        return;
    };

    let mut fill = tiny_skia::Paint::default();
    fill.set_color(to_skia_color(paint.color));
    fill.anti_alias = true;

    pixmap.fill_path(
        &path,
        &fill,
        tiny_skia::FillRule::Winding,
        tiny_skia::Transform::from_translate(x, y),
        None,
    );
}

/// Converts ttf-parser outlines to a tiny-skia path in cell-local pixels.
struct OutlineSink {
    builder: tiny_skia::PathBuilder,
    scale: f32,
    ascender: f32,
}

impl OutlineSink {
    fn tx(&self, x: f32) -> f32 {
        x * self.scale
    }

    fn ty(&self, y: f32) -> f32 {
        (self.ascender - y) * self.scale // flip Y axis
    }
}

impl OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(self.tx(x), self.ty(y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(self.tx(x), self.ty(y));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder
            .quad_to(self.tx(x1), self.ty(y1), self.tx(x), self.ty(y));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(
            self.tx(x1),
            self.ty(y1),
            self.tx(x2),
            self.ty(y2),
            self.tx(x),
            self.ty(y),
        );
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_font_rejected() {
        let backend = SkiaBackend::new(32, 32).unwrap();
        assert!(!backend.has_font(FontId(0)));
        assert!(backend.default_metrics(FontId(0)).is_none());
    }

    #[test]
    fn test_bad_font_data_rejected() {
        let mut backend = SkiaBackend::new(32, 32).unwrap();
        assert!(backend.load_font(vec![0, 1, 2, 3], 16.0).is_err());
    }

    #[test]
    fn test_fill_rect_writes_pixels() {
        let mut backend = SkiaBackend::new(8, 8).unwrap();
        backend.fill_rect(0.0, 0.0, 8.0, 8.0, Color::WHITE);
        let px = backend.pixmap().pixel(4, 4).unwrap();
        assert_eq!(px.red(), 255);
    }

    #[test]
    fn test_rotated_composite_lands_at_pivot() {
        let mut backend = SkiaBackend::new(16, 16).unwrap();
        let mut buffer = backend.create_buffer(4, 4).unwrap();
        backend.fill_buffer(&mut buffer, Some(Color::WHITE));
        backend.composite_rotated(&buffer, 8.0, 8.0, 90.0);
        backend.release_buffer(buffer);
        // The buffer center maps onto the pivot regardless of rotation.
        let px = backend.pixmap().pixel(8, 8).unwrap();
        assert_eq!(px.red(), 255);
    }
}
