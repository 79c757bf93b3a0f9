//! Rendering backend abstraction
//!
//! The layout engine is generic over a [`RenderBackend`]: a synchronous
//! surface that can report font metrics, draw upright glyphs, and composite
//! a rotated offscreen buffer. The reference implementation in
//! [`skia`](crate::backend::skia) is backed by `ttf-parser` and `tiny-skia`.

pub mod skia;

pub use skia::SkiaBackend;

use crate::metrics::GlyphMetrics;
use crate::style::Color;

/// Handle for a font registered with a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub usize);

/// Per-call drawing state handed to the backend with every glyph.
///
/// Replaces the bound font/color/size state of stateful graphics surfaces;
/// the backend holds no drawing state between calls.
#[derive(Debug, Clone, Copy)]
pub struct GlyphPaint {
    pub font: FontId,
    pub color: Color,
    /// `None` draws over whatever is already on the surface
    pub background: Option<Color>,
    pub scale: f32,
}

/// Font metrics and pixel output capability consumed by the layout engine.
///
/// All calls are synchronous; no method may block or suspend.
pub trait RenderBackend {
    /// Offscreen composition buffer for the rotation path.
    type Buffer;

    /// Whether `font` refers to a registered font.
    fn has_font(&self, font: FontId) -> bool;

    /// Baseline metrics for a font, in font-native units.
    fn default_metrics(&self, font: FontId) -> Option<GlyphMetrics>;

    /// Per-codepoint metric override, in font-native units.
    ///
    /// `None` signals "use the default metrics".
    fn codepoint_metrics(&self, font: FontId, cp: u16) -> Option<GlyphMetrics>;

    /// Fallback width measurement for a glyph, already scaled.
    fn measure_glyph(&self, font: FontId, cp: u16, scale: f32) -> f32;

    /// Draw a glyph upright with its cell's top-left corner at `(x, y)`.
    fn draw_glyph(&mut self, cp: u16, x: f32, y: f32, paint: &GlyphPaint);

    /// Fill an axis-aligned rectangle on the target surface.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Acquire an offscreen buffer; `None` on allocation failure.
    fn create_buffer(&mut self, width: u32, height: u32) -> Option<Self::Buffer>;

    /// Fill a buffer with a color, or clear it to transparent.
    fn fill_buffer(&mut self, buffer: &mut Self::Buffer, color: Option<Color>);

    /// Draw a glyph upright into an offscreen buffer.
    fn draw_glyph_in_buffer(
        &mut self,
        buffer: &mut Self::Buffer,
        cp: u16,
        x: f32,
        y: f32,
        paint: &GlyphPaint,
    );

    /// Composite a buffer onto the target surface, rotated about its own
    /// center, with that center landing at `(center_x, center_y)`.
    fn composite_rotated(
        &mut self,
        buffer: &Self::Buffer,
        center_x: f32,
        center_y: f32,
        degrees: f32,
    );

    /// Release an offscreen buffer.
    fn release_buffer(&mut self, buffer: Self::Buffer);
}

/// Scoped offscreen buffer, released on every exit path.
///
/// Holds the backend exclusively for its lifetime; one rotated glyph uses
/// one acquisition.
pub struct ScopedBuffer<'a, B: RenderBackend> {
    backend: &'a mut B,
    buffer: Option<B::Buffer>,
}

impl<'a, B: RenderBackend> ScopedBuffer<'a, B> {
    /// Acquire a buffer of the given size; `None` on allocation failure.
    pub fn acquire(backend: &'a mut B, width: u32, height: u32) -> Option<Self> {
        let buffer = backend.create_buffer(width, height)?;
        Some(Self {
            backend,
            buffer: Some(buffer),
        })
    }

    /// Fill with a color, or clear to transparent.
    pub fn fill(&mut self, color: Option<Color>) {
        if let Some(buffer) = self.buffer.as_mut() {
            self.backend.fill_buffer(buffer, color);
        }
    }

    /// Draw a glyph upright into the buffer.
    pub fn draw_glyph(&mut self, cp: u16, x: f32, y: f32, paint: &GlyphPaint) {
        if let Some(buffer) = self.buffer.as_mut() {
            self.backend.draw_glyph_in_buffer(buffer, cp, x, y, paint);
        }
    }

    /// Composite the buffer rotated about its center onto the target.
    pub fn composite_rotated(&mut self, center_x: f32, center_y: f32, degrees: f32) {
        if let Some(buffer) = self.buffer.as_ref() {
            self.backend.composite_rotated(buffer, center_x, center_y, degrees);
        }
    }
}

impl<B: RenderBackend> Drop for ScopedBuffer<'_, B> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.backend.release_buffer(buffer);
        }
    }
}
