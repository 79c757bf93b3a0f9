//! tategaki - CJK-aware Text Layout Engine
//!
//! This crate converts a UTF-8 string plus a style configuration into
//! positioned glyph-draw operations:
//! - Horizontal (left-to-right) and vertical (columns right-to-left) layout
//! - Line/column wrapping against a bounding area
//! - CJK punctuation and bracket repositioning via vertical presentation forms
//! - 90° glyph rotation for Latin text embedded in vertical CJK
//! - Measurement (dry-run) mode sharing the exact geometry of the draw pass
//!
//! The pixel backend is pluggable through [`RenderBackend`]; a reference
//! implementation backed by `ttf-parser` and `tiny-skia` lives in
//! [`backend::skia`].

pub mod backend;
pub mod classify;
pub mod codec;
pub mod compositor;
pub mod engine;
pub mod layout;
pub mod metrics;
pub mod style;

pub use backend::{FontId, GlyphPaint, RenderBackend, ScopedBuffer, SkiaBackend};
pub use classify::CharCategory;
pub use codec::{Codepoints, Utf8Bytes};
pub use engine::TextRenderer;
pub use layout::{GlyphPlacement, TextExtent};
pub use metrics::{GlyphMetrics, MetricsResolver};
pub use style::{Color, FontKind, TextAlign, TextDirection, TextStyle};

/// Text layout error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("no font bound to style")]
    NoFontBound,

    #[error("unknown font: {0:?}")]
    UnknownFont(FontId),

    #[error("failed to parse font: {0}")]
    FontParsing(String),
}

pub type Result<T> = std::result::Result<T, TextError>;
