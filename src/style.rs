//! Text style configuration
//!
//! Owned by the caller and immutable for the duration of one layout call.

use crate::backend::FontId;

/// Writing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    /// Left-to-right, lines top-to-bottom
    #[default]
    Horizontal,
    /// Top-to-bottom, columns right-to-left
    Vertical,
}

/// Alignment along the writing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

/// Whether a font carries vertical presentation forms.
///
/// Supplied by the caller when binding the font. Builtin bitmap fonts lack
/// the U+FE10..FE4F range, so special characters route through the rotation
/// path for them instead of through substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontKind {
    #[default]
    Builtin,
    Custom,
}

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Style configuration for one layout call.
///
/// Plain data, freely mutated by the caller between calls. The engine holds
/// no state of its own across calls.
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub direction: TextDirection,
    pub align: TextAlign,
    /// Top-left corner of the drawing area
    pub origin: (f32, f32),
    /// Width and height of the drawing area
    pub area: (f32, f32),
    pub color: Color,
    pub background: Color,
    /// Draw glyphs without filling their background cell
    pub transparent_background: bool,
    pub font: Option<FontId>,
    pub font_kind: FontKind,
    /// Scale factor applied to font-native metrics
    pub font_scale: f32,
    /// Extra distance between lines (horizontal) or columns (vertical)
    pub line_spacing: f32,
    /// Extra distance between characters along the writing direction
    pub char_spacing: f32,
    /// Break lines/columns at the area edge
    pub wrap: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            direction: TextDirection::Horizontal,
            align: TextAlign::Start,
            origin: (0.0, 0.0),
            area: (0.0, 0.0),
            color: Color::WHITE,
            background: Color::BLACK,
            transparent_background: true,
            font: None,
            font_kind: FontKind::Builtin,
            font_scale: 1.0,
            line_spacing: 4.0,
            char_spacing: 2.0,
            wrap: true,
        }
    }
}

impl TextStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set writing direction
    pub fn direction(mut self, direction: TextDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set alignment along the writing direction
    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Set the top-left corner of the drawing area
    pub fn origin(mut self, x: f32, y: f32) -> Self {
        self.origin = (x, y);
        self
    }

    /// Set the drawing area size
    pub fn area(mut self, width: f32, height: f32) -> Self {
        self.area = (width, height);
        self
    }

    /// Bind a font together with its kind
    pub fn font(mut self, font: FontId, kind: FontKind) -> Self {
        self.font = Some(font);
        self.font_kind = kind;
        self
    }

    /// Set the font scale factor
    pub fn font_scale(mut self, scale: f32) -> Self {
        self.font_scale = scale;
        self
    }

    /// Set text color
    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self.transparent_background = true;
        self
    }

    /// Set text color over an opaque background
    pub fn color_on(mut self, color: Color, background: Color) -> Self {
        self.color = color;
        self.background = background;
        self.transparent_background = false;
        self
    }

    /// Set line/column spacing
    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Set character spacing
    pub fn char_spacing(mut self, spacing: f32) -> Self {
        self.char_spacing = spacing;
        self
    }

    /// Enable or disable wrapping
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let style = TextStyle::new()
            .direction(TextDirection::Vertical)
            .origin(10.0, 20.0)
            .area(100.0, 200.0)
            .wrap(false);
        assert_eq!(style.direction, TextDirection::Vertical);
        assert_eq!(style.origin, (10.0, 20.0));
        assert_eq!(style.area, (100.0, 200.0));
        assert!(!style.wrap);
    }

    #[test]
    fn test_color_on_clears_transparency() {
        let style = TextStyle::new().color_on(Color::WHITE, Color::BLACK);
        assert!(!style.transparent_background);
        let style = style.color(Color::WHITE);
        assert!(style.transparent_background);
    }
}
