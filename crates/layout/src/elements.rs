//! Positioned draw instructions.
//!
//! A page is simply an ordered list of these instructions. Coordinates
//! are top-left origin in PDF points; the renderer backend flips them.

use std::sync::Arc;

/// Reference-counted container for shared, immutable data like images.
pub type SharedData = Arc<Vec<u8>>;

/// One page of a composed document, consumed exactly once by a renderer.
pub type Page = Vec<PositionedElement>;

/// A single drawable item with its absolute position and extent.
#[derive(Clone, Debug, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: DrawElement,
}

impl PositionedElement {
    pub fn text(x: f32, y: f32, width: f32, content: impl Into<String>, style: TextStyle) -> Self {
        let height = style.font_size * 1.2;
        Self {
            x,
            y,
            width,
            height,
            element: DrawElement::Text(TextElement { content: content.into(), style }),
        }
    }

    /// A straight rule from `(x, y)` to `(x + width, y + height)`.
    pub fn rule(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height, element: DrawElement::Rule(RuleElement { thickness: 0.5 }) }
    }

    pub fn image(rect: factura_types::Rect, data: SharedData) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            element: DrawElement::Image(ImageElement { data }),
        }
    }
}

/// The different kinds of drawable elements.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawElement {
    Text(TextElement),
    Rule(RuleElement),
    Image(ImageElement),
}

impl std::fmt::Display for DrawElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawElement::Text(t) => write!(f, "Text(\"{}\")", t.content),
            DrawElement::Rule(_) => write!(f, "Rule"),
            DrawElement::Image(i) => write!(f, "Image({} bytes)", i.data.len()),
        }
    }
}

/// A run of text. Content never contains newlines; wrapping is decided
/// before instructions are emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub style: TextStyle,
}

/// A straight separator or border line.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleElement {
    pub thickness: f32,
}

/// Image bytes to be embedded at the element's bounding box.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageElement {
    pub data: SharedData,
}

/// Minimal text styling; the engine renders with the built-in Helvetica
/// faces only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub bold: bool,
}

impl TextStyle {
    pub const fn body() -> Self {
        Self { font_size: 10.0, bold: false }
    }

    pub const fn bold(font_size: f32) -> Self {
        Self { font_size, bold: true }
    }

    pub const fn sized(font_size: f32) -> Self {
        Self { font_size, bold: false }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::body()
    }
}
