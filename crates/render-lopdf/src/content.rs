//! Translation of draw instructions into PDF content-stream operators.

use factura_layout::{DrawElement, PositionedElement, TextStyle};
use factura_render_core::flip_y;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

const BODY_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

/// Builds one page's content stream, tracking graphics state so font
/// selections are only re-emitted when they change.
pub struct PageBuilder {
    page_height: f32,
    content: Content,
    current_font: Option<(&'static str, f32)>,
}

impl PageBuilder {
    pub fn new(page_height: f32) -> Self {
        Self { page_height, content: Content { operations: vec![] }, current_font: None }
    }

    pub fn finish(self) -> Content {
        self.content
    }

    pub fn draw_text(&mut self, el: &PositionedElement, content: &str, style: TextStyle) {
        if content.trim().is_empty() {
            return;
        }
        self.content.operations.push(Operation::new("BT", vec![]));
        self.set_font(style);
        let baseline_y = el.y + style.font_size * 0.8;
        let pdf_y = flip_y(baseline_y, self.page_height);
        self.content
            .operations
            .push(Operation::new("Td", vec![el.x.into(), pdf_y.into()]));
        self.content.operations.push(Operation::new(
            "Tj",
            vec![Object::String(to_win_ansi(content), StringFormat::Literal)],
        ));
        self.content.operations.push(Operation::new("ET", vec![]));
    }

    pub fn draw_rule(&mut self, el: &PositionedElement, thickness: f32) {
        let ops = &mut self.content.operations;
        ops.push(Operation::new("w", vec![thickness.into()]));
        ops.push(Operation::new(
            "m",
            vec![el.x.into(), flip_y(el.y, self.page_height).into()],
        ));
        ops.push(Operation::new(
            "l",
            vec![
                (el.x + el.width).into(),
                flip_y(el.y + el.height, self.page_height).into(),
            ],
        ));
        ops.push(Operation::new("S", vec![]));
    }

    /// Places a previously registered image XObject, scaled to fit the
    /// element's box while preserving the pixel aspect ratio.
    pub fn draw_image(
        &mut self,
        el: &PositionedElement,
        resource_name: &str,
        pixel_width: u32,
        pixel_height: u32,
    ) {
        if pixel_width == 0 || pixel_height == 0 {
            return;
        }
        let scale = (el.width / pixel_width as f32).min(el.height / pixel_height as f32);
        let w = pixel_width as f32 * scale;
        let h = pixel_height as f32 * scale;
        let x = el.x + (el.width - w) / 2.0;
        // The cm matrix anchors the unit image square at its bottom-left.
        let pdf_y = flip_y(el.y + el.height, self.page_height) + (el.height - h) / 2.0;

        let ops = &mut self.content.operations;
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new(
            "cm",
            vec![w.into(), 0.into(), 0.into(), h.into(), x.into(), pdf_y.into()],
        ));
        ops.push(Operation::new(
            "Do",
            vec![Object::Name(resource_name.as_bytes().to_vec())],
        ));
        ops.push(Operation::new("Q", vec![]));
    }

    fn set_font(&mut self, style: TextStyle) {
        let font = if style.bold { BOLD_FONT } else { BODY_FONT };
        if self.current_font != Some((font, style.font_size)) {
            self.content.operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), style.font_size.into()],
            ));
            self.current_font = Some((font, style.font_size));
        }
    }
}

/// Best-effort WinAnsi mapping for the built-in Type1 fonts; characters
/// outside the code page degrade to a question mark.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars().map(|c| if (c as u32) <= 255 { c as u8 } else { b'?' }).collect()
}

/// Dispatches one positioned element to the matching draw routine.
/// Images are handled by the renderer, which must register the XObject
/// first.
pub fn draw_simple(builder: &mut PageBuilder, el: &PositionedElement) {
    match &el.element {
        DrawElement::Text(text) => builder.draw_text(el, &text.content, text.style),
        DrawElement::Rule(rule) => builder.draw_rule(el, rule.thickness),
        DrawElement::Image(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factura_layout::PositionedElement;

    fn ops(content: &Content) -> Vec<&str> {
        content.operations.iter().map(|op| op.operator.as_str()).collect()
    }

    #[test]
    fn text_emits_a_complete_text_object() {
        let mut builder = PageBuilder::new(842.0);
        let el = PositionedElement::text(40.0, 40.0, 100.0, "Total", TextStyle::body());
        draw_simple(&mut builder, &el);
        assert_eq!(ops(&builder.finish()), vec!["BT", "Tf", "Td", "Tj", "ET"]);
    }

    #[test]
    fn font_changes_are_emitted_once_per_run() {
        let mut builder = PageBuilder::new(842.0);
        let a = PositionedElement::text(40.0, 40.0, 100.0, "a", TextStyle::body());
        let b = PositionedElement::text(40.0, 60.0, 100.0, "b", TextStyle::body());
        let c = PositionedElement::text(40.0, 80.0, 100.0, "c", TextStyle::bold(10.0));
        for el in [&a, &b, &c] {
            draw_simple(&mut builder, el);
        }
        let content = builder.finish();
        let tf_count = content.operations.iter().filter(|op| op.operator == "Tf").count();
        assert_eq!(tf_count, 2);
    }

    #[test]
    fn blank_text_is_skipped() {
        let mut builder = PageBuilder::new(842.0);
        let el = PositionedElement::text(40.0, 40.0, 100.0, "   ", TextStyle::body());
        draw_simple(&mut builder, &el);
        assert!(builder.finish().operations.is_empty());
    }

    #[test]
    fn rules_flip_to_pdf_coordinates() {
        let mut builder = PageBuilder::new(842.0);
        let el = PositionedElement::rule(40.0, 100.0, 200.0, 0.0);
        draw_simple(&mut builder, &el);
        let content = builder.finish();
        let m = content.operations.iter().find(|op| op.operator == "m").unwrap();
        assert_eq!(m.operands[1], Object::Real(742.0));
    }

    #[test]
    fn non_latin1_chars_degrade_to_question_marks() {
        assert_eq!(to_win_ansi("prix: 10€"), b"prix: 10?".to_vec());
        assert_eq!(to_win_ansi("Payée"), b"Pay\xe9e".to_vec());
    }
}
