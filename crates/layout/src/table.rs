//! Line-item table layout.
//!
//! `TableLayout` places an ordered sequence of line items into one or
//! more [`PageFragment`]s under a fixed row height. When a row would
//! cross the usable bottom of the page the current fragment is closed,
//! a new one is opened at the top margin, and the column header row is
//! re-emitted before rows continue. Rows are never split; input order is
//! preserved; an empty item list still yields a header plus one
//! explanatory row so the table region is never silently blank.

use crate::elements::{PositionedElement, TextStyle};
use crate::util::{approx_text_width, truncate_with_ellipsis};
use crate::LayoutError;
use factura_doc::policy::{ColumnAlign, ColumnSpec, DocumentPolicy};
use factura_doc::totals::round2;
use factura_doc::LineItem;
use factura_types::PageGeometry;
use rust_decimal::Decimal;

/// Character budget for the description column.
pub const DESCRIPTION_BUDGET: usize = 24;

/// Row shown instead of an empty table.
pub const NO_ITEMS_LABEL: &str = "Aucun article disponible";

const CELL_PADDING: f32 = 4.0;

/// One physical page's worth of table rows.
#[derive(Debug, Clone)]
pub struct PageFragment {
    pub elements: Vec<PositionedElement>,
    /// Number of data rows placed on this fragment (header row excluded).
    pub row_count: usize,
    /// Top-origin y cursor just below the closing rule, where the
    /// composer may continue placing content.
    pub end_y: f32,
}

/// Layout engine for the line-item table of one document.
#[derive(Debug)]
pub struct TableLayout {
    geometry: PageGeometry,
    columns: Vec<ColumnSpec>,
    itemizes_tax: bool,
    tax_rate_percent: Decimal,
}

impl TableLayout {
    /// Validates the geometry up front; a degenerate geometry is a
    /// configuration error reported before any layout begins.
    pub fn new(
        geometry: PageGeometry,
        policy: &DocumentPolicy,
        tax_rate_percent: Decimal,
    ) -> Result<Self, LayoutError> {
        geometry.validate()?;
        Ok(Self {
            geometry,
            columns: policy.columns.clone(),
            itemizes_tax: policy.itemizes_tax,
            tax_rate_percent,
        })
    }

    /// Lays out `items` starting at `first_page_start_y` on the first
    /// fragment. Continuation fragments start at the top margin.
    pub fn layout(&self, items: &[LineItem], first_page_start_y: f32) -> Vec<PageFragment> {
        let geo = &self.geometry;
        let edges = self.column_edges();
        let mut fragments = Vec::new();
        let mut elements = Vec::new();
        let mut row_count = 0usize;
        let mut y = first_page_start_y.max(geo.margin);

        self.emit_header_row(&mut elements, &edges, y);
        y += geo.row_height;

        if items.is_empty() {
            self.emit_placeholder_row(&mut elements, &edges, y);
            y += geo.row_height;
        }

        for item in items {
            if y + geo.row_height > geo.usable_bottom() {
                elements.push(self.closing_rule(y));
                fragments.push(PageFragment { elements, row_count, end_y: y });
                elements = Vec::new();
                row_count = 0;
                y = geo.margin;
                self.emit_header_row(&mut elements, &edges, y);
                y += geo.row_height;
            }
            self.emit_item_row(&mut elements, &edges, y, item);
            row_count += 1;
            y += geo.row_height;
        }

        elements.push(self.closing_rule(y));
        fragments.push(PageFragment { elements, row_count, end_y: y });
        fragments
    }

    /// X coordinates of the column boundaries, outer edges included.
    fn column_edges(&self) -> Vec<f32> {
        let mut edges = Vec::with_capacity(self.columns.len() + 1);
        let mut x = self.geometry.margin;
        edges.push(x);
        for col in &self.columns {
            x += col.relative_width * self.geometry.content_width();
            edges.push(x);
        }
        edges
    }

    fn closing_rule(&self, y: f32) -> PositionedElement {
        PositionedElement::rule(self.geometry.margin, y, self.geometry.content_width(), 0.0)
    }

    fn emit_separators(&self, out: &mut Vec<PositionedElement>, edges: &[f32], y: f32) {
        // One horizontal rule above the row, vertical rules at every
        // column boundary.
        out.push(PositionedElement::rule(
            self.geometry.margin,
            y,
            self.geometry.content_width(),
            0.0,
        ));
        for &x in edges {
            out.push(PositionedElement::rule(x, y, 0.0, self.geometry.row_height));
        }
    }

    fn emit_cell(
        &self,
        out: &mut Vec<PositionedElement>,
        edges: &[f32],
        index: usize,
        y: f32,
        content: &str,
        align: ColumnAlign,
        style: TextStyle,
    ) {
        let slot_width = edges[index + 1] - edges[index] - 2.0 * CELL_PADDING;
        let text_y = y + (self.geometry.row_height - style.font_size * 1.2) * 0.5;
        let x = match align {
            ColumnAlign::Left => edges[index] + CELL_PADDING,
            ColumnAlign::Right => {
                let w = approx_text_width(content, style.font_size).min(slot_width);
                edges[index + 1] - CELL_PADDING - w
            }
        };
        out.push(PositionedElement::text(x, text_y, slot_width, content, style));
    }

    fn emit_header_row(&self, out: &mut Vec<PositionedElement>, edges: &[f32], y: f32) {
        self.emit_separators(out, edges, y);
        let style = TextStyle::bold(10.0);
        for (i, col) in self.columns.iter().enumerate() {
            self.emit_cell(out, edges, i, y, col.label, col.align, style);
        }
    }

    fn emit_placeholder_row(&self, out: &mut Vec<PositionedElement>, edges: &[f32], y: f32) {
        self.emit_separators(out, edges, y);
        self.emit_cell(out, edges, 0, y, NO_ITEMS_LABEL, ColumnAlign::Left, TextStyle::body());
    }

    fn emit_item_row(
        &self,
        out: &mut Vec<PositionedElement>,
        edges: &[f32],
        y: f32,
        item: &LineItem,
    ) {
        self.emit_separators(out, edges, y);
        let style = TextStyle::body();
        let cells = self.item_cells(item);
        for (i, (content, align)) in cells.iter().enumerate() {
            self.emit_cell(out, edges, i, y, content, *align, style);
        }
    }

    /// Cell contents for one item, matching the policy's column set.
    fn item_cells(&self, item: &LineItem) -> Vec<(String, ColumnAlign)> {
        let description =
            truncate_with_ellipsis(&item.description, DESCRIPTION_BUDGET);
        let mut cells = vec![
            (description, ColumnAlign::Left),
            (item.quantity.to_string(), ColumnAlign::Right),
            (format!("{:.2}", item.unit_price), ColumnAlign::Right),
        ];
        if self.itemizes_tax {
            let line_tax = round2(item.line_total * self.tax_rate_percent / Decimal::from(100));
            cells.push((format!("{line_tax:.2}"), ColumnAlign::Right));
            cells.push((format!("{:.2}", item.line_total + line_tax), ColumnAlign::Right));
        } else {
            cells.push((format!("{:.2}", item.line_total), ColumnAlign::Right));
        }
        debug_assert_eq!(cells.len(), self.columns.len());
        cells
    }
}
