//! Layout primitives for the factura engine.
//!
//! Layout decisions are kept separate from drawing: everything here
//! produces abstract, positioned draw instructions
//! ([`PositionedElement`]) that a renderer backend consumes later. The
//! crate owns the line-item table layout engine, which paginates rows
//! into [`PageFragment`]s without ever splitting a row across pages.

use thiserror::Error;

pub mod elements;
pub mod table;
pub mod util;

pub use elements::{
    DrawElement, ImageElement, Page, PositionedElement, RuleElement, SharedData, TextElement,
    TextStyle,
};
pub use table::{PageFragment, TableLayout};

pub use factura_types::{GeometryError, PageGeometry, Rect};

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Invalid page geometry: {0}")]
    Geometry(#[from] GeometryError),
}
