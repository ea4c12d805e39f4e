use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Row height of {0:.2}pt is not positive.")]
    NonPositiveRowHeight(f32),
    #[error("Usable page extent of {usable:.2}pt cannot fit a single row of {row_height:.2}pt.")]
    PageTooSmall { usable: f32, row_height: f32 },
    #[error("Margins of {margin:.2}pt leave no usable area on a {width:.2}x{height:.2}pt page.")]
    MarginsExceedPage { margin: f32, width: f32, height: f32 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Fixed page geometry for one render call. Coordinates are in PDF points
/// with the origin at the top-left corner; the renderer backend flips to
/// the PDF bottom-left convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub row_height: f32,
}

impl PageGeometry {
    pub fn new(page_width: f32, page_height: f32, margin: f32, row_height: f32) -> Self {
        Self { page_width, page_height, margin, row_height }
    }

    /// A4 portrait with the default margins and table row height.
    pub fn a4() -> Self {
        Self { page_width: 595.0, page_height: 842.0, margin: 40.0, row_height: 25.0 }
    }

    /// Width available to content between the left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// The lowest y coordinate content may occupy.
    pub fn usable_bottom(&self) -> f32 {
        self.page_height - self.margin
    }

    /// Vertical extent available to content.
    pub fn usable_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    /// Checks the geometry before any layout begins. A degenerate geometry
    /// is a caller configuration fault, never a layout-time panic.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if self.row_height <= 0.0 {
            return Err(GeometryError::NonPositiveRowHeight(self.row_height));
        }
        if self.content_width() <= 0.0 || self.usable_height() <= 0.0 {
            return Err(GeometryError::MarginsExceedPage {
                margin: self.margin,
                width: self.page_width,
                height: self.page_height,
            });
        }
        if self.usable_height() < self.row_height {
            return Err(GeometryError::PageTooSmall {
                usable: self.usable_height(),
                row_height: self.row_height,
            });
        }
        Ok(())
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}
