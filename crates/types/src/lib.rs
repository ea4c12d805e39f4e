pub mod geometry;

pub use geometry::{GeometryError, PageGeometry, Rect};
