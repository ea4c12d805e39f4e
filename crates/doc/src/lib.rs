//! Document data model for the factura engine.
//!
//! This crate defines the in-memory representation of one billable
//! document before layout: the header, the issuer and recipient
//! identities, the line items, the per-document-type policy table and
//! the money/tax calculator. Everything here is plain data supplied by
//! the surrounding application; the crate performs no I/O.

pub mod model;
pub mod policy;
pub mod totals;

pub use model::{
    DocumentHeader, DocumentStatus, IssuerIdentity, LineItem, RecipientIdentity, Registrations,
};
pub use policy::{ColumnAlign, ColumnSpec, DocumentKind, DocumentPolicy};
pub use totals::{Totals, compute_totals, round2};
