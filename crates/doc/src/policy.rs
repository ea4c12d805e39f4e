//! Per-document-type display semantics.
//!
//! A `DocumentPolicy` is a static lookup from the configured document
//! kind to its title text, whether tax is itemized, the table column
//! set and the output file-name stem. Unrecognized kind identifiers
//! fail closed to the invoice policy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    Invoice,
    DeliveryNote,
    Quote,
}

impl DocumentKind {
    /// Resolves a configured identifier, case-insensitively. Anything
    /// unrecognized falls back to `Invoice`.
    pub fn from_identifier(ident: &str) -> Self {
        match ident.trim().to_ascii_lowercase().as_str() {
            "delivery_note" | "delivery-note" | "bon_de_livraison" | "bl" => {
                DocumentKind::DeliveryNote
            }
            "quote" | "devis" => DocumentKind::Quote,
            _ => DocumentKind::Invoice,
        }
    }
}

/// Horizontal anchoring of a cell within its column slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Right,
}

/// One column of the line-item table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub label: &'static str,
    /// Fraction of the content width, all fractions summing to 1.
    pub relative_width: f32,
    pub align: ColumnAlign,
}

impl ColumnSpec {
    const fn new(label: &'static str, relative_width: f32, align: ColumnAlign) -> Self {
        Self { label, relative_width, align }
    }
}

/// Display semantics for one document kind.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPolicy {
    pub kind: DocumentKind,
    pub title: &'static str,
    pub itemizes_tax: bool,
    pub columns: Vec<ColumnSpec>,
    pub file_stem: &'static str,
}

impl DocumentPolicy {
    pub fn for_kind(kind: DocumentKind) -> Self {
        match kind {
            DocumentKind::Invoice => Self {
                kind,
                title: "FACTURE",
                itemizes_tax: true,
                columns: itemizing_columns(),
                file_stem: "Facture",
            },
            DocumentKind::DeliveryNote => Self {
                kind,
                title: "BON DE LIVRAISON",
                itemizes_tax: false,
                columns: plain_columns(),
                file_stem: "BonLivraison",
            },
            DocumentKind::Quote => Self {
                kind,
                title: "DEVIS",
                itemizes_tax: true,
                columns: itemizing_columns(),
                file_stem: "Devis",
            },
        }
    }

    /// Resolves a raw identifier straight to its policy.
    pub fn from_identifier(ident: &str) -> Self {
        Self::for_kind(DocumentKind::from_identifier(ident))
    }
}

fn itemizing_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Désignation", 0.40, ColumnAlign::Left),
        ColumnSpec::new("Qté", 0.10, ColumnAlign::Right),
        ColumnSpec::new("P.U.", 0.16, ColumnAlign::Right),
        ColumnSpec::new("TVA", 0.14, ColumnAlign::Right),
        ColumnSpec::new("Total TTC", 0.20, ColumnAlign::Right),
    ]
}

fn plain_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Désignation", 0.46, ColumnAlign::Left),
        ColumnSpec::new("Qté", 0.12, ColumnAlign::Right),
        ColumnSpec::new("P.U.", 0.18, ColumnAlign::Right),
        ColumnSpec::new("Total HT", 0.24, ColumnAlign::Right),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_identifier_falls_back_to_invoice() {
        let policy = DocumentPolicy::from_identifier("reçu");
        assert_eq!(policy.kind, DocumentKind::Invoice);
        assert_eq!(policy.title, "FACTURE");
        assert!(policy.itemizes_tax);
    }

    #[test]
    fn identifiers_resolve_case_insensitively() {
        assert_eq!(DocumentKind::from_identifier("DELIVERY_NOTE"), DocumentKind::DeliveryNote);
        assert_eq!(DocumentKind::from_identifier("Devis"), DocumentKind::Quote);
        assert_eq!(DocumentKind::from_identifier("invoice"), DocumentKind::Invoice);
        assert_eq!(DocumentKind::from_identifier(" bl "), DocumentKind::DeliveryNote);
    }

    #[test]
    fn invoice_has_five_columns_delivery_note_four() {
        assert_eq!(DocumentPolicy::for_kind(DocumentKind::Invoice).columns.len(), 5);
        let bl = DocumentPolicy::for_kind(DocumentKind::DeliveryNote);
        assert_eq!(bl.columns.len(), 4);
        assert!(!bl.itemizes_tax);
        assert_eq!(bl.title, "BON DE LIVRAISON");
    }

    #[test]
    fn column_widths_sum_to_one() {
        for kind in [DocumentKind::Invoice, DocumentKind::DeliveryNote, DocumentKind::Quote] {
            let total: f32 = DocumentPolicy::for_kind(kind)
                .columns
                .iter()
                .map(|c| c.relative_width)
                .sum();
            assert!((total - 1.0).abs() < 1e-6, "{kind:?} widths sum to {total}");
        }
    }

    #[test]
    fn file_stems_differ_per_kind() {
        assert_eq!(DocumentPolicy::for_kind(DocumentKind::Invoice).file_stem, "Facture");
        assert_eq!(DocumentPolicy::for_kind(DocumentKind::DeliveryNote).file_stem, "BonLivraison");
        assert_eq!(DocumentPolicy::for_kind(DocumentKind::Quote).file_stem, "Devis");
    }
}
