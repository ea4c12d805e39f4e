//! The input contract of one generation call.

use factura_doc::policy::DocumentPolicy;
use factura_doc::{DocumentHeader, IssuerIdentity, LineItem, RecipientIdentity};

/// Everything needed to generate one document, owned by the call. Each
/// request is independent; nothing is cached or shared between
/// generations.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    pub header: DocumentHeader,
    pub issuer: IssuerIdentity,
    pub recipient: Option<RecipientIdentity>,
    pub line_items: Vec<LineItem>,
}

impl DocumentRequest {
    pub fn new(
        header: DocumentHeader,
        issuer: IssuerIdentity,
        recipient: Option<RecipientIdentity>,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self { header, issuer, recipient, line_items }
    }

    /// Output file name per the document-type policy convention,
    /// e.g. `Facture_42.pdf`.
    pub fn file_name(&self) -> String {
        let policy = DocumentPolicy::for_kind(self.header.kind);
        format!("{}_{}.pdf", policy.file_stem, self.header.id)
    }
}
