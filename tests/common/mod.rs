use factura::{
    DocumentHeader, DocumentKind, DocumentRequest, DocumentStatus, IssuerIdentity, LineItem,
    RecipientIdentity,
};
use lopdf::Document as LopdfDocument;
use rust_decimal::Decimal;
use std::str::FromStr;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods.
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }
}

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub fn sample_issuer() -> IssuerIdentity {
    let mut issuer = IssuerIdentity::new(
        "Atelier Benani",
        "12 rue des Orangers, Casablanca",
        "+212 5 22 00 00 00",
        "contact@atelier-benani.ma",
        Decimal::from(20),
    );
    issuer.bank_account = Some("007 810 0001234567890123 45".to_string());
    issuer
}

pub fn sample_items(count: usize) -> Vec<LineItem> {
    (1..=count)
        .map(|i| LineItem::new(format!("Article {i}"), i as u32, dec("19.99")))
        .collect()
}

pub fn sample_request(kind: DocumentKind, id: i64, items: Vec<LineItem>) -> DocumentRequest {
    let header = DocumentHeader {
        id,
        issued_at: 1_700_000_000,
        status: DocumentStatus::Pending,
        kind,
    };
    DocumentRequest::new(
        header,
        sample_issuer(),
        Some(RecipientIdentity::named("Client Retail SARL")),
        items,
    )
}
