//! Core document entities.
//!
//! All monetary values are `rust_decimal::Decimal`; line totals are
//! always recomputed from quantity and unit price, never trusted from
//! the caller, so the displayed table can never drift from the summed
//! totals.

use crate::totals::round2;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fallback label for persistence rows whose description is missing.
pub const UNNAMED_ITEM_LABEL: &str = "Article";

/// One billable row of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    /// Always `round2(quantity * unit_price)`, maintained by the
    /// constructors below.
    pub line_total: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        let line_total = round2(Decimal::from(quantity) * unit_price);
        Self { description: description.into(), quantity, unit_price, line_total }
    }

    /// Builds a line item from a persistence-shaped record. The stored
    /// line total is discarded and recomputed; a missing description
    /// falls back to a neutral label.
    pub fn from_record(
        description: Option<String>,
        quantity: u32,
        unit_price: Decimal,
        _stored_total: Option<Decimal>,
    ) -> Self {
        let description = description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_ITEM_LABEL.to_string());
        Self::new(description, quantity, unit_price)
    }
}

/// Optional registration identifiers printed in the issuer header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registrations {
    pub tax_id: Option<String>,
    pub commerce_registry: Option<String>,
    pub patente: Option<String>,
    pub cnss: Option<String>,
}

impl Registrations {
    /// Label/value pairs for the fields that are present, in display order.
    pub fn present(&self) -> Vec<(&'static str, &str)> {
        let mut out = Vec::new();
        if let Some(v) = self.tax_id.as_deref() {
            out.push(("IF", v));
        }
        if let Some(v) = self.commerce_registry.as_deref() {
            out.push(("RC", v));
        }
        if let Some(v) = self.patente.as_deref() {
            out.push(("Patente", v));
        }
        if let Some(v) = self.cnss.as_deref() {
            out.push(("CNSS", v));
        }
        out
    }
}

/// Immutable snapshot of the business issuing the document, taken from
/// the application settings once per generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssuerIdentity {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub website: Option<String>,
    /// Resource locator resolvable through a `ResourceProvider`.
    pub logo: Option<String>,
    #[serde(default)]
    pub registrations: Registrations,
    pub tax_rate_percent: Decimal,
    pub currency: String,
    pub bank_account: Option<String>,
}

impl IssuerIdentity {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        tax_rate_percent: Decimal,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            email: email.into(),
            website: None,
            logo: None,
            registrations: Registrations::default(),
            tax_rate_percent,
            currency: "Dhs".to_string(),
            bank_account: None,
        }
    }
}

/// The customer a document is addressed to. The whole record is optional
/// at the compose boundary; a missing recipient is a walk-in sale and
/// renders as a neutral placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientIdentity {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub registration_id: Option<String>,
}

impl RecipientIdentity {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            address: None,
            registration_id: None,
        }
    }
}

/// Lifecycle state of a document, displayed next to its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentStatus {
    Pending,
    Paid,
    Accepted,
    Rejected,
}

impl DocumentStatus {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentStatus::Pending => "En attente",
            DocumentStatus::Paid => "Payée",
            DocumentStatus::Accepted => "Acceptée",
            DocumentStatus::Rejected => "Refusée",
        }
    }
}

/// Identifying metadata of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentHeader {
    pub id: i64,
    /// Issue date as epoch seconds.
    pub issued_at: i64,
    pub status: DocumentStatus,
    pub kind: crate::policy::DocumentKind,
}

impl DocumentHeader {
    /// Issue date formatted for display, day/month/year. Falls back to a
    /// dash for timestamps outside the representable range.
    pub fn issued_at_display(&self) -> String {
        match chrono::DateTime::from_timestamp(self.issued_at, 0) {
            Some(dt) => dt.format("%d/%m/%Y").to_string(),
            None => "-".to_string(),
        }
    }
}
