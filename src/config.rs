//! Configuration surface.
//!
//! The surrounding application stores its settings as loosely typed
//! strings; `EngineConfig` is the bridge from that settings record to
//! the typed values the engine works with. Resolution fails fast on a
//! malformed tax rate or a degenerate page geometry, while an
//! unrecognized document type falls back to invoice semantics.

use crate::error::PipelineError;
use factura_doc::DocumentKind;
use factura_types::PageGeometry;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Raw, settings-shaped configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Document-type identifier; unknown values resolve to `Invoice`.
    pub document_type: String,
    /// Tax rate in percent, as stored ("20", "7.5", ...).
    pub tax_rate_percent: String,
    /// Label appended after amounts.
    pub currency: String,
    pub geometry: PageGeometry,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            document_type: "invoice".to_string(),
            tax_rate_percent: "20".to_string(),
            currency: "Dhs".to_string(),
            geometry: PageGeometry::a4(),
        }
    }
}

/// Typed configuration after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub kind: DocumentKind,
    pub tax_rate_percent: Decimal,
    pub currency: String,
    pub geometry: PageGeometry,
}

impl EngineConfig {
    pub fn resolve(&self) -> Result<ResolvedConfig, PipelineError> {
        let tax_rate_percent = Decimal::from_str(self.tax_rate_percent.trim())
            .map_err(|e| {
                PipelineError::Config(format!(
                    "malformed tax rate '{}': {e}",
                    self.tax_rate_percent
                ))
            })?;
        self.geometry.validate()?;
        Ok(ResolvedConfig {
            kind: DocumentKind::from_identifier(&self.document_type),
            tax_rate_percent,
            currency: self.currency.clone(),
            geometry: self.geometry,
        })
    }
}
