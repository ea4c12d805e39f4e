//! Document composer.
//!
//! Drives the table layout engine and the money calculator to assemble
//! one complete document as an ordered sequence of abstract pages. The
//! composer is pure given its inputs: the same header, issuer,
//! recipient and items always produce structurally identical pages.
//!
//! Composition is strictly sequential: issuer header block, centered
//! title, recipient/metadata block, line-item table (possibly spilling
//! onto continuation pages that repeat only the column header), totals
//! block on the final page, footer near the bottom margin. Decorative
//! failures (a missing or unreadable logo) are absorbed with a warning;
//! layout and totals failures abort composition.

use factura_doc::policy::DocumentPolicy;
use factura_doc::totals::{Totals, compute_totals};
use factura_doc::{DocumentHeader, IssuerIdentity, LineItem, RecipientIdentity};
use factura_layout::{LayoutError, Page, PositionedElement, TableLayout, TextStyle, util};
use factura_resource::ResourceProvider;
use factura_types::{PageGeometry, Rect};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Table layout failed: {0}")]
    Layout(#[from] LayoutError),
}

/// Placeholder rendered when no recipient is attached to the document.
pub const DIRECT_CUSTOMER_LABEL: &str = "Client direct";

/// Boilerplate payment terms printed in the footer.
pub const PAYMENT_TERMS: &str = "Paiement à réception de la facture.";

const LINE_STEP: f32 = 12.0;
const BLOCK_STEP: f32 = 14.0;
const LOGO_BOX: f32 = 60.0;

/// Composes documents for a fixed page geometry, resolving logos
/// through the given resource provider.
pub struct Composer<'a> {
    geometry: PageGeometry,
    resources: &'a dyn ResourceProvider,
}

impl<'a> Composer<'a> {
    pub fn new(geometry: PageGeometry, resources: &'a dyn ResourceProvider) -> Self {
        Self { geometry, resources }
    }

    /// Assembles the full document. Returns the ordered page list, or a
    /// fatal error when the table cannot be laid out.
    pub fn compose(
        &self,
        header: &DocumentHeader,
        issuer: &IssuerIdentity,
        recipient: Option<&RecipientIdentity>,
        items: &[LineItem],
    ) -> Result<Vec<Page>, ComposeError> {
        let policy = DocumentPolicy::for_kind(header.kind);
        let table = TableLayout::new(self.geometry, &policy, issuer.tax_rate_percent)?;
        let totals = compute_totals(items, issuer.tax_rate_percent, &policy);

        let mut first_page: Page = Vec::new();
        let header_bottom = self.issuer_block(&mut first_page, issuer);
        let title_bottom = self.title(&mut first_page, &policy, header_bottom);
        let meta_bottom = self.recipient_block(&mut first_page, header, recipient, title_bottom);

        let fragments = table.layout(items, meta_bottom + 16.0);

        let mut pages = vec![first_page];
        let mut iter = fragments.into_iter();
        // The first fragment continues the first page; later fragments
        // each open a fresh page carrying table content only.
        let mut last_end_y = self.geometry.margin;
        if let Some(first) = iter.next() {
            last_end_y = first.end_y;
            pages[0].extend(first.elements);
        }
        for fragment in iter {
            last_end_y = fragment.end_y;
            pages.push(fragment.elements);
        }

        let totals_height = self.totals_height(&policy);
        if last_end_y + 12.0 + totals_height > self.geometry.usable_bottom() {
            pages.push(Vec::new());
            last_end_y = self.geometry.margin;
        }
        if let Some(final_page) = pages.last_mut() {
            self.totals_block(final_page, &policy, &totals, issuer, last_end_y + 12.0);
            self.footer(final_page, issuer);
        }

        Ok(pages)
    }

    /// Issuer identity and best-effort logo. Returns the block's bottom y.
    fn issuer_block(&self, page: &mut Page, issuer: &IssuerIdentity) -> f32 {
        let geo = &self.geometry;
        let mut y = geo.margin;

        page.push(PositionedElement::text(
            geo.margin,
            y,
            geo.content_width(),
            &issuer.name,
            TextStyle::bold(12.0),
        ));
        y += LINE_STEP + 2.0;

        let style = TextStyle::sized(9.0);
        let mut line = |page: &mut Page, y: &mut f32, content: String| {
            page.push(PositionedElement::text(geo.margin, *y, geo.content_width(), content, style));
            *y += LINE_STEP;
        };
        line(page, &mut y, issuer.address.clone());
        line(page, &mut y, format!("Tél : {}", issuer.phone));
        line(page, &mut y, issuer.email.clone());
        if let Some(website) = &issuer.website {
            line(page, &mut y, website.clone());
        }
        for (label, value) in issuer.registrations.present() {
            line(page, &mut y, format!("{label} : {value}"));
        }

        let logo_bottom = self.logo(page, issuer);
        y.max(logo_bottom)
    }

    /// Attempts to load and place the logo in the top-right corner.
    /// Failure is recoverable: the document continues without it.
    fn logo(&self, page: &mut Page, issuer: &IssuerIdentity) -> f32 {
        let Some(locator) = issuer.logo.as_deref() else {
            return self.geometry.margin;
        };
        match self.resources.load(locator) {
            Ok(data) => {
                let geo = &self.geometry;
                let rect = Rect::new(
                    geo.page_width - geo.margin - LOGO_BOX,
                    geo.margin,
                    LOGO_BOX,
                    LOGO_BOX,
                );
                page.push(PositionedElement::image(rect, data));
                geo.margin + LOGO_BOX
            }
            Err(e) => {
                log::warn!("logo '{locator}' could not be loaded ({e}); continuing without it");
                self.geometry.margin
            }
        }
    }

    fn title(&self, page: &mut Page, policy: &DocumentPolicy, header_bottom: f32) -> f32 {
        let style = TextStyle::bold(16.0);
        let y = header_bottom + 18.0;
        let width = util::approx_text_width(policy.title, style.font_size);
        let x = (self.geometry.page_width - width) / 2.0;
        page.push(PositionedElement::text(x, y, width, policy.title, style));
        y + style.font_size * 1.2
    }

    /// Two-column block: recipient on the left, document metadata on the
    /// right. A missing recipient renders a neutral placeholder.
    fn recipient_block(
        &self,
        page: &mut Page,
        header: &DocumentHeader,
        recipient: Option<&RecipientIdentity>,
        title_bottom: f32,
    ) -> f32 {
        let geo = &self.geometry;
        let top = title_bottom + 16.0;
        let style = TextStyle::sized(9.0);
        let left_width = geo.content_width() * 0.5;

        let mut left_y = top;
        page.push(PositionedElement::text(
            geo.margin,
            left_y,
            left_width,
            "Client :",
            TextStyle::bold(10.0),
        ));
        left_y += BLOCK_STEP;
        match recipient {
            Some(r) => {
                let mut line = |content: String| {
                    page.push(PositionedElement::text(geo.margin, left_y, left_width, content, style));
                    left_y += LINE_STEP;
                };
                line(r.name.clone());
                for field in [&r.address, &r.email, &r.phone, &r.registration_id] {
                    if let Some(value) = field.as_deref().filter(|v| !v.trim().is_empty()) {
                        line(value.to_string());
                    }
                }
            }
            None => {
                page.push(PositionedElement::text(
                    geo.margin,
                    left_y,
                    left_width,
                    DIRECT_CUSTOMER_LABEL,
                    style,
                ));
                left_y += LINE_STEP;
            }
        }

        let right_x = geo.margin + geo.content_width() * 0.55;
        let right_width = geo.content_width() * 0.45;
        let mut right_y = top;
        for content in [
            format!("N° : {}", header.id),
            format!("Date : {}", header.issued_at_display()),
            format!("Statut : {}", header.status.label()),
        ] {
            page.push(PositionedElement::text(right_x, right_y, right_width, content, style));
            right_y += BLOCK_STEP;
        }

        left_y.max(right_y)
    }

    fn totals_height(&self, policy: &DocumentPolicy) -> f32 {
        if policy.itemizes_tax { 3.0 * BLOCK_STEP } else { BLOCK_STEP }
    }

    /// Right-aligned totals beneath the table on the final page.
    fn totals_block(
        &self,
        page: &mut Page,
        policy: &DocumentPolicy,
        totals: &Totals,
        issuer: &IssuerIdentity,
        top: f32,
    ) {
        let geo = &self.geometry;
        let right_edge = geo.page_width - geo.margin;
        let mut y = top;
        let mut line = |content: String, style: TextStyle, y: &mut f32| {
            let width = util::approx_text_width(&content, style.font_size);
            page.push(PositionedElement::text(right_edge - width, *y, width, content, style));
            *y += BLOCK_STEP;
        };

        let currency = &issuer.currency;
        if policy.itemizes_tax {
            line(
                format!("Total HT : {:.2} {currency}", totals.subtotal),
                TextStyle::body(),
                &mut y,
            );
            line(
                format!(
                    "TVA ({:.0}%) : {:.2} {currency}",
                    issuer.tax_rate_percent, totals.tax_amount
                ),
                TextStyle::body(),
                &mut y,
            );
            line(
                format!("Total TTC : {:.2} {currency}", totals.grand_total),
                TextStyle::bold(11.0),
                &mut y,
            );
        } else {
            line(
                format!("Total : {:.2} {currency}", totals.grand_total),
                TextStyle::bold(11.0),
                &mut y,
            );
        }
    }

    /// Static payment terms and optional bank line near the bottom margin.
    fn footer(&self, page: &mut Page, issuer: &IssuerIdentity) {
        let geo = &self.geometry;
        let style = TextStyle::sized(8.0);
        let mut y = geo.usable_bottom() - 2.0 * LINE_STEP;
        page.push(PositionedElement::text(geo.margin, y, geo.content_width(), PAYMENT_TERMS, style));
        y += LINE_STEP;
        if let Some(account) = &issuer.bank_account {
            page.push(PositionedElement::text(
                geo.margin,
                y,
                geo.content_width(),
                format!("RIB : {account}"),
                style,
            ));
        }
    }
}

#[cfg(test)]
mod compose_test;
