use crate::{Composer, DIRECT_CUSTOMER_LABEL, PAYMENT_TERMS};
use factura_doc::policy::DocumentKind;
use factura_doc::{DocumentHeader, DocumentStatus, IssuerIdentity, LineItem, RecipientIdentity};
use factura_layout::table::NO_ITEMS_LABEL;
use factura_layout::{DrawElement, Page};
use factura_resource::InMemoryResourceProvider;
use factura_types::PageGeometry;
use rust_decimal::Decimal;
use std::str::FromStr;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn issuer() -> IssuerIdentity {
    let mut issuer =
        IssuerIdentity::new("Ets Alami", "12 Rue des Orangers, Casablanca", "0522-000000", "contact@alami.ma", dec("20"));
    issuer.bank_account = Some("011 810 0000012345678901 23".to_string());
    issuer
}

fn header(kind: DocumentKind) -> DocumentHeader {
    DocumentHeader { id: 42, issued_at: 1_700_000_000, status: DocumentStatus::Pending, kind }
}

fn hundred_subtotal_items() -> Vec<LineItem> {
    vec![
        LineItem::new("Clavier", 1, dec("25.50")),
        LineItem::new("Souris", 2, dec("25.00")),
        LineItem::new("Tapis", 1, dec("24.50")),
    ]
}

fn texts(page: &Page) -> Vec<&str> {
    page.iter()
        .filter_map(|el| match &el.element {
            DrawElement::Text(t) => Some(t.content.as_str()),
            _ => None,
        })
        .collect()
}

fn has_image(page: &Page) -> bool {
    page.iter().any(|el| matches!(el.element, DrawElement::Image(_)))
}

#[test]
fn invoice_with_three_items_fits_one_page_with_exact_totals() {
    let resources = InMemoryResourceProvider::new();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let pages = composer
        .compose(&header(DocumentKind::Invoice), &issuer(), None, &hundred_subtotal_items())
        .unwrap();

    assert_eq!(pages.len(), 1);
    let texts = texts(&pages[0]);
    assert!(texts.contains(&"FACTURE"));
    assert!(texts.contains(&"Total HT : 100.00 Dhs"));
    assert!(texts.contains(&"TVA (20%) : 20.00 Dhs"));
    assert!(texts.contains(&"Total TTC : 120.00 Dhs"));
}

#[test]
fn empty_document_renders_placeholder_row_and_zero_totals() {
    let resources = InMemoryResourceProvider::new();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let pages =
        composer.compose(&header(DocumentKind::Invoice), &issuer(), None, &[]).unwrap();

    assert_eq!(pages.len(), 1);
    let texts = texts(&pages[0]);
    assert!(texts.contains(&NO_ITEMS_LABEL));
    assert!(texts.contains(&"Total HT : 0.00 Dhs"));
    assert!(texts.contains(&"Total TTC : 0.00 Dhs"));
}

#[test]
fn continuation_pages_repeat_table_header_but_not_document_header() {
    let resources = InMemoryResourceProvider::new();
    // Continuation pages fit exactly 20 rows below the repeated header.
    let geometry = PageGeometry::new(595.0, 605.0, 40.0, 25.0);
    let composer = Composer::new(geometry, &resources);
    let items: Vec<LineItem> =
        (1..=50).map(|i| LineItem::new(format!("Article {i}"), 1, dec("10.00"))).collect();
    let pages =
        composer.compose(&header(DocumentKind::Invoice), &issuer(), None, &items).unwrap();

    assert!(pages.len() >= 3);
    for page in &pages[1..] {
        let texts = texts(page);
        assert!(texts.contains(&"Désignation"), "continuation page repeats column header");
        assert!(!texts.contains(&"FACTURE"));
        assert!(!texts.contains(&"Ets Alami"));
    }
}

#[test]
fn delivery_note_omits_tax_line_entirely() {
    let resources = InMemoryResourceProvider::new();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let pages = composer
        .compose(&header(DocumentKind::DeliveryNote), &issuer(), None, &hundred_subtotal_items())
        .unwrap();

    let texts = texts(&pages[0]);
    assert!(texts.contains(&"BON DE LIVRAISON"));
    assert!(texts.contains(&"Total : 100.00 Dhs"));
    assert!(!texts.iter().any(|t| t.starts_with("TVA (")));
    assert!(!texts.iter().any(|t| t.starts_with("Total TTC")));
}

#[test]
fn missing_recipient_renders_neutral_placeholder() {
    let resources = InMemoryResourceProvider::new();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let pages = composer
        .compose(&header(DocumentKind::Invoice), &issuer(), None, &hundred_subtotal_items())
        .unwrap();

    assert!(texts(&pages[0]).contains(&DIRECT_CUSTOMER_LABEL));
}

#[test]
fn recipient_fields_render_only_when_non_empty() {
    let resources = InMemoryResourceProvider::new();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let recipient = RecipientIdentity {
        name: "Société Atlas".to_string(),
        email: Some("achat@atlas.ma".to_string()),
        phone: Some("   ".to_string()),
        address: None,
        registration_id: Some("ICE 0001".to_string()),
    };
    let pages = composer
        .compose(&header(DocumentKind::Invoice), &issuer(), Some(&recipient), &[])
        .unwrap();

    let texts = texts(&pages[0]);
    assert!(texts.contains(&"Société Atlas"));
    assert!(texts.contains(&"achat@atlas.ma"));
    assert!(texts.contains(&"ICE 0001"));
    assert!(!texts.contains(&"   "));
    assert!(!texts.contains(&DIRECT_CUSTOMER_LABEL));
}

#[test]
fn metadata_column_shows_number_date_and_status() {
    let resources = InMemoryResourceProvider::new();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let pages =
        composer.compose(&header(DocumentKind::Invoice), &issuer(), None, &[]).unwrap();

    let texts = texts(&pages[0]);
    assert!(texts.contains(&"N° : 42"));
    assert!(texts.contains(&"Date : 14/11/2023"));
    assert!(texts.contains(&"Statut : En attente"));
}

#[test]
fn missing_logo_is_skipped_without_error() {
    let resources = InMemoryResourceProvider::new();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let mut issuer = issuer();
    issuer.logo = Some("logo.png".to_string());

    let pages = composer
        .compose(&header(DocumentKind::Invoice), &issuer, None, &hundred_subtotal_items())
        .unwrap();
    assert!(!has_image(&pages[0]));
    assert!(texts(&pages[0]).contains(&"FACTURE"));
}

#[test]
fn present_logo_is_placed_on_the_first_page() {
    let resources = InMemoryResourceProvider::new();
    resources.add("logo.png", vec![1, 2, 3, 4]).unwrap();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let mut issuer = issuer();
    issuer.logo = Some("logo.png".to_string());

    let pages = composer
        .compose(&header(DocumentKind::Invoice), &issuer, None, &hundred_subtotal_items())
        .unwrap();
    assert!(has_image(&pages[0]));
}

#[test]
fn footer_carries_payment_terms_and_bank_line_on_final_page_only() {
    let resources = InMemoryResourceProvider::new();
    let geometry = PageGeometry::new(595.0, 605.0, 40.0, 25.0);
    let composer = Composer::new(geometry, &resources);
    let items: Vec<LineItem> =
        (1..=50).map(|i| LineItem::new(format!("Article {i}"), 1, dec("10.00"))).collect();
    let pages =
        composer.compose(&header(DocumentKind::Invoice), &issuer(), None, &items).unwrap();

    let last = texts(pages.last().unwrap());
    assert!(last.contains(&PAYMENT_TERMS));
    assert!(last.iter().any(|t| t.starts_with("RIB : ")));
    for page in &pages[..pages.len() - 1] {
        assert!(!texts(page).contains(&PAYMENT_TERMS));
    }
}

#[test]
fn totals_spill_to_a_fresh_page_when_the_table_fills_the_last_one() {
    let resources = InMemoryResourceProvider::new();
    let geometry = PageGeometry::new(595.0, 605.0, 40.0, 25.0);
    let composer = Composer::new(geometry, &resources);
    // Probe how many rows the first page holds, then size the list so
    // the second fragment's 20 rows end flush with the usable bottom,
    // leaving no room for the totals block.
    let many: Vec<LineItem> =
        (1..=100).map(|i| LineItem::new(format!("Article {i}"), 1, dec("10.00"))).collect();
    let probe =
        composer.compose(&header(DocumentKind::Invoice), &issuer(), None, &many).unwrap();
    let first_page_rows =
        texts(&probe[0]).iter().filter(|t| t.starts_with("Article ")).count();

    let items: Vec<LineItem> = (1..=first_page_rows + 20)
        .map(|i| LineItem::new(format!("Article {i}"), 1, dec("10.00")))
        .collect();
    let pages =
        composer.compose(&header(DocumentKind::Invoice), &issuer(), None, &items).unwrap();

    let last = texts(pages.last().unwrap());
    assert!(last.iter().any(|t| t.starts_with("Total TTC : ")));
    assert!(!last.contains(&"Désignation"));
}

#[test]
fn composition_is_idempotent() {
    let resources = InMemoryResourceProvider::new();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let recipient = RecipientIdentity::named("Société Atlas");
    let a = composer
        .compose(&header(DocumentKind::Quote), &issuer(), Some(&recipient), &hundred_subtotal_items())
        .unwrap();
    let b = composer
        .compose(&header(DocumentKind::Quote), &issuer(), Some(&recipient), &hundred_subtotal_items())
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn quote_uses_its_own_title_and_itemizes_tax() {
    let resources = InMemoryResourceProvider::new();
    let composer = Composer::new(PageGeometry::a4(), &resources);
    let pages = composer
        .compose(&header(DocumentKind::Quote), &issuer(), None, &hundred_subtotal_items())
        .unwrap();

    let texts = texts(&pages[0]);
    assert!(texts.contains(&"DEVIS"));
    assert!(texts.contains(&"Total TTC : 120.00 Dhs"));
}
