//! End-to-end classification and eligibility scenarios against fixture tables.

use kasa_core::barcode::layout;
use kasa_core::barcode::{classify_local, Classification, ClassifyContext, ReservedShape};
use kasa_core::reference::{ReferenceKind, ReferenceTable, ReferenceTables};
use kasa_core::{
    eligible_outlets, CurrentUser, DecodedProduct, InventoryEntry, Outlet, OutletRole,
    SaleIntentBuilder, SourceKind, ValidationError,
};

// =============================================================================
// Fixtures
// =============================================================================

fn fixture_context() -> ClassifyContext {
    let snapshot = vec![InventoryEntry {
        barcode: "1234567890123".into(),
        full_name: "Kurtka skórzana klasyczna".into(),
        size: "M".into(),
        symbol: "K".into(),
    }];
    let tables = ReferenceTables {
        stock: ReferenceTable::from_pairs(ReferenceKind::Stock, [("020", "Kurtka skórzana klasyczna")]),
        color: ReferenceTable::from_pairs(
            ReferenceKind::Color,
            [("01", "Czarny"), ("04", "BRĄZOWY")],
        ),
        size: ReferenceTable::from_pairs(ReferenceKind::Size, [("002", "M")]),
        bag: ReferenceTable::from_pairs(ReferenceKind::Bag, [("1004", "TB 1004.01")]),
        wallet: ReferenceTable::from_pairs(ReferenceKind::Wallet, [("100", "IR 3212.313")]),
    };
    ClassifyContext::new(snapshot, tables)
}

fn remainder_catalog() -> ReferenceTable {
    ReferenceTable::from_pairs(ReferenceKind::Remainder, [("39", "TMC 444.222")])
}

fn decode(raw: &str) -> DecodedProduct {
    let catalog = remainder_catalog();
    classify_local(raw, &fixture_context())
        .finish(Some(&catalog))
        .product
}

// =============================================================================
// Concrete Cases
// =============================================================================

#[test]
fn test_catalogued_barcode_returns_snapshot_pair() {
    let product = decode("1234567890123");
    assert_eq!(product.full_name, "Kurtka skórzana klasyczna");
    assert_eq!(product.size, "M");
    assert_eq!(product.source_kind, SourceKind::Catalogued);
}

#[test]
fn test_jacket_barcode_composes_stock_color_size() {
    let product = decode("0200100200009");
    assert_eq!(product.full_name, "Kurtka skórzana klasyczna Czarny M");
    assert_eq!(product.size, "M");
    assert_eq!(product.source_kind, SourceKind::Jacket);
}

#[test]
fn test_wallet_barcode_composes_wallet_and_color() {
    let product = decode("0000401003136");
    assert_eq!(product.full_name, "IR 3212.313 BRĄZOWY");
    assert_eq!(product.size, "-");
    assert_eq!(product.source_kind, SourceKind::Wallet);
}

#[test]
fn test_bag_barcode_composes_bag_and_color() {
    let product = decode("0000110041234");
    assert_eq!(product.full_name, "TB 1004.01 Czarny");
    assert_eq!(product.size, "-");
    assert_eq!(product.source_kind, SourceKind::Bag);
}

#[test]
fn test_remainder_barcode_waits_for_catalog_then_composes() {
    let ctx = fixture_context();
    let local = classify_local("0000100392222", &ctx);
    match &local.classification {
        Classification::AwaitingRemainder(query) => {
            assert_eq!(query.product_code, "39");
            assert_eq!(query.color_name, "Czarny");
        }
        other => panic!("expected remainder query, got {:?}", other),
    }

    let catalog = remainder_catalog();
    let product = local.finish(Some(&catalog)).product;
    assert_eq!(product.full_name, "TMC 444.222 Czarny");
    assert_eq!(product.source_kind, SourceKind::Remainder);
}

#[test]
fn test_remainder_with_uppercase_color_table() {
    let mut ctx = fixture_context();
    ctx.tables.color = ReferenceTable::from_pairs(ReferenceKind::Color, [("01", "CZARNY")]);
    let catalog = remainder_catalog();
    let product = classify_local("0000100392222", &ctx)
        .finish(Some(&catalog))
        .product;
    assert_eq!(product.full_name, "TMC 444.222 CZARNY");
}

#[test]
fn test_remainder_lookup_failure_uses_placeholder() {
    let decode = classify_local("0000100392222", &fixture_context()).finish(None);
    assert_eq!(decode.product.full_name, "Resztka_39 Czarny");
    assert_eq!(decode.product.source_kind, SourceKind::Remainder);
    assert_eq!(decode.degraded.len(), 1);
}

#[test]
fn test_garbage_is_not_found() {
    for raw in ["INVALID_BARCODE_123", "", "   ", "12", "000", "00001"] {
        let product = decode(raw);
        assert_eq!(product.source_kind, SourceKind::NotFound, "input {:?}", raw);
        assert!(!product.is_found());
    }
}

#[test]
fn test_missing_reference_codes_degrade_to_placeholders() {
    let decode = classify_local("0008805000001", &fixture_context()).finish(None);
    assert_eq!(decode.product.full_name, "Portfel_500 Kolor_88");
    assert_eq!(decode.degraded.len(), 2);
}

// =============================================================================
// Properties
// =============================================================================

#[test]
fn test_classification_is_idempotent() {
    let ctx = fixture_context();
    let catalog = remainder_catalog();
    for raw in [
        "1234567890123",
        "0200100200009",
        "0000401003136",
        "0000100392222",
        "0008805000001",
        "INVALID_BARCODE_123",
    ] {
        let first = classify_local(raw, &ctx).finish(Some(&catalog));
        let second = classify_local(raw, &ctx).finish(Some(&catalog));
        assert_eq!(first, second, "input {:?}", raw);
    }
}

#[test]
fn test_reserved_prefix_partitions_disjointly() {
    for d6 in 0..10u8 {
        for d7 in 0..10u8 {
            let raw = format!("00012{}{}456789", d6, d7);
            let hits = [
                layout::bag(&raw).is_some(),
                layout::wallet(&raw).is_some(),
                layout::remainder(&raw).is_some(),
            ];
            assert!(layout::jacket(&raw).is_none(), "jacket matched {}", raw);

            let expected = match (d6, d7) {
                (0, 0) => Some(ReservedShape::Remainder),
                (0, _) => Some(ReservedShape::Wallet),
                _ => Some(ReservedShape::Bag),
            };
            assert_eq!(layout::reserved_shape(&raw), expected, "input {}", raw);
            assert_eq!(hits.iter().filter(|hit| **hit).count(), 1, "input {}", raw);
        }
    }
}

#[test]
fn test_sizeless_taxonomies_always_report_dash() {
    for raw in ["0000401003136", "0000110041234", "0000100392222"] {
        let product = decode(raw);
        assert!(product.source_kind.is_sizeless());
        assert_eq!(product.size, "-");
    }
}

// =============================================================================
// Eligibility and Sale
// =============================================================================

fn outlet(symbol: &str, location: &str, role: &str, selling_point: &str) -> Outlet {
    Outlet {
        symbol: symbol.into(),
        location: location.into(),
        role: OutletRole::from(role),
        selling_point: selling_point.into(),
    }
}

#[test]
fn test_dom_always_included_admin_and_magazyn_never() {
    let user = CurrentUser {
        symbol: "K".into(),
        location: "Zakopane".into(),
        role: OutletRole::default(),
    };
    let roster = vec![
        outlet("P", "Warszawa", "dom", ""),
        outlet("A", "Zakopane", "admin", "Biuro"),
        outlet("M", "Zakopane", "magazyn", "Magazyn"),
        outlet("K", "Zakopane", "user", "Krupówki"),
    ];
    let symbols: Vec<&str> = eligible_outlets(&user, &roster)
        .iter()
        .map(|o| o.symbol.as_str())
        .collect();
    assert_eq!(symbols, vec!["P", "K"]);
}

#[test]
fn test_scan_to_sale_intent() {
    let roster = vec![outlet("K", "Zakopane", "user", "Krupówki")];
    let product = decode("0000401003136");
    let intent = SaleIntentBuilder::new("0000401003136", product)
        .outlet(&roster[0])
        .recorded_by("K")
        .cash(["100,00"])
        .card([""])
        .build()
        .unwrap();
    assert_eq!(intent.full_name(), "IR 3212.313 BRĄZOWY");
    assert_eq!(intent.size(), "-");
    assert_eq!(intent.selling_point(), "Krupówki");

    let err = SaleIntentBuilder::new("INVALID_BARCODE_123", decode("INVALID_BARCODE_123"))
        .outlet(&roster[0])
        .cash(["100"])
        .build()
        .unwrap_err();
    assert!(matches!(err, ValidationError::ProductNotFound { .. }));
}
