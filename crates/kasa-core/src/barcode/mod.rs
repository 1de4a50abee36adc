//! # Barcode Classification
//!
//! Decides which taxonomy an untagged digit string encodes and resolves it
//! to a display name.
//!
//! ## Classification Chain
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Barcode Classification                             │
//! │                                                                         │
//! │  raw ──► trim ──► empty? ─────────────────────────────► NotFound        │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  ┌─────────────── SYNC_MATCHERS (first hit wins) ─────────────────┐    │
//! │  │ 1. Exact     inventory snapshot, literal barcode                │    │
//! │  │ 2. Jacket    stock(3) color(2) size(3) 0000 check(1)            │    │
//! │  │ 3. Bag       000 color(2) row(4, first digit != 0) ...          │    │
//! │  │ 4. Wallet    000 color(2) 0 wallet(3, first digit != 0) ...     │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! │                     │ no hit                                            │
//! │                     ▼                                                   │
//! │  5. Remainder  000 color(2) 00 product(2) ──► AwaitingRemainder(query)  │
//! │                     │ no                        (remote lookup by the   │
//! │                     ▼                            caller, kasa-sync)     │
//! │                  NotFound                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything here is synchronous, allocation-light and bounded, so it can
//! run on every keystroke.
//!
//! ## Usage
//! ```rust
//! use kasa_core::barcode::{classify_local, Classification, ClassifyContext};
//! use kasa_core::reference::{ReferenceKind, ReferenceTable, ReferenceTables};
//!
//! let tables = ReferenceTables {
//!     stock: ReferenceTable::from_pairs(ReferenceKind::Stock, [("020", "Kurtka skórzana klasyczna")]),
//!     color: ReferenceTable::from_pairs(ReferenceKind::Color, [("01", "Czarny")]),
//!     size: ReferenceTable::from_pairs(ReferenceKind::Size, [("002", "M")]),
//!     ..ReferenceTables::default()
//! };
//! let ctx = ClassifyContext::new(Vec::new(), tables);
//!
//! let result = classify_local("0200100200009", &ctx);
//! match result.classification {
//!     Classification::Ready(product) => {
//!         assert_eq!(product.full_name, "Kurtka skórzana klasyczna Czarny M");
//!     }
//!     Classification::AwaitingRemainder(_) => unreachable!(),
//! }
//! ```

pub mod layout;
pub mod matchers;

use serde_json::Value;

use crate::error::LookupDegraded;
use crate::provider::normalize_snapshot;
use crate::reference::{ReferenceKind, ReferenceTable, ReferenceTables};
use crate::types::{DecodedProduct, InventoryEntry};

pub use layout::{reserved_shape, ReservedShape};
pub use matchers::{RemainderQuery, SYNC_MATCHERS};

// =============================================================================
// Context
// =============================================================================

/// Read-only data a classification pass runs against.
///
/// Injected per call rather than held globally; callers swap the whole
/// context when the snapshot or tables are reloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyContext {
    /// Inventory snapshot in provider order.
    pub snapshot: Vec<InventoryEntry>,
    pub tables: ReferenceTables,
}

impl ClassifyContext {
    pub fn new(snapshot: Vec<InventoryEntry>, tables: ReferenceTables) -> Self {
        ClassifyContext { snapshot, tables }
    }

    /// Builds a context straight from raw provider payloads.
    ///
    /// Absent or malformed payloads become empty tables.
    pub fn from_payloads(payloads: &ContextPayloads) -> Self {
        let table = |kind, payload: &Value| ReferenceTable::from_payload(kind, payload);
        ClassifyContext {
            snapshot: normalize_snapshot(&payloads.snapshot),
            tables: ReferenceTables {
                stock: table(ReferenceKind::Stock, &payloads.stock),
                color: table(ReferenceKind::Color, &payloads.color),
                size: table(ReferenceKind::Size, &payloads.size),
                bag: table(ReferenceKind::Bag, &payloads.bag),
                wallet: table(ReferenceKind::Wallet, &payloads.wallet),
            },
        }
    }
}

/// Raw provider payloads, one per resident source.
#[derive(Debug, Clone, Default)]
pub struct ContextPayloads {
    pub snapshot: Value,
    pub stock: Value,
    pub color: Value,
    pub size: Value,
    pub bag: Value,
    pub wallet: Value,
}

// =============================================================================
// Results
// =============================================================================

/// Outcome of the synchronous part of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Final decode (including `NotFound`).
    Ready(DecodedProduct),
    /// Remainder layout; the product label still has to be fetched.
    AwaitingRemainder(RemainderQuery),
}

/// A synchronous classification pass plus the placeholders it used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalClassification {
    pub classification: Classification,
    pub degraded: Vec<LookupDegraded>,
}

impl LocalClassification {
    /// Completes the pass with an already-fetched remainder catalog
    /// (`None` = lookup failed).
    pub fn finish(self, catalog: Option<&ReferenceTable>) -> Decode {
        let mut degraded = self.degraded;
        let product = match self.classification {
            Classification::Ready(product) => product,
            Classification::AwaitingRemainder(query) => query.complete(catalog, &mut degraded),
        };
        Decode { product, degraded }
    }
}

/// A finished decode plus the placeholders it used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decode {
    pub product: DecodedProduct,
    pub degraded: Vec<LookupDegraded>,
}

// =============================================================================
// Classifier
// =============================================================================

/// Runs the synchronous chain over `raw`.
///
/// Never fails; garbage input yields `Ready(NotFound)`.
pub fn classify_local(raw: &str, ctx: &ClassifyContext) -> LocalClassification {
    let raw = raw.trim();
    let mut degraded = Vec::new();

    if raw.is_empty() {
        return LocalClassification {
            classification: Classification::Ready(DecodedProduct::not_found()),
            degraded,
        };
    }

    let hit = SYNC_MATCHERS
        .iter()
        .find_map(|(_, matcher)| matcher(raw, ctx, &mut degraded));

    let classification = match hit {
        Some(product) => Classification::Ready(product),
        None => match matchers::match_remainder(raw, ctx, &mut degraded) {
            Some(query) => Classification::AwaitingRemainder(query),
            None => Classification::Ready(DecodedProduct::not_found()),
        },
    };

    LocalClassification {
        classification,
        degraded,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
