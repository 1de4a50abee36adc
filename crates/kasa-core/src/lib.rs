//! # kasa-core: Pure Sales Logic for the Kasa Point of Sale
//!
//! Barcode classification, outlet eligibility and sale validation as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Kasa Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Mobile client                                │   │
//! │  │    Scan field ──► Outlet picker ──► Cash/Card ──► Submit        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    kasa-sync (async edge)                       │   │
//! │  │    BarcodeClassifier, ScanSession, HttpSaleSink, config         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kasa-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  barcode  │  │ reference │  │  outlet   │  │   sale    │  │   │
//! │  │   │ layouts   │  │  tables   │  │eligibility│  │  builder  │  │   │
//! │  │   │ matchers  │  │ fallback  │  │ defaults  │  │ validation│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`barcode`] - Layout detection and the classification chain
//! - [`reference`] - Code → label tables with placeholder fallback
//! - [`provider`] - Normalization of raw provider payloads
//! - [`outlet`] - Which outlets may be credited with a sale
//! - [`sale`] - `SaleIntent` and its builder
//! - [`money`] - Integer amounts in grosze
//! - [`types`] - Shared domain types
//! - [`error`] - Domain error types
//! - [`validation`] - Field and payment checks
//!
//! ## Example Usage
//!
//! ```rust
//! use kasa_core::barcode::{classify_local, ClassifyContext};
//! use kasa_core::reference::{ReferenceKind, ReferenceTable, ReferenceTables};
//! use kasa_core::SourceKind;
//!
//! let tables = ReferenceTables {
//!     color: ReferenceTable::from_pairs(ReferenceKind::Color, [("04", "BRĄZOWY")]),
//!     wallet: ReferenceTable::from_pairs(ReferenceKind::Wallet, [("100", "IR 3212.313")]),
//!     ..ReferenceTables::default()
//! };
//! let ctx = ClassifyContext::new(Vec::new(), tables);
//!
//! let decode = classify_local("0000401003136", &ctx).finish(None);
//! assert_eq!(decode.product.full_name, "IR 3212.313 BRĄZOWY");
//! assert_eq!(decode.product.size, "-");
//! assert_eq!(decode.product.source_kind, SourceKind::Wallet);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod barcode;
pub mod error;
pub mod money;
pub mod outlet;
pub mod provider;
pub mod reference;
pub mod sale;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use barcode::{classify_local, Classification, ClassifyContext, Decode, LocalClassification};
pub use error::{AmountError, LookupDegraded, ValidationError, ValidationResult};
pub use money::Money;
pub use outlet::{default_outlet, eligible_outlets, is_eligible, stocked_outlets};
pub use reference::{ReferenceKind, ReferenceTable, ReferenceTables};
pub use sale::{SaleIntent, SaleIntentBuilder};
pub use types::*;
