//! # Error Types
//!
//! Domain-specific error types for kasa-core.
//!
//! ## Error Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kasa-core (this file)                                                 │
//! │  ├── ValidationError  - blocks submission, shown to the cashier        │
//! │  ├── AmountError      - one payment entry unparseable (entry dropped)  │
//! │  └── LookupDegraded   - placeholder label used (logged, never shown)   │
//! │                                                                         │
//! │  kasa-sync (separate crate)                                            │
//! │  └── SyncError        - config, transport, persistence failures        │
//! │                                                                         │
//! │  Flow: decode ──► LookupDegraded (absorbed)                            │
//! │        build  ──► ValidationError ──► cashier fixes input              │
//! │        submit ──► SyncError::Rejected/Unauthorized ──► retry           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing raised while classifying a barcode is fatal. A barcode that
//! cannot be decoded yields `SourceKind::NotFound`, which only becomes an
//! error when the cashier tries to build a sale from it.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reference::ReferenceKind;

// =============================================================================
// Validation Error
// =============================================================================

/// Sale-intent validation failures.
///
/// Checked in declaration order; the first failing check is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The barcode input is empty or whitespace.
    #[error("Barcode is required")]
    EmptyBarcode,

    /// The barcode did not decode to any known product.
    #[error("Product not found for barcode {barcode}")]
    ProductNotFound { barcode: String },

    /// A field the persistence boundary requires is empty.
    ///
    /// ## When This Occurs
    /// - No outlet chosen (`from` empty)
    /// - Catalogued entry with a blank name or size
    #[error("{field} is required")]
    MissingField { field: String },

    /// No cash or card entry adds up to a positive amount.
    #[error("At least one cash or card amount greater than zero is required")]
    NoPayment,
}

impl ValidationError {
    pub(crate) fn missing(field: &str) -> Self {
        ValidationError::MissingField {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Amount Error
// =============================================================================

/// Why a single payment entry could not be read as an amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is blank")]
    Blank,

    #[error("'{0}' is not a valid amount")]
    Malformed(String),

    #[error("'{0}' has more than two decimal places")]
    TooManyDecimals(String),

    #[error("'{0}' is too large")]
    Overflow(String),
}

// =============================================================================
// Lookup Degradation
// =============================================================================

/// A reference lookup that fell back to a synthetic placeholder label.
///
/// Collected during classification and handed to the caller alongside the
/// decode; never returned as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupDegraded {
    /// Table the code was looked up in.
    pub table: ReferenceKind,
    /// The code as sliced from the barcode.
    pub code: String,
    /// Label substituted for the missing entry.
    pub placeholder: String,
}

impl fmt::Display for LookupDegraded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} code {} unresolved, using {}",
            self.table, self.code, self.placeholder
        )
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
