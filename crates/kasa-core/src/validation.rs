//! # Validation Module
//!
//! Input checks shared by the sale builder.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Mobile client                                                │
//! │  └── numeric keyboards, disabled submit button                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE + sale builder                                   │
//! │  ├── blank / unparseable payment entries are dropped                   │
//! │  └── required fields, positive total                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persistence boundary (remote)                                │
//! │  └── may still reject (SyncError::Rejected)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

/// Checks that a text field is non-empty after trimming.
///
/// ## Example
/// ```rust
/// use kasa_core::validation::require_field;
///
/// assert!(require_field("from", "K").is_ok());
/// assert!(require_field("from", "  ").is_err());
/// ```
pub fn require_field(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(field));
    }
    Ok(())
}

/// Parses the raw payment entries, keeping only those that are amounts.
///
/// Blank and unparseable entries are dropped silently; entry order is kept.
///
/// ## Example
/// ```rust
/// use kasa_core::validation::parse_payment_entries;
///
/// let amounts = parse_payment_entries(&["100", "", "abc", "20,50"]);
/// assert_eq!(amounts.len(), 2);
/// ```
pub fn parse_payment_entries<S: AsRef<str>>(entries: &[S]) -> Vec<Money> {
    entries
        .iter()
        .filter_map(|entry| Money::parse_entry(entry.as_ref()).ok())
        .collect()
}

/// Checks that cash and card amounts together are greater than zero.
pub fn require_payment(cash: &[Money], card: &[Money]) -> ValidationResult<Money> {
    let total: Money = cash.iter().chain(card).sum();
    if !total.is_positive() {
        return Err(ValidationError::NoPayment);
    }
    Ok(total)
}

// =============================================================================
// Unit Tests
// =============================================================================
