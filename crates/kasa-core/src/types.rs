//! # Domain Types
//!
//! Core domain types used throughout Kasa.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InventoryEntry  │   │     Outlet      │   │ DecodedProduct  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  barcode        │   │  symbol         │   │  full_name      │       │
//! │  │  full_name      │   │  location       │   │  size           │       │
//! │  │  size           │   │  role           │   │  source_kind    │       │
//! │  │  symbol         │   │  selling_point  │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   SourceKind    │   │   OutletRole    │                             │
//! │  │  Catalogued     │   │  Admin          │                             │
//! │  │  Jacket / Bag   │   │  Magazyn        │                             │
//! │  │  Wallet         │   │  Dom            │                             │
//! │  │  Remainder      │   │  Other(String)  │                             │
//! │  │  NotFound       │   └─────────────────┘                             │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Size shown for taxonomies without a size concept (bags, wallets, remainders).
pub const NO_SIZE: &str = "-";

// =============================================================================
// Inventory Snapshot
// =============================================================================

/// One catalogued unit held at one outlet.
///
/// Several entries may share a barcode when the same item is stocked at
/// more than one outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    /// The literal barcode printed on the tag.
    pub barcode: String,
    /// Display name of the item.
    pub full_name: String,
    /// Size as recorded in the snapshot.
    pub size: String,
    /// Symbol of the outlet holding this unit.
    pub symbol: String,
}

// =============================================================================
// Outlet Role
// =============================================================================

/// Role of a seller/outlet in the roster.
///
/// Parsed case-insensitively after trimming; unknown roles are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutletRole {
    /// Administrative account, never credited with sales.
    Admin,
    /// Warehouse, never credited with sales.
    Magazyn,
    /// Home/back-office outlet, always eligible.
    Dom,
    /// Any other role (regular shop staff).
    Other(String),
}

impl OutletRole {
    /// Returns the role as it appears on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            OutletRole::Admin => "admin",
            OutletRole::Magazyn => "magazyn",
            OutletRole::Dom => "dom",
            OutletRole::Other(role) => role,
        }
    }

    /// Returns true for roles that may never be credited with a sale.
    pub fn is_excluded(&self) -> bool {
        matches!(self, OutletRole::Admin | OutletRole::Magazyn)
    }
}

impl From<&str> for OutletRole {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "admin" => OutletRole::Admin,
            "magazyn" => OutletRole::Magazyn,
            "dom" => OutletRole::Dom,
            _ => OutletRole::Other(trimmed.to_string()),
        }
    }
}

impl From<String> for OutletRole {
    fn from(raw: String) -> Self {
        OutletRole::from(raw.as_str())
    }
}

impl From<OutletRole> for String {
    fn from(role: OutletRole) -> Self {
        role.as_str().to_string()
    }
}

impl Default for OutletRole {
    fn default() -> Self {
        OutletRole::Other(String::new())
    }
}

impl fmt::Display for OutletRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Outlet
// =============================================================================

/// A seller/outlet in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Outlet {
    /// Short code identifying the outlet.
    pub symbol: String,
    /// Physical location (town/mall) the outlet is in.
    pub location: String,
    #[ts(as = "String")]
    pub role: OutletRole,
    /// Name of the selling point credited on the sale.
    pub selling_point: String,
}

/// The signed-in user recording the sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub symbol: String,
    pub location: String,
    #[serde(default)]
    pub role: OutletRole,
}

// =============================================================================
// Decoded Product
// =============================================================================

/// Which taxonomy produced a decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Literal match against the inventory snapshot.
    Catalogued,
    Jacket,
    Bag,
    Wallet,
    /// Leftover stock, resolved through the remote catalog.
    Remainder,
    NotFound,
}

impl SourceKind {
    /// Returns true for the taxonomies that carry no size.
    pub fn is_sizeless(&self) -> bool {
        matches!(self, SourceKind::Bag | SourceKind::Wallet | SourceKind::Remainder)
    }
}

/// The result of classifying one barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DecodedProduct {
    pub full_name: String,
    pub size: String,
    pub source_kind: SourceKind,
}

impl DecodedProduct {
    /// Creates a decode for a sizeless taxonomy (size is always `"-"`).
    pub fn sizeless(full_name: String, source_kind: SourceKind) -> Self {
        DecodedProduct {
            full_name,
            size: NO_SIZE.to_string(),
            source_kind,
        }
    }

    /// The "nothing matched" decode.
    pub fn not_found() -> Self {
        DecodedProduct {
            full_name: String::new(),
            size: String::new(),
            source_kind: SourceKind::NotFound,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.source_kind != SourceKind::NotFound
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
