//! # Reference Tables
//!
//! Code → label tables used to turn barcode sub-fields into readable names.
//!
//! ## Tables
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Kind       Keyed by                 Label            Placeholder       │
//! │  ─────────  ───────────────────────  ───────────────  ───────────────   │
//! │  Stock      3-digit stock code       product name     Towar_<code>      │
//! │  Color      2-digit color code       color name       Kolor_<code>      │
//! │  Size       3-digit size code        size name        Rozmiar_<code>    │
//! │  Bag        4-digit row number       bag code         Torebka_<code>    │
//! │  Wallet     3-digit wallet number    wallet code      Portfel_<code>    │
//! │  Remainder  2-digit row id (remote)  product code     Resztka_<code>    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lookup Rule
//! An entry whose trimmed code equals the wanted code wins. Failing that,
//! the first entry whose code has the same integer value wins (`"01"`
//! matches `1`). A miss never fails: it produces a placeholder and a
//! [`LookupDegraded`] record.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::LookupDegraded;
use crate::provider::{field_text, find_rows};

// =============================================================================
// Reference Kind
// =============================================================================

/// Which reference table a code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    Stock,
    Color,
    Size,
    Bag,
    Wallet,
    Remainder,
}

impl ReferenceKind {
    /// Prefix of the synthetic placeholder label.
    pub fn placeholder_prefix(&self) -> &'static str {
        match self {
            ReferenceKind::Stock => "Towar",
            ReferenceKind::Color => "Kolor",
            ReferenceKind::Size => "Rozmiar",
            ReferenceKind::Bag => "Torebka",
            ReferenceKind::Wallet => "Portfel",
            ReferenceKind::Remainder => "Resztka",
        }
    }

    /// Deterministic fallback label for an unresolved code.
    pub fn placeholder(&self, code: &str) -> String {
        format!("{}_{}", self.placeholder_prefix(), code.trim())
    }

    /// Field aliases holding the lookup key.
    fn key_fields(&self) -> &'static [&'static str] {
        match self {
            ReferenceKind::Stock => &["code", "stock", "Tow_Kod", "id"],
            ReferenceKind::Color => &["code", "color", "Kol_Kod", "id"],
            ReferenceKind::Size => &["code", "size", "Roz_Kod", "id"],
            ReferenceKind::Bag => &["rowNumber", "Row_Number", "row", "id"],
            ReferenceKind::Wallet => &["walletNumber", "Portfel_Nr", "number", "id"],
            ReferenceKind::Remainder => &["rowId", "row_id", "Row_Number", "id"],
        }
    }

    /// Field aliases holding the label.
    fn label_fields(&self) -> &'static [&'static str] {
        match self {
            ReferenceKind::Stock => &["label", "name", "Tow_Opis"],
            ReferenceKind::Color => &["label", "name", "Kol_Opis"],
            ReferenceKind::Size => &["label", "name", "Roz_Opis"],
            ReferenceKind::Bag => &["label", "code", "Torebki_Kod", "name"],
            ReferenceKind::Wallet => &["label", "code", "Portfele_Kod", "name"],
            ReferenceKind::Remainder => &["label", "code", "Pozostalosci_Kod", "name"],
        }
    }

    /// Kind-specific wrapper key a provider may nest the rows under.
    fn wrapper_fields(&self) -> &'static [&'static str] {
        match self {
            ReferenceKind::Stock => &["stocks", "stock"],
            ReferenceKind::Color => &["colors", "kolory"],
            ReferenceKind::Size => &["sizes", "rozmiary"],
            ReferenceKind::Bag => &["bags", "torebki"],
            ReferenceKind::Wallet => &["wallets", "portfele"],
            ReferenceKind::Remainder => &["remainders", "pozostalosci"],
        }
    }
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceKind::Stock => "stock",
            ReferenceKind::Color => "color",
            ReferenceKind::Size => "size",
            ReferenceKind::Bag => "bag",
            ReferenceKind::Wallet => "wallet",
            ReferenceKind::Remainder => "remainder",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Reference Table
// =============================================================================

/// One `code → label` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub code: String,
    pub label: String,
}

/// A read-only lookup table of one kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTable {
    kind: ReferenceKind,
    entries: Vec<ReferenceEntry>,
}

impl ReferenceTable {
    pub fn new(kind: ReferenceKind, entries: Vec<ReferenceEntry>) -> Self {
        ReferenceTable { kind, entries }
    }

    /// A table with no rows; every lookup degrades to a placeholder.
    pub fn empty(kind: ReferenceKind) -> Self {
        ReferenceTable::new(kind, Vec::new())
    }

    /// Builds a table from `(code, label)` pairs.
    pub fn from_pairs<C, L>(kind: ReferenceKind, pairs: impl IntoIterator<Item = (C, L)>) -> Self
    where
        C: Into<String>,
        L: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(code, label)| ReferenceEntry {
                code: code.into(),
                label: label.into(),
            })
            .collect();
        ReferenceTable::new(kind, entries)
    }

    /// Normalizes a provider payload of any supported shape.
    ///
    /// ## Example
    /// ```rust
    /// use kasa_core::reference::{ReferenceKind, ReferenceTable};
    /// use serde_json::json;
    ///
    /// let table = ReferenceTable::from_payload(
    ///     ReferenceKind::Color,
    ///     &json!({"colors": [{"Kol_Kod": 1, "Kol_Opis": "Czarny"}]}),
    /// );
    /// assert_eq!(table.lookup("01"), Some("Czarny"));
    /// ```
    pub fn from_payload(kind: ReferenceKind, payload: &Value) -> Self {
        let entries = find_rows(payload, kind.wrapper_fields())
            .iter()
            .filter_map(Value::as_object)
            .filter_map(|row| {
                Some(ReferenceEntry {
                    code: field_text(row, kind.key_fields())?,
                    label: field_text(row, kind.label_fields())?,
                })
            })
            .collect();
        ReferenceTable::new(kind, entries)
    }

    #[inline]
    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the label for `code`: exact text first, then numeric value.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        let wanted = code.trim();
        if let Some(entry) = self.entries.iter().find(|e| e.code.trim() == wanted) {
            return Some(entry.label.as_str());
        }

        let wanted_number = parse_number(wanted)?;
        self.entries
            .iter()
            .find(|e| parse_number(e.code.trim()) == Some(wanted_number))
            .map(|entry| entry.label.as_str())
    }

    /// Resolves `code` to a label, recording a degradation on a miss.
    pub fn resolve(&self, code: &str, degraded: &mut Vec<LookupDegraded>) -> String {
        match self.lookup(code) {
            Some(label) => label.to_string(),
            None => {
                let placeholder = self.kind.placeholder(code);
                degraded.push(LookupDegraded {
                    table: self.kind,
                    code: code.to_string(),
                    placeholder: placeholder.clone(),
                });
                placeholder
            }
        }
    }
}

fn parse_number(code: &str) -> Option<u64> {
    if code.is_empty() || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

// =============================================================================
// Reference Tables Bundle
// =============================================================================

/// The resident tables the synchronous matchers need.
///
/// The remainder table is not here: it is fetched remotely per decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTables {
    pub stock: ReferenceTable,
    pub color: ReferenceTable,
    pub size: ReferenceTable,
    pub bag: ReferenceTable,
    pub wallet: ReferenceTable,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        ReferenceTables {
            stock: ReferenceTable::empty(ReferenceKind::Stock),
            color: ReferenceTable::empty(ReferenceKind::Color),
            size: ReferenceTable::empty(ReferenceKind::Size),
            bag: ReferenceTable::empty(ReferenceKind::Bag),
            wallet: ReferenceTable::empty(ReferenceKind::Wallet),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
