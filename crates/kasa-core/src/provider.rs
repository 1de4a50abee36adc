//! # Provider Boundary
//!
//! Turns whatever a data provider hands over into the canonical shapes the
//! classifier works with.
//!
//! ## Accepted Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Provider Payload Normalization                       │
//! │                                                                         │
//! │  [ {...}, {...} ]                  ──► rows as-is                       │
//! │  { "data": [ {...} ] }             ──► rows under a wrapper key         │
//! │  { "colors": [ {...} ] }           ──► rows under a kind-specific key   │
//! │  null / "oops" / { "error": 1 }    ──► no rows                          │
//! │                                                                         │
//! │  Inside a row, each field is looked up by an alias list:               │
//! │    "barcode" | "Kod_Kreskowy" | "code"                                 │
//! │  Strings are trimmed, numbers are stringified, anything else = absent  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in here fails. A malformed payload simply normalizes to fewer
//! (or zero) rows, and the classifier never branches on provider shape.

use serde_json::{Map, Number, Value};

use crate::types::{InventoryEntry, Outlet, OutletRole};

/// Wrapper keys tried for every payload, before any kind-specific key.
const COMMON_WRAPPERS: &[&str] = &["data", "items", "results"];

const SNAPSHOT_WRAPPERS: &[&str] = &["products", "inventory", "stock"];
const ROSTER_WRAPPERS: &[&str] = &["users", "sellers", "outlets"];

const BARCODE_FIELDS: &[&str] = &["barcode", "Kod_Kreskowy", "kod", "code"];
const FULL_NAME_FIELDS: &[&str] = &["fullName", "full_name", "Nazwa", "name"];
const SIZE_FIELDS: &[&str] = &["size", "Rozmiar", "rozmiar"];
const SYMBOL_FIELDS: &[&str] = &["symbol", "Symbol"];
const LOCATION_FIELDS: &[&str] = &["location", "Lokalizacja", "lokalizacja"];
const ROLE_FIELDS: &[&str] = &["role", "Rola", "rola"];
const SELLING_POINT_FIELDS: &[&str] = &["sellingPoint", "selling_point", "sellpoint", "Punkt"];

// =============================================================================
// Shared Helpers
// =============================================================================

/// Finds the row array inside a provider payload.
pub(crate) fn find_rows<'a>(payload: &'a Value, extra_wrappers: &[&str]) -> &'a [Value] {
    match payload {
        Value::Array(rows) => rows,
        Value::Object(map) => COMMON_WRAPPERS
            .iter()
            .chain(extra_wrappers)
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Reads the first present alias of a field as trimmed text.
pub(crate) fn field_text(row: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases.iter().find_map(|alias| match row.get(*alias)? {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(number_text(n)),
        _ => None,
    })
}

/// Integral numbers render without a fraction, so `39.0` reads as `"39"`.
fn number_text(n: &Number) -> String {
    if let Some(v) = n.as_u64() {
        return v.to_string();
    }
    if let Some(v) = n.as_i64() {
        return v.to_string();
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

// =============================================================================
// Inventory Snapshot
// =============================================================================

/// Normalizes an inventory snapshot payload.
///
/// Rows without a barcode are dropped; other missing fields become empty
/// strings so that sale validation, not decoding, reports them. Row order
/// is preserved because exact matching takes the first hit.
pub fn normalize_snapshot(payload: &Value) -> Vec<InventoryEntry> {
    find_rows(payload, SNAPSHOT_WRAPPERS)
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|row| {
            Some(InventoryEntry {
                barcode: field_text(row, BARCODE_FIELDS)?,
                full_name: field_text(row, FULL_NAME_FIELDS).unwrap_or_default(),
                size: field_text(row, SIZE_FIELDS).unwrap_or_default(),
                symbol: field_text(row, SYMBOL_FIELDS).unwrap_or_default(),
            })
        })
        .collect()
}

// =============================================================================
// Outlet Roster
// =============================================================================

/// Normalizes an outlet roster payload. Rows without a symbol are dropped.
///
/// Location and selling point are kept verbatim (untrimmed); eligibility
/// decides how to compare them.
pub fn normalize_roster(payload: &Value) -> Vec<Outlet> {
    find_rows(payload, ROSTER_WRAPPERS)
        .iter()
        .filter_map(Value::as_object)
        .filter_map(|row| {
            Some(Outlet {
                symbol: field_text(row, SYMBOL_FIELDS)?,
                location: raw_text(row, LOCATION_FIELDS),
                role: OutletRole::from(raw_text(row, ROLE_FIELDS)),
                selling_point: raw_text(row, SELLING_POINT_FIELDS),
            })
        })
        .collect()
}

fn raw_text(row: &Map<String, Value>, aliases: &[&str]) -> String {
    aliases
        .iter()
        .find_map(|alias| row.get(*alias)?.as_str().map(str::to_string))
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_bare_array() {
        let payload = json!([
            {"barcode": "1234567890123", "fullName": "Kurtka skórzana klasyczna", "size": "M", "symbol": "K"},
            {"barcode": 555, "fullName": "Pasek", "size": "-", "symbol": "T"},
        ]);
        let entries = normalize_snapshot(&payload);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].full_name, "Kurtka skórzana klasyczna");
        assert_eq!(entries[1].barcode, "555");
    }

    #[test]
    fn test_integral_float_ids_lose_fraction() {
        let row = json!({"rowId": 39.0, "size": 1.5, "neg": -4});
        let row = row.as_object().unwrap();
        assert_eq!(field_text(row, &["rowId"]).as_deref(), Some("39"));
        assert_eq!(field_text(row, &["size"]).as_deref(), Some("1.5"));
        assert_eq!(field_text(row, &["neg"]).as_deref(), Some("-4"));
    }

    #[test]
    fn test_snapshot_wrapped_and_aliased() {
        let payload = json!({"products": [
            {"Kod_Kreskowy": " 42 ", "Nazwa": "Torba", "Rozmiar": "-", "Symbol": "P"},
            {"fullName": "no barcode here"},
            "not an object",
        ]});
        let entries = normalize_snapshot(&payload);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].barcode, "42");
        assert_eq!(entries[0].symbol, "P");
    }

    #[test]
    fn test_garbage_payloads_are_empty() {
        assert!(normalize_snapshot(&Value::Null).is_empty());
        assert!(normalize_snapshot(&json!("oops")).is_empty());
        assert!(normalize_snapshot(&json!({"error": 1})).is_empty());
        assert!(normalize_roster(&json!(42)).is_empty());
    }

    #[test]
    fn test_roster_keeps_raw_location() {
        let payload = json!({"data": [
            {"symbol": "K", "location": " Zakopane ", "role": "user", "sellpoint": "Krupówki"},
            {"location": "Zakopane"},
        ]});
        let roster = normalize_roster(&payload);
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].location, " Zakopane ");
        assert_eq!(roster[0].role, OutletRole::Other("user".into()));
        assert_eq!(roster[0].selling_point, "Krupówki");
    }
}
