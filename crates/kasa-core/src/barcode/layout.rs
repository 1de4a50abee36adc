//! # Barcode Layouts
//!
//! Fixed-position field extraction for the four in-house taxonomies.
//!
//! ## Layouts (1-based digit positions)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Jacket     len == 13                                                  │
//! │  ┌─────┬────┬─────┬──────┬───┐                                         │
//! │  │stock│colr│size │ 0000 │ c │   stock != "000"                        │
//! │  │ 1-3 │4-5 │ 6-8 │ 9-12 │13 │                                         │
//! │  └─────┴────┴─────┴──────┴───┘                                         │
//! │                                                                         │
//! │  Reserved prefix "000", partitioned on digits 6 and 7:                 │
//! │  ┌─────┬────┬───┬───┬─────────                                         │
//! │  │ 000 │colr│ 6 │ 7 │ ...                                             │
//! │  └─────┴────┴───┴───┴─────────                                         │
//! │     digit6 != 0                ──► Bag        row number = 6-9         │
//! │     digit6 == 0, digit7 != 0   ──► Wallet     wallet number = 7-9      │
//! │     digit6 == 0, digit7 == 0   ──► Remainder  product code = 8-9       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function checks length before slicing and returns `None` on short,
//! non-ASCII or otherwise garbled input. None of them panic.

use serde::{Deserialize, Serialize};

/// Leading digits that mark the bag/wallet/remainder address space.
pub const RESERVED_PREFIX: &str = "000";

/// Literal filler in positions 9-12 of a jacket barcode.
const JACKET_FILLER: &str = "0000";

const JACKET_LEN: usize = 13;
const BAG_MIN_LEN: usize = 13;
const WALLET_LEN: usize = 13;
const REMAINDER_MIN_LEN: usize = 9;

// =============================================================================
// Field Sets
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JacketFields<'a> {
    pub stock: &'a str,
    pub color: &'a str,
    pub size: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagFields<'a> {
    pub color: &'a str,
    /// Digits 6-9 as printed.
    pub row_code: &'a str,
    pub row_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalletFields<'a> {
    pub color: &'a str,
    /// Digits 7-9 as printed.
    pub wallet_code: &'a str,
    pub wallet_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemainderFields<'a> {
    pub color: &'a str,
    /// Digits 8-9, the remote catalog row id.
    pub product_code: &'a str,
}

/// Which reserved-prefix taxonomy a barcode's shape belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservedShape {
    Bag,
    Wallet,
    Remainder,
}

// =============================================================================
// Parsers
// =============================================================================

/// Returns the jacket fields, or `None` if `raw` is not a jacket barcode.
pub fn jacket(raw: &str) -> Option<JacketFields<'_>> {
    if raw.len() != JACKET_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if &raw[8..12] != JACKET_FILLER {
        return None;
    }
    let stock = &raw[0..3];
    // "000" belongs to bags/wallets/remainders, never to a jacket.
    if stock == RESERVED_PREFIX {
        return None;
    }
    Some(JacketFields {
        stock,
        color: &raw[3..5],
        size: &raw[5..8],
    })
}

/// Returns the bag fields, or `None` if `raw` is not a bag barcode.
pub fn bag(raw: &str) -> Option<BagFields<'_>> {
    if raw.len() < BAG_MIN_LEN || !reserved(raw) {
        return None;
    }
    let bytes = raw.as_bytes();
    if bytes[5] == b'0' {
        return None;
    }
    let row_code = &raw[5..9];
    let row_number = positive_number(row_code)?;
    Some(BagFields {
        color: &raw[3..5],
        row_code,
        row_number,
    })
}

/// Returns the wallet fields, or `None` if `raw` is not a wallet barcode.
pub fn wallet(raw: &str) -> Option<WalletFields<'_>> {
    if raw.len() != WALLET_LEN || !reserved(raw) {
        return None;
    }
    let bytes = raw.as_bytes();
    if bytes[5] != b'0' || bytes[6] == b'0' {
        return None;
    }
    let wallet_code = &raw[6..9];
    let wallet_number = positive_number(wallet_code)?;
    Some(WalletFields {
        color: &raw[3..5],
        wallet_code,
        wallet_number,
    })
}

/// Returns the remainder fields, or `None` if `raw` is not a remainder barcode.
pub fn remainder(raw: &str) -> Option<RemainderFields<'_>> {
    if raw.len() < REMAINDER_MIN_LEN || !reserved(raw) {
        return None;
    }
    let bytes = raw.as_bytes();
    if bytes[5] != b'0' || bytes[6] != b'0' {
        return None;
    }
    Some(RemainderFields {
        color: &raw[3..5],
        product_code: &raw[7..9],
    })
}

/// Classifies the shape of a reserved-prefix barcode, if it has one.
///
/// At most one shape can apply: the digit 6/7 rules are mutually exclusive.
pub fn reserved_shape(raw: &str) -> Option<ReservedShape> {
    if bag(raw).is_some() {
        Some(ReservedShape::Bag)
    } else if wallet(raw).is_some() {
        Some(ReservedShape::Wallet)
    } else if remainder(raw).is_some() {
        Some(ReservedShape::Remainder)
    } else {
        None
    }
}

/// ASCII input starting with the reserved prefix.
fn reserved(raw: &str) -> bool {
    raw.is_ascii() && raw.starts_with(RESERVED_PREFIX)
}

fn positive_number(digits: &str) -> Option<u32> {
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jacket_fields() {
        let fields = jacket("0200100200009").unwrap();
        assert_eq!(fields.stock, "020");
        assert_eq!(fields.color, "01");
        assert_eq!(fields.size, "002");
    }

    #[test]
    fn test_jacket_rejects() {
        assert!(jacket("0000100200009").is_none(), "reserved stock");
        assert!(jacket("0200100210009").is_none(), "filler not 0000");
        assert!(jacket("020010020000").is_none(), "12 digits");
        assert!(jacket("02001002000091").is_none(), "14 digits");
        assert!(jacket("02001002x0009").is_none(), "non-digit");
    }

    #[test]
    fn test_bag_fields() {
        let fields = bag("0000110041234").unwrap();
        assert_eq!(fields.color, "01");
        assert_eq!(fields.row_code, "1004");
        assert_eq!(fields.row_number, 1004);

        // longer than 13 is still a bag
        assert!(bag("00001100412345").is_some());
        assert!(bag("000011004123").is_none());
        assert!(bag("00001x0041234").is_none());
    }

    #[test]
    fn test_wallet_fields() {
        let fields = wallet("0000401003136").unwrap();
        assert_eq!(fields.color, "04");
        assert_eq!(fields.wallet_code, "100");
        assert_eq!(fields.wallet_number, 100);

        assert!(wallet("00004010031361").is_none(), "must be exactly 13");
        assert!(wallet("0000400103136").is_none(), "digit 7 is zero");
    }

    #[test]
    fn test_remainder_fields() {
        let fields = remainder("0000100392222").unwrap();
        assert_eq!(fields.color, "01");
        assert_eq!(fields.product_code, "39");

        assert!(remainder("000010039").is_some(), "nine is enough");
        assert!(remainder("00001003").is_none());
    }

    #[test]
    fn test_reserved_partition() {
        assert_eq!(reserved_shape("0000110041234"), Some(ReservedShape::Bag));
        assert_eq!(reserved_shape("0000401003136"), Some(ReservedShape::Wallet));
        assert_eq!(reserved_shape("0000100392222"), Some(ReservedShape::Remainder));
        assert_eq!(reserved_shape("0200100200009"), None);
        assert_eq!(reserved_shape(""), None);
        assert_eq!(reserved_shape("000"), None);
    }

    #[test]
    fn test_garbled_input_never_panics() {
        for raw in ["", "0", "00", "000ą", "000ąąąąąąąą", "żółw", "INVALID_BARCODE_123"] {
            assert!(jacket(raw).is_none());
            assert!(bag(raw).is_none());
            assert!(wallet(raw).is_none());
            assert!(remainder(raw).is_none());
        }
    }
}
