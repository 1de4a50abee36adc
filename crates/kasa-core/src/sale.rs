//! # Sale Intent
//!
//! Turns a decode, a chosen outlet and the typed payment entries into the
//! record handed to the persistence boundary.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Scan "0000401003136" ──► DecodedProduct (Wallet, "IR 3212.313 ...")    │
//! │  Pick outlet "K"                                                        │
//! │  Cash: ["100", ""]   Card: ["49,99"]                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleIntentBuilder::build() ← THIS MODULE                               │
//! │       │                                                                 │
//! │       ├── barcode blank?        → EmptyBarcode                          │
//! │       ├── decode NotFound?      → ProductNotFound                       │
//! │       ├── name/size/from blank? → MissingField                          │
//! │       ├── cash + card <= 0?     → NoPayment                             │
//! │       │                                                                 │
//! │       └── OK → SaleIntent (immutable) → kasa-sync SaleSink              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Building is pure. After a persistence failure the caller simply calls
//! `build()` again on the same builder.

use serde::Serialize;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;
use crate::types::{DecodedProduct, Outlet};
use crate::validation::{parse_payment_entries, require_field, require_payment};

// =============================================================================
// Sale Intent
// =============================================================================

/// A validated sale, ready for submission.
///
/// Fields are private: the only way to obtain one is a successful build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleIntent {
    full_name: String,
    size: String,
    barcode: String,
    selling_point: String,
    from: String,
    cash_entries: Vec<Money>,
    card_entries: Vec<Money>,
    symbol: String,
}

impl SaleIntent {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    /// Selling point credited with the sale.
    pub fn selling_point(&self) -> &str {
        &self.selling_point
    }

    /// Symbol of the outlet the item is sold from.
    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn cash_entries(&self) -> &[Money] {
        &self.cash_entries
    }

    pub fn card_entries(&self) -> &[Money] {
        &self.card_entries
    }

    /// Symbol of the user who recorded the sale.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Sum of all cash and card amounts.
    pub fn total(&self) -> Money {
        self.cash_entries.iter().chain(&self.card_entries).sum()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Collects the inputs of a sale and validates them on [`build`](Self::build).
///
/// ## Example
/// ```rust
/// use kasa_core::sale::SaleIntentBuilder;
/// use kasa_core::{DecodedProduct, Outlet, OutletRole, SourceKind};
///
/// let decoded = DecodedProduct::sizeless("IR 3212.313 BRĄZOWY".into(), SourceKind::Wallet);
/// let outlet = Outlet {
///     symbol: "K".into(),
///     location: "Zakopane".into(),
///     role: OutletRole::from("user"),
///     selling_point: "Krupówki".into(),
/// };
///
/// let intent = SaleIntentBuilder::new("0000401003136", decoded)
///     .outlet(&outlet)
///     .recorded_by("K")
///     .cash(["100", ""])
///     .card(["49,99"])
///     .build()
///     .unwrap();
///
/// assert_eq!(intent.from(), "K");
/// assert_eq!(intent.total().minor_units(), 14999);
/// ```
#[derive(Debug, Clone)]
pub struct SaleIntentBuilder {
    barcode: String,
    decoded: DecodedProduct,
    outlet: Option<Outlet>,
    recorded_by: String,
    cash: Vec<String>,
    card: Vec<String>,
}

impl SaleIntentBuilder {
    pub fn new(barcode: impl Into<String>, decoded: DecodedProduct) -> Self {
        SaleIntentBuilder {
            barcode: barcode.into(),
            decoded,
            outlet: None,
            recorded_by: String::new(),
            cash: Vec::new(),
            card: Vec::new(),
        }
    }

    /// The outlet credited with the sale.
    pub fn outlet(mut self, outlet: &Outlet) -> Self {
        self.outlet = Some(outlet.clone());
        self
    }

    /// Symbol of the signed-in user.
    pub fn recorded_by(mut self, symbol: impl Into<String>) -> Self {
        self.recorded_by = symbol.into();
        self
    }

    /// Raw cash entries as typed; blank or unparseable ones are ignored.
    pub fn cash<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cash = entries.into_iter().map(Into::into).collect();
        self
    }

    /// Raw card entries as typed; blank or unparseable ones are ignored.
    pub fn card<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.card = entries.into_iter().map(Into::into).collect();
        self
    }

    /// Validates the inputs and produces the intent.
    pub fn build(&self) -> ValidationResult<SaleIntent> {
        let barcode = self.barcode.trim();
        if barcode.is_empty() {
            return Err(ValidationError::EmptyBarcode);
        }

        if !self.decoded.is_found() {
            return Err(ValidationError::ProductNotFound {
                barcode: barcode.to_string(),
            });
        }

        let (from, selling_point) = match &self.outlet {
            Some(outlet) => (outlet.symbol.trim(), outlet.selling_point.trim()),
            None => ("", ""),
        };
        require_field("fullName", &self.decoded.full_name)?;
        require_field("size", &self.decoded.size)?;
        require_field("from", from)?;

        let cash_entries = parse_payment_entries(&self.cash);
        let card_entries = parse_payment_entries(&self.card);
        require_payment(&cash_entries, &card_entries)?;

        Ok(SaleIntent {
            full_name: self.decoded.full_name.trim().to_string(),
            size: self.decoded.size.trim().to_string(),
            barcode: barcode.to_string(),
            selling_point: selling_point.to_string(),
            from: from.to_string(),
            cash_entries,
            card_entries,
            symbol: self.recorded_by.trim().to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OutletRole, SourceKind};

    fn outlet() -> Outlet {
        Outlet {
            symbol: "K".into(),
            location: "Zakopane".into(),
            role: OutletRole::from("user"),
            selling_point: "Krupówki".into(),
        }
    }

    fn jacket() -> DecodedProduct {
        DecodedProduct {
            full_name: "Kurtka skórzana klasyczna Czarny M".into(),
            size: "M".into(),
            source_kind: SourceKind::Jacket,
        }
    }

    fn builder() -> SaleIntentBuilder {
        SaleIntentBuilder::new("0200100200009", jacket())
            .outlet(&outlet())
            .recorded_by("T")
            .cash(["250"])
    }

    #[test]
    fn test_build_success() {
        let intent = builder().card(["", "abc", "49,50"]).build().unwrap();
        assert_eq!(intent.full_name(), "Kurtka skórzana klasyczna Czarny M");
        assert_eq!(intent.size(), "M");
        assert_eq!(intent.barcode(), "0200100200009");
        assert_eq!(intent.selling_point(), "Krupówki");
        assert_eq!(intent.from(), "K");
        assert_eq!(intent.symbol(), "T");
        assert_eq!(intent.cash_entries(), &[Money::from_minor(25000)]);
        assert_eq!(intent.card_entries(), &[Money::from_minor(4950)]);
        assert_eq!(intent.total(), Money::from_minor(29950));
    }

    #[test]
    fn test_empty_barcode_checked_first() {
        let err = SaleIntentBuilder::new("  ", DecodedProduct::not_found())
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyBarcode);
    }

    #[test]
    fn test_not_found_before_missing_fields() {
        let err = SaleIntentBuilder::new("INVALID_BARCODE_123", DecodedProduct::not_found())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::ProductNotFound {
                barcode: "INVALID_BARCODE_123".into()
            }
        );
    }

    #[test]
    fn test_missing_fields() {
        let mut decoded = jacket();
        decoded.size = " ".into();
        let err = SaleIntentBuilder::new("0200100200009", decoded)
            .outlet(&outlet())
            .cash(["10"])
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "size".into() });

        let err = SaleIntentBuilder::new("0200100200009", jacket())
            .cash(["10"])
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "from".into() });
    }

    #[test]
    fn test_missing_field_before_payment() {
        let err = SaleIntentBuilder::new("0200100200009", jacket())
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField { field: "from".into() });
    }

    #[test]
    fn test_no_payment() {
        let err = SaleIntentBuilder::new("0200100200009", jacket())
            .outlet(&outlet())
            .cash(["", "0", "x"])
            .card(["0,00"])
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::NoPayment);
    }

    #[test]
    fn test_rebuild_is_identical() {
        let builder = builder();
        assert_eq!(builder.build().unwrap(), builder.build().unwrap());
    }

    #[test]
    fn test_serialized_shape() {
        let intent = builder().build().unwrap();
        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json["fullName"], "Kurtka skórzana klasyczna Czarny M");
        assert_eq!(json["sellingPoint"], "Krupówki");
        assert_eq!(json["from"], "K");
        assert_eq!(json["cashEntries"][0], 25000);
    }
}
