//! # Matchers
//!
//! One function per taxonomy. Each takes the trimmed barcode and the
//! read-only context, and either decodes it or declines with `None`.
//!
//! The synchronous matchers are listed in [`SYNC_MATCHERS`] in priority
//! order; the classifier folds over that list and stops at the first hit.
//! The remainder step is separate because it needs a remote lookup.

use crate::error::LookupDegraded;
use crate::reference::{ReferenceKind, ReferenceTable};
use crate::types::{DecodedProduct, SourceKind, NO_SIZE};

use super::layout;
use super::ClassifyContext;

/// Signature shared by the synchronous matchers.
pub type Matcher = fn(&str, &ClassifyContext, &mut Vec<LookupDegraded>) -> Option<DecodedProduct>;

/// Synchronous matchers, highest priority first.
pub const SYNC_MATCHERS: [(SourceKind, Matcher); 4] = [
    (SourceKind::Catalogued, match_exact),
    (SourceKind::Jacket, match_jacket),
    (SourceKind::Bag, match_bag),
    (SourceKind::Wallet, match_wallet),
];

/// Barcode match against the inventory snapshot (first entry wins).
/// Both sides are compared trimmed.
///
/// A catalogued item whose barcode also has a bag/wallet/remainder shape
/// reports size `"-"`, since those taxonomies have no sizes.
pub fn match_exact(
    raw: &str,
    ctx: &ClassifyContext,
    _degraded: &mut Vec<LookupDegraded>,
) -> Option<DecodedProduct> {
    let entry = ctx.snapshot.iter().find(|entry| entry.barcode.trim() == raw)?;
    let size = if layout::reserved_shape(raw).is_some() {
        NO_SIZE.to_string()
    } else {
        entry.size.clone()
    };
    Some(DecodedProduct {
        full_name: entry.full_name.clone(),
        size,
        source_kind: SourceKind::Catalogued,
    })
}

/// `"<stock> <color> <size>"`, size reported separately as well.
pub fn match_jacket(
    raw: &str,
    ctx: &ClassifyContext,
    degraded: &mut Vec<LookupDegraded>,
) -> Option<DecodedProduct> {
    let fields = layout::jacket(raw)?;
    let tables = &ctx.tables;
    let stock = tables.stock.resolve(fields.stock, degraded);
    let color = tables.color.resolve(fields.color, degraded);
    let size = tables.size.resolve(fields.size, degraded);
    Some(DecodedProduct {
        full_name: format!("{} {} {}", stock, color, size),
        size,
        source_kind: SourceKind::Jacket,
    })
}

/// `"<bagCode> <colorName>"`.
pub fn match_bag(
    raw: &str,
    ctx: &ClassifyContext,
    degraded: &mut Vec<LookupDegraded>,
) -> Option<DecodedProduct> {
    let fields = layout::bag(raw)?;
    let bag = ctx.tables.bag.resolve(fields.row_code, degraded);
    let color = ctx.tables.color.resolve(fields.color, degraded);
    Some(DecodedProduct::sizeless(
        format!("{} {}", bag, color),
        SourceKind::Bag,
    ))
}

/// `"<walletCode> <colorName>"`.
pub fn match_wallet(
    raw: &str,
    ctx: &ClassifyContext,
    degraded: &mut Vec<LookupDegraded>,
) -> Option<DecodedProduct> {
    let fields = layout::wallet(raw)?;
    let wallet = ctx.tables.wallet.resolve(fields.wallet_code, degraded);
    let color = ctx.tables.color.resolve(fields.color, degraded);
    Some(DecodedProduct::sizeless(
        format!("{} {}", wallet, color),
        SourceKind::Wallet,
    ))
}

// =============================================================================
// Remainder
// =============================================================================

/// A remainder decode waiting for its product label from the remote catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemainderQuery {
    /// Digits 8-9, matched against the catalog's numeric row id.
    pub product_code: String,
    /// Color name, already resolved locally.
    pub color_name: String,
}

impl RemainderQuery {
    /// Finishes the decode with the fetched catalog, or with `None` when
    /// the fetch failed. Never fails itself.
    pub fn complete(
        &self,
        catalog: Option<&ReferenceTable>,
        degraded: &mut Vec<LookupDegraded>,
    ) -> DecodedProduct {
        let label = match catalog {
            Some(table) => table.resolve(&self.product_code, degraded),
            None => {
                let placeholder = ReferenceKind::Remainder.placeholder(&self.product_code);
                degraded.push(LookupDegraded {
                    table: ReferenceKind::Remainder,
                    code: self.product_code.clone(),
                    placeholder: placeholder.clone(),
                });
                placeholder
            }
        };
        DecodedProduct::sizeless(
            format!("{} {}", label, self.color_name),
            SourceKind::Remainder,
        )
    }
}

/// Prepares the remainder lookup if `raw` has the remainder layout.
pub fn match_remainder(
    raw: &str,
    ctx: &ClassifyContext,
    degraded: &mut Vec<LookupDegraded>,
) -> Option<RemainderQuery> {
    let fields = layout::remainder(raw)?;
    Some(RemainderQuery {
        product_code: fields.product_code.to_string(),
        color_name: ctx.tables.color.resolve(fields.color, degraded),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
