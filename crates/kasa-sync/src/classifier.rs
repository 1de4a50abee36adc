//! # Barcode Classifier
//!
//! Runs the synchronous chain from `kasa-core` and, for remainder
//! barcodes, the one remote catalog lookup.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  classify(raw)                                                          │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  classify_local(raw, ctx) ──► Ready(product) ─────────────────┐        │
//! │     │                                                          │        │
//! │     └──► AwaitingRemainder(query)                              │        │
//! │              │                                                 │        │
//! │              ▼                                                 │        │
//! │          catalog.fetch().await                                 │        │
//! │              ├── Ok(table)  ──► label from table / placeholder │        │
//! │              └── Err(e)     ──► Resztka_<code>  (warn!)        │        │
//! │                                         │                      │        │
//! │                                         ▼                      ▼        │
//! │                              degraded lookups logged at debug!          │
//! │                                         │                               │
//! │                                         ▼                               │
//! │                                   DecodedProduct                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Never fails. No timeout is added here; the HTTP client carries the
//! configured one.

use std::sync::Arc;

use tracing::{debug, warn};

use kasa_core::barcode::{
    classify_local, Classification, ClassifyContext, Decode, LocalClassification,
};
use kasa_core::DecodedProduct;

use crate::catalog::RemainderCatalog;

/// Classifies barcodes against a shared read-only context.
pub struct BarcodeClassifier<C> {
    context: Arc<ClassifyContext>,
    catalog: Arc<C>,
}

impl<C> Clone for BarcodeClassifier<C> {
    fn clone(&self) -> Self {
        Self {
            context: Arc::clone(&self.context),
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<C: RemainderCatalog> BarcodeClassifier<C> {
    pub fn new(context: ClassifyContext, catalog: C) -> Self {
        Self::with_shared(Arc::new(context), Arc::new(catalog))
    }

    pub fn with_shared(context: Arc<ClassifyContext>, catalog: Arc<C>) -> Self {
        Self { context, catalog }
    }

    /// The context classifications currently run against.
    pub fn context(&self) -> &Arc<ClassifyContext> {
        &self.context
    }

    /// Swaps in a reloaded snapshot and reference tables.
    pub fn replace_context(&mut self, context: ClassifyContext) {
        debug!(
            snapshot = context.snapshot.len(),
            "Replacing classification context"
        );
        self.context = Arc::new(context);
    }

    /// Runs only the synchronous part of the chain.
    pub fn classify_local(&self, raw: &str) -> LocalClassification {
        classify_local(raw, &self.context)
    }

    /// Completes a local pass, fetching the remainder catalog if needed.
    pub async fn complete(&self, raw: &str, local: LocalClassification) -> Decode {
        let remainder_code = match &local.classification {
            Classification::Ready(_) => None,
            Classification::AwaitingRemainder(query) => Some(query.product_code.clone()),
        };

        let decode = match remainder_code {
            None => local.finish(None),
            Some(code) => {
                debug!(barcode = %raw, code = %code, "Looking up remainder label");
                match self.catalog.fetch().await {
                    Ok(table) => local.finish(Some(&table)),
                    Err(e) => {
                        warn!(barcode = %raw, error = %e, "Remainder catalog lookup failed, using placeholder");
                        local.finish(None)
                    }
                }
            }
        };
        report(raw, &decode);
        decode
    }

    /// Full classification including placeholders used.
    pub async fn classify_detailed(&self, raw: &str) -> Decode {
        let local = self.classify_local(raw);
        self.complete(raw, local).await
    }

    /// Classifies `raw`; garbage yields `SourceKind::NotFound`.
    pub async fn classify(&self, raw: &str) -> DecodedProduct {
        self.classify_detailed(raw).await.product
    }
}

/// Logs every placeholder substitution of a finished decode.
pub(crate) fn report(raw: &str, decode: &Decode) {
    for degraded in &decode.degraded {
        debug!(
            barcode = %raw,
            table = %degraded.table,
            code = %degraded.code,
            placeholder = %degraded.placeholder,
            "Reference lookup degraded to placeholder"
        );
    }
    debug!(
        barcode = %raw,
        kind = ?decode.product.source_kind,
        "Barcode classified"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SyncError, SyncResult};
    use async_trait::async_trait;
    use kasa_core::reference::{ReferenceKind, ReferenceTable, ReferenceTables};
    use kasa_core::SourceKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCatalog {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingCatalog {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl RemainderCatalog for CountingCatalog {
        async fn fetch(&self) -> SyncResult<ReferenceTable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(SyncError::Http("connection refused".into()));
            }
            Ok(ReferenceTable::from_pairs(
                ReferenceKind::Remainder,
                [("39", "TMC 444.222")],
            ))
        }
    }

    fn context() -> ClassifyContext {
        ClassifyContext::new(
            Vec::new(),
            ReferenceTables {
                color: ReferenceTable::from_pairs(ReferenceKind::Color, [("01", "CZARNY")]),
                ..ReferenceTables::default()
            },
        )
    }

    #[tokio::test]
    async fn test_remainder_uses_exactly_one_lookup() {
        let catalog = Arc::new(CountingCatalog::new(false));
        let classifier = BarcodeClassifier::with_shared(Arc::new(context()), Arc::clone(&catalog));

        let product = classifier.classify("0000100392222").await;
        assert_eq!(product.full_name, "TMC 444.222 CZARNY");
        assert_eq!(product.size, "-");
        assert_eq!(product.source_kind, SourceKind::Remainder);
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades() {
        let classifier = BarcodeClassifier::new(context(), CountingCatalog::new(true));
        let decode = classifier.classify_detailed("0000100392222").await;
        assert_eq!(decode.product.full_name, "Resztka_39 CZARNY");
        assert_eq!(decode.product.source_kind, SourceKind::Remainder);
        assert_eq!(decode.degraded.len(), 1);
    }

    #[tokio::test]
    async fn test_non_remainder_skips_catalog() {
        let catalog = Arc::new(CountingCatalog::new(false));
        let classifier = BarcodeClassifier::with_shared(Arc::new(context()), Arc::clone(&catalog));

        assert!(!classifier.classify("INVALID_BARCODE_123").await.is_found());
        assert_eq!(
            classifier.classify("0000110041234").await.source_kind,
            SourceKind::Bag
        );
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_replace_context() {
        let mut classifier = BarcodeClassifier::new(ClassifyContext::default(), CountingCatalog::new(false));
        assert_eq!(
            classifier.classify("0000100392222").await.full_name,
            "TMC 444.222 Kolor_01"
        );

        classifier.replace_context(context());
        assert_eq!(
            classifier.classify("0000100392222").await.full_name,
            "TMC 444.222 CZARNY"
        );
    }
}
