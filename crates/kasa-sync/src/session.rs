//! # Scan Session
//!
//! Owns the decode shown for the barcode field. Every input change runs
//! the synchronous chain at once; remainder barcodes publish `Pending`
//! and finish in a background task.
//!
//! ## Last Write Wins
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  input("0000100392222")   gen=1 ──► Pending ──► spawn lookup #1        │
//! │  input("0000401003136")   gen=2 ──► abort #1 ──► Decoded(wallet)       │
//! │                                                                         │
//! │  lookup #1 (if it still finishes):                                     │
//! │      send_if_modified(|s| s.generation == 1)  ──► false, dropped       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Readers get `(generation, barcode, state)` together from a
//! `tokio::sync::watch` channel, so a decode is never paired with a barcode
//! it was not computed from. The generation check runs under the channel's
//! lock.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use kasa_core::barcode::{Classification, ClassifyContext};
use kasa_core::DecodedProduct;

use crate::catalog::RemainderCatalog;
use crate::classifier::{report, BarcodeClassifier};

// =============================================================================
// State
// =============================================================================

/// What the barcode field currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Nothing entered yet, or the session was reset.
    Idle,
    /// Remainder layout recognised; waiting for the catalog.
    Pending,
    /// Final decode for this barcode (may be `NotFound`).
    Decoded(DecodedProduct),
}

/// One published state together with the input it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSnapshot {
    pub generation: u64,
    pub barcode: String,
    pub state: ScanState,
}

impl ScanSnapshot {
    fn idle(generation: u64) -> Self {
        ScanSnapshot {
            generation,
            barcode: String::new(),
            state: ScanState::Idle,
        }
    }

    /// The decoded product, if the state is final.
    pub fn product(&self) -> Option<&DecodedProduct> {
        match &self.state {
            ScanState::Decoded(product) => Some(product),
            _ => None,
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// Last-write-wins decode state for one barcode input field.
///
/// `input` spawns onto the ambient Tokio runtime, so it must be called from
/// within one.
pub struct ScanSession<C> {
    classifier: BarcodeClassifier<C>,
    generation: u64,
    sender: Arc<watch::Sender<ScanSnapshot>>,
    in_flight: Option<JoinHandle<()>>,
}

impl<C: RemainderCatalog + 'static> ScanSession<C> {
    pub fn new(classifier: BarcodeClassifier<C>) -> Self {
        let (sender, _) = watch::channel(ScanSnapshot::idle(0));
        Self {
            classifier,
            generation: 0,
            sender: Arc::new(sender),
            in_flight: None,
        }
    }

    /// Receiver observing every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ScanSnapshot> {
        self.sender.subscribe()
    }

    /// The snapshot currently published.
    pub fn current(&self) -> ScanSnapshot {
        self.sender.borrow().clone()
    }

    /// Handles a change of the barcode field and returns the snapshot
    /// published synchronously (`Decoded` or `Pending`).
    pub fn input(&mut self, raw: &str) -> ScanSnapshot {
        let generation = self.advance();
        let local = self.classifier.classify_local(raw);
        let awaiting = matches!(local.classification, Classification::AwaitingRemainder(_));

        if !awaiting {
            let decode = local.finish(None);
            report(raw, &decode);
            return self.publish(generation, raw, ScanState::Decoded(decode.product));
        }

        // Pending goes out before the task exists, so the task's result
        // can never be overwritten by it.
        let pending = self.publish(generation, raw, ScanState::Pending);

        let classifier = self.classifier.clone();
        let sender = Arc::clone(&self.sender);
        let barcode = raw.to_string();
        self.in_flight = Some(tokio::spawn(async move {
            let product = classifier.complete(&barcode, local).await.product;
            let applied = sender.send_if_modified(|current| {
                if current.generation != generation {
                    return false;
                }
                current.state = ScanState::Decoded(product);
                true
            });
            if !applied {
                debug!(barcode = %barcode, generation, "Discarding stale remainder decode");
            }
        }));

        pending
    }

    /// Clears the field.
    pub fn reset(&mut self) -> ScanSnapshot {
        let generation = self.advance();
        self.sender.send_replace(ScanSnapshot::idle(generation));
        self.current()
    }

    /// Swaps in a reloaded snapshot and reference tables for later inputs.
    pub fn replace_context(&mut self, context: ClassifyContext) {
        self.classifier.replace_context(context);
    }

    /// Starts a new generation, aborting any lookup of the previous one.
    fn advance(&mut self) -> u64 {
        self.generation += 1;
        if let Some(stale) = self.in_flight.take() {
            if !stale.is_finished() {
                debug!(generation = self.generation - 1, "Aborting superseded remainder lookup");
            }
            stale.abort();
        }
        self.generation
    }

    fn publish(&self, generation: u64, raw: &str, state: ScanState) -> ScanSnapshot {
        let snapshot = ScanSnapshot {
            generation,
            barcode: raw.to_string(),
            state,
        };
        self.sender.send_replace(snapshot.clone());
        snapshot
    }
}

impl<C> Drop for ScanSession<C> {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncResult;
    use async_trait::async_trait;
    use kasa_core::reference::{ReferenceKind, ReferenceTable, ReferenceTables};
    use kasa_core::SourceKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct SlowCatalog {
        delay: Duration,
        completed: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl RemainderCatalog for SlowCatalog {
        async fn fetch(&self) -> SyncResult<ReferenceTable> {
            tokio::time::sleep(self.delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(ReferenceTable::from_pairs(
                ReferenceKind::Remainder,
                [("39", "TMC 444.222")],
            ))
        }
    }

    fn session(completed: Arc<AtomicUsize>) -> ScanSession<SlowCatalog> {
        let context = ClassifyContext::new(
            Vec::new(),
            ReferenceTables {
                color: ReferenceTable::from_pairs(
                    ReferenceKind::Color,
                    [("01", "CZARNY"), ("04", "BRĄZOWY")],
                ),
                wallet: ReferenceTable::from_pairs(ReferenceKind::Wallet, [("100", "IR 3212.313")]),
                ..ReferenceTables::default()
            },
        );
        let catalog = SlowCatalog {
            delay: Duration::from_millis(200),
            completed,
        };
        ScanSession::new(BarcodeClassifier::new(context, catalog))
    }

    #[tokio::test]
    async fn test_sync_path_publishes_immediately() {
        let mut session = session(Arc::new(AtomicUsize::new(0)));
        assert_eq!(session.current().state, ScanState::Idle);

        let snapshot = session.input("0000401003136");
        assert_eq!(snapshot.generation, 1);
        assert_eq!(snapshot.barcode, "0000401003136");
        assert_eq!(snapshot.product().unwrap().full_name, "IR 3212.313 BRĄZOWY");
        assert_eq!(session.current(), snapshot);

        let snapshot = session.input("INVALID_BARCODE_123");
        assert_eq!(snapshot.product().unwrap().source_kind, SourceKind::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remainder_goes_pending_then_decoded() {
        let mut session = session(Arc::new(AtomicUsize::new(0)));
        let mut rx = session.subscribe();

        let snapshot = session.input("0000100392222");
        assert_eq!(snapshot.state, ScanState::Pending);

        let done = rx
            .wait_for(|s| matches!(s.state, ScanState::Decoded(_)))
            .await
            .unwrap()
            .clone();
        assert_eq!(done.generation, 1);
        assert_eq!(done.barcode, "0000100392222");
        assert_eq!(done.product().unwrap().full_name, "TMC 444.222 CZARNY");
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_input_supersedes_lookup() {
        let completed = Arc::new(AtomicUsize::new(0));
        let mut session = session(Arc::clone(&completed));

        session.input("0000100392222");
        let latest = session.input("0000401003136");

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(session.current(), latest);
        assert_eq!(session.current().product().unwrap().source_kind, SourceKind::Wallet);
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_discards_pending() {
        let mut session = session(Arc::new(AtomicUsize::new(0)));
        session.input("0000100392222");
        let idle = session.reset();

        tokio::time::sleep(Duration::from_secs(1)).await;

        assert_eq!(idle.state, ScanState::Idle);
        assert_eq!(session.current(), idle);
    }
}
