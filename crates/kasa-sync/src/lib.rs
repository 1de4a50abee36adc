//! # kasa-sync: Async Edge for Kasa
//!
//! Everything that waits on the network: the remainder catalog lookup,
//! the last-write-wins scan session and the sale persistence boundary.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Async Edge Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      ScanSession                                 │  │
//! │  │                                                                  │  │
//! │  │  One per barcode field; publishes (generation, barcode, state)  │  │
//! │  │  on a watch channel                                              │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │                               ▼                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ Barcode        │  │ Remainder      │  │  SaleSink              │    │
//! │  │ Classifier     │─►│ Catalog        │  │                        │    │
//! │  │                │  │                │  │ POSTs SaleIntent +     │    │
//! │  │ kasa-core chain│  │ GET records,   │  │ timestamp, maps status │    │
//! │  │ + remote step  │  │ ReferenceTable │  │ to SyncError           │    │
//! │  └────────────────┘  └───────┬────────┘  └───────────┬────────────┘    │
//! │                              │                       │                  │
//! │                              └──────────┬────────────┘                  │
//! │                                         ▼                               │
//! │                               ApiClient (reqwest)                       │
//! │                          KasaConfig: base URL, token, timeout           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - `KasaConfig` (TOML file + environment)
//! - [`error`] - `SyncError`
//! - [`http`] - Shared JSON client
//! - [`catalog`] - Remainder catalog trait and HTTP implementation
//! - [`classifier`] - Async `BarcodeClassifier`
//! - [`session`] - `ScanSession`
//! - [`persistence`] - `SaleSink` and `HttpSaleSink`
//! - [`telemetry`] - Tracing subscriber setup
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kasa_sync::{BarcodeClassifier, HttpRemainderCatalog, HttpSaleSink, KasaConfig, SaleSink};
//!
//! let config = KasaConfig::load_or_default(None);
//! let classifier = BarcodeClassifier::new(context, HttpRemainderCatalog::from_config(&config)?);
//!
//! let product = classifier.classify("0000100392222").await;
//! let intent = SaleIntentBuilder::new("0000100392222", product)
//!     .outlet(&outlet)
//!     .recorded_by(&user.symbol)
//!     .cash(["120"])
//!     .build()?;
//!
//! HttpSaleSink::from_config(&config)?.submit(&intent).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod http;
pub mod persistence;
pub mod session;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{HttpRemainderCatalog, RemainderCatalog};
pub use classifier::BarcodeClassifier;
pub use config::{AuthSettings, CatalogSettings, KasaConfig, PersistenceSettings};
pub use error::{SyncError, SyncResult};
pub use http::ApiClient;
pub use persistence::{HttpSaleSink, SalePayload, SaleReceipt, SaleSink};
pub use session::{ScanSession, ScanSnapshot, ScanState};
pub use telemetry::init_tracing;
