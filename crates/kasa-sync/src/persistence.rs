//! # Sale Persistence
//!
//! Hands a built [`SaleIntent`] to the remote sales endpoint.
//!
//! ## Submission
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SaleIntentBuilder::build() ──► SaleIntent                              │
//! │                                     │                                   │
//! │                                     ▼                                   │
//! │  HttpSaleSink::submit ──► POST {base_url}/{sales_path}                  │
//! │                           { ...intent, "date": "2026-10-18T09:30:00Z" } │
//! │                                     │                                   │
//! │            ┌────────────────────────┼────────────────────────┐          │
//! │            ▼                        ▼                        ▼          │
//! │          2xx                   401 / 403            400 / 409 / 422     │
//! │       SaleReceipt             Unauthorized              Rejected        │
//! │                                                                         │
//! │  On any failure the caller keeps its builder and may build + submit     │
//! │  again with the same inputs.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

use kasa_core::SaleIntent;

use crate::config::KasaConfig;
use crate::error::SyncResult;
use crate::http::ApiClient;

// =============================================================================
// Payload & Receipt
// =============================================================================

/// Wire body of a sale submission.
#[derive(Debug, Clone, Serialize)]
pub struct SalePayload<'a> {
    #[serde(flatten)]
    pub intent: &'a SaleIntent,
    /// When the sale was recorded at the till.
    pub date: DateTime<Utc>,
}

/// Acknowledgement from the persistence boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleReceipt {
    /// Server-assigned id, when the response carries one.
    pub id: Option<String>,
    /// The raw response body.
    pub body: Value,
}

impl SaleReceipt {
    fn from_body(body: Value) -> Self {
        let id = ["_id", "id", "saleId"]
            .iter()
            .find_map(|key| match body.get(key)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            });
        SaleReceipt { id, body }
    }
}

// =============================================================================
// Sink
// =============================================================================

/// Accepts finished sales.
#[async_trait]
pub trait SaleSink: Send + Sync {
    async fn submit(&self, intent: &SaleIntent) -> SyncResult<SaleReceipt>;
}

/// [`SaleSink`] that POSTs to the sales endpoint.
#[derive(Debug, Clone)]
pub struct HttpSaleSink {
    api: ApiClient,
    url: Url,
}

impl HttpSaleSink {
    pub fn new(api: ApiClient, url: Url) -> Self {
        Self { api, url }
    }

    pub fn from_config(config: &KasaConfig) -> SyncResult<Self> {
        Ok(Self::new(ApiClient::new(config)?, config.sales_url()?))
    }

    /// Submits with an explicit recording time.
    pub async fn submit_at(&self, intent: &SaleIntent, date: DateTime<Utc>) -> SyncResult<SaleReceipt> {
        let payload = SalePayload { intent, date };
        match self.api.post_json(self.url.clone(), &payload).await {
            Ok(body) => {
                let receipt = SaleReceipt::from_body(body);
                info!(
                    barcode = %intent.barcode(),
                    from = %intent.from(),
                    total = %intent.total(),
                    id = ?receipt.id,
                    "Sale recorded"
                );
                Ok(receipt)
            }
            Err(e) => {
                warn!(
                    barcode = %intent.barcode(),
                    error = %e,
                    retryable = e.is_retryable(),
                    "Sale submission failed"
                );
                Err(e)
            }
        }
    }
}

#[async_trait]
impl SaleSink for HttpSaleSink {
    async fn submit(&self, intent: &SaleIntent) -> SyncResult<SaleReceipt> {
        self.submit_at(intent, Utc::now()).await
    }
}
