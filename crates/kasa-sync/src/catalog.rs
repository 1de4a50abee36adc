//! # Remainder Catalog
//!
//! The single remote lookup in the classification chain: leftover-stock
//! ("remainder") product labels keyed by a numeric row id.
//!
//! ```text
//! GET {base_url}/{remainder_path}
//!   ──► [{"rowId": 39, "label": "TMC 444.222"}, ...]       (bare list)
//!   ──► {"data": [...]}  /  {"remainders": [...]}         (wrapped list)
//!   ──► ReferenceTable(kind = Remainder)
//! ```
//!
//! Failures are returned to the caller; the classifier turns them into a
//! `Resztka_<code>` placeholder.

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use kasa_core::reference::{ReferenceKind, ReferenceTable};

use crate::config::KasaConfig;
use crate::error::{SyncError, SyncResult};
use crate::http::ApiClient;

/// Source of remainder records.
#[async_trait]
pub trait RemainderCatalog: Send + Sync {
    /// Fetches the current remainder records as a lookup table.
    async fn fetch(&self) -> SyncResult<ReferenceTable>;
}

/// [`RemainderCatalog`] backed by the HTTP API.
#[derive(Debug, Clone)]
pub struct HttpRemainderCatalog {
    api: ApiClient,
    url: Url,
}

impl HttpRemainderCatalog {
    pub fn new(api: ApiClient, url: Url) -> Self {
        Self { api, url }
    }

    pub fn from_config(config: &KasaConfig) -> SyncResult<Self> {
        Ok(Self::new(ApiClient::new(config)?, config.remainder_url()?))
    }
}

#[async_trait]
impl RemainderCatalog for HttpRemainderCatalog {
    async fn fetch(&self) -> SyncResult<ReferenceTable> {
        let payload = self.api.get_json(self.url.clone()).await?;
        let table = remainder_table(&payload)?;
        debug!(url = %self.url, records = table.len(), "Fetched remainder catalog");
        Ok(table)
    }
}

/// Normalizes a remainder payload; anything that is not a list or an
/// object wrapping one is a protocol error.
fn remainder_table(payload: &Value) -> SyncResult<ReferenceTable> {
    match payload {
        Value::Array(_) | Value::Object(_) => {
            Ok(ReferenceTable::from_payload(ReferenceKind::Remainder, payload))
        }
        other => Err(SyncError::InvalidResponse(format!(
            "expected a list of remainder records, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
