//! Tracing setup for host applications.

use tracing_subscriber::EnvFilter;

use crate::error::{SyncError, SyncResult};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,kasa=debug,reqwest=warn";

/// Installs the global tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=kasa_sync=trace` - Show trace for the sync crate only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Returns an error instead of panicking when a subscriber is already set.
pub fn init_tracing() -> SyncResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| SyncError::InvalidConfig(format!("tracing subscriber: {}", e)))
}
