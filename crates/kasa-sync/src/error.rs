//! # Sync Error Types
//!
//! Error types for everything that crosses the network or touches disk.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Protocol            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  InvalidResponse        │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │                         │ │
//! │  │  ConfigLoad/Save│  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │  Persistence (the remote side refused the sale)                   │ │
//! │  │                                                                   │ │
//! │  │  Unauthorized      401 / 403                                      │ │
//! │  │  Rejected          400 / 409 / 422, body kept for the user        │ │
//! │  │  ServerError       anything else non-2xx                          │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Classification never returns these: a failed remainder lookup degrades
//! to a placeholder label inside the classifier.

use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Error type covering every failure of the async edge.
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced a response (DNS, connect, TLS, reset).
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timeout.
    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Protocol Errors
    // =========================================================================
    /// The response body was not in a shape we understand.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // Persistence Errors
    // =========================================================================
    /// Credentials missing, expired or insufficient.
    #[error("Not authorized: {0}")]
    Unauthorized(String),

    /// The remote side refused the payload.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    /// Any other non-success status.
    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::InvalidResponse(err.to_string())
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SyncError::InvalidResponse(err.to_string())
        } else {
            SyncError::Http(err.to_string())
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization (for retry logic)
// =============================================================================

impl SyncError {
    /// Returns true if the same request may succeed when sent again.
    ///
    /// ## Retryable Errors
    /// - Transport failures and timeouts
    /// - 5xx and other unexpected statuses
    ///
    /// ## Non-Retryable Errors
    /// - Configuration errors
    /// - Authorization failures and rejected payloads
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SyncError::Http(_) | SyncError::Timeout(_) | SyncError::ServerError { .. }
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            SyncError::InvalidConfig(_)
                | SyncError::InvalidUrl(_)
                | SyncError::ConfigLoadFailed(_)
                | SyncError::ConfigSaveFailed(_)
        )
    }

    /// Returns true if the persistence boundary answered and refused the sale.
    pub fn is_persistence_failure(&self) -> bool {
        matches!(
            self,
            SyncError::Unauthorized(_) | SyncError::Rejected(_) | SyncError::ServerError { .. }
        )
    }
}
