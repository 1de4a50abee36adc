//! # Outlet Eligibility
//!
//! Decides which outlets may be credited with a sale.
//!
//! ## Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Outlet Eligibility                                   │
//! │                                                                         │
//! │  role == dom ──────────────────────────────────────────► ELIGIBLE       │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  role is admin / magazyn ──────────────────────────────► EXCLUDED       │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  trim(location) == trim(user.location)                                  │
//! │  AND trim(selling_point) is non-empty ─────────────────► ELIGIBLE       │
//! │       │ otherwise                                                       │
//! │       ▼                                                                 │
//! │  EXCLUDED                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Location comparison is trim-only and case-sensitive.
//!
//! [`eligible_outlets`] does not check whether the scanned item is stocked
//! at the outlet. Callers that want that stricter behavior apply
//! [`stocked_outlets`] on top.

use std::collections::HashSet;

use crate::types::{CurrentUser, InventoryEntry, Outlet, OutletRole};

/// Returns true if `outlet` may be credited with a sale recorded by `user`.
pub fn is_eligible(user: &CurrentUser, outlet: &Outlet) -> bool {
    if outlet.role == OutletRole::Dom {
        return true;
    }
    !outlet.role.is_excluded()
        && outlet.location.trim() == user.location.trim()
        && !outlet.selling_point.trim().is_empty()
}

/// Filters the roster down to outlets that may be credited, keeping roster order.
pub fn eligible_outlets<'a>(user: &CurrentUser, roster: &'a [Outlet]) -> Vec<&'a Outlet> {
    roster
        .iter()
        .filter(|outlet| is_eligible(user, outlet))
        .collect()
}

/// Proposes the outlet to preselect: the user's own outlet if eligible,
/// otherwise the first eligible one.
pub fn default_outlet<'a>(user: &CurrentUser, eligible: &[&'a Outlet]) -> Option<&'a Outlet> {
    eligible
        .iter()
        .find(|outlet| outlet.symbol == user.symbol)
        .or_else(|| eligible.first())
        .copied()
}

/// Narrows `eligible` to outlets whose symbol holds a snapshot entry with
/// this exact barcode.
pub fn stocked_outlets<'a>(
    barcode: &str,
    snapshot: &[InventoryEntry],
    eligible: &[&'a Outlet],
) -> Vec<&'a Outlet> {
    let barcode = barcode.trim();
    let holders: HashSet<&str> = snapshot
        .iter()
        .filter(|entry| entry.barcode.trim() == barcode)
        .map(|entry| entry.symbol.as_str())
        .collect();
    eligible
        .iter()
        .filter(|outlet| holders.contains(outlet.symbol.as_str()))
        .copied()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
