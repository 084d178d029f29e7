//! Shared UI components.
//!
//! ARCHITECTURE
//! ============
//! Components consume the session contract through `SessionContext`; none
//! of them read storage keys or re-derive roles on their own.

pub mod guarded;
pub mod navbar;
