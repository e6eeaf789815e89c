//! Provider-agnostic list tracking model.
//!
//! Defines the canonical list status enumeration and the contracts a tracking
//! provider implements: a live per-entry adapter (`ListEntry`) and the
//! list-level operations (`ListProvider`), including portable backup/restore.

pub mod error;
pub mod list;

pub use error::ListError;
pub use list::{ListEntry, ListProvider, ListStatus};
