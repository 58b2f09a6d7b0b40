//! File-backed repositories.
//!
//! - [`triage`]: the triage records themselves.
//! - [`history`]: the append-only audit trail of record mutations.

pub(crate) mod helpers;
pub mod history;
pub mod triage;
