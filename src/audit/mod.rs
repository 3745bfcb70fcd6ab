//! Change history for categories and expenses
//!
//! Every create, update and delete made through the services is appended to
//! `audit.log` as one JSON object per line. Updates carry a short field diff.

mod diff;
mod entry;
mod logger;

pub use diff::diff_fields;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
