//! Full budget snapshots
//!
//! - JSON: machine-readable, can be imported back
//! - YAML: human-readable
//!
//! Report CSVs are written by the report types themselves.

pub mod json;
pub mod yaml;

pub use json::{
    export_full_json, import_from_json, read_snapshot, FullExport, EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_full_yaml, import_from_yaml};
