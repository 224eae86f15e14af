//! Canonical record model, request validation, and the HTTP
//! route-template normalizer shared by the ingest and query front-ends.

#![warn(missing_docs)]

pub mod record;
pub mod routing;
pub mod validation;

pub use record::{LogRecord, StoredLog};
pub use routing::normalize_route;
pub use validation::Validator;

/// Log levels documented by the wire contract.
///
/// This is informational only (used for telemetry labels and docs) — the
/// validator does not reject unrecognised levels, since spec §3 requires
/// workers to tolerate unknown levels rather than crash on them.
pub const KNOWN_LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"];
