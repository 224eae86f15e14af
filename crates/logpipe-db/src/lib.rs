//! Relational store writer and reader (C3/C4, spec §4.3/§4.4).
//!
//! Grounded on the teacher's `fraiseql-core/src/db/postgres/adapter.rs`:
//! a `deadpool_postgres::Pool` built from a `tokio_postgres::Config`,
//! one transaction per batch, explicit `CAST($n AS JSONB)` to avoid the
//! implicit string coercion bug the source exhibited.

mod pool;
mod reader;
mod writer;

pub use pool::{build_pool, PoolSettings};
pub use reader::{PgReader, RecentDevice};
pub use writer::{InsertRow, PgWriter};
