//! HTTP ingest and query front-end library (C6/C7, spec §4.6/§4.7).

pub mod config;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod state;

pub use config::ServerConfig;
pub use server::build_router;
pub use state::AppState;
