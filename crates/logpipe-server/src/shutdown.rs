//! Signal-aware graceful shutdown (spec §5: "the front-end drains
//! in-flight requests and closes the stream/DB/cache connections").
//!
//! Grounded on the teacher's `operational/shutdown.rs` signal-handling
//! shape, adapted to axum's own `with_graceful_shutdown` future (which
//! already holds off exit until in-flight requests finish).

use tokio::signal;
use tracing::info;

/// Resolves on the first SIGINT or SIGTERM, for use with
/// `axum::serve(...).with_graceful_shutdown(shutdown_signal())`.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, draining"),
        () = terminate => info!("received SIGTERM, draining"),
    }
}
