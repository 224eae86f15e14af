//! `GET /`: service descriptor (spec §6).

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceDescriptor {
    pub service: &'static str,
    pub version: &'static str,
    pub instance: String,
}

pub async fn root(State(state): State<AppState>) -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        service: "logpipe",
        version: env!("CARGO_PKG_VERSION"),
        instance: state.instance_name.clone(),
    })
}
