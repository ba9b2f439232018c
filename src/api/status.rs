use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// GET / - service status and the loaded series names
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub available_variables: Vec<String>,
}

pub async fn root(State(st): State<AppState>) -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "running",
        available_variables: st.store.variables(),
    })
}
