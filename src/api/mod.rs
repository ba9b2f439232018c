pub mod error;
pub mod forecast;
pub mod status;

use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, state::AppState};

pub fn router(state: AppState, cfg: &Config) -> Router {
    let dashboard = ServeFile::new(cfg.web.templates_dir.join("index.html"));
    let assets = ServeDir::new(&cfg.web.static_dir);

    let mut router = Router::new()
        .route("/", get(status::root))
        .route("/forecast", post(forecast::create_forecast))
        .route("/healthz", get(healthz))
        .route_service("/dashboard", dashboard)
        .nest_service("/static", assets)
        .with_state(state);

    if cfg.server.enable_cors {
        use tower_http::cors::AllowOrigin;
        let cors = CorsLayer::new()
            .allow_origin(AllowOrigin::exact("http://localhost:3000".parse().unwrap()))
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE]);
        router = router.layer(cors);
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(64 * 1024))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    cfg.server.request_timeout_secs,
                ))),
        )
        .layer(TraceLayer::new_for_http())
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}
