pub mod api;
pub mod config;
pub mod domain;
pub mod model;
pub mod state;
pub mod telemetry;
