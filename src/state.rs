use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;
use crate::model::ModelStore;

/// Shared handler state: configuration plus the read-only model collection.
/// Handlers receive it explicitly through axum's `State` extractor, so tests
/// can hand them a fixture store instead.
#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub store: Arc<ModelStore>,
}

impl AppState {
    /// Load the model collection named by the configuration. Any failure
    /// here is fatal; the service must not start serving without its models.
    pub fn new(cfg: Config) -> Result<Self> {
        let store = ModelStore::load(&cfg.models.path)
            .with_context(|| format!("loading model collection from {}", cfg.models.path.display()))?;

        if store.is_empty() {
            warn!("model collection is empty; every forecast request will 404");
        } else {
            info!(models = store.len(), "model collection loaded");
        }

        Ok(Self::with_store(cfg, store))
    }

    pub fn with_store(cfg: Config, store: ModelStore) -> Self {
        Self { cfg, store: Arc::new(store) }
    }
}
