use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::{Forecaster, SarimaModel, SeasonalNaiveModel};

/// Artifact schema revision this build understands.
pub const ARTIFACT_VERSION: u32 = 1;

/// On-disk shape of the model collection: an explicit, versioned JSON
/// document rather than an opaque binary dump, so artifacts stay portable
/// across toolchains.
#[derive(Debug, Deserialize)]
struct Artifact {
    version: u32,
    models: BTreeMap<String, ModelSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ModelSpec {
    Sarima(SarimaModel),
    SeasonalNaive(SeasonalNaiveModel),
}

impl ModelSpec {
    fn into_forecaster(self) -> Result<Box<dyn Forecaster>> {
        match self {
            Self::Sarima(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            Self::SeasonalNaive(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
        }
    }
}

/// The name -> fitted model mapping. Built once at startup and shared
/// read-only with every request handler; nothing mutates it afterwards.
pub struct ModelStore {
    models: BTreeMap<String, Box<dyn Forecaster>>,
}

impl std::fmt::Debug for ModelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelStore")
            .field("models", &self.models.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ModelStore {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading model artifact {}", path.display()))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let artifact: Artifact = serde_json::from_str(raw).context("parsing model artifact")?;
        ensure!(
            artifact.version == ARTIFACT_VERSION,
            "unsupported artifact version {} (this build reads version {})",
            artifact.version,
            ARTIFACT_VERSION
        );

        let mut models = BTreeMap::new();
        for (name, spec) in artifact.models {
            let model = spec
                .into_forecaster()
                .with_context(|| format!("model '{name}'"))?;
            models.insert(name, model);
        }
        Ok(Self { models })
    }

    /// Series names, in the mapping's iteration order.
    pub fn variables(&self) -> Vec<String> {
        self.models.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&dyn Forecaster> {
        self.models.get(name).map(|model| &**model)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "version": 1,
        "models": {
            "sales": {
                "type": "seasonal_naive",
                "period": 12,
                "observations": [5,7,9,11,13,15,17,19,21,23,25,27],
                "last_observation": "2023-12-31",
                "frequency": "monthly"
            },
            "traffic": {
                "type": "sarima",
                "order": {"p": 1, "d": 0, "q": 0},
                "phi": [0.8],
                "intercept": 10.0,
                "observations": [48.0, 52.0, 50.0],
                "last_observation": "2024-06-30",
                "frequency": "daily"
            }
        }
    }"#;

    #[test]
    fn test_load_fixture_and_resolve_all_variables() {
        let store = ModelStore::from_json(FIXTURE).unwrap();
        assert_eq!(store.variables(), vec!["sales", "traffic"]);
        for name in store.variables() {
            assert!(store.get(&name).is_some());
        }
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_rejects_unknown_version() {
        let raw = FIXTURE.replacen("\"version\": 1", "\"version\": 2", 1);
        let err = ModelStore::from_json(&raw).unwrap_err();
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_rejects_invalid_model_with_its_name() {
        let raw = r#"{
            "version": 1,
            "models": {
                "broken": {
                    "type": "sarima",
                    "order": {"p": 2, "d": 0, "q": 0},
                    "phi": [0.5],
                    "observations": [1.0, 2.0, 3.0],
                    "last_observation": "2023-12-31",
                    "frequency": "daily"
                }
            }
        }"#;
        let err = ModelStore::from_json(raw).unwrap_err();
        assert!(format!("{err:#}").contains("broken"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ModelStore::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
