use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wicketcore::prelude::EngineConfig;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkflowConfig {
    pub engine: EngineConfig,
    pub frame_width: f64,
    pub frame_height: f64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            frame_width: 1280.0,
            frame_height: 720.0,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(horizon: Option<f64>, step: Option<f64>) -> Self {
        let mut config = Self::default();
        config.apply_overrides(horizon, step);
        config
    }

    pub fn apply_overrides(&mut self, horizon: Option<f64>, step: Option<f64>) {
        if let Some(horizon) = horizon {
            self.engine.prediction.horizon = horizon;
        }
        if let Some(step) = step {
            self.engine.prediction.step = step;
        }
    }
}
