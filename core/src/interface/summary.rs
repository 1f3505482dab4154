use crate::interface::target::Zone;
use crate::math::Vector3;
use crate::prelude::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};

/// Where the ball met the ground before the target (lateral, longitudinal).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchPoint {
    pub x: f64,
    pub z: f64,
}

/// Pre-computed verdict from an upstream analyzer (vision model or manual
/// entry). When present it replaces prediction and resolution; the core
/// only back-constructs a path for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSummary {
    pub is_hit: bool,
    #[serde(default = "default_zone")]
    pub zone: Zone,
    pub speed_kmh: f64,
    pub pitch_point: PitchPoint,
    pub impact_point: Vector3,
    #[serde(default)]
    pub reasoning: String,
}

fn default_zone() -> Zone {
    Zone::None
}

impl ExternalSummary {
    pub fn from_json(payload: &str) -> AnalysisResult<Self> {
        serde_json::from_str(payload)
            .map_err(|err| AnalysisError::InvalidInput(format!("summary payload: {}", err)))
    }
}
