use crate::interface::DeliveryAnalysis;
use serde::{Deserialize, Serialize};

/// Physical dimensions of the target and the course leading to it (meters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WicketGeometry {
    /// Release point to the target plane.
    pub pitch_length: f64,
    pub stump_height: f64,
    pub stump_width: f64,
    pub stump_radius: f64,
    /// Clearance band above the stumps that still counts as a top strike.
    pub bail_height: f64,
    /// Proximity band around each reference line used for zone naming.
    pub zone_tolerance: f64,
}

impl Default for WicketGeometry {
    fn default() -> Self {
        Self {
            pitch_length: 20.12,
            stump_height: 0.711,
            stump_width: 0.2286,
            stump_radius: 0.019,
            bail_height: 0.013,
            zone_tolerance: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// m/s², applied downwards.
    pub gravity: f64,
    /// Bounce softness when continuing a tracked ball.
    pub prediction_restitution: f64,
    /// Bounce softness when generating a plausible full delivery.
    pub synthetic_restitution: f64,
    /// Extrapolation stops once the ball is this far past the target plane.
    pub overrun_margin: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            prediction_restitution: 0.6,
            synthetic_restitution: 0.75,
            overrun_margin: 2.0,
        }
    }
}

/// Parameters of the monocular position heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Seconds from release until the ball reaches the target plane.
    pub delivery_duration: f64,
    /// Meters per normalized pixel unit at the release point.
    pub perspective_base: f64,
    /// Growth of that scale per meter travelled.
    pub perspective_gain: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            delivery_duration: 0.6,
            perspective_base: 1.0,
            perspective_gain: 0.05,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub horizon: f64,
    pub step: f64,
    pub synthetic_step: f64,
    /// Ceiling on the samples one predicted or synthetic path may hold.
    pub max_samples: usize,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            horizon: 1.0,
            step: 0.01,
            synthetic_step: 0.01,
            max_samples: 100_000,
        }
    }
}

/// Plausibility window applied to external analyzer summaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryLimits {
    pub min_speed_kmh: f64,
    pub max_speed_kmh: f64,
    /// Highest release point a back-constructed delivery may imply (meters).
    pub max_release_height: f64,
}

impl Default for SummaryLimits {
    fn default() -> Self {
        Self {
            min_speed_kmh: 30.0,
            max_speed_kmh: 200.0,
            max_release_height: 4.0,
        }
    }
}

/// Every tunable of the engine. Partial YAML overrides only what it names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub geometry: WicketGeometry,
    pub physics: PhysicsConfig,
    pub estimator: EstimatorConfig,
    pub prediction: PredictionConfig,
    pub summary: SummaryLimits,
}

impl EngineConfig {
    pub fn validate(&self) -> AnalysisResult<()> {
        let g = &self.geometry;
        require_positive("geometry.pitch_length", g.pitch_length)?;
        require_positive("geometry.stump_height", g.stump_height)?;
        require_positive("geometry.stump_width", g.stump_width)?;
        require_non_negative("geometry.stump_radius", g.stump_radius)?;
        require_non_negative("geometry.bail_height", g.bail_height)?;
        require_non_negative("geometry.zone_tolerance", g.zone_tolerance)?;

        let p = &self.physics;
        require_positive("physics.gravity", p.gravity)?;
        require_restitution("physics.prediction_restitution", p.prediction_restitution)?;
        require_restitution("physics.synthetic_restitution", p.synthetic_restitution)?;
        require_non_negative("physics.overrun_margin", p.overrun_margin)?;

        let e = &self.estimator;
        require_positive("estimator.delivery_duration", e.delivery_duration)?;
        require_non_negative("estimator.perspective_base", e.perspective_base)?;
        require_non_negative("estimator.perspective_gain", e.perspective_gain)?;

        let r = &self.prediction;
        require_positive("prediction.horizon", r.horizon)?;
        require_positive("prediction.step", r.step)?;
        require_positive("prediction.synthetic_step", r.synthetic_step)?;
        if r.max_samples == 0 {
            return Err(AnalysisError::InvalidConfig(
                "prediction.max_samples must be at least 1".into(),
            ));
        }

        let l = &self.summary;
        require_positive("summary.min_speed_kmh", l.min_speed_kmh)?;
        require_positive("summary.max_speed_kmh", l.max_speed_kmh)?;
        require_positive("summary.max_release_height", l.max_release_height)?;
        if l.max_speed_kmh < l.min_speed_kmh {
            return Err(AnalysisError::InvalidConfig(format!(
                "summary speed window [{}, {}] km/h is empty",
                l.min_speed_kmh, l.max_speed_kmh
            )));
        }
        Ok(())
    }
}

fn require_positive(name: &str, value: f64) -> AnalysisResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConfig(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

fn require_non_negative(name: &str, value: f64) -> AnalysisResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConfig(format!(
            "{} must be non-negative, got {}",
            name, value
        )))
    }
}

fn require_restitution(name: &str, value: f64) -> AnalysisResult<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConfig(format!(
            "{} must lie in (0, 1], got {}",
            name, value
        )))
    }
}

/// Common error type for the analysis core.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Anything that can yield a full delivery analysis: reconstructed tracks
/// run through the predictor and resolver, external summaries are
/// back-constructed for display.
pub trait DeliverySource {
    fn analyze(&self, config: &EngineConfig) -> AnalysisResult<DeliveryAnalysis>;
}
