use crate::interface::sample::TrajectorySample;
use crate::interface::target::ImpactResult;
use crate::math::Vector3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Verdict computed here from reconstructed samples.
    Tracked,
    /// Verdict supplied by an upstream analyzer.
    External,
}

/// Read-only snapshot handed to renderers and exporters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryAnalysis {
    pub source: AnalysisSource,
    /// For external summaries, the back-constructed travel up to impact.
    pub observed: Vec<TrajectorySample>,
    pub predicted: Vec<TrajectorySample>,
    pub impact: ImpactResult,
    pub speed_kmh: Option<f64>,
    pub pitch_point: Option<Vector3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl DeliveryAnalysis {
    /// Observed samples followed by the predicted continuation.
    pub fn full_path(&self) -> Vec<TrajectorySample> {
        let mut path = Vec::with_capacity(self.observed.len() + self.predicted.len());
        path.extend_from_slice(&self.observed);
        path.extend_from_slice(&self.predicted);
        path
    }
}
