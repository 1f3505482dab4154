//! Entry points that turn one delivery's input into a [`DeliveryAnalysis`].

use crate::interface::{
    AnalysisSource, DeliveryAnalysis, ExternalSummary, ImpactResult, PixelObservation,
    TargetVolume, TrajectorySample, Zone,
};
use crate::math::{mps_to_kmh, Vector3};
use crate::prelude::{AnalysisResult, DeliverySource, EngineConfig};
use crate::processing::{
    ImpactResolver, PositionEstimator, SyntheticTrajectory, TrajectoryPredictor,
};
use serde::{Deserialize, Serialize};

/// Already-reconstructed 3D samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedDelivery {
    pub samples: Vec<TrajectorySample>,
}

/// Raw 2D detections, run through the position estimator first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PixelTrack {
    pub observations: Vec<PixelObservation>,
}

impl DeliverySource for TrackedDelivery {
    fn analyze(&self, config: &EngineConfig) -> AnalysisResult<DeliveryAnalysis> {
        let predictor = TrajectoryPredictor::new(config);
        let predicted = predictor.predict(
            &self.samples,
            config.prediction.horizon,
            config.prediction.step,
        );

        let mut path = self.samples.clone();
        path.extend_from_slice(&predicted);
        let target = TargetVolume::from_geometry(&config.geometry);
        let impact = ImpactResolver::new().resolve(&path, &target);

        Ok(DeliveryAnalysis {
            source: AnalysisSource::Tracked,
            speed_kmh: TrajectoryPredictor::estimate_velocity(&self.samples)
                .map(|v| mps_to_kmh(v.length())),
            pitch_point: find_pitch_point(&path),
            observed: self.samples.clone(),
            predicted,
            impact,
            reasoning: None,
        })
    }
}

impl DeliverySource for PixelTrack {
    fn analyze(&self, config: &EngineConfig) -> AnalysisResult<DeliveryAnalysis> {
        let samples = PositionEstimator::new(config).estimate_all(&self.observations)?;
        TrackedDelivery { samples }.analyze(config)
    }
}

impl DeliverySource for ExternalSummary {
    fn analyze(&self, config: &EngineConfig) -> AnalysisResult<DeliveryAnalysis> {
        let path = SyntheticTrajectory::new(config).generate(self)?;
        let (observed, predicted): (Vec<_>, Vec<_>) = path
            .samples
            .into_iter()
            .partition(|sample| sample.t <= path.impact_t);

        let impact = if self.is_hit {
            let zone = if self.zone == Zone::None {
                Zone::Center
            } else {
                self.zone
            };
            ImpactResult::hit(self.impact_point, zone)
        } else {
            ImpactResult::miss()
        };

        Ok(DeliveryAnalysis {
            source: AnalysisSource::External,
            observed,
            predicted,
            impact,
            speed_kmh: Some(self.speed_kmh),
            pitch_point: Some(Vector3::new(self.pitch_point.x, 0.0, self.pitch_point.z)),
            reasoning: Some(self.reasoning.clone()).filter(|text| !text.is_empty()),
        })
    }
}

/// First ground contact on a path: the sample where the vertical velocity
/// turns from downward to upward. Samples without velocity are skipped.
pub fn find_pitch_point(path: &[TrajectorySample]) -> Option<Vector3> {
    path.windows(2).find_map(|pair| {
        let before = pair[0].velocity?;
        let after = pair[1].velocity?;
        (before.y < 0.0 && after.y > 0.0)
            .then(|| Vector3::new(pair[1].position.x, 0.0, pair[1].position.z))
    })
}
