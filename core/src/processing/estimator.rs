use crate::interface::{PixelObservation, TrajectorySample};
use crate::math::Vector3;
use crate::prelude::{AnalysisError, AnalysisResult, EngineConfig, EstimatorConfig};
use crate::telemetry::log::LogManager;

/// Monocular position heuristic for a camera placed behind the release point.
///
/// This is not a calibrated projective reconstruction. Longitudinal
/// position comes from elapsed time against a nominal delivery duration,
/// and the pixel offsets from the frame center are scaled by a spread that
/// grows linearly with distance travelled. A calibrated camera model would
/// replace it without changing the output type.
pub struct PositionEstimator {
    config: EstimatorConfig,
    pitch_length: f64,
    logger: LogManager,
}

impl PositionEstimator {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            config: config.estimator.clone(),
            pitch_length: config.geometry.pitch_length,
            logger: LogManager::new("estimator"),
        }
    }

    pub fn estimate(
        &self,
        pixel_x: f64,
        pixel_y: f64,
        frame_width: f64,
        frame_height: f64,
        timestamp: f64,
    ) -> AnalysisResult<TrajectorySample> {
        for (name, value) in [
            ("pixel_x", pixel_x),
            ("pixel_y", pixel_y),
            ("frame_width", frame_width),
            ("frame_height", frame_height),
            ("timestamp", timestamp),
        ] {
            if !value.is_finite() {
                return Err(AnalysisError::InvalidInput(format!(
                    "{} is not finite",
                    name
                )));
            }
        }
        if frame_width <= 0.0 || frame_height <= 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "frame size {}x{} must be positive",
                frame_width, frame_height
            )));
        }
        if !(0.0..=frame_width).contains(&pixel_x) || !(0.0..=frame_height).contains(&pixel_y) {
            return Err(AnalysisError::InvalidInput(format!(
                "pixel ({}, {}) outside {}x{} frame",
                pixel_x, pixel_y, frame_width, frame_height
            )));
        }
        if timestamp < 0.0 {
            return Err(AnalysisError::InvalidInput(format!(
                "timestamp {} precedes release",
                timestamp
            )));
        }

        // Image rows grow downwards; flip so positive is up.
        let norm_x = (pixel_x / frame_width) * 2.0 - 1.0;
        let norm_y = 1.0 - (pixel_y / frame_height) * 2.0;

        let progress = (timestamp / self.config.delivery_duration).min(1.0);
        let z = progress * self.pitch_length;
        let spread = self.config.perspective_base + self.config.perspective_gain * z;

        let position = Vector3::new(norm_x * spread, ((norm_y + 1.0) * spread).max(0.0), z);
        self.logger.detail(&format!(
            "t={:.3} pixel=({:.1}, {:.1}) -> ({:.3}, {:.3}, {:.3})",
            timestamp, pixel_x, pixel_y, position.x, position.y, position.z
        ));
        Ok(TrajectorySample::new(position, timestamp))
    }

    /// Estimates every observation, failing on the first invalid one.
    pub fn estimate_all(
        &self,
        observations: &[PixelObservation],
    ) -> AnalysisResult<Vec<TrajectorySample>> {
        observations
            .iter()
            .map(|obs| {
                self.estimate(
                    obs.x,
                    obs.y,
                    obs.frame_width,
                    obs.frame_height,
                    obs.timestamp,
                )
            })
            .collect()
    }
}
