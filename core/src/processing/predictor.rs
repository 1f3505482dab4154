use crate::interface::TrajectorySample;
use crate::math::Vector3;
use crate::prelude::EngineConfig;
use crate::processing::bounce::bounce;
use crate::telemetry::log::LogManager;

/// Guards `floor(horizon / step)` against representation error (0.6 / 0.05).
const STEP_COUNT_EPSILON: f64 = 1e-9;

/// Extrapolates a tracked ball under gravity with a damped bounce.
///
/// Velocity is a two-point finite difference over the last two samples,
/// so a single noisy detection at the end of the track moves the whole
/// prediction. No smoothing is applied.
pub struct TrajectoryPredictor {
    gravity: f64,
    restitution: f64,
    stop_z: f64,
    max_samples: usize,
    logger: LogManager,
}

impl TrajectoryPredictor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            gravity: config.physics.gravity,
            restitution: config.physics.prediction_restitution,
            stop_z: config.geometry.pitch_length + config.physics.overrun_margin,
            max_samples: config.prediction.max_samples,
            logger: LogManager::new("predictor"),
        }
    }

    /// `(last - second_to_last) / dt`, or `None` without two samples
    /// strictly increasing in time.
    pub fn estimate_velocity(history: &[TrajectorySample]) -> Option<Vector3> {
        let [.., previous, last] = history else {
            return None;
        };
        let dt = last.t - previous.t;
        if !(dt > 0.0 && dt.is_finite()) {
            return None;
        }
        Some((last.position - previous.position) / dt)
    }

    /// Returns the samples strictly after the last observed one, or an
    /// empty sequence when the history cannot be extrapolated.
    pub fn predict(
        &self,
        history: &[TrajectorySample],
        horizon: f64,
        step: f64,
    ) -> Vec<TrajectorySample> {
        if !(horizon.is_finite() && step.is_finite() && horizon > 0.0 && step > 0.0) {
            self.logger.detail(&format!(
                "degenerate horizon {} / step {}, nothing to predict",
                horizon, step
            ));
            return Vec::new();
        }
        if history.len() < 2 || history.windows(2).any(|pair| pair[1].t <= pair[0].t) {
            self.logger.detail(&format!(
                "insufficient history ({} samples, strictly increasing required)",
                history.len()
            ));
            return Vec::new();
        }
        let Some(velocity) = Self::estimate_velocity(history) else {
            return Vec::new();
        };
        let Some(last) = history.last() else {
            return Vec::new();
        };

        let requested = (horizon / step + STEP_COUNT_EPSILON).floor();
        let steps = if requested > self.max_samples as f64 {
            self.logger.warn(&format!(
                "horizon {} / step {} asks for {} samples, capped at {}",
                horizon, step, requested, self.max_samples
            ));
            self.max_samples
        } else {
            requested as usize
        };
        let mut predicted = Vec::new();
        let mut position = last.position;
        let mut vy = velocity.y;

        for index in 1..=steps {
            position.x += velocity.x * step;
            position.z += velocity.z * step;
            vy -= self.gravity * step;
            position.y += vy * step;
            (position.y, vy) = bounce(position.y, vy, self.restitution);

            if position.z > self.stop_z {
                self.logger.detail(&format!(
                    "stopped after {} samples, z {:.3} past {:.3}",
                    predicted.len(),
                    position.z,
                    self.stop_z
                ));
                break;
            }
            predicted.push(TrajectorySample::with_velocity(
                position,
                last.t + index as f64 * step,
                Vector3::new(velocity.x, vy, velocity.z),
            ));
        }

        predicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn predictor() -> TrajectoryPredictor {
        TrajectoryPredictor::new(&EngineConfig::default())
    }

    fn sample(x: f64, y: f64, z: f64, t: f64) -> TrajectorySample {
        TrajectorySample::new(Vector3::new(x, y, z), t)
    }

    fn scenario_history() -> Vec<TrajectorySample> {
        vec![sample(0.0, 2.2, 0.0, 0.0), sample(0.02, 2.0, 1.0, 0.05)]
    }

    #[test]
    fn scenario_yields_twelve_increasing_samples() {
        let history = scenario_history();
        let predicted = predictor().predict(&history, 0.6, 0.05);
        assert_eq!(predicted.len(), 12);
        assert!(predicted.windows(2).all(|w| w[1].position.z > w[0].position.z));
        assert!(predicted.iter().all(|s| s.t > history[1].t));
        assert!(predicted.iter().all(|s| s.position.y >= 0.0));
        assert!((predicted[11].t - 0.65).abs() < 1e-9);
        assert!(predicted.iter().all(|s| s.velocity.is_some()));
    }

    #[test]
    fn fewer_than_two_samples_yield_nothing() {
        let p = predictor();
        assert!(p.predict(&[], 1.0, 0.01).is_empty());
        assert!(p.predict(&scenario_history()[..1], 1.0, 0.01).is_empty());
    }

    #[test]
    fn repeated_timestamps_yield_nothing() {
        let history = vec![sample(0.0, 2.0, 0.0, 0.1), sample(0.0, 1.9, 1.0, 0.1)];
        assert!(predictor().predict(&history, 1.0, 0.01).is_empty());
        assert!(TrajectoryPredictor::estimate_velocity(&history).is_none());
    }

    #[test]
    fn degenerate_step_yields_nothing() {
        let p = predictor();
        assert!(p.predict(&scenario_history(), 1.0, 0.0).is_empty());
        assert!(p.predict(&scenario_history(), f64::NAN, 0.01).is_empty());
    }

    #[test]
    fn stops_past_the_overrun_margin() {
        // 40 m/s towards the target from 18 m: passes 22.12 m quickly.
        let history = vec![sample(0.0, 1.0, 17.6, 0.0), sample(0.0, 1.0, 18.0, 0.01)];
        let predicted = predictor().predict(&history, 1.0, 0.01);
        assert!(!predicted.is_empty());
        assert!(predicted.len() < 100);
        assert!(predicted.iter().all(|s| s.position.z <= 22.12));
    }

    #[test]
    fn huge_horizon_still_stops_at_the_overrun_margin() {
        let config = EngineConfig::default();
        let history = vec![sample(0.0, 1.0, 18.0, 0.0), sample(0.0, 1.0, 18.5, 0.02)];
        let predicted = TrajectoryPredictor::new(&config).predict(&history, 1e15, 1e-3);
        assert!(!predicted.is_empty());
        assert!(predicted.len() < 1_000);
        assert!(predicted.iter().all(|s| s.position.z <= 22.12));
    }

    #[test]
    fn step_count_is_capped_by_the_sample_ceiling() {
        let mut config = EngineConfig::default();
        config.prediction.max_samples = 500;
        // At rest on the ground: never reaches the overrun margin.
        let history = vec![sample(0.0, 0.0, 5.0, 0.0), sample(0.0, 0.0, 5.0, 0.02)];
        let predicted = TrajectoryPredictor::new(&config).predict(&history, 1e15, 1e-3);
        assert_eq!(predicted.len(), 500);
    }

    #[test]
    fn backward_moving_ball_is_still_predicted() {
        let history = vec![sample(0.0, 1.0, 5.0, 0.0), sample(0.0, 1.0, 4.5, 0.05)];
        let predicted = predictor().predict(&history, 0.2, 0.05);
        assert_eq!(predicted.len(), 4);
        assert!(predicted[3].position.z < 4.5);
    }

    #[test]
    fn velocity_is_two_point_difference() {
        let velocity = TrajectoryPredictor::estimate_velocity(&scenario_history()).unwrap();
        assert!((velocity.x - 0.4).abs() < 1e-9);
        assert!((velocity.y + 4.0).abs() < 1e-9);
        assert!((velocity.z - 20.0).abs() < 1e-9);
    }

    #[test]
    fn input_history_is_left_untouched() {
        let history = scenario_history();
        let before = history.clone();
        let _ = predictor().predict(&history, 0.6, 0.05);
        assert_eq!(history, before);
    }

    #[test]
    fn bounce_apex_shrinks_by_restitution_squared() {
        let config = EngineConfig::default();
        let restitution = config.physics.prediction_restitution;
        let drop_height = 1.0;
        let history = vec![
            sample(0.0, drop_height, 0.0, 0.0),
            sample(0.0, drop_height, 0.0, 0.001),
        ];
        let predicted = TrajectoryPredictor::new(&config).predict(&history, 1.0, 0.0005);

        let bounce_index = predicted
            .windows(2)
            .position(|w| {
                w[0].velocity.map_or(false, |v| v.y < 0.0)
                    && w[1].velocity.map_or(false, |v| v.y > 0.0)
            })
            .expect("ball bounces within the horizon");
        let apex_after = predicted[bounce_index..]
            .iter()
            .map(|s| s.position.y)
            .fold(f64::MIN, f64::max);

        assert!(apex_after < drop_height);
        assert!((apex_after - restitution * restitution * drop_height).abs() < 0.02);
    }

    proptest! {
        #[test]
        fn prediction_is_deterministic_and_ordered(
            x0 in -1.0f64..1.0,
            y0 in 0.0f64..3.0,
            z0 in 0.0f64..10.0,
            dx in -0.5f64..0.5,
            dy in -1.0f64..1.0,
            dz in -2.0f64..2.0,
            dt in 0.01f64..0.1,
            horizon in 0.05f64..1.5,
            step in 0.005f64..0.1,
        ) {
            let history = vec![
                sample(x0, y0, z0, 0.0),
                sample(x0 + dx, y0 + dy, z0 + dz, dt),
            ];
            let p = predictor();
            let first = p.predict(&history, horizon, step);
            let second = p.predict(&history, horizon, step);
            prop_assert_eq!(&first, &second);
            prop_assert!(first.iter().all(|s| s.t > dt));
            prop_assert!(first.windows(2).all(|w| w[1].t > w[0].t));
            prop_assert!(first.iter().all(|s| s.position.y >= 0.0));
        }
    }
}
