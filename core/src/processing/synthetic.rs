use crate::interface::{ExternalSummary, TrajectorySample};
use crate::math::{kmh_to_mps, Vector3};
use crate::prelude::{AnalysisError, AnalysisResult, EngineConfig, SummaryLimits};
use crate::processing::bounce::rebound_velocity;
use crate::telemetry::log::LogManager;

/// Ground contacts simulated after the impact point before the ball rolls.
const MAX_LATE_BOUNCES: usize = 8;
/// Timestamps closer than this are treated as the same instant.
const TIME_EPSILON: f64 = 1e-9;

/// Ballistic segment between two ground contacts.
#[derive(Debug, Clone, Copy)]
struct Flight {
    start_t: f64,
    origin: Vector3,
    velocity: Vector3,
}

impl Flight {
    fn sample(&self, t: f64, gravity: f64) -> TrajectorySample {
        let tau = t - self.start_t;
        let raw_y = self.origin.y + self.velocity.y * tau - 0.5 * gravity * tau * tau;
        let (y, vy) = if raw_y > 0.0 {
            (raw_y, self.velocity.y - gravity * tau)
        } else {
            (0.0, 0.0)
        };
        TrajectorySample::with_velocity(
            Vector3::new(
                self.origin.x + self.velocity.x * tau,
                y,
                self.origin.z + self.velocity.z * tau,
            ),
            t,
            Vector3::new(self.velocity.x, vy, self.velocity.z),
        )
    }
}

/// Back-constructed delivery; `samples` up to `impact_t` are the ball's
/// actual travel, anything later is projection towards the target plane.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticPath {
    pub samples: Vec<TrajectorySample>,
    pub pitch_t: f64,
    pub impact_t: f64,
    pub release_height: f64,
}

/// Rebuilds a plausible full delivery from an analyzer summary so the
/// path can be displayed. The verdict is never re-derived from it.
///
/// Longitudinal speed is constant. The pre-pitch flight meets the ground
/// exactly at the pitching point, the rebound follows the shared bounce
/// rule, and the post-pitch flight passes exactly through the impact point.
/// The release height falls out of those constraints.
pub struct SyntheticTrajectory {
    gravity: f64,
    restitution: f64,
    step: f64,
    plane_z: f64,
    overrun_z: f64,
    max_samples: usize,
    limits: SummaryLimits,
    logger: LogManager,
}

impl SyntheticTrajectory {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            gravity: config.physics.gravity,
            restitution: config.physics.synthetic_restitution,
            step: config.prediction.synthetic_step,
            plane_z: config.geometry.pitch_length,
            overrun_z: config.geometry.pitch_length + config.physics.overrun_margin,
            max_samples: config.prediction.max_samples,
            limits: config.summary.clone(),
            logger: LogManager::new("synthetic"),
        }
    }

    pub fn generate(&self, summary: &ExternalSummary) -> AnalysisResult<SyntheticPath> {
        let pitch = summary.pitch_point;
        let impact = summary.impact_point;
        let limits = &self.limits;
        if !(summary.speed_kmh.is_finite()
            && summary.speed_kmh >= limits.min_speed_kmh
            && summary.speed_kmh <= limits.max_speed_kmh)
        {
            return Err(self.reject(format!(
                "speed {} km/h outside [{}, {}]",
                summary.speed_kmh, limits.min_speed_kmh, limits.max_speed_kmh
            )));
        }
        if !(pitch.x.is_finite() && pitch.z.is_finite() && impact.is_finite()) {
            return Err(self.reject("pitch or impact point is not finite".into()));
        }
        if pitch.z <= 0.0 {
            return Err(self.reject(format!(
                "pitch at z {} is not ahead of the release point",
                pitch.z
            )));
        }
        if impact.z <= pitch.z {
            return Err(self.reject(format!(
                "impact at z {} does not follow pitch at z {}",
                impact.z, pitch.z
            )));
        }
        if impact.z > self.overrun_z {
            return Err(self.reject(format!(
                "impact at z {} lies beyond {:.2}",
                impact.z, self.overrun_z
            )));
        }
        if impact.y < 0.0 {
            return Err(self.reject(format!("impact height {} is below ground", impact.y)));
        }

        let g = self.gravity;
        let vz = kmh_to_mps(summary.speed_kmh);
        let pitch_t = pitch.z / vz;
        let flight_after_pitch = (impact.z - pitch.z) / vz;
        let impact_t = pitch_t + flight_after_pitch;

        // Rebound needed to reach the impact height, then the descent that
        // produces it under the bounce rule.
        let rebound_vy = (impact.y + 0.5 * g * flight_after_pitch * flight_after_pitch)
            / flight_after_pitch;
        let descent_vy = -rebound_vy / self.restitution;
        let release_vy = descent_vy + g * pitch_t;
        let release_height = 0.5 * g * pitch_t * pitch_t - release_vy * pitch_t;
        if release_height < 0.0 {
            return Err(self.reject(format!(
                "summary implies release below ground ({:.3} m)",
                release_height
            )));
        }
        if release_height > limits.max_release_height {
            return Err(self.reject(format!(
                "summary implies release at {:.3} m, above {:.2} m",
                release_height, limits.max_release_height
            )));
        }

        let end_t = if impact.z < self.plane_z {
            self.plane_z / vz
        } else {
            impact_t
        };
        if end_t / self.step >= self.max_samples as f64 {
            return Err(self.reject(format!(
                "path to t={:.3} needs more than {} samples at step {}",
                end_t, self.max_samples, self.step
            )));
        }

        let pitch_position = Vector3::new(pitch.x, 0.0, pitch.z);
        let mut flights = vec![
            Flight {
                start_t: 0.0,
                origin: Vector3::new(0.0, release_height, 0.0),
                velocity: Vector3::new(pitch.x / pitch_t, release_vy, vz),
            },
            Flight {
                start_t: pitch_t,
                origin: pitch_position,
                velocity: Vector3::new(
                    (impact.x - pitch.x) / flight_after_pitch,
                    rebound_velocity(descent_vy, self.restitution),
                    vz,
                ),
            },
        ];
        self.extend_late_bounces(&mut flights, end_t);

        let mut times: Vec<f64> = Vec::new();
        let mut k = 0usize;
        loop {
            let t = k as f64 * self.step;
            if t > end_t {
                break;
            }
            times.push(t);
            k += 1;
        }
        times.extend([pitch_t, impact_t, end_t]);
        times.sort_by(f64::total_cmp);
        times.dedup_by(|later, earlier| (*later - *earlier).abs() < TIME_EPSILON);

        let samples = times
            .into_iter()
            .map(|t| {
                if (t - pitch_t).abs() < TIME_EPSILON {
                    return TrajectorySample::with_velocity(
                        pitch_position,
                        pitch_t,
                        flights[1].velocity,
                    );
                }
                if (t - impact_t).abs() < TIME_EPSILON {
                    let velocity = flights[1].sample(impact_t, g).velocity;
                    return TrajectorySample {
                        position: impact,
                        t: impact_t,
                        velocity,
                    };
                }
                let flight = flights
                    .iter()
                    .rev()
                    .find(|flight| flight.start_t <= t)
                    .unwrap_or(&flights[0]);
                flight.sample(t, g)
            })
            .collect::<Vec<_>>();

        self.logger.record(&format!(
            "synthetic delivery: {} samples, release {:.2} m, pitch t={:.3}, impact t={:.3}",
            samples.len(),
            release_height,
            pitch_t,
            impact_t
        ));

        Ok(SyntheticPath {
            samples,
            pitch_t,
            impact_t,
            release_height,
        })
    }

    fn reject(&self, message: String) -> AnalysisError {
        self.logger.warn(&format!("summary rejected: {}", message));
        AnalysisError::InvalidInput(message)
    }

    /// Appends ground contacts after the impact point until `end_t`.
    fn extend_late_bounces(&self, flights: &mut Vec<Flight>, end_t: f64) {
        for _ in 0..MAX_LATE_BOUNCES {
            let Some(&last) = flights.last() else {
                return;
            };
            if last.velocity.y <= 0.0 {
                return;
            }
            let impact_speed =
                (last.velocity.y.powi(2) + 2.0 * self.gravity * last.origin.y).sqrt();
            let landing_t = last.start_t + (last.velocity.y + impact_speed) / self.gravity;
            if landing_t >= end_t {
                return;
            }
            let landing = last.sample(landing_t, self.gravity);
            let incoming_vy = -impact_speed;
            flights.push(Flight {
                start_t: landing_t,
                origin: Vector3::new(landing.position.x, 0.0, landing.position.z),
                velocity: Vector3::new(
                    last.velocity.x,
                    rebound_velocity(incoming_vy, self.restitution),
                    last.velocity.z,
                ),
            });
        }
    }
}
