use crate::interface::{ImpactResult, TargetVolume, TrajectorySample, Zone};
use crate::math::Vector3;
use crate::telemetry::log::LogManager;

/// Decides whether a path strikes the target and names the zone struck.
pub struct ImpactResolver {
    logger: LogManager,
}

impl ImpactResolver {
    pub fn new() -> Self {
        Self {
            logger: LogManager::new("resolver"),
        }
    }

    /// First point where the path crosses the target plane, in either
    /// direction. Segments with no longitudinal extent are skipped.
    pub fn crossing_point(&self, path: &[TrajectorySample], plane_z: f64) -> Option<Vector3> {
        for (index, pair) in path.windows(2).enumerate() {
            let (z1, z2) = (pair[0].position.z, pair[1].position.z);
            let straddles = (z1 <= plane_z && z2 >= plane_z) || (z1 >= plane_z && z2 <= plane_z);
            if !straddles {
                continue;
            }
            let span = (z2 - z1).abs();
            if span == 0.0 {
                self.logger
                    .detail(&format!("degenerate segment {} at z {:.3}", index, z1));
                continue;
            }
            let ratio = (plane_z - z1).abs() / span;
            return Some(pair[0].position.lerp(&pair[1].position, ratio));
        }
        None
    }

    pub fn resolve(&self, path: &[TrajectorySample], target: &TargetVolume) -> ImpactResult {
        let Some(point) = self.crossing_point(path, target.plane_z()) else {
            self.logger.detail("path never reaches the target plane");
            return ImpactResult::miss();
        };

        let lateral_reach = target.half_width() + target.element_radius;
        let within_width = (point.x - target.centerline_x()).abs() <= lateral_reach;
        let within_height = point.y >= target.min.y && point.y <= target.ceiling();
        if !(within_width && within_height) {
            self.logger.detail(&format!(
                "crossing ({:.3}, {:.3}) misses the target",
                point.x, point.y
            ));
            return ImpactResult::miss();
        }

        let zone = Self::classify(&point, target);
        self.logger.record(&format!(
            "hit {} at ({:.3}, {:.3}, {:.3})",
            zone, point.x, point.y, point.z
        ));
        ImpactResult::hit(point, zone)
    }

    /// Height first, then the left and right edge bands, then Center for
    /// the centerline band and anything in between.
    fn classify(point: &Vector3, target: &TargetVolume) -> Zone {
        if point.y > target.physical_height {
            return Zone::Top;
        }
        let near = |line: f64| (point.x - line).abs() <= target.zone_tolerance;
        if near(target.left_edge_x()) {
            Zone::Left
        } else if near(target.right_edge_x()) {
            Zone::Right
        } else {
            // Centerline proximity and the fallback both land here.
            Zone::Center
        }
    }
}

impl Default for ImpactResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(x: f64, y: f64, z: f64, t: f64) -> TrajectorySample {
        TrajectorySample::new(Vector3::new(x, y, z), t)
    }

    fn straight_path(x: f64, y: f64) -> Vec<TrajectorySample> {
        vec![
            sample(x, y, 18.0, 0.0),
            sample(x, y, 19.5, 0.05),
            sample(x, y, 21.0, 0.1),
        ]
    }

    #[test]
    fn short_path_is_a_miss() {
        let path = vec![sample(0.0, 0.3, 5.0, 0.0), sample(0.0, 0.3, 15.0, 0.3)];
        let result = ImpactResolver::new().resolve(&path, &TargetVolume::default());
        assert_eq!(result, ImpactResult::miss());
    }

    #[test]
    fn centered_low_path_hits_center() {
        let result =
            ImpactResolver::new().resolve(&straight_path(0.0, 0.3), &TargetVolume::default());
        assert!(result.is_hit);
        assert_eq!(result.zone, Zone::Center);
        let point = result.impact_point.unwrap();
        assert!((point.z - 20.12).abs() < 1e-9);
        assert!((point.y - 0.3).abs() < 1e-9);
    }

    #[test]
    fn clipping_the_clearance_band_is_top() {
        let result =
            ImpactResolver::new().resolve(&straight_path(0.0, 0.72), &TargetVolume::default());
        assert!(result.is_hit);
        assert_eq!(result.zone, Zone::Top);
    }

    #[test]
    fn above_the_band_is_a_miss() {
        let result =
            ImpactResolver::new().resolve(&straight_path(0.0, 0.8), &TargetVolume::default());
        assert!(!result.is_hit);
    }

    #[test]
    fn wide_path_is_a_miss() {
        let resolver = ImpactResolver::new();
        let target = TargetVolume::default();
        assert!(!resolver.resolve(&straight_path(0.3, 0.3), &target).is_hit);
        assert!(!resolver.resolve(&straight_path(-0.3, 0.3), &target).is_hit);
    }

    #[test]
    fn element_radius_extends_the_hit_width() {
        // 0.125 is past the half-width (0.1143) but inside half-width + radius.
        let result =
            ImpactResolver::new().resolve(&straight_path(0.125, 0.3), &TargetVolume::default());
        assert!(result.is_hit);
        assert_eq!(result.zone, Zone::Right);
    }

    #[test]
    fn edges_classify_left_and_right() {
        let resolver = ImpactResolver::new();
        let target = TargetVolume::default();
        assert_eq!(resolver.resolve(&straight_path(-0.1, 0.3), &target).zone, Zone::Left);
        assert_eq!(resolver.resolve(&straight_path(0.1, 0.3), &target).zone, Zone::Right);
    }

    #[test]
    fn gap_between_reference_lines_defaults_to_center() {
        // 0.057 is outside the centerline band and the right edge band.
        let result =
            ImpactResolver::new().resolve(&straight_path(0.057, 0.3), &TargetVolume::default());
        assert!(result.is_hit);
        assert_eq!(result.zone, Zone::Center);
    }

    #[test]
    fn interpolates_within_the_crossing_segment() {
        let path = vec![sample(0.0, 0.1, 20.0, 0.0), sample(0.1, 0.5, 21.0, 0.05)];
        let point = ImpactResolver::new().crossing_point(&path, 20.12).unwrap();
        assert!((point.x - 0.012).abs() < 1e-9);
        assert!((point.y - 0.148).abs() < 1e-9);
    }

    #[test]
    fn backward_crossing_is_detected() {
        let path = vec![sample(0.0, 0.3, 22.0, 0.0), sample(0.0, 0.3, 19.0, 0.1)];
        let result = ImpactResolver::new().resolve(&path, &TargetVolume::default());
        assert!(result.is_hit);
    }

    #[test]
    fn degenerate_segment_is_skipped_not_divided() {
        let path = vec![
            sample(0.0, 0.3, 20.12, 0.0),
            sample(0.5, 0.3, 20.12, 0.01),
            sample(0.0, 0.3, 21.0, 0.05),
        ];
        let point = ImpactResolver::new().crossing_point(&path, 20.12).unwrap();
        assert!(point.x.is_finite());
        assert!((point.x - 0.5).abs() < 1e-9);
    }

    #[test]
    fn resolution_is_stable_when_prediction_grows() {
        use crate::prelude::EngineConfig;
        use crate::processing::TrajectoryPredictor;

        let config = EngineConfig::default();
        let observed = vec![sample(0.0, 1.2, 14.0, 0.0), sample(0.0, 1.1, 14.8, 0.02)];
        let predictor = TrajectoryPredictor::new(&config);
        let target = TargetVolume::from_geometry(&config.geometry);
        let resolver = ImpactResolver::new();

        let resolve_with = |horizon: f64| {
            let mut path = observed.clone();
            path.extend(predictor.predict(&observed, horizon, 0.01));
            resolver.resolve(&path, &target)
        };

        let short = resolve_with(0.3);
        assert!(short.impact_point.is_some());
        assert_eq!(short, resolve_with(0.6));
    }
}
