use crate::math::Vector3;
use crate::prelude::{AnalysisError, WicketGeometry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Axis-aligned box around the stumps, bails clearance included.
///
/// The longitudinal extent is collapsed onto the crossing plane (`min.z`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetVolume {
    pub min: Vector3,
    pub max: Vector3,
    /// Added to the lateral half-width for the hit test.
    pub element_radius: f64,
    /// Height of the stumps without the clearance band.
    pub physical_height: f64,
    pub zone_tolerance: f64,
}

impl TargetVolume {
    pub fn from_geometry(geometry: &WicketGeometry) -> Self {
        let half_width = geometry.stump_width / 2.0;
        Self {
            min: Vector3::new(-half_width, 0.0, geometry.pitch_length),
            max: Vector3::new(
                half_width,
                geometry.stump_height + geometry.bail_height,
                geometry.pitch_length,
            ),
            element_radius: geometry.stump_radius,
            physical_height: geometry.stump_height,
            zone_tolerance: geometry.zone_tolerance,
        }
    }

    pub fn plane_z(&self) -> f64 {
        self.min.z
    }

    pub fn left_edge_x(&self) -> f64 {
        self.min.x
    }

    pub fn right_edge_x(&self) -> f64 {
        self.max.x
    }

    pub fn centerline_x(&self) -> f64 {
        (self.min.x + self.max.x) / 2.0
    }

    pub fn half_width(&self) -> f64 {
        (self.max.x - self.min.x) / 2.0
    }

    /// Top of the stumps plus clearance band.
    pub fn ceiling(&self) -> f64 {
        self.max.y
    }
}

impl Default for TargetVolume {
    fn default() -> Self {
        Self::from_geometry(&WicketGeometry::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Left,
    Center,
    Right,
    Top,
    None,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Left => "left",
            Zone::Center => "center",
            Zone::Right => "right",
            Zone::Top => "top",
            Zone::None => "none",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = AnalysisError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" | "off" => Ok(Zone::Left),
            "center" | "centre" | "middle" => Ok(Zone::Center),
            "right" | "leg" => Ok(Zone::Right),
            "top" | "bails" => Ok(Zone::Top),
            "none" | "" => Ok(Zone::None),
            other => Err(AnalysisError::InvalidInput(format!(
                "unknown zone label '{}'",
                other
            ))),
        }
    }
}

/// Verdict for a resolved path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub is_hit: bool,
    pub impact_point: Option<Vector3>,
    pub zone: Zone,
}

impl ImpactResult {
    pub fn miss() -> Self {
        Self {
            is_hit: false,
            impact_point: None,
            zone: Zone::None,
        }
    }

    pub fn hit(point: Vector3, zone: Zone) -> Self {
        Self {
            is_hit: true,
            impact_point: Some(point),
            zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_volume_matches_regulation_stumps() {
        let target = TargetVolume::default();
        assert!((target.half_width() - 0.1143).abs() < 1e-12);
        assert!((target.ceiling() - 0.724).abs() < 1e-12);
        assert_eq!(target.plane_z(), 20.12);
        assert_eq!(target.centerline_x(), 0.0);
    }

    #[test]
    fn zone_labels_parse_case_insensitively() {
        assert_eq!("Left".parse::<Zone>().unwrap(), Zone::Left);
        assert_eq!(" CENTRE ".parse::<Zone>().unwrap(), Zone::Center);
        assert_eq!("top".parse::<Zone>().unwrap(), Zone::Top);
        assert!("sideways".parse::<Zone>().is_err());
    }

    #[test]
    fn miss_carries_no_point() {
        let miss = ImpactResult::miss();
        assert!(!miss.is_hit);
        assert!(miss.impact_point.is_none());
        assert_eq!(miss.zone, Zone::None);
    }
}
