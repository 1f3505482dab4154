use crate::math::Vector3;
use serde::{Deserialize, Serialize};

/// One reconstructed ball position.
///
/// `t` is seconds since release. A trajectory is a slice of these ordered
/// by `t` with no duplicate timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySample {
    pub position: Vector3,
    pub t: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Vector3>,
}

impl TrajectorySample {
    pub fn new(position: Vector3, t: f64) -> Self {
        Self {
            position,
            t,
            velocity: None,
        }
    }

    pub fn with_velocity(position: Vector3, t: f64, velocity: Vector3) -> Self {
        Self {
            position,
            t,
            velocity: Some(velocity),
        }
    }
}

/// Raw 2D detection of the ball in one video frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelObservation {
    pub x: f64,
    pub y: f64,
    pub frame_width: f64,
    pub frame_height: f64,
    pub timestamp: f64,
}
