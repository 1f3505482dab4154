/// Vertical velocity leaving the ground for an incoming `vy`.
pub fn rebound_velocity(vy: f64, restitution: f64) -> f64 {
    -vy * restitution
}

/// Inelastic ground contact: mirrors a below-ground height back up and
/// reverses the vertical velocity, both damped by `restitution`.
///
/// Heights at or above the ground pass through unchanged.
pub fn bounce(y: f64, vy: f64, restitution: f64) -> (f64, f64) {
    if y < 0.0 {
        (-y * restitution, rebound_velocity(vy, restitution))
    } else {
        (y, vy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn airborne_ball_is_untouched() {
        assert_eq!(bounce(0.4, -3.0, 0.6), (0.4, -3.0));
        assert_eq!(bounce(0.0, -3.0, 0.6), (0.0, -3.0));
    }

    #[test]
    fn ground_contact_reflects_and_damps() {
        let (y, vy) = bounce(-0.1, -5.0, 0.5);
        assert_eq!(y, 0.05);
        assert_eq!(vy, 2.5);
    }

    #[test]
    fn rebound_reverses_direction() {
        assert_eq!(rebound_velocity(-4.0, 0.75), 3.0);
    }
}
