/// Conversion factor between internal m/s and reported km/h.
pub const KMH_PER_MPS: f64 = 3.6;

pub fn mps_to_kmh(speed: f64) -> f64 {
    speed * KMH_PER_MPS
}

pub fn kmh_to_mps(speed: f64) -> f64 {
    speed / KMH_PER_MPS
}
