pub mod units;
pub mod vector;

pub use units::{kmh_to_mps, mps_to_kmh, KMH_PER_MPS};
pub use vector::Vector3;
