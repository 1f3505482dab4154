pub mod bounce;
pub mod estimator;
pub mod predictor;
pub mod resolver;
pub mod synthetic;

pub use bounce::{bounce, rebound_velocity};
pub use estimator::PositionEstimator;
pub use predictor::TrajectoryPredictor;
pub use resolver::ImpactResolver;
pub use synthetic::{SyntheticPath, SyntheticTrajectory};
