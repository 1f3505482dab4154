//! Deterministic trajectory core for wicket-impact review.
//!
//! Three pure stages: a monocular position estimator, a gravity-and-bounce
//! trajectory predictor, and an impact resolver against the wicket volume.
//! Capture, rendering and export live outside this crate and exchange
//! plain value types with it.

pub mod analysis;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use analysis::{find_pitch_point, PixelTrack, TrackedDelivery};
pub use prelude::{AnalysisError, AnalysisResult, DeliverySource, EngineConfig};
