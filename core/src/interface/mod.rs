pub mod analysis;
pub mod sample;
pub mod summary;
pub mod target;

pub use analysis::{AnalysisSource, DeliveryAnalysis};
pub use sample::{PixelObservation, TrajectorySample};
pub use summary::{ExternalSummary, PitchPoint};
pub use target::{ImpactResult, TargetVolume, Zone};
