use serde::{Deserialize, Serialize};
use wicketcore::interface::DeliveryAnalysis;
use wicketcore::telemetry::MetricsSnapshot;

/// Latest state exposed to renderers; replaced wholesale on each update.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct VisualizationModel {
    pub analysis: Option<DeliveryAnalysis>,
    #[serde(skip_deserializing)]
    pub metrics: MetricsSnapshot,
    pub status: String,
}
