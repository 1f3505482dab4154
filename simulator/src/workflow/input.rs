use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wicketcore::interface::ExternalSummary;
use wicketcore::prelude::DeliverySource;
use wicketcore::{PixelTrack, TrackedDelivery};

/// One delivery as read from disk or posted to the bridge, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeliveryInput {
    Pixels(PixelTrack),
    Samples(TrackedDelivery),
    Summary(ExternalSummary),
}

impl DeliveryInput {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading delivery input {}", path_ref.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("parsing delivery input {}", path_ref.display()))
    }

    pub fn as_source(&self) -> &dyn DeliverySource {
        match self {
            DeliveryInput::Pixels(track) => track,
            DeliveryInput::Samples(track) => track,
            DeliveryInput::Summary(summary) => summary,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryInput::Pixels(_) => "pixels",
            DeliveryInput::Samples(_) => "samples",
            DeliveryInput::Summary(_) => "summary",
        }
    }
}
