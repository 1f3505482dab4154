use crate::workflow::config::WorkflowConfig;
use crate::workflow::input::DeliveryInput;
use anyhow::Context;
use log::info;
use std::sync::Arc;
use wicketcore::interface::DeliveryAnalysis;
use wicketcore::prelude::DeliverySource;
use wicketcore::telemetry::{MetricsRecorder, MetricsSnapshot};

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
    metrics: Arc<MetricsRecorder>,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> anyhow::Result<Self> {
        config
            .engine
            .validate()
            .context("validating engine configuration")?;
        Ok(Self {
            config,
            metrics: Arc::new(MetricsRecorder::new()),
        })
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn execute(&self, input: &DeliveryInput) -> anyhow::Result<DeliveryAnalysis> {
        let result = input
            .as_source()
            .analyze(&self.config.engine)
            .with_context(|| format!("analysing {} delivery", input.kind()));

        match &result {
            Ok(analysis) => {
                self.metrics.record_analysis(analysis);
                info!(
                    "{} delivery -> hit {} zone {} ({} observed, {} predicted)",
                    input.kind(),
                    analysis.impact.is_hit,
                    analysis.impact.zone,
                    analysis.observed.len(),
                    analysis.predicted.len()
                );
            }
            Err(_) => self.metrics.record_failure(),
        }
        result
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_pixel_track, GeneratorConfig};
    use wicketcore::interface::{AnalysisSource, ExternalSummary, PitchPoint, Zone};
    use wicketcore::math::Vector3;

    #[test]
    fn runner_executes_pixel_workflow() {
        let cfg = WorkflowConfig::default();
        let runner = Runner::new(cfg).unwrap();
        let track = build_pixel_track(&GeneratorConfig::default()).unwrap();
        let frames = track.observations.len();
        let analysis = runner.execute(&DeliveryInput::Pixels(track)).unwrap();

        assert_eq!(analysis.source, AnalysisSource::Tracked);
        assert_eq!(analysis.observed.len(), frames);
        assert!(!analysis.predicted.is_empty());
        assert_eq!(runner.metrics().analyses, 1);
    }

    #[test]
    fn runner_counts_failures() {
        let runner = Runner::new(WorkflowConfig::default()).unwrap();
        let input = DeliveryInput::Summary(ExternalSummary {
            is_hit: true,
            zone: Zone::Center,
            speed_kmh: -5.0,
            pitch_point: PitchPoint { x: 0.0, z: 16.0 },
            impact_point: Vector3::new(0.0, 0.4, 20.12),
            reasoning: String::new(),
        });
        assert!(runner.execute(&input).is_err());
        assert_eq!(runner.metrics().failures, 1);
        assert_eq!(runner.metrics().analyses, 0);
    }

    #[test]
    fn invalid_engine_config_is_refused() {
        let cfg = WorkflowConfig::from_args(None, Some(-0.01));
        assert!(Runner::new(cfg).is_err());
    }
}
