use crate::interface::DeliveryAnalysis;
use serde::Serialize;
use std::sync::Mutex;

/// Running totals across analyses; owned by the driver, not the pure stages.
pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub analyses: usize,
    pub hits: usize,
    pub misses: usize,
    pub failures: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record_analysis(&self, analysis: &DeliveryAnalysis) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.analyses += 1;
            if analysis.impact.is_hit {
                metrics.hits += 1;
            } else {
                metrics.misses += 1;
            }
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failures += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::{AnalysisSource, ImpactResult, Zone};
    use crate::math::Vector3;

    fn analysis(impact: ImpactResult) -> DeliveryAnalysis {
        DeliveryAnalysis {
            source: AnalysisSource::Tracked,
            observed: Vec::new(),
            predicted: Vec::new(),
            impact,
            speed_kmh: None,
            pitch_point: None,
            reasoning: None,
        }
    }

    #[test]
    fn counts_hits_misses_and_failures() {
        let recorder = MetricsRecorder::new();
        recorder.record_analysis(&analysis(ImpactResult::hit(
            Vector3::new(0.0, 0.3, 20.12),
            Zone::Center,
        )));
        recorder.record_analysis(&analysis(ImpactResult::miss()));
        recorder.record_failure();

        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.analyses, 2);
        assert_eq!(snapshot.hits, 1);
        assert_eq!(snapshot.misses, 1);
        assert_eq!(snapshot.failures, 1);
    }
}
