use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use wicketcore::interface::{AnalysisSource, DeliveryAnalysis};
use wicketcore::math::Vector3;

fn format_point(point: Option<Vector3>) -> String {
    match point {
        Some(p) => format!("({:.3},{:.3},{:.3})", p.x, p.y, p.z),
        None => "-".to_string(),
    }
}

pub fn format_report_line(analysis: &DeliveryAnalysis) -> String {
    let source = match analysis.source {
        AnalysisSource::Tracked => "tracked",
        AnalysisSource::External => "external",
    };
    let speed = analysis
        .speed_kmh
        .map(|s| format!("{:.1}", s))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "source={} hit={} zone={} impact={} pitch={} speed_kmh={} observed={} predicted={}\n",
        source,
        analysis.impact.is_hit,
        analysis.impact.zone,
        format_point(analysis.impact.impact_point),
        format_point(analysis.pitch_point),
        speed,
        analysis.observed.len(),
        analysis.predicted.len()
    )
}

/// Appends one line per analysis, creating parent directories as needed.
pub fn append_report(path: &Path, analysis: &DeliveryAnalysis) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening report {}", path.display()))?;
    file.write_all(format_report_line(analysis).as_bytes())
        .with_context(|| format!("writing report {}", path.display()))?;
    Ok(())
}
