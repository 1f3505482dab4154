use anyhow::Context;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use wicketcore::interface::PixelObservation;
use wicketcore::PixelTrack;

/// Configuration for generating a noisy 2D track of one delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub frame_width: f64,
    pub frame_height: f64,
    pub frames: usize,
    pub frame_interval: f64,
    /// Horizontal travel across the whole track, in pixels.
    pub drift_px: f64,
    /// Vertical drop across the whole track, in pixels.
    pub dip_px: f64,
    pub noise_px: f64,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            frame_width: 1280.0,
            frame_height: 720.0,
            frames: 12,
            frame_interval: 1.0 / 30.0,
            drift_px: 40.0,
            dip_px: 220.0,
            noise_px: 1.5,
            seed: 0,
        }
    }
}

/// Ball starts at the upper-middle of the frame and dips quadratically
/// while drifting sideways, with uniform pixel jitter.
pub fn build_pixel_track(config: &GeneratorConfig) -> anyhow::Result<PixelTrack> {
    if config.frames < 2 {
        anyhow::bail!("generator needs at least 2 frames, got {}", config.frames);
    }
    if !(config.frame_width > 0.0 && config.frame_height > 0.0) {
        anyhow::bail!(
            "frame size {}x{} must be positive",
            config.frame_width,
            config.frame_height
        );
    }
    let last_index = u32::try_from(config.frames - 1).context("frame count overflow")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut observations = Vec::with_capacity(config.frames);
    let start_x = config.frame_width / 2.0;
    let start_y = config.frame_height * 0.3;

    for index in 0..config.frames {
        let progress = index as f64 / f64::from(last_index);
        let (jitter_x, jitter_y) = if config.noise_px > 0.0 {
            (
                rng.gen_range(-config.noise_px..config.noise_px),
                rng.gen_range(-config.noise_px..config.noise_px),
            )
        } else {
            (0.0, 0.0)
        };
        let x = start_x + config.drift_px * progress + jitter_x;
        let y = start_y + config.dip_px * progress * progress + jitter_y;
        observations.push(PixelObservation {
            x: x.clamp(0.0, config.frame_width),
            y: y.clamp(0.0, config.frame_height),
            frame_width: config.frame_width,
            frame_height: config.frame_height,
            timestamp: index as f64 * config.frame_interval,
        });
    }

    Ok(PixelTrack { observations })
}

pub fn build_demo_track(
    seed: u64,
    frame_width: f64,
    frame_height: f64,
) -> anyhow::Result<PixelTrack> {
    let config = GeneratorConfig {
        seed,
        frame_width,
        frame_height,
        ..Default::default()
    };
    build_pixel_track(&config)
}
