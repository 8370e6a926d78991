//! Sonoplot - headless audio point-cloud runner
//!
//! Plays a clip (a WAV file or synthesised tones) against a simulated
//! frame clock and drives one visualiser over it, logging what would be
//! drawn each frame.

mod config;
mod logging_setup;
mod renderer;
mod source;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use config::{RunnerConfig, SourceConfig};
use renderer::{HeadlessRenderer, RunStats};
use sonoplot_core::{AudioSource, Visualiser, VisualiserConfig, VisualiserPreset};
use source::ClipPlayer;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PresetArg {
    Waveform,
    Linear,
    Logarithmic,
    MidSide,
}

impl From<PresetArg> for VisualiserPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Waveform => Self::AudioWaveform,
            PresetArg::Linear => Self::SpectrogramLinear,
            PresetArg::Logarithmic => Self::SpectrogramLogarithmic,
            PresetArg::MidSide => Self::MidSideSpectrogram,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sonoplot")]
#[command(about = "Render audio as a 3D point cloud without a window", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chart preset, replacing the configured chart
    #[arg(short, long, value_enum)]
    preset: Option<PresetArg>,

    /// WAV file to play instead of the configured source
    #[arg(short, long)]
    wav: Option<PathBuf>,

    /// Number of frames to render
    #[arg(short, long)]
    frames: Option<u64>,

    /// Samples per channel per frame
    #[arg(short, long)]
    buffer_size: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Sleep between frames to match the configured frame rate
    #[arg(long)]
    realtime: bool,
}

impl Args {
    /// Apply command-line overrides on top of the file configuration
    fn apply(&self, config: &mut RunnerConfig) {
        if let Some(preset) = self.preset {
            let preset = VisualiserPreset::from(preset);
            config.visualiser = VisualiserConfig {
                buffer_size: config.visualiser.buffer_size,
                window: config.visualiser.window,
                ..preset.config()
            };
        }
        if let Some(path) = &self.wav {
            config.source = SourceConfig::Wav { path: path.clone() };
        }
        if let Some(frames) = self.frames {
            config.frames = frames;
        }
        if let Some(buffer_size) = self.buffer_size {
            config.visualiser.buffer_size = buffer_size;
        }
        if let Some(level) = &self.log_level {
            config.log.level = level.clone();
        }
        if self.realtime {
            config.realtime = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };
    args.apply(&mut config);
    config.validate()?;

    let _log_guard = logging_setup::init(&config.log)?;
    info!("Sonoplot v{} starting", env!("CARGO_PKG_VERSION"));

    run(&config)?;
    Ok(())
}

/// Drive one visualiser for `config.frames` frames
fn run(config: &RunnerConfig) -> Result<RunStats> {
    let clip = config.source.load()?;
    let mut player =
        ClipPlayer::new(clip, config.visualiser.buffer_size).with_looping(config.looping);
    let mut renderer = HeadlessRenderer::new();

    let mut visualiser = Visualiser::new(config.visualiser.clone(), &player, &mut renderer)
        .context("Failed to set up visualiser")?;
    info!(
        "Chart {:?}/{:?}, buffer_size={}, {} channels at {} Hz, {:.2}s",
        config.visualiser.chart_type,
        config.visualiser.sub_chart_type,
        config.visualiser.buffer_size,
        player.channels(),
        player.sample_rate(),
        player.clip().duration()
    );

    let interval = config.frame_interval();
    let frame_duration = Duration::from_secs_f32(interval);
    let mut stats = RunStats::default();

    player.play();
    for _ in 0..config.frames {
        let started = Instant::now();

        player.advance(interval);
        let report = visualiser.tick(&player, &mut renderer);
        renderer.log_frame(&report);
        stats.record(&report);

        if !player.is_playing() {
            info!("Playback stopped at {:.2}s", player.time());
            break;
        }

        if config.realtime {
            let elapsed = started.elapsed();
            if elapsed < frame_duration {
                thread::sleep(frame_duration - elapsed);
            } else {
                warn!("Frame {} took {:?}, over budget", report.frame, elapsed);
            }
        }
    }

    renderer.log_summary(&stats);
    Ok(stats)
}
