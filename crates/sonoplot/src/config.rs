//! Runner configuration file

use crate::source::Clip;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use sonoplot_core::{LogConfig, VisualiserConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Where the audio comes from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Decode a WAV file
    Wav {
        /// File to play
        path: PathBuf,
    },
    /// Synthesise one sine per channel
    Tones {
        /// Frequency of each channel in Hz
        frequencies: Vec<f32>,
        /// Peak amplitude
        amplitude: f32,
        /// Samples per second
        sample_rate: u32,
        /// Length in seconds
        duration: f32,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Tones {
            frequencies: vec![440.0, 660.0],
            amplitude: 0.5,
            sample_rate: 48000,
            duration: 5.0,
        }
    }
}

impl SourceConfig {
    /// Decode or synthesise the clip
    pub fn load(&self) -> Result<Clip> {
        match self {
            Self::Wav { path } => Clip::load_wav(path),
            Self::Tones {
                frequencies,
                amplitude,
                sample_rate,
                duration,
            } => Clip::tones(frequencies, *amplitude, *sample_rate, *duration)
                .context("Failed to synthesise tones"),
        }
    }
}

/// Everything the runner reads from its TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Chart setup
    pub visualiser: VisualiserConfig,
    /// Logging setup
    pub log: LogConfig,
    /// Audio input
    pub source: SourceConfig,
    /// Frames to render before exiting
    pub frames: u64,
    /// Frames per second of the simulated clock
    pub frame_rate: f32,
    /// Sleep between frames to run at `frame_rate`
    pub realtime: bool,
    /// Restart the clip when it ends
    pub looping: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            visualiser: VisualiserConfig::default(),
            log: LogConfig::default(),
            source: SourceConfig::default(),
            frames: 300,
            frame_rate: 60.0,
            realtime: false,
            looping: false,
        }
    }
}

impl RunnerConfig {
    /// Read and parse a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config: Self = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the runner fields. The visualiser section is checked when
    /// the visualiser is built.
    pub fn validate(&self) -> Result<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            bail!("frame_rate must be positive, got {}", self.frame_rate);
        }
        Ok(())
    }

    /// Seconds between frames
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.frame_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonoplot_core::{ChartType, SignalSelect, SubChartType};

    #[test]
    fn test_example_config_parses() {
        let config: RunnerConfig =
            toml::from_str(include_str!("../sonoplot.example.toml")).expect("Failed to parse");
        assert!(config.validate().is_ok());
        assert!(config.visualiser.validate().is_ok());
        assert_eq!(config.visualiser.chart_type, ChartType::ScatterStretch);
        assert_eq!(
            config.visualiser.sub_chart_type,
            SubChartType::ScatterStretchFreqLogLog
        );
        assert_eq!(config.frames, 600);
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: RunnerConfig = toml::from_str("").expect("Failed to parse");
        assert_eq!(config, RunnerConfig::default());
        assert!((config.frame_interval() - 1.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut original = RunnerConfig::default();
        original.visualiser.signal = SignalSelect::Channel(1);
        original.visualiser.buffer_size = 2048;
        original.source = SourceConfig::Wav {
            path: PathBuf::from("clip.wav"),
        };

        let text = toml::to_string(&original).expect("Failed to serialize");
        let parsed: RunnerConfig = toml::from_str(&text).expect("Failed to parse");
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("sonoplot.toml");
        fs::write(&path, "frames = 12\n[visualiser]\nbuffer_size = 512\n").unwrap();

        let config = RunnerConfig::load(&path).unwrap();
        assert_eq!(config.frames, 12);
        assert_eq!(config.visualiser.buffer_size, 512);
    }

    #[test]
    fn test_bad_frame_rate_rejected() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("sonoplot.toml");
        fs::write(&path, "frame_rate = 0.0\n").unwrap();
        assert!(RunnerConfig::load(&path).is_err());
    }

    #[test]
    fn test_unknown_chart_rejected_at_parse() {
        let result: std::result::Result<RunnerConfig, _> =
            toml::from_str("[visualiser]\nchart_type = \"Pie\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_default_source_is_stereo_tones() {
        let clip = SourceConfig::default().load().unwrap();
        assert_eq!(clip.channel_count(), 2);
        assert_eq!(clip.sample_rate(), 48000);
    }
}
