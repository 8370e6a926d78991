//! Ready-made visualiser configurations

use crate::chart::{ChartType, SubChartType};
use crate::config::VisualiserConfig;
use serde::{Deserialize, Serialize};

/// Named chart setups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualiserPreset {
    /// Waveform of the mono signal
    AudioWaveform,
    /// Linear spectrum, normalised to the running peak
    SpectrogramLinear,
    /// Log-frequency spectrum in decibels
    SpectrogramLogarithmic,
    /// Mono spectrum stretched by the side level
    MidSideSpectrogram,
}

impl VisualiserPreset {
    /// All presets
    pub fn all() -> &'static [VisualiserPreset] {
        &[
            Self::AudioWaveform,
            Self::SpectrogramLinear,
            Self::SpectrogramLogarithmic,
            Self::MidSideSpectrogram,
        ]
    }

    /// Human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::AudioWaveform => "Audio Waveform",
            Self::SpectrogramLinear => "Spectrogram (Linear)",
            Self::SpectrogramLogarithmic => "Spectrogram (Logarithmic)",
            Self::MidSideSpectrogram => "Mid/Side Spectrogram",
        }
    }

    /// Default configuration for this preset
    pub fn config(&self) -> VisualiserConfig {
        let (chart_type, sub_chart_type) = match self {
            Self::AudioWaveform => (ChartType::Scatter, SubChartType::ScatterTimeLin),
            Self::SpectrogramLinear => (ChartType::Scatter, SubChartType::ScatterFreqLin),
            Self::SpectrogramLogarithmic => (ChartType::Scatter, SubChartType::ScatterFreqLogLog),
            Self::MidSideSpectrogram => (
                ChartType::ScatterStretch,
                SubChartType::ScatterStretchFreqLogLog,
            ),
        };
        VisualiserConfig {
            chart_type,
            sub_chart_type,
            ..Default::default()
        }
    }
}
