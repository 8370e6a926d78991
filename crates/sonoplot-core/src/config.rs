//! Visualiser configuration
//!
//! Everything here is fixed for the lifetime of one visualiser instance.
//! [`VisualiserConfig::validate`] runs before the frame loop starts.

use crate::axis::{DEFAULT_MIN_DB, DEFAULT_STRETCH_OFFSET};
use crate::chart::{ChartType, SubChartType};
use crate::reducer::{SpectrumReducer, DEFAULT_REDUCTION_FACTOR, DEFAULT_REDUCTION_SCALE};
use crate::signal::{ProcessedData, SignalData};
use crate::source::FftWindow;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Smallest buffer size the audio subsystem hands out
pub const MIN_BUFFER_SIZE: usize = 64;

/// Largest buffer size the audio subsystem hands out
pub const MAX_BUFFER_SIZE: usize = 8192;

/// Point size of scatter charts, relative to the plotting volume
pub const SCATTER_PIXEL_SCALE: f32 = 0.005;

/// Point size of stretch charts, relative to the plotting volume
pub const STRETCH_PIXEL_SCALE: f32 = 0.01;

/// Which signal of a processed frame a scatter chart plots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignalSelect {
    /// Sum of all channels
    #[default]
    Mono,
    /// Stereo difference (empty unless the source is stereo)
    Side,
    /// A single raw channel
    Channel(usize),
}

impl SignalSelect {
    /// The selected signal, if the frame has it
    pub fn pick<'a>(&self, data: &'a ProcessedData) -> Option<&'a SignalData> {
        let signal = match self {
            Self::Mono => &data.mono,
            Self::Side => &data.side,
            Self::Channel(index) => data.raw.get(*index)?,
        };
        (!signal.is_empty()).then_some(signal)
    }
}

/// Shape of the spectrum reduction curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReductionConfig {
    /// Exponential base
    pub factor: f32,
    /// Index scale
    pub scale: f32,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            factor: DEFAULT_REDUCTION_FACTOR,
            scale: DEFAULT_REDUCTION_SCALE,
        }
    }
}

/// Configuration of one visualiser instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualiserConfig {
    /// Samples per channel per frame (64..=8192, power of two recommended)
    pub buffer_size: usize,
    /// Chart family
    pub chart_type: ChartType,
    /// Axis mapping within the family
    pub sub_chart_type: SubChartType,
    /// Window function requested from the audio source
    pub window: FftWindow,
    /// Signal plotted by scatter charts
    pub signal: SignalSelect,
    /// Spectrum reduction curve
    pub reduction: ReductionConfig,
    /// Decibel floor of the decibel mappings
    pub min_db: f32,
    /// Side-level offset of the stretch mapping
    pub stretch_offset: f32,
    /// Point size; defaults depend on the chart type
    pub pixel_scale: Option<f32>,
}

impl Default for VisualiserConfig {
    fn default() -> Self {
        Self {
            buffer_size: 1024,
            chart_type: ChartType::Scatter,
            sub_chart_type: SubChartType::ScatterTimeLin,
            window: FftWindow::BlackmanHarris,
            signal: SignalSelect::Mono,
            reduction: ReductionConfig::default(),
            min_db: DEFAULT_MIN_DB,
            stretch_offset: DEFAULT_STRETCH_OFFSET,
            pixel_scale: None,
        }
    }
}

impl VisualiserConfig {
    /// Check every field that can be checked without an audio source
    pub fn validate(&self) -> Result<()> {
        if !(MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&self.buffer_size) {
            return Err(CoreError::InvalidBufferSize {
                size: self.buffer_size,
                min: MIN_BUFFER_SIZE,
                max: MAX_BUFFER_SIZE,
            });
        }
        if !self.buffer_size.is_power_of_two() {
            warn!(
                "Buffer size {} is not a power of two; the audio source may round it",
                self.buffer_size
            );
        }

        SpectrumReducer::from_config(&self.reduction)?;
        crate::chart::ChartStrategy::new(self.chart_type, self.sub_chart_type)?;
        Ok(())
    }

    /// Point size for the configured chart
    pub fn effective_pixel_scale(&self) -> f32 {
        self.pixel_scale.unwrap_or(match self.chart_type {
            ChartType::ScatterStretch => STRETCH_PIXEL_SCALE,
            _ => SCATTER_PIXEL_SCALE,
        })
    }
}
