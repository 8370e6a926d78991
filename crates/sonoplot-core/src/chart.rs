//! Chart strategies
//!
//! A chart owns the per-instance mapping state (peak normaliser, reducer
//! curve, decibel floor) and turns one frame into [`PlotData3`]. The
//! variant is resolved once from a (chart type, sub-type) tag pair.

use crate::axis::{self, PeakNormaliser, DEFAULT_MIN_DB, DEFAULT_STRETCH_OFFSET};
use crate::config::{SignalSelect, VisualiserConfig};
use crate::plot_data::PlotData3;
use crate::reducer::SpectrumReducer;
use crate::series::PointStyle;
use crate::signal::{ProcessedData, SignalData};
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Chart family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChartType {
    /// Points positioned in the plotting volume
    #[default]
    Scatter,
    /// Points positioned on y/z and stretched along depth
    ScatterStretch,
    /// Reserved; no strategy exists yet
    Bar,
}

/// Axis mapping within a chart family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubChartType {
    /// Waveform over time
    #[default]
    ScatterTimeLin,
    /// Linear frequency, linear magnitude
    ScatterFreqLin,
    /// Log frequency, linear magnitude
    ScatterFreqLog,
    /// Log frequency, decibel magnitude
    ScatterFreqLogLog,
    /// Mid/side spectrogram, log frequency, decibel magnitude
    ScatterStretchFreqLogLog,
}

/// Axis mappings available to [`Scatter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScatterMode {
    /// See [`axis::time_linear`]
    TimeLin,
    /// See [`axis::frequency_linear`]
    FreqLin,
    /// See [`axis::frequency_log`]
    FreqLog,
    /// See [`axis::frequency_log_log`]
    FreqLogLog,
}

/// Single-signal scatter chart.
#[derive(Debug, Clone)]
pub struct Scatter {
    mode: ScatterMode,
    signal: SignalSelect,
    peak: PeakNormaliser,
    reducer: SpectrumReducer,
    min_db: f32,
}

impl Scatter {
    /// Create a scatter chart with default reduction and decibel floor
    pub fn new(mode: ScatterMode) -> Self {
        Self {
            mode,
            signal: SignalSelect::default(),
            peak: PeakNormaliser::new(),
            reducer: SpectrumReducer::default(),
            min_db: DEFAULT_MIN_DB,
        }
    }

    /// Pick which signal of a processed frame gets plotted
    pub fn with_signal(mut self, signal: SignalSelect) -> Self {
        self.signal = signal;
        self
    }

    /// Override the reduction curve used by the decibel mode
    pub fn with_reducer(mut self, reducer: SpectrumReducer) -> Self {
        self.reducer = reducer;
        self
    }

    /// Override the decibel floor
    pub fn with_min_db(mut self, min_db: f32) -> Self {
        self.min_db = min_db;
        self
    }

    /// Active axis mapping
    pub fn mode(&self) -> ScatterMode {
        self.mode
    }

    /// Running peak of this chart
    pub fn peak(&self) -> &PeakNormaliser {
        &self.peak
    }

    /// Map one channel's frame to points
    pub fn update(&mut self, signal: &SignalData) -> PlotData3 {
        let coords = match self.mode {
            ScatterMode::TimeLin => axis::time_linear(signal.time_amplitude()),
            ScatterMode::FreqLin => axis::frequency_linear(signal.freq_magnitude(), &mut self.peak),
            ScatterMode::FreqLog => axis::frequency_log(
                signal.freq_magnitude(),
                signal.buffer_size(),
                &mut self.peak,
            ),
            ScatterMode::FreqLogLog => {
                let refined = self.reducer.reduce_signal(signal);
                axis::frequency_log_log(&refined, self.min_db)
            }
        };
        PlotData3::from_coordinates(&coords)
    }
}

/// Two-channel mid/side stretch chart.
#[derive(Debug, Clone)]
pub struct ScatterStretch {
    reducer: SpectrumReducer,
    min_db: f32,
    offset: f32,
}

impl Default for ScatterStretch {
    fn default() -> Self {
        Self {
            reducer: SpectrumReducer::default(),
            min_db: DEFAULT_MIN_DB,
            offset: DEFAULT_STRETCH_OFFSET,
        }
    }
}

impl ScatterStretch {
    /// Create a stretch chart with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the reduction curve
    pub fn with_reducer(mut self, reducer: SpectrumReducer) -> Self {
        self.reducer = reducer;
        self
    }

    /// Override the decibel floor
    pub fn with_min_db(mut self, min_db: f32) -> Self {
        self.min_db = min_db;
        self
    }

    /// Override the side-level offset
    pub fn with_offset(mut self, offset: f32) -> Self {
        self.offset = offset;
        self
    }

    /// Map the mono/side pair of a processed frame to points.
    ///
    /// `x` of each point is a depth scale, not a position.
    pub fn update(&mut self, data: &ProcessedData) -> PlotData3 {
        let refined = self.reducer.reduce_processed(data);
        let coords = axis::stretch_log_log(&refined, self.min_db, self.offset);
        PlotData3::from_coordinates(&coords)
    }
}

/// Chart selected once at setup.
#[derive(Debug, Clone)]
pub enum ChartStrategy {
    /// Single-signal scatter
    Scatter(Scatter),
    /// Mid/side stretch
    ScatterStretch(ScatterStretch),
}

impl ChartStrategy {
    /// Resolve a tag pair with default mapping parameters.
    ///
    /// Fails for pairs that do not name an implemented strategy.
    pub fn new(chart_type: ChartType, sub_chart_type: SubChartType) -> Result<Self> {
        let strategy = match (chart_type, sub_chart_type) {
            (ChartType::Scatter, SubChartType::ScatterTimeLin) => {
                Self::Scatter(Scatter::new(ScatterMode::TimeLin))
            }
            (ChartType::Scatter, SubChartType::ScatterFreqLin) => {
                Self::Scatter(Scatter::new(ScatterMode::FreqLin))
            }
            (ChartType::Scatter, SubChartType::ScatterFreqLog) => {
                Self::Scatter(Scatter::new(ScatterMode::FreqLog))
            }
            (ChartType::Scatter, SubChartType::ScatterFreqLogLog) => {
                Self::Scatter(Scatter::new(ScatterMode::FreqLogLog))
            }
            (ChartType::ScatterStretch, SubChartType::ScatterStretchFreqLogLog) => {
                Self::ScatterStretch(ScatterStretch::new())
            }
            (chart_type, sub_chart_type) => {
                return Err(CoreError::UnsupportedChart {
                    chart_type,
                    sub_chart_type,
                });
            }
        };

        debug!("Chart resolved: {:?}/{:?}", chart_type, sub_chart_type);
        Ok(strategy)
    }

    /// Resolve the chart named by `config` and apply its mapping parameters
    pub fn from_config(config: &VisualiserConfig) -> Result<Self> {
        let reducer = SpectrumReducer::from_config(&config.reduction)?;

        Ok(match Self::new(config.chart_type, config.sub_chart_type)? {
            Self::Scatter(scatter) => Self::Scatter(
                scatter
                    .with_signal(config.signal)
                    .with_reducer(reducer)
                    .with_min_db(config.min_db),
            ),
            Self::ScatterStretch(stretch) => Self::ScatterStretch(
                stretch
                    .with_reducer(reducer)
                    .with_min_db(config.min_db)
                    .with_offset(config.stretch_offset),
            ),
        })
    }

    /// Map one processed frame to points
    pub fn update(&mut self, data: &ProcessedData) -> PlotData3 {
        match self {
            Self::Scatter(scatter) => match scatter.signal.pick(data) {
                Some(signal) => scatter.update(signal),
                None => {
                    trace!("Selected signal {:?} not present in frame", scatter.signal);
                    PlotData3::default()
                }
            },
            Self::ScatterStretch(stretch) => stretch.update(data),
        }
    }

    /// How the pool should interpret the produced coordinates
    pub fn point_style(&self) -> PointStyle {
        match self {
            Self::Scatter(_) => PointStyle::Scatter,
            Self::ScatterStretch(_) => PointStyle::Stretch,
        }
    }
}
