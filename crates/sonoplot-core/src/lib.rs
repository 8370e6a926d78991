//! Sonoplot Core - Signal-to-Coordinate Pipeline
//!
//! This crate turns per-frame multichannel audio buffers into a bounded,
//! renderer-agnostic 3D point cloud, including:
//! - Multichannel acquisition, mono sum and side image
//! - Adaptive spectrum decimation for logarithmic axes
//! - Linear/logarithmic axis mapping and decibel compression
//! - Bounds checking into the unit plotting volume
//! - A fixed-capacity pool of renderable point handles

#![warn(missing_docs)]

pub use glam::Vec3;
use thiserror::Error;

pub mod axis;
pub mod chart;
pub mod config;
pub mod logging;
pub mod plot_data;
pub mod preset;
pub mod processor;
pub mod reducer;
pub mod series;
pub mod signal;
pub mod source;
pub mod visualiser;

// --- Re-exports grouped by category ---

// Signal data & processing
pub use processor::SignalProcessor;
pub use signal::{ProcessedData, RefinedData, SignalData};
pub use source::{AudioSource, FftWindow};

// Mapping & charts
pub use axis::{AxisCoordinates, PeakNormaliser};
pub use chart::{ChartStrategy, ChartType, Scatter, ScatterStretch, SubChartType};
pub use plot_data::PlotData3;
pub use reducer::SpectrumReducer;

// Rendering pool
pub use series::{PointRenderer, PointSeries, PointSlot, PointStyle};

// Configuration & control
pub use config::{ReductionConfig, SignalSelect, VisualiserConfig};
pub use logging::LogConfig;
pub use preset::VisualiserPreset;
pub use visualiser::{FrameReport, Visualiser};

/// Core error types
///
/// Only setup-time problems are errors. Malformed frame data is handled by
/// the reject-and-skip policy of the individual pipeline stages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Buffer size outside the range supported by the audio subsystem
    #[error("Invalid buffer size {size}: must be between {min} and {max}")]
    InvalidBufferSize {
        /// Requested size
        size: usize,
        /// Smallest accepted size
        min: usize,
        /// Largest accepted size
        max: usize,
    },

    /// The chart/sub-chart tag pair does not name an implemented strategy
    #[error("Unsupported chart: {chart_type:?} with sub-type {sub_chart_type:?}")]
    UnsupportedChart {
        /// Requested chart type
        chart_type: ChartType,
        /// Requested sub-chart type
        sub_chart_type: SubChartType,
    },

    /// Reduction curve parameters would not produce a monotonic index walk
    #[error("Invalid reduction curve: {0}")]
    InvalidReduction(String),

    /// Time and frequency sequences of one channel differ in length
    #[error("Shape mismatch: expected {expected} samples, found {found}")]
    ShapeMismatch {
        /// Length of the time-domain sequence
        expected: usize,
        /// Length of the frequency-domain sequence
        found: usize,
    },

    /// The audio source reports no channels
    #[error("Audio source has no channels")]
    NoChannels,
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
