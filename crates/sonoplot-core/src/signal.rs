//! Per-frame signal containers
//!
//! `SignalData` holds one channel of one frame. `ProcessedData` bundles the
//! raw channels with the derived mono and side signals, and `RefinedData`
//! is the decimated counterpart used by logarithmic plots.

use crate::{CoreError, Result};

/// Time and frequency domain data for a single channel of one frame.
///
/// Both sequences always have the same length, equal to `buffer_size`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalData {
    buffer_size: usize,
    sample_rate: u32,
    time_amplitude: Vec<f32>,
    freq_magnitude: Vec<f32>,
}

impl SignalData {
    /// Create a new signal from matching time and frequency sequences
    pub fn new(
        time_amplitude: Vec<f32>,
        freq_magnitude: Vec<f32>,
        sample_rate: u32,
    ) -> Result<Self> {
        if time_amplitude.len() != freq_magnitude.len() {
            return Err(CoreError::ShapeMismatch {
                expected: time_amplitude.len(),
                found: freq_magnitude.len(),
            });
        }
        Ok(Self {
            buffer_size: time_amplitude.len(),
            sample_rate,
            time_amplitude,
            freq_magnitude,
        })
    }

    /// Create a silent signal of `buffer_size` samples
    pub fn zeroed(buffer_size: usize, sample_rate: u32) -> Self {
        Self {
            buffer_size,
            sample_rate,
            time_amplitude: vec![0.0; buffer_size],
            freq_magnitude: vec![0.0; buffer_size],
        }
    }

    /// Number of samples in each sequence
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Sample rate of the source clip in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Time-domain amplitudes
    pub fn time_amplitude(&self) -> &[f32] {
        &self.time_amplitude
    }

    /// Frequency-domain magnitudes
    pub fn freq_magnitude(&self) -> &[f32] {
        &self.freq_magnitude
    }

    /// True if the signal carries no samples
    pub fn is_empty(&self) -> bool {
        self.buffer_size == 0
    }
}

/// All signals assembled for one frame.
///
/// `raw` is written once by `SignalProcessor::update` and never mutated;
/// `mono` and `side` are derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedData {
    /// One entry per source channel
    pub raw: Vec<SignalData>,
    /// Working copy of the channels for further processing stages
    pub processed: Vec<SignalData>,
    /// Per-sample sum of all channels
    pub mono: SignalData,
    /// Stereo difference signal (left minus right)
    pub side: SignalData,
    /// Reserved for downstream feature extraction
    pub spectral_flux: f32,
    /// Reserved for downstream feature extraction
    pub extra_features: Vec<f32>,
}

impl ProcessedData {
    /// Wrap freshly acquired channels
    pub fn new(raw: Vec<SignalData>) -> Self {
        Self {
            processed: raw.clone(),
            raw,
            ..Default::default()
        }
    }

    /// Number of channels acquired this frame
    pub fn channel_count(&self) -> usize {
        self.raw.len()
    }
}

/// Decimated mono/side spectra.
///
/// Entry `k` of both reduced signals was taken from the same original
/// frequency bin `bins[k]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RefinedData {
    /// Reduced mono signal
    pub reduced_mono: SignalData,
    /// Reduced side signal
    pub reduced_side: SignalData,
    /// Original frequency bin of every kept point, strictly increasing
    pub bins: Vec<usize>,
    /// Buffer size of the signal before reduction
    pub source_buffer_size: usize,
    /// Number of kept points
    pub num_points: usize,
}
