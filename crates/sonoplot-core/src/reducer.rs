//! Adaptive spectrum decimation
//!
//! Logarithmic frequency axes squeeze high bins together, so plotting
//! every bin wastes points where they are visually indistinguishable. The
//! reducer walks the bins along an exponential curve:
//!
//! ```text
//! i(j) = j + floor(factor ^ (j / scale)) - 1
//! ```
//!
//! Low bins keep unit spacing, high bins are skipped with growing gaps.

use crate::config::ReductionConfig;
use crate::signal::{ProcessedData, RefinedData, SignalData};
use crate::{CoreError, Result};
use tracing::trace;

/// Default exponential base of the reduction curve
pub const DEFAULT_REDUCTION_FACTOR: f32 = 3.0;

/// Default index scale of the reduction curve
pub const DEFAULT_REDUCTION_SCALE: f32 = 150.0;

/// Decimates frequency-magnitude sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumReducer {
    factor: f32,
    scale: f32,
}

impl Default for SpectrumReducer {
    fn default() -> Self {
        Self {
            factor: DEFAULT_REDUCTION_FACTOR,
            scale: DEFAULT_REDUCTION_SCALE,
        }
    }
}

impl SpectrumReducer {
    /// Create a reducer with a custom curve.
    ///
    /// `factor` must be at least 1 and `scale` positive, otherwise the walk
    /// could step backwards.
    pub fn new(factor: f32, scale: f32) -> Result<Self> {
        if !factor.is_finite() || factor < 1.0 {
            return Err(CoreError::InvalidReduction(format!(
                "factor must be finite and >= 1.0, got {}",
                factor
            )));
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(CoreError::InvalidReduction(format!(
                "scale must be finite and > 0.0, got {}",
                scale
            )));
        }
        Ok(Self { factor, scale })
    }

    /// Create a reducer from its configuration block
    pub fn from_config(config: &ReductionConfig) -> Result<Self> {
        Self::new(config.factor, config.scale)
    }

    /// Exponential base of the curve
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Index scale of the curve
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Indices kept from a sequence of length `len`.
    ///
    /// Always starts at 0 (for `len > 0`), strictly increasing, all `< len`.
    pub fn kept_indices(&self, len: usize) -> Vec<usize> {
        let mut indices = Vec::new();
        let mut i = 0usize;
        let mut j = 0usize;

        while i < len {
            indices.push(i);
            j += 1;
            let next = j.saturating_add(self.gap(j)).saturating_sub(1);
            i = next.max(i + 1);
        }

        indices
    }

    fn gap(&self, j: usize) -> usize {
        let exponent = j as f64 / self.scale as f64;
        // Saturating cast: huge curves end the walk instead of wrapping
        (self.factor as f64).powf(exponent).floor() as usize
    }

    /// Reduce a single-channel signal. The side slot of the result stays empty.
    pub fn reduce_signal(&self, signal: &SignalData) -> RefinedData {
        let bins = self.kept_indices(signal.freq_magnitude().len());
        let reduced_mono = pick(signal, &bins);

        trace!(
            "Reduced spectrum from {} to {} points",
            signal.buffer_size(),
            bins.len()
        );

        RefinedData {
            reduced_mono,
            reduced_side: SignalData::default(),
            num_points: bins.len(),
            source_buffer_size: signal.buffer_size(),
            bins,
        }
    }

    /// Reduce mono and side with the same kept indices
    pub fn reduce_processed(&self, data: &ProcessedData) -> RefinedData {
        let bins = self.kept_indices(data.mono.freq_magnitude().len());
        let reduced_mono = pick(&data.mono, &bins);
        let reduced_side = pick(&data.side, &bins);

        trace!(
            "Reduced mono/side spectra from {} to {} points",
            data.mono.buffer_size(),
            bins.len()
        );

        RefinedData {
            reduced_mono,
            reduced_side,
            num_points: bins.len(),
            source_buffer_size: data.mono.buffer_size(),
            bins,
        }
    }
}

/// Gather `signal` at `bins`. Missing samples become NaN and are later
/// treated as out of bounds.
fn pick(signal: &SignalData, bins: &[usize]) -> SignalData {
    let gather = |values: &[f32]| -> Vec<f32> {
        bins.iter()
            .map(|&i| values.get(i).copied().unwrap_or(f32::NAN))
            .collect()
    };

    let time = gather(signal.time_amplitude());
    let freq = gather(signal.freq_magnitude());
    SignalData::new(time, freq, signal.sample_rate())
        .unwrap_or_else(|_| SignalData::zeroed(bins.len(), signal.sample_rate()))
}
