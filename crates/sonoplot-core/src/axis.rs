//! Axis mapping functions
//!
//! Each mapping turns a sequence of samples into per-point `x`, `y` and `z`
//! coordinates inside the unit plotting volume. `y` carries amplitude or
//! magnitude, `z` carries time or frequency, and `x` is depth.
//!
//! Logarithms of non-positive magnitudes produce `-inf` or NaN here on
//! purpose: [`PlotData3`](crate::plot_data::PlotData3) treats any such
//! coordinate as out of bounds and hides the point.

use crate::signal::RefinedData;

/// Lowest decibel level mapped onto the plot
pub const DEFAULT_MIN_DB: f32 = -120.0;

/// Offset applied to the side level before it becomes a depth scale
pub const DEFAULT_STRETCH_OFFSET: f32 = 0.17;

/// Coordinate sequences produced by one mapping pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisCoordinates {
    /// Depth axis
    pub x: Vec<f32>,
    /// Amplitude / magnitude axis
    pub y: Vec<f32>,
    /// Time / frequency axis
    pub z: Vec<f32>,
}

impl AxisCoordinates {
    /// Allocate empty sequences for `n` points
    pub fn with_capacity(n: usize) -> Self {
        Self {
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            z: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, x: f32, y: f32, z: f32) {
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
    }

    /// Number of points, assuming equal lengths
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// True if no points were mapped
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Running maximum magnitude used to normalise linear magnitude plots.
///
/// Owned by exactly one chart; it only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeakNormaliser {
    peak: f32,
}

impl PeakNormaliser {
    /// Create a normaliser that has seen nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `magnitude` and return it divided by the updated peak
    pub fn normalise(&mut self, magnitude: f32) -> f32 {
        if magnitude > self.peak {
            self.peak = magnitude;
        }
        magnitude / self.peak
    }

    /// Largest magnitude observed so far
    pub fn peak(&self) -> f32 {
        self.peak
    }
}

/// Position of frequency bin `bin` on a log axis, in `[-1, 0]` for bins
/// inside the buffer.
///
/// `log10(res + res * bin) / log10(buffer_size)` with `res = 1 / buffer_size`,
/// evaluated as `log10(bin + 1) / log10(buffer_size) - 1` so that both
/// endpoints are exact.
pub fn frequency_axis(bin: usize, buffer_size: usize) -> f32 {
    let size = buffer_size as f32;
    (bin as f32 + 1.0).log10() / size.log10() - 1.0
}

/// Voltage decibels: `20 * log10(magnitude)`
pub fn to_decibels(magnitude: f32) -> f32 {
    20.0 * magnitude.log10()
}

/// Waveform: `y = a / 2`, `z` runs from -0.5 upwards.
pub fn time_linear(amplitudes: &[f32]) -> AxisCoordinates {
    let n_total = amplitudes.len() as f32;
    let mut coords = AxisCoordinates::with_capacity(amplitudes.len());

    for (n, &a) in amplitudes.iter().enumerate() {
        coords.push(0.0, a / 2.0, -0.5 + n as f32 / n_total);
    }
    coords
}

/// Linear spectrum: peak-normalised magnitude resting on the bottom face,
/// `z` runs from 0.5 downwards.
pub fn frequency_linear(magnitudes: &[f32], peak: &mut PeakNormaliser) -> AxisCoordinates {
    let n_total = magnitudes.len() as f32;
    let mut coords = AxisCoordinates::with_capacity(magnitudes.len());

    for (n, &m) in magnitudes.iter().enumerate() {
        coords.push(0.0, peak.normalise(m) - 0.5, 0.5 - n as f32 / n_total);
    }
    coords
}

/// Log-frequency spectrum with linear, peak-normalised magnitude
pub fn frequency_log(
    magnitudes: &[f32],
    buffer_size: usize,
    peak: &mut PeakNormaliser,
) -> AxisCoordinates {
    let mut coords = AxisCoordinates::with_capacity(magnitudes.len());

    for (n, &m) in magnitudes.iter().enumerate() {
        let y = peak.normalise(m) - 0.5;
        let z = -0.5 - frequency_axis(n, buffer_size);
        coords.push(0.0, y, z);
    }
    coords
}

/// Log-frequency spectrum in decibels, top face at 0 dB.
///
/// Expects reduced data. Point `k` sits at reduced index `k` of the
/// unreduced log axis, so the reduced cloud stops short of the far face.
pub fn frequency_log_log(refined: &RefinedData, min_db: f32) -> AxisCoordinates {
    let magnitudes = refined.reduced_mono.freq_magnitude();
    let mut coords = AxisCoordinates::with_capacity(magnitudes.len());

    for (k, &m) in magnitudes.iter().enumerate() {
        let y = to_decibels(m) / -min_db + 0.5;
        let z = -0.5 - frequency_axis(k, refined.source_buffer_size);
        coords.push(0.0, y, z);
    }
    coords
}

/// Mid/side spectrogram. Mono drives `y`/`z` as in
/// [`frequency_log_log`]; the side level becomes a non-negative depth
/// scale `x = |side_db / min_db / 2 - offset|`.
pub fn stretch_log_log(refined: &RefinedData, min_db: f32, offset: f32) -> AxisCoordinates {
    let mono = refined.reduced_mono.freq_magnitude();
    let side = refined.reduced_side.freq_magnitude();
    let mut coords = AxisCoordinates::with_capacity(mono.len());

    for (k, &m) in mono.iter().enumerate() {
        let side_db = side.get(k).map_or(f32::NAN, |&s| to_decibels(s));
        let x = (side_db / min_db / 2.0 - offset).abs();
        let y = to_decibels(m) / -min_db + 0.5;
        let z = -0.5 - frequency_axis(k, refined.source_buffer_size);
        coords.push(x, y, z);
    }
    coords
}
