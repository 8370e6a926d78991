//! Windowed magnitude spectra

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use sonoplot_core::FftWindow;
use std::collections::HashMap;
use std::f32::consts::PI;
use std::sync::Arc;
use tracing::debug;

/// Coefficients of `window` over `len` samples
pub fn window_coefficients(window: FftWindow, len: usize) -> Vec<f32> {
    if len < 2 {
        return vec![1.0; len];
    }
    let last = (len - 1) as f32;

    (0..len)
        .map(|i| {
            let t = i as f32 / last;
            let c = |k: f32| (2.0 * PI * k * t).cos();
            match window {
                FftWindow::Rectangular => 1.0,
                FftWindow::Triangle => 1.0 - (2.0 * t - 1.0).abs(),
                FftWindow::Hamming => 0.54 - 0.46 * c(1.0),
                FftWindow::Hanning => 0.5 * (1.0 - c(1.0)),
                FftWindow::Blackman => 0.42 - 0.5 * c(1.0) + 0.08 * c(2.0),
                FftWindow::BlackmanHarris => {
                    0.35875 - 0.48829 * c(1.0) + 0.14128 * c(2.0) - 0.01168 * c(3.0)
                }
            }
        })
        .collect()
}

const WINDOWS: [FftWindow; 6] = [
    FftWindow::Rectangular,
    FftWindow::Triangle,
    FftWindow::Hamming,
    FftWindow::Hanning,
    FftWindow::Blackman,
    FftWindow::BlackmanHarris,
];

/// Precomputed window with its coefficient sum
struct WindowTable {
    coefficients: Vec<f32>,
    sum: f32,
}

/// Forward FFT of a fixed size.
///
/// Magnitudes are divided by the window sum, so a full-scale sine centred
/// on a bin reads 0.5 there.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    fft_size: usize,
    windows: HashMap<FftWindow, WindowTable>,
}

impl SpectrumAnalyzer {
    /// Plan an FFT over `fft_size` samples and precompute every window
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        let windows = WINDOWS
            .iter()
            .map(|&window| {
                let coefficients = window_coefficients(window, fft_size);
                let sum = coefficients.iter().sum();
                (window, WindowTable { coefficients, sum })
            })
            .collect();

        debug!("SpectrumAnalyzer created: fft_size={}", fft_size);
        Self {
            fft,
            fft_size,
            windows,
        }
    }

    /// Samples consumed per transform
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Transform `samples` and write the first `magnitudes.len()` bins.
    ///
    /// `samples` shorter than the FFT are zero-padded at the front.
    pub fn magnitudes(&self, samples: &[f32], window: FftWindow, magnitudes: &mut [f32]) {
        let Some(table) = self.windows.get(&window) else {
            magnitudes.fill(0.0);
            return;
        };

        let offset = self.fft_size.saturating_sub(samples.len());
        let tail = &samples[samples.len().saturating_sub(self.fft_size)..];

        let mut buffer = vec![Complex::new(0.0, 0.0); self.fft_size];
        for ((slot, &sample), &w) in buffer[offset..]
            .iter_mut()
            .zip(tail)
            .zip(&table.coefficients[offset..])
        {
            *slot = Complex::new(sample * w, 0.0);
        }

        self.fft.process(&mut buffer);

        let norm = if table.sum > 0.0 { 1.0 / table.sum } else { 0.0 };
        for (out, bin) in magnitudes.iter_mut().zip(&buffer) {
            *out = bin.norm() * norm;
        }
        for out in magnitudes.iter_mut().skip(self.fft_size) {
            *out = 0.0;
        }
    }
}

impl std::fmt::Debug for SpectrumAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpectrumAnalyzer")
            .field("fft_size", &self.fft_size)
            .finish()
    }
}
