//! Audio source collaborator interface
//!
//! The pipeline never decodes or plays audio itself. Anything able to hand
//! out a time-domain buffer and a windowed magnitude spectrum per channel
//! can drive it.

use serde::{Deserialize, Serialize};

/// Window function applied by the audio source before its FFT.
///
/// The pipeline only passes this through; the source decides what it means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FftWindow {
    /// No windowing
    Rectangular,
    /// Triangular (Bartlett) window
    Triangle,
    /// Hamming window
    Hamming,
    /// Hann window
    Hanning,
    /// Blackman window
    Blackman,
    /// 4-term Blackman-Harris window
    #[default]
    BlackmanHarris,
}

/// Read-only access to a playing audio clip.
pub trait AudioSource {
    /// Number of channels in the clip
    fn channels(&self) -> usize;

    /// Sample rate in Hz
    fn sample_rate(&self) -> u32;

    /// Clip length in seconds
    fn clip_length(&self) -> f32;

    /// Current playback position in seconds
    fn time(&self) -> f32;

    /// Whether playback is running
    fn is_playing(&self) -> bool;

    /// Fill `samples` with the most recent time-domain output of `channel`
    fn output_data(&self, samples: &mut [f32], channel: usize);

    /// Fill `magnitudes` with the current magnitude spectrum of `channel`
    fn spectrum_data(&self, magnitudes: &mut [f32], channel: usize, window: FftWindow);
}
