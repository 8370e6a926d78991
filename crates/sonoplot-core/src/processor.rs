//! Multichannel acquisition and channel mixing
//!
//! The processor pulls one frame of data per channel from an
//! [`AudioSource`] and derives the mono sum and the stereo side image from
//! those raw channels.

use crate::signal::{ProcessedData, SignalData};
use crate::source::{AudioSource, FftWindow};
use crate::{CoreError, Result};
use tracing::{debug, trace};

/// Acquires and mixes per-frame channel buffers.
///
/// Call [`update`](Self::update) before any mixing step; the mixing steps
/// always read the raw channels of the latest update, never each other's
/// output.
#[derive(Debug, Clone)]
pub struct SignalProcessor {
    buffer_size: usize,
    channels: usize,
    sample_rate: u32,
    window: FftWindow,
    processed: ProcessedData,
}

impl SignalProcessor {
    /// Create a processor for the clip currently loaded in `source`
    pub fn new<S>(source: &S, buffer_size: usize, window: FftWindow) -> Result<Self>
    where
        S: AudioSource + ?Sized,
    {
        let channels = source.channels();
        if channels == 0 {
            return Err(CoreError::NoChannels);
        }

        debug!(
            "SignalProcessor created: channels={}, sample_rate={}, buffer_size={}, window={:?}",
            channels,
            source.sample_rate(),
            buffer_size,
            window
        );

        Ok(Self {
            buffer_size,
            channels,
            sample_rate: source.sample_rate(),
            window,
            processed: ProcessedData::default(),
        })
    }

    /// Pull a fresh frame of every channel from `source`
    pub fn update<S>(&mut self, source: &S)
    where
        S: AudioSource + ?Sized,
    {
        let mut raw = Vec::with_capacity(self.channels);

        for channel in 0..self.channels {
            let mut time = vec![0.0; self.buffer_size];
            let mut freq = vec![0.0; self.buffer_size];

            source.output_data(&mut time, channel);
            source.spectrum_data(&mut freq, channel, self.window);

            // Both buffers were allocated with the same length
            raw.push(
                SignalData::new(time, freq, self.sample_rate)
                    .unwrap_or_else(|_| SignalData::zeroed(self.buffer_size, self.sample_rate)),
            );
        }

        let mut processed = ProcessedData::new(raw);
        processed.mono = SignalData::zeroed(self.buffer_size, self.sample_rate);
        processed.side = SignalData::zeroed(self.buffer_size, self.sample_rate);
        self.processed = processed;

        trace!("Acquired {} channels", self.channels);
    }

    /// Sum all raw channels into the mono signal
    pub fn sum_to_mono(&mut self) {
        let mut time = vec![0.0f32; self.buffer_size];
        let mut freq = vec![0.0f32; self.buffer_size];

        for channel in &self.processed.raw {
            for (acc, &v) in time.iter_mut().zip(channel.time_amplitude()) {
                *acc += v;
            }
            for (acc, &v) in freq.iter_mut().zip(channel.freq_magnitude()) {
                *acc += v;
            }
        }

        if let Ok(mono) = SignalData::new(time, freq, self.sample_rate) {
            self.processed.mono = mono;
        }
    }

    /// Derive the side image from a stereo pair.
    ///
    /// Time domain: `left - right`. Frequency domain: `|left - right|` of the
    /// magnitudes, which approximates the true side spectrum since no phase
    /// is available. Does nothing unless there are exactly two channels.
    pub fn side_image(&mut self) {
        if self.channels != 2 || self.processed.raw.len() != 2 {
            trace!("Side image skipped for {} channels", self.channels);
            return;
        }

        let left = &self.processed.raw[0];
        let right = &self.processed.raw[1];

        let time: Vec<f32> = left
            .time_amplitude()
            .iter()
            .zip(right.time_amplitude())
            .map(|(l, r)| l - r)
            .collect();
        let freq: Vec<f32> = left
            .freq_magnitude()
            .iter()
            .zip(right.freq_magnitude())
            .map(|(l, r)| (l - r).abs())
            .collect();

        if let Ok(side) = SignalData::new(time, freq, self.sample_rate) {
            self.processed.side = side;
        }
    }

    /// The data assembled by the most recent update and mixing steps
    pub fn processed_data(&self) -> &ProcessedData {
        &self.processed
    }

    /// Number of channels read from the source
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Samples per channel per frame
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}
