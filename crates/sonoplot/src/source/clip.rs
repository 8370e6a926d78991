//! Decoded multichannel PCM

use anyhow::{bail, Context, Result};
use std::f32::consts::PI;
use std::path::Path;
use tracing::info;

/// A fully decoded clip, one sample vector per channel
#[derive(Debug, Clone, PartialEq)]
pub struct Clip {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl Clip {
    /// Wrap already decoded channels. All channels must have the same length.
    pub fn from_channels(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if channels.is_empty() {
            bail!("Clip has no channels");
        }
        if sample_rate == 0 {
            bail!("Clip sample rate must be positive");
        }
        let len = channels[0].len();
        if let Some(bad) = channels.iter().position(|c| c.len() != len) {
            bail!(
                "Channel {} has {} samples, expected {}",
                bad,
                channels[bad].len(),
                len
            );
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Decode a WAV file (integer or float PCM)
    pub fn load_wav(path: &Path) -> Result<Self> {
        let mut reader = hound::WavReader::open(path)
            .with_context(|| format!("Failed to open WAV file: {:?}", path))?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<_, _>>()
                .with_context(|| format!("Failed to decode WAV samples: {:?}", path))?,
            hound::SampleFormat::Int => {
                let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / full_scale))
                    .collect::<std::result::Result<_, _>>()
                    .with_context(|| format!("Failed to decode WAV samples: {:?}", path))?
            }
        };

        let channel_count = spec.channels as usize;
        if channel_count == 0 {
            bail!("WAV file has no channels: {:?}", path);
        }

        let frames = interleaved.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];
        for frame in interleaved.chunks_exact(channel_count) {
            for (channel, &sample) in channels.iter_mut().zip(frame) {
                channel.push(sample);
            }
        }

        info!(
            "Loaded {:?}: {} channels, {} Hz, {} frames",
            path, channel_count, spec.sample_rate, frames
        );
        Self::from_channels(channels, spec.sample_rate)
    }

    /// One sine tone per channel
    pub fn tones(
        frequencies: &[f32],
        amplitude: f32,
        sample_rate: u32,
        duration: f32,
    ) -> Result<Self> {
        let len = (duration.max(0.0) * sample_rate as f32) as usize;
        let channels = frequencies
            .iter()
            .map(|&freq| {
                let step = 2.0 * PI * freq / sample_rate as f32;
                (0..len).map(|i| amplitude * (step * i as f32).sin()).collect()
            })
            .collect();
        Self::from_channels(channels, sample_rate)
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples of `channel`, if it exists
    pub fn channel(&self, channel: usize) -> Option<&[f32]> {
        self.channels.get(channel).map(Vec::as_slice)
    }

    /// Samples per second
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Samples per channel
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    /// Length in seconds
    pub fn duration(&self) -> f32 {
        self.len() as f32 / self.sample_rate as f32
    }
}
