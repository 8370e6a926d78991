//! Clip playback with a manually advanced clock

use super::clip::Clip;
use super::spectrum::SpectrumAnalyzer;
use sonoplot_core::{AudioSource, FftWindow};
use std::cell::RefCell;
use tracing::{debug, info};

/// Plays a [`Clip`] and serves the latest window of it to the visualiser.
///
/// The clock only moves through [`advance`](Self::advance), so a run is
/// fully deterministic.
#[derive(Debug)]
pub struct ClipPlayer {
    clip: Clip,
    analyzer: SpectrumAnalyzer,
    /// Analyzer for the last request that did not match `buffer_size`
    resized: RefCell<Option<SpectrumAnalyzer>>,
    buffer_size: usize,
    time: f32,
    playing: bool,
    looping: bool,
}

impl ClipPlayer {
    /// Create a stopped player serving frames of `buffer_size` samples
    pub fn new(clip: Clip, buffer_size: usize) -> Self {
        debug!(
            "ClipPlayer created: channels={}, duration={:.2}s, buffer_size={}",
            clip.channel_count(),
            clip.duration(),
            buffer_size
        );
        Self {
            analyzer: SpectrumAnalyzer::new(2 * buffer_size),
            resized: RefCell::new(None),
            clip,
            buffer_size,
            time: 0.0,
            playing: false,
            looping: false,
        }
    }

    /// Restart playback when the end is reached
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Start or resume playback
    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Move the playhead forward by `seconds` while playing
    pub fn advance(&mut self, seconds: f32) {
        if !self.playing {
            return;
        }

        self.time += seconds;
        let duration = self.clip.duration();
        if self.time >= duration {
            if self.looping && duration > 0.0 {
                self.time %= duration;
            } else {
                self.time = duration;
                self.playing = false;
                info!("Clip finished after {:.2}s", duration);
            }
        }
    }

    /// Loaded clip
    pub fn clip(&self) -> &Clip {
        &self.clip
    }

    /// Index one past the most recent sample
    fn cursor(&self) -> usize {
        ((self.time * self.clip.sample_rate() as f32) as usize).min(self.clip.len())
    }

    /// The `len` samples ending at the playhead
    fn recent(&self, channel: usize, len: usize) -> &[f32] {
        let Some(samples) = self.clip.channel(channel) else {
            return &[];
        };
        let end = self.cursor();
        &samples[end.saturating_sub(len)..end]
    }
}

impl AudioSource for ClipPlayer {
    fn channels(&self) -> usize {
        self.clip.channel_count()
    }

    fn sample_rate(&self) -> u32 {
        self.clip.sample_rate()
    }

    fn clip_length(&self) -> f32 {
        self.clip.duration()
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    /// Latest samples, zero-padded at the front near the start of the clip
    fn output_data(&self, samples: &mut [f32], channel: usize) {
        let recent = self.recent(channel, samples.len());
        let offset = samples.len() - recent.len();
        samples[..offset].fill(0.0);
        samples[offset..].copy_from_slice(recent);
    }

    fn spectrum_data(&self, magnitudes: &mut [f32], channel: usize, window: FftWindow) {
        if magnitudes.len() == self.buffer_size {
            let recent = self.recent(channel, self.analyzer.fft_size());
            self.analyzer.magnitudes(recent, window, magnitudes);
            return;
        }

        let fft_size = 2 * magnitudes.len();
        let mut resized = self.resized.borrow_mut();
        let analyzer = match resized.take() {
            Some(analyzer) if analyzer.fft_size() == fft_size => analyzer,
            _ => {
                debug!("Planning extra FFT of size {}", fft_size);
                SpectrumAnalyzer::new(fft_size)
            }
        };
        analyzer.magnitudes(self.recent(channel, fft_size), window, magnitudes);
        *resized = Some(analyzer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_clip() -> Clip {
        let left: Vec<f32> = (0..1000).map(|i| i as f32).collect();
        let right: Vec<f32> = left.iter().map(|v| -v).collect();
        Clip::from_channels(vec![left, right], 1000).unwrap()
    }

    #[test]
    fn test_stopped_until_played() {
        let mut player = ClipPlayer::new(ramp_clip(), 4);
        player.advance(0.5);
        assert!(!player.is_playing());
        assert_eq!(player.time(), 0.0);

        player.play();
        player.advance(0.5);
        assert!(player.is_playing());
        assert_eq!(player.time(), 0.5);
    }

    #[test]
    fn test_output_is_latest_window() {
        let mut player = ClipPlayer::new(ramp_clip(), 4);
        player.play();
        player.advance(0.25);

        let mut samples = [0.0; 4];
        player.output_data(&mut samples, 0);
        assert_eq!(samples, [246.0, 247.0, 248.0, 249.0]);
        player.output_data(&mut samples, 1);
        assert_eq!(samples, [-246.0, -247.0, -248.0, -249.0]);
    }

    #[test]
    fn test_output_padded_at_start() {
        let mut player = ClipPlayer::new(ramp_clip(), 4);
        player.play();
        player.advance(0.002);

        let mut samples = [9.0; 4];
        player.output_data(&mut samples, 0);
        assert_eq!(samples, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_channel_is_silent() {
        let mut player = ClipPlayer::new(ramp_clip(), 4);
        player.play();
        player.advance(0.5);

        let mut samples = [9.0; 4];
        player.output_data(&mut samples, 5);
        assert_eq!(samples, [0.0; 4]);
    }

    #[test]
    fn test_stops_at_end_unless_looping() {
        let mut player = ClipPlayer::new(ramp_clip(), 4);
        player.play();
        player.advance(1.5);
        assert!(!player.is_playing());
        assert_eq!(player.time(), 1.0);

        let mut looping = ClipPlayer::new(ramp_clip(), 4).with_looping(true);
        looping.play();
        looping.advance(1.25);
        assert!(looping.is_playing());
        assert!((looping.time() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_spectrum_finds_tone() {
        // 500 Hz at 8 kHz lands on bin 8 of a 128-point FFT
        let clip = Clip::tones(&[500.0], 1.0, 8000, 1.0).unwrap();
        let mut player = ClipPlayer::new(clip, 64);
        player.play();
        player.advance(0.5);

        let mut magnitudes = vec![0.0; 64];
        player.spectrum_data(&mut magnitudes, 0, FftWindow::Rectangular);
        assert!((magnitudes[8] - 0.5).abs() < 1e-2);
        assert!(magnitudes
            .iter()
            .enumerate()
            .all(|(i, &m)| i == 8 || m < magnitudes[8]));

        // Other request sizes still work
        let mut small = vec![0.0; 32];
        player.spectrum_data(&mut small, 0, FftWindow::Rectangular);
        assert!((small[4] - 0.5).abs() < 1e-2);
    }

    #[test]
    fn test_resized_analyzer_is_kept() {
        let clip = Clip::tones(&[500.0], 1.0, 8000, 1.0).unwrap();
        let mut player = ClipPlayer::new(clip, 64);
        player.play();
        player.advance(0.5);

        let mut magnitudes = vec![0.0; 64];
        player.spectrum_data(&mut magnitudes, 0, FftWindow::Hanning);
        assert!(player.resized.borrow().is_none());

        let mut small = vec![0.0; 32];
        player.spectrum_data(&mut small, 0, FftWindow::Hanning);
        player.spectrum_data(&mut small, 0, FftWindow::Hanning);
        let fft_size = player.resized.borrow().as_ref().map(|a| a.fft_size());
        assert_eq!(fft_size, Some(64));
    }
}
