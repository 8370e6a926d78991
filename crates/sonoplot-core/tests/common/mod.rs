#![allow(dead_code)]

use sonoplot_core::{AudioSource, FftWindow, PointRenderer, PointStyle, Vec3};

/// Audio source that replays fixed per-channel buffers
pub struct MockSource {
    pub time: Vec<Vec<f32>>,
    pub freq: Vec<Vec<f32>>,
    pub playing: bool,
    pub position: f32,
    pub sample_rate: u32,
}

impl MockSource {
    pub fn new(time: Vec<Vec<f32>>, freq: Vec<Vec<f32>>) -> Self {
        Self {
            time,
            freq,
            playing: true,
            position: 0.5,
            sample_rate: 44100,
        }
    }

    /// `channels` channels of constant data
    pub fn constant(channels: usize, len: usize, amplitude: f32, magnitude: f32) -> Self {
        Self::new(
            vec![vec![amplitude; len]; channels],
            vec![vec![magnitude; len]; channels],
        )
    }
}

impl AudioSource for MockSource {
    fn channels(&self) -> usize {
        self.time.len()
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn clip_length(&self) -> f32 {
        10.0
    }

    fn time(&self) -> f32 {
        self.position
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn output_data(&self, samples: &mut [f32], channel: usize) {
        for (dst, src) in samples.iter_mut().zip(&self.time[channel]) {
            *dst = *src;
        }
    }

    fn spectrum_data(&self, magnitudes: &mut [f32], channel: usize, _window: FftWindow) {
        for (dst, src) in magnitudes.iter_mut().zip(&self.freq[channel]) {
            *dst = *src;
        }
    }
}

/// State of one recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPoint {
    pub style: PointStyle,
    pub position: Vec3,
    pub scale: Vec3,
    pub visible: bool,
}

/// Renderer that records the last command for every primitive
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub points: Vec<RecordedPoint>,
    pub commands: usize,
}

impl RecordingRenderer {
    pub fn visible_count(&self) -> usize {
        self.points.iter().filter(|p| p.visible).count()
    }
}

impl PointRenderer for RecordingRenderer {
    type Handle = usize;

    fn create_point(&mut self, style: PointStyle, pixel_scale: f32) -> usize {
        self.points.push(RecordedPoint {
            style,
            position: Vec3::ZERO,
            scale: Vec3::splat(pixel_scale),
            visible: true,
        });
        self.points.len() - 1
    }

    fn move_to(&mut self, handle: &usize, position: Vec3) {
        self.commands += 1;
        self.points[*handle].position = position;
    }

    fn set_scale(&mut self, handle: &usize, scale: Vec3) {
        self.commands += 1;
        self.points[*handle].scale = scale;
    }

    fn set_visible(&mut self, handle: &usize, visible: bool) {
        self.commands += 1;
        self.points[*handle].visible = visible;
    }
}
