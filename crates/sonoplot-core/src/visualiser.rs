//! Per-frame visualiser controller
//!
//! One [`Visualiser`] owns the processor, the chart and the point pool of
//! a single on-screen chart. Each call to [`Visualiser::tick`] runs the
//! whole pipeline synchronously: acquire, mix, map, build, update pool.

use crate::chart::ChartStrategy;
use crate::config::VisualiserConfig;
use crate::processor::SignalProcessor;
use crate::series::{PointRenderer, PointSeries};
use crate::source::AudioSource;
use crate::Result;
use tracing::{debug, trace};

/// Outcome of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Frame counter, starting at 1
    pub frame: u64,
    /// The source was not playing; the pool was left untouched
    pub skipped: bool,
    /// Points produced by the chart this frame
    pub num_points: usize,
    /// Points shown after the pool update
    pub visible: usize,
    /// The chart produced no points at all
    pub rejected: bool,
}

/// Engine controller for one chart instance
pub struct Visualiser<H> {
    config: VisualiserConfig,
    processor: SignalProcessor,
    chart: ChartStrategy,
    series: PointSeries<H>,
    frame: u64,
}

impl<H> Visualiser<H> {
    /// Validate `config`, resolve the chart and allocate the point pool.
    ///
    /// All configuration errors surface here, before the first frame.
    pub fn new<S, R>(config: VisualiserConfig, source: &S, renderer: &mut R) -> Result<Self>
    where
        S: AudioSource + ?Sized,
        R: PointRenderer<Handle = H>,
    {
        config.validate()?;

        let chart = ChartStrategy::from_config(&config)?;
        let processor = SignalProcessor::new(source, config.buffer_size, config.window)?;
        let series = PointSeries::new(
            renderer,
            config.buffer_size,
            chart.point_style(),
            config.effective_pixel_scale(),
        );

        debug!(
            "Visualiser created: {:?}/{:?}, buffer_size={}, channels={}",
            config.chart_type,
            config.sub_chart_type,
            config.buffer_size,
            processor.channels()
        );

        Ok(Self {
            config,
            processor,
            chart,
            series,
            frame: 0,
        })
    }

    /// Run the pipeline for one rendered frame
    pub fn tick<S, R>(&mut self, source: &S, renderer: &mut R) -> FrameReport
    where
        S: AudioSource + ?Sized,
        R: PointRenderer<Handle = H>,
    {
        self.frame += 1;

        self.processor.update(source);
        self.processor.sum_to_mono();
        self.processor.side_image();

        if !source.is_playing() || source.time() == 0.0 {
            trace!("Frame {} skipped: source not playing", self.frame);
            return FrameReport {
                frame: self.frame,
                skipped: true,
                ..Default::default()
            };
        }

        let plot = self.chart.update(self.processor.processed_data());
        let visible = self.series.update(renderer, &plot);

        trace!(
            "Frame {}: {} points, {} visible",
            self.frame,
            plot.num_points(),
            visible
        );

        FrameReport {
            frame: self.frame,
            skipped: false,
            num_points: plot.num_points(),
            visible,
            rejected: plot.is_empty(),
        }
    }

    /// Configuration this instance was built with
    pub fn config(&self) -> &VisualiserConfig {
        &self.config
    }

    /// Point pool
    pub fn series(&self) -> &PointSeries<H> {
        &self.series
    }

    /// Active chart
    pub fn chart(&self) -> &ChartStrategy {
        &self.chart
    }

    /// Signal processor with the latest frame
    pub fn processor(&self) -> &SignalProcessor {
        &self.processor
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
