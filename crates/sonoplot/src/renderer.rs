//! Renderer that keeps point state in memory

use glam::Vec3;
use sonoplot_core::{FrameReport, PointRenderer, PointStyle};
use tracing::{debug, info};

/// Handle into a [`HeadlessRenderer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointId(usize);

/// Last state of one point
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessPoint {
    /// Style the point was created with
    pub style: PointStyle,
    /// Position inside the plotting volume
    pub position: Vec3,
    /// Size
    pub scale: Vec3,
    /// Shown or hidden
    pub visible: bool,
}

/// Extent of the visible points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

/// Totals over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub skipped: u64,
    pub rejected: u64,
    pub peak_visible: usize,
}

impl RunStats {
    /// Fold one frame in
    pub fn record(&mut self, report: &FrameReport) {
        self.frames += 1;
        if report.skipped {
            self.skipped += 1;
        } else if report.rejected {
            self.rejected += 1;
        }
        self.peak_visible = self.peak_visible.max(report.visible);
    }
}

/// In-memory point store standing in for a scene graph
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    points: Vec<HeadlessPoint>,
    commands: u64,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All points ever created
    pub fn points(&self) -> &[HeadlessPoint] {
        &self.points
    }

    /// Number of shown points
    pub fn visible_count(&self) -> usize {
        self.points.iter().filter(|p| p.visible).count()
    }

    /// Commands received since creation
    pub fn command_count(&self) -> u64 {
        self.commands
    }

    /// Bounding box of the shown points, `None` when nothing is shown
    pub fn visible_bounds(&self) -> Option<Bounds> {
        self.points
            .iter()
            .filter(|p| p.visible)
            .map(|p| p.position)
            .fold(None, |acc, pos| match acc {
                None => Some(Bounds { min: pos, max: pos }),
                Some(b) => Some(Bounds {
                    min: b.min.min(pos),
                    max: b.max.max(pos),
                }),
            })
    }

    /// Log the state after a frame
    pub fn log_frame(&self, report: &FrameReport) {
        if report.skipped {
            debug!("Frame {}: skipped", report.frame);
            return;
        }
        match self.visible_bounds() {
            Some(bounds) => debug!(
                "Frame {}: {}/{} visible, bounds {:?}..{:?}",
                report.frame,
                self.visible_count(),
                report.num_points,
                bounds.min,
                bounds.max
            ),
            None => debug!(
                "Frame {}: nothing visible ({} points)",
                report.frame, report.num_points
            ),
        }
    }

    /// Log totals at the end of a run
    pub fn log_summary(&self, stats: &RunStats) {
        info!(
            "Rendered {} frames ({} skipped, {} rejected), peak {} of {} points visible, {} commands",
            stats.frames,
            stats.skipped,
            stats.rejected,
            stats.peak_visible,
            self.points().len(),
            self.command_count()
        );
    }
}

impl PointRenderer for HeadlessRenderer {
    type Handle = PointId;

    fn create_point(&mut self, style: PointStyle, pixel_scale: f32) -> PointId {
        self.points.push(HeadlessPoint {
            style,
            position: Vec3::ZERO,
            scale: Vec3::splat(pixel_scale),
            visible: false,
        });
        PointId(self.points.len() - 1)
    }

    fn move_to(&mut self, handle: &PointId, position: Vec3) {
        self.commands += 1;
        if let Some(point) = self.points.get_mut(handle.0) {
            point.position = position;
        }
    }

    fn set_scale(&mut self, handle: &PointId, scale: Vec3) {
        self.commands += 1;
        if let Some(point) = self.points.get_mut(handle.0) {
            point.scale = scale;
        }
    }

    fn set_visible(&mut self, handle: &PointId, visible: bool) {
        self.commands += 1;
        if let Some(point) = self.points.get_mut(handle.0) {
            point.visible = visible;
        }
    }
}
