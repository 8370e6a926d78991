//! Fixed-capacity pool of renderable points
//!
//! Render primitives are created once, sized for the largest frame, and
//! then only moved, scaled and shown or hidden. The pool owns opaque
//! handles; the renderer owns the primitives behind them.

use crate::plot_data::{is_hidden, PlotData3};
use glam::Vec3;
use tracing::{debug, warn};

/// How a point interprets its coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStyle {
    /// `(x, y, z)` is the position
    Scatter,
    /// `(y, z)` is the position, `x` is the extent along depth
    Stretch,
}

/// Renderer collaborator.
///
/// Handles are bound to the plotting volume when created; positions are
/// local to that volume.
pub trait PointRenderer {
    /// Opaque reference to one render primitive
    type Handle;

    /// Create a primitive for one point
    fn create_point(&mut self, style: PointStyle, pixel_scale: f32) -> Self::Handle;

    /// Move a primitive
    fn move_to(&mut self, handle: &Self::Handle, position: Vec3);

    /// Resize a primitive
    fn set_scale(&mut self, handle: &Self::Handle, scale: Vec3);

    /// Show or hide a primitive
    fn set_visible(&mut self, handle: &Self::Handle, visible: bool);
}

/// Last state issued for one handle
#[derive(Debug, Clone)]
pub struct PointSlot<H> {
    handle: H,
    position: Vec3,
    scale: Vec3,
    visible: bool,
}

impl<H> PointSlot<H> {
    /// Renderer handle
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Last position sent to the renderer
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Last scale sent to the renderer
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Whether the point is currently shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Pool of point handles with a per-frame active count.
#[derive(Debug, Clone)]
pub struct PointSeries<H> {
    slots: Vec<PointSlot<H>>,
    style: PointStyle,
    pixel_scale: f32,
}

impl<H> PointSeries<H> {
    /// Create `capacity` hidden points through `renderer`
    pub fn new<R>(renderer: &mut R, capacity: usize, style: PointStyle, pixel_scale: f32) -> Self
    where
        R: PointRenderer<Handle = H>,
    {
        let rest_scale = Vec3::splat(pixel_scale);
        let slots = (0..capacity)
            .map(|_| {
                let handle = renderer.create_point(style, pixel_scale);
                renderer.move_to(&handle, Vec3::ZERO);
                renderer.set_scale(&handle, rest_scale);
                renderer.set_visible(&handle, false);
                PointSlot {
                    handle,
                    position: Vec3::ZERO,
                    scale: rest_scale,
                    visible: false,
                }
            })
            .collect();

        debug!(
            "PointSeries created: capacity={}, style={:?}, pixel_scale={}",
            capacity, style, pixel_scale
        );

        Self {
            slots,
            style,
            pixel_scale,
        }
    }

    /// Apply one frame of point data and return the number of visible points.
    ///
    /// Slot `i < num_points` follows `data[i]` (hidden for the NaN
    /// sentinel); every slot from `num_points` on is hidden.
    pub fn update<R>(&mut self, renderer: &mut R, plot: &PlotData3) -> usize
    where
        R: PointRenderer<Handle = H>,
    {
        let capacity = self.slots.len();
        let active = plot.num_points().min(plot.data().len());
        if active > capacity {
            warn!(
                "Frame has {} points but the pool holds {}; extra points dropped",
                active, capacity
            );
        }
        let active = active.min(capacity);

        let rest_scale = Vec3::splat(self.pixel_scale);
        let mut visible = 0;

        for (slot, &point) in self.slots.iter_mut().zip(&plot.data()[..active]) {
            if is_hidden(point) {
                slot.position = Vec3::ZERO;
                slot.scale = rest_scale;
                slot.visible = false;
            } else {
                match self.style {
                    PointStyle::Scatter => {
                        slot.position = point;
                    }
                    PointStyle::Stretch => {
                        // Keep the primitive inside the volume along z
                        slot.position = Vec3::new(0.0, point.y, point.z - self.pixel_scale / 2.0);
                        slot.scale = Vec3::new(self.pixel_scale, self.pixel_scale, point.x);
                    }
                }
                slot.visible = true;
                visible += 1;
            }

            renderer.move_to(&slot.handle, slot.position);
            if self.style == PointStyle::Stretch {
                renderer.set_scale(&slot.handle, slot.scale);
            }
            renderer.set_visible(&slot.handle, slot.visible);
        }

        for slot in &mut self.slots[active..] {
            slot.visible = false;
            renderer.set_visible(&slot.handle, false);
        }

        visible
    }

    /// Number of handles in the pool
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of currently visible points
    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|s| s.visible).count()
    }

    /// State of slot `index`
    pub fn slot(&self, index: usize) -> Option<&PointSlot<H>> {
        self.slots.get(index)
    }

    /// Style of every point in the pool
    pub fn style(&self) -> PointStyle {
        self.style
    }
}
