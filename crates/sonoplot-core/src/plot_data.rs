//! Bounded coordinate construction
//!
//! `PlotData3` is the transport value between the charts and the point
//! pool. Every stored point is either inside the unit plotting volume or
//! the NaN sentinel that tells the pool to hide it.

use crate::axis::AxisCoordinates;
use glam::Vec3;
use tracing::warn;

/// Lower bound of the plotting volume on every axis
pub const BOUND_MIN: f32 = -0.5;

/// Upper bound of the plotting volume on every axis
pub const BOUND_MAX: f32 = 0.5;

/// Sentinel stored for points that must not be rendered
pub const HIDDEN_POINT: Vec3 = Vec3::NAN;

/// True if `value` lies in `[BOUND_MIN, BOUND_MAX]`. NaN is never in bounds.
#[inline]
pub fn in_bounds(value: f32) -> bool {
    (BOUND_MIN..=BOUND_MAX).contains(&value)
}

/// True if `point` is the hidden sentinel (any NaN component)
#[inline]
pub fn is_hidden(point: Vec3) -> bool {
    point.is_nan()
}

/// Cartesian point data for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotData3 {
    data: Vec<Vec3>,
    num_points: usize,
}

impl PlotData3 {
    /// Build points from three coordinate sequences.
    ///
    /// The sequences must have equal lengths; otherwise the whole frame is
    /// rejected and the result is empty. Points with any component outside
    /// `[-0.5, 0.5]` (including NaN and infinities) become [`HIDDEN_POINT`].
    pub fn new(x: &[f32], y: &[f32], z: &[f32]) -> Self {
        if x.len() != y.len() || x.len() != z.len() {
            warn!(
                "Rejecting frame: coordinate lengths differ (x={}, y={}, z={})",
                x.len(),
                y.len(),
                z.len()
            );
            return Self::default();
        }

        let data: Vec<Vec3> = x
            .iter()
            .zip(y)
            .zip(z)
            .map(|((&x, &y), &z)| {
                if in_bounds(x) && in_bounds(y) && in_bounds(z) {
                    Vec3::new(x, y, z)
                } else {
                    HIDDEN_POINT
                }
            })
            .collect();

        Self {
            num_points: data.len(),
            data,
        }
    }

    /// Build points from a mapping pass
    pub fn from_coordinates(coords: &AxisCoordinates) -> Self {
        Self::new(&coords.x, &coords.y, &coords.z)
    }

    /// Stored points
    pub fn data(&self) -> &[Vec3] {
        &self.data
    }

    /// Number of stored points (0 for a rejected frame)
    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Number of points that will be rendered
    pub fn visible_count(&self) -> usize {
        self.data.iter().filter(|p| !is_hidden(**p)).count()
    }

    /// True if nothing was stored
    pub fn is_empty(&self) -> bool {
        self.num_points == 0
    }
}
