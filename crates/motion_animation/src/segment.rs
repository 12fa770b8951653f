//! Segment interpolation
//!
//! Cuts a sub-range `[start, end]` out of a base curve and rescales it so the
//! slice itself runs from 0 to 1. Playing consecutive segments of one curve
//! back to back reproduces the motion of the whole curve.

use std::fmt;
use std::sync::Arc;

use crate::easing::{Interpolator, SharedInterpolator};
use crate::error::{AnimationError, Result};

/// A slice of a base curve, normalized to `[0, 1] -> [0, 1]`
#[derive(Clone)]
pub struct SegmentInterpolator {
    base: SharedInterpolator,
    start: f32,
    end: f32,
    /// `base(start)`
    offset: f32,
    /// `end - start`
    x_range: f32,
    /// `base(end) - base(start)`
    y_range: f32,
}

impl SegmentInterpolator {
    /// Create a segment of `base` over `[start, end]`.
    ///
    /// Requires `0 <= start < end <= 1` and a base curve that actually moves
    /// between `start` and `end`.
    pub fn new(base: SharedInterpolator, start: f32, end: f32) -> Result<Self> {
        let in_unit = |v: f32| v.is_finite() && (0.0..=1.0).contains(&v);
        if !in_unit(start) || !in_unit(end) || start >= end {
            return Err(AnimationError::InvalidRange { start, end });
        }

        let offset = base.interpolate(start);
        let y_range = base.interpolate(end) - offset;
        if y_range == 0.0 || !y_range.is_finite() {
            tracing::warn!(start, end, "base curve is flat over segment");
            return Err(AnimationError::DegenerateSegment { start, end });
        }

        Ok(Self {
            base,
            start,
            end,
            offset,
            x_range: end - start,
            y_range,
        })
    }

    /// A segment spanning the whole base curve
    pub fn full(base: SharedInterpolator) -> Result<Self> {
        Self::new(base, 0.0, 1.0)
    }

    /// The curve this segment was cut from
    pub fn base(&self) -> &SharedInterpolator {
        &self.base
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    /// Whether this segment was cut from exactly `curve` (same allocation)
    pub fn is_cut_from(&self, curve: &SharedInterpolator) -> bool {
        Arc::ptr_eq(&self.base, curve)
    }
}

impl Interpolator for SegmentInterpolator {
    fn interpolate(&self, input: f32) -> f32 {
        (self.base.interpolate(self.start + input * self.x_range) - self.offset) / self.y_range
    }
}

impl fmt::Debug for SegmentInterpolator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SegmentInterpolator")
            .field("start", &self.start)
            .field("end", &self.end)
            .finish_non_exhaustive()
    }
}
