//! Weighted sequential stages
//!
//! A [`SequentialSet`] runs its stages back to back. Each stage takes a share
//! of the total duration and of the total easing curve proportional to its
//! weight, so the stages played in order move like one animation driven by
//! the total curve.
//!
//! Every mutation (adding a stage, setting the duration, setting the curve)
//! redistributes all stages from scratch.

use std::fmt;
use std::ops::Index;

use crate::easing::{Interpolator, SharedInterpolator};
use crate::error::{AnimationError, Result};
use crate::segment::SegmentInterpolator;

/// One stage of a sequential set
#[derive(Clone, Debug)]
pub struct Stage<T> {
    item: T,
    weight: f32,
    /// Distributed duration, `None` while the set has no total duration
    duration_ms: Option<u32>,
    /// Distributed slice of the total curve, `None` while the set has no curve
    interpolator: Option<SegmentInterpolator>,
}

impl<T> Stage<T> {
    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn item_mut(&mut self) -> &mut T {
        &mut self.item
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn duration_ms(&self) -> Option<u32> {
        self.duration_ms
    }

    pub fn interpolator(&self) -> Option<&SegmentInterpolator> {
        self.interpolator.as_ref()
    }

    /// Eased progress of this stage at `fraction` of its own duration.
    ///
    /// Stages without an assigned curve progress linearly.
    pub fn progress(&self, fraction: f32) -> f32 {
        let fraction = fraction.clamp(0.0, 1.0);
        match &self.interpolator {
            Some(segment) => segment.interpolate(fraction),
            None => fraction,
        }
    }
}

/// Stages played one after another with weighted duration and easing
#[derive(Clone)]
pub struct SequentialSet<T> {
    stages: Vec<Stage<T>>,
    duration_ms: Option<u32>,
    interpolator: Option<SharedInterpolator>,
}

impl<T> SequentialSet<T> {
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            duration_ms: None,
            interpolator: None,
        }
    }

    /// Builder: set the total duration
    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.set_duration(Some(duration_ms));
        self
    }

    /// Builder: set the total curve
    pub fn with_interpolator(mut self, interpolator: SharedInterpolator) -> Result<Self> {
        self.set_interpolator(Some(interpolator))?;
        Ok(self)
    }

    /// Builder: add a stage with weight 1
    pub fn with_stage(mut self, item: T) -> Result<Self> {
        self.add(item)?;
        Ok(self)
    }

    /// Builder: add a weighted stage
    pub fn with_weighted_stage(mut self, item: T, weight: f32) -> Result<Self> {
        self.add_weighted(item, weight)?;
        Ok(self)
    }

    /// Append a stage with weight 1
    pub fn add(&mut self, item: T) -> Result<&mut Self> {
        self.add_weighted(item, 1.0)
    }

    /// Append a stage with the given weight.
    ///
    /// On error the set is left unchanged.
    pub fn add_weighted(&mut self, item: T, weight: f32) -> Result<&mut Self> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AnimationError::InvalidWeight(weight));
        }

        let segments = self.segments_with(Some(weight))?;
        self.stages.push(Stage {
            item,
            weight,
            duration_ms: None,
            interpolator: None,
        });
        self.assign_segments(segments);
        self.distribute_duration();
        Ok(self)
    }

    /// Set the total duration. `None` leaves every stage unspecified.
    pub fn set_duration(&mut self, duration_ms: Option<u32>) -> &mut Self {
        self.duration_ms = duration_ms;
        self.distribute_duration();
        self
    }

    pub fn duration(&self) -> Option<u32> {
        self.duration_ms
    }

    /// Set the total curve. `None` clears every stage's curve.
    ///
    /// On error the set keeps its previous curve and assignments.
    pub fn set_interpolator(
        &mut self,
        interpolator: Option<SharedInterpolator>,
    ) -> Result<&mut Self> {
        let previous = std::mem::replace(&mut self.interpolator, interpolator);
        match self.segments_with(None) {
            Ok(segments) => {
                self.assign_segments(segments);
                Ok(self)
            }
            Err(err) => {
                self.interpolator = previous;
                Err(err)
            }
        }
    }

    pub fn interpolator(&self) -> Option<&SharedInterpolator> {
        self.interpolator.as_ref()
    }

    pub fn stages(&self) -> &[Stage<T>] {
        &self.stages
    }

    pub fn get(&self, index: usize) -> Option<&Stage<T>> {
        self.stages.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Stage<T>> {
        self.stages.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage<T>> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn total_weight(&self) -> f32 {
        self.stages.iter().map(|s| s.weight).sum()
    }

    fn distribute_duration(&mut self) {
        let Some(total) = self.duration_ms else {
            for stage in &mut self.stages {
                stage.duration_ms = None;
            }
            return;
        };

        let total_weight = self.total_weight();
        for stage in &mut self.stages {
            let share = total as f64 * stage.weight as f64 / total_weight as f64;
            stage.duration_ms = Some(share as u32);
        }
        tracing::debug!(total, stages = self.stages.len(), "distributed sequence duration");
    }

    /// Compute the segment for every stage, including a pending stage of
    /// weight `extra` about to be appended. Returns `None` entries when the
    /// set has no curve.
    fn segments_with(&self, extra: Option<f32>) -> Result<Vec<Option<SegmentInterpolator>>> {
        let weights: Vec<f32> = self.stages.iter().map(|s| s.weight).chain(extra).collect();
        let Some(curve) = &self.interpolator else {
            return Ok(vec![None; weights.len()]);
        };

        let total_weight: f64 = weights.iter().map(|&w| w as f64).sum();
        let last = weights.len().saturating_sub(1);
        let mut cumulative = 0.0_f64;
        let mut start = 0.0_f32;
        let mut segments = Vec::with_capacity(weights.len());
        for (i, &weight) in weights.iter().enumerate() {
            cumulative += weight as f64 / total_weight;
            let end = if i == last {
                1.0
            } else {
                (cumulative as f32).min(1.0)
            };
            // A share below f32 resolution collapses to an empty slice
            if end <= start {
                tracing::warn!(start, end, weight, "stage share too small to slice the curve");
                return Err(AnimationError::DegenerateSegment { start, end });
            }
            segments.push(Some(SegmentInterpolator::new(curve.clone(), start, end)?));
            start = end;
        }
        tracing::debug!(stages = segments.len(), "distributed sequence curve");
        Ok(segments)
    }

    fn assign_segments(&mut self, segments: Vec<Option<SegmentInterpolator>>) {
        for (stage, segment) in self.stages.iter_mut().zip(segments) {
            stage.interpolator = segment;
        }
    }
}

impl<T> Default for SequentialSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SequentialSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SequentialSet")
            .field("stages", &self.stages)
            .field("duration_ms", &self.duration_ms)
            .field("has_interpolator", &self.interpolator.is_some())
            .finish()
    }
}

impl<T> Index<usize> for SequentialSet<T> {
    type Output = Stage<T>;

    fn index(&self, index: usize) -> &Stage<T> {
        &self.stages[index]
    }
}
