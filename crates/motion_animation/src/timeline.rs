//! Timeline playback for tweens and sequential sets
//!
//! The timeline is the frame-driven consumer of sequences: it is ticked once
//! per frame and reports the eased value of each entry at the current time.

use std::borrow::Borrow;
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

use crate::easing::SharedInterpolator;
use crate::error::{AnimationError, Result};
use crate::sequence::SequentialSet;

new_key_type! {
    pub struct TimelineEntryId;
}

/// A value range animated by one timeline entry
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32) -> Self {
        Self { from, to }
    }

    /// Value at `progress` (0.0 to 1.0, may overshoot for springy curves)
    pub fn lerp(&self, progress: f32) -> f32 {
        self.from + (self.to - self.from) * progress
    }
}

/// Entry ids of one laid-out sequence, in stage order
pub type SequenceEntries = SmallVec<[TimelineEntryId; 4]>;

/// An entry in a timeline
struct TimelineEntry {
    /// Offset in milliseconds from timeline start
    offset_ms: i32,
    duration_ms: u32,
    tween: Tween,
    /// Linear when `None`
    easing: Option<SharedInterpolator>,
}

impl TimelineEntry {
    fn local_fraction(&self, time_ms: f32) -> f32 {
        let local = time_ms - self.offset_ms as f32;
        if local <= 0.0 {
            0.0
        } else if local >= self.duration_ms as f32 {
            1.0
        } else {
            local / self.duration_ms as f32
        }
    }

    fn eased(&self, fraction: f32) -> f32 {
        match &self.easing {
            Some(easing) => easing.interpolate(fraction),
            None => fraction,
        }
    }
}

/// A timeline that orchestrates multiple animations
pub struct Timeline {
    entries: SlotMap<TimelineEntryId, TimelineEntry>,
    current_time: f32,
    duration_ms: u32,
    playing: bool,
    loop_count: i32, // -1 for infinite
    current_loop: i32,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            current_time: 0.0,
            duration_ms: 0,
            playing: false,
            loop_count: 1,
            current_loop: 0,
        }
    }

    /// Add a tween to the timeline at a given offset
    pub fn add(
        &mut self,
        offset_ms: i32,
        duration_ms: u32,
        tween: Tween,
        easing: Option<SharedInterpolator>,
    ) -> TimelineEntryId {
        let id = self.entries.insert(TimelineEntry {
            offset_ms,
            duration_ms,
            tween,
            easing,
        });

        let end_time = (offset_ms.max(0) as u32).saturating_add(duration_ms);
        self.duration_ms = self.duration_ms.max(end_time);

        id
    }

    /// Lay the stages of `sequence` back to back starting at `offset_ms`.
    ///
    /// Each stage plays for its distributed duration with its slice of the
    /// sequence curve. The sequence must have a total duration.
    pub fn add_sequence<T>(
        &mut self,
        offset_ms: i32,
        sequence: &SequentialSet<T>,
    ) -> Result<SequenceEntries>
    where
        T: Borrow<Tween>,
    {
        if sequence.duration().is_none() {
            return Err(AnimationError::UnspecifiedDuration);
        }

        let mut ids = SequenceEntries::new();
        let mut cursor = offset_ms;
        for stage in sequence.iter() {
            let duration_ms = stage.duration_ms().ok_or(AnimationError::UnspecifiedDuration)?;
            let easing = stage
                .interpolator()
                .map(|segment| Arc::new(segment.clone()) as SharedInterpolator);
            let tween: &Tween = stage.item().borrow();
            ids.push(self.add(cursor, duration_ms, *tween, easing));
            cursor = cursor.saturating_add(i32::try_from(duration_ms).unwrap_or(i32::MAX));
        }

        tracing::debug!(
            offset_ms,
            stages = ids.len(),
            total_ms = self.duration_ms,
            "laid out sequence on timeline"
        );
        Ok(ids)
    }

    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.current_loop = 0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn set_loop(&mut self, count: i32) {
        self.loop_count = count;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Total length in milliseconds
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.current_time
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance the timeline
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        self.current_time += dt_ms;

        if self.current_time >= self.duration_ms as f32 {
            if self.loop_count == -1 || self.current_loop < self.loop_count - 1 {
                self.current_time = 0.0;
                self.current_loop += 1;
                tracing::trace!(loop_index = self.current_loop, "timeline looped");
            } else {
                self.current_time = self.duration_ms as f32;
                self.playing = false;
            }
        }
    }

    /// Jump to an absolute time without changing the play state
    pub fn seek(&mut self, time_ms: f32) {
        self.current_time = time_ms.clamp(0.0, self.duration_ms as f32);
    }

    /// Eased progress (0.0 to 1.0) of an entry at the current time
    pub fn progress(&self, id: TimelineEntryId) -> Option<f32> {
        let entry = self.entries.get(id)?;
        let fraction = entry.local_fraction(self.current_time);
        Some(entry.eased(fraction))
    }

    /// Get the current value for an entry
    pub fn value(&self, id: TimelineEntryId) -> Option<f32> {
        let entry = self.entries.get(id)?;
        let fraction = entry.local_fraction(self.current_time);

        if fraction <= 0.0 {
            return Some(entry.tween.from);
        }
        if fraction >= 1.0 {
            return Some(entry.tween.to);
        }
        Some(entry.tween.lerp(entry.eased(fraction)))
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;

    #[test]
    fn linear_entry() {
        let mut timeline = Timeline::new();
        let id = timeline.add(0, 100, Tween::new(0.0, 10.0), None);
        timeline.start();

        assert_eq!(timeline.value(id), Some(0.0));
        timeline.tick(50.0);
        assert_eq!(timeline.value(id), Some(5.0));
        timeline.tick(60.0);
        assert_eq!(timeline.value(id), Some(10.0));
        assert!(!timeline.is_playing());
    }

    #[test]
    fn offset_entry_holds_start_value() {
        let mut timeline = Timeline::new();
        let id = timeline.add(100, 100, Tween::new(1.0, 0.0), None);
        assert_eq!(timeline.duration_ms(), 200);

        timeline.start();
        timeline.tick(80.0);
        assert_eq!(timeline.value(id), Some(1.0));
        timeline.tick(70.0);
        assert_eq!(timeline.value(id), Some(0.5));
    }

    #[test]
    fn eased_entry() {
        let mut timeline = Timeline::new();
        let id = timeline.add(0, 100, Tween::new(0.0, 1.0), Some(Easing::EaseInQuad.shared()));
        timeline.start();
        timeline.tick(50.0);
        let value = timeline.value(id).unwrap();
        assert!((value - 0.25).abs() < 1e-6);
    }

    #[test]
    fn loops() {
        let mut timeline = Timeline::new();
        timeline.add(0, 100, Tween::new(0.0, 1.0), None);
        timeline.set_loop(2);
        timeline.start();

        timeline.tick(100.0);
        assert!(timeline.is_playing());
        assert_eq!(timeline.elapsed_ms(), 0.0);
        timeline.tick(100.0);
        assert!(!timeline.is_playing());
    }

    #[test]
    fn sequence_requires_duration() {
        let set = SequentialSet::new().with_stage(Tween::new(0.0, 1.0)).unwrap();
        let mut timeline = Timeline::new();
        let err = timeline.add_sequence(0, &set).unwrap_err();
        assert_eq!(err, AnimationError::UnspecifiedDuration);
        assert!(timeline.is_empty());
    }

    #[test]
    fn sequence_stages_run_back_to_back() {
        let set = SequentialSet::new()
            .with_duration(300)
            .with_weighted_stage(Tween::new(0.0, 1.0), 1.0)
            .and_then(|s| s.with_weighted_stage(Tween::new(1.0, 0.0), 2.0))
            .unwrap();

        let mut timeline = Timeline::new();
        let ids = timeline.add_sequence(0, &set).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(timeline.duration_ms(), 300);

        timeline.seek(100.0);
        assert_eq!(timeline.value(ids[0]), Some(1.0));
        assert_eq!(timeline.value(ids[1]), Some(1.0));
        timeline.seek(200.0);
        assert_eq!(timeline.value(ids[1]), Some(0.5));
    }

    #[test]
    fn unknown_entry() {
        let mut other = Timeline::new();
        let id = other.add(0, 10, Tween::default(), None);
        let timeline = Timeline::new();
        assert_eq!(timeline.value(id), None);
        assert_eq!(timeline.progress(id), None);
    }

    #[test]
    fn progress_of_live_entry() {
        let mut timeline = Timeline::new();
        let id = timeline.add(0, 100, Tween::new(0.0, 1.0), Some(Easing::EaseInQuad.shared()));
        timeline.start();
        timeline.tick(50.0);
        let progress = timeline.progress(id).unwrap();
        assert!((progress - 0.25).abs() < 1e-6);
    }

    #[test]
    fn stop_freezes_time() {
        let mut timeline = Timeline::new();
        let id = timeline.add(0, 100, Tween::new(0.0, 10.0), None);
        timeline.start();
        timeline.tick(25.0);
        timeline.stop();
        timeline.tick(25.0);

        assert!(!timeline.is_playing());
        assert_eq!(timeline.elapsed_ms(), 25.0);
        assert_eq!(timeline.value(id), Some(2.5));
    }

    #[test]
    fn infinite_loop_keeps_playing() {
        let mut timeline = Timeline::new();
        timeline.add(0, 100, Tween::new(0.0, 1.0), None);
        timeline.set_loop(-1);
        timeline.start();

        for _ in 0..50 {
            timeline.tick(100.0);
        }
        assert!(timeline.is_playing());
        assert_eq!(timeline.elapsed_ms(), 0.0);
    }

    #[test]
    fn long_stages_do_not_wrap_offsets() {
        let set = SequentialSet::new()
            .with_duration(u32::MAX)
            .with_weighted_stage(Tween::new(0.0, 1.0), 3.0)
            .and_then(|s| s.with_weighted_stage(Tween::new(1.0, 0.0), 1.0))
            .unwrap();
        assert!(set[0].duration_ms().unwrap() > i32::MAX as u32);

        let mut timeline = Timeline::new();
        let ids = timeline.add_sequence(0, &set).unwrap();

        // The second stage is placed after the first, not at a wrapped negative offset
        timeline.seek(0.0);
        assert_eq!(timeline.value(ids[1]), Some(1.0));
    }
}
