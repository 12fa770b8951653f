//! Material motion presets
//!
//! Standard durations and a couple of ready-made transitions built from
//! sequences and timelines.
//!
//! See <https://material.io/design/motion/speed.html#duration> for the
//! duration guidelines.

use crate::easing::Easing;
use crate::error::Result;
use crate::sequence::SequentialSet;
use crate::timeline::{Timeline, TimelineEntryId, Tween};

pub const MEDIUM_EXPAND_DURATION: u32 = 250;
pub const MEDIUM_COLLAPSE_DURATION: u32 = 200;

pub const LARGE_EXPAND_DURATION: u32 = 300;
pub const LARGE_COLLAPSE_DURATION: u32 = 250;

/// Fade the old content out, then the new content in.
///
/// Both fades share one standard (fast-out-slow-in) curve, split evenly, so
/// the pair moves like a single eased transition.
pub fn crossfade() -> Result<SequentialSet<Tween>> {
    SequentialSet::new()
        .with_duration(LARGE_EXPAND_DURATION)
        .with_interpolator(Easing::FastOutSlowIn.shared())?
        .with_stage(Tween::new(1.0, 0.0))?
        .with_stage(Tween::new(0.0, 1.0))
}

/// Entries of a fade-through transition
#[derive(Clone, Copy, Debug)]
pub struct FadeThrough {
    /// Bounds change from the old size (0.0) to the new size (1.0)
    pub bounds: TimelineEntryId,
    /// Opacity of the outgoing content
    pub fade_out: TimelineEntryId,
    /// Opacity of the incoming content
    pub fade_in: TimelineEntryId,
}

/// Fade-through: the container resizes over the whole duration while the
/// outgoing content fades out in the first half and the incoming content
/// fades in during the second.
pub fn fade_through(duration_ms: u32) -> (Timeline, FadeThrough) {
    let half = duration_ms / 2;
    let mut timeline = Timeline::new();

    let bounds = timeline.add(
        0,
        duration_ms,
        Tween::new(0.0, 1.0),
        Some(Easing::FastOutSlowIn.shared()),
    );
    let fade_out = timeline.add(
        0,
        half,
        Tween::new(1.0, 0.0),
        Some(Easing::FastOutLinearIn.shared()),
    );
    let fade_in = timeline.add(
        half as i32,
        half,
        Tween::new(0.0, 1.0),
        Some(Easing::LinearOutSlowIn.shared()),
    );

    (
        timeline,
        FadeThrough {
            bounds,
            fade_out,
            fade_in,
        },
    )
}
