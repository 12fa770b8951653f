//! Motion Animation
//!
//! Easing curves, curve segments, and weighted sequential stages.
//!
//! # Features
//!
//! - **Easing**: Material and polynomial curves plus CSS-style cubic beziers
//! - **Segments**: Cut a slice out of a curve and rescale it to `[0, 1]`
//! - **Sequences**: Split one duration and one curve across weighted stages
//! - **Timelines**: Play tweens and sequences frame by frame

pub mod config;
pub mod easing;
pub mod error;
pub mod presets;
pub mod segment;
pub mod sequence;
pub mod timeline;

pub use config::{NamedTween, SequenceConfig, StageConfig};
pub use easing::{Easing, Interpolator, SharedInterpolator};
pub use error::{AnimationError, Result};
pub use segment::SegmentInterpolator;
pub use sequence::{SequentialSet, Stage};
pub use timeline::{Timeline, TimelineEntryId, Tween};
