//! Easing curves
//!
//! An easing curve maps normalized time in `[0, 1]` to normalized progress.
//! Curves are expected (not required) to satisfy `f(0) = 0` and `f(1) = 1`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A time interpolation curve
pub trait Interpolator {
    /// Map an input fraction (0.0 to 1.0) to an output fraction
    fn interpolate(&self, input: f32) -> f32;
}

/// A curve shared between a sequence and the segments cut from it
pub type SharedInterpolator = Arc<dyn Interpolator + Send + Sync>;

impl<F> Interpolator for F
where
    F: Fn(f32) -> f32,
{
    fn interpolate(&self, input: f32) -> f32 {
        self(input)
    }
}

/// Built-in easing curves
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    /// Cubic ease-in
    EaseIn,
    /// Cubic ease-out
    EaseOut,
    /// Cubic ease-in-out
    EaseInOut,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutQuad,
    EaseInCubic,
    EaseOutCubic,
    EaseInOutCubic,
    /// Material standard curve, cubic-bezier(0.4, 0, 0.2, 1)
    FastOutSlowIn,
    /// Material accelerate curve, cubic-bezier(0.4, 0, 1, 1)
    FastOutLinearIn,
    /// Material decelerate curve, cubic-bezier(0, 0, 0.2, 1)
    LinearOutSlowIn,
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t,
            Easing::EaseIn | Easing::EaseInCubic => t * t * t,
            Easing::EaseOut | Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut | Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseInQuad => t * t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::FastOutSlowIn => CubicBezier::new(0.4, 0.0, 0.2, 1.0).solve(t),
            Easing::FastOutLinearIn => CubicBezier::new(0.4, 0.0, 1.0, 1.0).solve(t),
            Easing::LinearOutSlowIn => CubicBezier::new(0.0, 0.0, 0.2, 1.0).solve(t),
            Easing::CubicBezier(x1, y1, x2, y2) => CubicBezier::new(x1, y1, x2, y2).solve(t),
        }
    }

    /// Wrap this curve for sharing with a sequence or segment
    pub fn shared(self) -> SharedInterpolator {
        Arc::new(self)
    }
}

impl Interpolator for Easing {
    fn interpolate(&self, input: f32) -> f32 {
        self.apply(input)
    }
}

/// One axis of a cubic bezier through (0,0) and (1,1), in polynomial form
#[derive(Clone, Copy, Debug)]
struct BezierAxis {
    a: f64,
    b: f64,
    c: f64,
}

impl BezierAxis {
    fn new(p1: f32, p2: f32) -> Self {
        let (p1, p2) = (p1 as f64, p2 as f64);
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    #[inline]
    fn sample(&self, t: f64) -> f64 {
        ((self.a * t + self.b) * t + self.c) * t
    }

    #[inline]
    fn slope(&self, t: f64) -> f64 {
        (3.0 * self.a * t + 2.0 * self.b) * t + self.c
    }
}

/// CSS-style cubic bezier timing function.
///
/// Solves `x(p) = t` with Newton-Raphson and falls back to bisection when the
/// slope flattens out. Runs in f64 so that adjacent frames do not jitter.
#[derive(Clone, Copy, Debug)]
struct CubicBezier {
    x: BezierAxis,
    y: BezierAxis,
}

impl CubicBezier {
    const EPSILON: f64 = 1e-7;

    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: BezierAxis::new(x1, x2),
            y: BezierAxis::new(y1, y2),
        }
    }

    fn solve(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let p = self.parameter_for(t as f64);
        self.y.sample(p) as f32
    }

    fn parameter_for(&self, x: f64) -> f64 {
        let mut p = x;
        for _ in 0..8 {
            let err = self.x.sample(p) - x;
            if err.abs() < Self::EPSILON {
                return p;
            }
            let slope = self.x.slope(p);
            if slope.abs() < Self::EPSILON {
                break;
            }
            p -= err / slope;
        }

        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        p = x;
        for _ in 0..32 {
            let val = self.x.sample(p);
            if (val - x).abs() < Self::EPSILON {
                break;
            }
            if val < x {
                lo = p;
            } else {
                hi = p;
            }
            p = (lo + hi) * 0.5;
        }
        p
    }
}
