//! Scroll position → progress mapping and the handle that carries it to the
//! frame loop.

use crate::constants::STAGE_BREAKPOINTS;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Create a connected writer/reader pair for progress values in `[0, scale]`.
///
/// The writer belongs to the scroll handler, the reader to the frame loop.
/// Last write wins; readers see the most recent value and nothing else.
pub fn progress_channel(scale: f32) -> (ProgressWriter, ProgressReader) {
    let scale = if scale.is_finite() { scale.max(0.0) } else { 0.0 };
    let cell = Arc::new(AtomicU32::new(0.0_f32.to_bits()));
    (
        ProgressWriter {
            cell: cell.clone(),
            scale,
        },
        ProgressReader { cell, scale },
    )
}

/// Single writer of a progress value. Intentionally not `Clone`.
#[derive(Debug)]
pub struct ProgressWriter {
    cell: Arc<AtomicU32>,
    scale: f32,
}

impl ProgressWriter {
    /// Store `value` clamped into `[0, scale]`. NaN is ignored.
    pub fn set(&self, value: f32) {
        if value.is_nan() {
            return;
        }
        let v = value.clamp(0.0, self.scale);
        self.cell.store(v.to_bits(), Ordering::Relaxed);
    }

    /// Store a normalized `[0, 1]` fraction, scaled to `[0, scale]`.
    pub fn set_normalized(&self, fraction: f32) {
        self.set(fraction.clamp(0.0, 1.0) * self.scale);
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

#[derive(Clone, Debug)]
pub struct ProgressReader {
    cell: Arc<AtomicU32>,
    scale: f32,
}

impl ProgressReader {
    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.cell.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }
}

/// Geometry of a pinned scroll region, in CSS pixels, as seen from the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRegion {
    /// Distance from the viewport top to the region top (negative once scrolled past).
    pub top: f64,
    pub height: f64,
    pub viewport_height: f64,
}

impl ScrollRegion {
    /// Fraction of the pinned scroll travelled, in `[0, 1]`.
    ///
    /// Starts when the region top reaches the viewport top and ends when the
    /// region bottom reaches the viewport bottom. A region no taller than the
    /// viewport has no travel and flips from 0 to 1 as its top passes.
    pub fn progress(&self) -> f32 {
        let span = self.height - self.viewport_height;
        let scrolled = -self.top;
        if span.is_nan() || span <= 0.0 {
            return if scrolled > 0.0 { 1.0 } else { 0.0 };
        }
        (scrolled / span).clamp(0.0, 1.0) as f32
    }
}

/// Discrete phase of the funnel narrative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Chaos = 0,
    Strategy = 1,
    Design = 2,
    Results = 3,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Chaos, Stage::Strategy, Stage::Design, Stage::Results];

    /// Classify a `[0, 3]` progress value. Pure, so scrolling back reverses it.
    pub fn from_progress(progress: f32) -> Self {
        let [a, b, c] = STAGE_BREAKPOINTS;
        if progress < a {
            Stage::Chaos
        } else if progress < b {
            Stage::Strategy
        } else if progress < c {
            Stage::Design
        } else {
            Stage::Results
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Overlay visibility by stage index: only this stage's overlay is shown.
    pub fn overlay_visibility(self) -> [bool; 4] {
        Stage::ALL.map(|s| s == self)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Chaos => "CHAOS",
            Stage::Strategy => "STRATEGY",
            Stage::Design => "DESIGN",
            Stage::Results => "RESULTS",
        }
    }
}

/// Eases a displayed progress toward its scroll target.
#[derive(Clone, Debug)]
pub struct ScrubFilter {
    tau_sec: f32,
    value: Option<f32>,
}

impl ScrubFilter {
    /// `tau_sec` is the exponential time constant; `0` snaps to the target.
    pub fn new(tau_sec: f32) -> Self {
        Self {
            tau_sec: tau_sec.max(0.0),
            value: None,
        }
    }

    pub fn step(&mut self, target: f32, dt_sec: f32) -> f32 {
        let next = match self.value {
            Some(cur) if self.tau_sec > 0.0 => {
                let alpha = 1.0 - (-dt_sec.max(0.0) / self.tau_sec).exp();
                cur + (target - cur) * alpha
            }
            _ => target,
        };
        self.value = Some(next);
        next
    }

    #[inline]
    pub fn value(&self) -> Option<f32> {
        self.value
    }
}
