//! Window-sized canvas geometry: CSS size for the camera, device pixels for the surface.

use crate::constants::MAX_PIXEL_RATIO;

/// Browser window size in CSS pixels plus its device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Device pixel ratio capped at `MAX_PIXEL_RATIO`; unusable values fall back to 1.
    pub fn pixel_ratio(&self) -> f64 {
        let dpr = self.device_pixel_ratio;
        if dpr.is_finite() && dpr > 0.0 {
            dpr.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    /// Drawing-buffer size in device pixels, never below 1×1.
    pub fn backing_size(&self) -> (u32, u32) {
        let ratio = self.pixel_ratio();
        let px = |css: f64| ((css.max(0.0) * ratio).floor() as u32).max(1);
        (px(self.width), px(self.height))
    }

    /// CSS width over height, `None` while either side is empty.
    pub fn aspect(&self) -> Option<f32> {
        if self.width.is_nan() || self.height.is_nan() || self.width <= 0.0 || self.height <= 0.0 {
            return None;
        }
        Some((self.width / self.height) as f32)
    }
}

/// Remembers the last value acted on and reports only changes.
#[derive(Clone, Debug)]
pub struct ChangeWatch<T> {
    last: Option<T>,
}

impl<T> Default for ChangeWatch<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Copy + PartialEq> ChangeWatch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Some(value)` the first time and whenever it differs from the previous one.
    pub fn observe(&mut self, value: T) -> Option<T> {
        if self.last == Some(value) {
            return None;
        }
        self.last = Some(value);
        Some(value)
    }

    #[inline]
    pub fn last(&self) -> Option<T> {
        self.last
    }
}
