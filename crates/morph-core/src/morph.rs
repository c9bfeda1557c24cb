//! Linear blending of particle positions (and colours) between shapes.

use crate::error::MorphError;
use crate::shape::PointSet;
use glam::Vec3;
use rand::Rng;

/// Active pair of shapes and the blend factor within it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub t: f32,
}

/// Map a progress value in `[0, segments]` onto a segment and local `t ∈ [0, 1]`.
///
/// Progress equal to `segments` stays in the last segment at `t = 1`.
pub fn segment_at(progress: f32, segments: usize) -> Segment {
    if segments == 0 {
        return Segment { index: 0, t: 0.0 };
    }
    let p = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, segments as f32)
    };
    let index = (p.floor() as usize).min(segments - 1);
    Segment {
        index,
        t: p - index as f32,
    }
}

#[inline]
pub fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Write `src + (dst - src)·t` for every point into `out`.
pub fn blend_into(out: &mut [Vec3], src: &PointSet, dst: &PointSet, t: f32) {
    for ((o, a), b) in out.iter_mut().zip(src.points()).zip(dst.points()) {
        *o = *a + (*b - *a) * t;
    }
}

/// Offset x and y of every point by uniform noise in `±amplitude`.
pub fn jitter_xy<R: Rng + ?Sized>(out: &mut [Vec3], amplitude: f32, rng: &mut R) {
    if amplitude <= 0.0 {
        return;
    }
    for p in out.iter_mut() {
        p.x += (rng.gen::<f32>() - 0.5) * 2.0 * amplitude;
        p.y += (rng.gen::<f32>() - 0.5) * 2.0 * amplitude;
    }
}

/// An ordered sequence of equally sized shapes, optionally with one colour per shape.
#[derive(Clone, Debug)]
pub struct Timeline {
    shapes: Vec<PointSet>,
    palette: Option<Vec<[f32; 3]>>,
}

impl Timeline {
    pub fn new(shapes: Vec<PointSet>) -> Result<Self, MorphError> {
        if shapes.len() < 2 {
            return Err(MorphError::TooFewShapes(shapes.len()));
        }
        let expected = shapes[0].len();
        for (index, s) in shapes.iter().enumerate().skip(1) {
            if s.len() != expected {
                return Err(MorphError::LengthMismatch {
                    index,
                    expected,
                    actual: s.len(),
                });
            }
        }
        Ok(Self {
            shapes,
            palette: None,
        })
    }

    pub fn with_palette(mut self, palette: Vec<[f32; 3]>) -> Result<Self, MorphError> {
        if palette.len() != self.shapes.len() {
            return Err(MorphError::PaletteMismatch {
                expected: self.shapes.len(),
                actual: palette.len(),
            });
        }
        self.palette = Some(palette);
        Ok(self)
    }

    /// Number of transitions, i.e. the upper end of the progress range.
    #[inline]
    pub fn segments(&self) -> usize {
        self.shapes.len() - 1
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.shapes[0].len()
    }

    pub fn shapes(&self) -> &[PointSet] {
        &self.shapes
    }

    /// Blend colour for a segment, if the timeline carries a palette.
    pub fn color_at(&self, seg: Segment) -> Option<[f32; 3]> {
        let palette = self.palette.as_ref()?;
        Some(lerp3(palette[seg.index], palette[seg.index + 1], seg.t))
    }

    /// Recompute every particle for `progress` (no jitter). Returns the segment used.
    pub fn evaluate(&self, progress: f32, buffer: &mut ParticleBuffer) -> Segment {
        let seg = segment_at(progress, self.segments());
        blend_into(
            &mut buffer.positions,
            &self.shapes[seg.index],
            &self.shapes[seg.index + 1],
            seg.t,
        );
        if let Some(c) = self.color_at(seg) {
            buffer.colors.fill(c);
        }
        seg
    }
}

/// The positions (and colours) currently on screen. Overwritten every frame.
#[derive(Clone, Debug)]
pub struct ParticleBuffer {
    positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
}

impl ParticleBuffer {
    /// Start at the first shape of `timeline` with a uniform `color`.
    pub fn for_timeline(timeline: &Timeline, color: [f32; 3]) -> Self {
        let first = &timeline.shapes()[0];
        Self {
            positions: first.points().to_vec(),
            colors: vec![color; first.len()],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    #[inline]
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    #[inline]
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }
}
