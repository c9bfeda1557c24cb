//! Target point sets the particle systems morph between.
//!
//! Random shapes take the caller's RNG so they are reproducible under a seed
//! and only distributed alike otherwise. The sphere is closed-form.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// An immutable, ordered arrangement of particle positions.
#[derive(Clone, Debug, PartialEq)]
pub struct PointSet {
    points: Vec<Vec3>,
}

/// Which arrangement to generate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ShapeKind {
    /// Each coordinate drawn independently and uniformly from `center ± half_extent`.
    ScatterCloud { center: Vec3, half_extent: Vec3 },
    /// Evenly spaced points on a sphere surface (Fibonacci lattice).
    SphereSurface { radius: f32 },
    /// Uniform radius and angle inside an annulus, uniform height in a band.
    FunnelBand(FunnelBand),
    /// The funnel exit spray: a cloud with its own bounds.
    Burst { center: Vec3, half_extent: Vec3 },
}

/// Annular slab of the funnel: `radius ∈ [radius.0, radius.1)`, `y ∈ (y.0, y.1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FunnelBand {
    pub radius: (f32, f32),
    pub y: (f32, f32),
}

impl FunnelBand {
    /// Point of the band for a given angle; radius and height are drawn from `rng`.
    pub fn sample_at_angle<R: Rng + ?Sized>(&self, theta: f32, rng: &mut R) -> Vec3 {
        let r = self.radius.0 + rng.gen::<f32>() * (self.radius.1 - self.radius.0);
        let y = self.y.1 - rng.gen::<f32>() * (self.y.1 - self.y.0);
        Vec3::new(r * theta.cos(), y, r * theta.sin())
    }
}

impl PointSet {
    pub fn generate<R: Rng + ?Sized>(kind: ShapeKind, count: usize, rng: &mut R) -> Self {
        let points = match kind {
            ShapeKind::ScatterCloud {
                center,
                half_extent,
            }
            | ShapeKind::Burst {
                center,
                half_extent,
            } => (0..count)
                .map(|_| center + uniform_box(half_extent, rng))
                .collect(),
            ShapeKind::SphereSurface { radius } => {
                (0..count).map(|i| sphere_point(i, count, radius)).collect()
            }
            ShapeKind::FunnelBand(band) => (0..count)
                .map(|_| {
                    let theta = rng.gen::<f32>() * TAU;
                    band.sample_at_angle(theta, rng)
                })
                .collect(),
        };
        Self { points }
    }

    pub fn from_points(points: Vec<Vec3>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }
}

/// The `index`-th of `count` lattice points on a sphere of `radius`.
///
/// Polar angle `φ = acos(-1 + 2i/N)` spaces points evenly in `z`; azimuth
/// `θ = sqrt(Nπ)·φ` winds them into a spiral so neighbours never bunch up.
#[inline]
pub fn sphere_point(index: usize, count: usize, radius: f32) -> Vec3 {
    let n = count.max(1) as f32;
    let phi = (-1.0 + (2.0 * index as f32) / n).clamp(-1.0, 1.0).acos();
    let theta = (n * PI).sqrt() * phi;
    Vec3::new(
        radius * theta.cos() * phi.sin(),
        radius * theta.sin() * phi.sin(),
        radius * phi.cos(),
    )
}

#[inline]
fn uniform_box<R: Rng + ?Sized>(half_extent: Vec3, rng: &mut R) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * 2.0 * half_extent.x,
        (rng.gen::<f32>() - 0.5) * 2.0 * half_extent.y,
        (rng.gen::<f32>() - 0.5) * 2.0 * half_extent.z,
    )
}
