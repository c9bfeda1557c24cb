//! The two scroll-driven sections built on the shared morph primitives.

use crate::camera::Camera;
use crate::constants::*;
use crate::error::MorphError;
use crate::guides::{self, LineVertex};
use crate::morph::{jitter_xy, ParticleBuffer, Segment, Timeline};
use crate::progress::{ScrubFilter, Stage};
use crate::shape::{FunnelBand, PointSet, ShapeKind};
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// How particles are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointStyle {
    pub size: f32,
    pub opacity: f32,
}

/// A batch of lines drawn with one colour, opacity and model transform.
#[derive(Clone, Debug)]
pub struct GuideLayer {
    pub vertices: Vec<LineVertex>,
    pub color: [f32; 3],
    pub opacity: f32,
    pub model: Mat4,
}

/// Accumulated rotation, advancing at a fixed rate per 60 fps frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spin {
    pub angles: Vec3,
    pub rate_per_frame: Vec3,
}

impl Spin {
    pub fn new(rate_per_frame: Vec3) -> Self {
        Self {
            angles: Vec3::ZERO,
            rate_per_frame,
        }
    }

    pub fn advance(&mut self, dt_sec: f32) {
        let frames = dt_sec.clamp(0.0, MAX_FRAME_DT_SEC) * REFERENCE_FPS;
        self.angles += self.rate_per_frame * frames;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.angles.x)
            * Mat4::from_rotation_y(self.angles.y)
            * Mat4::from_rotation_z(self.angles.z)
    }
}

/// Everything the frame loop needs from a section, independent of the GPU.
pub trait ParticleScene {
    /// Advance one frame toward the scroll-derived `target_progress`.
    fn step(&mut self, target_progress: f32, dt_sec: f32);
    fn particles(&self) -> &ParticleBuffer;
    fn particle_model(&self) -> Mat4;
    fn point_style(&self) -> PointStyle;
    fn guides(&self) -> &[GuideLayer];
    fn camera(&self) -> &Camera;
    fn camera_mut(&mut self) -> &mut Camera;
    /// Upper end of this section's progress range.
    fn progress_scale(&self) -> f32;
    /// Progress used for the last computed frame.
    fn progress(&self) -> f32;
}

// ---------------- Chaos sphere ----------------

#[derive(Clone, Debug)]
pub struct SphereParams {
    pub count: usize,
    pub radius: f32,
    pub cloud_half_extent: Vec3,
    pub spin_per_frame: Vec3,
    pub scrub_tau_sec: f32,
    pub camera_z: f32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            radius: SPHERE_RADIUS,
            cloud_half_extent: Vec3::from_array(SPHERE_CLOUD_HALF_EXTENT),
            spin_per_frame: Vec3::new(SPHERE_SPIN_X, SPHERE_SPIN_Y, 0.0),
            scrub_tau_sec: SPHERE_SCRUB_TAU_SEC,
            camera_z: SPHERE_CAMERA_Z,
        }
    }
}

/// Scattered cloud condensing into a sphere over progress `[0, 1]`.
pub struct ChaosSphere {
    timeline: Timeline,
    buffer: ParticleBuffer,
    spin: Spin,
    scrub: ScrubFilter,
    camera: Camera,
    progress: f32,
}

impl ChaosSphere {
    pub fn new<R: Rng + ?Sized>(params: &SphereParams, rng: &mut R) -> Result<Self, MorphError> {
        let chaos = PointSet::generate(
            ShapeKind::ScatterCloud {
                center: Vec3::ZERO,
                half_extent: params.cloud_half_extent,
            },
            params.count,
            rng,
        );
        let sphere = PointSet::generate(
            ShapeKind::SphereSurface {
                radius: params.radius,
            },
            params.count,
            rng,
        );
        let timeline = Timeline::new(vec![chaos, sphere])?;
        let buffer = ParticleBuffer::for_timeline(&timeline, SPHERE_COLOR);
        log::debug!("[sphere] built {} particles", timeline.particle_count());
        Ok(Self {
            timeline,
            buffer,
            spin: Spin::new(params.spin_per_frame),
            scrub: ScrubFilter::new(params.scrub_tau_sec),
            camera: Camera::looking_at_origin(params.camera_z),
            progress: 0.0,
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn spin(&self) -> &Spin {
        &self.spin
    }
}

impl ParticleScene for ChaosSphere {
    fn step(&mut self, target_progress: f32, dt_sec: f32) {
        self.progress = self.scrub.step(target_progress, dt_sec);
        self.timeline.evaluate(self.progress, &mut self.buffer);
        self.spin.advance(dt_sec);
    }

    fn particles(&self) -> &ParticleBuffer {
        &self.buffer
    }

    fn particle_model(&self) -> Mat4 {
        self.spin.matrix()
    }

    fn point_style(&self) -> PointStyle {
        PointStyle {
            size: SPHERE_POINT_SIZE,
            opacity: POINT_OPACITY,
        }
    }

    fn guides(&self) -> &[GuideLayer] {
        &[]
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn progress_scale(&self) -> f32 {
        self.timeline.segments() as f32
    }

    fn progress(&self) -> f32 {
        self.progress
    }
}

// ---------------- Sales funnel ----------------

#[derive(Clone, Debug)]
pub struct FunnelParams {
    pub count: usize,
    pub chaos_center: Vec3,
    pub chaos_half_extent: Vec3,
    pub upper: FunnelBand,
    pub lower: FunnelBand,
    pub burst_center: Vec3,
    pub burst_half_extent: Vec3,
    pub palette: [[f32; 3]; 4],
    pub jitter: f32,
    pub scrub_tau_sec: f32,
    pub camera_z: f32,
}

impl Default for FunnelParams {
    fn default() -> Self {
        let (cy0, cy1) = FUNNEL_CHAOS_Y;
        let (by0, by1) = FUNNEL_BURST_Y;
        Self {
            count: PARTICLE_COUNT,
            chaos_center: Vec3::new(0.0, (cy0 + cy1) * 0.5, 0.0),
            chaos_half_extent: Vec3::new(
                FUNNEL_CHAOS_X_HALF,
                (cy1 - cy0) * 0.5,
                FUNNEL_CHAOS_Z_HALF,
            ),
            upper: FunnelBand {
                radius: FUNNEL_UPPER_RADIUS,
                y: FUNNEL_UPPER_Y,
            },
            lower: FunnelBand {
                radius: FUNNEL_LOWER_RADIUS,
                y: FUNNEL_LOWER_Y,
            },
            burst_center: Vec3::new(0.0, (by0 + by1) * 0.5, 0.0),
            burst_half_extent: Vec3::new(
                FUNNEL_BURST_X_HALF,
                (by1 - by0) * 0.5,
                FUNNEL_BURST_Z_HALF,
            ),
            palette: STAGE_COLORS,
            jitter: FUNNEL_JITTER,
            scrub_tau_sec: FUNNEL_SCRUB_TAU_SEC,
            camera_z: FUNNEL_CAMERA_Z,
        }
    }
}

/// Chaos cloud, upper band, lower band and exit burst, in scroll order.
///
/// Each particle keeps one angle through both bands so it spirals down
/// the funnel instead of jumping across it.
pub fn funnel_formation<R: Rng + ?Sized>(params: &FunnelParams, rng: &mut R) -> [PointSet; 4] {
    let chaos = PointSet::generate(
        ShapeKind::ScatterCloud {
            center: params.chaos_center,
            half_extent: params.chaos_half_extent,
        },
        params.count,
        rng,
    );
    let mut upper = Vec::with_capacity(params.count);
    let mut lower = Vec::with_capacity(params.count);
    for _ in 0..params.count {
        let theta = rng.gen::<f32>() * TAU;
        upper.push(params.upper.sample_at_angle(theta, rng));
        lower.push(params.lower.sample_at_angle(theta, rng));
    }
    let burst = PointSet::generate(
        ShapeKind::Burst {
            center: params.burst_center,
            half_extent: params.burst_half_extent,
        },
        params.count,
        rng,
    );
    [
        chaos,
        PointSet::from_points(upper),
        PointSet::from_points(lower),
        burst,
    ]
}

/// Opacities of the upper and lower checkpoint rings for a segment.
///
/// The upper ring glows while particles gather into it, then hands off to
/// the lower ring, which fades as the burst leaves the funnel.
pub fn ring_opacities(seg: Segment) -> [f32; 2] {
    let t = seg.t.clamp(0.0, 1.0);
    let peak_upper = RING_REST_OPACITY + RING_UPPER_GLOW;
    let peak_lower = RING_REST_OPACITY + RING_LOWER_GLOW;
    match seg.index {
        0 => [RING_REST_OPACITY + t * RING_UPPER_GLOW, RING_REST_OPACITY],
        1 => [
            peak_upper - t * RING_UPPER_GLOW,
            RING_REST_OPACITY + t * RING_LOWER_GLOW,
        ],
        _ => [RING_REST_OPACITY, peak_lower - t * peak_lower],
    }
}

const GUIDE_WIREFRAME: usize = 0;
const GUIDE_RING_UPPER: usize = 1;
const GUIDE_RING_LOWER: usize = 2;

/// Particles funnelled through four stages over progress `[0, 3]`.
pub struct SalesFunnel {
    timeline: Timeline,
    buffer: ParticleBuffer,
    particle_spin: Spin,
    guide_spin: Spin,
    guides: Vec<GuideLayer>,
    scrub: ScrubFilter,
    camera: Camera,
    jitter: f32,
    rng: StdRng,
    progress: f32,
    segment: Segment,
}

impl SalesFunnel {
    /// Shapes are drawn from `rng`; per-frame jitter uses its own stream seeded from it.
    pub fn new<R: Rng + ?Sized>(params: &FunnelParams, rng: &mut R) -> Result<Self, MorphError> {
        let shapes = funnel_formation(params, rng);
        let timeline = Timeline::new(shapes.into())?.with_palette(params.palette.to_vec())?;
        let buffer = ParticleBuffer::for_timeline(&timeline, params.palette[0]);
        let guides = vec![
            GuideLayer {
                vertices: guides::funnel_wireframe(
                    GUIDE_TOP_RADIUS,
                    GUIDE_BOTTOM_RADIUS,
                    GUIDE_HEIGHT,
                    GUIDE_RADIAL_SEGMENTS,
                    GUIDE_HEIGHT_SEGMENTS,
                ),
                color: GUIDE_COLOR,
                opacity: GUIDE_OPACITY,
                model: Mat4::IDENTITY,
            },
            GuideLayer {
                vertices: guides::ring(RING_UPPER_RADIUS, RING_UPPER_Y, RING_SEGMENTS),
                color: params.palette[1],
                opacity: RING_REST_OPACITY,
                model: Mat4::IDENTITY,
            },
            GuideLayer {
                vertices: guides::ring(RING_LOWER_RADIUS, RING_LOWER_Y, RING_SEGMENTS),
                color: params.palette[2],
                opacity: RING_REST_OPACITY,
                model: Mat4::IDENTITY,
            },
        ];
        log::debug!(
            "[funnel] built {} particles over {} segments",
            timeline.particle_count(),
            timeline.segments()
        );
        Ok(Self {
            timeline,
            buffer,
            particle_spin: Spin::new(Vec3::new(0.0, FUNNEL_PARTICLE_SPIN_Y, 0.0)),
            guide_spin: Spin::new(Vec3::new(0.0, FUNNEL_GUIDE_SPIN_Y, 0.0)),
            guides,
            scrub: ScrubFilter::new(params.scrub_tau_sec),
            camera: Camera::looking_at_origin(params.camera_z),
            jitter: params.jitter,
            rng: StdRng::seed_from_u64(rng.gen()),
            progress: 0.0,
            segment: Segment { index: 0, t: 0.0 },
        })
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Stage for the last computed frame.
    pub fn stage(&self) -> Stage {
        Stage::from_progress(self.progress)
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn ring_opacities(&self) -> [f32; 2] {
        [
            self.guides[GUIDE_RING_UPPER].opacity,
            self.guides[GUIDE_RING_LOWER].opacity,
        ]
    }
}

impl ParticleScene for SalesFunnel {
    fn step(&mut self, target_progress: f32, dt_sec: f32) {
        self.progress = self.scrub.step(target_progress, dt_sec);
        self.segment = self.timeline.evaluate(self.progress, &mut self.buffer);
        jitter_xy(self.buffer.positions_mut(), self.jitter, &mut self.rng);

        let [upper, lower] = ring_opacities(self.segment);
        self.guides[GUIDE_RING_UPPER].opacity = upper;
        self.guides[GUIDE_RING_LOWER].opacity = lower;

        self.particle_spin.advance(dt_sec);
        self.guide_spin.advance(dt_sec);
        self.guides[GUIDE_WIREFRAME].model = self.guide_spin.matrix();
    }

    fn particles(&self) -> &ParticleBuffer {
        &self.buffer
    }

    fn particle_model(&self) -> Mat4 {
        self.particle_spin.matrix()
    }

    fn point_style(&self) -> PointStyle {
        PointStyle {
            size: FUNNEL_POINT_SIZE,
            opacity: POINT_OPACITY,
        }
    }

    fn guides(&self) -> &[GuideLayer] {
        &self.guides
    }

    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    fn progress_scale(&self) -> f32 {
        self.timeline.segments() as f32
    }

    fn progress(&self) -> f32 {
        self.progress
    }
}
