//! Line geometry for the funnel's wireframe guide and checkpoint rings.

use glam::Vec3;
use std::f32::consts::TAU;

/// Vertex of a line list, laid out for direct upload.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
}

impl From<Vec3> for LineVertex {
    fn from(v: Vec3) -> Self {
        Self { pos: v.to_array() }
    }
}

/// Open truncated cone centred on the origin, as a line list.
///
/// Draws `height_segments + 1` horizontal rings and `radial_segments`
/// vertical struts from the top rim to the bottom rim.
pub fn funnel_wireframe(
    top_radius: f32,
    bottom_radius: f32,
    height: f32,
    radial_segments: usize,
    height_segments: usize,
) -> Vec<LineVertex> {
    let radial = radial_segments.max(3);
    let rows = height_segments.max(1);
    let half = height * 0.5;
    let mut out = Vec::with_capacity((rows + 1) * radial * 2 + radial * 2);

    for row in 0..=rows {
        let f = row as f32 / rows as f32;
        let y = half - f * height;
        let r = top_radius + (bottom_radius - top_radius) * f;
        push_circle(&mut out, r, y, radial);
    }
    for k in 0..radial {
        let a = k as f32 / radial as f32 * TAU;
        let (s, c) = a.sin_cos();
        out.push(Vec3::new(top_radius * c, half, top_radius * s).into());
        out.push(Vec3::new(bottom_radius * c, -half, bottom_radius * s).into());
    }
    out
}

/// Horizontal circle of `radius` at height `y` as `segments` line pieces.
pub fn ring(radius: f32, y: f32, segments: usize) -> Vec<LineVertex> {
    let mut out = Vec::with_capacity(segments.max(3) * 2);
    push_circle(&mut out, radius, y, segments.max(3));
    out
}

fn push_circle(out: &mut Vec<LineVertex>, radius: f32, y: f32, segments: usize) {
    for k in 0..segments {
        let a0 = k as f32 / segments as f32 * TAU;
        let a1 = (k + 1) as f32 / segments as f32 * TAU;
        out.push(Vec3::new(radius * a0.cos(), y, radius * a0.sin()).into());
        out.push(Vec3::new(radius * a1.cos(), y, radius * a1.sin()).into());
    }
}
