// DOM contract for the default sections.

pub const SPHERE_CONTAINER_ID: &str = "chaos-sphere";
pub const SPHERE_CANVAS_ID: &str = "chaos-sphere-canvas";

pub const FUNNEL_CONTAINER_ID: &str = "sales-funnel";
pub const FUNNEL_CANVAS_ID: &str = "sales-funnel-canvas";
// Overlay ids are this prefix followed by the stage index (0..=3)
pub const FUNNEL_OVERLAY_PREFIX: &str = "funnel-stage-";

pub const HIDDEN_CLASS: &str = "hidden";

// Transparent so the page background shows through the canvas
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};
