// Shared tuning constants for both morph sections.

// Particle systems
pub const PARTICLE_COUNT: usize = 2000;

// Chaos sphere: scattered cloud half extents and target radius
pub const SPHERE_CLOUD_HALF_EXTENT: [f32; 3] = [40.0, 40.0, 25.0];
pub const SPHERE_RADIUS: f32 = 10.0;

// Chaos sphere rotation (radians per 60 fps frame)
pub const SPHERE_SPIN_X: f32 = 0.0005;
pub const SPHERE_SPIN_Y: f32 = 0.001;

// Sales funnel formations
pub const FUNNEL_CHAOS_X_HALF: f32 = 20.0;
pub const FUNNEL_CHAOS_Y: (f32, f32) = (10.0, 30.0); // high above the funnel mouth
pub const FUNNEL_CHAOS_Z_HALF: f32 = 10.0;

pub const FUNNEL_UPPER_RADIUS: (f32, f32) = (0.0, 6.0);
pub const FUNNEL_UPPER_Y: (f32, f32) = (0.0, 6.0);
pub const FUNNEL_LOWER_RADIUS: (f32, f32) = (1.0, 4.0); // tighter
pub const FUNNEL_LOWER_Y: (f32, f32) = (-6.0, -2.0);

pub const FUNNEL_BURST_X_HALF: f32 = 15.0;
pub const FUNNEL_BURST_Y: (f32, f32) = (-25.0, -15.0); // far below the exit
pub const FUNNEL_BURST_Z_HALF: f32 = 5.0;

// Per-frame jitter applied to x/y of funnel particles (+/-)
pub const FUNNEL_JITTER: f32 = 0.025;

// Funnel rotation (radians per 60 fps frame)
pub const FUNNEL_PARTICLE_SPIN_Y: f32 = 0.001;
pub const FUNNEL_GUIDE_SPIN_Y: f32 = 0.002;

// Stage palette: grey -> blue -> purple -> gold
pub const STAGE_COLORS: [[f32; 3]; 4] = [
    [0.533_333, 0.533_333, 0.533_333], // #888888
    [0.231_373, 0.509_804, 0.964_706], // #3b82f6
    [0.545_098, 0.360_784, 0.964_706], // #8b5cf6
    [0.980_392, 0.800_000, 0.082_353], // #facc15
];
pub const SPHERE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Stage thresholds on the [0, 3] funnel progress scale
pub const STAGE_BREAKPOINTS: [f32; 3] = [0.5, 1.5, 2.5];
pub const FUNNEL_SEGMENTS: usize = 3;

// Funnel guide geometry
pub const GUIDE_TOP_RADIUS: f32 = 8.0;
pub const GUIDE_BOTTOM_RADIUS: f32 = 2.0;
pub const GUIDE_HEIGHT: f32 = 12.0;
pub const GUIDE_RADIAL_SEGMENTS: usize = 16;
pub const GUIDE_HEIGHT_SEGMENTS: usize = 8;
pub const GUIDE_COLOR: [f32; 3] = [0.266_667, 0.266_667, 0.266_667]; // #444444
pub const GUIDE_OPACITY: f32 = 0.1;

pub const RING_UPPER_RADIUS: f32 = 6.0;
pub const RING_UPPER_Y: f32 = 3.0;
pub const RING_LOWER_RADIUS: f32 = 3.5;
pub const RING_LOWER_Y: f32 = -2.0;
pub const RING_SEGMENTS: usize = 100;

// Ring opacity breakpoints
pub const RING_REST_OPACITY: f32 = 0.2;
pub const RING_UPPER_GLOW: f32 = 0.5;
pub const RING_LOWER_GLOW: f32 = 0.6;

// Point sprites
pub const SPHERE_POINT_SIZE: f32 = 0.15;
pub const FUNNEL_POINT_SIZE: f32 = 0.12;
pub const POINT_OPACITY: f32 = 0.8;

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const SPHERE_CAMERA_Z: f32 = 30.0;
pub const FUNNEL_CAMERA_Z: f32 = 20.0;

// Scroll scrub time constants (seconds); zero tracks the scroll immediately
pub const SPHERE_SCRUB_TAU_SEC: f32 = 1.0;
pub const FUNNEL_SCRUB_TAU_SEC: f32 = 0.0;

// Frame timing
pub const REFERENCE_FPS: f32 = 60.0;
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches

// Canvas backing store
pub const MAX_PIXEL_RATIO: f64 = 2.0;
