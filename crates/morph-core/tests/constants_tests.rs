// Host-side sanity checks for tuning constants.

use morph_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn stage_breakpoints_are_ordered_inside_the_range() {
    let [a, b, c] = STAGE_BREAKPOINTS;
    assert!(0.0 < a && a < b && b < c && c < FUNNEL_SEGMENTS as f32);
    assert_eq!(STAGE_COLORS.len(), FUNNEL_SEGMENTS + 1);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ring_opacities_peak_below_one() {
    assert!(RING_REST_OPACITY + RING_UPPER_GLOW <= 1.0);
    assert!(RING_REST_OPACITY + RING_LOWER_GLOW <= 1.0);
    assert!(GUIDE_OPACITY > 0.0 && GUIDE_OPACITY < RING_REST_OPACITY);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn funnel_narrows_toward_the_exit() {
    assert!(FUNNEL_LOWER_RADIUS.1 < FUNNEL_UPPER_RADIUS.1);
    assert!(FUNNEL_LOWER_Y.1 <= FUNNEL_UPPER_Y.0);
    assert!(FUNNEL_BURST_Y.1 < FUNNEL_LOWER_Y.0);
    assert!(FUNNEL_CHAOS_Y.0 > FUNNEL_UPPER_Y.1);
    assert!(GUIDE_BOTTOM_RADIUS < GUIDE_TOP_RADIUS);
}

#[test]
fn palette_channels_are_normalized() {
    for c in STAGE_COLORS.iter().chain([&GUIDE_COLOR, &SPHERE_COLOR]) {
        assert!(c.iter().all(|v| (0.0..=1.0).contains(v)));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_and_sprites_are_sane() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_FAR > CAMERA_NEAR);
    assert!(SPHERE_CAMERA_Z > SPHERE_RADIUS);
    assert!(FUNNEL_JITTER > 0.0 && FUNNEL_JITTER < FUNNEL_POINT_SIZE);
    assert!(MAX_PIXEL_RATIO >= 1.0);
    assert!(FUNNEL_SCRUB_TAU_SEC >= 0.0 && SPHERE_SCRUB_TAU_SEC >= 0.0);
}
