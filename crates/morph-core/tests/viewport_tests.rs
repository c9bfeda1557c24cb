// Host-side tests for window-sized canvas geometry and change tracking.

use morph_core::*;

fn window(width: f64, height: f64, device_pixel_ratio: f64) -> Viewport {
    Viewport {
        width,
        height,
        device_pixel_ratio,
    }
}

#[test]
fn backing_size_scales_by_capped_pixel_ratio() {
    assert_eq!(window(1280.0, 720.0, 1.0).backing_size(), (1280, 720));
    assert_eq!(window(1280.0, 720.0, 2.0).backing_size(), (2560, 1440));
    // 3x phones are capped
    assert_eq!(window(400.0, 800.0, 3.0).backing_size(), (800, 1600));
    assert_eq!(window(400.0, 800.0, 3.0).pixel_ratio(), MAX_PIXEL_RATIO);
}

#[test]
fn backing_size_never_collapses_to_zero() {
    assert_eq!(window(0.0, 0.0, 1.0).backing_size(), (1, 1));
    assert_eq!(window(-5.0, 10.0, 1.0).backing_size(), (1, 10));
}

#[test]
fn unusable_pixel_ratio_falls_back_to_one() {
    for dpr in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert_eq!(window(640.0, 480.0, dpr).pixel_ratio(), 1.0);
    }
}

#[test]
fn aspect_is_none_for_empty_windows() {
    assert_eq!(window(0.0, 480.0, 1.0).aspect(), None);
    assert_eq!(window(640.0, 0.0, 1.0).aspect(), None);
    assert_eq!(window(640.0, 480.0, 1.0).aspect(), Some((640.0_f64 / 480.0) as f32));
}

#[test]
fn first_observation_always_reports() {
    // Mounting before layout must still be corrected on the first frame
    let mut watch = ChangeWatch::new();
    assert_eq!(watch.last(), None);
    let vp = window(1024.0, 768.0, 1.0);
    assert_eq!(watch.observe(vp), Some(vp));
    assert_eq!(watch.observe(vp), None);
    assert_eq!(watch.last(), Some(vp));
}

#[test]
fn size_or_ratio_change_reports_again() {
    let mut watch = ChangeWatch::new();
    watch.observe(window(1024.0, 768.0, 1.0));
    let wider = window(1280.0, 768.0, 1.0);
    assert_eq!(watch.observe(wider), Some(wider));
    let zoomed = window(1280.0, 768.0, 1.25);
    assert_eq!(watch.observe(zoomed), Some(zoomed));
    assert_eq!(watch.observe(zoomed), None);
}
