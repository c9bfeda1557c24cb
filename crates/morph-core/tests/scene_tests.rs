// Host-side tests for the two scene types driven frame by frame.

use glam::Vec3;
use morph_core::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn sphere() -> ChaosSphere {
    let params = SphereParams {
        scrub_tau_sec: 0.0,
        ..SphereParams::default()
    };
    ChaosSphere::new(&params, &mut StdRng::seed_from_u64(1)).expect("sphere")
}

fn funnel() -> SalesFunnel {
    SalesFunnel::new(&FunnelParams::default(), &mut StdRng::seed_from_u64(2)).expect("funnel")
}

#[test]
fn sphere_scene_reaches_the_sphere_and_comes_back() {
    let mut scene = sphere();
    assert_eq!(scene.progress_scale(), 1.0);
    assert_eq!(scene.particles().len(), PARTICLE_COUNT);
    assert!(scene.guides().is_empty());

    scene.step(0.0, DT);
    let start = scene.particles().positions().to_vec();

    scene.step(1.0, DT);
    for p in scene.particles().positions() {
        assert!((p.length() - SPHERE_RADIUS).abs() < 1e-3);
    }

    scene.step(0.0, DT);
    for (a, b) in scene.particles().positions().iter().zip(&start) {
        assert!(a.distance(*b) < 1e-5);
    }
}

#[test]
fn sphere_rotation_accumulates_but_is_not_in_the_buffer() {
    let mut scene = sphere();
    scene.step(0.5, DT);
    let before = scene.particles().positions().to_vec();
    let spin0 = scene.spin().angles;
    for _ in 0..120 {
        scene.step(0.5, DT);
    }
    let spin1 = scene.spin().angles;
    assert!((spin1.y - spin0.y - 120.0 * SPHERE_SPIN_Y).abs() < 1e-4);
    assert!((spin1.x - spin0.x - 120.0 * SPHERE_SPIN_X).abs() < 1e-4);
    assert_eq!(scene.particles().positions(), &before[..]);
    assert_ne!(scene.particle_model(), glam::Mat4::IDENTITY);
}

#[test]
fn sphere_scrub_lags_behind_the_scroll() {
    let mut scene =
        ChaosSphere::new(&SphereParams::default(), &mut StdRng::seed_from_u64(1)).unwrap();
    scene.step(0.0, DT);
    scene.step(1.0, DT);
    assert!(scene.progress() > 0.0 && scene.progress() < 0.1);
    for _ in 0..600 {
        scene.step(1.0, DT);
    }
    assert!(scene.progress() > 0.99);
}

#[test]
fn funnel_stage_follows_progress_both_ways() {
    let mut scene = funnel();
    assert_eq!(scene.progress_scale(), 3.0);
    let forward: Vec<Stage> = (0..=30)
        .map(|i| {
            scene.step(i as f32 * 0.1, DT);
            scene.stage()
        })
        .collect();
    assert_eq!(forward.first(), Some(&Stage::Chaos));
    assert_eq!(forward.last(), Some(&Stage::Results));
    let backward: Vec<Stage> = (0..=30)
        .rev()
        .map(|i| {
            scene.step(i as f32 * 0.1, DT);
            scene.stage()
        })
        .collect();
    assert_eq!(backward.last(), Some(&Stage::Chaos));
    let mut rev = backward;
    rev.reverse();
    assert_eq!(forward, rev);
}

#[test]
fn funnel_positions_stay_within_jitter_of_the_pure_blend() {
    let mut scene = funnel();
    let tl = scene.timeline().clone();
    let mut pure = ParticleBuffer::for_timeline(&tl, STAGE_COLORS[0]);
    for p in [0.0f32, 0.7, 1.0, 1.9, 2.4, 3.0] {
        scene.step(p, DT);
        tl.evaluate(p, &mut pure);
        for (a, b) in scene.particles().positions().iter().zip(pure.positions()) {
            assert!((a.x - b.x).abs() <= FUNNEL_JITTER + 1e-4);
            assert!((a.y - b.y).abs() <= FUNNEL_JITTER + 1e-4);
            assert!((a.z - b.z).abs() < 1e-5);
        }
    }
}

#[test]
fn funnel_colours_walk_the_palette() {
    let mut scene = funnel();
    scene.step(0.0, DT);
    assert_eq!(scene.particles().colors()[0], STAGE_COLORS[0]);
    scene.step(3.0, DT);
    let gold = scene.particles().colors()[PARTICLE_COUNT - 1];
    for k in 0..3 {
        assert!((gold[k] - STAGE_COLORS[3][k]).abs() < 1e-5);
    }
    scene.step(1.0, DT);
    assert_eq!(scene.segment(), Segment { index: 1, t: 0.0 });
    assert_eq!(scene.particles().colors()[10], STAGE_COLORS[1]);
}

#[test]
fn ring_opacity_breakpoints() {
    let at = |p: f32| ring_opacities(segment_at(p, FUNNEL_SEGMENTS));
    let close = |a: [f32; 2], b: [f32; 2]| (a[0] - b[0]).abs() < 1e-5 && (a[1] - b[1]).abs() < 1e-5;

    assert!(close(at(0.0), [0.2, 0.2]));
    assert!(close(at(0.5), [0.45, 0.2]));
    assert!(close(at(0.999_99), [0.7, 0.2]));
    assert!(close(at(1.0), [0.7, 0.2]), "continuous into segment 1");
    assert!(close(at(1.5), [0.45, 0.5]));
    assert!(close(at(2.5), [0.2, 0.4]));
    assert!(close(at(3.0), [0.2, 0.0]));

    for i in 0..=300 {
        let [u, l] = at(i as f32 / 100.0);
        assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&l));
    }
}

#[test]
fn funnel_scene_exposes_rings_and_rotating_guide() {
    let mut scene = funnel();
    assert_eq!(scene.guides().len(), 3);
    scene.step(0.5, DT);
    let [u, l] = scene.ring_opacities();
    assert!((u - 0.45).abs() < 1e-5 && (l - 0.2).abs() < 1e-5);
    let model0 = scene.guides()[0].model;
    scene.step(0.5, DT);
    assert_ne!(scene.guides()[0].model, model0, "wireframe keeps turning");
    assert_eq!(scene.guides()[1].model, glam::Mat4::IDENTITY);
}

#[test]
fn spin_is_frame_rate_independent() {
    let mut a = Spin::new(Vec3::new(0.0, 0.001, 0.0));
    let mut b = a;
    for _ in 0..60 {
        a.advance(1.0 / 60.0);
    }
    for _ in 0..120 {
        b.advance(1.0 / 120.0);
    }
    assert!((a.angles.y - b.angles.y).abs() < 1e-5);
    assert!((a.angles.y - 0.06).abs() < 1e-5);

    let mut c = Spin::new(Vec3::Y);
    c.advance(10.0);
    assert!((c.angles.y - MAX_FRAME_DT_SEC * REFERENCE_FPS).abs() < 1e-4);
}
