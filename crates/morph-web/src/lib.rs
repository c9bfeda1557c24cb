#![cfg(target_arch = "wasm32")]
//! Browser front-end: mounts the morph sections onto page elements and
//! draws them with wgpu every animation frame.

use morph_core::{ChaosSphere, FunnelParams, ParticleScene, SalesFunnel, SphereParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod frame;
mod overlay;
mod render;
mod scroll;
mod section;

use constants::*;
use section::{MountedSection, SectionTarget};

thread_local! {
    // Sections mounted by `start`, kept alive for the page lifetime
    static AUTO_MOUNTED: RefCell<Vec<SectionHandle>> = const { RefCell::new(Vec::new()) };
}

/// JS handle to a mounted section.
#[wasm_bindgen]
pub struct SectionHandle {
    section: Option<MountedSection>,
}

#[wasm_bindgen]
impl SectionHandle {
    /// Stop the frame loop and detach listeners. Further calls are no-ops.
    pub fn unmount(&mut self) {
        if let Some(s) = self.section.take() {
            s.unmount();
        }
    }

    /// Progress value the frame loop will read next.
    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f32 {
        self.section.as_ref().map(|s| s.progress()).unwrap_or(0.0)
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.section.as_ref().is_some_and(|s| s.is_running())
    }

    /// Whether a GPU renderer (WebGPU, or WebGL2 as fallback) came up.
    #[wasm_bindgen(getter)]
    pub fn rendering(&self) -> bool {
        self.section.as_ref().is_some_and(|s| s.renderer_ready())
    }
}

fn scene_rng() -> StdRng {
    StdRng::from_entropy()
}

fn mount_scene(target: SectionTarget<'_>, scene: Box<dyn ParticleScene>) -> Option<SectionHandle> {
    section::mount(&target, scene).map(|s| SectionHandle { section: Some(s) })
}

/// Mount the chaos → sphere section. `undefined` if the elements are missing.
#[wasm_bindgen]
pub fn mount_chaos_sphere(container_id: &str, canvas_id: &str) -> Option<SectionHandle> {
    let scene = match ChaosSphere::new(&SphereParams::default(), &mut scene_rng()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("[sphere] {e}");
            return None;
        }
    };
    mount_scene(
        SectionTarget {
            name: "sphere",
            container_id,
            canvas_id,
            overlay_prefix: None,
        },
        Box::new(scene),
    )
}

/// Mount the four-stage funnel section with its `{overlay_prefix}{stage}` overlays.
#[wasm_bindgen]
pub fn mount_sales_funnel(
    container_id: &str,
    canvas_id: &str,
    overlay_prefix: &str,
) -> Option<SectionHandle> {
    let scene = match SalesFunnel::new(&FunnelParams::default(), &mut scene_rng()) {
        Ok(s) => s,
        Err(e) => {
            log::error!("[funnel] {e}");
            return None;
        }
    };
    mount_scene(
        SectionTarget {
            name: "funnel",
            container_id,
            canvas_id,
            overlay_prefix: Some(overlay_prefix),
        },
        Box::new(scene),
    )
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("morph-web starting");

    let handles = [
        mount_chaos_sphere(SPHERE_CONTAINER_ID, SPHERE_CANVAS_ID),
        mount_sales_funnel(FUNNEL_CONTAINER_ID, FUNNEL_CANVAS_ID, FUNNEL_OVERLAY_PREFIX),
    ];
    AUTO_MOUNTED.with(|m| m.borrow_mut().extend(handles.into_iter().flatten()));
    Ok(())
}
