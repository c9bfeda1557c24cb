use crate::dom::{self, EventListener};
use crate::frame::{self, FrameContext, FrameLoop};
use crate::scroll::ScrollTracker;
use instant::Instant;
use morph_core::{progress_channel, ChangeWatch, ParticleScene, ProgressReader};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Where a section lives in the page.
pub struct SectionTarget<'a> {
    pub name: &'static str,
    pub container_id: &'a str,
    pub canvas_id: &'a str,
    pub overlay_prefix: Option<&'a str>,
}

/// A section wired to the page: frame loop plus scroll/resize subscriptions.
pub struct MountedSection {
    name: &'static str,
    progress: ProgressReader,
    frame_loop: FrameLoop,
    listeners: Vec<EventListener>,
    renderer_ready: Rc<Cell<bool>>,
}

impl MountedSection {
    pub fn progress(&self) -> f32 {
        self.progress.get()
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// True once a WebGPU or WebGL2 renderer is drawing this section.
    pub fn renderer_ready(&self) -> bool {
        self.renderer_ready.get()
    }

    /// Stop drawing, drop the subscriptions and release the GPU resources.
    pub fn unmount(self) {
        self.frame_loop.stop();
        drop(self.listeners);
        log::info!("[{}] unmounted", self.name);
    }
}

/// Attach `scene` to the page. Missing elements skip setup silently.
pub fn mount(target: &SectionTarget<'_>, scene: Box<dyn ParticleScene>) -> Option<MountedSection> {
    let document = dom::window_document()?;
    let Some(container) = document.get_element_by_id(target.container_id) else {
        log::debug!("[{}] no #{} in page; skipping", target.name, target.container_id);
        return None;
    };
    let Some(canvas) = dom::element_by_id::<web::HtmlCanvasElement>(&document, target.canvas_id)
    else {
        log::debug!("[{}] no canvas #{}; skipping", target.name, target.canvas_id);
        return None;
    };

    dom::pin_canvas(&canvas);
    if let Some(vp) = dom::window_viewport() {
        dom::fit_canvas(&canvas, &vp);
    }

    let (writer, reader) = progress_channel(scene.progress_scale());
    let mut tracker = ScrollTracker::new(container, writer);
    if let Some(prefix) = target.overlay_prefix {
        tracker = tracker.with_stage_overlays(document.clone(), prefix);
    }
    tracker.update();
    let tracker = Rc::new(RefCell::new(tracker));

    let mut listeners = Vec::with_capacity(2);
    {
        let tracker = tracker.clone();
        listeners.extend(EventListener::on_window("scroll", move || {
            tracker.borrow_mut().update();
        }));
    }
    {
        // The frame loop refits the canvas; the region may have moved though
        let tracker = tracker.clone();
        listeners.extend(EventListener::on_window("resize", move || {
            tracker.borrow_mut().update();
        }));
    }

    let particle_capacity = scene.particles().len();
    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        scene,
        progress: reader.clone(),
        canvas: canvas.clone(),
        gpu: None,
        last_instant: Instant::now(),
        viewport: ChangeWatch::new(),
    }));
    let frame_loop = frame::start_loop(frame_ctx.clone());

    // The loop already runs the interpolation; drawing starts once the GPU is ready
    let running = frame_loop.running_flag();
    let renderer_ready = Rc::new(Cell::new(false));
    let ready = renderer_ready.clone();
    let name = target.name;
    spawn_local(async move {
        let gpu = frame::init_gpu(&canvas, particle_capacity).await;
        if !running.get() {
            log::debug!("[{name}] unmounted before GPU init finished");
            return;
        }
        if gpu.is_some() {
            log::info!("[{name}] renderer ready");
            ready.set(true);
        }
        frame_ctx.borrow_mut().gpu = gpu;
    });

    log::info!("[{}] mounted", target.name);
    Some(MountedSection {
        name: target.name,
        progress: reader,
        frame_loop,
        listeners,
        renderer_ready,
    })
}
