use crate::dom;
use crate::render;
use instant::Instant;
use morph_core::{ChangeWatch, ParticleScene, ProgressReader, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Box<dyn ParticleScene>,
    pub progress: ProgressReader,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState>,
    pub last_instant: Instant,
    // Starts empty so the first frame sizes the canvas even if mount ran before layout
    pub viewport: ChangeWatch<Viewport>,
}

impl FrameContext {
    /// Recompute every particle and redraw, whether or not progress moved.
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        if let Some(vp) = dom::window_viewport().and_then(|vp| self.viewport.observe(vp)) {
            dom::fit_canvas(&self.canvas, &vp);
            self.scene.camera_mut().resize(&vp);
        }
        let w = self.canvas.width();
        let h = self.canvas.height();
        self.scene.step(self.progress.get(), dt_sec);

        if let Some(g) = &mut self.gpu {
            if w == 0 || h == 0 {
                return;
            }
            g.resize_if_needed(w, h);
            match g.render(self.scene.as_ref()) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    particle_capacity: usize,
) -> Option<render::GpuState> {
    match render::GpuState::new(canvas, particle_capacity).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("GPU init error: {:?}", e);
            None
        }
    }
}

/// A running `requestAnimationFrame` loop that can be stopped.
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Shared flag that turns false once the loop stops.
    pub fn running_flag(&self) -> Rc<Cell<bool>> {
        self.running.clone()
    }

    pub fn stop(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            _ = w.cancel_animation_frame(id);
        }
        // Breaks the closure's self-reference so the frame context is dropped
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let running = Rc::new(Cell::new(true));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

    let tick_clone = tick.clone();
    let running_tick = running.clone();
    let pending_tick = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        if !running_tick.get() {
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &pending_tick);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &pending);

    FrameLoop {
        running,
        pending,
        tick,
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>, pending: &Cell<Option<i32>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }
}
