use morph_core::Viewport;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Look up an element by id and cast it, `None` if absent or of another type.
pub fn element_by_id<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Current window size and device pixel ratio.
pub fn window_viewport() -> Option<Viewport> {
    let w = web::window()?;
    Some(Viewport {
        width: w.inner_width().ok()?.as_f64()?,
        height: w.inner_height().ok()?.as_f64()?,
        device_pixel_ratio: w.device_pixel_ratio(),
    })
}

/// Size the canvas to the window: CSS pixels for layout, device pixels for the drawing buffer.
pub fn fit_canvas(canvas: &web::HtmlCanvasElement, viewport: &Viewport) {
    let style = canvas.style();
    _ = style.set_property("width", &format!("{}px", viewport.width));
    _ = style.set_property("height", &format!("{}px", viewport.height));
    let (w_px, h_px) = viewport.backing_size();
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
}

/// Keep the canvas on screen while its container scrolls underneath.
pub fn pin_canvas(canvas: &web::HtmlCanvasElement) {
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("position", "sticky");
    _ = style.set_property("top", "0");
}

#[inline]
pub fn viewport_height() -> f64 {
    web::window()
        .and_then(|w| w.inner_height().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// An event subscription that is removed again when dropped.
pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut()>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        mut handler: impl FnMut() + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| log::warn!("[dom] add {event} listener failed: {e:?}"))
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            closure,
        })
    }

    /// Subscribe on the global window.
    pub fn on_window(event: &'static str, handler: impl FnMut() + 'static) -> Option<Self> {
        let window = web::window()?;
        Self::new(window.as_ref(), event, handler)
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}
