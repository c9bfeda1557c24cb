#![cfg(target_arch = "wasm32")]
// Browser tests: `wasm-pack test --headless --chrome crates/morph-web`.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        let window = web_sys::window().unwrap();
        window
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

/// Adds a tall section with a canvas to the page and returns the canvas.
fn add_section(container_id: &str, canvas_id: &str) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let body = document.body().unwrap();
    let container = document.create_element("div").unwrap();
    container.set_id(container_id);
    container
        .dyn_ref::<web_sys::HtmlElement>()
        .unwrap()
        .style()
        .set_property("height", "400vh")
        .unwrap();
    let canvas = document.create_element("canvas").unwrap();
    canvas.set_id(canvas_id);
    container.append_child(&canvas).unwrap();
    body.append_child(&container).unwrap();
    canvas.dyn_into().unwrap()
}

#[wasm_bindgen_test(async)]
async fn renderer_comes_up_with_or_without_webgpu() {
    add_section("test-funnel", "test-funnel-canvas");
    let mut handle = morph_web::mount_sales_funnel("test-funnel", "test-funnel-canvas", "test-stage-")
        .expect("section should mount");

    // Headless browsers without a GPU adapter must land on WebGL2
    let mut waited = 0;
    while !handle.rendering() && waited < 5000 {
        sleep_ms(50).await;
        waited += 50;
    }
    assert!(handle.rendering(), "no renderer after {waited}ms");
    handle.unmount();
    assert!(!handle.mounted());
}

#[wasm_bindgen_test(async)]
async fn canvas_is_sized_to_the_window() {
    let canvas = add_section("test-sphere", "test-sphere-canvas");
    let mut handle = morph_web::mount_chaos_sphere("test-sphere", "test-sphere-canvas")
        .expect("section should mount");
    sleep_ms(100).await;

    let window = web_sys::window().unwrap();
    let inner_w = window.inner_width().unwrap().as_f64().unwrap();
    let inner_h = window.inner_height().unwrap().as_f64().unwrap();
    let style = canvas.style();
    assert_eq!(style.get_property_value("width").unwrap(), format!("{inner_w}px"));
    assert_eq!(style.get_property_value("height").unwrap(), format!("{inner_h}px"));
    let ratio = window.device_pixel_ratio().min(2.0);
    assert_eq!(canvas.width(), ((inner_w * ratio).floor() as u32).max(1));
    handle.unmount();
}

#[wasm_bindgen_test]
fn missing_elements_skip_mounting() {
    assert!(morph_web::mount_chaos_sphere("no-such-section", "no-such-canvas").is_none());
}
