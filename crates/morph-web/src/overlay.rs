use crate::constants::HIDDEN_CLASS;
use morph_core::Stage;
use web_sys as web;

/// Show the overlay for `active` and hide the other stage overlays.
///
/// Overlay ids are `{prefix}{stage index}`; missing overlays are skipped.
pub fn show_stage(document: &web::Document, prefix: &str, active: Stage) {
    for (stage, visible) in Stage::ALL.into_iter().zip(active.overlay_visibility()) {
        if let Some(el) = document.get_element_by_id(&format!("{prefix}{}", stage.index())) {
            let cl = el.class_list();
            if visible {
                _ = cl.remove_1(HIDDEN_CLASS);
                _ = el.set_attribute("aria-hidden", "false");
            } else {
                _ = cl.add_1(HIDDEN_CLASS);
                _ = el.set_attribute("aria-hidden", "true");
            }
        }
    }
}
