use crate::dom;
use crate::overlay;
use morph_core::{ChangeWatch, ProgressWriter, ScrollRegion, Stage};
use web_sys as web;

/// Turns the container's scroll position into progress and overlay state.
pub struct ScrollTracker {
    container: web::Element,
    writer: ProgressWriter,
    overlays: Option<StageOverlays>,
}

struct StageOverlays {
    document: web::Document,
    prefix: String,
    current: ChangeWatch<Stage>,
}

impl ScrollTracker {
    pub fn new(container: web::Element, writer: ProgressWriter) -> Self {
        Self {
            container,
            writer,
            overlays: None,
        }
    }

    /// Also keep exactly one `{prefix}{stage}` overlay visible.
    pub fn with_stage_overlays(mut self, document: web::Document, prefix: &str) -> Self {
        self.overlays = Some(StageOverlays {
            document,
            prefix: prefix.to_owned(),
            current: ChangeWatch::new(),
        });
        self
    }

    pub fn region(&self) -> ScrollRegion {
        let rect = self.container.get_bounding_client_rect();
        ScrollRegion {
            top: rect.top(),
            height: rect.height(),
            viewport_height: dom::viewport_height(),
        }
    }

    /// Recompute from the current layout. Called on scroll, resize and mount.
    pub fn update(&mut self) {
        let fraction = self.region().progress();
        self.writer.set_normalized(fraction);

        if let Some(ov) = &mut self.overlays {
            let stage = Stage::from_progress(fraction * self.writer.scale());
            if let Some(stage) = ov.current.observe(stage) {
                log::debug!("[scroll] stage -> {}", stage.name());
                overlay::show_stage(&ov.document, &ov.prefix, stage);
            }
        }
    }
}
