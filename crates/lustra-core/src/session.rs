use tracing::{debug, info};

use crate::image_buf::ImageBuf;
use crate::params::{AdjustmentParams, Look};
use crate::pipeline::Pipeline;

/// One editing session over one source image.
///
/// The session owns the parameters and both images; nothing lives in
/// ambient state. Recomputation is synchronous and explicit: setters only
/// mark the session dirty, and a single `recompute()` after any burst of
/// mutations runs the pipeline once over the latest snapshot, always from
/// the original source image. The result buffer is replaced wholesale on
/// each run, never mutated.
pub struct EditSession {
    pipeline: Pipeline,
    params: AdjustmentParams,
    source: Option<ImageBuf>,
    result: Option<ImageBuf>,
    dirty: bool,
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::new(),
            params: AdjustmentParams::default(),
            source: None,
            result: None,
            dirty: false,
        }
    }

    /// Install a new source image: parameters reset to defaults and one
    /// full (all-skip) pass publishes the untouched image as the result.
    pub fn load_image(&mut self, image: ImageBuf) {
        info!(w = image.width, h = image.height, "new source image");
        self.params = AdjustmentParams::default();
        self.source = Some(image);
        self.result = None;
        self.dirty = true;
        self.recompute();
    }

    /// Restore every parameter to its documented default.
    pub fn reset_to_defaults(&mut self) {
        self.params = AdjustmentParams::default();
        self.dirty = true;
    }

    /// Mutate parameters through a closure; marks the session dirty.
    pub fn edit(&mut self, f: impl FnOnce(&mut AdjustmentParams)) {
        f(&mut self.params);
        self.dirty = true;
    }

    pub fn set_look(&mut self, look: Look) {
        self.edit(|p| p.look = look);
    }

    /// Run the pipeline if anything changed since the last run.
    ///
    /// With no source image this is a silent no-op returning `None`.
    pub fn recompute(&mut self) -> Option<&ImageBuf> {
        let Some(source) = &self.source else {
            return None;
        };

        if self.dirty {
            debug!("recomputing from source");
            let output = self.pipeline.process(source.clone(), &self.params);
            self.result = Some(output);
            self.dirty = false;
        }
        self.result.as_ref()
    }

    pub fn params(&self) -> &AdjustmentParams {
        &self.params
    }

    pub fn source(&self) -> Option<&ImageBuf> {
        self.source.as_ref()
    }

    /// The last recomputed image, if any.
    pub fn result(&self) -> Option<&ImageBuf> {
        self.result.as_ref()
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
