pub mod stage;
pub mod stages;

use tracing::debug;

use crate::image_buf::ImageBuf;
use crate::params::AdjustmentParams;
use stage::Stage;

/// Ordered composition of adjustment stages and looks.
///
/// ```text
/// Exposure -> Brilliance -> Highlights -> Shadows -> Contrast
///   -> Brightness -> BlackPoint -> Saturation -> Vibrance
///   -> TemperatureTint -> Gradient -> [look]
/// ```
///
/// The order is a product contract, not an implementation detail: the
/// operators do not commute, so reordering changes every edited photo.
/// Each run threads one owned buffer through the chain; a stage at its
/// neutral value is skipped, and a stage that produces no output leaves
/// the chain's current image in place.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_stages(vec![
            Box::new(stages::Exposure),
            Box::new(stages::Brilliance),
            Box::new(stages::Highlights),
            Box::new(stages::Shadows),
            Box::new(stages::Contrast),
            Box::new(stages::Brightness),
            Box::new(stages::BlackPoint),
            Box::new(stages::Saturation),
            Box::new(stages::Vibrance),
            Box::new(stages::TemperatureTint),
            Box::new(stages::GradientOverlay),
            Box::new(stages::VividLook),
            Box::new(stages::VividWarmLook),
        ])
    }

    /// Build a pipeline from an explicit stage list. Tests use this to
    /// inject mock operators or reorder stages.
    pub fn with_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    /// Run every active stage over `input` and return the final image.
    pub fn process(&self, input: ImageBuf, params: &AdjustmentParams) -> ImageBuf {
        let mut current = input;
        for stage in &self.stages {
            if !stage.active(params) {
                continue;
            }
            debug!(stage = stage.name(), "applying");
            match stage.apply(&current, params) {
                Some(next) => current = next,
                None => debug!(stage = stage.name(), "no output, keeping previous image"),
            }
        }
        current
    }

    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
