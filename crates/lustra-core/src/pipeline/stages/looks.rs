//! Named looks, applied after all adjustment stages.
//!
//! Each look is parameterless beyond its intensity and reuses one of the
//! adjustment kernels with a fixed configuration.

use crate::image_buf::ImageBuf;
use crate::params::{AdjustmentParams, Look};
use crate::pipeline::stage::Stage;
use crate::pipeline::stages::color_controls::{ColorControls, apply_color_controls};
use crate::pipeline::stages::temperature_tint::apply_neutral_shift;
use crate::remap;

/// Saturation-forward look: drives the color-controls kernel with a
/// saturation of intensity x 2.
pub struct VividLook;

impl Stage for VividLook {
    fn name(&self) -> &str {
        "vivid"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        matches!(params.look, Look::Vivid { .. })
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let Look::Vivid { intensity } = params.look else {
            return None;
        };
        let cfg = ColorControls {
            saturation: remap::vivid_saturation(intensity),
            ..Default::default()
        };
        apply_color_controls(input, &cfg)
    }
}

/// Temperature-forward look: adapts from a target neutral at
/// intensity x 7000 K.
pub struct VividWarmLook;

impl Stage for VividWarmLook {
    fn name(&self) -> &str {
        "vivid_warm"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        matches!(params.look, Look::VividWarm { .. })
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let Look::VividWarm { intensity } = params.look else {
            return None;
        };
        apply_neutral_shift(input, remap::vivid_warm_temp(intensity), 0.0)
    }
}
