//! Shared brightness/contrast/saturation kernel and the five stages that
//! drive it with a single parameter each.

use crate::color::{linear_to_srgb, luma, srgb_to_linear};
use crate::image_buf::ImageBuf;
use crate::params::AdjustmentParams;
use crate::pipeline::stage::Stage;
use crate::remap;

/// Native configuration of the color-controls operator.
///
/// Brightness is an additive perceptual delta (neutral 0), contrast a
/// multiplier around mid-gray in [0, 4] (neutral 1), saturation a luma-mix
/// multiplier (neutral 1).
#[derive(Clone, Copy, Debug)]
pub(super) struct ColorControls {
    pub brightness: f32,
    pub contrast: f32,
    pub saturation: f32,
}

impl Default for ColorControls {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            saturation: 1.0,
        }
    }
}

impl ColorControls {
    fn in_domain(&self) -> bool {
        self.brightness.is_finite()
            && (0.0..=4.0).contains(&self.contrast)
            && self.saturation.is_finite()
            && self.saturation >= 0.0
    }
}

/// Apply the kernel. Saturation runs in linear light (luma mix); the tone
/// part runs in perceptual space, pivoting contrast around mid-gray.
pub(super) fn apply_color_controls(input: &ImageBuf, cfg: &ColorControls) -> Option<ImageBuf> {
    if !cfg.in_domain() {
        return None;
    }

    let adjust_tone = cfg.contrast != 1.0 || cfg.brightness != 0.0;
    let mut out = input.clone();

    for pixel in out.data.chunks_exact_mut(3) {
        if cfg.saturation != 1.0 {
            let y = luma(pixel[0], pixel[1], pixel[2]);
            for c in pixel.iter_mut() {
                *c = (y + cfg.saturation * (*c - y)).max(0.0);
            }
        }

        if adjust_tone {
            for c in pixel.iter_mut() {
                let t = linear_to_srgb(c.max(0.0));
                let t = (t - 0.5) * cfg.contrast + 0.5 + cfg.brightness;
                *c = srgb_to_linear(t.clamp(0.0, 1.0));
            }
        }
    }

    Some(out)
}

pub struct Brilliance;

impl Stage for Brilliance {
    fn name(&self) -> &str {
        "brilliance"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        params.brilliance != 0.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let cfg = ColorControls {
            brightness: remap::brightness_delta(params.brilliance),
            ..Default::default()
        };
        apply_color_controls(input, &cfg)
    }
}

pub struct Contrast;

impl Stage for Contrast {
    fn name(&self) -> &str {
        "contrast"
    }

    // Contrast is multiplicative; its neutral is 1, not 0.
    fn active(&self, params: &AdjustmentParams) -> bool {
        params.contrast != 1.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let cfg = ColorControls {
            contrast: remap::contrast_multiplier(params.contrast),
            ..Default::default()
        };
        apply_color_controls(input, &cfg)
    }
}

pub struct Brightness;

impl Stage for Brightness {
    fn name(&self) -> &str {
        "brightness"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        params.brightness != 0.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let cfg = ColorControls {
            brightness: remap::brightness_delta(params.brightness),
            ..Default::default()
        };
        apply_color_controls(input, &cfg)
    }
}

pub struct BlackPoint;

impl Stage for BlackPoint {
    fn name(&self) -> &str {
        "black_point"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        params.black_point != 0.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let cfg = ColorControls {
            brightness: remap::black_point_delta(params.black_point),
            ..Default::default()
        };
        apply_color_controls(input, &cfg)
    }
}

pub struct Saturation;

impl Stage for Saturation {
    fn name(&self) -> &str {
        "saturation"
    }

    // Saturation is multiplicative; its neutral is 1, not 0.
    fn active(&self, params: &AdjustmentParams) -> bool {
        params.saturation != 1.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let cfg = ColorControls {
            saturation: remap::saturation_multiplier(params.saturation),
            ..Default::default()
        };
        apply_color_controls(input, &cfg)
    }
}
