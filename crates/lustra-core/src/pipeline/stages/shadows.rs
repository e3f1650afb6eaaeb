use crate::color::{linear_to_srgb, luma, srgb_to_linear};
use crate::image_buf::ImageBuf;
use crate::params::AdjustmentParams;
use crate::pipeline::stage::Stage;
use crate::pipeline::stages::zone::zone_curve;
use crate::remap;

// Shadow zone in perceptual space.
const ZONE_LO: f32 = 0.10;
const ZONE_HI: f32 = 0.35;
const FEATHER: f32 = 0.05;

/// Shadow lift/crush. Native amount is in [0, 1] with 0.5 as the
/// operator's neutral: above 0.5 lifts the shadow band, below deepens it.
/// The neutral slider value 0 remaps to exactly 0.5, so skipping the stage
/// at neutral matches running it.
pub struct Shadows;

impl Stage for Shadows {
    fn name(&self) -> &str {
        "shadows"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        params.shadows != 0.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let amount = remap::shadow_amount(params.shadows);
        if !(0.0..=1.0).contains(&amount) {
            return None;
        }

        // Center the [0,1] amount on its 0.5 neutral, then the usual
        // gamma = 3^(-effect) convention.
        let effect = 2.0 * amount - 1.0;
        let gamma = 3.0_f32.powf(-effect);
        let mut out = input.clone();

        for pixel in out.data.chunks_exact_mut(3) {
            let y = luma(pixel[0], pixel[1], pixel[2]);
            if y < 1e-6 || y > 1.0 {
                continue;
            }

            let t = linear_to_srgb(y);
            let new_t = zone_curve(t, ZONE_LO, ZONE_HI, FEATHER, gamma);
            if (new_t - t).abs() < 1e-7 {
                continue;
            }

            let scale = srgb_to_linear(new_t) / y;
            for c in pixel.iter_mut() {
                *c = (*c * scale).max(0.0);
            }
        }

        Some(out)
    }
}
