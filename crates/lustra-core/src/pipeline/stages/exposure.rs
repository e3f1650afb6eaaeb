use crate::image_buf::ImageBuf;
use crate::params::AdjustmentParams;
use crate::pipeline::stage::Stage;
use crate::remap;

pub struct Exposure;

impl Stage for Exposure {
    fn name(&self) -> &str {
        "exposure"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        params.exposure != 0.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let ev = remap::exposure_ev(params.exposure);
        if !ev.is_finite() {
            return None;
        }

        let multiplier = 2.0_f32.powf(ev);
        let mut out = input.clone();
        for v in &mut out.data {
            *v *= multiplier;
        }
        Some(out)
    }
}
