use crate::color::{linear_to_srgb, luma, srgb_to_linear};
use crate::image_buf::ImageBuf;
use crate::params::AdjustmentParams;
use crate::pipeline::stage::Stage;
use crate::pipeline::stages::zone::zone_curve;
use crate::remap;

// Highlight zone in perceptual space, Lightroom-style boundaries.
const ZONE_LO: f32 = 0.65;
const ZONE_HI: f32 = 0.90;
const FEATHER: f32 = 0.05;

/// Highlight boost/recovery. Native amount is signed in [-1, 1]; positive
/// lifts the highlight band, negative pulls it down to recover detail.
pub struct Highlights;

impl Stage for Highlights {
    fn name(&self) -> &str {
        "highlights"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        params.highlights != 0.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let amount = remap::highlight_amount(params.highlights);
        if !(-1.0..=1.0).contains(&amount) {
            return None;
        }

        // gamma = 3^(-amount): positive amount -> gamma < 1 -> lift.
        let gamma = 3.0_f32.powf(-amount);
        let mut out = input.clone();

        for pixel in out.data.chunks_exact_mut(3) {
            let y = luma(pixel[0], pixel[1], pixel[2]);
            if y < 1e-6 || y > 1.0 {
                // Super-white pixels sit past the zone; leave them be.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(v: f32) -> ImageBuf {
        ImageBuf::from_data(2, 2, vec![v; 12]).unwrap()
    }

    #[test]
    fn inactive_at_neutral() {
        assert!(!Highlights.active(&AdjustmentParams::default()));
    }

    #[test]
    fn positive_lifts_highlight_band() {
        // Perceptual 0.775 is the band center; linear equivalent ~0.56.
        let buf = flat(srgb_to_linear(0.775));
        let params = AdjustmentParams {
            highlights: 60.0,
            ..Default::default()
        };
        let result = Highlights.apply(&buf, &params).unwrap();
        assert!(result.data[0] > buf.data[0], "highlights should lift");
    }

    #[test]
    fn negative_recovers_highlight_band() {
        let buf = flat(srgb_to_linear(0.775));
        let params = AdjustmentParams {
            highlights: -60.0,
            ..Default::default()
        };
        let result = Highlights.apply(&buf, &params).unwrap();
        assert!(result.data[0] < buf.data[0], "highlights should recover");
    }

    #[test]
    fn midtones_untouched() {
        let buf = flat(srgb_to_linear(0.4));
        let params = AdjustmentParams {
            highlights: 80.0,
            ..Default::default()
        };
        let result = Highlights.apply(&buf, &params).unwrap();
        for (&got, &want) in result.data.iter().zip(buf.data.iter()) {
            assert!((got - want).abs() < 1e-6, "midtone moved: {got} vs {want}");
        }
    }

    #[test]
    fn hdr_pixels_left_alone() {
        let buf = flat(1.8);
        let params = AdjustmentParams {
            highlights: 80.0,
            ..Default::default()
        };
        let result = Highlights.apply(&buf, &params).unwrap();
        assert_eq!(result.data, buf.data);
    }

    #[test]
    fn preserves_hue_ratio() {
        let buf = ImageBuf::from_data(1, 1, vec![0.7, 0.6, 0.5]).unwrap();
        let params = AdjustmentParams {
            highlights: 50.0,
            ..Default::default()
        };
        let result = Highlights.apply(&buf, &params).unwrap();
        let before = 0.7 / 0.5;
        let after = result.data[0] / result.data[2];
        assert!(
            (before - after).abs() < 1e-4,
            "channel ratio should survive luma scaling: {before} vs {after}"
        );
    }
}
