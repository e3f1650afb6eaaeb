use crate::color::{OKLAB_MAX_CHROMA, linear_srgb_to_oklab, luma};
use crate::image_buf::ImageBuf;
use crate::params::AdjustmentParams;
use crate::pipeline::stage::Stage;
use crate::remap;

/// Saturation weighted by how muted a pixel already is.
pub struct Vibrance;

impl Stage for Vibrance {
    fn name(&self) -> &str {
        "vibrance"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        params.vibrance != 0.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let amount = remap::vibrance_amount(params.vibrance);
        if !(-1.0..=1.0).contains(&amount) {
            return None;
        }

        let sign = amount.signum();
        let mut out = input.clone();

        for pixel in out.data.chunks_exact_mut(3) {
            let y = luma(pixel[0], pixel[1], pixel[2]);

            // OKLab chroma: perceptually uniform saturation metric.
            let (_, ok_a, ok_b) = linear_srgb_to_oklab(pixel[0], pixel[1], pixel[2]);
            let chroma = (ok_a * ok_a + ok_b * ok_b).sqrt();
            let sat = (chroma / OKLAB_MAX_CHROMA).clamp(0.0, 1.0);

            // Selective saturation: positive amounts target low-sat pixels
            // (1 - sat), negative amounts target high-sat ones (1 + sat).
            let effect = (amount * (1.0 - sign * sat)).max(-1.0);
            let blend = 1.0 + effect;

            for c in pixel.iter_mut() {
                *c = (y + blend * (*c - y)).max(0.0);
            }
        }

        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_at_neutral() {
        assert!(!Vibrance.active(&AdjustmentParams::default()));
    }

    #[test]
    fn positive_boosts_muted_pixels_more() {
        let saturated = ImageBuf::from_data(1, 1, vec![0.2, 0.2, 0.8]).unwrap();
        let muted = ImageBuf::from_data(1, 1, vec![0.45, 0.45, 0.55]).unwrap();
        let params = AdjustmentParams {
            vibrance: 50.0,
            ..Default::default()
        };

        let sat_out = Vibrance.apply(&saturated, &params).unwrap();
        let muted_out = Vibrance.apply(&muted, &params).unwrap();

        let sat_y = luma(0.2, 0.2, 0.8);
        let sat_gain = (sat_out.data[2] - sat_y) / (0.8 - sat_y);
        let muted_y = luma(0.45, 0.45, 0.55);
        let muted_gain = (muted_out.data[2] - muted_y) / (0.55 - muted_y);

        assert!(
            muted_gain > sat_gain,
            "muted pixel should get the larger relative boost: {muted_gain} vs {sat_gain}"
        );
    }

    #[test]
    fn negative_desaturates() {
        let buf = ImageBuf::from_data(1, 1, vec![0.8, 0.2, 0.1]).unwrap();
        let params = AdjustmentParams {
            vibrance: -50.0,
            ..Default::default()
        };
        let result = Vibrance.apply(&buf, &params).unwrap();
        let spread_before = 0.8 - 0.1;
        let spread_after = result.data[0] - result.data[2];
        assert!(
            spread_after < spread_before,
            "negative vibrance should reduce spread: {spread_after} vs {spread_before}"
        );
    }

    #[test]
    fn gray_stays_gray() {
        let buf = ImageBuf::from_data(1, 1, vec![0.5, 0.5, 0.5]).unwrap();
        for v in [-80.0, 80.0] {
            let params = AdjustmentParams {
                vibrance: v,
                ..Default::default()
            };
            let result = Vibrance.apply(&buf, &params).unwrap();
            for &c in &result.data {
                assert!((c - 0.5).abs() < 1e-6, "gray moved at vibrance={v}: {c}");
            }
        }
    }

    #[test]
    fn output_non_negative() {
        let buf = ImageBuf::from_data(1, 1, vec![0.9, 0.0, 0.0]).unwrap();
        let params = AdjustmentParams {
            vibrance: -100.0,
            ..Default::default()
        };
        let result = Vibrance.apply(&buf, &params).unwrap();
        assert!(result.data.iter().all(|&v| v >= 0.0));
    }
}
