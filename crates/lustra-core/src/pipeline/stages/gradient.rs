use crate::color::srgb_to_linear;
use crate::image_buf::ImageBuf;
use crate::params::AdjustmentParams;
use crate::pipeline::stage::Stage;
use crate::remap;

// Overlay anchor colors (sRGB): warm red at the top, cool blue at the
// bottom. The slider moves opacity between the two ends.
const TOP_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
const BOTTOM_COLOR: [f32; 3] = [0.0, 0.0, 1.0];

/// Vertical two-color gradient composited over the image.
///
/// The remapped intensity sets the top anchor's opacity; the bottom anchor
/// gets the complement. Color and opacity interpolate linearly down the
/// image, then blend source-over.
pub struct GradientOverlay;

impl Stage for GradientOverlay {
    fn name(&self) -> &str {
        "gradient"
    }

    fn active(&self, params: &AdjustmentParams) -> bool {
        params.gradient != 0.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        // Nothing to composite over.
        if input.width == 0 || input.height == 0 {
            return None;
        }

        let intensity = remap::gradient_intensity(params.gradient);
        if !(0.0..=1.0).contains(&intensity) {
            return None;
        }

        let mut out = input.clone();
        let h = out.height;
        let w = out.width as usize;

        for row in 0..h {
            let t = if h > 1 {
                row as f32 / (h - 1) as f32
            } else {
                0.0
            };

            let alpha = intensity * (1.0 - t) + (1.0 - intensity) * t;
            let src = [
                srgb_to_linear(TOP_COLOR[0] * (1.0 - t) + BOTTOM_COLOR[0] * t),
                srgb_to_linear(TOP_COLOR[1] * (1.0 - t) + BOTTOM_COLOR[1] * t),
                srgb_to_linear(TOP_COLOR[2] * (1.0 - t) + BOTTOM_COLOR[2] * t),
            ];

            let start = row as usize * w * 3;
            for pixel in out.data[start..start + w * 3].chunks_exact_mut(3) {
                for (c, s) in pixel.iter_mut().zip(src.iter()) {
                    *c = s * alpha + *c * (1.0 - alpha);
                }
            }
        }

        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(h: u32, v: f32) -> ImageBuf {
        ImageBuf::from_data(1, h, vec![v; (h * 3) as usize]).unwrap()
    }

    #[test]
    fn inactive_at_neutral() {
        assert!(!GradientOverlay.active(&AdjustmentParams::default()));
        assert!(GradientOverlay.active(&AdjustmentParams {
            gradient: -20.0,
            ..Default::default()
        }));
    }

    #[test]
    fn empty_image_yields_no_output() {
        let buf = ImageBuf::from_data(0, 0, vec![]).unwrap();
        let params = AdjustmentParams {
            gradient: 50.0,
            ..Default::default()
        };
        assert!(GradientOverlay.apply(&buf, &params).is_none());
    }

    #[test]
    fn positive_slider_reddens_top() {
        let buf = column(10, 0.5);
        let params = AdjustmentParams {
            gradient: 100.0,
            ..Default::default()
        };
        let result = GradientOverlay.apply(&buf, &params).unwrap();
        // Top row: full-opacity red overlay.
        assert!(result.data[0] > result.data[2], "top should lean red");
        // Bottom row: zero-opacity overlay, pixel untouched.
        let last = result.data.len() - 3;
        assert!((result.data[last] - 0.5).abs() < 1e-6);
        assert!((result.data[last + 2] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn negative_slider_favors_bottom_overlay() {
        let buf = column(10, 0.5);
        let params = AdjustmentParams {
            gradient: -100.0,
            ..Default::default()
        };
        let result = GradientOverlay.apply(&buf, &params).unwrap();
        // Top now gets zero opacity; bottom full blue.
        assert!((result.data[0] - 0.5).abs() < 1e-6);
        let last = result.data.len() - 3;
        assert!(result.data[last + 2] > result.data[last], "bottom should lean blue");
    }

    #[test]
    fn single_row_uses_top_anchor() {
        let buf = column(1, 0.5);
        let params = AdjustmentParams {
            gradient: 100.0,
            ..Default::default()
        };
        let result = GradientOverlay.apply(&buf, &params).unwrap();
        assert!(result.data[0] > result.data[2]);
    }

    #[test]
    fn output_within_range_for_sdr_input() {
        let buf = column(8, 0.9);
        let params = AdjustmentParams {
            gradient: 60.0,
            ..Default::default()
        };
        let result = GradientOverlay.apply(&buf, &params).unwrap();
        assert!(result.data.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}
