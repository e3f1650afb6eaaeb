use serde::{Deserialize, Serialize};

/// Named look applied after all adjustment stages.
///
/// A closed set: dispatch is a match on the variant, and the intensity
/// travels in the payload. Intensity is in [0,1].
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Look {
    #[default]
    None,
    Vivid {
        intensity: f32,
    },
    VividWarm {
        intensity: f32,
    },
}

/// Intensity a look starts at when first selected.
pub const DEFAULT_LOOK_INTENSITY: f32 = 0.5;

impl Look {
    pub fn vivid() -> Self {
        Look::Vivid {
            intensity: DEFAULT_LOOK_INTENSITY,
        }
    }

    pub fn vivid_warm() -> Self {
        Look::VividWarm {
            intensity: DEFAULT_LOOK_INTENSITY,
        }
    }
}

/// Adjustment parameters for one editing session.
///
/// All sliders are user-range [-100, 100]. Each field has a neutral value
/// at which its stage is skipped: 0 for the additive controls, 1 for the
/// multiplicative ones (`contrast`, `saturation`).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AdjustmentParams {
    /// Exposure push/pull; +-100 maps to +-2 EV.
    pub exposure: f32,
    /// Overall luminance lift applied early in the chain.
    pub brilliance: f32,
    /// Highlight recovery/boost.
    pub highlights: f32,
    /// Shadow lift/crush.
    pub shadows: f32,
    /// Tonal contrast. Neutral is 1, not 0.
    pub contrast: f32,
    /// Luminance lift applied after contrast.
    pub brightness: f32,
    /// Black point; positive values darken.
    pub black_point: f32,
    /// Global saturation. Neutral is 1, not 0.
    pub saturation: f32,
    /// Saturation weighted toward already-muted colors.
    pub vibrance: f32,
    /// Warm/cool shift of the target neutral.
    pub warmth: f32,
    /// Green/magenta shift of the target neutral.
    pub tint: f32,
    /// Vertical two-color gradient overlay strength.
    pub gradient: f32,
    /// Optional look applied after all adjustments.
    pub look: Look,
}

impl Default for AdjustmentParams {
    fn default() -> Self {
        Self {
            exposure: 0.0,
            brilliance: 0.0,
            highlights: 0.0,
            shadows: 0.0,
            contrast: 1.0,
            brightness: 0.0,
            black_point: 0.0,
            saturation: 1.0,
            vibrance: 0.0,
            warmth: 0.0,
            tint: 0.0,
            gradient: 0.0,
            look: Look::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_neutral() {
        let p = AdjustmentParams::default();
        assert_eq!(p.exposure, 0.0);
        assert_eq!(p.contrast, 1.0);
        assert_eq!(p.saturation, 1.0);
        assert_eq!(p.gradient, 0.0);
        assert_eq!(p.look, Look::None);
    }

    #[test]
    fn look_constructors_use_default_intensity() {
        assert_eq!(Look::vivid(), Look::Vivid { intensity: 0.5 });
        assert_eq!(Look::vivid_warm(), Look::VividWarm { intensity: 0.5 });
    }

    #[test]
    fn params_json_roundtrip() {
        let params = AdjustmentParams {
            exposure: 25.0,
            contrast: 40.0,
            tint: -3.0,
            look: Look::Vivid { intensity: 0.8 },
            ..Default::default()
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: AdjustmentParams = serde_json::from_str(&json).unwrap();
        assert!((back.exposure - 25.0).abs() < 1e-6);
        assert!((back.contrast - 40.0).abs() < 1e-6);
        assert!((back.tint + 3.0).abs() < 1e-6);
        assert_eq!(back.look, Look::Vivid { intensity: 0.8 });
    }

    #[test]
    fn look_none_serializes_without_intensity() {
        let json = serde_json::to_string(&Look::None).unwrap();
        assert!(json.contains("none"), "got {json}");
        assert!(!json.contains("intensity"), "got {json}");
    }
}
