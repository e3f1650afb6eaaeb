//! Luminance-zone helpers shared by the highlight and shadow stages.
//!
//! Both stages reshape one band of the perceptual tonal range with a power
//! curve and feather the band edges so the transition into the untouched
//! range keeps slope continuity.

/// Hermite smoothstep: 0 at t<=0, 1 at t>=1, smooth in between.
pub(super) fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Remap perceptual luminance `t` through a power curve confined to
/// [lo, hi]. gamma < 1 lifts the zone, gamma > 1 crushes it. Outside the
/// feathered band, identity.
pub(super) fn zone_curve(t: f32, lo: f32, hi: f32, feather: f32, gamma: f32) -> f32 {
    if t <= lo - feather || t >= hi + feather {
        return t;
    }

    let width = hi - lo;
    let n = ((t - lo) / width).clamp(0.0, 1.0);
    let curved = lo + n.powf(gamma) * width;

    if t <= lo {
        let blend = smoothstep((t - (lo - feather)) / feather);
        t * (1.0 - blend) + curved * blend
    } else if t >= hi {
        let blend = smoothstep((t - hi) / feather);
        curved * (1.0 - blend) + t * blend
    } else {
        curved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_outside_band() {
        for t in [0.0_f32, 0.05, 0.99, 1.0] {
            assert_eq!(zone_curve(t, 0.3, 0.6, 0.05, 0.5), t);
        }
    }

    #[test]
    fn unit_gamma_is_identity_in_and_out_of_zone() {
        // Inside the band and outside the feather the curve is exact
        // identity at gamma=1; within the feather it stays within the
        // blend's reach of identity.
        for t in [0.0_f32, 0.2, 0.3, 0.35, 0.45, 0.55, 0.6, 0.7, 1.0] {
            let out = zone_curve(t, 0.3, 0.6, 0.05, 1.0);
            assert!((out - t).abs() < 1e-6, "gamma=1 at {t}: got {out}");
        }
        for t in [0.27_f32, 0.62] {
            let out = zone_curve(t, 0.3, 0.6, 0.05, 1.0);
            assert!((out - t).abs() < 0.05, "feather at {t}: got {out}");
        }
    }

    #[test]
    fn low_gamma_lifts_zone() {
        let t = 0.45;
        assert!(zone_curve(t, 0.3, 0.6, 0.05, 0.5) > t);
    }

    #[test]
    fn high_gamma_crushes_zone() {
        let t = 0.45;
        assert!(zone_curve(t, 0.3, 0.6, 0.05, 2.0) < t);
    }

    #[test]
    fn curve_is_monotonic() {
        for gamma in [0.33_f32, 0.5, 2.0, 3.0] {
            let mut prev = -1.0_f32;
            for i in 0..=1000 {
                let t = i as f32 / 1000.0;
                let out = zone_curve(t, 0.3, 0.6, 0.05, gamma);
                assert!(
                    out >= prev - 1e-4,
                    "not monotonic at t={t} gamma={gamma}: {out} < {prev}"
                );
                prev = out;
            }
        }
    }

    #[test]
    fn zone_endpoints_pinned() {
        for gamma in [0.5_f32, 2.0] {
            assert!((zone_curve(0.3, 0.3, 0.6, 0.05, gamma) - 0.3).abs() < 0.02);
            assert!((zone_curve(0.6, 0.3, 0.6, 0.05, gamma) - 0.6).abs() < 0.02);
        }
    }
}
