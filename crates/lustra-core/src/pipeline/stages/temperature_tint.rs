use crate::image_buf::ImageBuf;
use crate::params::AdjustmentParams;
use crate::pipeline::stage::Stage;
use crate::remap;

/// Warm/cool and green/magenta shift via chromatic adaptation.
///
/// The warmth and tint sliders describe a target neutral near the 6500 K
/// reference; the operator adapts the image from that neutral back to the
/// reference, so warmth > 0 warms the picture and tint > 0 pushes magenta.
pub struct TemperatureTint;

impl Stage for TemperatureTint {
    fn name(&self) -> &str {
        "temperature_tint"
    }

    // Both sliders drive this stage; either away from neutral activates it.
    fn active(&self, params: &AdjustmentParams) -> bool {
        params.warmth != 0.0 || params.tint != 0.0
    }

    fn apply(&self, input: &ImageBuf, params: &AdjustmentParams) -> Option<ImageBuf> {
        let (temp, tint) = remap::neutral_target(params.warmth, params.tint);
        apply_neutral_shift(input, temp, tint)
    }
}

/// Adapt the image from a source neutral at (`temp`, `tint`) to the
/// reference neutral. Shared with the Vivid Warm look.
pub(super) fn apply_neutral_shift(input: &ImageBuf, temp: f32, tint: f32) -> Option<ImageBuf> {
    if !temp.is_finite() || !tint.is_finite() {
        return None;
    }

    let matrix = neutral_matrix(temp, tint);
    if matrix.iter().any(|v| !v.is_finite()) {
        return None;
    }

    let mut out = input.clone();
    for pixel in out.data.chunks_exact_mut(3) {
        let r = pixel[0];
        let g = pixel[1];
        let b = pixel[2];
        pixel[0] = (matrix[0] * r + matrix[1] * g + matrix[2] * b).max(0.0);
        pixel[1] = (matrix[3] * r + matrix[4] * g + matrix[5] * b).max(0.0);
        pixel[2] = (matrix[6] * r + matrix[7] * g + matrix[8] * b).max(0.0);
    }
    Some(out)
}

// ── Color science constants ──────────────────────────────────────────────
//
// sRGB <-> XYZ matrices (IEC 61966-2-1, D65 reference white).
// Bradford cone response matrix (ICC v4 / CIE 2004).
//
// The combined sRGB -> adapted sRGB 3x3 is precomputed once per run, so
// per-pixel cost is a single matrix multiply.

const SRGB_TO_XYZ: [f64; 9] = [
    0.4123907993,
    0.3575843394,
    0.1804807884,
    0.2126390059,
    0.7151686788,
    0.0721923154,
    0.0193308187,
    0.1191947798,
    0.9505321522,
];

const XYZ_TO_SRGB: [f64; 9] = [
    3.2409699419,
    -1.5373831776,
    -0.4986107603,
    -0.9692436363,
    1.8759675015,
    0.0415550574,
    0.0556300797,
    -0.2039769589,
    1.0569715142,
];

const BRADFORD: [f64; 9] = [
    0.8951000, 0.2664000, -0.1614000, -0.7502000, 1.7135000, 0.0367000, 0.0389000, -0.0685000,
    1.0296000,
];

const BRADFORD_INV: [f64; 9] = [
    0.9869929, -0.1470543, 0.1599627, 0.4323053, 0.5183603, 0.0492912, -0.0085287, 0.0400428,
    0.9684867,
];

/// Compute the combined sRGB -> adapted sRGB 3x3 matrix.
///
/// Chain: XYZ_to_sRGB * Bradford(source -> reference) * sRGB_to_XYZ, where
/// source white is the Planckian chromaticity at `temp` offset by `tint`
/// and the reference white sits at `remap::NEUTRAL_TEMP`.
fn neutral_matrix(temp: f32, tint: f32) -> [f32; 9] {
    let temp = (temp as f64).clamp(1667.0, 25000.0);

    let (src_x, src_y) = planckian_with_tint(temp, tint as f64);
    let (dst_x, dst_y) = planckian_xy(remap::NEUTRAL_TEMP as f64);

    let src_xyz = xy_to_xyz(src_x, src_y);
    let dst_xyz = xy_to_xyz(dst_x, dst_y);

    let adapt = bradford_cat(&src_xyz, &dst_xyz);

    let tmp = mat3_mul(&adapt, &SRGB_TO_XYZ);
    let combined = mat3_mul(&XYZ_TO_SRGB, &tmp);

    std::array::from_fn(|i| combined[i] as f32)
}

// ── Planckian locus (Kang et al. 2002) ──────────────────────────────────
//
// Polynomial fit of the Planckian locus in CIE xy chromaticity, valid for
// 1667 K..25000 K.

fn planckian_xy(t: f64) -> (f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;

    let x = if t <= 4000.0 {
        -0.2661239e9 / t3 - 0.2343589e6 / t2 + 0.8776956e3 / t + 0.179910
    } else {
        -3.0258469e9 / t3 + 2.1070379e6 / t2 + 0.2226347e3 / t + 0.240390
    };

    let x2 = x * x;
    let x3 = x2 * x;

    let y = if t <= 2222.0 {
        -1.1063814 * x3 - 1.34811020 * x2 + 2.18555832 * x - 0.20219683
    } else if t <= 4000.0 {
        -0.9549476 * x3 - 1.37418593 * x2 + 2.09137015 * x - 0.16748867
    } else {
        3.0817580 * x3 - 5.87338670 * x2 + 3.75112997 * x - 0.37001483
    };

    (x, y)
}

/// Offset chromaticity perpendicular to the Planckian locus for tint.
///
/// Works in CIE 1960 UCS, where isothermal lines are well-defined.
/// Positive tint = magenta (below the locus), negative = green (above).
fn planckian_with_tint(temp: f64, tint: f64) -> (f64, f64) {
    let (x0, y0) = planckian_xy(temp);
    if tint.abs() < 1e-6 {
        return (x0, y0);
    }

    let (u0, v0) = xy_to_uv60(x0, y0);

    // Numerical tangent to the locus in CIE 1960 UCS.
    let dt = 50.0;
    let t_lo = (temp - dt).max(1667.0);
    let t_hi = (temp + dt).min(25000.0);
    let (x_lo, y_lo) = planckian_xy(t_lo);
    let (x_hi, y_hi) = planckian_xy(t_hi);
    let (u_lo, v_lo) = xy_to_uv60(x_lo, y_lo);
    let (u_hi, v_hi) = xy_to_uv60(x_hi, y_hi);

    let du = u_hi - u_lo;
    let dv = v_hi - v_lo;
    let len = (du * du + dv * dv).sqrt();

    // CW rotation of the tangent: (dv, -du) points below the locus.
    let perp_u = dv / len;
    let perp_v = -du / len;

    let duv = tint / 3000.0;

    uv60_to_xy(u0 + perp_u * duv, v0 + perp_v * duv)
}

fn xy_to_uv60(x: f64, y: f64) -> (f64, f64) {
    let d = -2.0 * x + 12.0 * y + 3.0;
    (4.0 * x / d, 6.0 * y / d)
}

fn uv60_to_xy(u: f64, v: f64) -> (f64, f64) {
    let d = 2.0 * u - 8.0 * v + 4.0;
    (3.0 * u / d, 2.0 * v / d)
}

fn xy_to_xyz(x: f64, y: f64) -> [f64; 3] {
    if y.abs() < 1e-10 {
        return [0.0, 1.0, 0.0];
    }
    [x / y, 1.0, (1.0 - x - y) / y]
}

// ── Bradford chromatic adaptation ───────────────────────────────────────
//
// M = M_A^(-1) * diag(LMS_dst / LMS_src) * M_A

fn bradford_cat(src_xyz: &[f64; 3], dst_xyz: &[f64; 3]) -> [f64; 9] {
    let src_lms = mat3_vec(&BRADFORD, src_xyz);
    let dst_lms = mat3_vec(&BRADFORD, dst_xyz);

    let scale = [
        dst_lms[0] / src_lms[0],
        0.0,
        0.0,
        0.0,
        dst_lms[1] / src_lms[1],
        0.0,
        0.0,
        0.0,
        dst_lms[2] / src_lms[2],
    ];

    let tmp = mat3_mul(&scale, &BRADFORD);
    mat3_mul(&BRADFORD_INV, &tmp)
}

fn mat3_mul(a: &[f64; 9], b: &[f64; 9]) -> [f64; 9] {
    let mut out = [0.0_f64; 9];
    for row in 0..3 {
        for col in 0..3 {
            out[row * 3 + col] =
                a[row * 3] * b[col] + a[row * 3 + 1] * b[3 + col] + a[row * 3 + 2] * b[6 + col];
        }
    }
    out
}

fn mat3_vec(m: &[f64; 9], v: &[f64; 3]) -> [f64; 3] {
    [
        m[0] * v[0] + m[1] * v[1] + m[2] * v[2],
        m[3] * v[0] + m[4] * v[1] + m[5] * v[2],
        m[6] * v[0] + m[7] * v[1] + m[8] * v[2],
    ]
}
