use std::sync::LazyLock;

/// Linear f32 RGB image buffer.
///
/// Pixel data is interleaved RGBRGBRGB... in linear light. Values may
/// exceed 1.0 between stages (e.g. after a strong exposure push); they are
/// clamped only on export to display.
///
/// Stages treat `ImageBuf` as a value: they take a reference in and produce
/// a fresh buffer out, and the pipeline moves each intermediate along,
/// dropping the previous one. Nothing mutates a buffer the caller can still
/// see.
#[derive(Clone, Debug)]
pub struct ImageBuf {
    pub width: u32,
    pub height: u32,
    /// Flat pixel data: [R, G, B, R, G, B, ...] in linear f32.
    pub data: Vec<f32>,
}

impl ImageBuf {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width * height * 3) as usize],
        }
    }

    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> anyhow::Result<Self> {
        let expected = (width * height * 3) as usize;
        anyhow::ensure!(
            data.len() == expected,
            "expected {expected} floats for {width}x{height} RGB, got {}",
            data.len()
        );
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Convert to RGBA u8 with sRGB gamma for display/export use.
    pub fn to_rgba_u8_srgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixel_count() * 4);
        for pixel in self.data.chunks_exact(3) {
            out.push(linear_to_srgb_u8(pixel[0]));
            out.push(linear_to_srgb_u8(pixel[1]));
            out.push(linear_to_srgb_u8(pixel[2]));
            out.push(255);
        }
        out
    }

    /// Downsample so the longest edge fits within `max_edge` pixels.
    /// Uses box averaging for clean downscaling. Returns self if already
    /// small enough.
    pub fn downsample(&self, max_edge: u32) -> Self {
        let longest = self.width.max(self.height);
        if longest <= max_edge {
            return self.clone();
        }

        let scale = max_edge as f32 / longest as f32;
        let new_w = (self.width as f32 * scale).round().max(1.0) as u32;
        let new_h = (self.height as f32 * scale).round().max(1.0) as u32;

        let mut data = Vec::with_capacity((new_w * new_h * 3) as usize);

        for dst_y in 0..new_h {
            for dst_x in 0..new_w {
                let src_x0 = (dst_x as f32 / scale) as u32;
                let src_y0 = (dst_y as f32 / scale) as u32;
                let src_x1 = (((dst_x + 1) as f32 / scale).ceil() as u32).min(self.width);
                let src_y1 = (((dst_y + 1) as f32 / scale).ceil() as u32).min(self.height);

                let mut r = 0.0_f32;
                let mut g = 0.0_f32;
                let mut b = 0.0_f32;
                let mut count = 0u32;

                for sy in src_y0..src_y1 {
                    for sx in src_x0..src_x1 {
                        let idx = ((sy * self.width + sx) * 3) as usize;
                        r += self.data[idx];
                        g += self.data[idx + 1];
                        b += self.data[idx + 2];
                        count += 1;
                    }
                }

                if count > 0 {
                    let inv = 1.0 / count as f32;
                    data.push(r * inv);
                    data.push(g * inv);
                    data.push(b * inv);
                } else {
                    data.push(0.0);
                    data.push(0.0);
                    data.push(0.0);
                }
            }
        }

        Self {
            width: new_w,
            height: new_h,
            data,
        }
    }
}

const SRGB_LUT_SIZE: usize = 4096;

static SRGB_LUT: LazyLock<[u8; SRGB_LUT_SIZE]> = LazyLock::new(|| {
    let mut lut = [0u8; SRGB_LUT_SIZE];
    for (i, entry) in lut.iter_mut().enumerate() {
        let v = i as f32 / (SRGB_LUT_SIZE - 1) as f32;
        let srgb = crate::color::linear_to_srgb(v);
        *entry = (srgb * 255.0 + 0.5) as u8;
    }
    lut
});

fn linear_to_srgb_u8(v: f32) -> u8 {
    let v = v.clamp(0.0, 1.0);
    let idx = (v * (SRGB_LUT_SIZE - 1) as f32) as usize;
    SRGB_LUT[idx]
}
