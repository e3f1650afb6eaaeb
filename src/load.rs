use std::path::Path;

use anyhow::{Context, Result};
use lustra_core::color::srgb_to_linear;
use lustra_core::image_buf::ImageBuf;

/// Decode a photo into a linear ImageBuf.
pub fn decode(path: &Path) -> Result<ImageBuf> {
    let img = image::open(path).with_context(|| format!("failed to decode {}", path.display()))?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for &v in rgb.as_raw() {
        data.push(srgb_to_linear(v as f32 / 255.0));
    }
    ImageBuf::from_data(width, height, data)
}

/// Encode an ImageBuf; the format follows the output extension.
pub fn encode(buf: &ImageBuf, path: &Path) -> Result<()> {
    let rgba = buf.to_rgba_u8_srgb();
    // JPEG has no alpha channel; strip it for every format.
    let rgb: Vec<u8> = rgba
        .chunks_exact(4)
        .flat_map(|p| [p[0], p[1], p[2]])
        .collect();
    image::save_buffer(path, &rgb, buf.width, buf.height, image::ExtendedColorType::Rgb8)
        .with_context(|| format!("failed to write {}", path.display()))
}
