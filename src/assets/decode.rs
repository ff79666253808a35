use std::{io::Cursor, sync::Arc};

use anyhow::Context;

use crate::foundation::{error::MemeResult, math::mul_div255_u8};

#[derive(Clone, Debug)]
/// Decoded raster image in premultiplied RGBA8.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 pixels, row-major, `width * height * 4` bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Decode any format supported by `image` into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> MemeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Encode straight-alpha RGBA8 pixels as PNG bytes.
pub fn encode_png(img: &image::RgbaImage) -> MemeResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
