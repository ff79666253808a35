use crate::{
    assets::decode::{PreparedImage, encode_png},
    foundation::{
        core::Rgba8,
        error::{MemeError, MemeResult},
        math::unpremul_u8,
    },
    render::composite::over_in_place,
};

#[derive(Clone, Debug)]
/// Premultiplied RGBA8 raster that a composition mutates field by field.
///
/// Dimensions are fixed at creation. Each draw is rasterized into its own layer before being
/// composited, so a failed draw leaves the canvas untouched and pixels a layer does not cover
/// keep their exact bytes.
pub struct Canvas {
    pixmap: vello_cpu::Pixmap,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> MemeResult<Self> {
        let (w, h) = checked_dims(width, height)?;
        Ok(Self {
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Canvas filled with one color.
    pub fn solid(width: u32, height: u32, color: Rgba8) -> MemeResult<Self> {
        let mut canvas = Self::new(width, height)?;
        let premul = color.to_premul();
        for px in canvas.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&premul);
        }
        Ok(canvas)
    }

    /// Canvas holding a copy of a decoded image.
    pub fn from_prepared(img: &PreparedImage) -> MemeResult<Self> {
        let mut canvas = Self::new(img.width, img.height)?;
        let dst = canvas.pixmap.data_as_u8_slice_mut();
        if dst.len() != img.rgba8_premul.len() {
            return Err(MemeError::validation(format!(
                "prepared image buffer has {} bytes, expected {}",
                img.rgba8_premul.len(),
                dst.len()
            )));
        }
        dst.copy_from_slice(&img.rgba8_premul);
        Ok(canvas)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.pixmap.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.pixmap.height())
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize * self.width() as usize + x as usize) * 4;
        let px = &self.pixmap.data_as_u8_slice()[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Row-major premultiplied RGBA8 bytes.
    pub fn as_premul_bytes(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Straight-alpha copy for encoding.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let data = self.pixmap.data_as_u8_slice();
        let width = self.width() as usize;
        image::RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            let idx = (y as usize * width + x as usize) * 4;
            let a = data[idx + 3];
            image::Rgba([
                unpremul_u8(data[idx], a),
                unpremul_u8(data[idx + 1], a),
                unpremul_u8(data[idx + 2], a),
                a,
            ])
        })
    }

    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> MemeResult<Vec<u8>> {
        encode_png(&self.to_rgba_image())
    }

    /// Rasterize `draw` into a transparent layer the size of the canvas, then composite it
    /// source-over. If `draw` fails the canvas is not modified.
    pub(crate) fn draw_layer<F>(&mut self, draw: F) -> MemeResult<()>
    where
        F: FnOnce(&mut vello_cpu::RenderContext) -> MemeResult<()>,
    {
        let (w, h) = (self.pixmap.width(), self.pixmap.height());
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        draw(&mut ctx)?;
        ctx.flush();

        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            layer.data_as_u8_slice(),
        )
    }
}

fn checked_dims(width: u32, height: u32) -> MemeResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MemeError::validation("canvas width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MemeError::validation("canvas height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(MemeError::validation("canvas dimensions must be non-zero"));
    }
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
