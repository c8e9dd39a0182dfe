use crate::{
    assets::store::PreparedImage,
    compile::plan::MockupPlan,
    foundation::core::Rgba8Premul,
    foundation::error::PrintmockResult,
};

/// A rendered mockup frame.
///
/// `data` is tightly packed row-major RGBA8, `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockupRgba {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, row-major RGBA8.
    pub data: Vec<u8>,
    /// Whether `data` carries premultiplied alpha. Backends in this crate
    /// always produce premultiplied output; exporters convert as needed.
    pub premultiplied: bool,
}

impl MockupRgba {
    /// Read one pixel, or `None` when the coordinate is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(at..at + 4)?;
        Some(Rgba8Premul { r: px[0], g: px[1], b: px[2], a: px[3] })
    }

    /// Copy of the pixel data converted to straight (non-premultiplied)
    /// alpha, suitable for PNG export.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 {
                px[0] = 0;
                px[1] = 0;
                px[2] = 0;
                continue;
            }
            for c in 0..3 {
                px[c] = ((u16::from(px[c]) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// A mockup renderer.
///
/// Backends consume a compiled [`MockupPlan`] plus the prepared garment and
/// artwork images and produce the composited frame. The garment photo fixes
/// the output dimensions.
pub trait MockupBackend {
    /// Execute every pass of `plan` and return the finished frame.
    fn render_plan(
        &mut self,
        plan: &MockupPlan,
        garment: &PreparedImage,
        artwork: Option<&PreparedImage>,
    ) -> PrintmockResult<MockupRgba>;
}
