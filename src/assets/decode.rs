use std::sync::Arc;

use crate::{
    assets::store::PreparedImage,
    foundation::error::{PrintmockError, PrintmockResult},
};

/// Decode encoded raster bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PrintmockResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PrintmockError::decode(format!("decode image bytes: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(PrintmockError::decode("image has zero dimensions"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Parse SVG bytes and rasterize at intrinsic size into premultiplied RGBA8.
///
/// System fonts are available to `<text>` elements.
pub fn rasterize_svg(bytes: &[u8]) -> PrintmockResult<PreparedImage> {
    let fontdb = {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        Arc::new(db)
    };
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_data(bytes, &opts)
        .map_err(|e| PrintmockError::decode(format!("parse svg tree: {e}")))?;

    fn to_px(v: f32) -> PrintmockResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(PrintmockError::decode("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;

    // Avoid pathological allocations from oversized documents.
    const MAX_DIM: u32 = 16_384;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(PrintmockError::decode(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PrintmockError::decode("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(&tree, xform, &mut pixmap.as_mut());

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.data().to_vec()),
    })
}

/// Decode artwork bytes, dispatching SVG sources to the vector rasterizer.
pub fn decode_artwork(source: &str, bytes: &[u8]) -> PrintmockResult<PreparedImage> {
    if is_svg_source(source) {
        rasterize_svg(bytes)
    } else {
        decode_image(bytes)
    }
}

pub(crate) fn is_svg_source(source: &str) -> bool {
    std::path::Path::new(source)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
