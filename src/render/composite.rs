use crate::{
    foundation::error::{PrintmockError, PrintmockResult},
    foundation::math::mul_div255_u8,
    mockup::model::BlendMode,
};

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

/// Source-over `src` onto `dst` in place, scaling source alpha by
/// `opacity`. Both buffers are equal-length premultiplied RGBA8.
pub fn premul_over_in_place_opacity(
    dst: &mut [u8],
    src: &[u8],
    opacity: f32,
) -> PrintmockResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PrintmockError::evaluation(
            "premul_over_in_place_opacity expects equal-length rgba8 buffers",
        ));
    }
    let op = ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    if op == 0 {
        return Ok(());
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = mul_div255_u8(u16::from(s[3]), op);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);

        d[3] = add_sat_u8(sa, mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let sc = mul_div255_u8(u16::from(s[c]), op);
            let dc = mul_div255_u8(u16::from(d[c]), inv);
            d[c] = add_sat_u8(sc, dc);
        }
    }
    Ok(())
}

/// Composite `src` over `dst` with a separable blend mode.
///
/// Equal-length premultiplied RGBA8 buffers covering the same area.
pub fn composite_over_rgba8_premul(
    dst: &mut [u8],
    src: &[u8],
    opacity: f32,
    blend: BlendMode,
) -> PrintmockResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PrintmockError::evaluation(
            "composite_over_rgba8_premul expects equal-length rgba8 buffers",
        ));
    }

    // Perf contract: blend dispatch is chosen once per op (not per pixel);
    // each arm is a specialized kernel.
    match blend {
        BlendMode::Normal => premul_over_in_place_opacity(dst, src, opacity),
        BlendMode::Multiply => composite_over_rgba8_premul_blend(dst, src, opacity, |s, d| s * d),
        BlendMode::Screen => {
            composite_over_rgba8_premul_blend(dst, src, opacity, |s, d| s + d - s * d)
        }
        BlendMode::SoftLight => {
            composite_over_rgba8_premul_blend(dst, src, opacity, soft_light)
        }
    }
}

/// W3C soft-light channel function.
fn soft_light(s: f32, d: f32) -> f32 {
    if s <= 0.5 {
        d - (1.0 - 2.0 * s) * d * (1.0 - d)
    } else {
        let g = if d <= 0.25 {
            ((16.0 * d - 12.0) * d + 4.0) * d
        } else {
            d.sqrt()
        };
        d + (2.0 * s - 1.0) * (g - d)
    }
}

#[inline(always)]
fn composite_over_rgba8_premul_blend<F>(
    dst: &mut [u8],
    src: &[u8],
    opacity: f32,
    blend_fn: F,
) -> PrintmockResult<()>
where
    F: Fn(f32, f32) -> f32,
{
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return Ok(());
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        // Porter-Duff "source-over" with blend applied to unpremultiplied channels:
        // out_a = sa + da * (1 - sa)
        // out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da

        let sp_r = (s[0] as f32 / 255.0) * opacity;
        let sp_g = (s[1] as f32 / 255.0) * opacity;
        let sp_b = (s[2] as f32 / 255.0) * opacity;
        let sa = (s[3] as f32 / 255.0) * opacity;

        let dp_r = d[0] as f32 / 255.0;
        let dp_g = d[1] as f32 / 255.0;
        let dp_b = d[2] as f32 / 255.0;
        let da = d[3] as f32 / 255.0;

        let inv_sa = 1.0 - sa;
        let out_a = (sa + da * inv_sa).clamp(0.0, 1.0);

        let sc_r = if sa > 0.0 { (sp_r / sa).clamp(0.0, 1.0) } else { 0.0 };
        let sc_g = if sa > 0.0 { (sp_g / sa).clamp(0.0, 1.0) } else { 0.0 };
        let sc_b = if sa > 0.0 { (sp_b / sa).clamp(0.0, 1.0) } else { 0.0 };

        let dc_r = if da > 0.0 { (dp_r / da).clamp(0.0, 1.0) } else { 0.0 };
        let dc_g = if da > 0.0 { (dp_g / da).clamp(0.0, 1.0) } else { 0.0 };
        let dc_b = if da > 0.0 { (dp_b / da).clamp(0.0, 1.0) } else { 0.0 };

        let b_r = blend_fn(sc_r, dc_r).clamp(0.0, 1.0);
        let b_g = blend_fn(sc_g, dc_g).clamp(0.0, 1.0);
        let b_b = blend_fn(sc_b, dc_b).clamp(0.0, 1.0);

        let out_p_r = (sp_r * (1.0 - da) + dp_r * (1.0 - sa) + b_r * sa * da).clamp(0.0, 1.0);
        let out_p_g = (sp_g * (1.0 - da) + dp_g * (1.0 - sa) + b_g * sa * da).clamp(0.0, 1.0);
        let out_p_b = (sp_b * (1.0 - da) + dp_b * (1.0 - sa) + b_b * sa * da).clamp(0.0, 1.0);

        d[0] = (out_p_r * 255.0).round().clamp(0.0, 255.0) as u8;
        d[1] = (out_p_g * 255.0).round().clamp(0.0, 255.0) as u8;
        d[2] = (out_p_b * 255.0).round().clamp(0.0, 255.0) as u8;
        d[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    }

    Ok(())
}

/// Composite a tile over the region of `dst` starting at `origin`,
/// clipping to the canvas. Rows outside the canvas are skipped.
#[allow(clippy::too_many_arguments)]
pub fn blend_tile_over_rgba8_premul(
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    tile: &[u8],
    tile_width: u32,
    tile_height: u32,
    origin: (i64, i64),
    opacity: f32,
    blend: BlendMode,
) -> PrintmockResult<()> {
    if dst.len() != dst_width as usize * dst_height as usize * 4 {
        return Err(PrintmockError::evaluation(
            "blend_tile_over_rgba8_premul dst buffer length mismatch",
        ));
    }
    if tile.len() != tile_width as usize * tile_height as usize * 4 {
        return Err(PrintmockError::evaluation(
            "blend_tile_over_rgba8_premul tile buffer length mismatch",
        ));
    }

    let Some(clip) = clip_tile(dst_width, dst_height, tile_width, tile_height, origin) else {
        return Ok(());
    };

    // Dispatch once per op; each arm runs the clipped rows through its
    // monomorphized kernel.
    match blend {
        BlendMode::Normal => blend_clipped_rows(dst, dst_width, tile, tile_width, clip, |d, s| {
            premul_over_in_place_opacity(d, s, opacity)
        }),
        BlendMode::Multiply => blend_clipped_rows(dst, dst_width, tile, tile_width, clip, |d, s| {
            composite_over_rgba8_premul_blend(d, s, opacity, |s, d| s * d)
        }),
        BlendMode::Screen => blend_clipped_rows(dst, dst_width, tile, tile_width, clip, |d, s| {
            composite_over_rgba8_premul_blend(d, s, opacity, |s, d| s + d - s * d)
        }),
        BlendMode::SoftLight => blend_clipped_rows(dst, dst_width, tile, tile_width, clip, |d, s| {
            composite_over_rgba8_premul_blend(d, s, opacity, soft_light)
        }),
    }
}

#[derive(Clone, Copy, Debug)]
struct TileClip {
    dst_x: u32,
    dst_y: u32,
    tile_x: u32,
    tile_y: u32,
    width: u32,
    height: u32,
}

fn clip_tile(
    dst_width: u32,
    dst_height: u32,
    tile_width: u32,
    tile_height: u32,
    (ox, oy): (i64, i64),
) -> Option<TileClip> {
    let x0 = ox.max(0);
    let y0 = oy.max(0);
    let x1 = (ox + i64::from(tile_width)).min(i64::from(dst_width));
    let y1 = (oy + i64::from(tile_height)).min(i64::from(dst_height));
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(TileClip {
        dst_x: x0 as u32,
        dst_y: y0 as u32,
        tile_x: (x0 - ox) as u32,
        tile_y: (y0 - oy) as u32,
        width: (x1 - x0) as u32,
        height: (y1 - y0) as u32,
    })
}

fn blend_clipped_rows<F>(
    dst: &mut [u8],
    dst_width: u32,
    tile: &[u8],
    tile_width: u32,
    clip: TileClip,
    mut row_fn: F,
) -> PrintmockResult<()>
where
    F: FnMut(&mut [u8], &[u8]) -> PrintmockResult<()>,
{
    let row_bytes = clip.width as usize * 4;
    for r in 0..clip.height {
        let dst_at =
            ((clip.dst_y + r) as usize * dst_width as usize + clip.dst_x as usize) * 4;
        let tile_at =
            ((clip.tile_y + r) as usize * tile_width as usize + clip.tile_x as usize) * 4;
        row_fn(
            &mut dst[dst_at..dst_at + row_bytes],
            &tile[tile_at..tile_at + row_bytes],
        )?;
    }
    Ok(())
}

/// Invert colors of a premultiplied RGBA8 buffer in place, leaving alpha
/// untouched. Channels are unpremultiplied, inverted, and re-premultiplied.
pub fn invert_premul_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        for c in 0..3 {
            let straight = ((u16::from(px[c]) * 255 + a / 2) / a).min(255);
            let inverted = 255 - straight;
            px[c] = ((inverted * a + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
