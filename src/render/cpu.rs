use std::borrow::Cow;

use image::imageops::FilterType;

use crate::{
    assets::store::PreparedImage,
    compile::plan::MockupPlan,
    foundation::error::{PrintmockError, PrintmockResult},
    mockup::model::LayerSource,
    render::backend::{MockupBackend, MockupRgba},
    render::composite::{
        blend_tile_over_rgba8_premul, composite_over_rgba8_premul, invert_premul_rgba8_in_place,
    },
};

/// CPU reference backend.
///
/// Executes plan passes sequentially over a premultiplied RGBA8 canvas.
/// Deterministic: the same plan and inputs produce byte-identical frames.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuCompositor;

impl CpuCompositor {
    /// Create a CPU compositor.
    pub fn new() -> Self {
        Self
    }
}

impl MockupBackend for CpuCompositor {
    fn render_plan(
        &mut self,
        plan: &MockupPlan,
        garment: &PreparedImage,
        artwork: Option<&PreparedImage>,
    ) -> PrintmockResult<MockupRgba> {
        validate_image(garment, "garment")?;
        if let Some(art) = artwork {
            validate_image(art, "artwork")?;
        }
        if plan.canvas != garment.canvas() {
            return Err(PrintmockError::evaluation(format!(
                "plan canvas {}x{} does not match garment {}x{}",
                plan.canvas.width, plan.canvas.height, garment.width, garment.height
            )));
        }

        let width = plan.canvas.width;
        let height = plan.canvas.height;
        tracing::debug!(width, height, passes = plan.passes.len(), "rendering mockup plan");

        let placed = plan.art_rect;
        let tile: Option<Cow<'_, [u8]>> = match artwork {
            Some(art) if !placed.is_empty() => {
                Some(prepare_artwork_tile(art, placed.width, placed.height, plan.invert)?)
            }
            _ => None,
        };

        let mut canvas = vec![0u8; width as usize * height as usize * 4];
        for pass in &plan.passes {
            match pass.layer {
                LayerSource::Garment => composite_over_rgba8_premul(
                    &mut canvas,
                    &garment.rgba8_premul,
                    pass.opacity,
                    pass.blend,
                )?,
                LayerSource::Artwork => {
                    let Some(tile) = tile.as_deref() else {
                        return Err(PrintmockError::evaluation(
                            "plan contains artwork passes but no artwork image was provided",
                        ));
                    };
                    blend_tile_over_rgba8_premul(
                        &mut canvas,
                        width,
                        height,
                        tile,
                        placed.width,
                        placed.height,
                        (placed.x, placed.y),
                        pass.opacity,
                        pass.blend,
                    )?;
                }
            }
        }

        Ok(MockupRgba { width, height, data: canvas, premultiplied: true })
    }
}

fn validate_image(image: &PreparedImage, label: &str) -> PrintmockResult<()> {
    if image.width == 0 || image.height == 0 {
        return Err(PrintmockError::evaluation(format!("{label} image has zero dimensions")));
    }
    let expected = image.width as usize * image.height as usize * 4;
    if image.rgba8_premul.len() != expected {
        return Err(PrintmockError::evaluation(format!(
            "{label} buffer holds {} bytes, expected {expected}",
            image.rgba8_premul.len()
        )));
    }
    Ok(())
}

/// Scale the artwork to its placed size, optionally inverting colors.
///
/// Borrows the prepared pixels when no resampling or inversion is needed.
/// Resampling happens directly on premultiplied data.
fn prepare_artwork_tile(
    artwork: &PreparedImage,
    width: u32,
    height: u32,
    invert: bool,
) -> PrintmockResult<Cow<'_, [u8]>> {
    if artwork.width == width && artwork.height == height && !invert {
        return Ok(Cow::Borrowed(artwork.rgba8_premul.as_slice()));
    }

    let source = image::ImageBuffer::<image::Rgba<u8>, &[u8]>::from_raw(
        artwork.width,
        artwork.height,
        artwork.rgba8_premul.as_slice(),
    )
    .ok_or_else(|| PrintmockError::evaluation("artwork buffer does not match its dimensions"))?;

    let mut tile = if artwork.width == width && artwork.height == height {
        artwork.rgba8_premul.as_slice().to_vec()
    } else {
        image::imageops::resize(&source, width, height, FilterType::Triangle).into_raw()
    };
    if invert {
        invert_premul_rgba8_in_place(&mut tile);
    }
    Ok(Cow::Owned(tile))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
