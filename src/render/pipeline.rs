use crate::{
    assets::store::PreparedImage,
    compile::plan::compile_mockup,
    foundation::core::{Canvas, FracRect, PixelRect, PlacedRect},
    foundation::error::PrintmockResult,
    mockup::eval::{EvaluatedMockup, evaluate_mockup},
    mockup::model::{BlendPass, BlendTier, MockupParams, TierSource},
    render::backend::{MockupBackend, MockupRgba},
};

/// Host-facing summary of one composite: the resolved decisions plus the
/// compiled pass list. Serializes to JSON for display or inspection.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MockupReport {
    /// Output dimensions.
    pub canvas: Canvas,
    /// Print zone as canvas fractions.
    pub zone: FracRect,
    /// Print zone in whole pixels.
    pub zone_px: PixelRect,
    /// Mean sampled brightness, present when the sampled source ran.
    pub brightness: Option<f32>,
    /// Resolved blend tier.
    pub tier: BlendTier,
    /// How the tier was decided.
    pub tier_source: TierSource,
    /// Artwork draw rectangle; empty without artwork.
    pub art_rect: PlacedRect,
    /// Whether artwork colors are inverted.
    pub invert: bool,
    /// Compiled blend passes in execution order.
    pub passes: Vec<BlendPass>,
}

/// Evaluate and compile without rendering.
///
/// Same decisions as [`render_mockup_with_report`], no pixel work.
pub fn describe_mockup(
    garment: &PreparedImage,
    artwork: Option<&PreparedImage>,
    params: &MockupParams,
) -> MockupReport {
    let eval = evaluate_mockup(garment, artwork, params);
    let plan = compile_mockup(&eval);
    report_from(&eval, plan.passes)
}

fn report_from(eval: &EvaluatedMockup, passes: Vec<BlendPass>) -> MockupReport {
    MockupReport {
        canvas: eval.canvas,
        zone: eval.zone,
        zone_px: eval.zone_px,
        brightness: eval.brightness,
        tier: eval.tier,
        tier_source: eval.tier_source,
        art_rect: eval.art_rect,
        invert: eval.invert,
        passes,
    }
}

/// Evaluate, compile, and render one mockup frame.
pub fn render_mockup<B>(
    backend: &mut B,
    garment: &PreparedImage,
    artwork: Option<&PreparedImage>,
    params: &MockupParams,
) -> PrintmockResult<MockupRgba>
where
    B: MockupBackend + ?Sized,
{
    Ok(render_mockup_with_report(backend, garment, artwork, params)?.0)
}

/// Evaluate, compile, and render one mockup frame, returning the report
/// alongside the pixels.
#[tracing::instrument(
    skip_all,
    fields(
        garment_w = garment.width,
        garment_h = garment.height,
        has_artwork = artwork.is_some()
    )
)]
pub fn render_mockup_with_report<B>(
    backend: &mut B,
    garment: &PreparedImage,
    artwork: Option<&PreparedImage>,
    params: &MockupParams,
) -> PrintmockResult<(MockupRgba, MockupReport)>
where
    B: MockupBackend + ?Sized,
{
    let eval = evaluate_mockup(garment, artwork, params);
    let plan = compile_mockup(&eval);
    let frame = backend.render_plan(&plan, garment, artwork)?;
    tracing::debug!(tier = ?eval.tier, source = ?eval.tier_source, "mockup rendered");

    let report = report_from(&eval, plan.passes);
    Ok((frame, report))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
