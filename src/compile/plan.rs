use crate::{
    foundation::core::{Canvas, PlacedRect},
    mockup::eval::EvaluatedMockup,
    mockup::model::{BlendMode, BlendPass, BlendTier, LayerSource},
};

/// Opacity of the closing full-canvas garment texture pass.
pub const GARMENT_TEXTURE_OPACITY: f32 = 0.45;

/// Backend-agnostic compositing recipe for one mockup.
#[derive(Clone, Debug, PartialEq)]
pub struct MockupPlan {
    /// Output surface dimensions.
    pub canvas: Canvas,
    /// Artwork draw rectangle; passes reading the artwork are clipped to
    /// its intersection with the canvas.
    pub art_rect: PlacedRect,
    /// Invert artwork colors before the artwork passes.
    pub invert: bool,
    /// Ordered pass list. The first pass lays down the garment; the last
    /// re-applies it as fabric texture.
    pub passes: Vec<BlendPass>,
}

/// Artwork blend passes for a tier, applied in order.
pub fn tier_passes(tier: BlendTier) -> [(BlendMode, f32); 2] {
    match tier {
        BlendTier::Light => [(BlendMode::Multiply, 0.95), (BlendMode::SoftLight, 0.35)],
        BlendTier::Mid => [(BlendMode::Multiply, 0.85), (BlendMode::SoftLight, 0.40)],
        BlendTier::Dark => [(BlendMode::Screen, 0.90), (BlendMode::SoftLight, 0.35)],
    }
}

/// Compile an evaluated mockup into its ordered pass list.
///
/// An empty artwork rectangle (artwork scaled below one pixel) keeps the
/// garment passes and drops only the artwork ones.
pub fn compile_mockup(eval: &EvaluatedMockup) -> MockupPlan {
    let mut passes = Vec::with_capacity(4);
    passes.push(BlendPass {
        layer: LayerSource::Garment,
        blend: BlendMode::Normal,
        opacity: 1.0,
    });

    if !eval.art_rect.is_empty() {
        for (blend, opacity) in tier_passes(eval.tier) {
            passes.push(BlendPass {
                layer: LayerSource::Artwork,
                blend,
                opacity,
            });
        }
    }

    passes.push(BlendPass {
        layer: LayerSource::Garment,
        blend: BlendMode::SoftLight,
        opacity: GARMENT_TEXTURE_OPACITY,
    });

    MockupPlan {
        canvas: eval.canvas,
        art_rect: eval.art_rect,
        invert: eval.invert,
        passes,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/plan.rs"]
mod tests;
