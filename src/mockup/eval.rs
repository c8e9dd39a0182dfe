use crate::{
    assets::store::PreparedImage,
    foundation::core::{Canvas, FracRect, PixelRect, PlacedRect},
    mockup::brightness::{classify_brightness, classify_color_name, sample_zone_brightness},
    mockup::layout::layout_artwork,
    mockup::model::{BlendSource, BlendTier, MockupParams, TierSource},
    mockup::zone::torso_zone,
};

/// Fully resolved per-composite state: everything the plan compiler needs,
/// and everything a host wants to display about the decision.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EvaluatedMockup {
    /// Output dimensions (always the garment's).
    pub canvas: Canvas,
    /// Print zone as canvas fractions.
    pub zone: FracRect,
    /// Print zone in whole pixels (sampling grid).
    pub zone_px: PixelRect,
    /// Mean sampled brightness; `None` unless the sampled source ran.
    pub brightness: Option<f32>,
    /// Tier driving the blend pass table.
    pub tier: BlendTier,
    /// How the tier was decided.
    pub tier_source: TierSource,
    /// Artwork draw rectangle, rounded to whole pixels.
    pub art_rect: PlacedRect,
    /// Invert artwork colors before blending.
    pub invert: bool,
}

/// Resolve zone, blend tier, and artwork placement for one composite.
///
/// Pure and total: out-of-band user values are clamped inside, and any
/// garment/artwork dimensions produce a result. Deterministic for equal
/// inputs. Without artwork the draw rectangle is empty and the compiled
/// plan carries garment passes only.
#[tracing::instrument(
    skip(garment, artwork, params),
    fields(garment_w = garment.width, garment_h = garment.height)
)]
pub fn evaluate_mockup(
    garment: &PreparedImage,
    artwork: Option<&PreparedImage>,
    params: &MockupParams,
) -> EvaluatedMockup {
    let canvas = garment.canvas();
    let zone = torso_zone(canvas);
    let zone_px = zone.pixel_rect(canvas);

    let (tier, tier_source, brightness) = resolve_tier(garment, zone_px, params);

    let art_rect = match artwork {
        Some(art) => PlacedRect::from_rect(layout_artwork(
            canvas,
            zone,
            art.canvas(),
            params.transform,
            params.policy,
        )),
        None => PlacedRect { x: 0, y: 0, width: 0, height: 0 },
    };

    EvaluatedMockup {
        canvas,
        zone,
        zone_px,
        brightness,
        tier,
        tier_source,
        art_rect,
        invert: params.transform.invert,
    }
}

fn resolve_tier(
    garment: &PreparedImage,
    zone_px: PixelRect,
    params: &MockupParams,
) -> (BlendTier, TierSource, Option<f32>) {
    if let Some(tier) = params.blend.manual {
        return (tier, TierSource::Override, None);
    }

    match params.blend.source {
        BlendSource::ColorName => match params.color_name.as_deref().and_then(classify_color_name)
        {
            Some(tier) => (tier, TierSource::ColorName, None),
            None => (BlendTier::Light, TierSource::Default, None),
        },
        BlendSource::Sampled => {
            let b = sample_zone_brightness(garment, zone_px);
            (classify_brightness(b), TierSource::Sampled, Some(b))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mockup/eval.rs"]
mod tests;
