use super::*;
use crate::{
    foundation::core::{FracRect, PixelRect},
    mockup::model::TierSource,
};

fn eval_with(tier: BlendTier, art_rect: PlacedRect) -> EvaluatedMockup {
    EvaluatedMockup {
        canvas: Canvas {
            width: 800,
            height: 1000,
        },
        zone: FracRect {
            left: 0.22,
            top: 0.34,
            width: 0.56,
            height: 0.36,
        },
        zone_px: PixelRect {
            x: 176,
            y: 340,
            width: 448,
            height: 360,
        },
        brightness: Some(200.0),
        tier,
        tier_source: TierSource::Sampled,
        art_rect,
        invert: false,
    }
}

fn some_rect() -> PlacedRect {
    PlacedRect {
        x: 238,
        y: 358,
        width: 324,
        height: 324,
    }
}

#[test]
fn light_tier_pass_table() {
    let plan = compile_mockup(&eval_with(BlendTier::Light, some_rect()));
    assert_eq!(
        plan.passes,
        vec![
            BlendPass {
                layer: LayerSource::Garment,
                blend: BlendMode::Normal,
                opacity: 1.0,
            },
            BlendPass {
                layer: LayerSource::Artwork,
                blend: BlendMode::Multiply,
                opacity: 0.95,
            },
            BlendPass {
                layer: LayerSource::Artwork,
                blend: BlendMode::SoftLight,
                opacity: 0.35,
            },
            BlendPass {
                layer: LayerSource::Garment,
                blend: BlendMode::SoftLight,
                opacity: 0.45,
            },
        ]
    );
}

#[test]
fn mid_tier_softens_the_multiply() {
    let plan = compile_mockup(&eval_with(BlendTier::Mid, some_rect()));
    assert_eq!(plan.passes[1].blend, BlendMode::Multiply);
    assert_eq!(plan.passes[1].opacity, 0.85);
    assert_eq!(plan.passes[2].blend, BlendMode::SoftLight);
    assert_eq!(plan.passes[2].opacity, 0.40);
}

#[test]
fn dark_tier_switches_to_screen() {
    let plan = compile_mockup(&eval_with(BlendTier::Dark, some_rect()));
    assert_eq!(plan.passes[1].blend, BlendMode::Screen);
    assert_eq!(plan.passes[1].opacity, 0.90);
    assert_eq!(plan.passes[2].blend, BlendMode::SoftLight);
    assert_eq!(plan.passes[2].opacity, 0.35);
}

#[test]
fn empty_artwork_rect_keeps_only_garment_passes() {
    let empty = PlacedRect {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };
    let plan = compile_mockup(&eval_with(BlendTier::Light, empty));
    assert_eq!(plan.passes.len(), 2);
    assert!(
        plan.passes
            .iter()
            .all(|p| p.layer == LayerSource::Garment)
    );
}

#[test]
fn every_tier_opens_with_base_and_closes_with_texture() {
    for tier in [BlendTier::Light, BlendTier::Mid, BlendTier::Dark] {
        let plan = compile_mockup(&eval_with(tier, some_rect()));
        let first = plan.passes.first().unwrap();
        assert_eq!(first.layer, LayerSource::Garment);
        assert_eq!(first.blend, BlendMode::Normal);
        assert_eq!(first.opacity, 1.0);

        let last = plan.passes.last().unwrap();
        assert_eq!(last.layer, LayerSource::Garment);
        assert_eq!(last.blend, BlendMode::SoftLight);
        assert_eq!(last.opacity, GARMENT_TEXTURE_OPACITY);
    }
}
