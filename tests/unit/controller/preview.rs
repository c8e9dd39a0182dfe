use std::sync::Arc;

use super::*;
use crate::catalog::model::Variant;

fn img(width: u32, height: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(px.repeat(width as usize * height as usize)),
    }
}

fn catalog() -> GarmentCatalog {
    GarmentCatalog {
        products: vec![
            Product {
                id: "tee".into(),
                title: "Classic Tee".into(),
                description: None,
                image: Some("garments/tee.png".into()),
                variants: vec![
                    Variant {
                        id: "v1".into(),
                        color: Some("Black Heather".into()),
                        size: Some("S".into()),
                        image: Some("garments/tee_black.png".into()),
                    },
                    Variant {
                        id: "v2".into(),
                        color: Some("Black Heather".into()),
                        size: Some("M".into()),
                        image: Some("garments/tee_black.png".into()),
                    },
                    Variant {
                        id: "v3".into(),
                        color: Some("Vintage White".into()),
                        size: Some("M".into()),
                        image: Some("garments/tee_white.png".into()),
                    },
                ],
            },
            Product {
                id: "hoodie".into(),
                title: "Heavy Hoodie".into(),
                description: None,
                image: Some("garments/hoodie.png".into()),
                variants: vec![
                    Variant {
                        id: "h1".into(),
                        color: Some("Sand".into()),
                        size: Some("M".into()),
                        image: None,
                    },
                    Variant {
                        id: "h2".into(),
                        color: Some("Forest".into()),
                        size: Some("M".into()),
                        image: None,
                    },
                ],
            },
        ],
    }
}

fn install_garment(c: &mut PreviewController, px: [u8; 4]) {
    let ticket = c.begin_garment_load().unwrap();
    let outcome = c.complete_garment_load(&ticket, img(80, 100, px)).unwrap();
    assert_eq!(outcome, LoadOutcome::Installed);
}

fn install_artwork(c: &mut PreviewController, source: &str, px: [u8; 4]) {
    let ticket = c.begin_artwork_load(source).unwrap();
    let outcome = c.complete_artwork_load(&ticket, img(20, 20, px)).unwrap();
    assert_eq!(outcome, LoadOutcome::Installed);
}

#[test]
fn new_selects_the_first_product_with_its_first_options() {
    let c = PreviewController::new(catalog()).unwrap();
    assert_eq!(c.product_id(), Some("tee"));
    assert_eq!(c.color(), Some("Black Heather"));
    assert_eq!(c.size(), Some("S"));
    assert_eq!(c.current_garment_source(), Some("garments/tee_black.png"));

    let empty = PreviewController::new(GarmentCatalog::default()).unwrap();
    assert_eq!(empty.product_id(), None);
    assert!(empty.current_garment_source().is_none());
}

#[test]
fn selection_rejects_unknown_products_and_unoffered_options() {
    let mut c = PreviewController::new(catalog()).unwrap();
    assert!(matches!(
        c.select_product("mug").unwrap_err(),
        PrintmockError::Validation(_)
    ));
    assert!(matches!(
        c.select_color("Neon").unwrap_err(),
        PrintmockError::Validation(_)
    ));
    assert!(matches!(
        c.select_size("XXXL").unwrap_err(),
        PrintmockError::Validation(_)
    ));

    let mut empty = PreviewController::new(GarmentCatalog::default()).unwrap();
    assert!(matches!(
        empty.select_color("Sand").unwrap_err(),
        PrintmockError::Validation(_)
    ));
    assert!(matches!(
        empty.begin_garment_load().unwrap_err(),
        PrintmockError::Validation(_)
    ));
}

#[test]
fn switching_products_resets_color_and_size() {
    let mut c = PreviewController::new(catalog()).unwrap();
    c.set_scale(1.3);
    c.select_product("hoodie").unwrap();
    assert_eq!(c.color(), Some("Sand"));
    assert_eq!(c.size(), Some("M"));
    // Knobs survive product switches.
    assert_eq!(c.transform().scale, 1.3);
}

#[test]
fn knob_setters_clamp_into_the_policy_band() {
    let mut c = PreviewController::new(catalog()).unwrap();
    c.set_scale(9.0);
    assert_eq!(c.transform().scale, 1.4);
    c.set_scale(f64::NAN);
    assert_eq!(c.transform().scale, 1.0);
    c.set_position(-5.0, 150.0);
    assert_eq!((c.transform().x_percent, c.transform().y_percent), (0.0, 100.0));

    c.set_placement_policy(PlacementPolicy::Anchored);
    c.set_scale(0.1);
    assert_eq!(c.transform().scale, 0.3);
    // Back to the narrower band re-clamps the stored value.
    c.set_placement_policy(PlacementPolicy::AutoFit);
    assert_eq!(c.transform().scale, 0.6);
}

#[test]
fn preview_requires_both_images() {
    let mut c = PreviewController::new(catalog()).unwrap();
    assert!(c.preview().unwrap().is_none());

    install_garment(&mut c, [200, 200, 200, 255]);
    assert!(c.preview().unwrap().is_none());

    install_artwork(&mut c, "uploads/logo.png", [255, 0, 0, 255]);
    let (frame, report) = c.preview().unwrap().unwrap();
    assert_eq!((frame.width, frame.height), (80, 100));
    assert_eq!(report.tier, BlendTier::Light);
    assert_eq!(report.passes.len(), 4);
}

#[test]
fn superseded_tickets_complete_as_stale() {
    let mut c = PreviewController::new(catalog()).unwrap();
    let first = c.begin_garment_load().unwrap();
    let second = c.begin_garment_load().unwrap();

    let outcome = c.complete_garment_load(&first, img(8, 10, [0, 0, 0, 255])).unwrap();
    assert_eq!(outcome, LoadOutcome::Stale);
    assert!(!c.garment_ready());

    let outcome = c.complete_garment_load(&second, img(8, 10, [0, 0, 0, 255])).unwrap();
    assert_eq!(outcome, LoadOutcome::Installed);
    assert!(c.garment_ready());
}

#[test]
fn selection_change_invalidates_in_flight_garment_loads() {
    let mut c = PreviewController::new(catalog()).unwrap();
    let ticket = c.begin_garment_load().unwrap();
    assert_eq!(ticket.source(), "garments/tee_black.png");

    // The slow decode finishes after the user switched colors.
    c.select_color("Vintage White").unwrap();
    let outcome = c.complete_garment_load(&ticket, img(8, 10, [0, 0, 0, 255])).unwrap();
    assert_eq!(outcome, LoadOutcome::Stale);
    assert!(!c.garment_ready());
}

#[test]
fn tickets_are_bound_to_their_slot() {
    let mut c = PreviewController::new(catalog()).unwrap();
    let art_ticket = c.begin_artwork_load("uploads/logo.png").unwrap();
    assert!(matches!(
        c.complete_garment_load(&art_ticket, img(4, 4, [0, 0, 0, 255])).unwrap_err(),
        PrintmockError::Validation(_)
    ));
}

#[test]
fn color_change_keeps_the_garment_when_the_photo_is_shared() {
    let mut c = PreviewController::new(catalog()).unwrap();
    c.select_product("hoodie").unwrap();
    install_garment(&mut c, [90, 90, 90, 255]);

    // Both hoodie colors fall back to the product photo.
    c.select_color("Forest").unwrap();
    assert!(c.garment_ready());

    // Tee colors resolve to different photos, so the slot drops.
    c.select_product("tee").unwrap();
    install_garment(&mut c, [30, 30, 30, 255]);
    c.select_color("Vintage White").unwrap();
    assert!(!c.garment_ready());
}

#[test]
fn preview_is_elided_until_observable_state_changes() {
    let mut c = PreviewController::new(catalog()).unwrap();
    install_garment(&mut c, [200, 200, 200, 255]);
    install_artwork(&mut c, "uploads/logo.png", [255, 0, 0, 255]);

    let ptr1 = {
        let (frame, _) = c.preview().unwrap().unwrap();
        frame.data.as_ptr()
    };
    let ptr2 = {
        let (frame, _) = c.preview().unwrap().unwrap();
        frame.data.as_ptr()
    };
    // Unchanged state serves the cached buffer.
    assert_eq!(ptr1, ptr2);

    c.set_blend_override(BlendTier::Dark);
    let (_, report) = c.preview().unwrap().unwrap();
    assert_eq!(report.tier, BlendTier::Dark);
}

#[test]
fn reinstalling_the_same_source_drops_the_cached_frame() {
    let mut c = PreviewController::new(catalog()).unwrap();
    install_garment(&mut c, [128, 128, 128, 255]);
    install_artwork(&mut c, "uploads/logo.png", [255, 0, 0, 255]);
    let before = c.preview().unwrap().unwrap().0.data.clone();

    // Same path, new pixels: a re-upload.
    install_artwork(&mut c, "uploads/logo.png", [0, 255, 0, 255]);
    let after = c.preview().unwrap().unwrap().0.data.clone();
    assert_ne!(before, after);
}

#[test]
fn a_new_artwork_resets_the_placement_knobs() {
    let mut c = PreviewController::new(catalog()).unwrap();
    install_artwork(&mut c, "uploads/a.png", [10, 10, 10, 255]);
    c.set_scale(1.2);
    c.set_invert(true);

    // Re-uploading the same source keeps the adjustments.
    install_artwork(&mut c, "uploads/a.png", [15, 15, 15, 255]);
    assert_eq!(c.transform().scale, 1.2);
    assert!(c.transform().invert);

    // A different artwork starts from the defaults.
    install_artwork(&mut c, "uploads/b.png", [20, 20, 20, 255]);
    assert_eq!(c.transform(), ArtworkTransform::default());
    assert_eq!(c.artwork_source(), Some("uploads/b.png"));
}

#[test]
fn clear_artwork_returns_the_preview_to_none() {
    let mut c = PreviewController::new(catalog()).unwrap();
    install_garment(&mut c, [128, 128, 128, 255]);
    install_artwork(&mut c, "uploads/logo.png", [255, 0, 0, 255]);
    assert!(c.preview().unwrap().is_some());

    c.clear_artwork();
    assert_eq!(c.artwork_source(), None);
    assert!(!c.artwork_ready());
    assert!(c.preview().unwrap().is_none());
}

#[test]
fn snapshot_restore_round_trips() {
    let mut c = PreviewController::new(catalog()).unwrap();
    c.select_product("hoodie").unwrap();
    c.select_color("Forest").unwrap();
    c.begin_artwork_load("uploads/logo.png").unwrap();
    c.set_placement_policy(PlacementPolicy::Anchored);
    c.set_scale(1.5);
    c.set_position(10.0, 90.0);
    c.set_blend_override(BlendTier::Dark);
    let snap = c.snapshot();
    assert_eq!(snap.transform.scale, 1.5);

    let mut fresh = PreviewController::new(catalog()).unwrap();
    fresh.restore(&snap).unwrap();
    assert_eq!(fresh.snapshot(), snap);
    assert_eq!(fresh.color(), Some("Forest"));
    assert!(!fresh.garment_ready());

    // The reload after a restore targets the restored source and must not
    // reset the restored placement.
    fresh.begin_artwork_load("uploads/logo.png").unwrap();
    assert_eq!(fresh.transform().scale, 1.5);
}

#[test]
fn restore_rejects_unknown_products_without_side_effects() {
    let mut c = PreviewController::new(catalog()).unwrap();
    let before = c.snapshot();
    let snap = PreviewState {
        product_id: Some("mug".into()),
        ..PreviewState::default()
    };
    assert!(matches!(c.restore(&snap).unwrap_err(), PrintmockError::Validation(_)));
    assert_eq!(c.snapshot(), before);
}

#[test]
fn restore_falls_back_to_offered_options() {
    let mut c = PreviewController::new(catalog()).unwrap();
    let snap = PreviewState {
        product_id: Some("tee".into()),
        color: Some("Neon".into()),
        size: Some("XS".into()),
        ..PreviewState::default()
    };
    c.restore(&snap).unwrap();
    assert_eq!(c.color(), Some("Black Heather"));
    assert_eq!(c.size(), Some("S"));
}

#[test]
fn restore_keeps_installed_images_with_matching_sources() {
    let mut c = PreviewController::new(catalog()).unwrap();
    install_garment(&mut c, [128, 128, 128, 255]);
    install_artwork(&mut c, "uploads/logo.png", [255, 0, 0, 255]);
    let snap = c.snapshot();

    c.set_scale(0.8);
    c.restore(&snap).unwrap();
    assert!(c.garment_ready());
    assert!(c.artwork_ready());
    assert_eq!(c.transform().scale, 1.0);
    assert!(c.preview().unwrap().is_some());
}
