use std::sync::Arc;

use super::*;

fn solid_image(width: u32, height: u32, v: u8) -> PreparedImage {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for _ in 0..width * height {
        data.extend_from_slice(&[v, v, v, 255]);
    }
    PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(data),
    }
}

fn full_zone(image: &PreparedImage) -> PixelRect {
    PixelRect {
        x: 0,
        y: 0,
        width: image.width,
        height: image.height,
    }
}

#[test]
fn uniform_image_samples_exactly() {
    let img = solid_image(40, 40, 200);
    assert_eq!(sample_zone_brightness(&img, full_zone(&img)), 200.0);
}

#[test]
fn sampling_stays_inside_the_zone() {
    // Left half 100, right half 220; the zone covers only the right half.
    let mut data = Vec::new();
    for _y in 0..2u32 {
        for x in 0..20u32 {
            let v = if x < 10 { 100 } else { 220 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let img = PreparedImage {
        width: 20,
        height: 2,
        rgba8_premul: Arc::new(data),
    };
    let zone = PixelRect {
        x: 10,
        y: 0,
        width: 10,
        height: 2,
    };
    assert_eq!(sample_zone_brightness(&img, zone), 220.0);
}

#[test]
fn stride_carries_across_row_boundaries() {
    // 5x4 zone = 20 pixels; samples land on flattened indices 0 and 10,
    // i.e. (0,0) and (0,2).
    let mut data = vec![255u8; 5 * 4 * 4];
    for (flat, v) in [(0usize, 30u8), (10, 60)] {
        let at = flat * 4;
        data[at] = v;
        data[at + 1] = v;
        data[at + 2] = v;
    }
    let img = PreparedImage {
        width: 5,
        height: 4,
        rgba8_premul: Arc::new(data),
    };
    assert_eq!(sample_zone_brightness(&img, full_zone(&img)), 45.0);
}

#[test]
fn empty_or_out_of_bounds_zone_uses_the_default() {
    let img = solid_image(10, 10, 40);
    let empty = PixelRect {
        x: 0,
        y: 0,
        width: 0,
        height: 10,
    };
    assert_eq!(sample_zone_brightness(&img, empty), DEFAULT_BRIGHTNESS);

    let outside = PixelRect {
        x: 100,
        y: 0,
        width: 5,
        height: 5,
    };
    assert_eq!(sample_zone_brightness(&img, outside), DEFAULT_BRIGHTNESS);
}

#[test]
fn tier_thresholds_are_inclusive() {
    assert_eq!(classify_brightness(190.0), BlendTier::Light);
    assert_eq!(classify_brightness(189.99), BlendTier::Mid);
    assert_eq!(classify_brightness(120.0), BlendTier::Mid);
    assert_eq!(classify_brightness(119.99), BlendTier::Dark);
    assert_eq!(classify_brightness(255.0), BlendTier::Light);
    assert_eq!(classify_brightness(0.0), BlendTier::Dark);
}

#[test]
fn classification_is_monotonic_in_brightness() {
    let mut last = classify_brightness(0.0);
    for b in 1..=255u32 {
        let tier = classify_brightness(b as f32);
        assert!(tier <= last, "tier regressed at brightness {b}");
        last = tier;
    }
}

#[test]
fn color_name_keywords() {
    assert_eq!(classify_color_name("Black Heather"), Some(BlendTier::Dark));
    assert_eq!(classify_color_name("NAVY Blazer"), Some(BlendTier::Dark));
    assert_eq!(classify_color_name("Vintage White"), Some(BlendTier::Light));
    assert_eq!(classify_color_name("cream"), Some(BlendTier::Light));
    assert_eq!(classify_color_name("Heather Grey"), None);
    assert_eq!(classify_color_name(""), None);
}
