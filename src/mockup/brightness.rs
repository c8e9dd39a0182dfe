use crate::{
    assets::store::PreparedImage,
    foundation::core::PixelRect,
    mockup::model::BlendTier,
};

/// Brightness assumed when the zone has no sampleable pixels.
pub const DEFAULT_BRIGHTNESS: f32 = 160.0;

/// Sampling stride in pixels; every tenth zone pixel contributes.
pub const SAMPLE_STRIDE_PX: u64 = 10;

/// Minimum mean brightness classified as a light garment.
pub const LIGHT_MIN_BRIGHTNESS: f32 = 190.0;

/// Minimum mean brightness classified as a mid garment.
pub const MID_MIN_BRIGHTNESS: f32 = 120.0;

/// Mean brightness of the garment inside `zone`, sampling every
/// [`SAMPLE_STRIDE_PX`]th pixel in flattened row-major order (the stride
/// carries across row boundaries). Brightness per sample is (R+G+B)/3.
///
/// Garment photos are effectively opaque, so premultiplied bytes read as
/// straight channel values here.
pub fn sample_zone_brightness(image: &PreparedImage, zone: PixelRect) -> f32 {
    let x1 = zone.x.saturating_add(zone.width).min(image.width);
    let y1 = zone.y.saturating_add(zone.height).min(image.height);
    if zone.x >= x1 || zone.y >= y1 {
        return DEFAULT_BRIGHTNESS;
    }

    let zw = u64::from(x1 - zone.x);
    let zh = u64::from(y1 - zone.y);
    let row_px = u64::from(image.width);
    let data = image.rgba8_premul.as_slice();

    let mut total = 0.0f64;
    let mut count = 0u64;
    let mut i = 0u64;
    while i < zw * zh {
        let zx = i % zw;
        let zy = i / zw;
        let at = (((u64::from(zone.y) + zy) * row_px + u64::from(zone.x) + zx) * 4) as usize;
        let r = f64::from(data[at]);
        let g = f64::from(data[at + 1]);
        let b = f64::from(data[at + 2]);
        total += (r + g + b) / 3.0;
        count += 1;
        i += SAMPLE_STRIDE_PX;
    }

    (total / count as f64) as f32
}

/// Classify a mean brightness into a blend tier. Monotonic: a brighter
/// garment never classifies darker.
pub fn classify_brightness(brightness: f32) -> BlendTier {
    if brightness >= LIGHT_MIN_BRIGHTNESS {
        BlendTier::Light
    } else if brightness >= MID_MIN_BRIGHTNESS {
        BlendTier::Mid
    } else {
        BlendTier::Dark
    }
}

const DARK_KEYWORDS: &[&str] = &[
    "black", "charcoal", "navy", "midnight", "ink", "espresso", "forest", "maroon",
];

const LIGHT_KEYWORDS: &[&str] = &["white", "cream", "ivory", "natural", "bone", "sand"];

/// Classify a garment color display name by keyword containment,
/// case-insensitive. Color names only ever resolve to light or dark.
pub fn classify_color_name(name: &str) -> Option<BlendTier> {
    let lower = name.to_lowercase();
    if DARK_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(BlendTier::Dark);
    }
    if LIGHT_KEYWORDS.iter().any(|k| lower.contains(k)) {
        return Some(BlendTier::Light);
    }
    None
}

#[cfg(test)]
#[path = "../../tests/unit/mockup/brightness.rs"]
mod tests;
