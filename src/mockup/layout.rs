use crate::{
    foundation::core::{Canvas, FracRect, Point, Rect},
    mockup::model::{ArtworkTransform, PlacementPolicy},
};

/// Fraction of the zone width the artwork occupies at neutral scale.
const BASE_WIDTH_FRAC: f64 = 0.8;

/// The artwork never exceeds this fraction of the zone height.
const MAX_HEIGHT_FRAC: f64 = 0.9;

/// Compute the artwork rectangle on the canvas.
///
/// The width starts from [`BASE_WIDTH_FRAC`] of the zone width, scaled by
/// the (band-clamped) user scale; the height follows the artwork aspect
/// ratio and is capped at [`MAX_HEIGHT_FRAC`] of the zone height,
/// shrinking both axes to preserve aspect. AutoFit centers the rectangle
/// in the zone; Anchored centers it at the user position.
pub fn layout_artwork(
    canvas: Canvas,
    zone: FracRect,
    artwork: Canvas,
    transform: ArtworkTransform,
    policy: PlacementPolicy,
) -> Rect {
    let transform = transform.clamped(policy);
    let zone_rect = zone.to_canvas_rect(canvas);

    let art_aspect = {
        let a = f64::from(artwork.height) / f64::from(artwork.width);
        if a.is_finite() && a > 0.0 { a } else { 1.0 }
    };

    let mut art_w = zone_rect.width() * BASE_WIDTH_FRAC * transform.scale;
    let mut art_h = art_w * art_aspect;

    let max_h = zone_rect.height() * MAX_HEIGHT_FRAC;
    if art_h > max_h {
        let shrink = max_h / art_h;
        art_w *= shrink;
        art_h *= shrink;
    }

    let center = match policy {
        PlacementPolicy::AutoFit => zone_rect.center(),
        PlacementPolicy::Anchored => Point::new(
            f64::from(canvas.width) * transform.x_percent / 100.0,
            f64::from(canvas.height) * transform.y_percent / 100.0,
        ),
    };

    Rect::new(
        center.x - art_w / 2.0,
        center.y - art_h / 2.0,
        center.x + art_w / 2.0,
        center.y + art_h / 2.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/mockup/layout.rs"]
mod tests;
