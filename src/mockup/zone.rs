use crate::foundation::core::{Canvas, FracRect};

const ZONE_LEFT: f64 = 0.22;
const ZONE_WIDTH: f64 = 0.56;

/// Aspect (height/width) above which a product photo is treated as a tall
/// full-body shot rather than a cropped torso shot.
const TALL_ASPECT: f64 = 1.3;

/// Estimate the printable torso area of a garment photo.
///
/// The zone is a fixed horizontal band; tall photos show more garment below
/// the collar, so the zone shifts down and stretches slightly.
pub fn torso_zone(canvas: Canvas) -> FracRect {
    let (top, height) = if canvas.aspect() > TALL_ASPECT {
        (0.36, 0.38)
    } else {
        (0.34, 0.36)
    };

    FracRect {
        left: ZONE_LEFT,
        top,
        width: ZONE_WIDTH,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mockup/zone.rs"]
mod tests;
