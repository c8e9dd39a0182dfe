use crate::foundation::error::{PrintmockError, PrintmockResult};

pub use kurbo::{Point, Rect, Vec2};

/// Output raster dimensions, always taken from the garment image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Height over width. Product photos taller than wide have aspect > 1.
    pub fn aspect(self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red, premultiplied.
    pub r: u8,
    /// Green, premultiplied.
    pub g: u8,
    /// Blue, premultiplied.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black, the canvas clear color.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply a straight-alpha color, rounding to nearest.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// Rectangle expressed as fractions of a canvas, each component in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FracRect {
    /// Left edge as a fraction of canvas width.
    pub left: f64,
    /// Top edge as a fraction of canvas height.
    pub top: f64,
    /// Width as a fraction of canvas width.
    pub width: f64,
    /// Height as a fraction of canvas height.
    pub height: f64,
}

impl FracRect {
    /// Check every component is finite, in [0, 1], and inside the canvas.
    pub fn validate(&self) -> PrintmockResult<()> {
        for (name, v) in [
            ("left", self.left),
            ("top", self.top),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(PrintmockError::validation(format!(
                    "FracRect {name} must be in [0, 1], got {v}"
                )));
            }
        }
        if self.left + self.width > 1.0 + 1e-9 || self.top + self.height > 1.0 + 1e-9 {
            return Err(PrintmockError::validation(
                "FracRect must not extend past the canvas",
            ));
        }
        Ok(())
    }

    /// Project onto a canvas as an f64 rectangle (layout math).
    pub fn to_canvas_rect(&self, canvas: Canvas) -> Rect {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let x0 = w * self.left;
        let y0 = h * self.top;
        Rect::new(x0, y0, x0 + w * self.width, y0 + h * self.height)
    }

    /// Project onto a canvas as whole pixels, flooring each edge
    /// (pixel sampling).
    pub fn pixel_rect(&self, canvas: Canvas) -> PixelRect {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        PixelRect {
            x: (w * self.left).floor() as u32,
            y: (h * self.top).floor() as u32,
            width: (w * self.width).floor() as u32,
            height: (h * self.height).floor() as u32,
        }
    }
}

/// Whole-pixel rectangle fully inside a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PixelRect {
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// True when either dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    pub fn pixel_count(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Whole-pixel draw target. The origin may be negative or extend past the
/// canvas; executors clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlacedRect {
    /// Left edge in pixels; may be negative.
    pub x: i64,
    /// Top edge in pixels; may be negative.
    pub y: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PlacedRect {
    /// Round an f64 layout rectangle to whole pixels.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            x: rect.x0.round() as i64,
            y: rect.y0.round() as i64,
            width: rect.width().round().max(0.0) as u32,
            height: rect.height().round().max(0.0) as u32,
        }
    }

    /// True when either dimension rounded to zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}
