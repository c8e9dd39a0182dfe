use crate::foundation::error::{PrintmockError, PrintmockResult};

/// User-controlled placement state for the uploaded artwork.
///
/// Out-of-band values are clamped where they are used, never rejected, so a
/// restored or hand-edited state cannot wedge the preview.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ArtworkTransform {
    /// Multiplier on the auto-fit base width. Clamped to the band of the
    /// active [`PlacementPolicy`].
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Artwork center, percent of canvas width (anchored placement only).
    #[serde(default = "default_center")]
    pub x_percent: f64,
    /// Artwork center, percent of canvas height (anchored placement only).
    #[serde(default = "default_center")]
    pub y_percent: f64,
    /// Invert artwork colors before blending (light ink on dark garments).
    #[serde(default)]
    pub invert: bool,
}

fn default_scale() -> f64 {
    1.0
}

fn default_center() -> f64 {
    50.0
}

impl Default for ArtworkTransform {
    fn default() -> Self {
        Self {
            scale: default_scale(),
            x_percent: default_center(),
            y_percent: default_center(),
            invert: false,
        }
    }
}

impl ArtworkTransform {
    /// Reject transforms with non-finite components.
    pub fn validate(&self) -> PrintmockResult<()> {
        for (name, v) in [
            ("scale", self.scale),
            ("x_percent", self.x_percent),
            ("y_percent", self.y_percent),
        ] {
            if !v.is_finite() {
                return Err(PrintmockError::validation(format!(
                    "ArtworkTransform {name} must be finite"
                )));
            }
        }
        Ok(())
    }

    /// Copy with every component forced into range for `policy`.
    pub fn clamped(self, policy: PlacementPolicy) -> Self {
        Self {
            scale: policy.clamp_scale(self.scale),
            x_percent: clamp_percent(self.x_percent),
            y_percent: clamp_percent(self.y_percent),
            invert: self.invert,
        }
    }
}

fn clamp_percent(v: f64) -> f64 {
    if !v.is_finite() {
        return default_center();
    }
    v.clamp(0.0, 100.0)
}

/// How the artwork rectangle is positioned inside the canvas.
///
/// A deployment picks exactly one policy; they are never mixed at runtime.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Center the artwork in the print zone; narrow scale band.
    #[default]
    AutoFit,
    /// Center the artwork at the user-chosen canvas position; wide band.
    Anchored,
}

impl PlacementPolicy {
    /// Allowed scale band for this policy.
    pub fn scale_band(self) -> std::ops::RangeInclusive<f64> {
        match self {
            Self::AutoFit => 0.6..=1.4,
            Self::Anchored => 0.3..=1.5,
        }
    }

    /// Clamp a raw scale into the policy band. Non-finite input falls back
    /// to the neutral scale.
    pub fn clamp_scale(self, raw: f64) -> f64 {
        if !raw.is_finite() {
            return default_scale();
        }
        let band = self.scale_band();
        raw.clamp(*band.start(), *band.end())
    }
}

/// Garment shading class driving the blend pass selection.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendTier {
    /// Bright fabric; strong multiply keeps the print saturated.
    Light,
    /// Mid fabric; softer multiply.
    Mid,
    /// Dark fabric; screen lifts the print instead of sinking it.
    Dark,
}

/// Where the blend tier comes from in a deployment.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendSource {
    /// Sample garment pixels inside the print zone.
    #[default]
    Sampled,
    /// Classify from the selected color's display name; no pixel sampling.
    ColorName,
}

/// Blend configuration: the deployment's tier source plus an optional
/// manual override that always wins.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
pub struct BlendSpec {
    /// Automatic classification source.
    #[serde(default)]
    pub source: BlendSource,
    /// Manual tier override chosen by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual: Option<BlendTier>,
}

/// How the tier used for compositing was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierSource {
    /// Manual override.
    Override,
    /// Color-name keyword match.
    ColorName,
    /// Strided brightness sampling.
    Sampled,
    /// No signal available; the safe default tier.
    Default,
}

/// Blend mode of a single compositing pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Source over destination (premultiplied alpha).
    Normal,
    /// Darkening product blend.
    Multiply,
    /// Lightening inverse-product blend.
    Screen,
    /// W3C soft-light.
    SoftLight,
}

/// Which prepared image a pass reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerSource {
    /// The garment product photo (full canvas).
    Garment,
    /// The uploaded artwork (placed rectangle).
    Artwork,
}

/// One ordered compositing pass of a mockup plan.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlendPass {
    /// Source layer.
    pub layer: LayerSource,
    /// Blend mode.
    pub blend: BlendMode,
    /// Pass opacity in [0, 1].
    pub opacity: f32,
}

/// Everything besides the two images that shapes a composite.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MockupParams {
    /// User placement state.
    #[serde(default)]
    pub transform: ArtworkTransform,
    /// Deployment placement policy.
    #[serde(default)]
    pub policy: PlacementPolicy,
    /// Blend configuration.
    #[serde(default)]
    pub blend: BlendSpec,
    /// Display name of the selected garment color, consulted by the
    /// color-name blend source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_name: Option<String>,
}

impl MockupParams {
    /// Reject structurally invalid parameters.
    pub fn validate(&self) -> PrintmockResult<()> {
        self.transform.validate()
    }
}
