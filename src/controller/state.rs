use serde::{Deserialize, Serialize};

use crate::{
    foundation::error::PrintmockResult,
    mockup::model::{ArtworkTransform, BlendSpec, PlacementPolicy},
};

/// Serializable snapshot of the preview controller.
///
/// Captures selection and placement only; pixels are reloaded from their
/// sources after a restore. A snapshot round-trips through JSON unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewState {
    /// Selected product id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Selected color name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Selected size label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Store-relative source of the uploaded artwork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artwork_source: Option<String>,
    /// Artwork placement state.
    #[serde(default)]
    pub transform: ArtworkTransform,
    /// Placement policy.
    #[serde(default)]
    pub policy: PlacementPolicy,
    /// Blend configuration.
    #[serde(default)]
    pub blend: BlendSpec,
}

impl PreviewState {
    /// Reject structurally broken snapshots (non-finite placement values).
    /// Out-of-band finite values are fine; restoring clamps them.
    pub fn validate(&self) -> PrintmockResult<()> {
        self.transform.validate()
    }
}
