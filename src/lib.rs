//! Printmock composites print artwork onto garment product photos.
//!
//! Printmock v0.2.0 focuses on a deterministic CPU pipeline that turns a
//! garment photo plus an artwork file into a shaded preview (`MockupRgba`)
//! via a backend-agnostic pass list (`MockupPlan`).
//!
//! # Pipeline overview
//!
//! 1. **Evaluate**: `PreparedImage + MockupParams -> EvaluatedMockup` (print zone, brightness tier, artwork placement)
//! 2. **Compile**: `EvaluatedMockup -> MockupPlan` (ordered blend passes over one canvas)
//! 3. **Render**: `MockupPlan -> MockupRgba` (CPU backend)
//!
//! The key design constraints in v0.2.0:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: evaluation/compilation are pure and stable for a given input.
//! - **No IO in renderers**: external IO is front-loaded in [`MockupAssetStore`].
//! - **Premultiplied RGBA8** end-to-end: the backend outputs premultiplied pixels.
//!
//! Interactive hosts drive the same pipeline through [`PreviewController`],
//! which owns selection state, load tickets, and render caching.
//!
//! For a detailed, standalone walkthrough of the API and architecture, see [`crate::guide`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod catalog;
mod compile;
mod controller;
mod foundation;
mod mockup;
mod render;

/// High-level, standalone documentation for printmock's concepts and architecture.
pub mod guide;

pub use assets::decode::{decode_artwork, decode_image, rasterize_svg};
pub use assets::store::{AssetId, MockupAssetStore, PreparedImage, normalize_rel_path};
pub use catalog::model::{GarmentCatalog, Product, Variant};
pub use compile::fingerprint::{StateFingerprint, fingerprint_state};
pub use compile::plan::{GARMENT_TEXTURE_OPACITY, MockupPlan, compile_mockup, tier_passes};
pub use controller::preview::{LoadOutcome, LoadSlot, LoadTicket, PreviewController};
pub use controller::state::PreviewState;
pub use foundation::core::{
    Canvas, FracRect, PixelRect, PlacedRect, Point, Rect, Rgba8Premul, Vec2,
};
pub use foundation::error::{PrintmockError, PrintmockResult};
pub use mockup::brightness::{
    DEFAULT_BRIGHTNESS, LIGHT_MIN_BRIGHTNESS, MID_MIN_BRIGHTNESS, SAMPLE_STRIDE_PX,
    classify_brightness, classify_color_name, sample_zone_brightness,
};
pub use mockup::eval::{EvaluatedMockup, evaluate_mockup};
pub use mockup::layout::layout_artwork;
pub use mockup::model::{
    ArtworkTransform, BlendMode, BlendPass, BlendSource, BlendSpec, BlendTier, LayerSource,
    MockupParams, PlacementPolicy, TierSource,
};
pub use mockup::zone::torso_zone;
pub use render::backend::{MockupBackend, MockupRgba};
pub use render::composite::{
    blend_tile_over_rgba8_premul, composite_over_rgba8_premul, invert_premul_rgba8_in_place,
    premul_over_in_place_opacity,
};
pub use render::cpu::CpuCompositor;
pub use render::pipeline::{
    MockupReport, describe_mockup, render_mockup, render_mockup_with_report,
};
