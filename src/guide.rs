//! # Printmock guide (v0.2.0)
//!
//! This module is a standalone, end-to-end walkthrough of printmock's architecture and public
//! API. It is intentionally detailed so embedding hosts (and future phases) can build on a shared
//! mental model of what "a preview" means in this codebase.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`PreparedImage`](crate::PreparedImage): decoded pixels in premultiplied RGBA8
//! - [`MockupParams`](crate::MockupParams): everything besides the two images that shapes a composite
//! - [`EvaluatedMockup`](crate::EvaluatedMockup): the resolved decisions (zone, tier, placement) for one composite
//! - [`MockupPlan`](crate::MockupPlan): backend-agnostic pass list for a single frame
//! - [`MockupBackend`](crate::MockupBackend): executes a plan into pixels
//! - [`MockupRgba`](crate::MockupRgba): the output pixels (RGBA8, premultiplied alpha)
//! - [`MockupAssetStore`](crate::MockupAssetStore): the only place external IO is allowed
//!
//! The compositing pipeline is explicitly staged:
//!
//! 1. Evaluate the selection: [`evaluate_mockup`](crate::evaluate_mockup)
//! 2. Compile into passes: [`compile_mockup`](crate::compile_mockup)
//! 3. Execute passes: [`MockupBackend::render_plan`](crate::MockupBackend::render_plan)
//!
//! Convenience wrappers for step (1)+(2)+(3) live in:
//! - [`render_mockup`](crate::render_mockup)
//! - [`render_mockup_with_report`](crate::render_mockup_with_report)
//! - [`describe_mockup`](crate::describe_mockup) (steps 1+2 only, no pixel work)
//!
//! ---
//!
//! ## "No IO in the renderer" (and why)
//!
//! Printmock wants evaluation/compilation/rendering to be deterministic, testable, and portable.
//! To do that, compositor code never reaches into the filesystem (or network). Instead:
//!
//! - IO and decoding happen through [`MockupAssetStore`](crate::MockupAssetStore)
//! - The compositor consumes **prepared** images ([`PreparedImage`](crate::PreparedImage))
//! - SVG artwork is rasterized at ingest ([`rasterize_svg`](crate::rasterize_svg)), so the
//!   pipeline only ever sees pixels
//!
//! The store resolves relative paths under a root directory and memoizes prepared results by a
//! stable [`AssetId`](crate::AssetId). Hosts that decode elsewhere (a worker, a fetch layer) can
//! skip the store entirely and hand [`PreparedImage`](crate::PreparedImage) values straight to the
//! pipeline or the controller.
//!
//! ---
//!
//! ## Premultiplied alpha (printmock's pixel contract)
//!
//! Printmock's internal and output pixel convention is **premultiplied RGBA8**:
//!
//! - decoded images are premultiplied at ingest
//! - the backend outputs premultiplied pixels in [`MockupRgba`](crate::MockupRgba)
//! - CPU compositing (multiply, screen, soft-light) assumes premultiplied alpha
//! - artwork resampling and color inversion operate on premultiplied data
//!
//! For PNG export, convert once at the edge with
//! [`MockupRgba::to_straight_rgba8`](crate::MockupRgba::to_straight_rgba8). Treat
//! `MockupRgba.data` as premultiplied unless explicitly stated otherwise by the API.
//!
//! ---
//!
//! ## Rendering a mockup (library usage)
//!
//! The following example composites in-memory images (no external IO needed) on the CPU backend.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use printmock::{CpuCompositor, MockupParams, PreparedImage, render_mockup};
//!
//! # fn main() -> printmock::PrintmockResult<()> {
//! let garment = PreparedImage {
//!     width: 80,
//!     height: 100,
//!     rgba8_premul: Arc::new([200u8, 200, 200, 255].repeat(80 * 100)),
//! };
//! let artwork = PreparedImage {
//!     width: 32,
//!     height: 32,
//!     rgba8_premul: Arc::new([180u8, 30, 30, 255].repeat(32 * 32)),
//! };
//!
//! let mut backend = CpuCompositor::new();
//! let frame = render_mockup(&mut backend, &garment, Some(&artwork), &MockupParams::default())?;
//!
//! assert_eq!(frame.width, 80);
//! assert_eq!(frame.height, 100);
//! assert!(frame.premultiplied);
//! assert_eq!(frame.data.len(), 80 * 100 * 4);
//! # Ok(())
//! # }
//! ```
//!
//! Notes:
//!
//! - Output dimensions always equal the garment photo's; artwork never changes the canvas.
//! - [`MockupParams::default`](crate::MockupParams) gives auto-fit placement at neutral scale
//!   with the sampled blend source.
//!
//! ---
//!
//! ## Evaluation: zone, brightness, placement
//!
//! [`evaluate_mockup`](crate::evaluate_mockup) resolves a selection into an
//! [`EvaluatedMockup`](crate::EvaluatedMockup):
//!
//! - the print zone is a fixed fraction of the canvas ([`torso_zone`](crate::torso_zone)); tall
//!   photos (aspect above 1.3) shift it down slightly for the longer collar drop
//! - garment brightness is the mean of every tenth zone pixel
//!   ([`sample_zone_brightness`](crate::sample_zone_brightness)), classified into a
//!   [`BlendTier`](crate::BlendTier) by fixed thresholds
//!   ([`classify_brightness`](crate::classify_brightness))
//! - deployments without pixel access classify from the color's display name instead
//!   ([`classify_color_name`](crate::classify_color_name)); a manual override always wins
//! - artwork placement is resolved to whole pixels ([`layout_artwork`](crate::layout_artwork)):
//!   auto-fit centers in the zone, anchored centers at the user position, and the result is
//!   clamped so the artwork stays inside the zone height
//!
//! Out-of-band placement values are clamped, never rejected: a hand-edited or restored state
//! cannot wedge the preview.
//!
//! ---
//!
//! ## Compilation: from decisions to `MockupPlan`
//!
//! [`compile_mockup`](crate::compile_mockup) emits an ordered pass list over one canvas:
//!
//! 1. the garment photo, source-over onto a cleared canvas
//! 2. the artwork, twice, with the tier's modes and opacities
//!    ([`tier_passes`](crate::tier_passes)): multiply-then-soft-light on light and mid garments,
//!    screen-then-soft-light on dark ones
//! 3. the garment again as soft-light at
//!    [`GARMENT_TEXTURE_OPACITY`](crate::GARMENT_TEXTURE_OPACITY), so fabric texture shows
//!    through the print
//!
//! Without artwork the plan carries the garment passes only. The plan is pure data; tests can
//! validate it without involving a renderer.
//!
//! ---
//!
//! ## The preview controller (embedding hosts)
//!
//! Interactive hosts drive the pipeline through [`PreviewController`](crate::PreviewController),
//! which owns the catalog selection, the placement and blend knobs, and both image slots:
//!
//! - [`GarmentCatalog`](crate::GarmentCatalog) loads from JSON; unknown commerce fields (prices,
//!   inventory) are tolerated and ignored
//! - image loads are ticketed: [`PreviewController::begin_garment_load`](crate::PreviewController::begin_garment_load)
//!   hands out a [`LoadTicket`](crate::LoadTicket), the host decodes wherever it likes, and
//!   `complete_*_load` installs the pixels only if the ticket is still current. A decode that
//!   finishes after the selection moved on completes as [`LoadOutcome::Stale`](crate::LoadOutcome)
//!   and is dropped
//! - [`PreviewController::preview`](crate::PreviewController::preview) renders on demand and
//!   caches the frame behind a [`StateFingerprint`](crate::StateFingerprint); repeated calls with
//!   unchanged state return the cached raster
//! - [`PreviewController::snapshot`](crate::PreviewController::snapshot) /
//!   [`PreviewController::restore`](crate::PreviewController::restore) round-trip the selection
//!   through serializable [`PreviewState`](crate::PreviewState) JSON; pixels are reloaded from
//!   their sources afterwards
//!
//! ---
//!
//! ## CLI
//!
//! The `printmock` binary wraps the same pipeline:
//!
//! - `printmock compose --garment tee.png --artwork logo.svg --out preview.png`
//! - `printmock compose --catalog catalog.json --product tee-classic --color "Black Heather" --artwork logo.png --out preview.png`
//! - `printmock inspect --garment tee.png --artwork logo.png` prints the
//!   [`MockupReport`](crate::MockupReport) as JSON
//! - `printmock catalog --catalog catalog.json` lists products and their offered options
//!
//! Output PNGs are straight-alpha; the conversion happens once at export.
