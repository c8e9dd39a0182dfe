use crate::{
    assets::store::{
        AssetId, MockupAssetStore, PreparedImage, hash_id_for_source, normalize_rel_path,
    },
    catalog::model::{GarmentCatalog, Product},
    compile::fingerprint::{StateFingerprint, fingerprint_state},
    controller::state::PreviewState,
    foundation::error::{PrintmockError, PrintmockResult},
    mockup::model::{
        ArtworkTransform, BlendSource, BlendSpec, BlendTier, MockupParams, PlacementPolicy,
    },
    render::backend::{MockupBackend, MockupRgba},
    render::cpu::CpuCompositor,
    render::pipeline::{MockupReport, render_mockup_with_report},
};

/// Which image slot a [`LoadTicket`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadSlot {
    /// The garment product photo.
    Garment,
    /// The uploaded artwork.
    Artwork,
}

/// Handle for one in-flight image load.
///
/// Issued by `begin_*_load`, redeemed by `complete_*_load`. A ticket whose
/// slot moved on in the meantime completes as [`LoadOutcome::Stale`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    slot: LoadSlot,
    epoch: u64,
    source: String,
}

impl LoadTicket {
    /// Slot this ticket loads into.
    pub fn slot(&self) -> LoadSlot {
        self.slot
    }

    /// Store-relative source path to decode.
    pub fn source(&self) -> &str {
        &self.source
    }
}

/// What happened when a load ticket was redeemed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The decoded image is installed and the next preview uses it.
    Installed,
    /// The selection changed while the load was in flight; the image was
    /// dropped and the current state is untouched.
    Stale,
}

#[derive(Clone, Debug, Default)]
struct ImageSlot {
    epoch: u64,
    pending_source: Option<String>,
    installed_source: Option<String>,
    asset_id: Option<AssetId>,
    image: Option<PreparedImage>,
}

impl ImageSlot {
    fn begin(&mut self, source: String) -> u64 {
        self.epoch += 1;
        self.pending_source = Some(source);
        self.epoch
    }

    fn accepts(&self, ticket: &LoadTicket) -> bool {
        ticket.epoch == self.epoch
            && self.pending_source.as_deref() == Some(ticket.source.as_str())
    }

    fn install(&mut self, source: String, image: PreparedImage) {
        self.asset_id = Some(hash_id_for_source(&source));
        self.installed_source = Some(source);
        self.image = Some(image);
        self.pending_source = None;
    }

    /// Matches `want` when it is installed or already on its way in.
    fn is_current_for(&self, want: Option<&str>) -> bool {
        self.installed_source.as_deref() == want
            || (want.is_some() && self.pending_source.as_deref() == want)
    }

    fn invalidate(&mut self) {
        self.epoch += 1;
        self.pending_source = None;
        self.installed_source = None;
        self.asset_id = None;
        self.image = None;
    }
}

struct CachedPreview {
    fingerprint: StateFingerprint,
    raster: MockupRgba,
    report: MockupReport,
}

/// Single-owner driver of the preview: holds the catalog selection, the
/// placement and blend knobs, both image slots, and the last rendered
/// frame keyed by a state fingerprint.
///
/// All methods take `&mut self`; hosts call from one place. Image decoding
/// may still happen elsewhere: `begin_*_load` hands out a ticket, the host
/// decodes wherever it likes, and `complete_*_load` installs the pixels if
/// the ticket is still current.
pub struct PreviewController {
    catalog: GarmentCatalog,
    product_id: Option<String>,
    color: Option<String>,
    size: Option<String>,
    transform: ArtworkTransform,
    policy: PlacementPolicy,
    blend: BlendSpec,
    artwork_source: Option<String>,
    garment: ImageSlot,
    artwork: ImageSlot,
    backend: CpuCompositor,
    cache: Option<CachedPreview>,
}

impl PreviewController {
    /// Build a controller over a validated catalog, selecting its first
    /// product (with that product's first color and size) when present.
    pub fn new(catalog: GarmentCatalog) -> PrintmockResult<Self> {
        catalog.validate()?;
        let mut controller = Self {
            catalog,
            product_id: None,
            color: None,
            size: None,
            transform: ArtworkTransform::default(),
            policy: PlacementPolicy::default(),
            blend: BlendSpec::default(),
            artwork_source: None,
            garment: ImageSlot::default(),
            artwork: ImageSlot::default(),
            backend: CpuCompositor::new(),
            cache: None,
        };
        if let Some(first) = controller.catalog.products.first() {
            let id = first.id.clone();
            controller.select_product(&id)?;
        }
        Ok(controller)
    }

    /// The catalog this controller serves.
    pub fn catalog(&self) -> &GarmentCatalog {
        &self.catalog
    }

    /// Selected product id.
    pub fn product_id(&self) -> Option<&str> {
        self.product_id.as_deref()
    }

    /// Selected color name.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Selected size label.
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Current artwork placement state.
    pub fn transform(&self) -> ArtworkTransform {
        self.transform
    }

    /// Active placement policy.
    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// Current blend configuration.
    pub fn blend(&self) -> BlendSpec {
        self.blend
    }

    /// Source path of the current artwork, when one was requested.
    pub fn artwork_source(&self) -> Option<&str> {
        self.artwork_source.as_deref()
    }

    /// Colors offered by the selected product.
    pub fn color_options(&self) -> Vec<&str> {
        self.selected_product()
            .map(|p| p.color_options())
            .unwrap_or_default()
    }

    /// Sizes offered by the selected product.
    pub fn size_options(&self) -> Vec<&str> {
        self.selected_product()
            .map(|p| p.size_options())
            .unwrap_or_default()
    }

    /// True once a garment photo is installed.
    pub fn garment_ready(&self) -> bool {
        self.garment.image.is_some()
    }

    /// True once an artwork image is installed.
    pub fn artwork_ready(&self) -> bool {
        self.artwork.image.is_some()
    }

    /// Select a product by id. Color and size reset to the product's first
    /// offered options; placement and blend knobs are kept.
    pub fn select_product(&mut self, id: &str) -> PrintmockResult<()> {
        let product = self.catalog.product(id)?;
        if self.product_id.as_deref() == Some(id) {
            return Ok(());
        }
        let color = product.color_options().first().map(|s| (*s).to_string());
        let size = product.size_options().first().map(|s| (*s).to_string());
        tracing::debug!(product = id, ?color, ?size, "product selected");

        self.product_id = Some(id.to_string());
        self.color = color;
        self.size = size;
        self.refresh_garment_slot();
        Ok(())
    }

    /// Select a color offered by the current product.
    pub fn select_color(&mut self, color: &str) -> PrintmockResult<()> {
        let product = self.selected_product_or_err()?;
        if !product.color_options().contains(&color) {
            return Err(PrintmockError::validation(format!(
                "color '{color}' is not offered by product '{}'",
                product.id
            )));
        }
        if self.color.as_deref() == Some(color) {
            return Ok(());
        }
        self.color = Some(color.to_string());
        self.refresh_garment_slot();
        Ok(())
    }

    /// Select a size offered by the current product.
    pub fn select_size(&mut self, size: &str) -> PrintmockResult<()> {
        let product = self.selected_product_or_err()?;
        if !product.size_options().contains(&size) {
            return Err(PrintmockError::validation(format!(
                "size '{size}' is not offered by product '{}'",
                product.id
            )));
        }
        if self.size.as_deref() == Some(size) {
            return Ok(());
        }
        self.size = Some(size.to_string());
        self.refresh_garment_slot();
        Ok(())
    }

    /// Set the artwork scale. Clamped into the active policy band.
    pub fn set_scale(&mut self, scale: f64) {
        self.transform.scale = scale;
        self.transform = self.transform.clamped(self.policy);
    }

    /// Set the artwork center in canvas percent. Clamped to [0, 100].
    pub fn set_position(&mut self, x_percent: f64, y_percent: f64) {
        self.transform.x_percent = x_percent;
        self.transform.y_percent = y_percent;
        self.transform = self.transform.clamped(self.policy);
    }

    /// Toggle artwork color inversion.
    pub fn set_invert(&mut self, invert: bool) {
        self.transform.invert = invert;
    }

    /// Switch the placement policy, re-clamping the transform into the new
    /// policy's bands.
    pub fn set_placement_policy(&mut self, policy: PlacementPolicy) {
        self.policy = policy;
        self.transform = self.transform.clamped(policy);
    }

    /// Switch the automatic blend tier source.
    pub fn set_blend_source(&mut self, source: BlendSource) {
        self.blend.source = source;
    }

    /// Pin the blend tier, overriding automatic classification. The
    /// override persists until cleared.
    pub fn set_blend_override(&mut self, tier: BlendTier) {
        self.blend.manual = Some(tier);
    }

    /// Return to automatic tier classification.
    pub fn clear_blend_override(&mut self) {
        self.blend.manual = None;
    }

    /// Garment photo the current selection resolves to.
    pub fn current_garment_source(&self) -> Option<&str> {
        self.selected_product()?
            .garment_image(self.color.as_deref(), self.size.as_deref())
    }

    /// Start loading the garment photo for the current selection.
    ///
    /// Supersedes any earlier garment ticket.
    pub fn begin_garment_load(&mut self) -> PrintmockResult<LoadTicket> {
        let source = self
            .current_garment_source()
            .map(str::to_string)
            .ok_or_else(|| {
                PrintmockError::validation("selection has no garment photo to load")
            })?;
        let epoch = self.garment.begin(source.clone());
        Ok(LoadTicket { slot: LoadSlot::Garment, epoch, source })
    }

    /// Start loading an uploaded artwork from a store-relative path.
    ///
    /// Supersedes any earlier artwork ticket. Requesting a different
    /// source resets the placement transform to its defaults; reloading
    /// the current source (a re-upload, or the reload after a restore)
    /// keeps the user's adjustments.
    pub fn begin_artwork_load(&mut self, source: &str) -> PrintmockResult<LoadTicket> {
        let norm = normalize_rel_path(source)?;
        if self.artwork_source.as_deref() != Some(norm.as_str()) {
            self.transform = ArtworkTransform::default();
        }
        self.artwork_source = Some(norm.clone());
        let epoch = self.artwork.begin(norm.clone());
        Ok(LoadTicket { slot: LoadSlot::Artwork, epoch, source: norm })
    }

    /// Install a decoded garment photo if `ticket` is still current.
    pub fn complete_garment_load(
        &mut self,
        ticket: &LoadTicket,
        image: PreparedImage,
    ) -> PrintmockResult<LoadOutcome> {
        if ticket.slot != LoadSlot::Garment {
            return Err(PrintmockError::validation(
                "ticket does not belong to the garment slot",
            ));
        }
        if !self.garment.accepts(ticket) {
            tracing::debug!(source = %ticket.source, "garment load superseded");
            return Ok(LoadOutcome::Stale);
        }
        validate_prepared(&image)?;
        self.garment.install(ticket.source.clone(), image);
        self.cache = None;
        Ok(LoadOutcome::Installed)
    }

    /// Install a decoded artwork image if `ticket` is still current.
    pub fn complete_artwork_load(
        &mut self,
        ticket: &LoadTicket,
        image: PreparedImage,
    ) -> PrintmockResult<LoadOutcome> {
        if ticket.slot != LoadSlot::Artwork {
            return Err(PrintmockError::validation(
                "ticket does not belong to the artwork slot",
            ));
        }
        if !self.artwork.accepts(ticket) {
            tracing::debug!(source = %ticket.source, "artwork load superseded");
            return Ok(LoadOutcome::Stale);
        }
        validate_prepared(&image)?;
        self.artwork.install(ticket.source.clone(), image);
        self.cache = None;
        Ok(LoadOutcome::Installed)
    }

    /// Load the current garment photo synchronously through a store.
    pub fn load_garment_from_store(
        &mut self,
        store: &mut MockupAssetStore,
    ) -> PrintmockResult<LoadOutcome> {
        let ticket = self.begin_garment_load()?;
        let id = store.prepare(&ticket.source)?;
        let image = store.get(id)?.clone();
        self.complete_garment_load(&ticket, image)
    }

    /// Load an artwork synchronously through a store.
    pub fn load_artwork_from_store(
        &mut self,
        store: &mut MockupAssetStore,
        source: &str,
    ) -> PrintmockResult<LoadOutcome> {
        let ticket = self.begin_artwork_load(source)?;
        let id = store.prepare(&ticket.source)?;
        let image = store.get(id)?.clone();
        self.complete_artwork_load(&ticket, image)
    }

    /// Drop the current artwork; the preview returns to garment-less
    /// `None` until a new artwork is installed.
    pub fn clear_artwork(&mut self) {
        self.artwork_source = None;
        self.artwork.invalidate();
        self.cache = None;
    }

    /// Serializable snapshot of the current selection and knobs.
    pub fn snapshot(&self) -> PreviewState {
        PreviewState {
            product_id: self.product_id.clone(),
            color: self.color.clone(),
            size: self.size.clone(),
            artwork_source: self.artwork_source.clone(),
            transform: self.transform,
            policy: self.policy,
            blend: self.blend,
        }
    }

    /// Restore a snapshot.
    ///
    /// The product must exist in this catalog; a color or size the product
    /// no longer offers falls back to its first offered option. Finite
    /// out-of-band placement values are clamped. Installed images survive
    /// when their source still matches; anything else must be reloaded
    /// through `begin_*_load`.
    pub fn restore(&mut self, state: &PreviewState) -> PrintmockResult<()> {
        state.validate()?;

        let artwork_source = state
            .artwork_source
            .as_deref()
            .map(normalize_rel_path)
            .transpose()?;

        let (product_id, color, size) = match state.product_id.as_deref() {
            Some(id) => {
                let product = self.catalog.product(id)?;
                let colors = product.color_options();
                let sizes = product.size_options();
                let color = state
                    .color
                    .as_deref()
                    .filter(|c| colors.contains(c))
                    .map(str::to_string)
                    .or_else(|| colors.first().map(|s| (*s).to_string()));
                let size = state
                    .size
                    .as_deref()
                    .filter(|s| sizes.contains(s))
                    .map(str::to_string)
                    .or_else(|| sizes.first().map(|s| (*s).to_string()));
                (Some(id.to_string()), color, size)
            }
            None => (None, None, None),
        };

        self.product_id = product_id;
        self.color = color;
        self.size = size;
        self.policy = state.policy;
        self.transform = state.transform.clamped(state.policy);
        self.blend = state.blend;
        self.artwork_source = artwork_source;

        self.refresh_garment_slot();
        self.refresh_artwork_slot();
        self.cache = None;
        Ok(())
    }

    /// Render (or serve from cache) the preview for the current state.
    ///
    /// `None` until both a garment photo and an artwork are installed.
    /// Re-rendering is elided when nothing observable changed since the
    /// last call.
    pub fn preview(&mut self) -> PrintmockResult<Option<(&MockupRgba, &MockupReport)>> {
        let (Some(garment_id), Some(artwork_id)) =
            (self.garment.asset_id, self.artwork.asset_id)
        else {
            return Ok(None);
        };
        let (Some(garment), Some(artwork)) =
            (self.garment.image.clone(), self.artwork.image.clone())
        else {
            return Ok(None);
        };

        let params = self.compose_params();
        let fingerprint = fingerprint_state(garment_id, artwork_id, &params);
        let hit = self.cache.as_ref().is_some_and(|c| c.fingerprint == fingerprint);
        if !hit {
            tracing::debug!("preview state changed; rendering");
            let (raster, report) = render_mockup_with_report(
                &mut self.backend,
                &garment,
                Some(&artwork),
                &params,
            )?;
            self.cache = Some(CachedPreview { fingerprint, raster, report });
        }
        Ok(self.cache.as_ref().map(|c| (&c.raster, &c.report)))
    }

    /// Pipeline parameters for the current state.
    pub fn compose_params(&self) -> MockupParams {
        MockupParams {
            transform: self.transform,
            policy: self.policy,
            blend: self.blend,
            color_name: self.color.clone(),
        }
    }

    fn selected_product(&self) -> Option<&Product> {
        let id = self.product_id.as_deref()?;
        self.catalog.product(id).ok()
    }

    fn selected_product_or_err(&self) -> PrintmockResult<&Product> {
        let id = self
            .product_id
            .as_deref()
            .ok_or_else(|| PrintmockError::validation("no product selected"))?;
        self.catalog.product(id)
    }

    fn refresh_garment_slot(&mut self) {
        let want = self.current_garment_source().map(str::to_string);
        if !self.garment.is_current_for(want.as_deref()) {
            self.garment.invalidate();
            self.cache = None;
        }
    }

    fn refresh_artwork_slot(&mut self) {
        let want = self.artwork_source.clone();
        if !self.artwork.is_current_for(want.as_deref()) {
            self.artwork.invalidate();
            self.cache = None;
        }
    }
}

fn validate_prepared(image: &PreparedImage) -> PrintmockResult<()> {
    if image.width == 0 || image.height == 0 {
        return Err(PrintmockError::validation("prepared image has zero dimensions"));
    }
    let expected = image.width as usize * image.height as usize * 4;
    if image.rgba8_premul.len() != expected {
        return Err(PrintmockError::validation(format!(
            "prepared image buffer holds {} bytes, expected {expected}",
            image.rgba8_premul.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/controller/preview.rs"]
mod tests;
