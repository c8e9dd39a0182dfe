use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    assets::decode,
    foundation::core::Canvas,
    foundation::error::{PrintmockError, PrintmockResult},
    foundation::math::Fnv1a64,
};

#[derive(Clone, Debug)]
/// Prepared raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Dimensions as a [`Canvas`].
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Stable hashed identifier for a prepared image.
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Construct an [`AssetId`] from a raw 64-bit value.
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Access the raw 64-bit identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
/// Store of decoded garment/artwork images keyed by normalized source path.
///
/// IO and decoding are front-loaded here so evaluation and rendering stay
/// deterministic and IO-free.
pub struct MockupAssetStore {
    root: PathBuf,
    ids_by_source: HashMap<String, AssetId>,
    images_by_id: HashMap<AssetId, PreparedImage>,
}

impl MockupAssetStore {
    /// Create an empty store resolving relative sources under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ids_by_source: HashMap::new(),
            images_by_id: HashMap::new(),
        }
    }

    /// Root directory used when resolving relative source paths.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read, decode, and retain the image at `source`, returning its id.
    ///
    /// Preparing the same source twice is a no-op returning the same id.
    pub fn prepare(&mut self, source: &str) -> PrintmockResult<AssetId> {
        let norm = normalize_rel_path(source)?;
        if let Some(id) = self.ids_by_source.get(&norm) {
            return Ok(*id);
        }

        let bytes = self.read_bytes(&norm)?;
        let image = decode::decode_artwork(&norm, &bytes)?;
        let id = hash_id_for_source(&norm);
        self.ids_by_source.insert(norm, id);
        self.images_by_id.insert(id, image);
        Ok(id)
    }

    /// Lookup the prepared [`AssetId`] for a source path.
    pub fn id_for_source(&self, source: &str) -> PrintmockResult<AssetId> {
        let norm = normalize_rel_path(source)?;
        self.ids_by_source
            .get(&norm)
            .copied()
            .ok_or_else(|| PrintmockError::evaluation(format!("unprepared source '{norm}'")))
    }

    /// Lookup a prepared image by [`AssetId`].
    pub fn get(&self, id: AssetId) -> PrintmockResult<&PreparedImage> {
        self.images_by_id
            .get(&id)
            .ok_or_else(|| PrintmockError::evaluation(format!("unknown AssetId {}", id.as_u64())))
    }

    fn read_bytes(&self, norm_path: &str) -> PrintmockResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_path));
        std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))
            .map_err(PrintmockError::from)
    }
}

pub(crate) fn hash_id_for_source(norm_path: &str) -> AssetId {
    let kind_tag = if decode::is_svg_source(norm_path) {
        b'S'
    } else {
        b'I'
    };
    let mut hasher = Fnv1a64::new_default();
    hasher.write_u8(kind_tag);
    hasher.write_bytes(norm_path.as_bytes());
    hasher.write_u8(0);
    AssetId(hasher.finish())
}

/// Normalize and validate store-relative image source paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> PrintmockResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PrintmockError::validation("image paths must be relative"));
    }
    if s.is_empty() {
        return Err(PrintmockError::validation("image path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PrintmockError::validation("image paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PrintmockError::validation(
            "image path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
