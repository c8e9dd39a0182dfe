use xxhash_rust::xxh3::Xxh3;

use crate::{
    assets::store::AssetId,
    mockup::model::{BlendSource, BlendTier, MockupParams, PlacementPolicy},
};

const XXH3_SEED: u64 = 0x6d0c_41f3_9a72_e58b;

/// Stable 128-bit digest of the render-relevant preview state.
///
/// Equal fingerprints mean a recomposite would produce byte-identical
/// output, so callers may serve a cached raster instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateFingerprint {
    /// High 64 bits of the digest.
    pub hi: u64,
    /// Low 64 bits of the digest.
    pub lo: u64,
}

/// Fingerprint the installed images plus every parameter that shapes the
/// composite.
pub fn fingerprint_state(
    garment: AssetId,
    artwork: AssetId,
    params: &MockupParams,
) -> StateFingerprint {
    let mut h = StableHasher::new();
    h.write_u64(garment.as_u64());
    h.write_u64(artwork.as_u64());
    write_params(&mut h, params);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> StateFingerprint {
        let v = self.inner.digest128();
        StateFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_params(h: &mut StableHasher, p: &MockupParams) {
    h.write_f64(p.transform.scale);
    h.write_f64(p.transform.x_percent);
    h.write_f64(p.transform.y_percent);
    h.write_bool(p.transform.invert);

    h.write_u8(match p.policy {
        PlacementPolicy::AutoFit => 0,
        PlacementPolicy::Anchored => 1,
    });
    h.write_u8(match p.blend.source {
        BlendSource::Sampled => 0,
        BlendSource::ColorName => 1,
    });
    match p.blend.manual {
        None => h.write_u8(0),
        Some(tier) => {
            h.write_u8(1);
            write_tier(h, tier);
        }
    }
    match &p.color_name {
        None => h.write_u8(0),
        Some(name) => {
            h.write_u8(1);
            h.write_u32(name.len() as u32);
            h.write_bytes(name.as_bytes());
        }
    }
}

fn write_tier(h: &mut StableHasher, t: BlendTier) {
    h.write_u8(match t {
        BlendTier::Light => 0,
        BlendTier::Mid => 1,
        BlendTier::Dark => 2,
    });
}
