use std::io::Cursor;

use super::*;

#[test]
fn normalize_rel_path_cleans_segments() {
    assert_eq!(normalize_rel_path("a/./b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b\\c.jpg").unwrap(), "a/b/c.jpg");
    assert_eq!(normalize_rel_path("./shirt.png").unwrap(), "shirt.png");
}

#[test]
fn normalize_rel_path_rejects_escapes() {
    assert!(normalize_rel_path("/abs/path.png").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("a/../b.png").is_err());
    assert!(normalize_rel_path("").is_err());
    assert!(normalize_rel_path("./.").is_err());
}

#[test]
fn asset_ids_are_stable_and_kind_tagged() {
    let a = hash_id_for_source("shirts/black.png");
    let b = hash_id_for_source("shirts/black.png");
    assert_eq!(a, b);

    // Same path stem, different kind dispatch, different id.
    assert_ne!(
        hash_id_for_source("logo.png").as_u64(),
        hash_id_for_source("logo.svg").as_u64()
    );
}

#[test]
fn lookups_on_empty_store_are_evaluation_errors() {
    let store = MockupAssetStore::new("assets");
    assert!(matches!(
        store.id_for_source("missing.png").unwrap_err(),
        PrintmockError::Evaluation(_)
    ));
    assert!(matches!(
        store.get(AssetId::from_u64(7)).unwrap_err(),
        PrintmockError::Evaluation(_)
    ));
}

#[test]
fn prepare_decodes_once_and_reuses_the_id() {
    let dir = std::env::temp_dir().join(format!("printmock_store_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.join("garment.png"), &buf).unwrap();

    let mut store = MockupAssetStore::new(&dir);
    let id = store.prepare("garment.png").unwrap();
    assert_eq!(store.prepare("garment.png").unwrap(), id);
    assert_eq!(store.id_for_source("./garment.png").unwrap(), id);

    let prepared = store.get(id).unwrap();
    assert_eq!(prepared.width, 3);
    assert_eq!(prepared.height, 2);

    std::fs::remove_dir_all(&dir).ok();
}
