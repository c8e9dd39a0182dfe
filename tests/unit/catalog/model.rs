use super::*;

fn tee_catalog() -> GarmentCatalog {
    GarmentCatalog::from_json_slice(
        br#"{
            "products": [
                {
                    "id": "tee-classic",
                    "title": "Classic Tee",
                    "description": "Midweight cotton tee.",
                    "image": "garments/tee_classic.png",
                    "variants": [
                        { "id": "v1", "color": "Black Heather", "size": "S", "image": "garments/tee_black.png" },
                        { "id": "v2", "color": "Black Heather", "size": "M", "image": "garments/tee_black.png" },
                        { "id": "v3", "color": "Vintage White", "size": "M" },
                        { "id": "v4", "color": "Vintage White", "size": "L" }
                    ]
                },
                {
                    "id": "hoodie-heavy",
                    "title": "Heavy Hoodie",
                    "image": "garments/hoodie.png",
                    "variants": []
                }
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn parses_and_indexes_products() {
    let catalog = tee_catalog();
    assert_eq!(catalog.products.len(), 2);
    let tee = catalog.product("tee-classic").unwrap();
    assert_eq!(tee.title, "Classic Tee");
    assert!(matches!(
        catalog.product("mug").unwrap_err(),
        PrintmockError::Validation(_)
    ));
}

#[test]
fn options_are_distinct_in_first_seen_order() {
    let catalog = tee_catalog();
    let tee = catalog.product("tee-classic").unwrap();
    assert_eq!(tee.color_options(), vec!["Black Heather", "Vintage White"]);
    assert_eq!(tee.size_options(), vec!["S", "M", "L"]);

    let hoodie = catalog.product("hoodie-heavy").unwrap();
    assert!(hoodie.color_options().is_empty());
}

#[test]
fn variant_resolution_matches_provided_filters_only() {
    let catalog = tee_catalog();
    let tee = catalog.product("tee-classic").unwrap();

    let both = tee.resolve_variant(Some("Vintage White"), Some("L")).unwrap();
    assert_eq!(both.id, "v4");

    // Color alone matches the first variant of that color.
    let color_only = tee.resolve_variant(Some("Black Heather"), None).unwrap();
    assert_eq!(color_only.id, "v1");

    // No filters means the first variant.
    assert_eq!(tee.resolve_variant(None, None).unwrap().id, "v1");

    assert!(tee.resolve_variant(Some("Black Heather"), Some("L")).is_none());
}

#[test]
fn garment_image_prefers_the_variant_photo() {
    let catalog = tee_catalog();
    let tee = catalog.product("tee-classic").unwrap();

    assert_eq!(
        tee.garment_image(Some("Black Heather"), Some("S")),
        Some("garments/tee_black.png")
    );
    // v3 has no photo of its own.
    assert_eq!(
        tee.garment_image(Some("Vintage White"), Some("M")),
        Some("garments/tee_classic.png")
    );
    // No variant matched: still the product photo.
    assert_eq!(
        tee.garment_image(Some("Neon"), None),
        Some("garments/tee_classic.png")
    );
}

#[test]
fn extra_commerce_fields_are_tolerated() {
    let catalog = GarmentCatalog::from_json_slice(
        br#"{
            "products": [{
                "id": "tee",
                "title": "Tee",
                "image": "garments/tee.png",
                "vendor": "acme",
                "variants": [
                    { "id": "v1", "color": "Sand", "size": "M", "price": "24.00", "currency": "EUR" }
                ]
            }]
        }"#,
    )
    .unwrap();
    assert_eq!(catalog.products[0].variants[0].color.as_deref(), Some("Sand"));
}

#[test]
fn validation_rejects_broken_catalogs() {
    let dup = br#"{"products": [
        {"id": "a", "title": "A"},
        {"id": "a", "title": "Again"}
    ]}"#;
    assert!(matches!(
        GarmentCatalog::from_json_slice(dup).unwrap_err(),
        PrintmockError::Validation(_)
    ));

    let absolute_image = br#"{"products": [
        {"id": "a", "title": "A", "image": "/srv/shared/tee.png"}
    ]}"#;
    assert!(matches!(
        GarmentCatalog::from_json_slice(absolute_image).unwrap_err(),
        PrintmockError::Validation(_)
    ));

    let unnamed_variant = br#"{"products": [
        {"id": "a", "title": "A", "variants": [{"id": ""}]}
    ]}"#;
    assert!(matches!(
        GarmentCatalog::from_json_slice(unnamed_variant).unwrap_err(),
        PrintmockError::Validation(_)
    ));

    let garbage = b"not json";
    assert!(matches!(
        GarmentCatalog::from_json_slice(garbage).unwrap_err(),
        PrintmockError::Serde(_)
    ));
}
