use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_image_garbage_is_decode_error() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, PrintmockError::Decode(_)));
}

#[test]
fn rasterize_svg_solid_rect() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="2" height="2" fill="#ff0000"/></svg>"##;
    let prepared = rasterize_svg(svg).unwrap();
    assert_eq!(prepared.width, 2);
    assert_eq!(prepared.height, 2);
    for px in prepared.rgba8_premul.chunks_exact(4) {
        assert_eq!(px, &[255, 0, 0, 255]);
    }
}

#[test]
fn rasterize_svg_truncated_is_decode_error() {
    let err = rasterize_svg(b"<svg").unwrap_err();
    assert!(matches!(err, PrintmockError::Decode(_)));
}

#[test]
fn artwork_dispatch_uses_svg_extension() {
    assert!(is_svg_source("logo.svg"));
    assert!(is_svg_source("uploads/logo.SVG"));
    assert!(!is_svg_source("logo.png"));
    assert!(!is_svg_source("logo"));

    // An .svg source with non-SVG bytes must fail through the SVG path.
    assert!(decode_artwork("logo.svg", b"not svg").is_err());
}
