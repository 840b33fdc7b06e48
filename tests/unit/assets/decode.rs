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
    assert_eq!((prepared.width, prepared.height), (1, 1));
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
fn svg_is_rasterized_to_the_requested_edge() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="10"><rect width="20" height="10" fill="#ff0000"/></svg>"##;
    let img = decode_svg(svg, 64).unwrap();
    assert_eq!((img.width, img.height), (64, 32));
    assert_eq!(&img.rgba8_premul[..4], &[255, 0, 0, 255]);

    assert!(decode_svg(b"<svg", 64).is_err());
}

#[test]
fn garbage_bytes_are_not_an_image() {
    assert!(decode_image(b"definitely not a png").is_err());
}

#[test]
fn solid_images_are_premultiplied() {
    let img = PreparedImage::solid(2, 3, [255, 255, 255, 0]);
    assert_eq!(img.rgba8_premul.len(), 2 * 3 * 4);
    assert!(img.rgba8_premul.iter().all(|b| *b == 0));
}
