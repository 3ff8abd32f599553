use super::*;

#[test]
fn rejects_wrong_pixel_count() {
    let err = Frame::from_pixels(2, 2, vec![Rgba8::WHITE; 3]).unwrap_err();
    assert!(matches!(err, VinciError::Validation(_)));
    assert!(Frame::filled(0, 4, Rgba8::WHITE).is_err());
    assert!(Frame::from_rgba8_bytes(1, 1, &[1, 2, 3]).is_err());
}

#[test]
fn pixel_lookup_is_top_down() {
    let f = Frame::from_rgba8_bytes(2, 2, &[1, 0, 0, 255, 2, 0, 0, 255, 3, 0, 0, 255, 4, 0, 0, 255])
        .unwrap();
    assert_eq!(f.pixel(0, 0).unwrap().r, 1);
    assert_eq!(f.pixel(1, 0).unwrap().r, 2);
    assert_eq!(f.pixel(0, 1).unwrap().r, 3);
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.to_rgba8_bytes()[12..], [4, 0, 0, 255]);
}

#[test]
fn json_pixel_array_needs_caller_dimensions() {
    let json = "[[0,0,0,255],[255,255,255,255]]";
    let f = Frame::from_json_reader(json.as_bytes(), 2, 1).unwrap();
    assert_eq!(f.pixels(), &[Rgba8::new(0, 0, 0, 255), Rgba8::WHITE]);

    let err = Frame::from_json_reader(json.as_bytes(), 1, 1).unwrap_err();
    assert!(matches!(err, VinciError::Validation(_)));
    let err = Frame::from_json_reader("[[0,0,0]]".as_bytes(), 1, 1).unwrap_err();
    assert!(matches!(err, VinciError::Serde(_)));
}

#[test]
fn png_bytes_decode_to_straight_rgba() {
    let img = image::RgbaImage::from_raw(1, 2, vec![10, 20, 30, 128, 40, 50, 60, 255]).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let f = Frame::from_image_bytes(&buf).unwrap();
    assert_eq!((f.width(), f.height()), (1, 2));
    assert_eq!(f.pixel(0, 0), Some(Rgba8::new(10, 20, 30, 128)));
    assert_eq!(f.pixel(0, 1), Some(Rgba8::new(40, 50, 60, 255)));
}

#[test]
fn garbage_bytes_are_an_error() {
    assert!(matches!(
        Frame::from_image_bytes(b"not an image").unwrap_err(),
        VinciError::Other(_)
    ));
}
