use super::*;

fn gradient(width: u32, height: u32) -> PixelBuffer {
    let mut buf = PixelBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            buf.set(x, y, [(x * 1000) as u16, (y * 1000) as u16, 0x8000, 0xffff]);
        }
    }
    buf
}

#[test]
fn new_buffer_is_transparent() {
    let buf = PixelBuffer::new(3, 2);
    assert_eq!(buf.stride(), 12);
    for y in 0..2 {
        assert!(buf.row(y).iter().all(|&v| v == 0));
    }
}

#[test]
fn rgba8_widens_and_roundtrips() {
    let bytes = [0u8, 0x7f, 0x80, 0xff, 1, 2, 3, 4];
    let buf = PixelBuffer::from_rgba8(2, 1, &bytes).unwrap();
    assert_eq!(buf.get(0, 0), [0x0000, 0x7f7f, 0x8080, 0xffff]);
    assert_eq!(buf.to_rgba8(), bytes.to_vec());
}

#[test]
fn rgba8_length_mismatch_is_rejected() {
    assert!(PixelBuffer::from_rgba8(2, 2, &[0u8; 15]).is_err());
    assert!(PixelBuffer::from_rgba16(1, 1, vec![0u16; 3]).is_err());
}

#[test]
fn padded_stride_keeps_padding_out_of_rows() {
    let mut buf = PixelBuffer::with_stride(2, 2, 12).unwrap();
    buf.fill_rows(0, 2, [1, 2, 3, 4]);
    assert_eq!(buf.row(1), &[1, 2, 3, 4, 1, 2, 3, 4]);
    assert!(PixelBuffer::with_stride(2, 2, 7).is_err());
}

#[test]
fn copy_from_handles_mismatched_strides() {
    let src = gradient(3, 3);
    let mut dst = PixelBuffer::with_stride(3, 3, 16).unwrap();
    dst.copy_from(&src).unwrap();
    for y in 0..3 {
        assert_eq!(dst.row(y), src.row(y));
    }
    assert!(PixelBuffer::new(2, 3).copy_from(&src).is_err());
}

#[test]
fn read_write_rect_roundtrip() {
    let src = gradient(4, 4);
    let rect = PixelRect::new(1, 1, 2, 3);
    let pixels = src.read_rect(rect).unwrap();
    assert_eq!(pixels.len(), 6);
    assert_eq!(pixels[0], src.get(1, 1));
    assert_eq!(pixels[5], src.get(2, 3));

    let mut dst = PixelBuffer::new(4, 4);
    dst.write_rect(rect, &pixels).unwrap();
    assert_eq!(dst.get(2, 3), src.get(2, 3));
    assert_eq!(dst.get(0, 0), [0, 0, 0, 0]);

    assert!(src.read_rect(PixelRect::new(3, 3, 2, 1)).is_err());
    assert!(dst.write_rect(rect, &pixels[..5]).is_err());
}

#[test]
fn fill_rows_is_clamped() {
    let mut buf = gradient(2, 4);
    buf.fill_rows(2, 10, [0, 0, 0, 0]);
    assert_eq!(buf.get(1, 1), [1000, 1000, 0x8000, 0xffff]);
    assert_eq!(buf.get(1, 2), [0, 0, 0, 0]);
    assert_eq!(buf.get(0, 3), [0, 0, 0, 0]);
}

#[test]
fn rect_contains_is_half_open() {
    let r = PixelRect::square(2, 2, 2);
    assert!(r.contains(2, 2));
    assert!(r.contains(3, 3));
    assert!(!r.contains(4, 3));
    assert!(!r.contains(1, 2));
    assert!(PixelRect::new(0, 0, 0, 3).is_empty());
}

#[test]
fn to_image_formats_truncate_and_drop_alpha() {
    let mut buf = PixelBuffer::new(1, 1);
    buf.set(0, 0, [0x12ff, 0x3400, 0x56aa, 0x7801]);

    let rgba = buf.to_image(OutputFormat::Rgba8).to_rgba8();
    assert_eq!(rgba.get_pixel(0, 0).0, [0x12, 0x34, 0x56, 0x78]);

    let rgb = buf.to_image(OutputFormat::Rgb8);
    assert!(!rgb.color().has_alpha());
    assert_eq!(rgb.to_rgb8().get_pixel(0, 0).0, [0x12, 0x34, 0x56]);

    let wide = buf.to_image(OutputFormat::Rgba16).to_rgba16();
    assert_eq!(wide.get_pixel(0, 0).0, [0x12ff, 0x3400, 0x56aa, 0x7801]);
}

#[test]
fn from_image_widens_8bit_sources() {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        2,
        1,
        image::Rgb([0x10, 0x20, 0x30]),
    ));
    let buf = PixelBuffer::from_image(&img);
    assert_eq!((buf.width(), buf.height()), (2, 1));
    assert_eq!(buf.get(1, 0), [0x1010, 0x2020, 0x3030, 0xffff]);
}
