use super::*;

#[test]
fn widen_then_narrow_is_lossless() {
    for v in 0..=255u8 {
        assert_eq!(narrow16(widen8(v)), v);
    }
    assert_eq!(widen8(0xab), 0xabab);
    assert_eq!(widen8(0xff), 0xffff);
}

#[test]
fn ycbcr_neutral_points() {
    assert_eq!(rgb_to_ycbcr([0, 0, 0]), [0, 128, 128]);
    assert_eq!(rgb_to_ycbcr([255, 255, 255]), [255, 128, 128]);
    assert_eq!(ycbcr_to_rgb([0, 128, 128]), [0, 0, 0]);
    assert_eq!(ycbcr_to_rgb([255, 128, 128]), [255, 255, 255]);
}

#[test]
fn grays_roundtrip_through_ycbcr() {
    for v in 0..=255u8 {
        let ycc = rgb_to_ycbcr([v, v, v]);
        assert_eq!(ycc, [v, 128, 128]);
        assert_eq!(ycbcr_to_rgb(ycc), [v, v, v]);
    }
}

#[test]
fn ycbcr_to_rgb_saturates_out_of_gamut() {
    let [r, g, b] = ycbcr_to_rgb([255, 255, 255]);
    assert_eq!(r, 255);
    assert_eq!(b, 255);
    assert!(g < 255);

    let [r, _, b] = ycbcr_to_rgb([0, 0, 0]);
    assert_eq!(r, 0);
    assert_eq!(b, 0);
}

#[test]
fn sample_ycbcr_helpers_use_high_bytes() {
    let px: Rgba16 = [0x80ff, 0x8000, 0x8012, 0x1234];
    assert_eq!(ycbcr_of(px), rgb_to_ycbcr([0x80, 0x80, 0x80]));
    assert_eq!(from_ycbcr([0x80, 128, 128], 0x1234), [0x8080, 0x8080, 0x8080, 0x1234]);
}

#[test]
fn mul_div_ffff_full_scale_is_identity() {
    assert_eq!(mul_div_ffff(0x1234, 0xffff), 0x1234);
    assert_eq!(mul_div_ffff(0xffff, 0), 0);
}
