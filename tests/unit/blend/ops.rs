use super::*;

const SAMPLES: [Rgba16; 6] = [
    [0, 0, 0, 0],
    [0xffff, 0xffff, 0xffff, 0xffff],
    [0x1234, 0x8000, 0xfedc, 0xffff],
    [0x4000, 0x2000, 0x1000, 0x8000],
    [0xffff, 0, 0x7777, 0x0101],
    [0x0f0f, 0xf0f0, 0x00ff, 0xff00],
];

#[test]
fn registry_names_resolve_both_ways() {
    for op in BlendOp::ALL {
        assert_eq!(BlendOp::from_name(op.name()), Some(op));
        assert_eq!(op.to_string(), op.name());
    }
    assert_eq!(BlendOp::from_name("compose"), Some(BlendOp::Compose));
    assert_eq!(BlendOp::from_name("replace"), Some(BlendOp::Replace));
    assert_eq!(BlendOp::from_name("nope"), None);
    assert!(matches!(
        "nope".parse::<BlendOp>(),
        Err(GlitchError::Configuration(_))
    ));
    assert_eq!(BlendOp::names().len(), 9);
}

#[test]
fn replace_returns_src_for_any_dst() {
    for dst in SAMPLES {
        for src in SAMPLES {
            assert_eq!(BlendOp::Replace.apply(dst, src), src);
        }
    }
}

#[test]
fn compose_opaque_src_overwrites_exactly() {
    for dst in SAMPLES {
        let src = [0x1357, 0x2468, 0x9abc, 0xffff];
        assert_eq!(BlendOp::Compose.apply(dst, src), src);
    }
}

#[test]
fn compose_transparent_over_transparent_is_transparent() {
    assert_eq!(BlendOp::Compose.apply([0; 4], [0xffff, 0, 0, 0]), [0; 4]);
}

#[test]
fn compose_half_alpha_over_opaque_mixes() {
    let dst = [0, 0, 0, 0xffff];
    let src = [0xffff, 0xffff, 0xffff, 0x8000];
    let out = BlendOp::Compose.apply(dst, src);
    assert_eq!(out[3], 0xffff);
    assert!(out[0] > 0x7f00 && out[0] < 0x8100);
}

#[test]
fn add_saturates_and_addrgbm_wraps() {
    let dst = [0xc000, 0x0000, 0x1000, 0xffff];
    let src = [0x8000, 0x1000, 0x1000, 0xffff];
    assert_eq!(BlendOp::Add.apply(dst, src), [0xffff, 0x1000, 0x2000, 0xffff]);
    assert_eq!(
        BlendOp::AddRgbMod.apply(dst, src),
        [0x4000, 0x1000, 0x2000, 0xffff]
    );
}

#[test]
fn add_over_transparent_dst_keeps_src() {
    let src = [0x1111, 0x2222, 0x3333, 0xffff];
    assert_eq!(BlendOp::Add.apply([0xffff, 0xffff, 0xffff, 0], src), src);
}

#[test]
fn mulrgb_with_white_is_identity_for_opaque() {
    let white = [0xffff, 0xffff, 0xffff, 0xffff];
    let src = [0x1234, 0x5678, 0x9abc, 0xffff];
    assert_eq!(BlendOp::MulRgb.apply(white, src), src);
    assert_eq!(BlendOp::MulRgb.apply([0, 0, 0, 0xffff], src), [0, 0, 0, 0xffff]);
}

#[test]
fn xorrgb_with_itself_is_black() {
    let px = [0x1234, 0x5678, 0x9abc, 0xffff];
    assert_eq!(BlendOp::XorRgb.apply(px, px), [0, 0, 0, 0xffff]);
}

#[test]
fn ycc_ops_keep_opaque_grays_gray() {
    let gray = [0x8080, 0x8080, 0x8080, 0xffff];
    let black = [0, 0, 0, 0xffff];

    // 0x80 + 0x80 wraps to 0; neutral chroma stays neutral.
    assert_eq!(BlendOp::AddYccMod.apply(gray, gray), black);
    assert_eq!(BlendOp::XorYcc.apply(gray, gray), black);
    // 128 * 128 / 255 = 64.
    assert_eq!(
        BlendOp::MulYcc.apply(gray, gray),
        [0x4040, 0x4040, 0x4040, 0xffff]
    );
}

#[test]
fn every_op_keeps_full_opacity() {
    for op in BlendOp::ALL {
        for dst in SAMPLES.iter().filter(|p| p[3] == 0xffff) {
            for src in SAMPLES.iter().filter(|p| p[3] == 0xffff) {
                assert_eq!(op.apply(*dst, *src)[3], 0xffff, "{op}");
            }
        }
    }
}

#[test]
fn ycc_ops_ignore_rgb_hidden_under_zero_alpha() {
    let gray = [0x4040, 0x4040, 0x4040, 0xffff];
    for op in [BlendOp::AddYccMod, BlendOp::MulYcc, BlendOp::XorYcc] {
        let expected = op.apply([0, 0, 0, 0], gray);
        for hidden in [0x1234, 0x8000, 0xffff] {
            let dst = [hidden, hidden, hidden, 0];
            assert_eq!(op.apply(dst, gray), expected, "{op} dst {hidden:#x}");
            assert_eq!(op.apply(gray, dst), op.apply(gray, [0, 0, 0, 0]), "{op} src {hidden:#x}");
        }
    }
    // Transparent destination reads as black: 0x40 + 0 keeps the source luma.
    assert_eq!(BlendOp::AddYccMod.apply([0xffff, 0xffff, 0xffff, 0], gray), gray);
}
