use super::*;
use crate::blend::ops::BlendOp;
use crate::filters::kind::FilterKind;

#[test]
fn preset_names_resolve() {
    for preset in Preset::ALL {
        for name in preset.filters() {
            assert!(FilterKind::from_name(name).is_some(), "{preset}: {name}");
        }
        for name in preset.ops() {
            assert!(BlendOp::from_name(name).is_some(), "{preset}: {name}");
        }
        assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
    }
    assert!("wild".parse::<Preset>().is_err());
}

#[test]
fn apply_replaces_both_lists() {
    let mut opts = GlitchOptions {
        filters: Some(vec!["mix".into()]),
        ..GlitchOptions::default()
    };
    Preset::NoColorShift.apply_to(&mut opts);
    opts.validate().unwrap();
    assert_eq!(opts.filter_kinds().unwrap().len(), 10);
    assert!(!opts.filter_kinds().unwrap().contains(&FilterKind::Mix));
    assert_eq!(opts.blend_ops().unwrap().len(), 7);
}

#[test]
fn tame_skips_modular_sums() {
    let mut opts = GlitchOptions::default();
    Preset::Tame.apply_to(&mut opts);
    let ops = opts.blend_ops().unwrap();
    assert!(!ops.contains(&BlendOp::AddRgbMod));
    assert!(!ops.contains(&BlendOp::AddYccMod));
    assert_eq!(opts.filter_kinds().unwrap().len(), 19);
}
