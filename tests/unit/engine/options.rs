use super::*;

fn with(f: impl FnOnce(&mut GlitchOptions)) -> GlitchOptions {
    let mut opts = GlitchOptions::default();
    f(&mut opts);
    opts
}

#[test]
fn defaults_are_valid() {
    let opts = GlitchOptions::default();
    opts.validate().unwrap();
    assert_eq!(opts.block_size, 16);
    assert_eq!((opts.min_iterations, opts.max_iterations), (10, 10));
    assert_eq!(opts.filter_kinds().unwrap().len(), 22);
    assert_eq!(opts.blend_ops().unwrap().len(), 9);
}

#[test]
fn bounds_are_checked() {
    let bad = [
        with(|o| o.block_size = 0),
        with(|o| o.min_segment_size = -0.1),
        with(|o| o.max_segment_size = 1.5),
        with(|o| o.min_segment_size = f64::NAN),
        with(|o| {
            o.min_segment_size = 0.5;
            o.max_segment_size = 0.4;
        }),
        with(|o| o.min_filters = 0),
        with(|o| o.max_filters = 0),
        with(|o| o.min_iterations = 11),
    ];
    for opts in bad {
        assert!(
            matches!(opts.validate(), Err(GlitchError::Configuration(_))),
            "{opts:?}"
        );
    }
    with(|o| {
        o.min_iterations = 0;
        o.max_iterations = 0;
        o.min_segment_size = 1.0;
        o.max_segment_size = 1.0;
    })
    .validate()
    .unwrap();
}

#[test]
fn allow_lists_resolve_names_and_aliases() {
    let opts = with(|o| {
        o.filters = Some(vec!["inv".into(), "bit-rasp".into(), "inv".into()]);
        o.ops = Some(vec!["replace".into(), "xorycc".into()]);
    });
    opts.validate().unwrap();
    assert_eq!(
        opts.filter_kinds().unwrap(),
        vec![FilterKind::Inv, FilterKind::BitRasp, FilterKind::Inv]
    );
    assert_eq!(
        opts.blend_ops().unwrap(),
        vec![BlendOp::Replace, BlendOp::XorYcc]
    );
}

#[test]
fn unknown_or_empty_allow_lists_are_rejected() {
    let err = with(|o| o.filters = Some(vec!["blur".into()]))
        .validate()
        .unwrap_err();
    assert_eq!(err.to_string(), "configuration error: unknown filter: blur");

    let err = with(|o| o.ops = Some(vec!["screen".into()]))
        .validate()
        .unwrap_err();
    assert_eq!(err.to_string(), "configuration error: unknown op: screen");

    assert!(matches!(
        with(|o| o.ops = Some(vec![])).validate(),
        Err(GlitchError::Configuration(_))
    ));
}

#[test]
fn partial_json_fills_defaults() {
    let opts: GlitchOptions =
        serde_json::from_str(r#"{"block_size": 8, "filters": ["gs"]}"#).unwrap();
    assert_eq!(opts.block_size, 8);
    assert_eq!(opts.max_segment_size, 0.2);
    assert_eq!(opts.filters, Some(vec!["gs".to_string()]));
    assert_eq!(opts.ops, None);
}
