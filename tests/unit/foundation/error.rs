use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlitchError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        GlitchError::image_too_small("x")
            .to_string()
            .contains("image too small:")
    );
    assert!(GlitchError::Cancelled.to_string().contains("cancelled"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlitchError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
