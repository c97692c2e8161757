use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RecorderError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        RecorderError::context("x")
            .to_string()
            .contains("context error:")
    );
    assert!(
        RecorderError::unknown_method("drawThing")
            .to_string()
            .contains("unknown method: drawThing")
    );
    assert!(
        RecorderError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RecorderError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
