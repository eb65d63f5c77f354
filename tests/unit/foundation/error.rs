use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SvgBurstError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        SvgBurstError::malformed_frame("x")
            .to_string()
            .contains("malformed frame:")
    );
    assert!(
        SvgBurstError::assembly("x")
            .to_string()
            .contains("assembly error:")
    );
    assert!(
        SvgBurstError::export("x")
            .to_string()
            .contains("export error:")
    );
    assert!(
        SvgBurstError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SvgBurstError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn user_message_hides_internal_failures() {
    assert_eq!(
        SvgBurstError::malformed_frame("frame 3: missing viewBox").user_message(),
        CREATION_PROBLEM
    );
    assert_eq!(
        SvgBurstError::export("ffmpeg exited with status 1").user_message(),
        CREATION_PROBLEM
    );
    assert_eq!(
        SvgBurstError::validation("interval must be positive").user_message(),
        "interval must be positive"
    );
}
