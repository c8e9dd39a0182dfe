use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PrintmockError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PrintmockError::decode("x")
            .to_string()
            .contains("image decode error:")
    );
    assert!(
        PrintmockError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        PrintmockError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PrintmockError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
