use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VinciError::parse(3, "x")
            .to_string()
            .contains("parse error at line 3:")
    );
    assert!(
        VinciError::block_not_found("0.1")
            .to_string()
            .contains("block [0.1] is not found")
    );
    assert!(
        VinciError::invalid_geometry("x")
            .to_string()
            .contains("invalid geometry:")
    );
    assert!(
        VinciError::size_mismatch("x")
            .to_string()
            .contains("size mismatch:")
    );
    assert!(
        VinciError::not_mergeable("x")
            .to_string()
            .contains("not mergeable:")
    );
    assert!(
        VinciError::invalid_block("x")
            .to_string()
            .contains("invalid block:")
    );
    assert!(
        VinciError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        VinciError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn at_line_wraps_and_unwraps() {
    let err = VinciError::block_not_found("7").at_line(4);
    assert_eq!(err.line(), Some(4));
    assert!(matches!(err.kind(), VinciError::BlockNotFound(id) if id == "7"));
    assert_eq!(err.to_string(), "at line 4: block [7] is not found");
}

#[test]
fn line_is_absent_for_plain_errors() {
    assert_eq!(VinciError::validation("x").line(), None);
    assert_eq!(VinciError::parse(0, "x").line(), Some(0));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VinciError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
