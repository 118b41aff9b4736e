use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LayoutError::degenerate("x")
            .to_string()
            .contains("degenerate geometry:")
    );
    assert!(
        LayoutError::unfittable("x")
            .to_string()
            .contains("unfittable content:")
    );
    assert!(
        LayoutError::precondition("x")
            .to_string()
            .contains("precondition violated:")
    );
    assert!(
        LayoutError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn unknown_element_names_the_handle() {
    let err = LayoutError::UnknownElement(ElementId(7));
    assert!(err.to_string().contains('7'));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LayoutError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
