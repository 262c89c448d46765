use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollweaveError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ScrollweaveError::lifecycle("x")
            .to_string()
            .contains("lifecycle error:")
    );
    assert!(
        ScrollweaveError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(
        ScrollweaveError::unknown_phase("shrinkIcons").to_string(),
        "unknown phase 'shrinkIcons'"
    );
}

#[test]
fn configuration_grouping() {
    assert!(
        ScrollweaveError::DuplicatePhase {
            name: "start".to_string()
        }
        .is_configuration()
    );
    assert!(ScrollweaveError::unknown_phase("x").is_configuration());
    assert!(!ScrollweaveError::lifecycle("x").is_configuration());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollweaveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
