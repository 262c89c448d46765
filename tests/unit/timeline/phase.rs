use super::*;

fn header_markers() -> PhaseTimeline {
    PhaseTimeline::from_markers([
        ("start", 0.0),
        ("moveToCenter", 0.2),
        ("shrinkIcons", 0.5),
        ("backgroundChange", 0.7),
        ("positionIcons", 0.9),
        ("textReveal", 1.5),
    ])
    .unwrap()
}

#[test]
fn ordered_markers_build_and_resolve() {
    let tl = header_markers();
    assert_eq!(tl.len(), 6);
    assert_eq!(tl.resolve("shrinkIcons").unwrap(), 0.5);
    assert_eq!(tl.max_offset(), 1.5);
    assert_eq!(tl.markers()[0].name, "start");
}

#[test]
fn duplicate_name_is_rejected() {
    let mut tl = header_markers();
    let err = tl.add_phase("start", 0.1).unwrap_err();
    assert!(matches!(err, ScrollweaveError::DuplicatePhase { ref name } if name == "start"));
    assert_eq!(tl.len(), 6);
}

#[test]
fn out_of_order_offset_is_rejected() {
    let mut tl = header_markers();
    let err = tl.add_phase("late", 1.0).unwrap_err();
    match err {
        ScrollweaveError::PhaseOrder {
            name,
            offset,
            previous,
        } => {
            assert_eq!(name, "late");
            assert_eq!(offset, 1.0);
            assert_eq!(previous, 1.5);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn equal_offsets_express_parallel_phases() {
    let tl = PhaseTimeline::new()
        .phase("a", 0.4)
        .unwrap()
        .phase("b", 0.4)
        .unwrap()
        .phase("c", 0.4 - OFFSET_TOLERANCE / 2.0)
        .unwrap();
    assert_eq!(tl.resolve("b").unwrap(), 0.4);
    assert_eq!(tl.len(), 3);
}

#[test]
fn unknown_and_malformed_markers() {
    let tl = header_markers();
    assert!(matches!(
        tl.resolve("finalReveal"),
        Err(ScrollweaveError::UnknownPhase { .. })
    ));
    assert!(PhaseTimeline::new().phase("", 0.0).is_err());
    assert!(PhaseTimeline::new().phase("neg", -0.1).is_err());
    assert!(PhaseTimeline::new().phase("nan", f64::NAN).is_err());
}
