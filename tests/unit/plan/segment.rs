use super::*;

#[test]
fn anchors_parse_relative_offsets() {
    let a: Anchor = "moveToCenter+=0.3".parse().unwrap();
    assert_eq!(a.marker, "moveToCenter");
    assert!((a.offset - 0.3).abs() < 1e-12);

    let b: Anchor = "textReveal-=0.05".parse().unwrap();
    assert!((b.offset + 0.05).abs() < 1e-12);

    let c: Anchor = "start".parse().unwrap();
    assert_eq!(c, Anchor::at("start"));

    assert!("+=0.1".parse::<Anchor>().is_err());
    assert!("start+=abc".parse::<Anchor>().is_err());
}

#[test]
fn anchor_display_parses_back() {
    for a in [
        Anchor::at("start"),
        Anchor::at("moveToCenter").plus(0.4),
        Anchor::at("finalReveal").plus(-0.25),
    ] {
        assert_eq!(a.to_string().parse::<Anchor>().unwrap(), a);
    }
}

#[test]
fn segment_validation() {
    let ok = KeyframeSegment::new("badge.0", Property::Scale, 1.0, 0.5, "shrinkIcons", 0.4);
    assert!(ok.validate().is_ok());
    assert_eq!(ok.ease, Ease::OutQuad);

    let negative = KeyframeSegment::new("badge.0", Property::Scale, 1.0, 0.5, "shrinkIcons", -0.4);
    assert!(negative.validate().is_err());

    let wrong_kind = KeyframeSegment::new(
        "container",
        Property::BackgroundColor,
        1.0,
        0.0,
        "backgroundChange",
        0.5,
    );
    assert!(wrong_kind.validate().is_err());
}

#[test]
fn segment_json_defaults() {
    let seg: KeyframeSegment = serde_json::from_str(
        r#"{
            "element": "title",
            "property": "opacity",
            "from": 1,
            "to": 0,
            "start_marker": "start",
            "duration": 0.5
        }"#,
    )
    .unwrap();
    assert_eq!(seg.offset, 0.0);
    assert_eq!(seg.ease, Ease::OutQuad);
    assert_eq!(seg.to, PropertyValue::Scalar(0.0));
}
