use super::*;
use crate::binding::layer::RecordingBinding;
use crate::choreo::choreographer::Lifecycle;

fn def(json: &str) -> ChoreographyDef {
    ChoreographyDef::from_reader(json.as_bytes()).unwrap()
}

const BASE: &str = r##"{
    "viewport": { "width": 1000, "height": 1000 },
    "phases": [
        { "name": "start", "offset": 0 },
        { "name": "move", "offset": 0.2 }
    ],
    "elements": [
        { "id": "title", "initial": { "opacity": 1, "y": 0 } }
    ],
    "badges": [
        { "id": "badge.0", "color": "#8b5cf6", "shape": "circle", "glyph": "music" },
        { "id": "badge.1", "color": "#10b981", "shape": "square", "glyph": "movie" }
    ],
    "texts": [
        { "id": "lines", "text": "one\ntwo", "split": "lines" }
    ],
    "steps": [
        { "kind": "tween", "targets": ["title"], "at": "start", "duration": 0.5,
          "ease": "none", "to": { "opacity": 0, "y": -100 } },
        { "kind": "tween", "targets": ["badge.*"], "at": "move", "stagger": 0.1,
          "duration": 0.5, "ease": "none", "to": { "y": "-30vh" } },
        { "kind": "layout", "at": "move+=0.6", "duration": 0.2, "ease": "none",
          "targets": [{ "element": "badge.1", "x": 40, "y": "5vh", "scale": 0.6 }] },
        { "kind": "text_reveal", "block": "lines", "at": "move", "duration": 0.4, "ease": "none",
          "distance": 300, "from_color": "#f9f9f9", "to_color": "#121212" }
    ],
    "entries": [
        { "targets": ["badge.*"], "delay": 1.8, "stagger": 0.1, "duration": 0.8,
          "from": { "opacity": 0 }, "to": { "opacity": 1 } }
    ]
}"##;

#[test]
fn builds_plan_and_entries() {
    let c = def(BASE).build().unwrap();
    let plan = c.plan();

    assert!((plan.total_span() - 1.0).abs() < 1e-12);
    assert_eq!(c.badges().len(), 2);
    assert_eq!(c.text_units("lines").len(), 2);

    assert_eq!(plan.evaluate("title", Property::Y, 0.25), PropertyValue::Scalar(-50.0));
    let (start, end) = plan.windows("badge.1", Property::Y)[0];
    assert!((start - 0.3).abs() < 1e-9 && (end - 0.8).abs() < 1e-9);
    assert_eq!(plan.evaluate("badge.0", Property::Y, 0.7), PropertyValue::Scalar(-300.0));
    assert_eq!(plan.evaluate("badge.1", Property::Y, 1.0), PropertyValue::Scalar(50.0));
    assert_eq!(plan.evaluate("badge.1", Property::X, 1.0), PropertyValue::Scalar(40.0));
    assert_eq!(
        plan.initial_value("badge.0", Property::BackgroundColor),
        PropertyValue::Color("#8b5cf6".parse().unwrap())
    );

    assert_eq!(plan.evaluate("lines.0", Property::X, 0.0), PropertyValue::Scalar(-300.0));
    assert_eq!(plan.evaluate("lines.1", Property::X, 0.0), PropertyValue::Scalar(300.0));
    assert_eq!(plan.evaluate("lines.1", Property::Opacity, 0.7), PropertyValue::Scalar(1.0));

    let entries = c.entries().entries();
    assert_eq!(entries.len(), 2);
    assert!((entries[1].delay - 1.9).abs() < 1e-12);
}

#[test]
fn choreography_mounts() {
    let mut ch = def(BASE).build().unwrap().into_choreographer(RecordingBinding::new());
    ch.mount(0.0).unwrap();
    assert_eq!(ch.lifecycle(), Lifecycle::Mounting);
    assert_eq!(ch.binding().bound(), 5);
    assert_eq!(ch.state("badge.1").unwrap().scalar(Property::Opacity), 0.0);
}

#[test]
fn unknown_phase_fails_the_build() {
    let json = BASE.replace("\"at\": \"move\", \"stagger\"", "\"at\": \"nowhere\", \"stagger\"");
    let err = def(&json).build().unwrap_err();
    assert!(matches!(err, ScrollweaveError::UnknownPhase { .. }), "{err}");
}

#[test]
fn unknown_targets_fail_the_build() {
    let json = BASE.replace("\"targets\": [\"title\"]", "\"targets\": [\"titel\"]");
    let err = def(&json).build().unwrap_err();
    assert!(err.to_string().contains("unknown element 'titel'"), "{err}");

    let json = BASE.replace("[\"badge.*\"], \"at\"", "[\"icon.*\"], \"at\"");
    assert!(def(&json).build().is_err());
}

#[test]
fn phase_errors_surface() {
    let json = BASE.replace("\"move\", \"offset\": 0.2", "\"start\", \"offset\": 0.2");
    assert!(matches!(
        def(&json).build().unwrap_err(),
        ScrollweaveError::DuplicatePhase { .. }
    ));
}

#[test]
fn start_value_without_target_is_rejected() {
    let json = BASE.replace(
        "\"ease\": \"none\", \"to\": { \"opacity\": 0, \"y\": -100 }",
        "\"ease\": \"none\", \"from\": { \"x\": 5 }, \"to\": { \"opacity\": 0 }",
    );
    assert!(def(&json).build().is_err());
}

#[test]
fn bad_viewport_is_rejected() {
    let json = BASE.replace("\"width\": 1000", "\"width\": 0");
    assert!(def(&json).build().is_err());
}
