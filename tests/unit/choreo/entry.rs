use super::*;

fn fade(element: &str, delay: f64) -> EntryAnimation {
    EntryAnimation {
        element: ElementId::from(element),
        property: Property::Opacity,
        from: PropertyValue::Scalar(0.0),
        to: PropertyValue::Scalar(1.0),
        delay,
        duration: 1.0,
        ease: Ease::Linear,
    }
}

#[test]
fn writes_follow_delay_and_duration() {
    let mut sched = EntrySchedule::new(vec![fade("subtitle", 1.5)]).unwrap();
    assert!(sched.advance(10.0).is_empty(), "not started yet");

    sched.start(10.0).unwrap();
    assert!(sched.advance(11.0).is_empty());
    assert_eq!(sched.status()[0], EntryStatus::Pending);

    let w = sched.advance(12.0);
    assert_eq!(w.len(), 1);
    assert_eq!(w[0].value, PropertyValue::Scalar(0.5));
    assert_eq!(sched.status()[0], EntryStatus::Running);

    let w = sched.advance(20.0);
    assert_eq!(w[0].value, PropertyValue::Scalar(1.0));
    assert!(sched.is_finished());
    assert!(sched.advance(21.0).is_empty(), "fires once");
}

#[test]
fn schedule_is_not_retriggerable() {
    let mut sched = EntrySchedule::new(vec![fade("nav", 1.2)]).unwrap();
    sched.start(0.0).unwrap();
    let err = sched.start(5.0).unwrap_err();
    assert!(matches!(err, ScrollweaveError::Lifecycle(_)));
}

#[test]
fn cancel_stops_in_flight_entries() {
    let mut sched =
        EntrySchedule::new(vec![fade("badge.0", 0.0), fade("badge.1", 5.0)]).unwrap();
    sched.start(0.0).unwrap();
    sched.advance(0.5);
    assert_eq!(sched.in_flight(), 2);
    assert_eq!(sched.cancel(), 2);
    assert_eq!(sched.in_flight(), 0);
    assert!(sched.advance(10.0).is_empty());
    assert_eq!(sched.status()[1], EntryStatus::Cancelled);
}

#[test]
fn zero_duration_entry_jumps_to_target() {
    let mut e = fade("a", 0.0);
    e.duration = 0.0;
    let mut sched = EntrySchedule::new(vec![e]).unwrap();
    sched.start(0.0).unwrap();
    let w = sched.advance(0.0);
    assert_eq!(w[0].value, PropertyValue::Scalar(1.0));
}

#[test]
fn start_value_prefers_earliest_entry() {
    let mut late = fade("a", 2.0);
    late.from = PropertyValue::Scalar(0.3);
    let sched = EntrySchedule::new(vec![late, fade("a", 0.5)]).unwrap();
    assert_eq!(
        sched.start_value("a", Property::Opacity),
        Some(PropertyValue::Scalar(0.0))
    );
    assert!(sched.owns("a", Property::Opacity));
    assert!(!sched.owns("a", Property::Y));
}

#[test]
fn invalid_entries_are_rejected() {
    let mut e = fade("a", -1.0);
    assert!(EntrySchedule::new(vec![e.clone()]).is_err());
    e.delay = 0.0;
    e.to = PropertyValue::Scalar(3.0);
    assert!(EntrySchedule::new(vec![e]).is_err());
}
