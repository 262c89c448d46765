use super::*;
use crate::animation::ease::Ease;
use crate::animation::value::PropertyValue;
use crate::binding::layer::RecordingBinding;
use crate::choreo::entry::EntryAnimation;
use crate::plan::builder::PlanBuilder;
use crate::timeline::phase::PhaseTimeline;

fn plan() -> ElementAnimationPlan {
    let timeline = PhaseTimeline::from_markers([("start", 0.0), ("fade", 0.5)]).unwrap();
    PlanBuilder::new(timeline)
        .element(
            "title",
            [
                (Property::Opacity, PropertyValue::Scalar(1.0)),
                (Property::Y, PropertyValue::Scalar(0.0)),
            ],
        )
        .unwrap()
        .to(
            &[ElementId::from("title")],
            "start",
            0.5,
            Ease::Linear,
            [(Property::Y, (-100.0).into())],
        )
        .unwrap()
        .to(
            &[ElementId::from("title")],
            "fade",
            0.5,
            Ease::Linear,
            [(Property::Opacity, 0.0.into())],
        )
        .unwrap()
        .build()
}

fn fade_in(element: &str, delay: f64) -> EntryAnimation {
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

fn scalar(ch: &Choreographer<&mut RecordingBinding>, id: &str, p: Property) -> f64 {
    ch.state(id).unwrap().scalar(p)
}

#[test]
fn mount_binds_and_applies_initial_state() {
    let mut binding = RecordingBinding::new();
    let mut ch = Choreographer::new(plan(), EntrySchedule::empty(), &mut binding);
    assert_eq!(ch.lifecycle(), Lifecycle::Unmounted);

    ch.mount(0.0).unwrap();
    assert_eq!(ch.lifecycle(), Lifecycle::ScrollDriven);
    assert_eq!(ch.binding().bound(), 1);
    assert_eq!(scalar(&ch, "title", Property::Opacity), 1.0);
    assert_eq!(scalar(&ch, "title", Property::Y), 0.0);
    assert_eq!(
        ch.binding().latest("title").unwrap().get(&Property::Opacity),
        Some(&PropertyValue::Scalar(1.0))
    );
}

#[test]
fn tick_is_idempotent_and_clamped() {
    let mut binding = RecordingBinding::new();
    let mut ch = Choreographer::new(plan(), EntrySchedule::empty(), &mut binding);
    ch.mount(0.0).unwrap();
    assert_eq!(ch.total_span(), 1.0);

    ch.tick(0.25).unwrap();
    let first = ch.snapshot();
    ch.tick(0.25).unwrap();
    assert_eq!(ch.snapshot(), first);
    assert_eq!(scalar(&ch, "title", Property::Y), -50.0);

    ch.tick(0.75).unwrap();
    ch.tick(0.25).unwrap();
    assert_eq!(ch.snapshot(), first, "reversing scroll retraces state");

    ch.tick(50.0).unwrap();
    assert_eq!(ch.position(), Some(1.0));
    assert_eq!(scalar(&ch, "title", Property::Opacity), 0.0);

    ch.tick(-3.0).unwrap();
    assert_eq!(ch.position(), Some(0.0));
    assert_eq!(scalar(&ch, "title", Property::Y), 0.0);

    ch.tick(f64::NAN).unwrap();
    assert_eq!(ch.position(), Some(0.0));
}

#[test]
fn tick_normalized_scales_by_total_span() {
    let mut binding = RecordingBinding::new();
    let mut ch = Choreographer::new(plan(), EntrySchedule::empty(), &mut binding);
    ch.mount(0.0).unwrap();

    ch.tick_normalized(0.75).unwrap();
    assert_eq!(ch.position(), Some(0.75));
    assert_eq!(scalar(&ch, "title", Property::Opacity), 0.5);

    ch.tick_normalized(4.0).unwrap();
    assert_eq!(ch.position(), Some(1.0));
}

#[test]
fn entry_owns_property_until_scroll_engages() {
    let mut binding = RecordingBinding::new();
    let entries = EntrySchedule::new(vec![fade_in("title", 0.0)]).unwrap();
    let mut ch = Choreographer::new(plan(), entries, &mut binding);

    ch.mount(10.0).unwrap();
    assert_eq!(ch.lifecycle(), Lifecycle::Mounting);
    assert_eq!(scalar(&ch, "title", Property::Opacity), 0.0, "entry start value");

    // a tick at the origin does not engage scrolling
    ch.tick(0.0).unwrap();
    assert!(!ch.is_scroll_engaged());
    assert_eq!(scalar(&ch, "title", Property::Opacity), 0.0);

    ch.advance(10.5);
    assert_eq!(scalar(&ch, "title", Property::Opacity), 0.5);

    ch.tick(0.75).unwrap();
    assert!(ch.is_scroll_engaged());
    assert_eq!(ch.lifecycle(), Lifecycle::ScrollDriven);
    assert_eq!(scalar(&ch, "title", Property::Opacity), 0.5);

    // later entry frames no longer touch plan-animated properties
    ch.advance(10.9);
    assert_eq!(scalar(&ch, "title", Property::Opacity), 0.5);
    ch.advance(20.0);
    assert_eq!(scalar(&ch, "title", Property::Opacity), 0.5);
}

#[test]
fn entry_only_elements_finish_their_animation() {
    let mut binding = RecordingBinding::new();
    let entries = EntrySchedule::new(vec![fade_in("nav", 1.2)]).unwrap();
    let mut ch = Choreographer::new(plan(), entries, &mut binding);
    ch.mount(0.0).unwrap();
    assert_eq!(ch.binding().bound(), 2);

    ch.tick(0.5).unwrap();
    ch.advance(1.7);
    assert_eq!(scalar(&ch, "nav", Property::Opacity), 0.5);
    ch.advance(3.0);
    assert_eq!(scalar(&ch, "nav", Property::Opacity), 1.0);
    assert!(ch.entries().is_finished());
}

#[test]
fn mounting_settles_to_scroll_driven() {
    let mut binding = RecordingBinding::new();
    let entries = EntrySchedule::new(vec![fade_in("nav", 0.0)]).unwrap();
    let mut ch = Choreographer::new(plan(), entries, &mut binding);
    ch.mount(0.0).unwrap();
    ch.advance(0.5);
    assert_eq!(ch.lifecycle(), Lifecycle::Mounting);
    ch.advance(1.0);
    assert_eq!(ch.lifecycle(), Lifecycle::ScrollDriven);
}

#[test]
fn failed_setup_releases_binding() {
    let mut binding = RecordingBinding::failing();
    {
        let mut ch = Choreographer::new(plan(), EntrySchedule::empty(), &mut binding);
        let err = ch.mount(0.0).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(ch.lifecycle(), Lifecycle::Unmounted);
        assert!(ch.tick(0.5).is_err());
        assert!(ch.mount(1.0).is_err(), "retired after a failed mount");
    }
    assert_eq!(binding.bound(), 0);
    assert_eq!(binding.teardowns(), 1);
    assert_eq!(binding.applied(), 0);
}

#[test]
fn unmount_is_final_and_idempotent() {
    let mut binding = RecordingBinding::new();
    let entries = EntrySchedule::new(vec![fade_in("nav", 2.0)]).unwrap();
    let mut ch = Choreographer::new(plan(), entries, &mut binding);
    ch.mount(0.0).unwrap();
    ch.unmount();
    ch.unmount();

    assert_eq!(ch.lifecycle(), Lifecycle::Unmounted);
    assert!(ch.state("title").is_none());
    assert_eq!(ch.entries().in_flight(), 0);
    assert!(matches!(
        ch.tick(0.1).unwrap_err(),
        ScrollweaveError::Lifecycle(_)
    ));
    assert!(matches!(
        ch.mount(5.0).unwrap_err(),
        ScrollweaveError::Lifecycle(_)
    ));

    let applied = ch.binding().applied();
    ch.advance(10.0);
    assert_eq!(ch.binding().applied(), applied);
    drop(ch);

    assert_eq!(binding.teardowns(), 1);
    assert_eq!(binding.bound(), 0);
    assert_eq!(binding.applied_while_unbound(), 0);
}

#[test]
fn drop_unmounts() {
    let mut binding = RecordingBinding::new();
    {
        let mut ch = Choreographer::new(plan(), EntrySchedule::empty(), &mut binding);
        ch.mount(0.0).unwrap();
        ch.tick(0.3).unwrap();
    }
    assert_eq!(binding.teardowns(), 1);
    assert_eq!(binding.bound(), 0);
}

#[test]
fn unmount_goes_straight_to_unmounted_and_destroys_state() {
    let mut binding = RecordingBinding::new();
    let mut ch = Choreographer::new(plan(), EntrySchedule::empty(), &mut binding);
    let mut seen = vec![ch.lifecycle()];
    ch.mount(0.0).unwrap();
    seen.push(ch.lifecycle());
    ch.tick(0.3).unwrap();
    assert!(!ch.snapshot().is_empty());
    ch.unmount();
    seen.push(ch.lifecycle());

    assert_eq!(
        seen,
        [Lifecycle::Unmounted, Lifecycle::ScrollDriven, Lifecycle::Unmounted]
    );
    assert!(ch.snapshot().is_empty());
    assert!(!ch.is_active());
}
