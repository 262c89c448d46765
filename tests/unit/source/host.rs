use super::*;

#[test]
fn tracks_subscriptions_and_pins() {
    let mut host = ManualHost::new();
    let sub = host.subscribe_frames().unwrap();
    let pin = host.pin_region(PinnedRegion::new(0.0, 3000.0).unwrap()).unwrap();
    assert_ne!(sub.0, pin.0);
    assert_eq!(host.pending_callbacks(), 1);
    assert_eq!(host.pin_count(), 1);

    host.unsubscribe_frames(sub);
    host.release_region(pin);
    assert_eq!(host.pending_callbacks(), 0);
    assert_eq!(host.pin_count(), 0);
    assert_eq!(host.released(), 1);

    // releasing twice is tolerated
    host.release_region(pin);
    assert_eq!(host.released(), 1);
}

#[test]
fn failing_hosts_refuse() {
    let region = PinnedRegion::new(0.0, 10.0).unwrap();
    assert!(ManualHost::failing_pin().pin_region(region).is_err());
    assert!(ManualHost::failing_subscribe().subscribe_frames().is_err());
}
