use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn pinned_region_clamps_progress() {
    let region = PinnedRegion::new(200.0, 3000.0).unwrap();
    assert_eq!(region.end(), 3200.0);
    assert_eq!(region.progress_at(0.0), 0.0);
    assert_eq!(region.progress_at(200.0), 0.0);
    assert!(approx(region.progress_at(1700.0), 0.5));
    assert_eq!(region.progress_at(9000.0), 1.0);
    assert_eq!(region.progress_at(f64::NAN), 0.0);
}

#[test]
fn pinned_region_rejects_empty_distance() {
    assert!(PinnedRegion::new(0.0, 0.0).is_err());
    assert!(PinnedRegion::new(0.0, -5.0).is_err());
    assert!(PinnedRegion::new(f64::INFINITY, 100.0).is_err());
}

#[test]
fn smooth_scroll_glides_to_target() {
    let region = PinnedRegion::new(0.0, 1000.0).unwrap();
    let mut scroll = SmoothScroll::new(region, SmoothScrollOptions::default()).unwrap();

    scroll.scroll_by(500.0, InputKind::Wheel);
    assert_eq!(scroll.target(), 500.0);
    // the glide starts on the first frame after input
    assert!(scroll.raf(3.0) < 1.0);

    let mid = scroll.raf(3.3);
    assert!(mid > 0.0 && mid < 500.0, "mid = {mid}");
    let later = scroll.raf(3.6);
    assert!(later > mid);

    assert_eq!(scroll.raf(4.2), 500.0);
    assert!(!scroll.is_gliding());
    assert!(approx(scroll.progress(5.0), 0.5));
}

#[test]
fn touch_input_is_amplified() {
    let region = PinnedRegion::new(0.0, 1000.0).unwrap();
    let mut scroll = SmoothScroll::new(region, SmoothScrollOptions::default()).unwrap();
    scroll.scroll_by(100.0, InputKind::Touch);
    assert_eq!(scroll.target(), 200.0);

    scroll.scroll_by(-1000.0, InputKind::Wheel);
    assert_eq!(scroll.target(), 0.0, "clamped at the top");
}

#[test]
fn immediate_scroll_skips_the_glide() {
    let region = PinnedRegion::new(0.0, 1000.0).unwrap();
    let opts = SmoothScrollOptions {
        limit: 800.0,
        ..SmoothScrollOptions::default()
    };
    let mut scroll = SmoothScroll::new(region, opts).unwrap();
    scroll.scroll_to(2000.0, true);
    assert_eq!(scroll.current(), 800.0);
    assert!(approx(scroll.progress(0.0), 0.8));
}

#[test]
fn smooth_scroll_rejects_bad_options() {
    let region = PinnedRegion::new(0.0, 1000.0).unwrap();
    let opts = SmoothScrollOptions {
        duration: f64::NAN,
        ..SmoothScrollOptions::default()
    };
    assert!(SmoothScroll::new(region, opts).is_err());
}

#[test]
fn scripted_progress_repeats_last_value() {
    let mut src = ScriptedProgress::new([0.1, 0.4]);
    assert_eq!(src.progress(0.0), 0.1);
    assert_eq!(src.progress(0.0), 0.4);
    assert_eq!(src.progress(0.0), 0.4);
    assert_eq!(src.reads(), 3);
    assert_eq!(src.remaining(), 0);
}
