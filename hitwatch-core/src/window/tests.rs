use crate::clock::ManualClock;
use crate::conf::ConfigError;
use crate::window::SlidingWindowCounter;
use std::sync::Arc;
use std::time::Duration;

fn counter(window: u64) -> (SlidingWindowCounter, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let counter = SlidingWindowCounter::new(window, clock.clone()).unwrap();
    (counter, clock)
}

#[test]
fn zero_window_is_rejected() {
    let clock = Arc::new(ManualClock::new());
    let err = SlidingWindowCounter::new(0, clock).err().unwrap();
    assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
}

#[test]
fn sums_across_the_window() {
    let (mut c, clock) = counter(120);

    assert_eq!(c.sum(), 0);

    c.add(1);
    assert_eq!(c.sum(), 1);

    clock.set_secs(20);
    c.add(2);
    assert_eq!(c.sum(), 3);

    // the hit from t=0 falls out exactly one window later
    clock.set_secs(120);
    c.add(3);
    assert_eq!(c.sum(), 5);

    clock.set_secs(200);
    assert_eq!(c.sum(), 3);

    clock.set_secs(1000);
    assert_eq!(c.sum(), 0);
}

#[test]
fn value_stays_inside_window_until_it_expires() {
    let (mut c, clock) = counter(5);

    c.add(4);
    for secs in 1..5 {
        clock.set_secs(secs);
        assert_eq!(c.sum(), 4, "at t={secs}");
    }

    clock.set_secs(5);
    assert_eq!(c.sum(), 0);
}

#[test]
fn sub_second_calls_land_in_the_same_bucket() {
    let (mut c, clock) = counter(3);

    c.add(1);
    clock.set(Duration::from_millis(400));
    c.add(1);
    clock.set(Duration::from_millis(900));
    c.add(1);
    assert_eq!(c.sum(), 3);

    clock.set(Duration::from_millis(1900));
    assert_eq!(c.sum(), 3);
}

#[test]
fn idle_counter_decays_and_restarts() {
    let (mut c, clock) = counter(10);

    c.add(7);
    clock.set_secs(3);
    c.add(2);

    clock.set_secs(500);
    assert_eq!(c.sum(), 0);

    c.add(1);
    assert_eq!(c.sum(), 1);

    clock.set_secs(505);
    assert_eq!(c.sum(), 1);
    clock.set_secs(510);
    assert_eq!(c.sum(), 0);
}

#[test]
fn cursor_wraps_without_losing_live_buckets() {
    let (mut c, clock) = counter(4);

    // fill t=0..=2, then step across the end of the ring
    c.add(1);
    clock.set_secs(1);
    c.add(10);
    clock.set_secs(2);
    c.add(100);
    assert_eq!(c.sum(), 111);

    clock.set_secs(5);
    // t=0 and t=1 are gone, t=2 is still inside the 4s window
    assert_eq!(c.sum(), 100);

    c.add(1000);
    clock.set_secs(6);
    assert_eq!(c.sum(), 1000);
}

#[test]
fn single_second_window_only_holds_current_second() {
    let (mut c, clock) = counter(1);

    c.add(3);
    assert_eq!(c.sum(), 3);

    clock.set_secs(1);
    assert_eq!(c.sum(), 0);
    assert_eq!(c.window_seconds(), 1);
}
