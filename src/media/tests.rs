use std::time::{Duration, Instant};

use super::thread::position_at;

#[test]
fn position_at_adds_running_time_to_accumulated() {
    let start = Instant::now();
    let later = start + Duration::from_secs(3);
    assert_eq!(
        position_at(Duration::from_secs(10), Some(start), later, None),
        Duration::from_secs(13)
    );
}

#[test]
fn position_at_is_frozen_while_paused() {
    let now = Instant::now();
    assert_eq!(
        position_at(Duration::from_secs(7), None, now + Duration::from_secs(60), None),
        Duration::from_secs(7)
    );
}

#[test]
fn position_at_is_capped_by_known_duration() {
    let start = Instant::now();
    let later = start + Duration::from_secs(50);
    assert_eq!(
        position_at(
            Duration::from_secs(190),
            Some(start),
            later,
            Some(Duration::from_secs(200))
        ),
        Duration::from_secs(200)
    );
}
