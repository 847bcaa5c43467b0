use drillbook_lib::state::session::{format_remaining, CountdownTimer, SessionState};
use std::time::{Duration, Instant};

#[test]
fn test_idle_timer() {
    let timer = CountdownTimer::default();
    let now = Instant::now();
    assert!(!timer.is_running());
    assert_eq!(timer.remaining(now), None);
    assert!(!timer.is_finished(now));
    assert_eq!(timer.fraction_elapsed(now), 0.0);
}

#[test]
fn test_running_timer_counts_down() {
    let start = Instant::now();
    let mut timer = CountdownTimer::default();
    timer.start(2, start);

    assert!(timer.is_running());
    assert_eq!(timer.remaining(start), Some(Duration::from_secs(120)));

    let halfway = start + Duration::from_secs(60);
    assert_eq!(timer.remaining(halfway), Some(Duration::from_secs(60)));
    assert!((timer.fraction_elapsed(halfway) - 0.5).abs() < 1e-9);

    let late = start + Duration::from_secs(500);
    assert_eq!(timer.remaining(late), Some(Duration::ZERO));
    assert!(timer.is_finished(late));
    assert_eq!(timer.fraction_elapsed(late), 1.0);

    timer.reset();
    assert!(!timer.is_running());
}

#[test]
fn test_zero_minute_timer_is_finished() {
    let now = Instant::now();
    let mut timer = CountdownTimer::default();
    timer.start(0, now);
    assert!(timer.is_finished(now));
    assert_eq!(timer.fraction_elapsed(now), 1.0);
}

#[test]
fn test_format_remaining() {
    assert_eq!(format_remaining(Duration::from_secs(30 * 60)), "30:00");
    assert_eq!(format_remaining(Duration::from_secs(65)), "01:05");
    assert_eq!(format_remaining(Duration::from_millis(59_200)), "01:00");
    assert_eq!(format_remaining(Duration::ZERO), "00:00");
}

#[test]
fn test_session_selection() {
    let mut session = SessionState::new();
    assert!(session.selected_id.is_none());
    session.select("sp_001");
    assert_eq!(session.selected_id.as_deref(), Some("sp_001"));
    session.clear_selection();
    assert!(session.selected_id.is_none());
}
