use std::time::{Duration, Instant};

/// Countdown for a practice session. Callers pass `now` so the logic stays clock-free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountdownTimer {
    #[default]
    Idle,
    Running { total: Duration, ends_at: Instant },
}

impl CountdownTimer {
    pub fn start(&mut self, minutes: u32, now: Instant) {
        let total = Duration::from_secs(u64::from(minutes) * 60);
        *self = CountdownTimer::Running { total, ends_at: now + total };
    }

    pub fn reset(&mut self) {
        *self = CountdownTimer::Idle;
    }

    pub fn is_running(&self) -> bool {
        matches!(self, CountdownTimer::Running { .. })
    }

    /// `None` when idle; zero once time is up.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        match *self {
            CountdownTimer::Idle => None,
            CountdownTimer::Running { ends_at, .. } => Some(ends_at.saturating_duration_since(now)),
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.remaining(now).map(|r| r.is_zero()).unwrap_or(false)
    }

    /// Share of the countdown already elapsed, in `[0, 1]`.
    pub fn fraction_elapsed(&self, now: Instant) -> f64 {
        match *self {
            CountdownTimer::Idle => 0.0,
            CountdownTimer::Running { total, ends_at } => {
                if total.is_zero() {
                    return 1.0;
                }
                let remaining = ends_at.saturating_duration_since(now);
                (1.0 - remaining.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
            }
        }
    }
}

/// `MM:SS`, rounding partial seconds up so a fresh 30 minute timer shows `30:00`.
pub fn format_remaining(remaining: Duration) -> String {
    let mut secs = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        secs += 1;
    }
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Per-invocation UI state, passed explicitly to presentation code.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub selected_id: Option<String>,
    pub timer: CountdownTimer,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select<S: Into<String>>(&mut self, problem_id: S) {
        let id = problem_id.into();
        tracing::debug!(id = %id, "Selected problem");
        self.selected_id = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected_id = None;
    }
}
