use std::fmt;
use std::time::{Duration, Instant};

/// Gaps at least this long start a new burst.
pub const BURST_GAP: Duration = Duration::from_millis(200);
/// Gaps at least this long are shown as blank padding instead of a number.
pub const IDLE_GAP: Duration = Duration::from_secs(1);

const BLANK_FIELD: &str = "              ";

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Timing of one byte relative to the byte before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    /// `None` for the first byte of the session.
    pub since_previous: Option<Duration>,
    /// Emit a blank line before this byte's report.
    pub separator: bool,
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.since_previous {
            Some(gap) if gap < IDLE_GAP => {
                let us = gap.as_micros();
                write!(f, "({:3}.{:03} ms)  ", us / 1000, us % 1000)
            }
            _ => f.write_str(BLANK_FIELD),
        }
    }
}

#[derive(Debug, Default)]
pub struct TimingTracker {
    previous: Option<Instant>,
}

impl TimingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_first(&self) -> bool {
        self.previous.is_none()
    }

    pub fn observe(&mut self, now: Instant) -> Elapsed {
        let since_previous = self
            .previous
            .map(|prev| now.saturating_duration_since(prev));
        self.previous = Some(now);
        Elapsed {
            since_previous,
            separator: since_previous.is_some_and(|gap| gap >= BURST_GAP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(gap_us: u64) -> Elapsed {
        let start = Instant::now();
        let mut tracker = TimingTracker::new();
        tracker.observe(start);
        tracker.observe(start + Duration::from_micros(gap_us))
    }

    #[test]
    fn test_first_byte() {
        let mut tracker = TimingTracker::new();
        assert!(tracker.is_first());
        let elapsed = tracker.observe(Instant::now());
        assert!(!tracker.is_first());
        assert_eq!(elapsed.since_previous, None);
        assert!(!elapsed.separator);
        assert_eq!(elapsed.to_string(), BLANK_FIELD);
    }

    #[test]
    fn test_within_burst() {
        let elapsed = pair(50_000);
        assert!(!elapsed.separator);
        assert_eq!(elapsed.to_string(), "( 50.000 ms)  ");
    }

    #[test]
    fn test_sub_millisecond() {
        assert_eq!(pair(1_234).to_string(), "(  1.234 ms)  ");
        assert_eq!(pair(7).to_string(), "(  0.007 ms)  ");
    }

    #[test]
    fn test_burst_boundary() {
        assert!(!pair(199_999).separator);
        assert!(pair(200_000).separator);
    }

    #[test]
    fn test_new_burst_keeps_number() {
        let elapsed = pair(250_000);
        assert!(elapsed.separator);
        assert_eq!(elapsed.to_string(), "(250.000 ms)  ");
    }

    #[test]
    fn test_idle_gap_is_blank() {
        let elapsed = pair(2_000_000);
        assert!(elapsed.separator);
        assert_eq!(elapsed.to_string(), BLANK_FIELD);
        assert_eq!(pair(999_999).to_string(), "(999.999 ms)  ");
        assert_eq!(pair(1_000_000).to_string(), BLANK_FIELD);
    }

    #[test]
    fn test_backwards_clock_saturates() {
        let start = Instant::now() + Duration::from_secs(5);
        let mut tracker = TimingTracker::new();
        tracker.observe(start);
        let elapsed = tracker.observe(start - Duration::from_secs(1));
        assert_eq!(elapsed.since_previous, Some(Duration::ZERO));
        assert!(!elapsed.separator);
    }
}
