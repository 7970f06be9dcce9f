//! Wave countdown.
//!
//! Time is tracked continuously; the whole-second value (rounded up) is what
//! the display sees, and a tick is reported only when that value changes.

use meteorfall_core::constants::TIME_EPSILON;

/// Result of advancing a countdown by one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockUpdate {
    /// New whole-second value, if it changed this frame.
    pub tick: Option<u32>,
    /// The countdown reached zero this frame. Reported once per start.
    pub expired: bool,
}

/// Capability the wave orchestrator needs from its timer.
pub trait Countdown {
    /// Begin counting down from `duration_secs`, discarding any prior
    /// countdown. Returns the initial whole-second value.
    fn start(&mut self, duration_secs: f64) -> u32;
    /// Halt and discard the remaining time. No expiry will be reported.
    fn stop(&mut self);
    fn advance(&mut self, dt: f64) -> ClockUpdate;
    fn remaining_secs(&self) -> f64;
    fn is_running(&self) -> bool;

    /// Remaining time for display, whole seconds rounded up.
    fn seconds_remaining(&self) -> u32 {
        whole_seconds(self.remaining_secs())
    }
}

pub fn whole_seconds(secs: f64) -> u32 {
    secs.max(0.0).ceil() as u32
}

/// The standard countdown.
#[derive(Debug, Clone, Default)]
pub struct Clock {
    remaining_secs: f64,
    running: bool,
    last_whole: u32,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Countdown for Clock {
    fn start(&mut self, duration_secs: f64) -> u32 {
        if self.running {
            log::debug!(
                "clock restarted with {:.2}s still remaining",
                self.remaining_secs
            );
        }
        self.remaining_secs = duration_secs.max(0.0);
        self.running = true;
        self.last_whole = whole_seconds(self.remaining_secs);
        self.last_whole
    }

    fn stop(&mut self) {
        self.running = false;
        self.remaining_secs = 0.0;
        self.last_whole = 0;
    }

    fn advance(&mut self, dt: f64) -> ClockUpdate {
        if !self.running {
            return ClockUpdate::default();
        }

        self.remaining_secs -= dt.max(0.0);
        if self.remaining_secs <= TIME_EPSILON {
            self.remaining_secs = 0.0;
            self.running = false;
            self.last_whole = 0;
            return ClockUpdate {
                tick: None,
                expired: true,
            };
        }

        let whole = whole_seconds(self.remaining_secs);
        let tick = (whole != self.last_whole).then_some(whole);
        self.last_whole = whole;
        ClockUpdate {
            tick,
            expired: false,
        }
    }

    fn remaining_secs(&self) -> f64 {
        self.remaining_secs
    }

    fn is_running(&self) -> bool {
        self.running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteorfall_core::constants::DT;

    fn run(clock: &mut Clock, ticks: usize) -> (Vec<u32>, usize) {
        let mut seconds = Vec::new();
        let mut expiries = 0;
        for _ in 0..ticks {
            let update = clock.advance(DT);
            seconds.extend(update.tick);
            if update.expired {
                expiries += 1;
            }
        }
        (seconds, expiries)
    }

    #[test]
    fn start_reports_initial_seconds() {
        let mut clock = Clock::new();
        assert_eq!(clock.start(20.0), 20);
        assert_eq!(clock.start(2.5), 3);
        assert!(clock.is_running());
    }

    #[test]
    fn counts_down_each_second_then_expires_once() {
        let mut clock = Clock::new();
        clock.start(3.0);
        let (seconds, expiries) = run(&mut clock, 200);
        assert_eq!(seconds, vec![2, 1]);
        assert_eq!(expiries, 1);
        assert!(!clock.is_running());
        assert_eq!(clock.remaining_secs(), 0.0);
    }

    #[test]
    fn expires_on_schedule() {
        let mut clock = Clock::new();
        clock.start(1.0);
        let mut expired_at = None;
        for tick in 0..100 {
            if clock.advance(DT).expired {
                expired_at = Some(tick + 1);
                break;
            }
        }
        assert_eq!(expired_at, Some(30));
    }

    #[test]
    fn stop_preempts_expiry() {
        let mut clock = Clock::new();
        clock.start(1.0);
        run(&mut clock, 10);
        clock.stop();
        let (seconds, expiries) = run(&mut clock, 100);
        assert!(seconds.is_empty());
        assert_eq!(expiries, 0);
    }

    #[test]
    fn restart_discards_prior_countdown() {
        let mut clock = Clock::new();
        clock.start(1.0);
        run(&mut clock, 20);
        clock.start(5.0);
        assert_eq!(clock.seconds_remaining(), 5);
        let (_, expiries) = run(&mut clock, 20);
        assert_eq!(expiries, 0, "old countdown must not fire");
    }

    #[test]
    fn display_rounds_up() {
        let mut clock = Clock::new();
        clock.start(10.0);
        clock.advance(0.25);
        assert_eq!(clock.seconds_remaining(), 10);
        assert!((clock.remaining_secs() - 9.75).abs() < 1e-12);
    }

    #[test]
    fn zero_duration_expires_on_first_advance() {
        let mut clock = Clock::new();
        assert_eq!(clock.start(0.0), 0);
        assert!(clock.advance(DT).expired);
        assert!(!clock.advance(DT).expired);
    }
}
