use std::time::{
    Duration,
    Instant,
};

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// Nothing changed since the last call.
    Idle,
    /// One or more seconds elapsed; carries the new remaining time.
    Ticked(u32),
    /// Reached zero. Reported once, after which the countdown is stopped.
    Expired,
}

/// Whole-second countdown driven by the caller's clock.
///
/// The UI calls [`Countdown::advance`] every frame; only one countdown exists per quiz, and
/// starting it again replaces whatever was running.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u32,
    next_tick: Option<Instant>,
}

impl Countdown {
    pub fn new() -> Self {
        Self { remaining: 0, next_tick: None }
    }

    pub fn start(&mut self, secs: u32, now: Instant) {
        self.remaining = secs;
        self.next_tick = if secs > 0 { Some(now + TICK) } else { None };
    }

    /// Reset the readout without running.
    pub fn reset(&mut self, secs: u32) {
        self.remaining = secs;
        self.next_tick = None;
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn advance(&mut self, now: Instant) -> CountdownEvent {
        let mut ticked = false;

        while let Some(deadline) = self.next_tick {
            if now < deadline {
                break;
            }
            ticked = true;
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                self.next_tick = None;
                return CountdownEvent::Expired;
            }
            self.next_tick = Some(deadline + TICK);
        }

        if ticked {
            CountdownEvent::Ticked(self.remaining)
        } else {
            CountdownEvent::Idle
        }
    }

    /// How long the UI may sleep before the readout changes.
    pub fn time_to_next_tick(&self, now: Instant) -> Option<Duration> {
        self.next_tick.map(|deadline| deadline.saturating_duration_since(now))
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}
