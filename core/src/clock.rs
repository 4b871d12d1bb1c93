use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// A row is injected after every clear.
    Classic,
    /// A row is injected whenever the countdown runs out, clears reset it.
    TimeAttack,
}

impl Mode {
    pub const fn uses_countdown(self) -> bool {
        matches!(self, Self::TimeAttack)
    }

    pub const fn injects_on_match(self) -> bool {
        matches!(self, Self::Classic)
    }
}

/// Identifies one armed tick schedule.
///
/// A host runs at most one ticker per token; ticks carrying any other token
/// are ignored by the clock.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickToken(u64);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClockTick {
    /// Stale token or no countdown running.
    Ignored,
    Counting { time_left: u32 },
    /// Countdown reached zero and started over.
    Expired,
}

/// Timing policy of a single game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeClock {
    mode: Mode,
    limit: u32,
    time_left: u32,
    armed: Option<TickToken>,
    epoch: u64,
}

impl ModeClock {
    pub fn new(mode: Mode, limit_secs: u32) -> Self {
        let limit = limit_secs.max(1);
        Self {
            mode,
            limit,
            time_left: limit,
            armed: None,
            epoch: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Seconds left in the current window, `None` for modes without a countdown.
    pub fn time_left(&self) -> Option<u32> {
        self.mode.uses_countdown().then_some(self.time_left)
    }

    pub fn token(&self) -> Option<TickToken> {
        self.armed
    }

    /// Starts a fresh tick schedule, invalidating any previous one.
    ///
    /// The remaining time is kept, so arming after a pause resumes from the
    /// frozen value.
    pub fn arm(&mut self) -> Option<TickToken> {
        if !self.mode.uses_countdown() {
            return None;
        }
        self.epoch = self.epoch.wrapping_add(1);
        let token = TickToken(self.epoch);
        self.armed = Some(token);
        log::trace!("Clock armed with {:?}, {}s left", token, self.time_left);
        Some(token)
    }

    pub fn disarm(&mut self) {
        if let Some(token) = self.armed.take() {
            log::trace!("Clock disarmed {:?}, frozen at {}s", token, self.time_left);
        }
    }

    /// Refills the countdown. An armed clock is re-armed so the next tick
    /// lands a full second later.
    pub fn reset(&mut self) {
        if !self.mode.uses_countdown() {
            return;
        }
        self.time_left = self.limit;
        if self.armed.is_some() {
            self.arm();
        }
    }

    pub fn tick(&mut self, token: TickToken) -> ClockTick {
        if self.armed != Some(token) {
            log::warn!("Ignoring tick from stale schedule {:?}", token);
            return ClockTick::Ignored;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.time_left = self.limit;
            ClockTick::Expired
        } else {
            ClockTick::Counting {
                time_left: self.time_left,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_clock_never_arms() {
        let mut clock = ModeClock::new(Mode::Classic, 15);

        assert_eq!(clock.arm(), None);
        assert_eq!(clock.time_left(), None);
    }

    #[test]
    fn countdown_expires_and_restarts() {
        let mut clock = ModeClock::new(Mode::TimeAttack, 3);
        let token = clock.arm().unwrap();

        assert_eq!(clock.tick(token), ClockTick::Counting { time_left: 2 });
        assert_eq!(clock.tick(token), ClockTick::Counting { time_left: 1 });
        assert_eq!(clock.tick(token), ClockTick::Expired);
        assert_eq!(clock.time_left(), Some(3));
    }

    #[test]
    fn disarmed_clock_freezes_and_resumes() {
        let mut clock = ModeClock::new(Mode::TimeAttack, 15);
        let first = clock.arm().unwrap();
        clock.tick(first);
        clock.disarm();

        assert_eq!(clock.tick(first), ClockTick::Ignored);
        assert_eq!(clock.time_left(), Some(14));

        let second = clock.arm().unwrap();
        assert_ne!(first, second);
        assert_eq!(clock.tick(first), ClockTick::Ignored);
        assert_eq!(clock.tick(second), ClockTick::Counting { time_left: 13 });
    }

    #[test]
    fn reset_refills_and_rearms() {
        let mut clock = ModeClock::new(Mode::TimeAttack, 15);
        let token = clock.arm().unwrap();
        clock.tick(token);

        clock.reset();

        assert_eq!(clock.time_left(), Some(15));
        assert_eq!(clock.tick(token), ClockTick::Ignored);
        let fresh = clock.token().unwrap();
        assert_eq!(clock.tick(fresh), ClockTick::Counting { time_left: 14 });
    }

    #[test]
    fn reset_on_disarmed_clock_stays_disarmed() {
        let mut clock = ModeClock::new(Mode::TimeAttack, 5);

        clock.reset();

        assert_eq!(clock.token(), None);
    }
}
