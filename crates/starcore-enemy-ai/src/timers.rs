//! Tick-driven countdowns.
//!
//! Every timer is an integer number of ticks decremented by its owner once per
//! tick. Owners advance their timers before reading them, so a timer armed with
//! `D` ticks on tick `T` reads active through `T + D - 1` and inactive at `T + D`.

/// A single restartable countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Countdown {
    remaining_ticks: u32,
}

impl Countdown {
    /// Restart the countdown at `ticks`, discarding any time left.
    pub fn arm(&mut self, ticks: u32) {
        self.remaining_ticks = ticks;
    }

    pub fn is_active(&self) -> bool {
        self.remaining_ticks > 0
    }

    /// Step one tick. Returns `true` on the tick the countdown reaches zero.
    pub fn advance(&mut self) -> bool {
        if self.remaining_ticks == 0 {
            return false;
        }
        self.remaining_ticks -= 1;
        self.remaining_ticks == 0
    }

    pub fn cancel(&mut self) {
        self.remaining_ticks = 0;
    }
}

/// Expiry window that several overlapping refreshes keep open.
///
/// Each refresh starts its own countdown. The window closes only when the
/// last outstanding countdown runs out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefCountedExpiry {
    pending: Vec<u32>,
}

impl RefCountedExpiry {
    pub fn refresh(&mut self, ticks: u32) {
        if ticks > 0 {
            self.pending.push(ticks);
        }
    }

    /// Number of refreshes still holding the window open.
    pub fn holders(&self) -> usize {
        self.pending.len()
    }

    pub fn is_open(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Step one tick. Returns `true` on the tick the last holder expires.
    pub fn advance(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        for remaining in &mut self.pending {
            *remaining -= 1;
        }
        self.pending.retain(|&remaining| remaining > 0);
        self.pending.is_empty()
    }

    pub fn cancel(&mut self) {
        self.pending.clear();
    }
}

/// What a registry timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPurpose {
    SwitchTarget,
    RecentRetreat,
    HelperExpiry,
}

/// The agent-scoped timers of an enemy ship, keyed by purpose.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    pub switch_target: Countdown,
    pub recent_retreat: Countdown,
    pub helper_expiry: RefCountedExpiry,
}

impl TimerRegistry {
    /// Advance every timer. Returns `true` when the helper window just closed.
    pub fn advance(&mut self) -> bool {
        self.switch_target.advance();
        self.recent_retreat.advance();
        self.helper_expiry.advance()
    }

    pub fn is_active(&self, purpose: TimerPurpose) -> bool {
        match purpose {
            TimerPurpose::SwitchTarget => self.switch_target.is_active(),
            TimerPurpose::RecentRetreat => self.recent_retreat.is_active(),
            TimerPurpose::HelperExpiry => self.helper_expiry.is_open(),
        }
    }

    pub fn cancel_all(&mut self) {
        self.switch_target.cancel();
        self.recent_retreat.cancel();
        self.helper_expiry.cancel();
    }
}

/// Fixed-interval polling gate. Ready on its first tick, then every `interval` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    interval: u32,
    countdown: u32,
}

impl Pacer {
    pub fn new(interval_ticks: u32) -> Self {
        Self {
            interval: interval_ticks.max(1),
            countdown: 0,
        }
    }

    /// Call once per tick. Returns `true` on ticks where the polled work should run.
    pub fn ready(&mut self) -> bool {
        if self.countdown == 0 {
            self.countdown = self.interval - 1;
            true
        } else {
            self.countdown -= 1;
            false
        }
    }

    /// Ticks between ready ticks.
    pub fn interval_ticks(&self) -> u32 {
        self.interval
    }

    pub fn reset(&mut self) {
        self.countdown = 0;
    }
}
