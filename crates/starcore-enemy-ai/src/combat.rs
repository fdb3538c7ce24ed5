//! Combat actions: burst fire and boost.

use starcore_core::constants::secs_to_ticks;
use starcore_core::enums::BoostEffect;

/// Shape of one burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstSpec {
    pub shots: u32,
    pub spacing_ticks: u32,
}

impl BurstSpec {
    pub fn from_secs(shots: u32, spacing_secs: f64) -> Self {
        Self {
            shots,
            spacing_ticks: secs_to_ticks(spacing_secs),
        }
    }
}

/// An in-flight burst. The first shot goes out on the tick it is advanced
/// first, the rest every `spacing_ticks` after that.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstFire {
    remaining_shots: u32,
    countdown: u32,
    spacing_ticks: u32,
}

impl BurstFire {
    pub fn start(spec: BurstSpec) -> Self {
        Self {
            remaining_shots: spec.shots,
            countdown: 0,
            spacing_ticks: spec.spacing_ticks,
        }
    }

    /// Step one tick. Returns `true` when a shot should be fired this tick.
    pub fn advance(&mut self) -> bool {
        if self.remaining_shots == 0 {
            return false;
        }
        if self.countdown > 0 {
            self.countdown -= 1;
            if self.countdown > 0 {
                return false;
            }
        }
        self.remaining_shots -= 1;
        self.countdown = self.spacing_ticks;
        true
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_shots == 0
    }
}

/// Bursts started by the active behavior loop.
#[derive(Debug, Clone, Default)]
pub struct BurstQueue {
    bursts: Vec<BurstFire>,
}

impl BurstQueue {
    pub fn push(&mut self, spec: BurstSpec) {
        self.bursts.push(BurstFire::start(spec));
    }

    /// Step every burst. Returns how many shots go out this tick.
    pub fn advance(&mut self) -> u32 {
        let shots = self
            .bursts
            .iter_mut()
            .map(|burst| u32::from(burst.advance()))
            .sum();
        self.bursts.retain(|burst| !burst.is_finished());
        shots
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty()
    }

    pub fn cancel(&mut self) {
        self.bursts.clear();
    }
}

/// Forward boost currently applied to a ship's movement.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoostState {
    amount: f64,
}

impl BoostState {
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn is_on(&self) -> bool {
        self.amount != 0.0
    }

    /// Switch boost on or off. Always yields the effect command to mirror,
    /// even when the boost was already in the requested state.
    pub fn set(&mut self, on: bool, factor: f64) -> BoostEffect {
        if on {
            self.amount = factor;
            BoostEffect::Play
        } else {
            self.amount = 0.0;
            BoostEffect::Stop
        }
    }
}
