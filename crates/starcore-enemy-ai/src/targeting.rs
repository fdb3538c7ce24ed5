//! Target selection from scans and hit notifications.
//!
//! Target and helper are weak references: the brain drops them as soon as
//! the world reports the entity gone, and nothing here dereferences them.

use starcore_core::enums::{BehaviorState, Category};
use starcore_core::types::EntityId;

use crate::perception::{Candidate, ScanResult};
use crate::timers::{TimerPurpose, TimerRegistry};

/// Targeting memory of one enemy ship.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetingState {
    pub target: Option<EntityId>,
    /// Recent attacker tracked while busy with the primary target.
    pub helper: Option<EntityId>,
    /// Set by every hit, consumed by the Attacking loop.
    pub got_hit: bool,
}

/// Outcome of a scan-driven selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Retarget {
    pub target: EntityId,
    /// The agent was Scouting and should start Attacking.
    pub enter_attacking: bool,
}

/// What a hit notification did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitResponse {
    Ignored,
    /// The attacker became the primary target and the switch cooldown was armed.
    AdoptTarget { enter_attacking: bool },
    /// The attacker was recorded as helper and its expiry window refreshed.
    TrackHelper,
}

/// Pick at most one target: the first combatant, otherwise the core.
pub fn choose_target(candidates: &[Candidate]) -> Option<EntityId> {
    let mut core = None;
    for candidate in candidates {
        if candidate.category == Category::Core {
            core.get_or_insert(candidate.entity);
        } else {
            return Some(candidate.entity);
        }
    }
    core
}

impl TargetingState {
    /// Apply a completed scan.
    ///
    /// Selection only happens while the switch cooldown is idle and the agent
    /// is not Retreating. A selection always re-arms the switch cooldown.
    pub fn on_scan(
        &mut self,
        result: &ScanResult,
        state: BehaviorState,
        timers: &mut TimerRegistry,
        switch_cooldown_ticks: u32,
    ) -> Option<Retarget> {
        if timers.is_active(TimerPurpose::SwitchTarget) || state == BehaviorState::Retreating {
            return None;
        }
        let chosen = choose_target(result.candidates())?;

        self.target = Some(chosen);
        timers.switch_target.arm(switch_cooldown_ticks);
        Some(Retarget {
            target: chosen,
            enter_attacking: state == BehaviorState::Scouting,
        })
    }

    /// React to being hit by `attacker` (`None` when the shooter no longer exists).
    pub fn on_hit(
        &mut self,
        attacker: Option<EntityId>,
        state: BehaviorState,
        timers: &mut TimerRegistry,
        switch_cooldown_ticks: u32,
        helper_expiry_ticks: u32,
    ) -> HitResponse {
        self.got_hit = true;

        let Some(attacker) = attacker else {
            return HitResponse::Ignored;
        };
        if self.target == Some(attacker) {
            return HitResponse::Ignored;
        }

        let can_switch = !timers.is_active(TimerPurpose::SwitchTarget);
        match state {
            BehaviorState::Scouting => {
                self.adopt(attacker, timers, switch_cooldown_ticks);
                HitResponse::AdoptTarget {
                    enter_attacking: true,
                }
            }
            BehaviorState::Attacking if can_switch => {
                self.adopt(attacker, timers, switch_cooldown_ticks);
                HitResponse::AdoptTarget {
                    enter_attacking: false,
                }
            }
            BehaviorState::Attacking | BehaviorState::Retreating => {
                self.helper = Some(attacker);
                timers.helper_expiry.refresh(helper_expiry_ticks);
                HitResponse::TrackHelper
            }
            BehaviorState::Charging if can_switch => {
                self.adopt(attacker, timers, switch_cooldown_ticks);
                HitResponse::AdoptTarget {
                    enter_attacking: false,
                }
            }
            BehaviorState::Charging => HitResponse::Ignored,
        }
    }

    /// Take the hit flag, clearing it.
    pub fn consume_hit(&mut self) -> bool {
        std::mem::take(&mut self.got_hit)
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn adopt(&mut self, attacker: EntityId, timers: &mut TimerRegistry, cooldown_ticks: u32) {
        self.target = Some(attacker);
        timers.switch_target.arm(cooldown_ticks);
    }
}
