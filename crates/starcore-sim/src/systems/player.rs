//! Player ship control: applies the latest client input each tick.
//!
//! Uses the same motion controller as enemy ships. A ship whose aim point is
//! within the deadzone holds still.

use hecs::World;

use starcore_core::components::{Boost, FireCooldown, PlayerInput, PlayerShip};
use starcore_core::config::PlayerTuning;
use starcore_core::constants::DT;
use starcore_core::enums::BoostEffect;
use starcore_core::events::ReplicationEvent;
use starcore_core::types::{Transform2D, Velocity};
use starcore_enemy_ai::motion::{self, AimPoint, MotionProfile};

use crate::ids::entity_id;

pub fn run(world: &mut World, tuning: &PlayerTuning, events: &mut Vec<ReplicationEvent>) {
    let profile = MotionProfile {
        vertical_speed: tuning.vertical_speed,
        horizontal_speed: tuning.horizontal_speed,
        max_rotation_speed: tuning.max_rotation_speed,
    };

    for (entity, (_ship, transform, velocity, input, boost, cooldown)) in world.query_mut::<(
        &PlayerShip,
        &mut Transform2D,
        &mut Velocity,
        &PlayerInput,
        &mut Boost,
        &mut FireCooldown,
    )>() {
        cooldown.remaining_ticks = cooldown.remaining_ticks.saturating_sub(1);

        let boosting = boost.amount != 0.0;
        if input.boost != boosting {
            let effect = if input.boost {
                boost.amount = tuning.boost_factor;
                BoostEffect::Play
            } else {
                boost.amount = 0.0;
                BoostEffect::Stop
            };
            events.push(ReplicationEvent::BoostEffect {
                entity: entity_id(entity),
                effect,
            });
        }

        velocity.linear = if transform.distance_to(input.aim_point) <= tuning.aim_deadzone {
            glam::DVec2::ZERO
        } else {
            motion::velocity_command(transform, input.movement, boost.amount, &profile)
        };

        let heading = motion::aim(
            transform,
            AimPoint::Position(input.aim_point),
            DT,
            0.0,
            profile.max_rotation_speed,
            None,
        );
        *transform = Transform2D::new(transform.position, heading);
    }
}
