//! Bonus lifecycle
//!
//! A bonus scales one attribute of its target for a limited time. The value
//! before scaling is kept in the [`ActiveBonus`] so the effect can be undone
//! exactly, whether it expires or is displaced by another bonus.
//!
//! | Bonus           | Target   | Attribute                           |
//! |-----------------|----------|-------------------------------------|
//! | `SlowBall`      | ball     | velocity speed                      |
//! | `FastPlatform`  | platform | input move speed                    |
//! | `BigPlatform`   | platform | shape and collider width            |

use arc_engine::ecs::{ComponentStore, Entity};

use crate::components::{ActiveBonus, BonusType, Collider, Input, Position, Shape, Velocity};
use crate::config::BonusConfig;
use crate::world::World;

/// Apply `kind` to `target` for `config.duration` seconds.
///
/// Re-applying the bonus already in effect only refreshes its timer. A
/// different active bonus is reverted first. Targets missing the affected
/// attribute are left untouched.
pub fn apply_bonus(world: &mut World, target: Entity, kind: BonusType, config: &BonusConfig) {
    if !world.is_valid(target) {
        return;
    }

    if let Some(active) = world.get::<ActiveBonus>(target).copied() {
        if active.kind == kind {
            if let Some(active) = world.get_mut::<ActiveBonus>(target) {
                active.remaining_time = config.duration;
            }
            log::debug!("Refreshed {kind} on {target}");
            return;
        }
        revert_bonus(world, target, &active);
        world.remove::<ActiveBonus>(target);
    }

    let Some(original_value) = scale_attribute(world, target, kind, config.multiplier(kind)) else {
        log::debug!("{target} has nothing for {kind} to act on");
        return;
    };

    world.set(
        target,
        ActiveBonus {
            kind,
            remaining_time: config.duration,
            original_value,
        },
    );
    log::debug!("Applied {kind} to {target} for {:.1}s", config.duration);
}

/// Apply `kind` to whichever entity it targets: the ball for slow ball, the
/// platform otherwise.
pub fn grant_bonus(world: &mut World, kind: BonusType, config: &BonusConfig) {
    let target = if kind.targets_ball() {
        world.ball()
    } else {
        world.platform()
    };
    if let Some(target) = target {
        apply_bonus(world, target, kind, config);
    }
}

/// Undo the effect of `active` on `entity`. The component itself is left
/// for the caller to remove.
pub fn revert_bonus(world: &mut World, entity: Entity, active: &ActiveBonus) {
    match active.kind {
        BonusType::SlowBall => {
            if let Some(velocity) = world.get_mut::<Velocity>(entity) {
                velocity.set_speed(active.original_value);
            }
        }
        BonusType::FastPlatform => {
            if let Some(input) = world.get_mut::<Input>(entity) {
                input.move_speed = active.original_value;
            }
        }
        BonusType::BigPlatform => resize_platform(world, entity, active.original_value),
    }
    log::debug!("Reverted {} on {entity}", active.kind);
}

/// Scale the attribute `kind` affects and return its previous value
fn scale_attribute(
    world: &mut World,
    target: Entity,
    kind: BonusType,
    multiplier: f32,
) -> Option<f32> {
    match kind {
        BonusType::SlowBall => {
            let velocity = world.get_mut::<Velocity>(target)?;
            let original = velocity.speed;
            velocity.set_speed(original * multiplier);
            Some(original)
        }
        BonusType::FastPlatform => {
            let input = world.get_mut::<Input>(target)?;
            let original = input.move_speed;
            input.move_speed = original * multiplier;
            Some(original)
        }
        BonusType::BigPlatform => {
            let original = world.get::<Shape>(target)?.width()?;
            resize_platform(world, target, original * multiplier);
            Some(original)
        }
    }
}

/// Set the platform width on both shape and collider, then pull it back
/// inside the playfield
fn resize_platform(world: &mut World, entity: Entity, width: f32) {
    if let Some(shape) = world.get_mut::<Shape>(entity) {
        shape.set_width(width);
    }
    if let Some(collider) = world.get_mut::<Collider>(entity) {
        collider.size.x = width;
    }
    let playfield = world.playfield();
    if let Some(position) = world.get_mut::<Position>(entity) {
        position.0.x = playfield.clamp_x(position.0.x, width);
    }
}
