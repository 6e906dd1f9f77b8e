//! Collision system
//!
//! Runs three passes per tick, in order:
//!
//! 1. Bounds: the ball bounces off the left, right and top edges of the
//!    playfield; the platform is clamped horizontally.
//! 2. Ball against platform: a downward-moving ball is sent back up at an
//!    angle depending on where it struck the platform.
//! 3. Ball against bricks: the first brick hit decides the bounce, every
//!    brick hit takes damage, and destroyed bricks are removed once the scan
//!    is over.
//!
//! Every bounce keeps the ball's speed unchanged.

use arc_engine::ecs::{ComponentStore, Entity, System};
use arc_engine::foundation::math::{with_magnitude, Rect};

use crate::bonus::grant_bonus;
use crate::components::{Bonus, Collider, ColliderKind, DurableBrick, Position, Shape, Velocity};
use crate::config::{BonusConfig, ScoringConfig};
use crate::world::World;

/// Brick edge nearest to the ball center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickEdge {
    /// Left edge
    Left,
    /// Right edge
    Right,
    /// Top edge
    Top,
    /// Bottom edge
    Bottom,
}

impl BrickEdge {
    /// Edge with the smallest absolute distance to `(x, y)`.
    /// Ties go to the first of left, right, top, bottom.
    pub fn nearest(brick: &Rect, x: f32, y: f32) -> Self {
        let candidates = [
            (Self::Left, (x - brick.x).abs()),
            (Self::Right, (x - brick.right()).abs()),
            (Self::Top, (y - brick.y).abs()),
            (Self::Bottom, (y - brick.bottom()).abs()),
        ];

        let mut nearest = candidates[0];
        for candidate in &candidates[1..] {
            if candidate.1 < nearest.1 {
                nearest = *candidate;
            }
        }
        nearest.0
    }
}

/// Resolves bounds, platform and brick collisions
#[derive(Debug, Clone)]
pub struct CollisionSystem {
    scoring: ScoringConfig,
    bonus: BonusConfig,
}

impl CollisionSystem {
    /// Create the system with its scoring and bonus rules
    pub fn new(scoring: ScoringConfig, bonus: BonusConfig) -> Self {
        Self { scoring, bonus }
    }

    /// Whether `ball` has fallen completely below the playfield
    pub fn is_ball_out_of_bounds(world: &World, ball: Entity) -> bool {
        let (Some(position), Some(collider)) =
            (world.get::<Position>(ball), world.get::<Collider>(ball))
        else {
            return false;
        };
        position.0.y - collider.radius > world.playfield().height
    }

    fn resolve_bounds(world: &mut World) {
        let playfield = world.playfield();
        for entity in world.entities_with::<Collider>() {
            let Some(collider) = world.get::<Collider>(entity).copied() else {
                continue;
            };
            match collider.kind() {
                ColliderKind::Ball => {
                    let Some(mut position) = world.get::<Position>(entity).copied() else {
                        continue;
                    };
                    let Some(mut velocity) = world.get::<Velocity>(entity).copied() else {
                        continue;
                    };
                    let radius = collider.radius;

                    if position.0.x - radius < 0.0 {
                        position.0.x = radius;
                        velocity.linear.x = velocity.linear.x.abs();
                    } else if position.0.x + radius > playfield.width {
                        position.0.x = playfield.width - radius;
                        velocity.linear.x = -velocity.linear.x.abs();
                    }
                    if position.0.y - radius < 0.0 {
                        position.0.y = radius;
                        velocity.linear.y = velocity.linear.y.abs();
                    }

                    world.set(entity, position);
                    world.set(entity, velocity);
                }
                ColliderKind::Platform => {
                    if let Some(position) = world.get_mut::<Position>(entity) {
                        position.0.x = playfield.clamp_x(position.0.x, collider.size.x);
                    }
                }
                ColliderKind::Wall | ColliderKind::Brick => {}
            }
        }
    }

    fn resolve_platform(world: &mut World) {
        let (Some(ball), Some(platform)) = (world.ball(), world.platform()) else {
            return;
        };
        let (Some(ball_collider), Some(platform_collider)) = (
            world.get::<Collider>(ball).copied(),
            world.get::<Collider>(platform).copied(),
        ) else {
            return;
        };
        let (Some(mut ball_position), Some(platform_position), Some(mut velocity)) = (
            world.get::<Position>(ball).copied(),
            world.get::<Position>(platform).copied(),
            world.get::<Velocity>(ball).copied(),
        ) else {
            return;
        };

        if velocity.linear.y <= 0.0 {
            return;
        }
        let ball_bounds = ball_collider.bounds(ball_position.0);
        let platform_bounds = platform_collider.bounds(platform_position.0);
        if !ball_bounds.overlaps(&platform_bounds) {
            return;
        }

        let half_width = platform_bounds.width / 2.0;
        let relative = if half_width > 0.0 {
            (ball_position.0.x - platform_bounds.center().x) / half_width
        } else {
            0.0
        };

        velocity.linear.y = -velocity.linear.y.abs();
        velocity.linear.x = relative * velocity.speed * 0.5;
        velocity.linear = with_magnitude(velocity.linear, velocity.speed);
        ball_position.0.y = platform_bounds.y - ball_collider.radius;

        world.set(ball, ball_position);
        world.set(ball, velocity);
        log::trace!("Ball bounced off platform at {relative:.2}");
    }

    fn resolve_bricks(&self, world: &mut World) {
        let Some(ball) = world.ball() else {
            return;
        };
        let (Some(collider), Some(mut position), Some(mut velocity)) = (
            world.get::<Collider>(ball).copied(),
            world.get::<Position>(ball).copied(),
            world.get::<Velocity>(ball).copied(),
        ) else {
            return;
        };

        let ball_bounds = collider.bounds(position.0);
        let mut bounced = false;
        let mut destroyed = Vec::new();

        for brick in world.bricks() {
            let (Some(brick_collider), Some(brick_position)) = (
                world.get::<Collider>(brick).copied(),
                world.get::<Position>(brick).copied(),
            ) else {
                continue;
            };
            let brick_bounds = brick_collider.bounds(brick_position.0);
            if !ball_bounds.overlaps(&brick_bounds) {
                continue;
            }

            if !bounced {
                bounced = true;
                let radius = collider.radius;
                match BrickEdge::nearest(&brick_bounds, position.0.x, position.0.y) {
                    BrickEdge::Left => {
                        velocity.linear.x = -velocity.linear.x.abs();
                        position.0.x = brick_bounds.x - radius;
                    }
                    BrickEdge::Right => {
                        velocity.linear.x = velocity.linear.x.abs();
                        position.0.x = brick_bounds.right() + radius;
                    }
                    BrickEdge::Top => {
                        velocity.linear.y = -velocity.linear.y.abs();
                        position.0.y = brick_bounds.y - radius;
                    }
                    BrickEdge::Bottom => {
                        velocity.linear.y = velocity.linear.y.abs();
                        position.0.y = brick_bounds.bottom() + radius;
                    }
                }
                world.set(ball, position);
                world.set(ball, velocity);
            }

            if self.hit_brick(world, brick) {
                destroyed.push(brick);
            }
        }

        for brick in destroyed {
            world.destroy_entity(brick);
            log::debug!("Destroyed brick {brick}");
        }
    }

    /// Register a hit on `brick`. Returns true if the brick is now destroyed.
    fn hit_brick(&self, world: &mut World, brick: Entity) -> bool {
        let points = match world.get_mut::<DurableBrick>(brick) {
            Some(durable) => {
                durable.take_hit();
                let durable = *durable;
                if let Some(shape) = world.get_mut::<Shape>(brick) {
                    shape.color = shape.color.scaled(durable.health_fraction());
                }
                if !durable.is_destroyed() {
                    return false;
                }
                durable.max_hits().saturating_mul(self.scoring.points_per_hit)
            }
            None => self.scoring.plain_brick,
        };

        world.score.add(points);
        self.trigger_bonus(world, brick);
        true
    }

    fn trigger_bonus(&self, world: &mut World, brick: Entity) {
        let Some(bonus) = world.get_mut::<Bonus>(brick) else {
            return;
        };
        if bonus.collected {
            return;
        }
        bonus.collected = true;
        let kind = bonus.kind;
        grant_bonus(world, kind, &self.bonus);
    }
}

impl System<World> for CollisionSystem {
    fn name(&self) -> &'static str {
        "collision"
    }

    fn update(&mut self, _delta_time: f32, world: &mut World) {
        Self::resolve_bounds(world);
        Self::resolve_platform(world);
        self.resolve_bricks(world);
    }
}
