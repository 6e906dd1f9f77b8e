//! Entity factory
//!
//! Builds the canonical component bundles for the platform, the ball and
//! bricks, and lays out a full brick field.

use arc_engine::ecs::{ComponentStore, Entity};
use arc_engine::foundation::math::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{
    Bonus, BonusType, Collider, ColliderKind, Color, DurableBrick, Input, Position, Shape,
    Velocity,
};
use crate::config::{BallConfig, BrickLayout, PlatformConfig};
use crate::world::World;

/// Description of a single brick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickSpec {
    /// Top-left corner
    pub position: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Fill color
    pub color: Color,
    /// Hit counter; bricks without one break on first contact
    pub durability: Option<DurableBrick>,
    /// Bonus dropped on destruction
    pub bonus: Option<Bonus>,
}

impl BrickSpec {
    /// Plain brick at `(x, y)`
    pub fn new(x: f32, y: f32, width: f32, height: f32, color: Color) -> Self {
        Self {
            position: Vec2::new(x, y),
            size: Vec2::new(width, height),
            color,
            durability: None,
            bonus: None,
        }
    }

    /// Brick needing `max_hits` hits. A single hit makes a plain brick.
    #[must_use]
    pub fn with_hits(mut self, max_hits: u32) -> Self {
        self.durability = (max_hits > 1).then(|| DurableBrick::new(max_hits));
        self
    }

    /// Brick dropping `kind` when destroyed
    #[must_use]
    pub fn with_bonus(mut self, kind: BonusType) -> Self {
        self.bonus = Some(Bonus::new(kind));
        self
    }
}

/// Spawn the player platform
pub fn create_platform(world: &mut World, config: &PlatformConfig) -> Entity {
    let platform = world.create_entity();
    world.set(platform, Position(config.start()));
    world.set(platform, Velocity::zero());
    world.set(
        platform,
        Shape::rectangle(config.width, config.height, config.color),
    );
    world.set(
        platform,
        Collider::rectangle(ColliderKind::Platform, config.width, config.height),
    );
    world.set(platform, Input::new(config.move_speed));
    log::trace!("Created platform {platform}");
    platform
}

/// Spawn the ball
pub fn create_ball(world: &mut World, config: &BallConfig) -> Entity {
    let ball = world.create_entity();
    let velocity = config.initial_velocity();
    world.set(ball, Position(config.start()));
    world.set(ball, Velocity::new(velocity.x, velocity.y));
    world.set(ball, Shape::circle(config.radius, config.color));
    world.set(ball, Collider::ball(config.radius));
    log::trace!("Created ball {ball}");
    ball
}

/// Spawn one brick
pub fn create_brick(world: &mut World, spec: &BrickSpec) -> Entity {
    let brick = world.create_entity();
    world.set(brick, Position(spec.position));
    world.set(
        brick,
        Shape::rectangle(spec.size.x, spec.size.y, spec.color),
    );
    world.set(
        brick,
        Collider::rectangle(ColliderKind::Brick, spec.size.x, spec.size.y),
    );
    if let Some(durability) = spec.durability {
        world.set(brick, durability);
    }
    if let Some(bonus) = spec.bonus {
        world.set(brick, bonus);
    }
    brick
}

/// Lay out `rows × columns` bricks, horizontally centered in the playfield.
///
/// Rows are colored from the palette and get tougher toward the top. Each
/// brick carries a random bonus with probability `bonus_chance`.
pub fn build_brick_field<R: Rng + ?Sized>(
    world: &mut World,
    layout: &BrickLayout,
    rng: &mut R,
) -> Vec<Entity> {
    let columns = layout.columns as f32;
    let field_width = columns * layout.width + (columns - 1.0).max(0.0) * layout.padding;
    let left = ((world.playfield().width - field_width) / 2.0).max(0.0);

    let mut bricks = Vec::with_capacity((layout.rows * layout.columns) as usize);
    for row in 0..layout.rows {
        let y = layout.top_offset + row as f32 * (layout.height + layout.padding);
        for column in 0..layout.columns {
            let x = left + column as f32 * (layout.width + layout.padding);
            let mut spec = BrickSpec::new(x, y, layout.width, layout.height, layout.row_color(row))
                .with_hits(layout.row_hits(row));
            if rng.gen_bool(layout.bonus_chance) {
                if let Some(kind) = BonusType::ALL.choose(rng) {
                    spec = spec.with_bonus(*kind);
                }
            }
            bricks.push(create_brick(world, &spec));
        }
    }

    log::info!(
        "Built brick field: {} rows x {} columns",
        layout.rows,
        layout.columns
    );
    bricks
}
