//! The game's component store
//!
//! [`World`] owns one table per component kind plus the few per-session
//! resources the systems share: the score, the sampled input and the
//! playfield and surface sizes.

use arc_engine::component_store;
use arc_engine::ecs::{ComponentStorage, ComponentStore, Entity, EntityRegistry};
use arc_engine::foundation::math::Vec2;

use crate::components::{
    ActiveBonus, Bonus, Collider, ColliderKind, DurableBrick, Input, Position, Shape, Velocity,
};
use crate::input::InputState;
use crate::render::Viewport;

/// Fixed playfield bounds. All clamping and bouncing uses these, never the
/// size of the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Playfield {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Playfield {
    /// Create playfield bounds
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Size as a vector
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Clamp the left edge of something `width` wide so it stays inside
    pub fn clamp_x(&self, x: f32, width: f32) -> f32 {
        x.clamp(0.0, (self.width - width).max(0.0))
    }
}

/// Running score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score(u32);

impl Score {
    /// Score starting at `value`
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Award points
    pub fn add(&mut self, points: u32) {
        self.0 = self.0.saturating_add(points);
    }

    /// Current value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Back to zero
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}

/// Component tables and shared resources of one game session
#[derive(Debug)]
pub struct World {
    registry: EntityRegistry,
    positions: ComponentStorage<Position>,
    velocities: ComponentStorage<Velocity>,
    shapes: ComponentStorage<Shape>,
    colliders: ComponentStorage<Collider>,
    inputs: ComponentStorage<Input>,
    durable_bricks: ComponentStorage<DurableBrick>,
    bonuses: ComponentStorage<Bonus>,
    active_bonuses: ComponentStorage<ActiveBonus>,

    /// Points earned this game
    pub score: Score,
    /// Control state sampled for the current tick
    pub input: InputState,
    /// Size of the presentation surface, set by the host
    pub surface: Vec2,
    /// Surface mapping computed by the resize system
    pub viewport: Viewport,
    playfield: Playfield,
}

component_store!(World {
    registry: registry,
    positions: Position,
    velocities: Velocity,
    shapes: Shape,
    colliders: Collider,
    inputs: Input,
    durable_bricks: DurableBrick,
    bonuses: Bonus,
    active_bonuses: ActiveBonus,
});

impl World {
    /// Empty world over a fixed playfield
    pub fn new(playfield: Playfield) -> Self {
        Self {
            registry: EntityRegistry::new(),
            positions: ComponentStorage::new(),
            velocities: ComponentStorage::new(),
            shapes: ComponentStorage::new(),
            colliders: ComponentStorage::new(),
            inputs: ComponentStorage::new(),
            durable_bricks: ComponentStorage::new(),
            bonuses: ComponentStorage::new(),
            active_bonuses: ComponentStorage::new(),
            score: Score::default(),
            input: InputState::IDLE,
            surface: playfield.size(),
            viewport: Viewport::IDENTITY,
            playfield,
        }
    }

    /// Playfield bounds
    pub fn playfield(&self) -> Playfield {
        self.playfield
    }

    /// The entity whose collider has `kind`. With several candidates the
    /// oldest one wins, so the answer never depends on table order.
    pub fn find_collider(&self, kind: ColliderKind) -> Option<Entity> {
        self.colliders
            .iter()
            .filter(|(_, collider)| collider.kind() == kind)
            .map(|(entity, _)| entity)
            .min()
    }

    /// The platform, if one is alive
    pub fn platform(&self) -> Option<Entity> {
        self.find_collider(ColliderKind::Platform)
    }

    /// The ball, if one is alive
    pub fn ball(&self) -> Option<Entity> {
        self.find_collider(ColliderKind::Ball)
    }

    /// Every brick, ordered by entity id
    pub fn bricks(&self) -> Vec<Entity> {
        let mut bricks: Vec<Entity> = self
            .colliders
            .iter()
            .filter(|(_, collider)| collider.kind() == ColliderKind::Brick)
            .map(|(entity, _)| entity)
            .collect();
        bricks.sort_unstable();
        bricks
    }

    /// Every live entity, ordered by id
    pub fn entities(&self) -> Vec<Entity> {
        self.registry.alive().collect()
    }

    /// Destroy every entity and clear the per-game resources
    pub fn clear(&mut self) {
        for entity in self.entities() {
            self.destroy_entity(entity);
        }
        self.score.reset();
        self.input = InputState::IDLE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BonusType, Color};

    fn world() -> World {
        World::new(Playfield::new(800.0, 600.0))
    }

    #[test]
    fn test_find_collider_by_kind() {
        let mut world = world();
        let brick = world.create_entity();
        world.set(brick, Collider::rectangle(ColliderKind::Brick, 70.0, 20.0));
        let ball = world.create_entity();
        world.set(ball, Collider::ball(10.0));

        assert_eq!(world.ball(), Some(ball));
        assert_eq!(world.platform(), None);
        assert_eq!(world.bricks(), vec![brick]);
    }

    #[test]
    fn test_clear_destroys_everything() {
        let mut world = world();
        let e = world.create_entity();
        world.set(e, Position::new(1.0, 2.0));
        world.set(e, Shape::circle(5.0, Color::WHITE));
        let timed = world.create_entity();
        world.set(timed, Input::new(400.0));
        world.set(
            timed,
            ActiveBonus {
                kind: BonusType::FastPlatform,
                remaining_time: 5.0,
                original_value: 400.0,
            },
        );
        let bare = world.create_entity();
        world.score.add(30);

        world.clear();

        assert!(!world.is_valid(e));
        assert!(!world.is_valid(timed));
        assert!(!world.is_valid(bare));
        assert!(world.get::<Position>(e).is_none());
        assert!(world.entities_with::<Input>().is_empty());
        assert!(world.entities_with::<ActiveBonus>().is_empty());
        assert!(world.entities().is_empty());
        assert_eq!(world.score.value(), 0);
    }

    #[test]
    fn test_playfield_clamp() {
        let playfield = Playfield::new(800.0, 600.0);
        assert_eq!(playfield.clamp_x(-40.0, 100.0), 0.0);
        assert_eq!(playfield.clamp_x(750.0, 100.0), 700.0);
        assert_eq!(playfield.clamp_x(100.0, 1000.0), 0.0);
    }

    #[test]
    fn test_score_saturates() {
        let mut score = Score::new(u32::MAX - 5);
        score.add(10);
        assert_eq!(score.value(), u32::MAX);
    }
}
