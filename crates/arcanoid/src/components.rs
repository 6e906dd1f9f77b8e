//! Game-specific components
//!
//! Every component is a plain value keyed by its owning entity. Systems pick
//! the entities they act on by the components they carry; the [`Collider`]
//! kind is what tells a ball from a platform or a brick.

use std::fmt;

use arc_engine::ecs::Component;
use arc_engine::foundation::math::{with_magnitude, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Position in playfield coordinates (y grows downward).
///
/// Balls are positioned by their center, rectangles by their top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

impl Component for Position {}

impl Position {
    /// Create a position
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Velocity component for physics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    /// Linear velocity in units per second
    pub linear: Vec2,

    /// Nominal speed the linear velocity is renormalized to after bounces
    pub speed: f32,
}

impl Component for Velocity {}

impl Velocity {
    /// Create a velocity whose nominal speed is its magnitude
    pub fn new(vx: f32, vy: f32) -> Self {
        let linear = Vec2::new(vx, vy);
        Self {
            linear,
            speed: linear.norm(),
        }
    }

    /// Create a velocity with an explicit nominal speed.
    ///
    /// A zero `speed` with a non-zero vector falls back to the vector's magnitude.
    pub fn with_speed(vx: f32, vy: f32, speed: f32) -> Self {
        if speed == 0.0 {
            Self::new(vx, vy)
        } else {
            Self {
                linear: Vec2::new(vx, vy),
                speed,
            }
        }
    }

    /// Stationary velocity
    pub fn zero() -> Self {
        Self {
            linear: Vec2::zeros(),
            speed: 0.0,
        }
    }

    /// Rescale the linear velocity to the nominal speed
    pub fn renormalize(&mut self) {
        self.linear = with_magnitude(self.linear, self.speed);
    }

    /// Change the nominal speed and rescale the linear velocity to match
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.renormalize();
    }

    /// Actual magnitude of the linear velocity
    pub fn magnitude(&self) -> f32 {
        self.linear.norm()
    }
}

/// 8-bit RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque green
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Opaque red
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Opaque blue
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Opaque color from channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from all four channels
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply the RGB channels by `factor` (clamped to `[0, 1]`); alpha is kept
    #[must_use]
    pub fn scaled(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |channel: u8| (f32::from(channel) * factor) as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
            a: self.a,
        }
    }
}

/// Geometry of a drawable shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Axis-aligned rectangle anchored at its top-left corner
    Rectangle {
        /// Width
        width: f32,
        /// Height
        height: f32,
    },
    /// Circle anchored at its center
    Circle {
        /// Radius
        radius: f32,
    },
}

/// Shape component: what the renderer draws for an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    /// Geometry
    pub kind: ShapeKind,
    /// Fill color
    pub color: Color,
}

impl Component for Shape {}

impl Shape {
    /// Rectangle shape
    pub fn rectangle(width: f32, height: f32, color: Color) -> Self {
        Self {
            kind: ShapeKind::Rectangle { width, height },
            color,
        }
    }

    /// Circle shape
    pub fn circle(radius: f32, color: Color) -> Self {
        Self {
            kind: ShapeKind::Circle { radius },
            color,
        }
    }

    /// Width of a rectangle, `None` for circles
    pub fn width(&self) -> Option<f32> {
        match self.kind {
            ShapeKind::Rectangle { width, .. } => Some(width),
            ShapeKind::Circle { .. } => None,
        }
    }

    /// Change the width of a rectangle; circles are left alone
    pub fn set_width(&mut self, new_width: f32) {
        if let ShapeKind::Rectangle { width, .. } = &mut self.kind {
            *width = new_width;
        }
    }
}

/// What role a collider plays in collision resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderKind {
    /// The player-controlled paddle
    Platform,
    /// The ball
    Ball,
    /// Static wall
    Wall,
    /// Destructible brick
    Brick,
}

/// Collision component.
///
/// The kind is fixed at construction and cannot change for the lifetime of
/// the entity; only the size may be adjusted (e.g. by bonuses).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    kind: ColliderKind,
    /// Radius for ball colliders
    pub radius: f32,
    /// Size for rectangular colliders
    pub size: Vec2,
}

impl Component for Collider {}

impl Collider {
    /// Circular ball collider
    pub fn ball(radius: f32) -> Self {
        Self {
            kind: ColliderKind::Ball,
            radius,
            size: Vec2::zeros(),
        }
    }

    /// Rectangular collider of the given kind
    pub fn rectangle(kind: ColliderKind, width: f32, height: f32) -> Self {
        Self {
            kind,
            radius: 0.0,
            size: Vec2::new(width, height),
        }
    }

    /// The collider kind
    pub fn kind(&self) -> ColliderKind {
        self.kind
    }

    /// Bounding box of this collider placed at `position`
    pub fn bounds(&self, position: Vec2) -> Rect {
        match self.kind {
            ColliderKind::Ball => Rect::around_circle(position, self.radius),
            _ => Rect::new(position.x, position.y, self.size.x, self.size.y),
        }
    }
}

/// Player input state, written by the input system every tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Input {
    /// Move-left control held
    pub left_pressed: bool,
    /// Move-right control held
    pub right_pressed: bool,
    /// Horizontal speed while a control is held
    pub move_speed: f32,
}

impl Component for Input {}

impl Input {
    /// Input with nothing pressed
    pub fn new(move_speed: f32) -> Self {
        Self {
            left_pressed: false,
            right_pressed: false,
            move_speed,
        }
    }

    /// -1 for left, +1 for right, 0 for neither. Left wins when both are held.
    pub fn direction(&self) -> f32 {
        if self.left_pressed {
            -1.0
        } else if self.right_pressed {
            1.0
        } else {
            0.0
        }
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new(400.0)
    }
}

/// Hit counter for bricks that survive more than one hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurableBrick {
    max_hits: u32,
    current_hits: u32,
}

impl Component for DurableBrick {}

impl DurableBrick {
    /// Most hits any brick may need
    pub const MAX_HITS: u32 = 255;

    /// Fresh brick needing `max_hits` hits (at least one)
    pub fn new(max_hits: u32) -> Self {
        Self {
            max_hits: max_hits.max(1),
            current_hits: 0,
        }
    }

    /// Brick with hits already taken. `None` if that would break `current <= max`.
    pub fn with_hits(max_hits: u32, current_hits: u32) -> Option<Self> {
        (max_hits >= 1 && current_hits <= max_hits).then_some(Self {
            max_hits,
            current_hits,
        })
    }

    /// Hits needed to destroy the brick
    pub fn max_hits(&self) -> u32 {
        self.max_hits
    }

    /// Hits taken so far
    pub fn current_hits(&self) -> u32 {
        self.current_hits
    }

    /// Register one hit; a destroyed brick takes no more
    pub fn take_hit(&mut self) {
        if !self.is_destroyed() {
            self.current_hits += 1;
        }
    }

    /// Whether every hit has been taken
    pub fn is_destroyed(&self) -> bool {
        self.current_hits >= self.max_hits
    }

    /// Fraction of hits taken, in `[0, 1]`
    pub fn damage_ratio(&self) -> f32 {
        self.current_hits as f32 / self.max_hits as f32
    }

    /// Fraction of health left, in `[0, 1]`
    pub fn health_fraction(&self) -> f32 {
        1.0 - self.damage_ratio()
    }
}

/// Temporary gameplay modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BonusType {
    /// Slows the ball down
    SlowBall,
    /// Platform moves faster
    FastPlatform,
    /// Platform is wider
    BigPlatform,
}

impl BonusType {
    /// Every bonus type, in code order
    pub const ALL: [Self; 3] = [Self::SlowBall, Self::FastPlatform, Self::BigPlatform];

    /// Whether the bonus acts on the ball (otherwise on the platform)
    pub fn targets_ball(self) -> bool {
        matches!(self, Self::SlowBall)
    }

    /// Stable numeric code used in save files
    pub fn code(self) -> i32 {
        match self {
            Self::SlowBall => 0,
            Self::FastPlatform => 1,
            Self::BigPlatform => 2,
        }
    }

    /// Inverse of [`code`](Self::code)
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

impl fmt::Display for BonusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SlowBall => "slow ball",
            Self::FastPlatform => "fast platform",
            Self::BigPlatform => "big platform",
        };
        f.write_str(name)
    }
}

/// Marks a brick that grants a bonus when destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bonus {
    /// Which bonus is granted
    pub kind: BonusType,
    /// Set once the bonus has been granted; it never fires twice
    pub collected: bool,
}

impl Component for Bonus {}

impl Bonus {
    /// Uncollected bonus
    pub fn new(kind: BonusType) -> Self {
        Self {
            kind,
            collected: false,
        }
    }
}

/// A bonus currently in effect on an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveBonus {
    /// Which bonus is active
    pub kind: BonusType,
    /// Seconds until the effect is reverted
    pub remaining_time: f32,
    /// Attribute value before the bonus was applied
    pub original_value: f32,
}

impl Component for ActiveBonus {}
