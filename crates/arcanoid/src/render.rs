//! Render snapshot
//!
//! After each tick the session publishes a read-only [`FrameSnapshot`] of the
//! store. Presentation backends implement [`Renderer`] and never see the
//! store itself.

use arc_engine::ecs::Entity;
use arc_engine::foundation::math::Vec2;

use crate::components::{BonusType, Color, ShapeKind};
use crate::session::Phase;

/// Letterboxed mapping from playfield coordinates to the presentation surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Uniform scale from playfield units to surface pixels
    pub scale: f32,
    /// Horizontal offset of the playfield on the surface
    pub offset_x: f32,
    /// Vertical offset of the playfield on the surface
    pub offset_y: f32,
}

impl Viewport {
    /// Identity mapping
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Fit a `playfield` into a `surface`, keeping the aspect ratio and
    /// centering the leftover space. `None` for a degenerate size.
    pub fn fit(playfield: Vec2, surface: Vec2) -> Option<Self> {
        if playfield.x <= 0.0 || playfield.y <= 0.0 || surface.x <= 0.0 || surface.y <= 0.0 {
            return None;
        }
        let scale = (surface.x / playfield.x).min(surface.y / playfield.y);
        Some(Self {
            scale,
            offset_x: (surface.x - playfield.x * scale) / 2.0,
            offset_y: (surface.y - playfield.y * scale) / 2.0,
        })
    }

    /// Map a playfield point to surface coordinates
    pub fn to_surface(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One entity as the renderer sees it
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    /// Source entity
    pub entity: Entity,
    /// Position (top-left for rectangles, center for circles)
    pub position: Vec2,
    /// Geometry
    pub shape: ShapeKind,
    /// Fill color
    pub color: Color,
    /// Damage taken in `[0, 1]`, for bricks that take more than one hit
    pub damage: Option<f32>,
    /// Bonus the brick drops when destroyed
    pub bonus_indicator: Option<BonusType>,
    /// Bonus in effect and its remaining seconds
    pub active_bonus: Option<(BonusType, f32)>,
}

impl Drawable {
    /// Whether a durable-brick outline should be drawn
    pub fn is_durable(&self) -> bool {
        self.damage.is_some()
    }
}

/// Indicator color for a brick carrying `kind`
pub fn bonus_color(kind: BonusType) -> Color {
    match kind {
        BonusType::SlowBall => Color::RED,
        BonusType::FastPlatform => Color::GREEN,
        BonusType::BigPlatform => Color::BLUE,
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    /// Drawables ordered by entity id
    pub drawables: Vec<Drawable>,
    /// Current score
    pub score: u32,
    /// Lives left
    pub lives: u32,
    /// Session phase
    pub phase: Phase,
    /// Surface mapping
    pub viewport: Viewport,
}

impl FrameSnapshot {
    /// The drawable for `entity`, if it is visible
    pub fn drawable(&self, entity: Entity) -> Option<&Drawable> {
        self.drawables.iter().find(|d| d.entity == entity)
    }
}

/// Presentation backend
pub trait Renderer {
    /// Draw a frame
    fn draw(&mut self, frame: &FrameSnapshot);
}

/// Renderer that logs a one-line summary every `every` frames
#[derive(Debug)]
pub struct LogRenderer {
    every: u64,
    frames: u64,
}

impl LogRenderer {
    /// Log every `every`-th frame (at least every frame)
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }

    /// Frames drawn so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &FrameSnapshot) {
        if self.frames % self.every == 0 {
            let bonuses = frame
                .drawables
                .iter()
                .filter_map(|d| d.active_bonus)
                .map(|(kind, remaining)| format!("{kind} {remaining:.1}s"))
                .collect::<Vec<_>>();
            log::info!(
                "Frame {}: {:?}, score {}, lives {}, {} drawables, bonuses [{}]",
                self.frames,
                frame.phase,
                frame.score,
                frame.lives,
                frame.drawables.len(),
                bonuses.join(", ")
            );
        }
        self.frames += 1;
    }
}
