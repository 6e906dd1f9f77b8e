//! Save files
//!
//! A save is a fixed little-endian binary record:
//!
//! ```text
//! magic          8 bytes   "ARCSAVE\0"
//! platform       f32 x2    x, y
//! ball           f32 x4    x, y, vx, vy
//! score          i32
//! brick count    u32
//! per brick      f32 x4    x, y, width, height
//!                u8  x4    r, g, b, a
//!                i32 x2    current hits, max hits
//!                u8        has bonus (0 or 1)
//!                i32       bonus type
//! saved at       u64       seconds since the UNIX epoch
//! ```
//!
//! Loading decodes and checks the whole record before touching the session,
//! so a bad file leaves the game exactly as it was.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use arc_engine::ecs::ComponentStore;
use arc_engine::foundation::math::Vec2;

use crate::components::{
    Bonus, BonusType, Color, DurableBrick, Position, Shape, ShapeKind, Velocity,
};
use crate::error::SaveError;
use crate::factory::{create_brick, BrickSpec};
use crate::session::GameSession;
use crate::world::Score;

/// Magic bytes every save file starts with
pub const SAVE_MAGIC: [u8; 8] = *b"ARCSAVE\0";

/// One brick as stored in a save
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavedBrick {
    /// Top-left corner
    pub position: Vec2,
    /// Width and height
    pub size: Vec2,
    /// Current color
    pub color: Color,
    /// Hits taken
    pub current_hits: u32,
    /// Hits needed; 1 for plain bricks
    pub max_hits: u32,
    /// Bonus still waiting to drop
    pub bonus: Option<BonusType>,
}

impl SavedBrick {
    fn to_spec(self) -> BrickSpec {
        let mut spec = BrickSpec::new(
            self.position.x,
            self.position.y,
            self.size.x,
            self.size.y,
            self.color,
        );
        if self.max_hits > 1 {
            spec.durability = DurableBrick::with_hits(self.max_hits, self.current_hits);
        }
        spec.bonus = self.bonus.map(Bonus::new);
        spec
    }
}

/// Everything a save file carries
#[derive(Debug, Clone, PartialEq)]
pub struct SaveData {
    /// Platform top-left corner
    pub platform: Vec2,
    /// Ball center
    pub ball_position: Vec2,
    /// Ball velocity
    pub ball_velocity: Vec2,
    /// Score
    pub score: u32,
    /// Remaining bricks, ordered by entity id
    pub bricks: Vec<SavedBrick>,
    /// Seconds since the UNIX epoch when the save was captured
    pub saved_at: u64,
}

impl SaveData {
    /// Capture the state of `session`. Call between ticks.
    pub fn capture(session: &GameSession) -> Result<Self, SaveError> {
        let world = session.world();
        let platform = session
            .platform()
            .and_then(|platform| world.get::<Position>(platform))
            .ok_or(SaveError::MissingEntity("platform"))?;
        let ball = session.ball().ok_or(SaveError::MissingEntity("ball"))?;
        let (Some(ball_position), Some(ball_velocity)) =
            (world.get::<Position>(ball), world.get::<Velocity>(ball))
        else {
            return Err(SaveError::MissingEntity("ball"));
        };

        let bricks = session
            .bricks()
            .into_iter()
            .filter_map(|brick| {
                let position = world.get::<Position>(brick)?;
                let shape = world.get::<Shape>(brick)?;
                let size = match shape.kind {
                    ShapeKind::Rectangle { width, height } => {
                        Vec2::new(width, height)
                    }
                    ShapeKind::Circle { .. } => return None,
                };
                let (current_hits, max_hits) = world
                    .get::<DurableBrick>(brick)
                    .map_or((0, 1), |d| (d.current_hits(), d.max_hits()));
                Some(SavedBrick {
                    position: position.0,
                    size,
                    color: shape.color,
                    current_hits,
                    max_hits,
                    bonus: world
                        .get::<Bonus>(brick)
                        .filter(|bonus| !bonus.collected)
                        .map(|bonus| bonus.kind),
                })
            })
            .collect();

        Ok(Self {
            platform: platform.0,
            ball_position: ball_position.0,
            ball_velocity: ball_velocity.linear,
            score: session.score(),
            bricks,
            saved_at: now_secs(),
        })
    }

    /// Encode the record
    pub fn write_to(&self, mut writer: impl Write) -> Result<(), SaveError> {
        writer.write_all(&SAVE_MAGIC)?;
        write_vec2(&mut writer, self.platform)?;
        write_vec2(&mut writer, self.ball_position)?;
        write_vec2(&mut writer, self.ball_velocity)?;
        writer.write_all(&to_i32(self.score).to_le_bytes())?;

        let count = u32::try_from(self.bricks.len()).unwrap_or(u32::MAX);
        writer.write_all(&count.to_le_bytes())?;
        for brick in self.bricks.iter().take(count as usize) {
            write_vec2(&mut writer, brick.position)?;
            write_vec2(&mut writer, brick.size)?;
            writer.write_all(&[brick.color.r, brick.color.g, brick.color.b, brick.color.a])?;
            writer.write_all(&to_i32(brick.current_hits).to_le_bytes())?;
            writer.write_all(&to_i32(brick.max_hits).to_le_bytes())?;
            writer.write_all(&[u8::from(brick.bonus.is_some())])?;
            let code = brick.bonus.map_or(0, BonusType::code);
            writer.write_all(&code.to_le_bytes())?;
        }

        writer.write_all(&self.saved_at.to_le_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Decode and check a record
    pub fn read_from(reader: impl Read) -> Result<Self, SaveError> {
        let mut reader = RecordReader { inner: reader };

        let magic = reader.bytes::<8>()?;
        if magic != SAVE_MAGIC {
            return Err(SaveError::BadHeader);
        }

        let platform = reader.vec2()?;
        let ball_position = reader.vec2()?;
        let ball_velocity = reader.vec2()?;
        let raw_score = reader.i32()?;
        let score = u32::try_from(raw_score).map_err(|_| SaveError::InvalidScore(raw_score))?;

        let count = reader.u32()?;
        let mut bricks = Vec::new();
        for _ in 0..count {
            let position = reader.vec2()?;
            let size = reader.vec2()?;
            let [r, g, b, a] = reader.bytes::<4>()?;
            let current = reader.i32()?;
            let max = reader.i32()?;
            let [has_bonus] = reader.bytes::<1>()?;
            let code = reader.i32()?;

            let (current_hits, max_hits) = match (u32::try_from(current), u32::try_from(max)) {
                (Ok(current_hits), Ok(max_hits))
                    if (1..=DurableBrick::MAX_HITS).contains(&max_hits) && current_hits < max_hits =>
                {
                    (current_hits, max_hits)
                }
                _ => return Err(SaveError::InvalidHits { current, max }),
            };
            let bonus = if has_bonus != 0 {
                Some(BonusType::from_code(code).ok_or(SaveError::InvalidBonusType(code))?)
            } else {
                None
            };

            bricks.push(SavedBrick {
                position,
                size,
                color: Color::rgba(r, g, b, a),
                current_hits,
                max_hits,
                bonus,
            });
        }

        let saved_at = reader.u64()?;

        Ok(Self {
            platform,
            ball_position,
            ball_velocity,
            score,
            bricks,
            saved_at,
        })
    }

    /// Replace the state of `session` with this record. Call between ticks.
    ///
    /// The platform and ball are recreated, which drops their active bonuses
    /// and restarts the speed ramp.
    pub fn apply(&self, session: &mut GameSession) {
        session.respawn_platform_and_ball();
        session.resume();

        let world = session.world_mut();
        for brick in world.bricks() {
            world.destroy_entity(brick);
        }

        if let Some(platform) = world.platform() {
            world.set(platform, Position(self.platform));
        }
        if let Some(ball) = world.ball() {
            world.set(ball, Position(self.ball_position));
            world.set(
                ball,
                Velocity::new(self.ball_velocity.x, self.ball_velocity.y),
            );
        }

        world.score = Score::new(self.score);
        for brick in &self.bricks {
            create_brick(world, &brick.to_spec());
        }

        log::info!(
            "Restored save from {} with {} bricks and score {}",
            self.saved_at,
            self.bricks.len(),
            self.score
        );
    }
}

/// Save `session` to `path`
pub fn save_game(session: &GameSession, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let data = SaveData::capture(session)?;
    data.write_to(BufWriter::new(File::create(path)?))?;
    log::info!("Saved game to {}", path.display());
    Ok(())
}

/// Load `path` into `session`. On error the session is left untouched.
pub fn load_game(session: &mut GameSession, path: impl AsRef<Path>) -> Result<(), SaveError> {
    let path = path.as_ref();
    let data = SaveData::read_from(BufReader::new(File::open(path)?))?;
    data.apply(session);
    log::info!("Loaded game from {}", path.display());
    Ok(())
}

/// Whether a save file exists at `path`
pub fn save_exists(path: impl AsRef<Path>) -> bool {
    path.as_ref().is_file()
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

fn write_vec2(writer: &mut impl Write, v: Vec2) -> io::Result<()> {
    writer.write_all(&v.x.to_le_bytes())?;
    writer.write_all(&v.y.to_le_bytes())
}

struct RecordReader<R> {
    inner: R,
}

impl<R: Read> RecordReader<R> {
    fn bytes<const N: usize>(&mut self) -> Result<[u8; N], SaveError> {
        let mut buf = [0u8; N];
        self.inner.read_exact(&mut buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                SaveError::Truncated
            } else {
                SaveError::Io(e)
            }
        })?;
        Ok(buf)
    }

    fn f32(&mut self) -> Result<f32, SaveError> {
        Ok(f32::from_le_bytes(self.bytes()?))
    }

    fn i32(&mut self) -> Result<i32, SaveError> {
        Ok(i32::from_le_bytes(self.bytes()?))
    }

    fn u32(&mut self) -> Result<u32, SaveError> {
        Ok(u32::from_le_bytes(self.bytes()?))
    }

    fn u64(&mut self) -> Result<u64, SaveError> {
        Ok(u64::from_le_bytes(self.bytes()?))
    }

    fn vec2(&mut self) -> Result<Vec2, SaveError> {
        Ok(Vec2::new(self.f32()?, self.f32()?))
    }
}
