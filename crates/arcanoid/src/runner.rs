//! Headless game runner
//!
//! Drives a [`GameSession`] at the configured fixed time step with an input
//! source, publishing every frame to a renderer. Used by the binary and by
//! integration tests.

use arc_engine::ecs::ComponentStore;
use arc_engine::foundation::time::FramePacer;

use crate::components::{Collider, Position};
use crate::input::{InputSource, InputState};
use crate::render::Renderer;
use crate::session::{GameSession, Phase};

/// Input source that steers the platform under the ball
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    platform_center: Option<f32>,
    ball_x: Option<f32>,
    dead_zone: f32,
}

impl Autopilot {
    /// Autopilot that holds still while within `dead_zone` of the ball
    pub fn new(dead_zone: f32) -> Self {
        Self {
            platform_center: None,
            ball_x: None,
            dead_zone,
        }
    }

    /// Update what the autopilot sees from the latest session state
    pub fn observe(&mut self, session: &GameSession) {
        let world = session.world();
        self.ball_x = session
            .ball()
            .and_then(|ball| world.get::<Position>(ball))
            .map(|position| position.0.x);
        self.platform_center = session.platform().and_then(|platform| {
            let position = world.get::<Position>(platform)?;
            let collider = world.get::<Collider>(platform)?;
            Some(position.0.x + collider.size.x / 2.0)
        });
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> InputState {
        let (Some(platform), Some(ball)) = (self.platform_center, self.ball_x) else {
            return InputState::IDLE;
        };
        if ball < platform - self.dead_zone {
            InputState::LEFT
        } else if ball > platform + self.dead_zone {
            InputState::RIGHT
        } else {
            InputState::IDLE
        }
    }
}

/// How a headless run is driven
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Maximum number of ticks
    pub max_ticks: u64,
    /// Sleep between ticks to hold the configured frame rate
    pub real_time: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_ticks: 3600,
            real_time: false,
        }
    }
}

/// Outcome of a headless run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Ticks driven
    pub ticks: u64,
    /// Final score
    pub score: u32,
    /// Lives left
    pub lives: u32,
    /// Final phase
    pub phase: Phase,
    /// Bricks left
    pub bricks_left: usize,
}

/// Run `session` until it finishes or `options.max_ticks` ticks have passed.
/// `before_tick` is called with the session before each tick is sampled.
pub fn run_headless<I, R>(
    session: &mut GameSession,
    input: &mut I,
    renderer: &mut R,
    options: &RunOptions,
    mut before_tick: impl FnMut(&GameSession, &mut I),
) -> RunSummary
where
    I: InputSource,
    R: Renderer,
{
    let time_step = session.config().window.time_step();
    let mut pacer = FramePacer::new(session.config().window.target_fps);
    let mut ticks = 0;

    while ticks < options.max_ticks && !session.phase().is_finished() {
        if options.real_time {
            pacer.begin_frame();
        }

        before_tick(session, input);
        let state = input.poll();
        session.tick(time_step, state);
        renderer.draw(&session.snapshot());
        ticks += 1;

        if options.real_time {
            pacer.end_frame();
        }
    }

    let summary = RunSummary {
        ticks,
        score: session.score(),
        lives: session.lives(),
        phase: session.phase(),
        bricks_left: session.bricks().len(),
    };
    log::info!(
        "Run finished after {} ticks: {:?}, score {}",
        summary.ticks,
        summary.phase,
        summary.score
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::input::ScriptedInput;
    use crate::render::LogRenderer;

    #[test]
    fn test_autopilot_tracks_ball() {
        let mut session = GameSession::with_seed(GameConfig::default(), 3);
        let mut autopilot = Autopilot::new(5.0);
        assert_eq!(autopilot.poll(), InputState::IDLE);

        let ball = session.ball().unwrap();
        session.world_mut().set(ball, Position::new(100.0, 400.0));
        autopilot.observe(&session);
        assert_eq!(autopilot.poll(), InputState::LEFT);

        session.world_mut().set(ball, Position::new(402.0, 400.0));
        autopilot.observe(&session);
        assert_eq!(autopilot.poll(), InputState::IDLE);
    }

    #[test]
    fn test_run_stops_at_tick_limit() {
        let mut session = GameSession::with_seed(GameConfig::default(), 3);
        let mut input = ScriptedInput::default();
        let mut renderer = LogRenderer::new(60);
        let options = RunOptions {
            max_ticks: 30,
            real_time: false,
        };

        let summary = run_headless(&mut session, &mut input, &mut renderer, &options, |_, _| {});

        assert_eq!(summary.ticks, 30);
        assert_eq!(renderer.frames(), 30);
        assert_eq!(summary.phase, Phase::Playing);
    }
}
