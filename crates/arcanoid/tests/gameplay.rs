//! Whole-pipeline gameplay scenarios

use approx::assert_relative_eq;
use arc_engine::ecs::ComponentStore;

use arcanoid::components::{ActiveBonus, BonusType, DurableBrick, Position, Velocity};
use arcanoid::runner::{run_headless, Autopilot, RunOptions};
use arcanoid::{GameConfig, GameSession, InputSource, InputState, LogRenderer, Phase};

fn session() -> GameSession {
    GameSession::with_seed(GameConfig::default(), 2024)
}

#[test]
fn test_platform_clamped_at_left_edge() {
    let mut session = session();
    let platform = session.platform().unwrap();
    session
        .world_mut()
        .set(platform, Position::new(0.0, 550.0));

    session.tick(0.1, InputState::LEFT);

    let world = session.world();
    assert_relative_eq!(world.get::<Velocity>(platform).unwrap().linear.x, -400.0);
    assert_relative_eq!(world.get::<Position>(platform).unwrap().0.x, 0.0);
}

#[test]
fn test_center_hit_through_pipeline() {
    let mut session = session();
    let ball = session.ball().unwrap();
    let speed = session.world().get::<Velocity>(ball).unwrap().speed;
    session
        .world_mut()
        .set(ball, Position::new(400.0, 540.0));
    session
        .world_mut()
        .set(ball, Velocity::with_speed(0.0, speed, speed));

    session.tick(1.0 / 60.0, InputState::IDLE);

    let velocity = *session.world().get::<Velocity>(ball).unwrap();
    assert_relative_eq!(velocity.linear.x, 0.0);
    assert!(velocity.linear.y < 0.0);
    assert_relative_eq!(velocity.magnitude(), speed, epsilon = 1e-3);
}

#[test]
fn test_ball_keeps_speed_through_every_bounce() {
    let mut session = session();
    let mut autopilot = Autopilot::new(4.0);

    for _ in 0..3000 {
        autopilot.observe(&session);
        let input = autopilot.poll();
        session.tick(1.0 / 60.0, input);
        if session.phase() != Phase::Playing {
            break;
        }

        let ball = session.ball().unwrap();
        let velocity = session.world().get::<Velocity>(ball).unwrap();
        assert_relative_eq!(
            velocity.magnitude(),
            velocity.speed,
            max_relative = 1e-3
        );
    }
}

#[test]
fn test_durable_bricks_never_outlive_their_hits() {
    let mut session = session();
    let mut autopilot = Autopilot::new(4.0);

    for _ in 0..5000 {
        autopilot.observe(&session);
        let input = autopilot.poll();
        session.tick(1.0 / 60.0, input);

        let world = session.world();
        for brick in session.bricks() {
            if let Some(durable) = world.get::<DurableBrick>(brick) {
                assert!(durable.current_hits() < durable.max_hits());
            }
        }
        if session.phase().is_finished() {
            break;
        }
    }
}

#[test]
fn test_autopilot_scores_points() {
    let mut session = session();
    let mut autopilot = Autopilot::new(4.0);
    let mut renderer = LogRenderer::new(600);
    let options = RunOptions {
        max_ticks: 4000,
        real_time: false,
    };

    let summary = run_headless(
        &mut session,
        &mut autopilot,
        &mut renderer,
        &options,
        |session, autopilot| autopilot.observe(session),
    );

    assert!(summary.score > 0);
    assert!(summary.bricks_left < 50);
    assert_eq!(summary.score, session.score());
}

#[test]
fn test_slow_ball_bonus_expires_through_pipeline() {
    let mut config = GameConfig::default();
    config.bonus.duration = 0.5;
    let mut session = GameSession::with_seed(config.clone(), 1);
    let ball = session.ball().unwrap();
    let speed = session.world().get::<Velocity>(ball).unwrap().speed;

    arcanoid::bonus::apply_bonus(
        session.world_mut(),
        ball,
        BonusType::SlowBall,
        &config.bonus,
    );
    assert_relative_eq!(
        session.world().get::<Velocity>(ball).unwrap().speed,
        speed * 0.5
    );

    for _ in 0..40 {
        session.tick(1.0 / 60.0, InputState::IDLE);
    }

    let world = session.world();
    assert!(world.get::<ActiveBonus>(ball).is_none());
    assert_relative_eq!(world.get::<Velocity>(ball).unwrap().speed, speed);
}

#[test]
fn test_speed_ramp_steps_after_interval() {
    let mut session = session();
    let ball = session.ball().unwrap();
    // Park one brick far off the playfield so the level never clears
    let bricks = session.bricks();
    let (kept, rest) = bricks.split_first().unwrap();
    for brick in rest {
        session.world_mut().destroy_entity(*brick);
    }
    session.world_mut().set(*kept, Position::new(0.0, -1000.0));

    let mut autopilot = Autopilot::new(2.0);
    for _ in 0..(11 * 60) {
        autopilot.observe(&session);
        let input = autopilot.poll();
        session.tick(1.0 / 60.0, input);
    }

    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.ball(), Some(ball));
    assert_relative_eq!(session.speed_multiplier(), 1.2);
    let speed = session.world().get::<Velocity>(ball).unwrap().speed;
    assert_relative_eq!(speed, 1.2 * 200.0 * std::f32::consts::SQRT_2, epsilon = 1e-2);
}
