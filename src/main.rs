//! Poly Arcade demo runner
//!
//! Builds one of the demo scenes and steps it headlessly, logging what
//! happens. Usage:
//!
//! ```text
//! poly-arcade [damping|nbody|breakout|descend] [--steps N] [--dt SECONDS] [--settings FILE]
//! ```
//!
//! Set `RUST_LOG=debug` to see removals and power-up activity.

use std::f64::consts::TAU;
use std::process::ExitCode;

use rand::Rng;

use poly_arcade::platform::{FrameClock, Key, KeyDispatcher, KeyEvent, KeyEventKind};
use poly_arcade::renderer::{Canvas, Viewport, render_scene};
use poly_arcade::settings::Settings;
use poly_arcade::sim::{
    Body, BodyId, Color, PhysicsError, PowerUpKind, Scene, Vector2, create_destructive_collision,
    create_drag, create_newtonian_gravity, create_one_sided_collision, create_partial_collision,
    create_partial_collision_with_life, create_physics_collision, create_player_gravity,
    create_player_platform_collision, create_player_point_collision,
    create_player_powerup_collision, create_spring, shape,
};

/// Half-extent of the demo world
const BOUNDARY: Vector2 = Vector2::new(500.0, 250.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Demo {
    Damping,
    NBody,
    Breakout,
    Descend,
}

impl Demo {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "damping" => Some(Demo::Damping),
            "nbody" | "nbodies" => Some(Demo::NBody),
            "breakout" => Some(Demo::Breakout),
            "descend" => Some(Demo::Descend),
            _ => None,
        }
    }
}

struct Args {
    demo: Demo,
    steps: u32,
    dt: f64,
    settings: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        demo: Demo::Damping,
        steps: 600,
        dt: 1.0 / 60.0,
        settings: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--steps" => {
                let v = iter.next().ok_or("--steps needs a value")?;
                args.steps = v.parse().map_err(|_| format!("bad step count: {v}"))?;
            }
            "--dt" => {
                let v = iter.next().ok_or("--dt needs a value")?;
                args.dt = v.parse().map_err(|_| format!("bad dt: {v}"))?;
            }
            "--settings" => {
                args.settings = Some(iter.next().ok_or("--settings needs a value")?);
            }
            other => {
                args.demo = Demo::from_str(other).ok_or(format!("unknown demo: {other}"))?;
            }
        }
    }
    Ok(args)
}

/// Canvas that only counts what would be drawn
#[derive(Default)]
struct HeadlessCanvas {
    frames: u64,
    polygons: u64,
}

impl Canvas for HeadlessCanvas {
    fn size(&self) -> (u32, u32) {
        (1000, 500)
    }

    fn clear(&mut self) {}

    fn fill_polygon(&mut self, _points: &[(i32, i32)], _color: Color) {
        self.polygons += 1;
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

fn rainbow(i: f64) -> Color {
    let s = i * 0.5;
    Color::new(
        ((1.0 + s.sin()) / 2.0) as f32,
        ((1.0 + (s + 2.0).sin()) / 2.0) as f32,
        ((1.0 + (s + 4.0).sin()) / 2.0) as f32,
    )
}

/// A row of balls hung from fixed anchors by springs of falling stiffness
fn build_damping(scene: &mut Scene) -> Result<(), PhysicsError> {
    const RADIUS: f64 = 10.0;
    let mut stiffness = 50.0;
    let count = (BOUNDARY.x / RADIUS) as usize;
    for i in 0..count {
        let x = RADIUS * (2 * i + 1) as f64;
        let anchor = scene.add_body(shape::moving_ball(
            Vector2::new(x - BOUNDARY.x, 0.0),
            RADIUS,
            f64::INFINITY,
            Color::WHITE,
            0,
        )?);
        let ball = scene.add_body(shape::moving_ball(
            Vector2::new(x - BOUNDARY.x, BOUNDARY.y - x / 10.0),
            RADIUS,
            10.0,
            rainbow(i as f64),
            0,
        )?);
        create_spring(scene, stiffness, ball, anchor)?;
        create_drag(scene, 0.9, ball)?;
        stiffness *= 0.9;
    }
    Ok(())
}

/// Randomly scattered stars pulling on each other
fn build_nbody(scene: &mut Scene) -> Result<(), PhysicsError> {
    const COUNT: usize = 20;
    let mut ids = Vec::with_capacity(COUNT);
    for _ in 0..COUNT {
        let rng = scene.rng();
        let center = Vector2::new(
            rng.random_range(-BOUNDARY.x..BOUNDARY.x),
            rng.random_range(-BOUNDARY.y..BOUNDARY.y),
        );
        let radius = rng.random_range(10.0..30.0);
        let color = scene.random_color();
        let star = shape::star(4, center, radius)?;
        let mass = star.area();
        ids.push(scene.add_body(Body::new(star, mass, color)?));
    }
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            create_newtonian_gravity(scene, 50.0, *a, *b)?;
        }
    }
    Ok(())
}

fn wall(scene: &mut Scene, center: Vector2, dims: Vector2) -> Result<BodyId, PhysicsError> {
    Ok(scene.add_body(shape::platform(center, dims, Color::BLACK, 0, false)?))
}

/// Ball, paddle and walls with a grid of bricks; the bottom wall eats the ball
fn build_breakout(scene: &mut Scene) -> Result<(), PhysicsError> {
    let paddle = scene.add_body(shape::platform(
        Vector2::new(0.0, -BOUNDARY.y + 20.0),
        Vector2::new(100.0, 15.0),
        Color::RED,
        0,
        false,
    )?);
    let ball = scene.add_body(shape::moving_ball(
        Vector2::new(0.0, -BOUNDARY.y + 60.0),
        8.0,
        1.0,
        Color::RED,
        0,
    )?);
    scene
        .body_mut(ball)
        .ok_or(PhysicsError::UnknownBody(ball))?
        .set_velocity(Vector2::new(120.0, 300.0));

    create_physics_collision(scene, 1.05, ball, paddle)?;
    let side_dims = Vector2::new(20.0, BOUNDARY.y * 2.0);
    let cap_dims = Vector2::new(BOUNDARY.x * 2.0, 20.0);
    let left = wall(scene, Vector2::new(-BOUNDARY.x - 10.0, 0.0), side_dims)?;
    let right = wall(scene, Vector2::new(BOUNDARY.x + 10.0, 0.0), side_dims)?;
    let top = wall(scene, Vector2::new(0.0, BOUNDARY.y + 10.0), cap_dims)?;
    let bottom = wall(scene, Vector2::new(0.0, -BOUNDARY.y - 10.0), cap_dims)?;
    for side in [left, right, top] {
        create_physics_collision(scene, 1.0, ball, side)?;
    }
    create_destructive_collision(scene, ball, bottom)?;

    let cols = 10;
    let width = BOUNDARY.x * 2.0 / cols as f64;
    for row in 0..3 {
        for col in 0..cols {
            let center = Vector2::new(
                -BOUNDARY.x + width * (col as f64 + 0.5),
                BOUNDARY.y - 30.0 - 25.0 * row as f64,
            );
            let brick = scene.add_body(shape::platform(
                center,
                Vector2::new(width - 4.0, 20.0),
                rainbow((row * cols + col) as f64),
                row,
                false,
            )?);
            if row == 0 {
                create_partial_collision(scene, 1.0, ball, brick)?;
            } else {
                create_partial_collision_with_life(scene, 1.0, ball, brick)?;
            }
        }
    }
    Ok(())
}

/// Player dropping through rising platforms, collecting points and power-ups
fn build_descend(scene: &mut Scene) -> Result<BodyId, PhysicsError> {
    let player = scene.add_body(shape::player(
        5,
        Vector2::new(0.0, BOUNDARY.y - 40.0),
        15.0,
        1.0,
        Color::BLUE,
        3,
    )?);
    create_player_gravity(scene, player)?;

    for i in 0..8 {
        let x = scene.rng().random_range(-BOUNDARY.x + 60.0..BOUNDARY.x - 60.0);
        let y = BOUNDARY.y - 100.0 - 60.0 * i as f64;
        let platform = scene.add_body(shape::platform(
            Vector2::new(x, y),
            Vector2::new(120.0, 10.0),
            Color::GREEN,
            0,
            i == 7,
        )?);
        scene
            .body_mut(platform)
            .ok_or(PhysicsError::UnknownBody(platform))?
            .set_velocity(Vector2::new(0.0, 20.0));
        create_player_platform_collision(scene, player, platform)?;

        let coin = Vector2::new(x, y + 25.0);
        let coin = scene.add_body(shape::point(coin, 5.0, 1.0, Color::YELLOW)?);
        create_player_point_collision(scene, player, coin)?;
    }

    let kinds = [PowerUpKind::Invincibility, PowerUpKind::Expand];
    for (i, kind) in kinds.into_iter().enumerate() {
        let angle = TAU * i as f64 / kinds.len() as f64;
        let center = Vector2::new(angle.cos(), angle.sin()) * 80.0;
        let power_up = scene.add_body(shape::power_up(kind, center, 10.0, 1.0, Color::YELLOW)?);
        create_player_powerup_collision(scene, player, power_up)?;
    }

    // Bumper that knocks the player away and never moves itself
    let bumper = Vector2::new(0.0, -BOUNDARY.y + 60.0);
    let bumper = scene.add_body(shape::gravity_ball(bumper, 20.0, 50.0, Color::RED)?);
    create_one_sided_collision(scene, 0.8, player, bumper)?;
    Ok(player)
}

/// Steer the player from scripted key presses
fn steer(event: KeyEvent, scene: &mut Scene) {
    let Some(player) = scene.body_at_mut(0) else {
        return;
    };
    let v = player.velocity();
    let vx = match (event.key, event.kind) {
        (Key::Left, KeyEventKind::Pressed) => -80.0 - 40.0 * event.held_time,
        (Key::Right, KeyEventKind::Pressed) => 80.0 + 40.0 * event.held_time,
        (Key::Left | Key::Right, KeyEventKind::Released) => 0.0,
        _ => v.x,
    };
    player.set_velocity(Vector2::new(vx, v.y));
}

fn run(args: &Args) -> Result<(), PhysicsError> {
    let settings = match &args.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let max_speed = settings.max_player_speed;
    let dt = args.dt.min(settings.max_frame_dt);
    let mut scene = Scene::with_settings(settings);

    let mut keys = KeyDispatcher::new();
    let player = match args.demo {
        Demo::Damping => {
            build_damping(&mut scene)?;
            None
        }
        Demo::NBody => {
            build_nbody(&mut scene)?;
            None
        }
        Demo::Breakout => {
            build_breakout(&mut scene)?;
            None
        }
        Demo::Descend => {
            keys.set_handler(steer);
            Some(build_descend(&mut scene)?)
        }
    };
    log::info!(
        "Running {:?}: {} bodies, {} force creators, dt {:.4}",
        args.demo,
        scene.body_count(),
        scene.force_creator_count(),
        dt
    );

    let viewport = Viewport::new(-BOUNDARY, BOUNDARY)?;
    let mut canvas = HeadlessCanvas::default();
    let mut clock = FrameClock::new();
    clock.time_since_last_call();
    let mut elapsed = 0.0;
    let mut held: Option<Key> = None;

    for step in 0..args.steps {
        let t = step as f64 * dt;
        if player.is_some() {
            // Alternate left and right every two seconds
            let key = if (t / 2.0) as u32 % 2 == 0 {
                Key::Left
            } else {
                Key::Right
            };
            if let Some(prev) = held.filter(|prev| *prev != key) {
                keys.dispatch(prev, KeyEventKind::Released, t, false, &mut scene);
            }
            let repeat = held == Some(key);
            keys.dispatch(key, KeyEventKind::Pressed, t, repeat, &mut scene);
            held = Some(key);
        }

        scene.tick(dt);

        if let Some(id) = player {
            match scene.body_mut(id) {
                Some(p) => {
                    p.clamp_velocity(max_speed);
                    p.wrap_horizontally(BOUNDARY.x);
                }
                None => {
                    log::info!("Player gone after {} steps", step);
                    break;
                }
            }
        }

        render_scene(&mut canvas, &viewport, &scene);
        elapsed += clock.time_since_last_call();
        log::trace!("Step {}: {} bodies", step, scene.body_count());
    }

    log::info!(
        "Done: {} frames, {} polygons drawn, {} bodies left, score {}, status {:?} ({:.3}s wall)",
        canvas.frames,
        canvas.polygons,
        scene.body_count(),
        scene.score(),
        scene.status(),
        elapsed
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Poly Arcade demo runner starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
