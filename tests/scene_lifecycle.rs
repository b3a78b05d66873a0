//! Multi-tick scenarios: deferred removal, creator retirement and game rules
//! working together through a scene

use std::cell::RefCell;
use std::rc::Rc;

use poly_arcade::Settings;
use poly_arcade::sim::{
    Body, BodyId, BodyKind, Color, PowerUpKind, Scene, Vector2, World, create_collision,
    create_destructive_collision, create_partial_collision_with_life,
    create_partial_destructive_collision, create_physics_collision, create_player_gravity, create_player_platform_collision, create_player_point_collision,
    create_player_powerup_collision, shape,
};

fn block(scene: &mut Scene, center: Vector2) -> BodyId {
    let shape = shape::rectangle(center, Vector2::new(2.0, 2.0)).unwrap();
    scene.add_body(Body::new(shape, 1.0, Color::BLACK).unwrap())
}

#[test]
fn test_reaping_order_across_ticks() {
    let mut scene = Scene::new();
    let ids: Vec<BodyId> = (0..6)
        .map(|i| block(&mut scene, Vector2::new(10.0 * i as f64, 0.0)))
        .collect();

    // Each tick a creator removes the next odd-indexed body
    let queue = Rc::new(RefCell::new(vec![ids[5], ids[3], ids[1]]));
    let pending = queue.clone();
    scene
        .add_force_creator(
            move |world: &mut World| {
                if let Some(id) = pending.borrow_mut().pop() {
                    world.remove_body(id).unwrap();
                }
            },
            [],
        )
        .unwrap();

    scene.tick(0.01);
    assert_eq!(
        scene.ids().collect::<Vec<_>>(),
        vec![ids[0], ids[2], ids[3], ids[4], ids[5]]
    );
    scene.tick(0.01);
    assert_eq!(
        scene.ids().collect::<Vec<_>>(),
        vec![ids[0], ids[2], ids[4], ids[5]]
    );
    scene.tick(0.01);
    assert_eq!(scene.ids().collect::<Vec<_>>(), vec![ids[0], ids[2], ids[4]]);
    assert_eq!(scene.id_at(1), Some(ids[2]));
    assert!(queue.borrow().is_empty());

    // The global creator outlives every removal
    scene.tick(0.01);
    assert_eq!(scene.force_creator_count(), 1);
    assert_eq!(scene.body_count(), 3);
}

#[test]
fn test_removed_body_still_collides_within_its_tick() {
    let mut scene = Scene::new();
    let a = block(&mut scene, Vector2::ZERO);
    let b = block(&mut scene, Vector2::new(1.0, 0.0));
    let c = block(&mut scene, Vector2::new(2.5, 0.0));
    // a removes b; c still sees b this tick because removal is deferred
    create_destructive_collision(&mut scene, a, b).unwrap();
    let hits = Rc::new(RefCell::new(0));
    let counter = hits.clone();
    create_collision(
        &mut scene,
        c,
        b,
        move |_: &mut World, _: BodyId, _: BodyId, _: Vector2| *counter.borrow_mut() += 1,
    )
    .unwrap();

    scene.tick(0.01);
    assert_eq!(*hits.borrow(), 1);
    assert_eq!(scene.ids().collect::<Vec<_>>(), vec![c]);
    assert_eq!(scene.force_creator_count(), 0);
}

#[test]
fn test_ball_breaks_brick_then_bounces_between_walls() {
    let mut scene = Scene::new();
    let left = scene.add_body(
        shape::platform(Vector2::new(-20.0, 0.0), Vector2::new(2.0, 40.0), Color::BLACK, 0, false)
            .unwrap(),
    );
    let brick = scene.add_body(
        shape::platform(Vector2::new(20.0, 0.0), Vector2::new(2.0, 40.0), Color::RED, 1, false)
            .unwrap(),
    );
    let ball = scene.add_body(shape::moving_ball(Vector2::ZERO, 1.0, 1.0, Color::WHITE, 0).unwrap());
    scene
        .body_mut(ball)
        .unwrap()
        .set_velocity(Vector2::new(10.0, 0.0));
    create_physics_collision(&mut scene, 1.0, ball, left).unwrap();
    create_partial_collision_with_life(&mut scene, 1.0, ball, brick).unwrap();

    let mut brick_hits = 0;
    let mut last_vx = 10.0;
    for _ in 0..2000 {
        scene.tick(0.01);
        let Some(b) = scene.body(ball) else { break };
        let vx = b.velocity().x;
        if last_vx > 0.0 && vx < 0.0 {
            brick_hits += 1;
        }
        last_vx = vx;
    }

    // One life means the brick survives the first hit and dies on the second
    assert_eq!(brick_hits, 2);
    assert!(scene.body(brick).is_none());
    let speed = scene.body(ball).unwrap().velocity().length();
    assert!((speed - 10.0).abs() < 1e-9);
    assert_eq!(scene.force_creator_count(), 1);
}

#[test]
fn test_descend_player_lands_collects_and_powers_up() {
    let mut settings = Settings::default();
    settings.powerup_ticks = 500;
    let mut scene = Scene::with_settings(settings);

    let player = scene
        .add_body(shape::player(5, Vector2::new(0.0, 30.0), 5.0, 1.0, Color::BLUE, 3).unwrap());
    let platform = scene.add_body(
        shape::platform(Vector2::ZERO, Vector2::new(60.0, 4.0), Color::GREEN, 0, false).unwrap(),
    );
    let coin = scene.add_body(shape::point(Vector2::new(0.0, 15.0), 2.0, 1.0, Color::YELLOW).unwrap());
    let star = scene.add_body(
        shape::power_up(PowerUpKind::Invincibility, Vector2::new(0.0, 8.0), 2.0, 1.0, Color::YELLOW)
            .unwrap(),
    );
    create_player_gravity(&mut scene, player).unwrap();
    create_player_platform_collision(&mut scene, player, platform).unwrap();
    create_player_point_collision(&mut scene, player, coin).unwrap();
    create_player_powerup_collision(&mut scene, player, star).unwrap();

    for _ in 0..200 {
        scene.tick(0.001);
    }

    assert_eq!(scene.score(), 1);
    assert!(scene.body(coin).is_none());
    assert!(scene.body(star).is_none());
    assert!(scene.status().invincible);

    let p = scene.body(player).unwrap();
    assert_eq!(p.kind(), BodyKind::Player);
    assert!(p.info().colliding);
    assert_eq!(p.velocity().y, 0.0);
    let top = scene.body(platform).unwrap().shape().bounding_box().max.y;
    assert!((p.shape().bounding_box().min.y - top).abs() < 1e-9);

    // Only the gravity and platform rules remain
    assert_eq!(scene.force_creator_count(), 2);

    // Picked up after roughly 60 ticks, so the effect is over by tick 600
    for _ in 0..400 {
        scene.tick(0.001);
    }
    assert!(!scene.status().invincible);
    assert!(scene.body(player).unwrap().info().colliding);
}

#[test]
fn test_player_falls_again_when_platform_is_destroyed() {
    let mut scene = Scene::new();
    let player = scene
        .add_body(shape::player(5, Vector2::new(0.0, 30.0), 5.0, 1.0, Color::BLUE, 3).unwrap());
    let platform = scene.add_body(
        shape::platform(Vector2::ZERO, Vector2::new(60.0, 4.0), Color::GREEN, 0, false).unwrap(),
    );
    let ball = scene.add_body(
        shape::moving_ball(Vector2::new(20.0, -30.0), 2.0, 1.0, Color::RED, 0).unwrap(),
    );
    scene
        .body_mut(ball)
        .unwrap()
        .set_velocity(Vector2::new(0.0, 50.0));
    create_player_gravity(&mut scene, player).unwrap();
    create_player_platform_collision(&mut scene, player, platform).unwrap();
    create_partial_destructive_collision(&mut scene, ball, platform).unwrap();

    // Lands well before the ball reaches the platform
    for _ in 0..200 {
        scene.tick(0.001);
    }
    assert!(scene.body(player).unwrap().info().colliding);
    assert!(scene.body(platform).is_some());

    for _ in 0..400 {
        scene.tick(0.001);
    }
    assert!(scene.body(platform).is_none());
    assert_eq!(scene.force_creator_count(), 1);
    let p = scene.body(player).unwrap();
    assert!(!p.info().colliding);
    assert!(p.velocity().y < 0.0);
}
