//! Archer targeting, firing cadence and hit arbitration.

use bevy::prelude::*;

use super::*;
use crate::archer::Archer;
use crate::components::{AnimationFlags, Arrow, Held, Position};
use crate::resources::CombatStats;

fn zone_app() -> App {
    test_app(bare_settings(Vec2::new(5.0, 0.0), Vec2::new(4.0, 4.0)))
}

fn stats(app: &App) -> &CombatStats {
    app.world().resource::<CombatStats>()
}

#[test]
fn first_arrow_after_one_interval() {
    let mut app = zone_app();
    let archer = spawn_archer(&mut app, Vec2::ZERO);
    let goblin = spawn_forager(&mut app, Vec2::new(5.0, 0.0), None, Some(archer));

    run_for(&mut app, 1.8);
    assert_eq!(stats(&app).arrows_fired, 0);
    let bow = app.world().get::<Archer>(archer).expect("archer");
    assert_eq!(bow.target, Some(goblin));
    assert!(bow.shooting);
    assert!(app.world().get::<AnimationFlags>(archer).expect("flags").shooting);

    run_for(&mut app, 0.5);
    assert_eq!(stats(&app).arrows_fired, 1);

    // Arrow covers five units at speed 10 and connects.
    run_for(&mut app, 0.8);
    assert_eq!(stats(&app).hits, 1);
    assert_eq!(stats(&app).bags_dropped, 0, "empty-handed hit has no effect");
}

#[test]
fn leaving_the_zone_mid_draw_cancels_the_shot() {
    let mut app = zone_app();
    let archer = spawn_archer(&mut app, Vec2::ZERO);
    let goblin = spawn_forager(&mut app, Vec2::new(5.0, 0.0), None, Some(archer));

    run_for(&mut app, 1.0);
    assert!(app.world().get::<Archer>(archer).expect("archer").shooting);

    // Teleport out; the forager stays put since it is already at idle.
    app.world_mut().get_mut::<Position>(goblin).expect("position").0 = Vec2::new(20.0, 0.0);
    app.update();
    let bow = app.world().get::<Archer>(archer).expect("archer");
    assert_eq!(bow.target, None);
    assert!(!bow.shooting);

    run_for(&mut app, 3.0);
    assert_eq!(stats(&app).arrows_fired, 0);
    assert!(!app.world().get::<AnimationFlags>(archer).expect("flags").shooting);
}

#[test]
fn cadence_matches_interval() {
    let mut app = zone_app();
    let archer = spawn_archer(&mut app, Vec2::ZERO);
    spawn_forager(&mut app, Vec2::new(5.0, 0.0), None, Some(archer));

    // Draws complete at about 2, 4, 6 and 8 seconds.
    run_for(&mut app, 8.5);
    assert_eq!(stats(&app).arrows_fired, 4);
}

#[test]
fn hit_drops_bag_and_blocks_its_pickup() {
    let mut app = zone_app();
    let archer = spawn_archer(&mut app, Vec2::ZERO);
    // Bag under the forager's feet, a second one further along.
    let first = spawn_bag(&mut app, Vec2::new(5.0, 0.0));
    let second = spawn_bag(&mut app, Vec2::new(6.0, 1.5));
    let goblin = spawn_forager(&mut app, Vec2::new(5.0, 0.0), None, Some(archer));

    run_for(&mut app, 0.2);
    assert_eq!(forager(&app, goblin).carried_bag(), Some(first));

    // Arrow released at ~2s lands ~0.5s later.
    run_for(&mut app, 2.5);
    assert_eq!(stats(&app).bags_dropped, 1);
    assert!(app.world().get::<Held>(first).is_none(), "dropped bag is active again");
    let dropped_at = app.world().get::<Position>(first).expect("bag").0;
    assert!(dropped_at.distance(Vec2::new(5.0, 0.0)) < 0.01);

    // Rescanned straight away: the dropped bag is excluded, so it went for the other.
    let g = forager(&app, goblin);
    assert!(g.carried_bag() == Some(second) || g.pursued_bag() == Some(second), "{:?}", g.state);
    assert_ne!(g.carried_bag(), Some(first));
}

#[test]
fn dropped_bag_is_picked_up_again_after_cooldown() {
    let mut app = zone_app();
    let archer = spawn_archer(&mut app, Vec2::ZERO);
    let bag = spawn_bag(&mut app, Vec2::new(5.0, 0.0));
    let goblin = spawn_forager(&mut app, Vec2::new(5.0, 0.0), None, Some(archer));

    run_for(&mut app, 0.2);
    assert_eq!(forager(&app, goblin).carried_bag(), Some(bag));

    // Hit at ~2.5s; the bag lands underfoot and stays excluded for a second.
    run_for(&mut app, 2.5);
    assert_eq!(stats(&app).bags_dropped, 1);
    let g = forager(&app, goblin);
    assert!(g.is_on_cooldown());
    assert_eq!(g.carried_bag(), None);

    // Cooldown over before the next arrow (released at ~4s).
    run_for(&mut app, 1.0);
    let g = forager(&app, goblin);
    assert!(!g.is_on_cooldown());
    assert_eq!(g.carried_bag(), Some(bag));
    assert_eq!(stats(&app).bags_dropped, 1);
}

#[test]
fn stray_arrow_expires_after_its_lifetime() {
    let mut app = test_app(peaceful_settings());
    let arrow = spawn_arrow(&mut app, Vec2::ZERO, Vec2::X);

    run_for(&mut app, 4.5);
    assert!(app.world().get::<Arrow>(arrow).is_some());
    assert_eq!(stats(&app).arrows_expired, 0);

    run_for(&mut app, 1.0);
    assert!(app.world().get_entity(arrow).is_err());
    assert_eq!(stats(&app).arrows_expired, 1);
    assert_eq!(stats(&app).hits, 0);
}

#[test]
fn arrow_passes_through_everything_but_foragers() {
    let mut app = test_app(peaceful_settings());
    let bag = spawn_bag(&mut app, Vec2::new(2.0, 0.0));
    let shed = spawn_shed(&mut app, Vec2::new(4.0, 0.0));
    let archer = spawn_archer(&mut app, Vec2::new(6.0, 0.0));
    let arrow = spawn_arrow(&mut app, Vec2::ZERO, Vec2::X);

    // Ten units per second: past all three by 0.8s.
    run_for(&mut app, 0.8);
    let pos = app.world().get::<Position>(arrow).expect("arrow survives").0;
    assert!(pos.x > 7.0, "{pos:?}");
    assert_eq!(stats(&app).hits, 0);
    assert!(app.world().get::<Held>(bag).is_none());
    assert_eq!(app.world().get::<Position>(bag).expect("bag").0, Vec2::new(2.0, 0.0));
    assert!(app.world().get_entity(shed).is_ok());
    assert_eq!(app.world().get::<Archer>(archer).expect("archer").target, None);
}
