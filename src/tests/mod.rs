//! Scenario tests - the full schedule driven headless with manual time.
//!
//! Each file sets up a small scene by hand and steps the app frame by frame.

mod archer_combat;

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::archer::Archer;
use crate::components::Arrow;
use crate::constants::{ARROW_LIFETIME, ARROW_SPEED};
use crate::forager::Forager;
use crate::settings::SimSettings;
use crate::world::{HomeArea, archer_bundle, arrow_bundle, bag_bundle, forager_bundle, shed_bundle};

/// Seconds advanced per `app.update()`. Matches the fixed step, so every
/// frame runs exactly one fixed tick.
pub const FRAME: f32 = 0.02;

/// Settings with nothing spawned automatically and the combat zone at
/// `zone_center` / `zone_size`.
pub fn bare_settings(zone_center: Vec2, zone_size: Vec2) -> SimSettings {
    let mut settings = SimSettings::default();
    settings.forager.count = 0;
    settings.layout.shed = None;
    settings.layout.archer = None;
    settings.layout.spawner = None;
    settings.layout.combat_zone_center = zone_center;
    settings.layout.combat_zone_size = zone_size;
    settings.fixed_hz = 50.0;
    settings
}

/// Far-away zone so nothing draws fire.
pub fn peaceful_settings() -> SimSettings {
    bare_settings(Vec2::splat(1000.0), Vec2::ONE)
}

/// Headless app with manual time stepping.
pub fn test_app(settings: SimSettings) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
       .insert_resource(settings)
       .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(20)));
    crate::build_app(&mut app);
    app
}

pub fn run_for(app: &mut App, seconds: f32) {
    let frames = (seconds / FRAME).round() as usize;
    for _ in 0..frames {
        app.update();
    }
}

pub fn spawn_shed(app: &mut App, at: Vec2) -> Entity {
    app.world_mut().spawn(shed_bundle(at)).id()
}

pub fn spawn_bag(app: &mut App, at: Vec2) -> Entity {
    app.world_mut().spawn(bag_bundle(at)).id()
}

pub fn spawn_archer(app: &mut App, at: Vec2) -> Entity {
    app.world_mut().spawn(archer_bundle(Archer::default(), at)).id()
}

/// Loose arrow with default speed and lifetime.
pub fn spawn_arrow(app: &mut App, at: Vec2, direction: Vec2) -> Entity {
    let arrow = Arrow::new(direction, ARROW_SPEED, ARROW_LIFETIME);
    app.world_mut().spawn(arrow_bundle(arrow, at)).id()
}

/// Forager whose idle anchor is its starting point.
pub fn spawn_forager(app: &mut App, at: Vec2, shed: Option<Entity>, archer: Option<Entity>) -> Entity {
    let home = HomeArea { center: at, radius: 0.0 };
    let forager = Forager::new(home, at).with_shed(shed).with_archer(archer);
    app.world_mut().spawn(forager_bundle(forager, at)).id()
}

pub fn forager(app: &App, entity: Entity) -> &Forager {
    app.world().get::<Forager>(entity).expect("forager exists")
}
