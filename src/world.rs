//! World - scene geometry, entity templates and startup wiring.
//!
//! Every collaborator a forager or archer needs is resolved here once and
//! handed over as an entity handle, instead of being looked up later.

use bevy::prelude::*;
use rand::Rng;

use crate::archer::Archer;
use crate::components::*;
use crate::constants::*;
use crate::forager::Forager;
use crate::resources::{CombatZone, GoldCount};
use crate::settings::SimSettings;
use crate::spawner::Spawner;

// ============================================================================
// GEOMETRY
// ============================================================================

/// Axis-aligned rectangle given by center and full size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zone {
    pub center: Vec2,
    pub size: Vec2,
}

impl Zone {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Strict containment: points on the border are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        point.x > self.center.x - half.x
            && point.x < self.center.x + half.x
            && point.y > self.center.y - half.y
            && point.y < self.center.y + half.y
    }

    /// Uniform point inside the rectangle.
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        let half = self.size / 2.0;
        self.center + Vec2::new(symmetric(rng, half.x), symmetric(rng, half.y))
    }
}

fn symmetric(rng: &mut impl Rng, half: f32) -> f32 {
    if half > 0.0 { rng.random_range(-half..half) } else { 0.0 }
}

/// Disk around a forager's home; idle anchors are drawn from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HomeArea {
    pub center: Vec2,
    pub radius: f32,
}

impl HomeArea {
    /// Uniform point in the disk.
    pub fn random_point(&self, rng: &mut impl Rng) -> Vec2 {
        let r = self.radius * rng.random::<f32>().sqrt();
        let theta = rng.random::<f32>() * std::f32::consts::TAU;
        self.center + Vec2::new(theta.cos(), theta.sin()) * r
    }
}

// ============================================================================
// ENTITY TEMPLATES
// ============================================================================

pub fn shed_bundle(at: Vec2) -> impl Bundle {
    (Shed, Position(at), Collider::new(SHED_RADIUS, Category::Shed))
}

/// A resting bag (no launch velocity).
pub fn bag_bundle(at: Vec2) -> impl Bundle {
    (Bag, Position(at), Collider::new(BAG_RADIUS, Category::Bag))
}

pub fn forager_bundle(forager: Forager, at: Vec2) -> impl Bundle {
    (
        forager,
        Position(at),
        Motion::at(at),
        AnimationFlags::default(),
        Collider::new(FORAGER_RADIUS, Category::Forager),
    )
}

pub fn archer_bundle(archer: Archer, at: Vec2) -> impl Bundle {
    (archer, Position(at), AnimationFlags::default(), Collider::new(ARCHER_RADIUS, Category::Archer))
}

pub fn arrow_bundle(arrow: Arrow, at: Vec2) -> impl Bundle {
    (arrow, Position(at), Collider::new(ARROW_RADIUS, Category::Arrow))
}

// ============================================================================
// STARTUP
// ============================================================================

/// Spawn the scene described by `SimSettings` and wire foragers to the
/// shed and archer.
pub fn setup_scene(mut commands: Commands, settings: Res<SimSettings>) {
    let layout = &settings.layout;
    let mut rng = rand::rng();

    commands.insert_resource(CombatZone(Zone::new(layout.combat_zone_center, layout.combat_zone_size)));
    if settings.gold_counter {
        commands.insert_resource(GoldCount::default());
    }

    let shed = layout.shed.map(|at| commands.spawn(shed_bundle(at)).id());

    let archer = layout.archer.map(|at| {
        let archer = Archer {
            interval: settings.archer.shoot_interval,
            arrow_speed: settings.arrow.speed,
            arrow_lifetime: settings.arrow.lifetime,
            shoot_offset: settings.archer.shoot_offset,
            ..default()
        };
        commands.spawn(archer_bundle(archer, at)).id()
    });

    if let Some(at) = layout.spawner {
        commands.spawn((
            Spawner {
                interval: settings.spawner.interval,
                launch_speed: settings.spawner.launch_speed,
                drag: settings.spawner.drag,
                lands: [
                    Zone::new(layout.green_land_center, layout.green_land_size),
                    Zone::new(layout.yellow_land_center, layout.yellow_land_size),
                ],
                since_last: 0.0,
            },
            Position(at),
        ));
    }

    let home = HomeArea { center: layout.home_center, radius: settings.forager.home_radius };
    for _ in 0..settings.forager.count {
        let start = home.random_point(&mut rng);
        let mut forager = Forager::new(home, home.random_point(&mut rng))
            .with_shed(shed)
            .with_archer(archer);
        forager.speed = settings.forager.speed;
        forager.cooldown_duration = settings.forager.dropped_bag_cooldown;
        commands.spawn(forager_bundle(forager, start));
    }

    info!("Scene ready: {} foragers, shed={}, archer={}, spawner={}",
        settings.forager.count, shed.is_some(), archer.is_some(), layout.spawner.is_some());
}

/// Warn once about collaborators that are missing; their features stay
/// silent no-ops afterwards.
pub fn validate_wiring_system(
    foragers: Query<(Entity, &Forager)>,
    sheds: Query<(), With<Shed>>,
    archers: Query<(), With<Archer>>,
    gold_count: Option<Res<GoldCount>>,
) {
    for (entity, forager) in foragers.iter() {
        if !forager.shed.is_some_and(|s| sheds.contains(s)) {
            warn!("Forager {:?}: shed is not assigned, bags will never be delivered", entity);
        }
        if !forager.archer.is_some_and(|a| archers.contains(a)) {
            warn!("Forager {:?}: no archer in the scene, combat zone is inert", entity);
        }
    }
    if gold_count.is_none() {
        warn!("Gold count UI is not bound, deliveries will not be counted");
    }
}
