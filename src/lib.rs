//! Goldrush - goblin foragers, a gold mine and an archer, simulated with Bevy ECS.
//!
//! Movement, collision and pickup/delivery run on the fixed step;
//! timers, the archer's firing cycle and presentation run on the frame tick.

// ============================================================================
// MODULES
// ============================================================================

pub mod archer;
pub mod components;
pub mod constants;
pub mod forager;
pub mod messages;
pub mod resources;
pub mod settings;
pub mod spawner;
pub mod systems;
pub mod world;

#[cfg(test)]
mod tests;

// ============================================================================
// IMPORTS
// ============================================================================

use bevy::prelude::*;

use messages::*;
use resources::*;
use settings::SimSettings;
use systems::*;

/// Build metadata stamped by build.rs.
pub const BUILD_TIMESTAMP: &str = env!("BUILD_TIMESTAMP");
pub const BUILD_COMMIT: &str = env!("BUILD_COMMIT");

// ============================================================================
// SCHEDULE
// ============================================================================

/// Fixed-step phases. Chained, so commands from one phase are visible to the next.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tick {
    Think,  // Bag scan + forager steering
    Move,   // Free-flying bags and arrows
    Detect, // Overlap detection
    React,  // Hits, pickups, deliveries
}

/// Frame-tick phases.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Timers,  // Arrow lifetime
    Combat,  // Zone check, archer targeting + firing
    Economy, // Cooldowns, spawning, gold count, combat tallies
    Present, // Animation flags, tweens
}

/// Wire the simulation into `app`. Uses the `SimSettings` resource already
/// inserted, or defaults.
pub fn build_app(app: &mut App) {
    app.init_resource::<SimSettings>();
    let fixed_hz = app.world().resource::<SimSettings>().fixed_hz;

    app.insert_resource(Time::<Fixed>::from_hz(fixed_hz))
       .init_resource::<OverlapPairs>()
       .init_resource::<CombatStats>()
       .add_message::<TriggerEnterMsg>()
       .add_message::<ArrowHitMsg>()
       .add_message::<SetArcherTargetMsg>()
       .add_message::<BagDeliveredMsg>()
       .add_message::<ArrowFiredMsg>()
       .configure_sets(FixedUpdate, (Tick::Think, Tick::Move, Tick::Detect, Tick::React).chain())
       .configure_sets(Update, (Step::Timers, Step::Combat, Step::Economy, Step::Present).chain())
       .add_systems(Startup, world::setup_scene)
       .add_systems(PostStartup, world::validate_wiring_system)
       // Fixed step
       .add_systems(FixedUpdate, forager_seek_system.in_set(Tick::Think))
       .add_systems(FixedUpdate, (
           bag_flight_system,
           arrow_flight_system,
       ).in_set(Tick::Move))
       .add_systems(FixedUpdate, detect_overlaps_system.in_set(Tick::Detect))
       .add_systems(FixedUpdate, (
           arrow_trigger_system,
           forager_trigger_system,
           arrow_hit_response_system,
       ).chain().in_set(Tick::React))
       // Frame tick
       .add_systems(Update, arrow_lifetime_system.in_set(Step::Timers))
       .add_systems(Update, (
           combat_zone_system,
           apply_archer_target_system,
           archer_cycle_system,
           archer_fire_system,
       ).chain().in_set(Step::Combat))
       .add_systems(Update, (
           forager_cooldown_system,
           spawner_system,
           gold_count_system,
           arrow_fired_stats_system,
       ).in_set(Step::Economy))
       .add_systems(Update, (
           animation_sync_system,
           scale_in_system,
       ).in_set(Step::Present));
}
