//! Constants - Tuning defaults for the foraging/archery simulation

// ============================================================================
// FORAGER CONSTANTS
// ============================================================================

/// Forager walk speed in world units per second.
pub const FORAGER_SPEED: f32 = 5.0;

/// Radius of the disk around the home center where idle anchors are sampled.
pub const HOME_RADIUS: f32 = 5.0;

/// Seconds a dropped bag stays unpickupable for the forager that dropped it.
pub const DROPPED_BAG_COOLDOWN: f32 = 1.0;

/// Distance from the idle anchor at which a forager counts as arrived.
pub const IDLE_ARRIVAL_EPSILON: f32 = 0.1;

/// Squared realized speed above which the walking flag is raised.
pub const WALKING_SPEED_SQ_THRESHOLD: f32 = 0.01;

// ============================================================================
// ARCHER / ARROW CONSTANTS
// ============================================================================

/// Seconds between the start of a draw and the release of an arrow.
pub const SHOOT_INTERVAL: f32 = 2.0;

/// Arrow speed in world units per second.
pub const ARROW_SPEED: f32 = 10.0;

/// Seconds before an arrow that hit nothing is removed.
pub const ARROW_LIFETIME: f32 = 5.0;

// ============================================================================
// SPAWNER CONSTANTS
// ============================================================================

/// Seconds between gold bag launches.
pub const SPAWN_INTERVAL: f32 = 5.0;

/// Initial launch speed of a bag leaving the mine.
pub const BAG_LAUNCH_SPEED: f32 = 10.0;

/// Linear drag applied to flying bags (fraction of velocity lost per second).
pub const BAG_DRAG: f32 = 2.0;

/// Below this speed a flying bag is considered settled.
pub const BAG_REST_SPEED: f32 = 0.05;

/// Duration of the pop-in scale tween on fresh bags.
pub const SCALE_IN_SECONDS: f32 = 0.5;

// ============================================================================
// COLLIDER RADII
// ============================================================================

pub const FORAGER_RADIUS: f32 = 0.3;
pub const BAG_RADIUS: f32 = 0.25;
pub const SHED_RADIUS: f32 = 1.0;
pub const ARROW_RADIUS: f32 = 0.1;
pub const ARCHER_RADIUS: f32 = 0.4;

/// Fixed simulation rate (Hz) used when no override is configured.
pub const FIXED_HZ: f64 = 50.0;
